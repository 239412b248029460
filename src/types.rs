//! Core types: touch masks, features and errors.

/// Bitmask of touched electrodes, one bit per electrode.
pub type TouchMask = u16;

/// Electrode bits and the logical input groups built from them.
pub mod touch {
    use super::TouchMask;

    /// Beacon (gyro) electrode.
    pub const BEACON: TouchMask = 1 << 0;
    /// Right turn electrode.
    pub const TURN_RIGHT: TouchMask = 1 << 1;
    /// Left turn electrode.
    pub const TURN_LEFT: TouchMask = 1 << 2;
    /// Headlight electrode.
    pub const HEAD: TouchMask = 1 << 3;
    /// Tail light electrode.
    pub const TAIL: TouchMask = 1 << 4;
    /// Control electrode, confirms configuration sessions.
    pub const CTRL: TouchMask = 1 << 5;
    /// Demo show electrode.
    pub const SHOW: TouchMask = 1 << 6;

    pub const HAZARD: TouchMask = TURN_RIGHT | TURN_LEFT;
    pub const LOW_BEAM: TouchMask = HEAD | TAIL;
    pub const HEAD_COLOR: TouchMask = CTRL | HEAD;
    pub const TAIL_COLOR: TouchMask = CTRL | TAIL;
    pub const BEACON_SWAP: TouchMask = CTRL | BEACON;
}

/// A lighting feature with an enabled flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Feature {
    Beacon,
    RightTurn,
    LeftTurn,
    Hazard,
    Head,
    Tail,
    LowBeam,
}

/// Result of classifying one snapshot for one tap group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TapEvent {
    /// Nothing to dispatch.
    #[default]
    None,
    /// First tap of a burst. Fires immediately.
    Single,
    /// Second tap inside the double-tap window.
    Double,
}

/// Errors raised while building a [`ControllerConfig`](crate::ControllerConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A blink half period of zero would flip every cycle.
    ZeroHalfPeriod,

    /// Polling intervals must be non-zero.
    ZeroPollInterval,

    /// The double-tap window must be shorter than the burst stale timeout.
    DoubleTapWindowTooLong { window_ms: u64, stale_ms: u64 },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroHalfPeriod => write!(f, "blink half period must be non-zero"),
            ConfigError::ZeroPollInterval => write!(f, "poll interval must be non-zero"),
            ConfigError::DoubleTapWindowTooLong {
                window_ms,
                stale_ms,
            } => write!(
                f,
                "double-tap window of {} ms must be shorter than the {} ms stale timeout",
                window_ms, stale_ms
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Errors raised when assembling the strip set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RendererError {
    /// A strip has fewer pixels than its fixed layout addresses.
    PixelCountMismatch {
        strip: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl core::fmt::Display for RendererError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RendererError::PixelCountMismatch {
                strip,
                expected,
                actual,
            } => write!(
                f,
                "{} strip needs {} pixels, but has {}",
                strip, expected, actual
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RendererError {}

/// Errors that stop the controller from starting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerError {
    /// The touch sensor did not answer during startup. Fatal.
    SensorInit,

    /// The strip set does not match the fixed pixel layout.
    Renderer(RendererError),

    /// The supplied configuration was rejected.
    Config(ConfigError),
}

impl core::fmt::Display for ControllerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ControllerError::SensorInit => write!(f, "touch sensor not found, check wiring"),
            ControllerError::Renderer(err) => write!(f, "renderer error: {}", err),
            ControllerError::Config(err) => write!(f, "config error: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ControllerError {}

impl From<RendererError> for ControllerError {
    fn from(err: RendererError) -> Self {
        ControllerError::Renderer(err)
    }
}

impl From<ConfigError> for ControllerError {
    fn from(err: ConfigError) -> Self {
        ControllerError::Config(err)
    }
}
