//! Controller timing and trigger configuration.

use crate::tap::TapTiming;
use crate::types::ConfigError;

/// How the CTRL + beacon color swap combination is recognised.
///
/// The firmware this controller replaces tested the combination with an
/// expression that, through operator precedence, held for every snapshot.
/// `ExactCombination` is the intended behavior; `AnyTouch` reproduces the
/// old one for any non-zero snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwapTrigger {
    /// Snapshot must equal CTRL | BEACON.
    #[default]
    ExactCombination,
    /// Any touch at all swaps the color.
    AnyTouch,
}

/// Tunables for a [`Controller`](crate::Controller).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    /// Beacon blink half period.
    pub beacon_half_period_ms: u64,
    /// Turn and hazard blink half period.
    pub turn_half_period_ms: u64,
    pub tap: TapTiming,
    /// Sleep between polls while waiting for a release.
    pub release_poll_ms: u64,
    /// Upper bound on release polls; `None` waits forever.
    pub release_poll_limit: Option<u32>,
    /// Sleep between configuration session iterations.
    pub session_poll_ms: u64,
    /// Sleep between demo frames.
    pub demo_frame_ms: u64,
    /// Length of one demo flash period.
    pub demo_period_ms: u64,
    pub swap_trigger: SwapTrigger,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            beacon_half_period_ms: 500,
            turn_half_period_ms: 500,
            tap: TapTiming::default(),
            release_poll_ms: 10,
            release_poll_limit: None,
            session_poll_ms: 10,
            demo_frame_ms: 20,
            demo_period_ms: 500,
            swap_trigger: SwapTrigger::default(),
        }
    }
}

impl ControllerConfig {
    /// Creates a builder starting from the defaults.
    pub fn builder() -> ControllerConfigBuilder {
        ControllerConfigBuilder::new()
    }

    /// Checks the invariants the controller relies on.
    ///
    /// # Errors
    /// * `ZeroHalfPeriod` - A blink half period or the demo period is zero
    /// * `ZeroPollInterval` - A poll interval or the demo frame is zero
    /// * `DoubleTapWindowTooLong` - The double-tap window is not shorter than the stale timeout
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.beacon_half_period_ms == 0
            || self.turn_half_period_ms == 0
            || self.demo_period_ms == 0
        {
            return Err(ConfigError::ZeroHalfPeriod);
        }

        if self.release_poll_ms == 0 || self.session_poll_ms == 0 || self.demo_frame_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }

        if self.tap.double_tap_ms >= self.tap.stale_ms {
            return Err(ConfigError::DoubleTapWindowTooLong {
                window_ms: self.tap.double_tap_ms,
                stale_ms: self.tap.stale_ms,
            });
        }

        Ok(())
    }
}

/// Builder for validated [`ControllerConfig`]s.
#[derive(Debug)]
pub struct ControllerConfigBuilder {
    config: ControllerConfig,
}

impl ControllerConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ControllerConfig::default(),
        }
    }

    pub fn beacon_half_period_ms(mut self, ms: u64) -> Self {
        self.config.beacon_half_period_ms = ms;
        self
    }

    pub fn turn_half_period_ms(mut self, ms: u64) -> Self {
        self.config.turn_half_period_ms = ms;
        self
    }

    pub fn double_tap_ms(mut self, ms: u64) -> Self {
        self.config.tap.double_tap_ms = ms;
        self
    }

    pub fn stale_ms(mut self, ms: u64) -> Self {
        self.config.tap.stale_ms = ms;
        self
    }

    pub fn release_poll_ms(mut self, ms: u64) -> Self {
        self.config.release_poll_ms = ms;
        self
    }

    /// Caps release waits, keeping host tests from hanging on a stuck touch.
    pub fn release_poll_limit(mut self, limit: u32) -> Self {
        self.config.release_poll_limit = Some(limit);
        self
    }

    pub fn session_poll_ms(mut self, ms: u64) -> Self {
        self.config.session_poll_ms = ms;
        self
    }

    pub fn demo_frame_ms(mut self, ms: u64) -> Self {
        self.config.demo_frame_ms = ms;
        self
    }

    pub fn demo_period_ms(mut self, ms: u64) -> Self {
        self.config.demo_period_ms = ms;
        self
    }

    pub fn swap_trigger(mut self, trigger: SwapTrigger) -> Self {
        self.config.swap_trigger = trigger;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    /// See [`ControllerConfig::validate`].
    pub fn build(self) -> Result<ControllerConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ControllerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
