//! Controller state: feature flags, committed presets, and timers.
//!
//! Everything the dispatcher, the blink scheduler and the configuration
//! sessions mutate lives in one [`ControllerState`] passed by reference.

use crate::Color;
use crate::blink::BlinkTimer;
use crate::colors;
use crate::config::ControllerConfig;
use crate::tap::TapTimer;
use crate::time::{TimeInstant, millis};
use crate::types::Feature;

/// Enabled flag per lighting feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FeatureFlags {
    pub beacon: bool,
    pub right_turn: bool,
    pub left_turn: bool,
    pub hazard: bool,
    pub head: bool,
    pub tail: bool,
    pub low_beam: bool,
}

impl FeatureFlags {
    pub fn get(&self, feature: Feature) -> bool {
        match feature {
            Feature::Beacon => self.beacon,
            Feature::RightTurn => self.right_turn,
            Feature::LeftTurn => self.left_turn,
            Feature::Hazard => self.hazard,
            Feature::Head => self.head,
            Feature::Tail => self.tail,
            Feature::LowBeam => self.low_beam,
        }
    }

    /// Turns the right signal on or off, always disabling left and hazard.
    pub fn set_right_turn(&mut self, on: bool) {
        self.right_turn = on;
        self.left_turn = false;
        self.hazard = false;
    }

    /// Turns the left signal on or off, always disabling right and hazard.
    pub fn set_left_turn(&mut self, on: bool) {
        self.left_turn = on;
        self.right_turn = false;
        self.hazard = false;
    }

    /// Turns hazard on or off, always disabling both turn signals.
    pub fn set_hazard(&mut self, on: bool) {
        self.hazard = on;
        self.right_turn = false;
        self.left_turn = false;
    }

    pub(crate) fn clear_turn(&mut self) {
        self.right_turn = false;
        self.left_turn = false;
        self.hazard = false;
    }

    pub(crate) fn clear_main(&mut self) {
        self.head = false;
        self.tail = false;
        self.low_beam = false;
    }
}

/// Session-persistent brightness and color choices.
///
/// Only a confirmed configuration session (or the beacon color swap) changes
/// these after startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presets {
    pub beacon_brightness: u8,
    pub turn_brightness: u8,
    pub main_brightness: u8,
    pub head_color: Color,
    pub tail_color: Color,
    pub turn_color: Color,
    pub beacon_a: Color,
    pub beacon_b: Color,
}

impl Default for Presets {
    fn default() -> Self {
        Self {
            beacon_brightness: 100,
            turn_brightness: 100,
            main_brightness: 100,
            head_color: colors::HEAD_WHITE,
            tail_color: colors::TAIL_RED,
            turn_color: colors::TURN_AMBER,
            beacon_a: colors::BEACON_RED,
            beacon_b: colors::BEACON_BLUE,
        }
    }
}

impl Presets {
    /// Swaps beacon color A between white and red.
    pub fn swap_beacon_color(&mut self) {
        self.beacon_a = if self.beacon_a == colors::BEACON_WHITE {
            colors::BEACON_RED
        } else {
            colors::BEACON_WHITE
        };
    }
}

/// Blink timers for the four blinking features.
#[derive(Debug, Clone, Copy)]
pub struct BlinkTimers<I: TimeInstant> {
    pub beacon: BlinkTimer<I>,
    pub right_turn: BlinkTimer<I>,
    pub left_turn: BlinkTimer<I>,
    pub hazard: BlinkTimer<I>,
}

/// Tap timers for the groups that distinguish single from double taps.
#[derive(Debug, Clone, Copy)]
pub struct TapTimers<I: TimeInstant> {
    pub beacon: TapTimer<I>,
    pub right_turn: TapTimer<I>,
    pub left_turn: TapTimer<I>,
    pub head: TapTimer<I>,
}

impl<I: TimeInstant> Default for TapTimers<I> {
    fn default() -> Self {
        Self {
            beacon: TapTimer::new(),
            right_turn: TapTimer::new(),
            left_turn: TapTimer::new(),
            head: TapTimer::new(),
        }
    }
}

/// All mutable controller state.
#[derive(Debug, Clone, Copy)]
pub struct ControllerState<I: TimeInstant> {
    pub flags: FeatureFlags,
    pub presets: Presets,
    pub blink: BlinkTimers<I>,
    pub taps: TapTimers<I>,
}

impl<I: TimeInstant> ControllerState<I> {
    /// Creates the power-on state: everything off, default presets.
    pub fn new(config: &ControllerConfig) -> Self {
        Self::with_presets(config, Presets::default())
    }

    pub fn with_presets(config: &ControllerConfig, presets: Presets) -> Self {
        let beacon = millis::<I>(config.beacon_half_period_ms);
        let turn = millis::<I>(config.turn_half_period_ms);
        Self {
            flags: FeatureFlags::default(),
            presets,
            blink: BlinkTimers {
                beacon: BlinkTimer::new(beacon),
                right_turn: BlinkTimer::new(turn),
                left_turn: BlinkTimer::new(turn),
                hazard: BlinkTimer::new(turn),
            },
            taps: TapTimers::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_turn_clears_left_and_hazard() {
        let mut flags = FeatureFlags {
            left_turn: true,
            hazard: true,
            beacon: true,
            ..Default::default()
        };
        flags.set_right_turn(true);
        assert!(flags.right_turn);
        assert!(!flags.left_turn);
        assert!(!flags.hazard);
        assert!(flags.beacon);
    }

    #[test]
    fn left_turn_clears_right_and_hazard() {
        let mut flags = FeatureFlags {
            right_turn: true,
            hazard: true,
            ..Default::default()
        };
        flags.set_left_turn(true);
        assert!(flags.left_turn);
        assert!(!flags.right_turn);
        assert!(!flags.hazard);
    }

    #[test]
    fn turning_a_signal_off_still_clears_the_others() {
        let mut flags = FeatureFlags {
            hazard: true,
            ..Default::default()
        };
        flags.set_left_turn(false);
        assert!(!flags.hazard);
        assert!(!flags.get(Feature::LeftTurn));
    }

    #[test]
    fn beacon_swap_alternates_white_and_red() {
        let mut presets = Presets::default();
        presets.swap_beacon_color();
        assert_eq!(presets.beacon_a, colors::BEACON_WHITE);
        presets.swap_beacon_color();
        assert_eq!(presets.beacon_a, colors::BEACON_RED);
    }
}
