//! Single / double tap classification.
//!
//! Provides [`TapTimer`], the per-group burst bookkeeping that turns exact-mask
//! snapshots into [`TapEvent`]s. The single tap fires optimistically on the
//! first press of a burst. A second press inside the double-tap window
//! escalates to [`TapEvent::Double`] instead of firing a second toggle.

use crate::time::TimeInstant;
use crate::types::{TapEvent, TouchMask};

/// Timing rules shared by all tap groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TapTiming {
    /// A second tap strictly inside this window is a double tap.
    pub double_tap_ms: u64,
    /// A burst whose first tap is older than this is dropped.
    pub stale_ms: u64,
}

impl Default for TapTiming {
    fn default() -> Self {
        Self {
            double_tap_ms: 500,
            stale_ms: 1000,
        }
    }
}

/// Tap burst state for one logical input group.
#[derive(Debug, Clone, Copy)]
pub struct TapTimer<I: TimeInstant> {
    count: u8,
    first: Option<I>,
}

impl<I: TimeInstant> Default for TapTimer<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: TimeInstant> TapTimer<I> {
    /// Creates a timer with no pending burst.
    pub const fn new() -> Self {
        Self {
            count: 0,
            first: None,
        }
    }

    /// Number of presses counted in the current burst.
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Drops any pending burst.
    pub fn reset(&mut self) {
        self.count = 0;
        self.first = None;
    }

    /// Classifies one snapshot against the group's exact mask.
    ///
    /// A pending burst older than `timing.stale_ms` is dropped before the
    /// snapshot is looked at. Presses beyond the second, and second presses
    /// outside the double-tap window, yield [`TapEvent::None`]; the caller
    /// still waits for their release.
    pub fn classify(
        &mut self,
        snapshot: TouchMask,
        mask: TouchMask,
        now: I,
        timing: TapTiming,
    ) -> TapEvent {
        if self.count > 0 {
            if let Some(first) = self.first {
                if now.millis_since(first) > timing.stale_ms {
                    self.reset();
                }
            }
        }

        if snapshot != mask {
            return TapEvent::None;
        }

        self.count = self.count.saturating_add(1);
        match self.count {
            1 => {
                self.first = Some(now);
                TapEvent::Single
            }
            2 => {
                let within = self
                    .first
                    .is_some_and(|first| now.millis_since(first) < timing.double_tap_ms);
                if within {
                    self.reset();
                    TapEvent::Double
                } else {
                    TapEvent::None
                }
            }
            _ => TapEvent::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::TimeDuration;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Ms(u64);

    impl TimeDuration for Ms {
        const ZERO: Self = Ms(0);

        fn as_millis(&self) -> u64 {
            self.0
        }

        fn from_millis(millis: u64) -> Self {
            Ms(millis)
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct At(u64);

    impl TimeInstant for At {
        type Duration = Ms;

        fn duration_since(&self, earlier: Self) -> Ms {
            Ms(self.0 - earlier.0)
        }

        fn checked_add(self, duration: Ms) -> Option<Self> {
            self.0.checked_add(duration.0).map(At)
        }
    }

    const MASK: TouchMask = 0b10;
    const TIMING: TapTiming = TapTiming {
        double_tap_ms: 500,
        stale_ms: 1000,
    };

    #[test]
    fn non_matching_snapshot_is_ignored() {
        let mut tap = TapTimer::new();
        assert_eq!(tap.classify(0, MASK, At(0), TIMING), TapEvent::None);
        // Superset of the mask is not an exact match
        assert_eq!(tap.classify(0b110, MASK, At(0), TIMING), TapEvent::None);
        assert_eq!(tap.count(), 0);
    }

    #[test]
    fn first_press_fires_single_immediately() {
        let mut tap = TapTimer::new();
        assert_eq!(tap.classify(MASK, MASK, At(10), TIMING), TapEvent::Single);
        assert_eq!(tap.count(), 1);
    }

    #[test]
    fn second_press_inside_window_is_double() {
        let mut tap = TapTimer::new();
        tap.classify(MASK, MASK, At(0), TIMING);
        tap.classify(0, MASK, At(100), TIMING);
        assert_eq!(tap.classify(MASK, MASK, At(499), TIMING), TapEvent::Double);
        assert_eq!(tap.count(), 0);
    }

    #[test]
    fn second_press_at_window_edge_is_not_double() {
        let mut tap = TapTimer::new();
        tap.classify(MASK, MASK, At(0), TIMING);
        assert_eq!(tap.classify(MASK, MASK, At(500), TIMING), TapEvent::None);
        assert_eq!(tap.count(), 2);
    }

    #[test]
    fn late_burst_swallows_presses_until_stale() {
        let mut tap = TapTimer::new();
        tap.classify(MASK, MASK, At(0), TIMING);
        assert_eq!(tap.classify(MASK, MASK, At(700), TIMING), TapEvent::None);
        assert_eq!(tap.classify(MASK, MASK, At(900), TIMING), TapEvent::None);
        // Older than the stale timeout: fresh burst
        assert_eq!(tap.classify(MASK, MASK, At(1001), TIMING), TapEvent::Single);
    }

    #[test]
    fn stale_burst_is_dropped_even_without_a_press() {
        let mut tap = TapTimer::new();
        tap.classify(MASK, MASK, At(0), TIMING);
        tap.classify(0, MASK, At(1000), TIMING);
        assert_eq!(tap.count(), 1);
        tap.classify(0, MASK, At(1001), TIMING);
        assert_eq!(tap.count(), 0);
    }
}
