//! Half-period blink timers.

use crate::time::{TimeDuration, TimeInstant};

/// Phase timer for one blinking feature.
///
/// The phase flips once `half_period` has elapsed since the last flip. The
/// baseline then advances by exactly one half period rather than jumping to
/// `now`, so late polls do not accumulate drift.
#[derive(Debug, Clone, Copy)]
pub struct BlinkTimer<I: TimeInstant> {
    half_period: I::Duration,
    phase: bool,
    last_flip: Option<I>,
}

impl<I: TimeInstant> BlinkTimer<I> {
    /// Creates an idle timer; it starts counting on the first [`reset`](Self::reset).
    pub fn new(half_period: I::Duration) -> Self {
        Self {
            half_period,
            phase: false,
            last_flip: None,
        }
    }

    pub fn phase(&self) -> bool {
        self.phase
    }

    pub fn half_period(&self) -> I::Duration {
        self.half_period
    }

    pub fn last_flip(&self) -> Option<I> {
        self.last_flip
    }

    /// Restarts the interval at `now` with the phase ON.
    pub fn reset(&mut self, now: I) {
        self.phase = true;
        self.last_flip = Some(now);
    }

    /// Flips the phase when a half period has elapsed.
    ///
    /// Returns the new phase after a flip, `None` otherwise. A timer that was
    /// never reset starts its baseline at `now`.
    pub fn poll(&mut self, now: I) -> Option<bool> {
        let Some(last) = self.last_flip else {
            self.last_flip = Some(now);
            return None;
        };

        if now.millis_since(last) < self.half_period.as_millis() {
            return None;
        }

        // On overflow the baseline restarts at now instead of wrapping.
        self.last_flip = Some(last.checked_add(self.half_period).unwrap_or(now));
        self.phase = !self.phase;
        Some(self.phase)
    }
}
