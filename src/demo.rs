//! Show mode: a self-contained demo animation.
//!
//! The beacon and turn strips flash with the demo palette every period. During
//! every even period each frame moves a chaser one step around the four centre
//! pixels of the main strip.

use crate::COLOR_OFF;
use crate::colors::{SHOW_BEACON_A, SHOW_BEACON_B, SHOW_MAIN, SHOW_TURN};
use crate::log::log_info;
use crate::renderer::{PixelStrip, Strips};
use crate::state::Presets;
use crate::time::TimeInstant;
use crate::types::{TouchMask, touch};

/// Main strip pixels the chaser walks around.
pub const CHASER_PIXELS: [usize; 4] = [1, 2, 5, 6];

/// Progress of the demo after one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DemoStatus {
    Running,
    /// The show electrode was pressed again.
    Finished,
}

/// A running demo.
#[derive(Debug, Clone, Copy)]
pub struct DemoSession<I: TimeInstant> {
    start: I,
    period_ms: u64,
    order: usize,
}

impl<I: TimeInstant> DemoSession<I> {
    /// Applies the committed brightness, clears every strip and starts the clock.
    pub fn begin<P: PixelStrip>(
        now: I,
        period_ms: u64,
        presets: &Presets,
        strips: &mut Strips<P>,
    ) -> Self {
        log_info!("show mode started");
        strips.apply_brightness(presets);
        strips.clear_all();
        Self {
            start: now,
            period_ms,
            order: 0,
        }
    }

    /// Index into [`CHASER_PIXELS`] the next chaser step lights.
    pub fn chaser_position(&self) -> usize {
        self.order
    }

    /// Draws one frame for `now`, then checks `snapshot` for the exit press.
    pub fn step<P: PixelStrip>(
        &mut self,
        now: I,
        snapshot: TouchMask,
        strips: &mut Strips<P>,
    ) -> DemoStatus {
        let period = now.millis_since(self.start) / self.period_ms;
        let phase = period & 1 == 1;

        strips.beacon(phase, SHOW_BEACON_A, SHOW_BEACON_B);
        strips.hazard(phase, SHOW_TURN);

        if period % 2 == 0 {
            strips.set_main_pixel(CHASER_PIXELS[self.order], SHOW_MAIN);
            strips.set_main_pixel(CHASER_PIXELS[(self.order + 3) % 4], COLOR_OFF);
            strips.show_main();
            self.order = (self.order + 1) & 3;
        }

        if snapshot == touch::SHOW {
            DemoStatus::Finished
        } else {
            DemoStatus::Running
        }
    }

    /// Darkens every strip.
    pub fn finish<P: PixelStrip>(self, strips: &mut Strips<P>) {
        strips.clear_all();
        log_info!("show mode ended");
    }
}
