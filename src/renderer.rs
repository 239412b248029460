//! Pixel strip abstraction and the fixed per-feature pixel layouts.
//!
//! Provides the [`PixelStrip`] trait for the addressable strip hardware and
//! [`Strips`], which owns the three physical strips and knows which pixel
//! indices belong to which feature.

use crate::state::Presets;
use crate::types::RendererError;
use crate::{COLOR_OFF, Color};

/// Trait for abstracting one addressable LED strip.
///
/// Writes are buffered until [`show`](PixelStrip::show) is called. Handle any
/// hardware errors internally - these methods cannot fail.
pub trait PixelStrip {
    /// Number of pixels on the strip.
    fn pixel_count(&self) -> usize;

    /// Buffers a color for one pixel.
    fn set_pixel(&mut self, index: usize, color: Color);

    /// Pushes the buffered pixels to the hardware.
    fn show(&mut self);

    /// Sets the global brightness applied on the next `show`.
    fn set_brightness(&mut self, brightness: u8);
}

pub const BEACON_PIXELS: usize = 8;
pub const TURN_PIXELS: usize = 4;
pub const MAIN_PIXELS: usize = 8;

const TURN_RIGHT_IDX: [usize; 2] = [2, 3];
const TURN_LEFT_IDX: [usize; 2] = [0, 1];
const HEAD_IDX: [usize; 6] = [0, 2, 3, 4, 5, 7];
const TAIL_IDX: [usize; 2] = [1, 6];
const LOW_BEAM_IDX: [usize; 4] = [0, 2, 5, 7];

/// Identifies one of the three physical strips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StripId {
    /// Rotating beacon, 8 pixels.
    Beacon,
    /// Turn signals, 4 pixels.
    Turn,
    /// Head and tail lights, 8 pixels.
    Main,
}

/// The beacon, turn and head/tail strips.
pub struct Strips<P: PixelStrip> {
    beacon: P,
    turn: P,
    main: P,
}

impl<P: PixelStrip> Strips<P> {
    /// Bundles the three strips, checking each against its layout.
    ///
    /// # Errors
    /// * `PixelCountMismatch` - A strip is shorter than its layout requires
    pub fn new(beacon: P, turn: P, main: P) -> Result<Self, RendererError> {
        check_len("beacon", &beacon, BEACON_PIXELS)?;
        check_len("turn", &turn, TURN_PIXELS)?;
        check_len("main", &main, MAIN_PIXELS)?;
        Ok(Self { beacon, turn, main })
    }

    /// Returns the strip behind `id`.
    pub fn strip(&self, id: StripId) -> &P {
        match id {
            StripId::Beacon => &self.beacon,
            StripId::Turn => &self.turn,
            StripId::Main => &self.main,
        }
    }

    fn strip_mut(&mut self, id: StripId) -> &mut P {
        match id {
            StripId::Beacon => &mut self.beacon,
            StripId::Turn => &mut self.turn,
            StripId::Main => &mut self.main,
        }
    }

    /// Consumes the bundle, returning `(beacon, turn, main)`.
    pub fn into_inner(self) -> (P, P, P) {
        (self.beacon, self.turn, self.main)
    }

    /// Sets every pixel of one strip to off and commits.
    pub fn clear(&mut self, id: StripId) {
        let strip = self.strip_mut(id);
        for i in 0..strip.pixel_count() {
            strip.set_pixel(i, COLOR_OFF);
        }
        strip.show();
    }

    /// Clears all three strips.
    pub fn clear_all(&mut self) {
        self.clear(StripId::Beacon);
        self.clear(StripId::Turn);
        self.clear(StripId::Main);
    }

    pub fn set_brightness(&mut self, id: StripId, brightness: u8) {
        self.strip_mut(id).set_brightness(brightness);
    }

    /// Applies the committed brightness of every strip.
    pub fn apply_brightness(&mut self, presets: &Presets) {
        self.beacon.set_brightness(presets.beacon_brightness);
        self.turn.set_brightness(presets.turn_brightness);
        self.main.set_brightness(presets.main_brightness);
    }

    /// Draws the two interleaved beacon groups.
    ///
    /// Group A is pixels {0, 1, 6, 7}. A pixel shows `c1` when `phase` differs
    /// from its group membership, otherwise `c2`.
    pub fn beacon(&mut self, phase: bool, c1: Color, c2: Color) {
        for i in 0..BEACON_PIXELS {
            let group_a = i < 2 || i > 5;
            self.beacon
                .set_pixel(i, if phase ^ group_a { c1 } else { c2 });
        }
        self.beacon.show();
    }

    pub fn turn_right(&mut self, on: bool, color: Color) {
        fill(&mut self.turn, &TURN_RIGHT_IDX, on, color);
    }

    pub fn turn_left(&mut self, on: bool, color: Color) {
        fill(&mut self.turn, &TURN_LEFT_IDX, on, color);
    }

    /// Lights or darkens the whole turn strip.
    pub fn hazard(&mut self, on: bool, color: Color) {
        fill(&mut self.turn, &[0, 1, 2, 3], on, color);
    }

    pub fn head(&mut self, on: bool, color: Color) {
        fill(&mut self.main, &HEAD_IDX, on, color);
    }

    pub fn tail(&mut self, on: bool, color: Color) {
        fill(&mut self.main, &TAIL_IDX, on, color);
    }

    pub fn low_beam(&mut self, on: bool, color: Color) {
        fill(&mut self.main, &LOW_BEAM_IDX, on, color);
    }

    /// Writes single main-strip pixels without committing; see [`show_main`](Self::show_main).
    pub(crate) fn set_main_pixel(&mut self, index: usize, color: Color) {
        self.main.set_pixel(index, color);
    }

    pub(crate) fn show_main(&mut self) {
        self.main.show();
    }
}

fn fill<P: PixelStrip>(strip: &mut P, indices: &[usize], on: bool, color: Color) {
    let color = if on { color } else { COLOR_OFF };
    for &i in indices {
        strip.set_pixel(i, color);
    }
    strip.show();
}

fn check_len<P: PixelStrip>(
    strip: &'static str,
    pixels: &P,
    expected: usize,
) -> Result<(), RendererError> {
    let actual = pixels.pixel_count();
    if actual < expected {
        return Err(RendererError::PixelCountMismatch {
            strip,
            expected,
            actual,
        });
    }
    Ok(())
}
