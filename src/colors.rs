//! Potentiometer to brightness / color mapping, plus the fixed palette.
//!
//! All mappers clamp the raw sample to `0..=ANALOG_MAX` first and then scale it
//! with integer arithmetic, so the same sample always yields the same value.

use crate::Color;

/// Largest value the analog input produces.
pub const ANALOG_MAX: i32 = 4095;

pub const HEAD_WHITE: Color = Color::new(230, 240, 255);
pub const TAIL_RED: Color = Color::new(255, 0, 0);
pub const TURN_AMBER: Color = Color::new(255, 165, 0);
pub const BEACON_RED: Color = Color::new(255, 0, 0);
pub const BEACON_BLUE: Color = Color::new(0, 0, 255);
/// Alternate beacon color A selected by the CTRL + beacon swap.
pub const BEACON_WHITE: Color = Color::new(255, 255, 255);

pub const SHOW_BEACON_A: Color = Color::new(38, 196, 236);
pub const SHOW_BEACON_B: Color = Color::new(20, 148, 20);
pub const SHOW_TURN: Color = Color::new(187, 210, 225);
pub const SHOW_MAIN: Color = Color::new(255, 0, 127);

/// Integer-proportional map of a clamped sample onto `0..=out_max`.
#[inline]
fn scale(raw: i32, out_max: u32) -> u32 {
    let raw = raw.clamp(0, ANALOG_MAX) as u32;
    raw * out_max / ANALOG_MAX as u32
}

/// Maps a raw sample onto the full 8-bit brightness range.
#[inline]
pub fn brightness_from_raw(raw: i32) -> u8 {
    scale(raw, 255) as u8
}

/// Headlight ramp, from bluish-white down to a dimmer warm white.
pub fn white_shade(raw: i32) -> Color {
    let pos = scale(raw, 120) as u8;
    Color::new(230 - pos, 240 - pos, 255 - pos / 3)
}

/// Tail light ramp, from pure red towards magenta.
pub fn red_shade(raw: i32) -> Color {
    let pos = scale(raw, 100) as u8;
    Color::new(255 - pos / 3, pos / 8, pos)
}

/// Turn signal ramp, from amber towards orange-red.
pub fn amber_shade(raw: i32) -> Color {
    let pos = scale(raw, 120) as u8;
    Color::new(255 - pos / 5, 165 - pos / 2, 0)
}
