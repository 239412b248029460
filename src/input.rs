//! Touch and analog input abstractions.

use crate::time::{TimeInstant, TimeSource, millis};
use crate::types::TouchMask;

/// Trait for abstracting the capacitive touch controller.
pub trait TouchSensor {
    /// Error reported when the sensor cannot be brought up.
    type Error;

    /// Initializes the sensor. Called once during controller startup.
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Returns the bitmask of electrodes touched right now. No debouncing.
    fn touched(&mut self) -> TouchMask;
}

/// Trait for abstracting the potentiometer ADC channel.
pub trait AnalogInput {
    /// Returns the raw sample. Values outside `0..=4095` are clamped by the mappers.
    fn read(&mut self) -> i32;
}

/// Outcome of [`wait_release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Release {
    /// No bit of the mask is touched any more.
    Released,
    /// The poll limit ran out while the mask was still touched.
    TimedOut,
}

/// Blocks until no electrode of `mask` is touched.
///
/// Polls every `poll_ms`. With `limit` set, gives up after that many polls.
pub fn wait_release<S, I, T>(
    sensor: &mut S,
    time_source: &T,
    mask: TouchMask,
    poll_ms: u64,
    limit: Option<u32>,
) -> Release
where
    S: TouchSensor,
    I: TimeInstant,
    T: TimeSource<I>,
{
    let mut polls: u32 = 0;
    while sensor.touched() & mask != 0 {
        if limit.is_some_and(|limit| polls >= limit) {
            return Release::TimedOut;
        }
        time_source.delay(millis::<I>(poll_ms));
        polls += 1;
    }
    Release::Released
}
