#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Controller`**: Reads one touch snapshot per cycle, dispatches it, and services the blink timers
//! - **`TapTimer`**: Turns exact-mask presses into single / double tap events
//! - **`BlinkTimer`**: Half-period phase timer for a blinking feature
//! - **`ConfigSession`**: Modal brightness / color picker driven by the potentiometer
//! - **`DemoSession`**: Self-contained show mode animation
//! - **`Strips`**: The beacon, turn and head/tail strips with their fixed pixel layouts
//! - **`TouchSensor`**, **`AnalogInput`**, **`PixelStrip`**: Traits to implement for your hardware
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! Colors are `Srgb<u8>`. Strip brightness is applied by the strip itself
//! through [`PixelStrip::set_brightness`].

pub use palette::Srgb;

mod log;

pub mod time;
pub mod types;
pub mod colors;
pub mod renderer;
pub mod input;
pub mod tap;
pub mod blink;
pub mod config;
pub mod state;
pub mod session;
pub mod demo;
pub mod controller;

pub use blink::BlinkTimer;
pub use config::{ControllerConfig, ControllerConfigBuilder, SwapTrigger};
pub use controller::{Controller, CycleReport, Outcome, TapGroup};
pub use demo::{DemoSession, DemoStatus};
pub use input::{AnalogInput, Release, TouchSensor, wait_release};
pub use renderer::{PixelStrip, StripId, Strips};
pub use session::{Candidate, ConfigSession, SessionKind, SessionStatus};
pub use state::{ControllerState, FeatureFlags, Presets};
pub use tap::{TapTimer, TapTiming};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use types::{ConfigError, ControllerError, Feature, RendererError, TapEvent, TouchMask, touch};

/// 8-bit sRGB color written to the strips.
pub type Color = Srgb<u8>;

pub const COLOR_OFF: Color = Color::new(0, 0, 0);
