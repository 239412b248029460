//! Shared test infrastructure for touch-light-controller integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;

use heapless::{Deque, Vec};
use touch_light_controller::{
    AnalogInput, COLOR_OFF, Color, ControllerConfig, PixelStrip, StripId, Strips, TimeDuration,
    TimeInstant, TimeSource, TouchMask, TouchSensor,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(TestInstant)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source; `delay` advances the clock instead of sleeping
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
    delays: Cell<u32>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
            delays: Cell::new(0),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }

    pub fn now_millis(&self) -> u64 {
        self.current_time.get().0
    }

    /// Number of `delay` calls so far
    pub fn delay_count(&self) -> u32 {
        self.delays.get()
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }

    fn delay(&self, duration: TestDuration) {
        self.advance(duration.0);
        self.delays.set(self.delays.get() + 1);
    }
}

// ============================================================================
// Scripted Inputs
// ============================================================================

/// Touch sensor replaying a fixed list of snapshots, one per read.
/// Once the script runs out every read returns `idle`.
pub struct ScriptedSensor {
    script: Deque<TouchMask, 64>,
    idle: TouchMask,
    fail_begin: bool,
    reads: usize,
}

impl ScriptedSensor {
    pub fn new(script: &[TouchMask]) -> Self {
        let mut sensor = Self::idle();
        sensor.push(script);
        sensor
    }

    pub fn idle() -> Self {
        Self {
            script: Deque::new(),
            idle: 0,
            fail_begin: false,
            reads: 0,
        }
    }

    /// Sensor whose `begin` fails
    pub fn failing() -> Self {
        Self {
            fail_begin: true,
            ..Self::idle()
        }
    }

    /// Value returned after the script is exhausted
    pub fn with_idle(mut self, idle: TouchMask) -> Self {
        self.idle = idle;
        self
    }

    /// Append snapshots to the script
    pub fn push(&mut self, script: &[TouchMask]) {
        for &mask in script {
            self.script.push_back(mask).expect("script too long");
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    pub fn reads(&self) -> usize {
        self.reads
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct SensorMissing;

impl TouchSensor for ScriptedSensor {
    type Error = SensorMissing;

    fn begin(&mut self) -> Result<(), Self::Error> {
        if self.fail_begin {
            Err(SensorMissing)
        } else {
            Ok(())
        }
    }

    fn touched(&mut self) -> TouchMask {
        self.reads += 1;
        self.script.pop_front().unwrap_or(self.idle)
    }
}

/// Potentiometer returning a fixed value until changed
pub struct MockAnalog {
    value: i32,
}

impl MockAnalog {
    pub fn new(value: i32) -> Self {
        Self { value }
    }

    pub fn set(&mut self, value: i32) {
        self.value = value;
    }
}

impl AnalogInput for MockAnalog {
    fn read(&mut self) -> i32 {
        self.value
    }
}

// ============================================================================
// Mock Strip
// ============================================================================

/// Strip that keeps the committed frame and brightness for inspection
pub struct MockStrip {
    buffer: Vec<Color, 8>,
    committed: Vec<Color, 8>,
    brightness: u8,
    shows: usize,
}

impl MockStrip {
    pub fn new(len: usize) -> Self {
        let mut buffer = Vec::new();
        for _ in 0..len {
            buffer.push(COLOR_OFF).unwrap();
        }
        Self {
            committed: buffer.clone(),
            buffer,
            brightness: 255,
            shows: 0,
        }
    }

    /// Pixels as of the last `show`
    pub fn pixels(&self) -> &[Color] {
        &self.committed
    }

    /// Indices lit as of the last `show`
    pub fn lit(&self) -> std::vec::Vec<usize> {
        self.committed
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != COLOR_OFF)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn shows(&self) -> usize {
        self.shows
    }
}

impl PixelStrip for MockStrip {
    fn pixel_count(&self) -> usize {
        self.buffer.len()
    }

    fn set_pixel(&mut self, index: usize, color: Color) {
        self.buffer[index] = color;
    }

    fn show(&mut self) {
        self.committed = self.buffer.clone();
        self.shows += 1;
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub fn mock_strips() -> Strips<MockStrip> {
    Strips::new(MockStrip::new(8), MockStrip::new(4), MockStrip::new(8)).unwrap()
}

/// Default config with release waits capped so a stuck script cannot hang a test
pub fn test_config() -> ControllerConfig {
    ControllerConfig::builder()
        .release_poll_limit(100)
        .build()
        .unwrap()
}

pub fn lit(strips: &Strips<MockStrip>, id: StripId) -> std::vec::Vec<usize> {
    strips.strip(id).lit()
}
