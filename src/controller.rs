//! Touch dispatcher and blink scheduler.
//!
//! Provides [`Controller`], which owns the touch sensor, the potentiometer and
//! the three strips. Each [`cycle`](Controller::cycle) reads one snapshot,
//! walks the input groups in a fixed priority order, and then services the
//! blink timers. Waiting for a release, a configuration session and show mode
//! all block the cycle until the user lets go or exits.

use heapless::Vec;

use crate::config::{ControllerConfig, SwapTrigger};
use crate::demo::{DemoSession, DemoStatus};
use crate::input::{AnalogInput, Release, TouchSensor, wait_release};
use crate::log::{log_debug, log_info, log_warn};
use crate::renderer::{PixelStrip, StripId, Strips};
use crate::session::{ConfigSession, SessionKind, SessionStatus};
use crate::state::ControllerState;
use crate::tap::TapTimer;
use crate::time::{TimeInstant, TimeSource, millis};
use crate::types::{ControllerError, Feature, TapEvent, TouchMask, touch};

/// Input groups classified as single or double taps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TapGroup {
    Beacon,
    RightTurn,
    LeftTurn,
    Head,
}

impl TapGroup {
    /// Exact snapshot that counts as a press of this group.
    pub fn mask(&self) -> TouchMask {
        match self {
            TapGroup::Beacon => touch::BEACON,
            TapGroup::RightTurn => touch::TURN_RIGHT,
            TapGroup::LeftTurn => touch::TURN_LEFT,
            TapGroup::Head => touch::HEAD,
        }
    }

    /// Session a double tap opens. Left turn shares the turn brightness
    /// session with right turn and opens nothing itself.
    pub fn session(&self) -> Option<SessionKind> {
        match self {
            TapGroup::Beacon => Some(SessionKind::BeaconBrightness),
            TapGroup::RightTurn => Some(SessionKind::TurnBrightness),
            TapGroup::LeftTurn => None,
            TapGroup::Head => Some(SessionKind::MainBrightness),
        }
    }
}

/// Something that happened during one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// A feature was toggled by a tap or combination.
    Toggled { feature: Feature, enabled: bool },
    /// Beacon color A was swapped.
    BeaconColorSwapped,
    /// A configuration session ran to completion.
    Session {
        kind: SessionKind,
        status: SessionStatus,
    },
    /// Show mode ran and was exited.
    Demo,
    /// A blink timer flipped a feature's phase.
    Blinked { feature: Feature, phase: bool },
}

/// Outcomes of one cycle, in the order they happened.
pub type CycleReport = Vec<Outcome, 16>;

/// The touch-driven light controller.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `S` - Touch sensor implementation type
/// * `A` - Analog input implementation type
/// * `P` - Pixel strip implementation type (same for all three strips)
pub struct Controller<'t, I, T, S, A, P>
where
    I: TimeInstant,
    T: TimeSource<I>,
    S: TouchSensor,
    A: AnalogInput,
    P: PixelStrip,
{
    sensor: S,
    analog: A,
    strips: Strips<P>,
    time_source: &'t T,
    config: ControllerConfig,
    state: ControllerState<I>,
    last_snapshot: TouchMask,
}

impl<'t, I, T, S, A, P> Controller<'t, I, T, S, A, P>
where
    I: TimeInstant,
    T: TimeSource<I>,
    S: TouchSensor,
    A: AnalogInput,
    P: PixelStrip,
{
    /// Runs the startup sequence and returns a ready controller.
    ///
    /// Applies the default brightness, clears every strip, then brings up the
    /// touch sensor.
    ///
    /// # Errors
    /// * `Config` - The configuration failed validation
    /// * `SensorInit` - The touch sensor did not start. The firmware should halt.
    pub fn new(
        mut sensor: S,
        analog: A,
        mut strips: Strips<P>,
        time_source: &'t T,
        config: ControllerConfig,
    ) -> Result<Self, ControllerError> {
        config.validate()?;
        let state = ControllerState::new(&config);

        strips.apply_brightness(&state.presets);
        strips.clear_all();

        if sensor.begin().is_err() {
            log_warn!("touch sensor not found, check wiring");
            return Err(ControllerError::SensorInit);
        }

        Ok(Self {
            sensor,
            analog,
            strips,
            time_source,
            config,
            state,
            last_snapshot: 0,
        })
    }

    /// Flags, presets and timers.
    pub fn state(&self) -> &ControllerState<I> {
        &self.state
    }

    /// Mutable access to the state, e.g. to restore presets saved elsewhere.
    pub fn state_mut(&mut self) -> &mut ControllerState<I> {
        &mut self.state
    }

    /// The three strips.
    pub fn strips(&self) -> &Strips<P> {
        &self.strips
    }

    /// The validated configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Mutable access to the touch sensor.
    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    /// Mutable access to the potentiometer input.
    pub fn analog_mut(&mut self) -> &mut A {
        &mut self.analog
    }

    /// Runs cycles forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.cycle();
        }
    }

    /// One pass: dispatch a fresh snapshot, then service the blink timers.
    pub fn cycle(&mut self) -> CycleReport {
        let mut report = CycleReport::new();
        let snapshot = self.sensor.touched();
        if snapshot != self.last_snapshot {
            if snapshot != 0 {
                log_debug!("touch {=u16:#x} detected", snapshot);
            }
            self.last_snapshot = snapshot;
        }

        self.dispatch(snapshot, &mut report);
        self.service_blink(&mut report);
        report
    }

    /// Evaluates every input group against `snapshot` in priority order.
    fn dispatch(&mut self, snapshot: TouchMask, report: &mut CycleReport) {
        self.handle_tap(TapGroup::Beacon, snapshot, report);

        if self.swap_triggered(snapshot) {
            self.wait_release(touch::BEACON_SWAP);
            self.state.presets.swap_beacon_color();
            push(report, Outcome::BeaconColorSwapped);
        }

        self.handle_tap(TapGroup::RightTurn, snapshot, report);
        self.handle_tap(TapGroup::LeftTurn, snapshot, report);

        if snapshot == touch::HAZARD {
            let now = self.time_source.now();
            let enabled = !self.state.flags.hazard;
            self.state.flags.set_hazard(enabled);
            self.state.blink.hazard.reset(now);
            if enabled {
                self.strips.hazard(true, self.state.presets.turn_color);
            } else {
                self.strips.clear(StripId::Turn);
            }
            push(report, toggled(Feature::Hazard, enabled));
            self.wait_release(touch::HAZARD);
        }

        self.handle_tap(TapGroup::Head, snapshot, report);

        if snapshot == touch::TAIL {
            let enabled = !self.state.flags.tail;
            self.state.flags.tail = enabled;
            self.strips.tail(enabled, self.state.presets.tail_color);
            push(report, toggled(Feature::Tail, enabled));
            self.wait_release(touch::TAIL);
        }

        if snapshot == touch::LOW_BEAM {
            let enabled = !self.state.flags.low_beam;
            self.state.flags.low_beam = enabled;
            self.strips.low_beam(enabled, self.state.presets.head_color);
            push(report, toggled(Feature::LowBeam, enabled));
            self.wait_release(touch::LOW_BEAM);
        }

        // Both fingers must be off before the first step; a partial release
        // would otherwise read as CTRL (confirm) or the origin (cancel).
        if snapshot == touch::HEAD_COLOR {
            self.wait_release(touch::HEAD_COLOR);
            self.run_session(SessionKind::HeadColor, report);
        }

        if snapshot == touch::TAIL_COLOR {
            self.wait_release(touch::TAIL_COLOR);
            self.run_session(SessionKind::TailColor, report);
        }

        if snapshot == touch::SHOW {
            self.wait_release(touch::SHOW);
            self.run_demo();
            push(report, Outcome::Demo);
        }
    }

    fn swap_triggered(&self, snapshot: TouchMask) -> bool {
        match self.config.swap_trigger {
            SwapTrigger::ExactCombination => snapshot == touch::BEACON_SWAP,
            SwapTrigger::AnyTouch => snapshot != 0,
        }
    }

    fn tap_timer(&mut self, group: TapGroup) -> &mut TapTimer<I> {
        let taps = &mut self.state.taps;
        match group {
            TapGroup::Beacon => &mut taps.beacon,
            TapGroup::RightTurn => &mut taps.right_turn,
            TapGroup::LeftTurn => &mut taps.left_turn,
            TapGroup::Head => &mut taps.head,
        }
    }

    /// Classifies `snapshot` for `group` and runs the toggle or configure action.
    ///
    /// The toggle fires on the first tap. A double tap waits for the release
    /// and then opens the group's session, if it has one.
    fn handle_tap(&mut self, group: TapGroup, snapshot: TouchMask, report: &mut CycleReport) {
        let now = self.time_source.now();
        let timing = self.config.tap;
        let event = self.tap_timer(group).classify(snapshot, group.mask(), now, timing);

        match event {
            TapEvent::Single => {
                self.on_toggle(group, now, report);
                self.wait_release(group.mask());
            }
            TapEvent::Double => {
                self.wait_release(group.mask());
                self.on_configure(group, report);
            }
            TapEvent::None => {
                if snapshot == group.mask() {
                    self.wait_release(group.mask());
                }
            }
        }
    }

    fn on_toggle(&mut self, group: TapGroup, now: I, report: &mut CycleReport) {
        let flags = &mut self.state.flags;
        let presets = self.state.presets;
        let blink = &mut self.state.blink;

        let (feature, enabled) = match group {
            TapGroup::Beacon => {
                flags.beacon = !flags.beacon;
                blink.beacon.reset(now);
                if flags.beacon {
                    self.strips.beacon(true, presets.beacon_a, presets.beacon_b);
                } else {
                    self.strips.clear(StripId::Beacon);
                }
                (Feature::Beacon, flags.beacon)
            }
            TapGroup::RightTurn => {
                flags.set_right_turn(!flags.right_turn);
                blink.right_turn.reset(now);
                self.strips.clear(StripId::Turn);
                if flags.right_turn {
                    self.strips.turn_right(true, presets.turn_color);
                }
                (Feature::RightTurn, flags.right_turn)
            }
            TapGroup::LeftTurn => {
                flags.set_left_turn(!flags.left_turn);
                blink.left_turn.reset(now);
                self.strips.clear(StripId::Turn);
                if flags.left_turn {
                    self.strips.turn_left(true, presets.turn_color);
                }
                (Feature::LeftTurn, flags.left_turn)
            }
            TapGroup::Head => {
                flags.low_beam = false;
                flags.head = !flags.head;
                self.strips.head(flags.head, presets.head_color);
                (Feature::Head, flags.head)
            }
        };

        log_info!("{} toggled {}", feature, enabled);
        push(report, toggled(feature, enabled));
    }

    fn on_configure(&mut self, group: TapGroup, report: &mut CycleReport) {
        if let Some(kind) = group.session() {
            self.run_session(kind, report);
        }
    }

    /// Blocks in a configuration session until it is confirmed or cancelled.
    fn run_session(&mut self, kind: SessionKind, report: &mut CycleReport) -> SessionStatus {
        let mut session = ConfigSession::begin(kind, &self.state, &mut self.strips);
        loop {
            let raw = self.analog.read();
            let snapshot = self.sensor.touched();
            let status = session.step(snapshot, raw, &mut self.state, &mut self.strips);
            if status != SessionStatus::Active {
                self.wait_release(session.release_mask());
                push(report, Outcome::Session { kind, status });
                return status;
            }
            self.time_source
                .delay(millis::<I>(self.config.session_poll_ms));
        }
    }

    /// Blocks in show mode until the show electrode is pressed again.
    fn run_demo(&mut self) {
        let mut demo = DemoSession::begin(
            self.time_source.now(),
            self.config.demo_period_ms,
            &self.state.presets,
            &mut self.strips,
        );
        loop {
            let now = self.time_source.now();
            let snapshot = self.sensor.touched();
            if demo.step(now, snapshot, &mut self.strips) == DemoStatus::Finished {
                self.wait_release(touch::SHOW);
                demo.finish(&mut self.strips);
                return;
            }
            self.time_source
                .delay(millis::<I>(self.config.demo_frame_ms));
        }
    }

    /// Flips the phase of every enabled blinking feature that is due.
    ///
    /// Right turn blinks only while left turn is off and vice versa. Hazard
    /// blinks independently of both.
    fn service_blink(&mut self, report: &mut CycleReport) {
        let now = self.time_source.now();
        let flags = self.state.flags;
        let presets = self.state.presets;
        let blink = &mut self.state.blink;

        if flags.beacon {
            if let Some(phase) = blink.beacon.poll(now) {
                self.strips.beacon(phase, presets.beacon_a, presets.beacon_b);
                push(report, blinked(Feature::Beacon, phase));
            }
        }

        if flags.right_turn && !flags.left_turn {
            if let Some(phase) = blink.right_turn.poll(now) {
                self.strips.turn_right(phase, presets.turn_color);
                push(report, blinked(Feature::RightTurn, phase));
            }
        }

        if flags.left_turn && !flags.right_turn {
            if let Some(phase) = blink.left_turn.poll(now) {
                self.strips.turn_left(phase, presets.turn_color);
                push(report, blinked(Feature::LeftTurn, phase));
            }
        }

        if flags.hazard {
            if let Some(phase) = blink.hazard.poll(now) {
                self.strips.hazard(phase, presets.turn_color);
                push(report, blinked(Feature::Hazard, phase));
            }
        }
    }

    fn wait_release(&mut self, mask: TouchMask) {
        let release = wait_release(
            &mut self.sensor,
            self.time_source,
            mask,
            self.config.release_poll_ms,
            self.config.release_poll_limit,
        );
        if release == Release::TimedOut {
            log_warn!("gave up waiting for release of {=u16:#x}", mask);
        }
    }
}

fn toggled(feature: Feature, enabled: bool) -> Outcome {
    Outcome::Toggled { feature, enabled }
}

fn blinked(feature: Feature, phase: bool) -> Outcome {
    Outcome::Blinked { feature, phase }
}

/// Appends `outcome`. A full report keeps its earlier outcomes.
fn push(report: &mut CycleReport, outcome: Outcome) {
    if report.push(outcome).is_err() {
        log_warn!("cycle report full, dropped {}", outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_report_keeps_earliest_outcomes() {
        let mut report = CycleReport::new();
        for _ in 0..report.capacity() {
            push(&mut report, Outcome::Demo);
        }

        push(&mut report, Outcome::BeaconColorSwapped);

        assert_eq!(report.len(), report.capacity());
        assert!(report.iter().all(|o| *o == Outcome::Demo));
    }
}
