//! Modal configuration sessions.
//!
//! A [`ConfigSession`] previews a brightness or color picked with the
//! potentiometer until the user confirms with CTRL or cancels with the
//! originating electrode. The session is stepped one sample at a time; the
//! [`Controller`](crate::Controller) drives it in a blocking loop, tests drive
//! it directly.
//!
//! Whatever the outcome, a finished session clears its strip and leaves every
//! feature drawn on that strip disabled. The user re-toggles afterwards.

use crate::Color;
use crate::colors;
use crate::log::log_info;
use crate::renderer::{PixelStrip, StripId, Strips};
use crate::state::ControllerState;
use crate::time::TimeInstant;
use crate::types::{TouchMask, touch};

/// What a session configures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionKind {
    /// Beacon strip brightness, entered by double-tapping the beacon.
    BeaconBrightness,
    /// Turn strip brightness, entered by double-tapping right turn.
    TurnBrightness,
    /// Head/tail strip brightness, entered by double-tapping the headlight.
    MainBrightness,
    /// Headlight color, entered with CTRL + head.
    HeadColor,
    /// Tail light color, entered with CTRL + tail.
    TailColor,
}

impl SessionKind {
    /// Strip previewed by this session.
    pub fn strip(&self) -> StripId {
        match self {
            SessionKind::BeaconBrightness => StripId::Beacon,
            SessionKind::TurnBrightness => StripId::Turn,
            SessionKind::MainBrightness | SessionKind::HeadColor | SessionKind::TailColor => {
                StripId::Main
            }
        }
    }

    /// Electrodes that cancel the session.
    pub fn cancel_mask(&self) -> TouchMask {
        match self {
            SessionKind::BeaconBrightness => touch::BEACON,
            SessionKind::TurnBrightness => touch::HAZARD,
            SessionKind::MainBrightness | SessionKind::HeadColor => touch::HEAD,
            SessionKind::TailColor => touch::TAIL,
        }
    }

    fn is_cancel(&self, snapshot: TouchMask) -> bool {
        match self {
            // Either turn electrode cancels.
            SessionKind::TurnBrightness => snapshot & touch::HAZARD != 0,
            _ => snapshot == self.cancel_mask(),
        }
    }
}

/// Progress of a session after one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionStatus {
    Active,
    /// The last sample was committed to the presets.
    Confirmed,
    /// The presets are unchanged.
    Cancelled,
}

/// A sampled, not yet committed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    Brightness(u8),
    Color(Color),
}

/// One configuration session.
#[derive(Debug, Clone, Copy)]
pub struct ConfigSession {
    kind: SessionKind,
    candidate: Option<Candidate>,
    status: SessionStatus,
}

impl ConfigSession {
    /// Starts a session and draws its initial preview.
    pub fn begin<I, P>(
        kind: SessionKind,
        state: &ControllerState<I>,
        strips: &mut Strips<P>,
    ) -> Self
    where
        I: TimeInstant,
        P: PixelStrip,
    {
        log_info!("config session {} started", kind);
        if kind == SessionKind::MainBrightness {
            strips.head(true, state.presets.head_color);
            strips.tail(true, state.presets.tail_color);
        }

        Self {
            kind,
            candidate: None,
            status: SessionStatus::Active,
        }
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Value sampled by the most recent step.
    pub fn candidate(&self) -> Option<Candidate> {
        self.candidate
    }

    /// Electrodes to wait out once the session has finished.
    pub fn release_mask(&self) -> TouchMask {
        match self.status {
            SessionStatus::Active => 0,
            SessionStatus::Confirmed => touch::CTRL,
            SessionStatus::Cancelled => self.kind.cancel_mask(),
        }
    }

    /// Samples `raw`, previews it, then checks `snapshot` for confirm or cancel.
    ///
    /// Steps after the session has finished are no-ops.
    pub fn step<I, P>(
        &mut self,
        snapshot: TouchMask,
        raw: i32,
        state: &mut ControllerState<I>,
        strips: &mut Strips<P>,
    ) -> SessionStatus
    where
        I: TimeInstant,
        P: PixelStrip,
    {
        if self.status != SessionStatus::Active {
            return self.status;
        }

        let candidate = self.preview(raw, state, strips);
        self.candidate = Some(candidate);

        if snapshot == touch::CTRL {
            self.commit(candidate, state);
            self.finish(SessionStatus::Confirmed, state, strips);
        } else if self.kind.is_cancel(snapshot) {
            self.revert(state, strips);
            self.finish(SessionStatus::Cancelled, state, strips);
        }

        self.status
    }

    fn preview<I, P>(
        &self,
        raw: i32,
        state: &ControllerState<I>,
        strips: &mut Strips<P>,
    ) -> Candidate
    where
        I: TimeInstant,
        P: PixelStrip,
    {
        let presets = &state.presets;
        match self.kind {
            SessionKind::BeaconBrightness => {
                let level = colors::brightness_from_raw(raw);
                strips.set_brightness(StripId::Beacon, level);
                strips.beacon(true, presets.beacon_a, presets.beacon_b);
                Candidate::Brightness(level)
            }
            SessionKind::TurnBrightness => {
                let level = colors::brightness_from_raw(raw);
                strips.set_brightness(StripId::Turn, level);
                strips.hazard(true, presets.turn_color);
                Candidate::Brightness(level)
            }
            SessionKind::MainBrightness => {
                let level = colors::brightness_from_raw(raw);
                strips.set_brightness(StripId::Main, level);
                strips.head(true, presets.head_color);
                strips.tail(true, presets.tail_color);
                Candidate::Brightness(level)
            }
            SessionKind::HeadColor => {
                let color = colors::white_shade(raw);
                strips.head(true, color);
                Candidate::Color(color)
            }
            SessionKind::TailColor => {
                let color = colors::red_shade(raw);
                strips.tail(true, color);
                Candidate::Color(color)
            }
        }
    }

    fn commit<I: TimeInstant>(&self, candidate: Candidate, state: &mut ControllerState<I>) {
        let presets = &mut state.presets;
        match (self.kind, candidate) {
            (SessionKind::BeaconBrightness, Candidate::Brightness(level)) => {
                presets.beacon_brightness = level;
            }
            (SessionKind::TurnBrightness, Candidate::Brightness(level)) => {
                presets.turn_brightness = level;
            }
            (SessionKind::MainBrightness, Candidate::Brightness(level)) => {
                presets.main_brightness = level;
            }
            (SessionKind::HeadColor, Candidate::Color(color)) => presets.head_color = color,
            (SessionKind::TailColor, Candidate::Color(color)) => presets.tail_color = color,
            _ => {}
        }
    }

    /// Restores the committed brightness; color sessions have nothing to undo.
    fn revert<I, P>(&self, state: &ControllerState<I>, strips: &mut Strips<P>)
    where
        I: TimeInstant,
        P: PixelStrip,
    {
        let presets = &state.presets;
        match self.kind {
            SessionKind::BeaconBrightness => {
                strips.set_brightness(StripId::Beacon, presets.beacon_brightness);
            }
            SessionKind::TurnBrightness => {
                strips.set_brightness(StripId::Turn, presets.turn_brightness);
            }
            SessionKind::MainBrightness => {
                strips.set_brightness(StripId::Main, presets.main_brightness);
            }
            SessionKind::HeadColor | SessionKind::TailColor => {}
        }
    }

    fn finish<I, P>(
        &mut self,
        status: SessionStatus,
        state: &mut ControllerState<I>,
        strips: &mut Strips<P>,
    ) where
        I: TimeInstant,
        P: PixelStrip,
    {
        let strip = self.kind.strip();
        strips.clear(strip);
        match strip {
            StripId::Beacon => state.flags.beacon = false,
            StripId::Turn => state.flags.clear_turn(),
            StripId::Main => state.flags.clear_main(),
        }
        self.status = status;
        log_info!("config session {} ended: {}", self.kind, status);
    }
}
