// src/gesture_lib/session.rs

use glam::Vec3;

use crate::gesture_lib::sinking::SinkAnimation;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    Idle,
    Placed,
    Pinching,
    Sinking,
}

/// Outcome of registering one tap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    Counted(u32),
    SequenceComplete,
}

/// Per-session gesture state. Only `GestureInterpreter::update` mutates it.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureSessionState {
    pub(crate) object_placed: bool,
    pub(crate) is_pinching: bool,
    pub(crate) pinch_baseline_distance: f32,
    pub(crate) pinch_baseline_scale: Vec3,
    pub(crate) tap_count: u32,
    pub(crate) last_tap_timestamp: Option<f32>,
    pub(crate) sinking: Option<SinkAnimation>,
}

impl Default for GestureSessionState {
    fn default() -> Self {
        Self {
            object_placed: false,
            is_pinching: false,
            pinch_baseline_distance: 0.0,
            pinch_baseline_scale: Vec3::ONE,
            tap_count: 0,
            last_tap_timestamp: None,
            sinking: None,
        }
    }
}

impl GestureSessionState {
    pub fn object_placed(&self) -> bool {
        self.object_placed
    }

    pub fn is_pinching(&self) -> bool {
        self.is_pinching
    }

    pub fn pinch_baseline(&self) -> Option<(f32, Vec3)> {
        self.is_pinching
            .then_some((self.pinch_baseline_distance, self.pinch_baseline_scale))
    }

    pub fn tap_count(&self) -> u32 {
        self.tap_count
    }

    pub fn last_tap_timestamp(&self) -> Option<f32> {
        self.last_tap_timestamp
    }

    pub fn is_transitioning(&self) -> bool {
        self.sinking.is_some()
    }

    pub fn sinking(&self) -> Option<&SinkAnimation> {
        self.sinking.as_ref()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.sinking.is_some() {
            SessionPhase::Sinking
        } else if self.object_placed && self.is_pinching {
            SessionPhase::Pinching
        } else if self.object_placed {
            SessionPhase::Placed
        } else {
            SessionPhase::Idle
        }
    }

    pub(crate) fn begin_pinch(&mut self, baseline_distance: f32, baseline_scale: Vec3) {
        self.is_pinching = true;
        self.pinch_baseline_distance = baseline_distance;
        self.pinch_baseline_scale = baseline_scale;
    }

    pub(crate) fn end_pinch(&mut self) {
        self.is_pinching = false;
    }

    /// A gap not strictly below `gap_secs` restarts the count at 1.
    pub(crate) fn register_tap(&mut self, timestamp: f32, gap_secs: f32, target: u32) -> TapOutcome {
        let chained = self
            .last_tap_timestamp
            .map_or(false, |last| timestamp - last < gap_secs);
        self.tap_count = if chained { self.tap_count + 1 } else { 1 };
        self.last_tap_timestamp = Some(timestamp);

        if self.tap_count >= target {
            self.tap_count = 0;
            TapOutcome::SequenceComplete
        } else {
            TapOutcome::Counted(self.tap_count)
        }
    }

    pub(crate) fn finish_removal(&mut self) {
        self.sinking = None;
        self.object_placed = false;
        self.is_pinching = false;
    }
}
