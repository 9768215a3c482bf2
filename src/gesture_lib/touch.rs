// src/gesture_lib/touch.rs

use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    Began,
    Moved,
    Stationary,
    Ended,
    Canceled,
}

impl TouchPhase {
    pub fn is_finished(self) -> bool {
        matches!(self, TouchPhase::Ended | TouchPhase::Canceled)
    }
}

impl From<winit::event::TouchPhase> for TouchPhase {
    fn from(phase: winit::event::TouchPhase) -> Self {
        match phase {
            winit::event::TouchPhase::Started => TouchPhase::Began,
            winit::event::TouchPhase::Moved => TouchPhase::Moved,
            winit::event::TouchPhase::Ended => TouchPhase::Ended,
            winit::event::TouchPhase::Cancelled => TouchPhase::Canceled,
        }
    }
}

/// One active contact as seen during a single frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchSample {
    pub id: u64,
    pub position: Vec2,
    pub delta_position: Vec2,
    pub phase: TouchPhase,
}

impl TouchSample {
    pub fn new(id: u64, position: Vec2, delta_position: Vec2, phase: TouchPhase) -> Self {
        Self { id, position, delta_position, phase }
    }

    pub fn previous_position(&self) -> Vec2 {
        self.position - self.delta_position
    }
}

/// Immutable per-tick input snapshot handed to the interpreter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TouchFrame {
    pub touches: Vec<TouchSample>,
    pub timestamp: f32,
    pub delta_time: f32,
}

impl TouchFrame {
    pub fn new(touches: Vec<TouchSample>, timestamp: f32, delta_time: f32) -> Self {
        Self { touches, timestamp, delta_time }
    }

    pub fn touch_count(&self) -> usize {
        self.touches.len()
    }

    /// Distance between the first two touches this frame.
    pub fn separation(&self) -> Option<f32> {
        match self.touches.as_slice() {
            [a, b, ..] => Some(a.position.distance(b.position)),
            _ => None,
        }
    }

    /// Distance between the first two touches as of the previous frame.
    pub fn previous_separation(&self) -> Option<f32> {
        match self.touches.as_slice() {
            [a, b, ..] => Some(a.previous_position().distance(b.previous_position())),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct TrackedContact {
    id: u64,
    position: Vec2,
    reported_position: Vec2,
    began: bool,
    finished: Option<TouchPhase>,
}

/// Collects raw contact events between frames and turns them into `TouchFrame`s.
///
/// Contacts keep their arrival order. A contact that finishes is reported once
/// with its terminal phase and dropped on the following snapshot.
#[derive(Debug, Default)]
pub struct TouchTracker {
    contacts: Vec<TrackedContact>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_count(&self) -> usize {
        self.contacts.iter().filter(|c| c.finished.is_none()).count()
    }

    pub fn is_tracking(&self, id: u64) -> bool {
        self.contacts.iter().any(|c| c.id == id && c.finished.is_none())
    }

    pub fn begin(&mut self, id: u64, position: Vec2) {
        // A reused id replaces whatever was left of the previous contact.
        self.contacts.retain(|c| c.id != id);
        self.contacts.push(TrackedContact {
            id,
            position,
            reported_position: position,
            began: true,
            finished: None,
        });
    }

    pub fn move_to(&mut self, id: u64, position: Vec2) {
        if let Some(contact) = self.find_active(id) {
            contact.position = position;
        }
    }

    pub fn end(&mut self, id: u64, position: Vec2) {
        self.finish(id, position, TouchPhase::Ended);
    }

    pub fn cancel(&mut self, id: u64, position: Vec2) {
        self.finish(id, position, TouchPhase::Canceled);
    }

    /// Feeds a winit-style event in one call.
    pub fn record(&mut self, id: u64, position: Vec2, phase: TouchPhase) {
        match phase {
            TouchPhase::Began => self.begin(id, position),
            TouchPhase::Moved | TouchPhase::Stationary => self.move_to(id, position),
            TouchPhase::Ended => self.end(id, position),
            TouchPhase::Canceled => self.cancel(id, position),
        }
    }

    pub fn snapshot(&mut self, timestamp: f32, delta_time: f32) -> TouchFrame {
        let touches = self
            .contacts
            .iter()
            .map(|c| {
                let delta = if c.began { Vec2::ZERO } else { c.position - c.reported_position };
                let phase = match c.finished {
                    Some(terminal) => terminal,
                    None if c.began => TouchPhase::Began,
                    None if delta != Vec2::ZERO => TouchPhase::Moved,
                    None => TouchPhase::Stationary,
                };
                TouchSample::new(c.id, c.position, delta, phase)
            })
            .collect();

        self.contacts.retain(|c| c.finished.is_none());
        for contact in &mut self.contacts {
            contact.began = false;
            contact.reported_position = contact.position;
        }

        TouchFrame::new(touches, timestamp, delta_time)
    }

    fn find_active(&mut self, id: u64) -> Option<&mut TrackedContact> {
        self.contacts.iter_mut().find(|c| c.id == id && c.finished.is_none())
    }

    fn finish(&mut self, id: u64, position: Vec2, terminal: TouchPhase) {
        if let Some(contact) = self.find_active(id) {
            contact.position = position;
            contact.finished = Some(terminal);
        }
    }
}
