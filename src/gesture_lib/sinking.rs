// src/gesture_lib/sinking.rs

use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SinkStep {
    Moving(Vec3),
    Finished(Vec3),
}

/// Timed downward interpolation, advanced once per host tick. It cannot be
/// cancelled; it ends when `elapsed` reaches `duration`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SinkAnimation {
    start: Vec3,
    end: Vec3,
    elapsed: f32,
    duration: f32,
}

impl SinkAnimation {
    pub fn new(start: Vec3, depth: f32, duration: f32) -> Self {
        Self {
            start,
            end: start - Vec3::new(0.0, depth, 0.0),
            elapsed: 0.0,
            duration,
        }
    }

    pub fn start(&self) -> Vec3 {
        self.start
    }

    pub fn end(&self) -> Vec3 {
        self.end
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn position(&self) -> Vec3 {
        self.start.lerp(self.end, self.progress())
    }

    pub fn advance(&mut self, dt: f32) -> SinkStep {
        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.duration {
            SinkStep::Finished(self.end)
        } else {
            SinkStep::Moving(self.position())
        }
    }
}
