// src/gesture_lib/intents.rs

use std::fmt;

use glam::{Vec2, Vec3};

use crate::gesture_lib::scene_query::SurfacePose;

/// A change the host should apply after a frame has been interpreted.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureIntent {
    PlacementRequest { screen_position: Vec2, pose: SurfacePose },
    MoveRequest { screen_position: Vec2, pose: SurfacePose },
    ScaleRequest { new_scale: Vec3 },
    RemovalTriggerEvent,
    /// Sinking animation step; the host moves the object here.
    ObjectPositionUpdate { position: Vec3 },
    DespawnRequest,
    /// World-space rotation deltas in degrees.
    CameraPanRequest { yaw_delta: f32, pitch_delta: f32 },
    CameraZoomRequest { delta: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DistanceReading {
    Meters(f32),
    NotAvailable,
}

impl DistanceReading {
    pub fn meters(self) -> Option<f32> {
        match self {
            DistanceReading::Meters(m) => Some(m),
            DistanceReading::NotAvailable => None,
        }
    }
}

impl fmt::Display for DistanceReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceReading::Meters(m) => write!(f, "Distance: {:.2} m", m),
            DistanceReading::NotAvailable => write!(f, "Distance: N/A"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrameOutput {
    pub intents: Vec<GestureIntent>,
    pub distance: DistanceReading,
}

impl Default for FrameOutput {
    fn default() -> Self {
        Self { intents: Vec::new(), distance: DistanceReading::NotAvailable }
    }
}

impl FrameOutput {
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    pub fn contains(&self, predicate: impl Fn(&GestureIntent) -> bool) -> bool {
        self.intents.iter().any(predicate)
    }

    pub fn scale_request(&self) -> Option<Vec3> {
        self.intents.iter().find_map(|intent| match intent {
            GestureIntent::ScaleRequest { new_scale } => Some(*new_scale),
            _ => None,
        })
    }

    pub fn zoom_request(&self) -> Option<f32> {
        self.intents.iter().find_map(|intent| match intent {
            GestureIntent::CameraZoomRequest { delta } => Some(*delta),
            _ => None,
        })
    }
}
