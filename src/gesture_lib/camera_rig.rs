// src/gesture_lib/camera_rig.rs

use glam::{EulerRot, Quat, Vec3};

use crate::gesture_lib::config::{CameraConfig, ConfigError};
use crate::gesture_lib::intents::GestureIntent;

/// Host-side camera state driven by pan and zoom intents.
#[derive(Debug, Clone)]
pub struct CameraRig {
    config: CameraConfig,
    orientation: Quat,
    ortho_size: f32,
}

impl CameraRig {
    pub fn new(config: CameraConfig, orientation: Quat) -> Result<Self, ConfigError> {
        config.validate()?;
        let ortho_size = config
            .initial_ortho_size
            .clamp(config.zoom_out_min, config.zoom_out_max);
        Ok(Self { config, orientation, ortho_size })
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    pub fn ortho_size(&self) -> f32 {
        self.ortho_size
    }

    /// Applies camera intents and returns whether any were consumed.
    pub fn apply(&mut self, intent: &GestureIntent) -> bool {
        match *intent {
            GestureIntent::CameraPanRequest { yaw_delta, pitch_delta } => {
                self.apply_pan(yaw_delta, pitch_delta);
                true
            }
            GestureIntent::CameraZoomRequest { delta } => {
                self.apply_zoom(delta);
                true
            }
            _ => false,
        }
    }

    /// Rotates about world Y then world X (degrees). Roll is read back and
    /// clamped on its own; the clamp does not feed into yaw or pitch.
    pub fn apply_pan(&mut self, yaw_deg: f32, pitch_deg: f32) {
        let max_roll = self.config.max_z_rotation_deg.to_radians();
        let (_, _, roll) = self.orientation.to_euler(EulerRot::YXZ);
        let clamped_roll = roll.clamp(-max_roll, max_roll);

        let rotated = Quat::from_rotation_x(pitch_deg.to_radians())
            * Quat::from_rotation_y(yaw_deg.to_radians())
            * self.orientation;

        let (yaw, pitch, _) = rotated.to_euler(EulerRot::YXZ);
        self.orientation = Quat::from_euler(EulerRot::YXZ, yaw, pitch, clamped_roll).normalize();
    }

    pub fn apply_zoom(&mut self, delta: f32) {
        self.ortho_size =
            (self.ortho_size - delta).clamp(self.config.zoom_out_min, self.config.zoom_out_max);
    }
}
