// src/gesture_lib/config.rs

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} bounds are inverted: min {min} > max {max}")]
    InvertedBounds { name: &'static str, min: f32, max: f32 },
    #[error("removal tap count must be at least 1")]
    ZeroTapCount,
}

fn require_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    // `!(value > 0.0)` also rejects NaN.
    if !(value > 0.0) {
        return Err(ConfigError::NotPositive { name, value });
    }
    Ok(())
}

fn require_ordered(name: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    require_positive(name, min)?;
    if min > max {
        return Err(ConfigError::InvertedBounds { name, min, max });
    }
    Ok(())
}

/// Tunables for the gesture interpreter.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Taps closer together than this (seconds) extend the current tap sequence.
    pub tap_gap_secs: f32,
    /// Number of chained taps that removes the placed object.
    pub removal_tap_count: u32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub sink_duration_secs: f32,
    /// How far the object travels down while sinking, in world units.
    pub sink_depth: f32,
    /// Degrees of camera rotation per pixel per second.
    pub rotation_speed: f32,
    pub zoom_sensitivity: f32,
}

impl GestureConfig {
    pub const DEFAULT_TAP_GAP_SECS: f32 = 0.5;
    pub const DEFAULT_REMOVAL_TAP_COUNT: u32 = 3;
    pub const DEFAULT_MIN_SCALE: f32 = 0.01;
    pub const DEFAULT_MAX_SCALE: f32 = 1.0;
    pub const DEFAULT_SINK_DURATION_SECS: f32 = 2.0;
    pub const DEFAULT_SINK_DEPTH: f32 = 0.5;
    pub const DEFAULT_ROTATION_SPEED: f32 = 2.0;
    pub const DEFAULT_ZOOM_SENSITIVITY: f32 = 0.01;

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("tap_gap_secs", self.tap_gap_secs)?;
        if self.removal_tap_count == 0 {
            return Err(ConfigError::ZeroTapCount);
        }
        require_ordered("scale", self.min_scale, self.max_scale)?;
        require_positive("sink_duration_secs", self.sink_duration_secs)?;
        require_positive("sink_depth", self.sink_depth)?;
        require_positive("rotation_speed", self.rotation_speed)?;
        require_positive("zoom_sensitivity", self.zoom_sensitivity)?;
        Ok(())
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_gap_secs: Self::DEFAULT_TAP_GAP_SECS,
            removal_tap_count: Self::DEFAULT_REMOVAL_TAP_COUNT,
            min_scale: Self::DEFAULT_MIN_SCALE,
            max_scale: Self::DEFAULT_MAX_SCALE,
            sink_duration_secs: Self::DEFAULT_SINK_DURATION_SECS,
            sink_depth: Self::DEFAULT_SINK_DEPTH,
            rotation_speed: Self::DEFAULT_ROTATION_SPEED,
            zoom_sensitivity: Self::DEFAULT_ZOOM_SENSITIVITY,
        }
    }
}

/// Limits applied by `CameraRig` when it consumes pan/zoom intents.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    pub zoom_out_min: f32,
    pub zoom_out_max: f32,
    pub max_z_rotation_deg: f32,
    pub initial_ortho_size: f32,
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_ordered("zoom", self.zoom_out_min, self.zoom_out_max)?;
        require_positive("max_z_rotation_deg", self.max_z_rotation_deg)?;
        require_positive("initial_ortho_size", self.initial_ortho_size)?;
        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            zoom_out_min: 1.0,
            zoom_out_max: 8.0,
            max_z_rotation_deg: 45.0,
            initial_ortho_size: 5.0,
        }
    }
}
