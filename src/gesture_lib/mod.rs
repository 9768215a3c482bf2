// src/gesture_lib/mod.rs
pub mod touch;
pub mod config;
pub mod intents;
pub mod scene_query;
pub mod session;
pub mod sinking;
pub mod interpreter;
pub mod camera_rig;
pub mod panel;

pub use touch::{TouchFrame, TouchPhase, TouchSample, TouchTracker};
pub use config::{CameraConfig, ConfigError, GestureConfig};
pub use intents::{DistanceReading, FrameOutput, GestureIntent};
pub use scene_query::{ObjectTransform, SceneQueries, SurfacePose, Viewpoint};
pub use session::{GestureSessionState, SessionPhase};
pub use sinking::{SinkAnimation, SinkStep};
pub use interpreter::GestureInterpreter;
pub use camera_rig::CameraRig;
pub use panel::PanelTrigger;
