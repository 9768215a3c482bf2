// src/lib.rs

pub mod gesture_lib;

pub use gesture_lib::{
    CameraRig, FrameOutput, GestureConfig, GestureIntent, GestureInterpreter, SceneQueries,
    TouchFrame, TouchTracker,
};
