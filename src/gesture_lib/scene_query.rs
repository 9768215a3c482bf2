// src/gesture_lib/scene_query.rs

use glam::{Quat, Vec2, Vec3};

/// Where a screen point landed on detected geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfacePose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl SurfacePose {
    pub fn at(position: Vec3) -> Self {
        Self { position, rotation: Quat::IDENTITY }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectTransform {
    pub position: Vec3,
    pub scale: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewpoint {
    pub position: Vec3,
    pub forward: Vec3,
}

/// Read-only queries the host engine answers for the interpreter.
///
/// Every query reports a miss as `None`; none of them may fail.
pub trait SceneQueries {
    fn surface_query(&self, screen_point: Vec2) -> Option<SurfacePose>;

    /// Hit distance of a ray, searched over an effectively unbounded range.
    fn forward_ray_query(&self, origin: Vec3, direction: Vec3) -> Option<f32>;

    fn viewpoint(&self) -> Viewpoint;

    /// Transform of the placed object, if the host currently has one.
    fn object_transform(&self) -> Option<ObjectTransform>;
}
