// src/demo_scene.rs

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use log::{debug, info};

use ar_gestures::gesture_lib::{GestureIntent, ObjectTransform, SceneQueries, SurfacePose, Viewpoint};

const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 2.0, 6.0);
const GROUND_HALF_EXTENT: f32 = 5.0;
const SPAWN_SCALE: f32 = 0.3;
const ZNEAR: f32 = 0.01;
const ZFAR: f32 = 100.0;

/// Pitch that points the demo camera at the origin.
pub fn initial_camera_orientation() -> Quat {
    let pitch = -(CAMERA_POSITION.y / CAMERA_POSITION.z).atan();
    Quat::from_euler(EulerRot::YXZ, 0.0, pitch, 0.0)
}

/// Stand-in for the host engine: a bounded ground plane at y = 0 seen through
/// an orthographic camera, holding at most one spawned object.
#[derive(Debug, Clone)]
pub struct DemoScene {
    camera_position: Vec3,
    orientation: Quat,
    ortho_size: f32,
    viewport: Vec2,
    object: Option<ObjectTransform>,
}

impl DemoScene {
    pub fn new(orientation: Quat, ortho_size: f32, viewport: Vec2) -> Self {
        Self {
            camera_position: CAMERA_POSITION,
            orientation,
            ortho_size,
            viewport,
            object: None,
        }
    }

    pub fn object(&self) -> Option<ObjectTransform> {
        self.object
    }

    pub fn set_camera(&mut self, orientation: Quat, ortho_size: f32) {
        self.orientation = orientation;
        self.ortho_size = ortho_size;
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport = Vec2::new(width, height);
        }
    }

    /// World units covered by one screen pixel.
    pub fn world_units_per_pixel(&self) -> f32 {
        2.0 * self.ortho_size / self.viewport.y
    }

    pub fn apply(&mut self, intent: &GestureIntent) {
        match intent {
            GestureIntent::PlacementRequest { pose, .. } => {
                info!("Spawning object at {:?}", pose.position);
                self.object = Some(ObjectTransform {
                    position: pose.position,
                    scale: Vec3::splat(SPAWN_SCALE),
                });
            }
            GestureIntent::MoveRequest { pose, .. } => {
                if let Some(object) = self.object.as_mut() {
                    object.position = pose.position;
                }
            }
            GestureIntent::ObjectPositionUpdate { position } => {
                if let Some(object) = self.object.as_mut() {
                    object.position = *position;
                }
            }
            GestureIntent::ScaleRequest { new_scale } => {
                if let Some(object) = self.object.as_mut() {
                    object.scale = *new_scale;
                }
            }
            GestureIntent::DespawnRequest => {
                info!("Destroying object");
                self.object = None;
            }
            GestureIntent::RemovalTriggerEvent => debug!("Removal triggered"),
            GestureIntent::CameraPanRequest { .. } | GestureIntent::CameraZoomRequest { .. } => {}
        }
    }

    fn view_proj(&self) -> Mat4 {
        let half_h = self.ortho_size;
        let half_w = half_h * self.viewport.x / self.viewport.y;
        let proj = Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, ZNEAR, ZFAR);
        let view = Mat4::from_rotation_translation(self.orientation, self.camera_position).inverse();
        proj * view
    }

    /// World-space ray through a screen pixel (origin on the near plane).
    pub fn screen_ray(&self, screen_point: Vec2) -> (Vec3, Vec3) {
        let ndc_x = 2.0 * screen_point.x / self.viewport.x - 1.0;
        let ndc_y = 1.0 - 2.0 * screen_point.y / self.viewport.y;
        let inv = self.view_proj().inverse();
        let near = inv.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        (near, (far - near).normalize_or_zero())
    }

    pub fn project_to_screen(&self, world_point: Vec3) -> Option<Vec2> {
        let ndc = self.view_proj().project_point3(world_point);
        if !(0.0..=1.0).contains(&ndc.z) {
            return None;
        }
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        ))
    }

    fn ground_hit(origin: Vec3, direction: Vec3) -> Option<(f32, Vec3)> {
        let direction = direction.normalize_or_zero();
        if direction.y.abs() < 1e-6 {
            return None;
        }
        let t = -origin.y / direction.y;
        if t < 0.0 {
            return None;
        }
        let point = origin + direction * t;
        let inside = point.x.abs() <= GROUND_HALF_EXTENT && point.z.abs() <= GROUND_HALF_EXTENT;
        inside.then_some((t, point))
    }
}

impl SceneQueries for DemoScene {
    fn surface_query(&self, screen_point: Vec2) -> Option<SurfacePose> {
        let (origin, direction) = self.screen_ray(screen_point);
        Self::ground_hit(origin, direction).map(|(_, point)| SurfacePose::at(point))
    }

    fn forward_ray_query(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        Self::ground_hit(origin, direction).map(|(t, _)| t)
    }

    fn viewpoint(&self) -> Viewpoint {
        Viewpoint {
            position: self.camera_position,
            forward: self.orientation * Vec3::NEG_Z,
        }
    }

    fn object_transform(&self) -> Option<ObjectTransform> {
        self.object
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> DemoScene {
        DemoScene::new(initial_camera_orientation(), 5.0, Vec2::new(800.0, 600.0))
    }

    #[test]
    fn screen_centre_hits_the_origin() {
        let scene = scene();
        let pose = scene.surface_query(Vec2::new(400.0, 300.0)).unwrap();
        assert!(pose.position.length() < 1e-3, "hit {:?}", pose.position);
    }

    #[test]
    fn forward_ray_measures_distance_to_ground() {
        let scene = scene();
        let view = scene.viewpoint();
        let distance = scene.forward_ray_query(view.position, view.forward).unwrap();
        assert!((distance - CAMERA_POSITION.length()).abs() < 1e-3);
    }

    #[test]
    fn looking_up_misses() {
        let scene = scene();
        assert_eq!(scene.forward_ray_query(Vec3::new(0.0, 1.0, 0.0), Vec3::Y), None);
    }

    #[test]
    fn projection_round_trips_through_the_ground() {
        let scene = scene();
        let screen = scene.project_to_screen(Vec3::new(1.0, 0.0, 0.5)).unwrap();
        let pose = scene.surface_query(screen).unwrap();
        assert!((pose.position - Vec3::new(1.0, 0.0, 0.5)).length() < 1e-3);
    }

    #[test]
    fn intents_drive_the_object() {
        let mut scene = scene();
        let pose = SurfacePose::at(Vec3::new(0.5, 0.0, 0.0));
        scene.apply(&GestureIntent::PlacementRequest { screen_position: Vec2::ZERO, pose });
        assert_eq!(scene.object().unwrap().scale, Vec3::splat(SPAWN_SCALE));

        scene.apply(&GestureIntent::ScaleRequest { new_scale: Vec3::splat(0.6) });
        scene.apply(&GestureIntent::ObjectPositionUpdate { position: Vec3::new(0.5, -0.2, 0.0) });
        let object = scene.object().unwrap();
        assert_eq!(object.scale, Vec3::splat(0.6));
        assert_eq!(object.position.y, -0.2);

        scene.apply(&GestureIntent::DespawnRequest);
        assert!(scene.object().is_none());
    }
}
