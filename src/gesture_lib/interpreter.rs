// src/gesture_lib/interpreter.rs

use glam::Vec3;
use log::{debug, info, trace, warn};

use crate::gesture_lib::config::{ConfigError, GestureConfig};
use crate::gesture_lib::intents::{DistanceReading, FrameOutput, GestureIntent};
use crate::gesture_lib::scene_query::SceneQueries;
use crate::gesture_lib::session::{GestureSessionState, SessionPhase, TapOutcome};
use crate::gesture_lib::sinking::{SinkAnimation, SinkStep};
use crate::gesture_lib::touch::{TouchFrame, TouchPhase, TouchSample};

/// Turns per-frame touch snapshots into placement, scaling, removal and
/// camera intents. Holds only the session record; the host applies intents.
pub struct GestureInterpreter {
    config: GestureConfig,
    session: GestureSessionState,
}

impl GestureInterpreter {
    pub fn new(config: GestureConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, session: GestureSessionState::default() })
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn session(&self) -> &GestureSessionState {
        &self.session
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    pub fn reset(&mut self) {
        self.session = GestureSessionState::default();
    }

    pub fn update(&mut self, frame: &TouchFrame, scene: &impl SceneQueries) -> FrameOutput {
        let mut output = FrameOutput::default();

        if self.session.is_transitioning() {
            self.session.end_pinch();
            self.advance_sinking(frame.delta_time, &mut output);
        } else {
            if frame.touch_count() != 2 {
                self.session.end_pinch();
            }
            match frame.touches.as_slice() {
                [touch] => self.handle_single_touch(touch, frame, scene, &mut output),
                [first, second] => self.handle_two_touches(first, second, frame, scene, &mut output),
                _ => {}
            }
        }

        output.distance = self.read_distance(scene);
        output
    }

    fn advance_sinking(&mut self, dt: f32, output: &mut FrameOutput) {
        let Some(sink) = self.session.sinking.as_mut() else {
            return;
        };
        match sink.advance(dt) {
            SinkStep::Moving(position) => {
                output.intents.push(GestureIntent::ObjectPositionUpdate { position });
            }
            SinkStep::Finished(position) => {
                output.intents.push(GestureIntent::ObjectPositionUpdate { position });
                output.intents.push(GestureIntent::DespawnRequest);
                self.session.finish_removal();
                info!("Sinking finished; object removed");
            }
        }
    }

    fn handle_single_touch(
        &mut self,
        touch: &TouchSample,
        frame: &TouchFrame,
        scene: &impl SceneQueries,
        output: &mut FrameOutput,
    ) {
        if !self.session.object_placed {
            if touch.phase == TouchPhase::Began {
                if let Some(pose) = scene.surface_query(touch.position) {
                    debug!("Placing object at {:?} (screen {:?})", pose.position, touch.position);
                    self.session.object_placed = true;
                    output.intents.push(GestureIntent::PlacementRequest {
                        screen_position: touch.position,
                        pose,
                    });
                }
            }
        } else if touch.phase == TouchPhase::Moved && !self.session.is_pinching {
            if let Some(pose) = scene.surface_query(touch.position) {
                trace!("Moving object to {:?}", pose.position);
                output.intents.push(GestureIntent::MoveRequest {
                    screen_position: touch.position,
                    pose,
                });
            }
        }

        if touch.phase == TouchPhase::Moved {
            let scaled = self.config.rotation_speed * frame.delta_time;
            let yaw_delta = touch.delta_position.x * scaled;
            let pitch_delta = -touch.delta_position.y * scaled;
            trace!("Camera pan yaw {} pitch {}", yaw_delta, pitch_delta);
            output.intents.push(GestureIntent::CameraPanRequest { yaw_delta, pitch_delta });
        }

        if touch.phase == TouchPhase::Ended && !self.session.is_pinching {
            self.handle_tap(frame.timestamp, scene, output);
        }
    }

    fn handle_tap(&mut self, timestamp: f32, scene: &impl SceneQueries, output: &mut FrameOutput) {
        match self.session.register_tap(
            timestamp,
            self.config.tap_gap_secs,
            self.config.removal_tap_count,
        ) {
            TapOutcome::Counted(count) => debug!("Tap {} at {:.3}s", count, timestamp),
            TapOutcome::SequenceComplete => {
                let transform = scene.object_transform().filter(|_| self.session.object_placed);
                match transform {
                    Some(transform) => {
                        info!("Removal taps complete; sinking object from {:?}", transform.position);
                        self.session.sinking = Some(SinkAnimation::new(
                            transform.position,
                            self.config.sink_depth,
                            self.config.sink_duration_secs,
                        ));
                        output.intents.push(GestureIntent::RemovalTriggerEvent);
                    }
                    None => warn!("Removal taps complete but there is no placed object"),
                }
            }
        }
    }

    fn handle_two_touches(
        &mut self,
        first: &TouchSample,
        second: &TouchSample,
        frame: &TouchFrame,
        scene: &impl SceneQueries,
        output: &mut FrameOutput,
    ) {
        let (Some(previous), Some(current)) = (frame.previous_separation(), frame.separation()) else {
            return;
        };

        let zoom_delta = (current - previous) * self.config.zoom_sensitivity;
        if zoom_delta != 0.0 {
            trace!("Camera zoom {}", zoom_delta);
            output.intents.push(GestureIntent::CameraZoomRequest { delta: zoom_delta });
        }

        if !self.session.object_placed {
            return;
        }

        if !self.session.is_pinching {
            match scene.object_transform() {
                Some(transform) => {
                    debug!("Pinch started: baseline {} scale {:?}", previous, transform.scale);
                    self.session.begin_pinch(previous, transform.scale);
                }
                None => warn!("Pinch ignored; host reports no object transform"),
            }
        } else if (previous - current).abs() > 0.0 && self.session.pinch_baseline_distance > 0.0 {
            let ratio = current / self.session.pinch_baseline_distance;
            let new_scale = (self.session.pinch_baseline_scale * ratio).clamp(
                Vec3::splat(self.config.min_scale),
                Vec3::splat(self.config.max_scale),
            );
            output.intents.push(GestureIntent::ScaleRequest { new_scale });
        }

        if first.phase.is_finished() || second.phase.is_finished() {
            if self.session.is_pinching {
                debug!("Pinch ended");
            }
            self.session.end_pinch();
        }
    }

    fn read_distance(&self, scene: &impl SceneQueries) -> DistanceReading {
        let viewpoint = scene.viewpoint();
        if self.session.object_placed {
            return match scene.object_transform() {
                Some(transform) => DistanceReading::Meters(viewpoint.position.distance(transform.position)),
                None => DistanceReading::NotAvailable,
            };
        }
        scene
            .forward_ray_query(viewpoint.position, viewpoint.forward)
            .map_or(DistanceReading::NotAvailable, DistanceReading::Meters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture_lib::scene_query::{ObjectTransform, SurfacePose, Viewpoint};
    use glam::{Vec2, Vec3};
    use std::cell::Cell;

    struct StubScene {
        surface: Option<Vec3>,
        object: Cell<Option<ObjectTransform>>,
        forward_hit: Option<f32>,
    }

    impl StubScene {
        fn with_surface() -> Self {
            Self { surface: Some(Vec3::new(0.0, 0.0, -2.0)), object: Cell::new(None), forward_hit: Some(3.0) }
        }

        fn spawn(&self, position: Vec3, scale: Vec3) {
            self.object.set(Some(ObjectTransform { position, scale }));
        }
    }

    impl SceneQueries for StubScene {
        fn surface_query(&self, _screen_point: Vec2) -> Option<SurfacePose> {
            self.surface.map(SurfacePose::at)
        }

        fn forward_ray_query(&self, _origin: Vec3, _direction: Vec3) -> Option<f32> {
            self.forward_hit
        }

        fn viewpoint(&self) -> Viewpoint {
            Viewpoint { position: Vec3::ZERO, forward: Vec3::NEG_Z }
        }

        fn object_transform(&self) -> Option<ObjectTransform> {
            self.object.get()
        }
    }

    fn one(phase: TouchPhase, position: Vec2, delta: Vec2, t: f32) -> TouchFrame {
        TouchFrame::new(vec![TouchSample::new(0, position, delta, phase)], t, 0.1)
    }

    fn pinch(prev_sep: f32, sep: f32, phase: TouchPhase, t: f32) -> TouchFrame {
        TouchFrame::new(
            vec![
                TouchSample::new(0, Vec2::ZERO, Vec2::ZERO, TouchPhase::Stationary),
                TouchSample::new(1, Vec2::new(sep, 0.0), Vec2::new(sep - prev_sep, 0.0), phase),
            ],
            t,
            0.1,
        )
    }

    fn placed(scene: &StubScene, scale: Vec3) -> GestureInterpreter {
        let mut interp = GestureInterpreter::new(GestureConfig::default()).unwrap();
        let out = interp.update(&one(TouchPhase::Began, Vec2::new(50.0, 50.0), Vec2::ZERO, 0.0), scene);
        assert!(out.contains(|i| matches!(i, GestureIntent::PlacementRequest { .. })));
        scene.spawn(Vec3::new(0.0, 0.0, -2.0), scale);
        interp
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = GestureConfig { tap_gap_secs: 0.0, ..Default::default() };
        assert!(GestureInterpreter::new(config).is_err());
    }

    #[test]
    fn placement_needs_began_phase_and_surface_hit() {
        let miss = StubScene { surface: None, object: Cell::new(None), forward_hit: None };
        let mut interp = GestureInterpreter::new(GestureConfig::default()).unwrap();

        let out = interp.update(&one(TouchPhase::Began, Vec2::ONE, Vec2::ZERO, 0.0), &miss);
        assert!(out.is_empty());
        assert!(!interp.session().object_placed());
        assert_eq!(out.distance, DistanceReading::NotAvailable);

        let hit = StubScene::with_surface();
        let out = interp.update(&one(TouchPhase::Stationary, Vec2::ONE, Vec2::ZERO, 0.1), &hit);
        assert!(out.is_empty());
        assert_eq!(out.distance, DistanceReading::Meters(3.0));

        let out = interp.update(&one(TouchPhase::Began, Vec2::ONE, Vec2::ZERO, 0.2), &hit);
        assert_eq!(
            out.intents,
            vec![GestureIntent::PlacementRequest {
                screen_position: Vec2::ONE,
                pose: SurfacePose::at(Vec3::new(0.0, 0.0, -2.0)),
            }]
        );
        assert_eq!(interp.phase(), SessionPhase::Placed);
    }

    #[test]
    fn drag_moves_object_and_pans_camera() {
        let scene = StubScene::with_surface();
        let mut interp = placed(&scene, Vec3::splat(0.5));

        let out = interp.update(&one(TouchPhase::Moved, Vec2::new(60.0, 40.0), Vec2::new(10.0, -10.0), 0.1), &scene);
        assert!(out.contains(|i| matches!(i, GestureIntent::MoveRequest { .. })));
        let pan = out.intents.iter().find_map(|i| match i {
            GestureIntent::CameraPanRequest { yaw_delta, pitch_delta } => Some((*yaw_delta, *pitch_delta)),
            _ => None,
        });
        let (yaw, pitch) = pan.unwrap();
        assert!((yaw - 2.0).abs() < 1e-5);
        assert!((pitch - 2.0).abs() < 1e-5);
        assert_eq!(out.distance, DistanceReading::Meters(2.0));
    }

    #[test]
    fn pinch_baseline_then_scale() {
        let scene = StubScene::with_surface();
        let mut interp = placed(&scene, Vec3::splat(0.5));

        let out = interp.update(&pinch(100.0, 100.0, TouchPhase::Began, 0.2), &scene);
        assert_eq!(out.scale_request(), None);
        assert!(interp.session().is_pinching());

        let out = interp.update(&pinch(100.0, 150.0, TouchPhase::Moved, 0.3), &scene);
        assert_eq!(out.scale_request(), Some(Vec3::splat(0.75)));

        let out = interp.update(&pinch(150.0, 400.0, TouchPhase::Moved, 0.4), &scene);
        assert_eq!(out.scale_request(), Some(Vec3::splat(1.0)));

        let out = interp.update(&pinch(400.0, 1.0, TouchPhase::Ended, 0.5), &scene);
        assert_eq!(out.scale_request(), Some(Vec3::splat(0.01)));
        assert!(!interp.session().is_pinching());
    }

    #[test]
    fn unchanged_separation_emits_no_scale() {
        let scene = StubScene::with_surface();
        let mut interp = placed(&scene, Vec3::splat(0.5));
        interp.update(&pinch(80.0, 80.0, TouchPhase::Began, 0.2), &scene);
        let out = interp.update(&pinch(80.0, 80.0, TouchPhase::Stationary, 0.3), &scene);
        assert!(out.is_empty());
    }

    #[test]
    fn zoom_is_emitted_without_an_object() {
        let scene = StubScene::with_surface();
        let mut interp = GestureInterpreter::new(GestureConfig::default()).unwrap();
        let out = interp.update(&pinch(100.0, 120.0, TouchPhase::Moved, 0.0), &scene);
        assert!((out.zoom_request().unwrap() - 0.2).abs() < 1e-5);
        assert!(!interp.session().is_pinching());
    }

    #[test]
    fn triple_tap_without_object_does_nothing() {
        let scene = StubScene { surface: None, object: Cell::new(None), forward_hit: None };
        let mut interp = GestureInterpreter::new(GestureConfig::default()).unwrap();
        for t in [0.0, 0.1, 0.2] {
            let out = interp.update(&one(TouchPhase::Ended, Vec2::ZERO, Vec2::ZERO, t), &scene);
            assert!(out.is_empty());
        }
        assert_eq!(interp.session().tap_count(), 0);
        assert_eq!(interp.phase(), SessionPhase::Idle);
    }

    #[test]
    fn reset_returns_to_idle() {
        let scene = StubScene::with_surface();
        let mut interp = placed(&scene, Vec3::ONE);
        interp.reset();
        assert_eq!(interp.phase(), SessionPhase::Idle);
    }
}
