// src/app.rs

use std::collections::VecDeque;

use glam::Vec2;
use thiserror::Error;
use winit::{
    event::{ElementState, MouseButton, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use ar_gestures::gesture_lib::{
    CameraConfig, CameraRig, ConfigError, GestureConfig, GestureIntent, GestureInterpreter,
    PanelTrigger, TouchTracker,
};
use crate::demo_scene::{initial_camera_orientation, DemoScene};
use crate::ui::{build_ui, HudState};

/// Touch id used when the left mouse button emulates a finger.
const MOUSE_TOUCH_ID: u64 = u64::MAX;
const RECENT_INTENT_LINES: usize = 8;
const CLEAR_COLOR: wgpu::Color = wgpu::Color { r: 0.05, g: 0.05, b: 0.1, a: 1.0 };

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid gesture configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("could not create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible graphics adapter found")]
    NoAdapter,
    #[error("could not open graphics device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
}

pub struct GestureApp {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    interpreter: GestureInterpreter,
    tracker: TouchTracker,
    scene: DemoScene,
    camera_rig: CameraRig,
    panel: PanelTrigger,
    cursor: Vec2,
    recent_intents: VecDeque<String>,
    hud: HudState,
}

impl GestureApp {
    pub async fn new(window: std::sync::Arc<Window>) -> Result<Self, AppError> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window.clone())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(AppError::NoAdapter)?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps.formats.iter().copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .unwrap_or(wgpu::TextureFormat::Bgra8UnormSrgb);
        let alpha_mode = surface_caps.alpha_modes.first().copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(), egui::ViewportId::ROOT, &*window,
            Some(window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &device, config.format, None, 1,
        );

        let interpreter = GestureInterpreter::new(GestureConfig::default())?;
        let camera_rig = CameraRig::new(CameraConfig::default(), initial_camera_orientation())?;
        let scene = DemoScene::new(
            camera_rig.orientation(),
            camera_rig.ortho_size(),
            Vec2::new(config.width as f32, config.height as f32),
        );

        log::info!("Gesture demo ready ({}x{}, {:?})", config.width, config.height, config.format);

        Ok(Self {
            surface, device, queue, config, size,
            egui_ctx, egui_state, egui_renderer,
            interpreter,
            tracker: TouchTracker::new(),
            scene,
            camera_rig,
            panel: PanelTrigger::new(),
            cursor: Vec2::ZERO,
            recent_intents: VecDeque::with_capacity(RECENT_INTENT_LINES),
            hud: HudState::default(),
        })
    }

    pub fn get_size(&self) -> winit::dpi::PhysicalSize<u32> { self.size }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.scene.set_viewport(new_size.width as f32, new_size.height as f32);
        }
    }

    /// One host tick: snapshot touches, interpret, apply intents.
    pub fn update(&mut self, timestamp: f32, dt: f32) {
        let frame = self.tracker.snapshot(timestamp, dt);
        let output = self.interpreter.update(&frame, &self.scene);

        for intent in &output.intents {
            if !self.camera_rig.apply(intent) {
                self.scene.apply(intent);
            }
            if !matches!(intent, GestureIntent::CameraPanRequest { .. } | GestureIntent::ObjectPositionUpdate { .. }) {
                self.push_recent(format!("{:>7.2}s {:?}", timestamp, intent));
            }
        }
        self.scene.set_camera(self.camera_rig.orientation(), self.camera_rig.ortho_size());

        let session = self.interpreter.session();
        let marker = self.scene.object().and_then(|object| {
            let center = self.scene.project_to_screen(object.position)?;
            let radius = 0.5 * object.scale.x / self.scene.world_units_per_pixel();
            Some((egui::pos2(center.x, center.y), radius))
        });
        self.hud = HudState {
            distance_text: output.distance.to_string(),
            status: format!("{:?} (taps: {})", self.interpreter.phase(), session.tap_count()),
            ortho_size: self.camera_rig.ortho_size(),
            panel_visible: self.panel.is_visible(),
            object_marker: marker,
            recent_intents: self.recent_intents.iter().cloned().collect(),
        };
    }

    fn push_recent(&mut self, line: String) {
        if self.recent_intents.len() == RECENT_INTENT_LINES {
            self.recent_intents.pop_front();
        }
        self.recent_intents.push_back(line);
    }

    pub fn render(&mut self, window: &Window) -> Result<(), wgpu::SurfaceError> {
        let output_texture = self.surface.get_current_texture()?;
        let view = output_texture.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Main Command Encoder"),
        });

        {
            let _clear_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view, resolve_target: None,
                    ops: wgpu::Operations { load: wgpu::LoadOp::Clear(CLEAR_COLOR), store: wgpu::StoreOp::Store },
                })],
                depth_stencil_attachment: None, occlusion_query_set: None, timestamp_writes: None,
            });
        }

        let raw_input = self.egui_state.take_egui_input(window);
        let hud = &self.hud;
        let full_output = self.egui_ctx.run(raw_input, |ctx| { build_ui(ctx, hud); });
        self.egui_state.handle_platform_output(window, full_output.platform_output);
        let tris = self.egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };
        let extra_commands = self.egui_renderer.update_buffers(
            &self.device, &self.queue, &mut encoder, &tris, &screen_descriptor,
        );
        {
            let mut gui_render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("GUI Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view, resolve_target: None,
                    ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
                })],
                depth_stencil_attachment: None, occlusion_query_set: None, timestamp_writes: None,
            });
            self.egui_renderer.render(&mut gui_render_pass, &tris, &screen_descriptor);
        }
        for tex_id in &full_output.textures_delta.free { self.egui_renderer.free_texture(tex_id); }

        self.queue.submit(extra_commands.into_iter().chain(std::iter::once(encoder.finish())));
        output_texture.present();
        Ok(())
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent, window: &Window) -> bool {
        if self.egui_state.on_window_event(window, event).consumed { return true; }
        match event {
            WindowEvent::Touch(touch) => {
                let position = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                self.tracker.record(touch.id, position, touch.phase.into());
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                self.tracker.move_to(MOUSE_TOUCH_ID, self.cursor);
                false
            }
            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                match state {
                    ElementState::Pressed => self.tracker.begin(MOUSE_TOUCH_ID, self.cursor),
                    ElementState::Released => self.tracker.end(MOUSE_TOUCH_ID, self.cursor),
                }
                true
            }
            WindowEvent::MouseInput { state: ElementState::Pressed, button: MouseButton::Right, .. } => {
                self.panel.activate();
                true
            }
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if key_event.state == ElementState::Pressed && key_event.physical_key == PhysicalKey::Code(KeyCode::KeyP) {
                    self.panel.activate();
                    return true;
                }
                false
            }
            _ => false,
        }
    }
}
