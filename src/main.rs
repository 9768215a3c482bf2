// src/main.rs

pub mod app;
pub mod ui;
pub mod demo_scene;

use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};
use app::GestureApp;

/// Seconds on a monotonic clock.
fn now_secs() -> f64 {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            web_sys::window()
                .and_then(|win| win.performance())
                .map(|perf| perf.now() / 1000.0)
                .unwrap_or(0.0)
        } else {
            use std::sync::OnceLock;
            static START: OnceLock<std::time::Instant> = OnceLock::new();
            START.get_or_init(std::time::Instant::now).elapsed().as_secs_f64()
        }
    }
}

pub async fn run() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            if let Err(e) = console_log::init_with_level(log::Level::Info) {
                web_sys::console::error_1(&format!("Couldn't initialize logger: {e}").into());
            }
        } else {
            env_logger::init();
        }
    }

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Could not create event loop: {}", e);
            return;
        }
    };
    let window = match WindowBuilder::new()
        .with_title("AR Gestures")
        .with_inner_size(winit::dpi::LogicalSize::new(1024, 768))
        .build(&event_loop)
    {
        Ok(window) => std::sync::Arc::new(window),
        Err(e) => {
            log::error!("Could not create window: {}", e);
            return;
        }
    };

    #[cfg(target_arch = "wasm32")]
    {
        use winit::platform::web::WindowExtWebSys;
        let attached = web_sys::window()
            .and_then(|win| win.document())
            .and_then(|doc| {
                let dst = doc.get_element_by_id("wasm-viewport")?;
                let canvas = web_sys::Element::from(window.canvas()?);
                dst.append_child(&canvas).ok()?;
                Some(())
            });
        if attached.is_none() {
            log::error!("Couldn't append canvas to document body.");
        }
    }

    let mut app_state = match GestureApp::new(window.clone()).await {
        Ok(app_state) => app_state,
        Err(e) => {
            log::error!("Could not start gesture demo: {}", e);
            return;
        }
    };
    let start_time = now_secs();
    let mut last_time = start_time;

    let result = event_loop.run(move |event, target: &EventLoopWindowTarget<()>| {
        target.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => {
                if !app_state.handle_window_event(event, &window) {
                    match event {
                        WindowEvent::CloseRequested => {
                            target.exit();
                        }
                        WindowEvent::KeyboardInput { event: key_event, .. }
                            if key_event.state == ElementState::Pressed
                                && key_event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
                        {
                            target.exit();
                        }
                        WindowEvent::Resized(physical_size) => {
                            app_state.resize(*physical_size);
                        }
                        WindowEvent::RedrawRequested => { /* In AboutToWait */ }
                        _ => {}
                    }
                }
            }
            Event::AboutToWait => {
                let now = now_secs();
                let dt = (now - last_time) as f32;
                last_time = now;

                app_state.update((now - start_time) as f32, dt);
                match app_state.render(&window) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        app_state.resize(app_state.get_size());
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("WGPU Out Of Memory! Exiting.");
                        target.exit();
                    }
                    Err(e) => log::warn!("Surface error: {:?}", e),
                }

                if !target.exiting() {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    });

    if let Err(e) = result {
        log::error!("Event loop terminated: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() {
    run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    wasm_bindgen_futures::spawn_local(run());
}
