//! # Application Lifecycle
//!
//! Host-side lifecycle of the raytracing demo: window and device
//! acquisition, input intake, and the per-frame cadence that drives the
//! engine.
//!
//! The application moves through three phases. While uninitialized, the
//! graphics builder is acquiring the window, device, and startup assets.
//! Once those arrive, the engine state is constructed and frames are
//! produced until a close is requested (window close or Escape), at which
//! point the event loop exits and the window is torn down. The final
//! frame's GPU work is allowed to drain on its own; every other host
//! allocation is process-lifetime.

pub mod asset_loader;
pub mod graphics_resources_builder;
pub mod input_manager;
pub mod input_state;

use std::sync::Arc;

use graphics_resources_builder::{Graphics, MaybeGraphics};
use input_manager::InputManager;
use log::error;

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::engine_state::EngineState;

/// Top-level state of the demo, implementing the winit event handler.
///
/// Both fields start out empty-ish: `graphics` holds the in-flight builder
/// until the device and assets arrive, and `state` stays `None` until the
/// engine has been constructed from them.
pub struct ApplicationState {
    /// The graphics resources, in whatever phase of acquisition they are
    pub graphics: MaybeGraphics,

    /// The running engine plus its window, once startup has completed
    pub state: Option<InitializedApplicationState>,
}

/// Everything the running phase needs, bundled so it can only exist fully
/// formed.
pub struct InitializedApplicationState {
    /// Camera, world, and the two render pipelines
    pub engine_state: EngineState,

    /// Handle to the application window
    pub window: Arc<Window>,

    /// Keyboard and pointer intake between frames
    pub input_manager: InputManager,

    /// When `about_to_wait` last ran, for the frame delta
    pub last_wait_time: web_time::Instant,
}

/// Whether this event is one of the two close requests (window close or
/// Escape).
fn is_close_request(event: &WindowEvent) -> bool {
    matches!(
        event,
        WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event: KeyEvent {
                    state: ElementState::Pressed,
                    physical_key: PhysicalKey::Code(KeyCode::Escape),
                    ..
                },
                ..
            }
    )
}

impl ApplicationState {
    /// Consumes the built graphics bundle and constructs the engine state.
    ///
    /// This is the one-time transition into the running phase. A shader
    /// validation failure here is fatal and aborts the process with a
    /// diagnostic.
    fn initialize_application_state(&mut self) {
        if let MaybeGraphics::Graphics(gfx) = &mut self.graphics {
            let taken_gfx = std::mem::take(gfx);
            let window = taken_gfx.window.expect("Window is missing");
            let engine_state = EngineState::new(
                taken_gfx.surface.expect("Surface is missing"),
                taken_gfx
                    .surface_config
                    .expect("Surface configuration is missing"),
                taken_gfx.device.expect("Device is missing"),
                taken_gfx.queue.expect("Queue is missing"),
                taken_gfx.raytrace_shader_string,
                taken_gfx.blit_shader_string,
                taken_gfx.terrain_image.expect("Terrain image is missing"),
            );

            let engine_state = match engine_state {
                Ok(engine_state) => engine_state,
                Err(err) => {
                    error!("Fatal startup error: {err}");
                    std::process::exit(1);
                }
            };

            self.state = Some(InitializedApplicationState {
                engine_state,
                window,
                input_manager: InputManager::new(),
                last_wait_time: web_time::Instant::now(),
            });

            self.graphics = MaybeGraphics::Moved;
        }
    }
}

impl ApplicationHandler<Graphics> for ApplicationState {
    /// Routes window events: resize, focus, redraw, and close requests.
    ///
    /// Close requests are honored in every phase; everything else needs the
    /// running engine and is dropped during startup.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if is_close_request(&event) {
            event_loop.exit();
            return;
        }

        let Some(state) = &mut self.state else {
            return;
        };

        state.input_manager.intake_input(&event);

        match event {
            WindowEvent::Resized(size) => {
                state.engine_state.resize_surface(size);
            }
            WindowEvent::Focused(is_focused) => {
                if !is_focused {
                    state.input_manager.reset_inputs();
                }
            }
            WindowEvent::RedrawRequested => {
                state.engine_state.render();
            }
            _ => (),
        }
    }

    /// Accumulates raw pointer motion for the camera.
    ///
    /// Raw device deltas are used instead of cursor positions so the view
    /// keeps turning past the window edges.
    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let Some(state) = &mut self.state {
            if let DeviceEvent::MouseMotion { delta } = event {
                state.input_manager.intake_pointer_motion(delta);
            }
        }
    }

    /// Kicks off graphics acquisition the first time the loop resumes.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let MaybeGraphics::Builder(builder) = &mut self.graphics {
            builder.build_and_send(event_loop);
        }
    }

    /// Receives the finished graphics bundle and starts the engine.
    fn user_event(&mut self, _event_loop: &ActiveEventLoop, graphics: Graphics) {
        self.graphics = MaybeGraphics::Graphics(graphics);
        self.initialize_application_state();
    }

    /// Advances one frame of host-side state, then requests the redraw.
    ///
    /// The camera and light are updated here, before the redraw, so the
    /// uniforms consumed by the compute dispatch always reflect the current
    /// frame's input.
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &mut self.state {
            let now = web_time::Instant::now();
            let wait_dt = now - state.last_wait_time;

            if let Some(processed_input) = state.input_manager.get_and_reset_processed_input() {
                state.engine_state.set_input_commands(processed_input);
            }

            state.engine_state.process_input(wait_dt);

            state.last_wait_time = now;

            state.window.request_redraw();
        }
    }
}
