#![warn(missing_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Raytracer
//!
//! A real-time GPU voxel raytracing demo built with Rust and WGPU.
//!
//! A procedural world generator fills a dense 512x64x512 voxel grid on the
//! CPU, uploads it once into a GPU storage buffer, and a compute shader
//! raymarches the grid per-pixel into an offscreen image every frame. A
//! second, trivial pipeline blits that image to the window with a fullscreen
//! triangle strip.
//!
//! ## Key Modules
//!
//! * `application_state` - Window lifecycle, asset loading, and input handling
//! * `engine_state` - Camera, lighting, voxel world, and the render pipelines
//!
//! ## Architecture
//!
//! The host side is intentionally small and single-threaded. All per-frame
//! parallelism happens on the GPU inside the compute dispatch:
//!
//! 1. Input updates the camera pose and the sun direction
//! 2. The frame uniforms are rewritten from the *current* camera rotation
//! 3. The compute pass raymarches into the storage image
//! 4. The pass boundary orders those writes before the blit pass reads them
//! 5. The blit pass draws the image to the swapchain and presents
//!
//! Frame pacing comes from the vsync present wait; there is no separate
//! timer.

use application_state::{
    graphics_resources_builder::{GraphicsBuilder, MaybeGraphics},
    ApplicationState,
};

use log::info;
use winit::event_loop::EventLoop;

mod application_state;
mod engine_state;

/// Initializes logging, builds the event loop, and runs the application
/// until a close is requested.
///
/// All resource setup failures (missing assets, undecodable textures,
/// invalid shaders) are fatal: they are logged with a diagnostic and abort
/// the process, since every subsequent frame assumes those resources exist.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");
    let event_loop = EventLoop::with_user_event().build().unwrap();

    let mut state: ApplicationState = ApplicationState {
        graphics: MaybeGraphics::Builder(GraphicsBuilder::new(event_loop.create_proxy())),
        state: None,
    };

    let _ = event_loop.run_app(&mut state);
}
