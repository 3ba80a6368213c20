//! One-time acquisition of everything the frame loop assumes exists: the
//! window, the WGPU device and queue, the surface, and the on-disk assets
//! (shader sources and the terrain texture).
//!
//! Adapter and device requests are async, so [`GraphicsBuilder`] runs them
//! off the handler and posts the finished [`Graphics`] bundle back to the
//! event loop as a user event; [`MaybeGraphics`] names the phases of that
//! handoff.
//!
//! Any failure on this path is a fatal startup error: it is logged with a
//! diagnostic and the process exits, since every subsequent frame assumes
//! these resources exist.

use std::future::Future;
use std::sync::Arc;

use log::error;
use wgpu::{Adapter, Device, Features, Instance, Queue, Surface, SurfaceConfiguration};
use winit::{
    event_loop::{ActiveEventLoop, EventLoopProxy},
    window::Window,
};

use crate::engine_state::rendering::{GROUP_SIZE, RENDER_HEIGHT, RENDER_WIDTH};

use super::asset_loader::{self, AssetError, RgbaImage};

const RAYTRACE_SHADER_PATH: &str = "assets/shaders/raytracer.wgsl";
const BLIT_SHADER_PATH: &str = "assets/shaders/blit.wgsl";
const TERRAIN_TEXTURE_PATH: &str = "assets/textures/stone.png";

/// The complete set of startup resources, ready for the engine to consume.
///
/// Every field is an `Option` (or empty string) only so the bundle can be
/// `take`n out of the event-handler state; a delivered bundle always has
/// every field populated.
#[allow(dead_code)]
#[derive(Default)]
pub struct Graphics {
    /// Handle to the application window
    pub window: Option<Arc<Window>>,
    /// The WGPU instance the surface was created from
    pub instance: Option<Instance>,
    /// The presentation surface
    pub surface: Option<Surface<'static>>,
    /// Configuration applied to the surface
    pub surface_config: Option<SurfaceConfiguration>,
    /// The selected adapter
    pub adapter: Option<Adapter>,
    /// The logical device
    pub device: Option<Device>,
    /// The command queue
    pub queue: Option<Queue>,
    /// WGSL source of the raymarching compute shader
    pub raytrace_shader_string: String,
    /// WGSL source of the fullscreen blit shader
    pub blit_shader_string: String,
    /// Decoded terrain material texture
    pub terrain_image: Option<RgbaImage>,
}

/// Creates the window and surface, then finishes the rest asynchronously.
///
/// The window is sized to the render resolution and its cursor hidden for
/// mouse-look. The returned future resolves to the full [`Graphics`]
/// bundle, or the first fatal startup error hit while loading assets.
fn create_graphics(
    event_loop: &ActiveEventLoop,
) -> impl Future<Output = Result<Graphics, AssetError>> + 'static {
    let window_attrs = Window::default_attributes()
        .with_title("GPU Voxel Raytracer")
        .with_inner_size(winit::dpi::PhysicalSize::new(RENDER_WIDTH, RENDER_HEIGHT));

    let window = Arc::new(event_loop.create_window(window_attrs).unwrap());
    window.set_cursor_visible(false);

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        flags: wgpu::InstanceFlags::empty(),
        backend_options: wgpu::BackendOptions::from_env_or_default(),
    });

    let surface = instance.create_surface(window.clone()).unwrap();

    async move {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .unwrap();

        // Linear sampling of the Rgba32Float output image happens on the
        // blit side, which needs float32 filtering support.
        let required_features = Features::FLOAT32_FILTERABLE;

        // The compute shader runs GROUP_SIZE x GROUP_SIZE invocations per
        // workgroup, which exceeds the 256-invocation default limit.
        let mut required_limits = wgpu::Limits::default();
        required_limits.max_compute_invocations_per_workgroup =
            required_limits
                .max_compute_invocations_per_workgroup
                .max(GROUP_SIZE * GROUP_SIZE);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                required_features,
                required_limits,
                label: None,
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::Off,
            })
            .await
            .unwrap();

        let size = window.inner_size();

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            // The vsync wait in present() is the frame pacing mechanism.
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let raytrace_shader_string = asset_loader::read_string(RAYTRACE_SHADER_PATH)?;
        let blit_shader_string = asset_loader::read_string(BLIT_SHADER_PATH)?;
        let terrain_image = asset_loader::decode_png(TERRAIN_TEXTURE_PATH)?;

        surface.configure(&device, &surface_config);
        Ok(Graphics {
            window: Some(window),
            instance: Some(instance),
            surface: Some(surface),
            surface_config: Some(surface_config),
            adapter: Some(adapter),
            device: Some(device),
            queue: Some(queue),
            raytrace_shader_string,
            blit_shader_string,
            terrain_image: Some(terrain_image),
        })
    }
}

/// Runs graphics acquisition and posts the result back to the event loop.
pub struct GraphicsBuilder {
    event_loop_proxy: Option<EventLoopProxy<Graphics>>,
}

/// Phase of the graphics handoff, from pending builder to consumed bundle.
pub enum MaybeGraphics {
    /// Acquisition has not finished yet
    Builder(GraphicsBuilder),

    /// The finished bundle, waiting for the engine to take it
    Graphics(Graphics),

    /// The bundle has been consumed by the engine state
    Moved,
}

impl GraphicsBuilder {
    /// Creates a builder that will deliver through the given proxy.
    pub fn new(event_loop_proxy: EventLoopProxy<Graphics>) -> Self {
        Self {
            event_loop_proxy: Some(event_loop_proxy),
        }
    }

    /// Runs acquisition to completion and posts the bundle as a user event.
    ///
    /// Aborts the process with a logged diagnostic if any startup asset
    /// fails to load. Calling again after a successful delivery is a no-op.
    pub fn build_and_send(&mut self, event_loop: &ActiveEventLoop) {
        let Some(event_loop_proxy) = self.event_loop_proxy.take() else {
            // event_loop_proxy is already spent - we already constructed Graphics
            return;
        };

        match pollster::block_on(create_graphics(event_loop)) {
            Ok(gfx) => {
                assert!(event_loop_proxy.send_event(gfx).is_ok());
            }
            Err(err) => {
                error!("Fatal startup error: {err}");
                std::process::exit(1);
            }
        }
    }
}
