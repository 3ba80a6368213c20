//! Rendering system for the voxel raytracer.
//!
//! This module contains the fixed two-stage pipeline: a compute pass that
//! raymarches the voxel grid into an offscreen image, and a draw pass that
//! blits the image to the window. It provides the high-level
//! [`RaytraceRenderer`] interface the engine state drives once per frame.

use pipeline_manager::PipelineManager;
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};

use crate::application_state::asset_loader::{AssetError, RgbaImage};

use super::buffer_state::BufferState;

mod bind_group_state;
mod pipeline_manager;
mod texture;
mod vertex;

/// Horizontal render resolution of the raytraced image, in pixels.
pub const RENDER_WIDTH: u32 = 1920;
/// Vertical render resolution of the raytraced image, in pixels.
pub const RENDER_HEIGHT: u32 = 1080;
/// Edge length of one compute workgroup, in pixels.
pub const GROUP_SIZE: u32 = 30;

/// Number of workgroups needed to cover `resolution` pixels along one axis.
///
/// Uses ceiling division so a resolution that is not a multiple of the
/// group size still gets every pixel written; the shader discards the
/// out-of-range invocations in the final partial groups.
pub fn workgroup_count(resolution: u32, group_size: u32) -> u32 {
    resolution.div_ceil(group_size)
}

/// Manages the raytracing render path.
///
/// This struct is the main entry point for all rendering operations. It
/// owns the presentation surface and the pipeline manager and hands one
/// frame at a time through the compute and blit passes.
pub struct RaytraceRenderer {
    /// The WGPU surface being rendered to
    pub surface: Surface<'static>,
    /// Configuration for the surface (size, format, etc.)
    pub surface_config: SurfaceConfiguration,
    /// The WGPU device used for creating GPU resources
    pub device: Device,
    /// The WGPU queue for submitting command buffers
    pub queue: Queue,
    /// Manages the compute and blit pipelines
    pub pipeline_manager: PipelineManager,
}

impl RaytraceRenderer {
    /// Creates a new `RaytraceRenderer` instance.
    ///
    /// This initializes all the render-side GPU resources: the output
    /// storage image, the terrain texture, both pipelines, and their bind
    /// groups. The voxel and uniform buffers must already exist in the
    /// buffer registry.
    ///
    /// # Arguments
    /// * `surface` - The WGPU surface to render to
    /// * `surface_config` - Configuration for the surface
    /// * `device` - The WGPU device
    /// * `queue` - The WGPU queue
    /// * `raytrace_shader_string` - WGSL source of the compute shader
    /// * `blit_shader_string` - WGSL source of the blit shader
    /// * `terrain_image` - Decoded terrain material pixels
    /// * `buffer_state` - Registry holding the voxel and uniform buffers
    ///
    /// # Returns
    /// A new `RaytraceRenderer`, or the first fatal shader validation error.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        surface: Surface<'static>,
        surface_config: SurfaceConfiguration,
        device: Device,
        queue: Queue,
        raytrace_shader_string: String,
        blit_shader_string: String,
        terrain_image: RgbaImage,
        buffer_state: &mut BufferState,
    ) -> Result<Self, AssetError> {
        let pipeline_manager = PipelineManager::new(
            &device,
            &queue,
            surface_config.format,
            buffer_state,
            raytrace_shader_string,
            blit_shader_string,
            terrain_image,
        )?;

        Ok(Self {
            surface,
            surface_config,
            device,
            queue,
            pipeline_manager,
        })
    }

    /// Handles window resize events.
    ///
    /// Reconfigures the surface for the new window size. The offscreen
    /// image keeps its fixed render resolution; the blit's linear sampling
    /// absorbs the difference.
    ///
    /// # Arguments
    /// * `size` - The new window size in physical pixels
    pub fn resize_surface(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        self.surface_config.width = size.width;
        self.surface_config.height = size.height;

        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Renders a new frame.
    ///
    /// This is the main rendering entry point, called once per frame after
    /// the camera and light uniforms have been rewritten for the frame.
    ///
    /// # Arguments
    /// * `buffer_state` - Registry holding the quad vertex buffer
    pub fn render(&mut self, buffer_state: &BufferState) {
        self.pipeline_manager
            .render(&self.surface, &self.device, &self.queue, buffer_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workgroups_cover_the_reference_resolution_exactly() {
        assert_eq!(workgroup_count(RENDER_WIDTH, GROUP_SIZE), 64);
        assert_eq!(workgroup_count(RENDER_HEIGHT, GROUP_SIZE), 36);
    }

    #[test]
    fn non_divisible_resolutions_round_up() {
        // Truncation would leave a 10-pixel border unwritten here.
        assert_eq!(workgroup_count(1000, 30), 34);
        assert_eq!(workgroup_count(701, 30), 24);
        assert_eq!(workgroup_count(1, 30), 1);
    }

    #[test]
    fn exact_multiples_do_not_over_dispatch() {
        assert_eq!(workgroup_count(60, 30), 2);
        assert_eq!(workgroup_count(30, 30), 1);
    }
}
