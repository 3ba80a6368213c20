//! Manages the compute and blit pipelines and drives a frame through them.
//!
//! This module owns the fixed two-stage pipeline: the raymarching compute
//! pass that writes the offscreen image, and the fullscreen blit pass that
//! draws it to the swapchain. Both passes are recorded into one command
//! encoder per frame; the boundary between them is the synchronization
//! point that makes the compute writes visible to the blit's texture reads.
//!
//! # Resource Management
//!
//! The pipeline manager initializes and owns:
//!
//! - The output storage image and the terrain material texture
//! - The bind groups for both passes
//! - The fullscreen quad vertex buffer
//!
//! Shader module creation runs inside a validation error scope, so a
//! broken shader surfaces as a structured startup error with the
//! diagnostic text instead of producing undefined rendering.

use log::{error, info};
use wgpu::{ComputePipeline, Device, Queue, RenderPipeline, ShaderModule, Surface, TextureFormat};

use crate::application_state::asset_loader::{AssetError, RgbaImage};

use crate::engine_state::buffer_state::BufferState;

use super::{
    bind_group_state::{
        BindGroupState, BLIT_BIND_GROUP, BLIT_BIND_GROUP_LAYOUT, RAYTRACE_BIND_GROUP,
        RAYTRACE_BIND_GROUP_LAYOUT,
    },
    texture::Texture,
    vertex::{QuadVertex, FULLSCREEN_QUAD},
    workgroup_count, GROUP_SIZE, RENDER_HEIGHT, RENDER_WIDTH,
};

/// Name of the fullscreen quad vertex buffer
pub const QUAD_VERTEX_BUFFER_NAME: &str = "quad_vertex_buffer";

/// Owns the two fixed pipelines and the resources bound to them.
pub struct PipelineManager {
    /// The raymarching compute pipeline
    compute_pipeline: ComputePipeline,
    /// The fullscreen blit pipeline
    blit_pipeline: RenderPipeline,
    /// Bind groups for both passes
    bind_group_state: BindGroupState,
    /// The offscreen image written by compute and read by the blit
    #[allow(dead_code)]
    output_texture: Texture,
    /// The uploaded terrain material
    #[allow(dead_code)]
    terrain_texture: Texture,
}

impl PipelineManager {
    /// Creates a new `PipelineManager` instance.
    ///
    /// # Arguments
    /// * `device` - The WGPU device
    /// * `queue` - The WGPU queue for resource uploads
    /// * `texture_format` - The swapchain texture format
    /// * `buffer_state` - Registry holding the voxel and uniform buffers
    /// * `raytrace_shader_string` - WGSL source of the compute shader
    /// * `blit_shader_string` - WGSL source of the blit shader
    /// * `terrain_image` - Decoded terrain material pixels
    ///
    /// # Returns
    /// A new `PipelineManager`, or the validation error of the first shader
    /// that failed to compile.
    pub fn new(
        device: &Device,
        queue: &Queue,
        texture_format: TextureFormat,
        buffer_state: &mut BufferState,
        raytrace_shader_string: String,
        blit_shader_string: String,
        terrain_image: RgbaImage,
    ) -> Result<Self, AssetError> {
        let output_texture = Texture::create_output_texture(device, RENDER_WIDTH, RENDER_HEIGHT);
        let terrain_texture = Texture::create_terrain_texture(device, queue, &terrain_image);

        buffer_state.create_buffer_init(
            QUAD_VERTEX_BUFFER_NAME,
            wgpu::util::BufferInitDescriptor {
                label: Some(QUAD_VERTEX_BUFFER_NAME),
                contents: bytemuck::cast_slice(&FULLSCREEN_QUAD),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let bind_group_state =
            BindGroupState::new(device, buffer_state, &output_texture, &terrain_texture);

        let raytrace_shader =
            Self::create_shader_module_checked(device, "raytracer", &raytrace_shader_string)?;
        let blit_shader = Self::create_shader_module_checked(device, "blit", &blit_shader_string)?;

        let compute_pipeline =
            Self::create_compute_pipeline(device, &raytrace_shader, &bind_group_state);
        let blit_pipeline =
            Self::create_blit_pipeline(device, &blit_shader, texture_format, &bind_group_state);

        info!(
            "Pipelines ready, {} bytes of buffers allocated",
            buffer_state.get_total_allocated_memory()
        );

        Ok(Self {
            compute_pipeline,
            blit_pipeline,
            bind_group_state,
            output_texture,
            terrain_texture,
        })
    }

    /// Creates a shader module, promoting validation diagnostics to errors.
    ///
    /// The module is created inside a validation error scope; any
    /// diagnostic the device reports is returned as a structured error
    /// rather than logged and ignored.
    ///
    /// # Arguments
    /// * `device` - The WGPU device
    /// * `label` - Debug label for the module and for diagnostics
    /// * `source` - WGSL source code
    fn create_shader_module_checked(
        device: &Device,
        label: &str,
        source: &str,
    ) -> Result<ShaderModule, AssetError> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        if let Some(validation_error) = pollster::block_on(device.pop_error_scope()) {
            return Err(AssetError::ShaderValidation {
                label: label.to_string(),
                diagnostic: validation_error.to_string(),
            });
        }

        info!("Shader '{label}' compiled successfully");
        Ok(module)
    }

    /// Creates the raymarching compute pipeline.
    fn create_compute_pipeline(
        device: &Device,
        shader: &ShaderModule,
        bind_group_state: &BindGroupState,
    ) -> ComputePipeline {
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("raytrace pipeline layout"),
            bind_group_layouts: &[bind_group_state.get_bind_group_layout(RAYTRACE_BIND_GROUP_LAYOUT)],
            push_constant_ranges: &[],
        });

        device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("raytrace pipeline"),
            layout: Some(&pipeline_layout),
            module: shader,
            entry_point: Some("main"),
            compilation_options: Default::default(),
            cache: None,
        })
    }

    /// Creates the fullscreen blit pipeline.
    fn create_blit_pipeline(
        device: &Device,
        shader: &ShaderModule,
        format: TextureFormat,
        bind_group_state: &BindGroupState,
    ) -> RenderPipeline {
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("blit pipeline layout"),
            bind_group_layouts: &[bind_group_state.get_bind_group_layout(BLIT_BIND_GROUP_LAYOUT)],
            push_constant_ranges: &[],
        });

        let vertex_buffers = [QuadVertex::desc()];

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("blit pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    /// Renders a frame to the given surface.
    ///
    /// Records both passes into one command encoder:
    /// 1. The compute pass raymarches into the output image, dispatched
    ///    with enough workgroups to cover the render resolution
    /// 2. The pass boundary orders the image writes before the blit's reads
    /// 3. The blit pass clears the swapchain and draws the fullscreen quad
    ///
    /// The submit/present pair at the end lets the in-flight GPU work
    /// complete on its own; the vsync wait in present is the frame pacing.
    ///
    /// # Arguments
    /// * `surface` - The target surface to render to
    /// * `device` - The WGPU device
    /// * `queue` - The WGPU queue for command submission
    /// * `buffer_state` - Registry holding the quad vertex buffer
    ///
    /// # Panics
    /// Panics if the surface texture cannot be acquired.
    pub fn render(
        &mut self,
        surface: &Surface,
        device: &Device,
        queue: &Queue,
        buffer_state: &BufferState,
    ) {
        let frame = match surface.get_current_texture() {
            Ok(frame) => frame,
            Err(err) => {
                error!("Error getting current frame: {:?}", err);
                panic!();
            }
        };

        let view = frame.texture.create_view(&Default::default());
        let mut encoder = device.create_command_encoder(&Default::default());

        {
            let mut cpass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("raytrace pass"),
                timestamp_writes: None,
            });
            cpass.set_pipeline(&self.compute_pipeline);
            cpass.set_bind_group(0, self.bind_group_state.get_bind_group(RAYTRACE_BIND_GROUP), &[]);
            cpass.dispatch_workgroups(
                workgroup_count(RENDER_WIDTH, GROUP_SIZE),
                workgroup_count(RENDER_HEIGHT, GROUP_SIZE),
                1,
            );
        }

        // Ending the compute pass before beginning the render pass is the
        // synchronization point: the image's usage transition at this
        // boundary makes the compute writes visible to the texture reads
        // below. Recording the blit into a separate submission would lose
        // that ordering.
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("blit pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });
            rpass.set_pipeline(&self.blit_pipeline);
            rpass.set_bind_group(0, self.bind_group_state.get_bind_group(BLIT_BIND_GROUP), &[]);
            rpass.set_vertex_buffer(0, buffer_state.get_buffer(QUAD_VERTEX_BUFFER_NAME).slice(..));
            rpass.draw(0..FULLSCREEN_QUAD.len() as u32, 0..1);
        }

        let command_buffer = encoder.finish();
        queue.submit([command_buffer]);
        frame.present();
    }
}
