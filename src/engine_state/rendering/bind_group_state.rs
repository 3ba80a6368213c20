//! Manages WGPU bind groups and their layouts.
//!
//! This module creates the two bind groups the fixed pipeline needs: the
//! compute-side group exposing the output image, terrain texture, voxel
//! storage buffer, and frame uniforms to the raymarcher, and the blit-side
//! group exposing the finished image to the fullscreen draw.
//!
//! The binding indices are the stable slot contract shared with the
//! shaders: the output image sits at binding 0, the terrain material at
//! binding 1 (sampler at 2), the voxel data at binding 3, and the frame
//! uniforms at binding 4.

use std::collections::HashMap;

use wgpu::{BindGroup, BindGroupLayout, Device};

use crate::engine_state::{
    buffer_state::BufferState, camera_state::FRAME_UNIFORM_BUFFER_NAME, voxels::VOXEL_BUFFER_NAME,
};

use super::texture::Texture;

/// Holds the two bind groups and their layouts, retrievable by name.
pub struct BindGroupState {
    /// Bind groups keyed by their static names
    bind_groups: HashMap<&'static str, wgpu::BindGroup>,
    /// Matching layouts, keyed the same way
    bind_group_layouts: HashMap<&'static str, wgpu::BindGroupLayout>,
}

impl BindGroupState {
    /// Creates a new `BindGroupState` with the raytrace and blit groups.
    ///
    /// # Arguments
    /// * `device` - The WGPU device
    /// * `buffer_state` - Registry holding the voxel and uniform buffers
    /// * `output_texture` - The storage image written by the compute pass
    /// * `terrain_texture` - The uploaded terrain material
    ///
    /// # Returns
    /// A new `BindGroupState` with both bind groups created
    pub fn new(
        device: &Device,
        buffer_state: &BufferState,
        output_texture: &Texture,
        terrain_texture: &Texture,
    ) -> Self {
        let mut bind_groups = HashMap::new();
        let mut bind_group_layouts = HashMap::new();

        let (raytrace_bind_group, raytrace_bind_group_layout) =
            Self::generate_raytrace_bindgroups(device, buffer_state, output_texture, terrain_texture);

        bind_groups.insert(RAYTRACE_BIND_GROUP, raytrace_bind_group);
        bind_group_layouts.insert(RAYTRACE_BIND_GROUP_LAYOUT, raytrace_bind_group_layout);

        let (blit_bind_group, blit_bind_group_layout) =
            Self::generate_blit_bindgroups(device, output_texture);

        bind_groups.insert(BLIT_BIND_GROUP, blit_bind_group);
        bind_group_layouts.insert(BLIT_BIND_GROUP_LAYOUT, blit_bind_group_layout);

        Self {
            bind_groups,
            bind_group_layouts,
        }
    }

    /// Looks up a bind group by name.
    ///
    /// # Panics
    /// Panics if no bind group with the given name exists.
    pub fn get_bind_group(&self, name: &'static str) -> &wgpu::BindGroup {
        self.bind_groups.get(name).unwrap()
    }

    /// Looks up a bind group layout by name.
    ///
    /// # Panics
    /// Panics if no layout with the given name exists.
    pub fn get_bind_group_layout(&self, name: &'static str) -> &wgpu::BindGroupLayout {
        self.bind_group_layouts.get(name).unwrap()
    }

    /// Creates the bind group consumed by the compute raymarcher.
    ///
    /// The voxel storage buffer is read-only: nothing may write it after
    /// the initial upload, and the layout enforces that on the GPU side.
    fn generate_raytrace_bindgroups(
        device: &Device,
        buffer_state: &BufferState,
        output_texture: &Texture,
        terrain_texture: &Texture,
    ) -> (BindGroup, BindGroupLayout) {
        let raytrace_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::COMPUTE,
                        ty: wgpu::BindingType::StorageTexture {
                            access: wgpu::StorageTextureAccess::WriteOnly,
                            format: Texture::OUTPUT_FORMAT,
                            view_dimension: wgpu::TextureViewDimension::D2,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::COMPUTE,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::COMPUTE,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 3,
                        visibility: wgpu::ShaderStages::COMPUTE,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Storage { read_only: true },
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 4,
                        visibility: wgpu::ShaderStages::COMPUTE,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                ],
                label: Some(RAYTRACE_BIND_GROUP_LAYOUT),
            });

        let raytrace_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &raytrace_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&output_texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&terrain_texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&terrain_texture.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: buffer_state.get_entire_binding(VOXEL_BUFFER_NAME),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: buffer_state.get_entire_binding(FRAME_UNIFORM_BUFFER_NAME),
                },
            ],
            label: Some(RAYTRACE_BIND_GROUP),
        });

        (raytrace_bind_group, raytrace_bind_group_layout)
    }

    /// Creates the bind group consumed by the fullscreen blit pass.
    fn generate_blit_bindgroups(
        device: &Device,
        output_texture: &Texture,
    ) -> (BindGroup, BindGroupLayout) {
        let blit_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
                label: Some(BLIT_BIND_GROUP_LAYOUT),
            });

        let blit_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &blit_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&output_texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&output_texture.sampler),
                },
            ],
            label: Some(BLIT_BIND_GROUP),
        });

        (blit_bind_group, blit_bind_group_layout)
    }
}

/// Name of the raytrace bind group
pub const RAYTRACE_BIND_GROUP: &str = "raytrace_bind_group";
/// Name of the raytrace bind group layout
pub const RAYTRACE_BIND_GROUP_LAYOUT: &str = "raytrace_bind_group_layout";
/// Name of the blit bind group
pub const BLIT_BIND_GROUP: &str = "blit_bind_group";
/// Name of the blit bind group layout
pub const BLIT_BIND_GROUP_LAYOUT: &str = "blit_bind_group_layout";
