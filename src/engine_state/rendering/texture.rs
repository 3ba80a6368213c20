//! The two textures the raytracer needs: the floating-point storage image
//! the compute pass writes into, and the terrain material texture the
//! raymarcher samples for surface shading.

use wgpu::util::DeviceExt;

use crate::application_state::asset_loader::RgbaImage;

/// A texture bundled with the view and sampler it is bound through.
pub struct Texture {
    /// The underlying texture resource.
    #[allow(dead_code)]
    pub texture: wgpu::Texture,
    /// View used when binding the texture to a pipeline.
    pub view: wgpu::TextureView,
    /// Sampler carrying the filtering and addressing modes.
    pub sampler: wgpu::Sampler,
}

impl Texture {
    /// The texture format of the compute output image.
    pub const OUTPUT_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba32Float;

    /// Creates the offscreen image the compute shader writes each frame.
    ///
    /// The compute side writes raw texels through a storage binding; the
    /// sampler here belongs to the blit side only, which is allowed to
    /// filter (linear magnification when the window size differs from the
    /// render resolution).
    ///
    /// # Arguments
    /// * `device` - The WGPU device
    /// * `width` - Render resolution width in pixels
    /// * `height` - Render resolution height in pixels
    ///
    /// # Returns
    /// A new `Texture` usable as both a storage image and a sampled texture
    pub fn create_output_texture(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let desc = wgpu::TextureDescriptor {
            label: Some("raytrace output"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::OUTPUT_FORMAT,
            usage: wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        };

        let texture = device.create_texture(&desc);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// Creates and uploads the terrain material texture.
    ///
    /// Voxel faces must not bleed across texture edges, so the sampler uses
    /// nearest filtering and clamp-to-edge addressing, with no mipmaps.
    ///
    /// # Arguments
    /// * `device` - The WGPU device
    /// * `queue` - The WGPU queue for the upload
    /// * `image` - Decoded RGBA pixel data
    ///
    /// # Returns
    /// A new `Texture` holding the uploaded material
    pub fn create_terrain_texture(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &RgbaImage,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };
        let desc = wgpu::TextureDescriptor {
            label: Some("terrain texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        };

        let texture = device.create_texture_with_data(
            queue,
            &desc,
            wgpu::util::TextureDataOrder::LayerMajor,
            &image.pixels,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }
}
