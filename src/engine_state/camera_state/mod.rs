//! # Camera State
//!
//! Ties the camera pose to its GPU uniform buffer: [`CameraState`] owns a
//! [`Camera`] and a `FrameUniform`, integrates input into the pose each
//! frame, and pushes the repacked uniforms to the buffer the compute pass
//! reads.
//!
//! The invariant that matters here: the uniform buffer is rewritten from
//! the *current* rotation on every update, before the compute dispatch that
//! consumes it. A stale transform is a correctness bug, not a visual
//! artifact, so nothing in this module caches the matrix across frames.

use cgmath::{Point3, Vector2, Vector3};

use super::{buffer_state::BufferState, PlayerAction};

pub mod camera;

pub use camera::Camera;

/// Name of the GPU buffer used for the per-frame uniform data
pub const FRAME_UNIFORM_BUFFER_NAME: &str = "frame_uniform_buffer";

/// Manages the camera pose and its GPU-visible uniform state.
///
/// This is the main interface for the camera system. It owns the camera
/// pose, integrates player actions into it each frame, and pushes the
/// repacked uniforms into the GPU buffer consumed by the compute pass.
pub struct CameraState {
    /// The current camera pose
    pub camera: camera::Camera,
    /// GPU-layout per-frame uniform data
    pub frame_uniform: camera::FrameUniform,
}

impl CameraState {
    /// Creates a new CameraState and allocates its uniform buffer.
    ///
    /// The camera starts above the terrain looking slightly off-axis, the
    /// same vantage point the demo has always opened on.
    ///
    /// # Arguments
    /// * `buffer_state` - The buffer registry to allocate the uniform buffer in
    pub fn new(buffer_state: &mut BufferState) -> Self {
        let camera = camera::Camera::new(Point3::new(0.0, 64.0, 0.0), Vector2::new(-0.5, 0.0));
        let frame_uniform = camera::FrameUniform::new();

        buffer_state.create_buffer_init(
            FRAME_UNIFORM_BUFFER_NAME,
            wgpu::util::BufferInitDescriptor {
                label: Some(FRAME_UNIFORM_BUFFER_NAME),
                contents: bytemuck::cast_slice(&[frame_uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

        CameraState {
            camera,
            frame_uniform,
        }
    }

    /// Integrates one frame of input and pushes the refreshed uniforms.
    ///
    /// Called every frame before the render; the uniform write always
    /// happens, even for a motionless frame, so the buffer also picks up
    /// light direction changes.
    ///
    /// # Arguments
    /// * `actions` - The player's input actions for this frame
    /// * `dt` - Time elapsed since the last update
    /// * `light_dir` - Current sun direction
    /// * `screen_size` - Render resolution in pixels
    /// * `buffer_state` - The buffer registry holding the uniform buffer
    pub fn update(
        &mut self,
        actions: &PlayerAction,
        dt: web_time::Duration,
        light_dir: Vector3<f32>,
        screen_size: (u32, u32),
        buffer_state: &BufferState,
    ) {
        self.camera.apply_actions(actions, dt);
        self.frame_uniform
            .update(&self.camera, light_dir, screen_size);
        buffer_state.write_buffer(
            FRAME_UNIFORM_BUFFER_NAME,
            0,
            bytemuck::cast_slice(&[self.frame_uniform]),
        );
    }
}
