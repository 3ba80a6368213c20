//! # Engine State Module
//!
//! The core module that owns all host-side state of the raytracing demo.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container, owned by the frame loop
//! * `buffer_state` - Named registry for GPU buffers
//! * `camera_state` - Camera pose, movement, and per-frame uniforms
//! * `lighting` - The user-steered sun direction
//! * `rendering` - The compute and blit pipelines
//! * `voxels` - The dense voxel grid and its procedural generator
//!
//! ## Architecture
//!
//! There is no ambient global state: everything a frame needs lives in
//! `EngineState` and is threaded through the update and render calls. The
//! per-frame flow is: input is translated into a `PlayerAction`, the
//! camera and sun integrate it, the frame uniforms are rewritten, and the
//! renderer records the compute dispatch and the blit into one submission.
//!
//! The voxel world exists on the host only long enough to be generated and
//! uploaded; after `EngineState::new` returns, the storage buffer on the
//! GPU is the only copy.

use log::info;

use camera_state::CameraState;
use lighting::SunLight;
use rendering::{RaytraceRenderer, RENDER_HEIGHT, RENDER_WIDTH};
use voxels::{NoiseParams, WorldGenerator, SEA_LEVEL, VOXEL_BUFFER_NAME, WORLD_SIZE_X,
    WORLD_SIZE_Y, WORLD_SIZE_Z};
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};
use winit::keyboard::KeyCode;

use crate::application_state::{
    asset_loader::{AssetError, RgbaImage},
    input_state::ProcessedInputState,
};

mod buffer_state;
mod camera_state;
mod lighting;
pub mod rendering;
mod voxels;

/// The main state container for the raytracing demo.
///
/// This struct owns the camera, the sun, the GPU buffer registry, and the
/// renderer, and coordinates their interactions each frame.
pub struct EngineState {
    /// Camera state managing pose, movement, and the frame uniforms
    pub camera_state: CameraState,
    /// The user-steered sun direction
    pub sun_light: SunLight,
    /// Current player actions derived from input
    pub player_actions: PlayerAction,
    /// Named registry for GPU buffers
    pub buffer_state: buffer_state::BufferState,
    /// The compute and blit render path
    pub renderer: RaytraceRenderer,
    /// Frames presented since the FPS log line was last emitted
    frames_this_second: u32,
    /// When the FPS log line was last emitted
    fps_timer: web_time::Instant,
}

impl EngineState {
    /// Creates the engine state and performs all one-time resource setup.
    ///
    /// This generates the voxel world, uploads it into its storage buffer
    /// (the host copy is dropped here and never re-read), allocates the
    /// frame uniform buffer, and builds both pipelines.
    ///
    /// # Arguments
    ///
    /// * `surface` - The presentation surface
    /// * `surface_config` - Configuration for the presentation surface
    /// * `device` - The GPU device
    /// * `queue` - The GPU command queue
    /// * `raytrace_shader_string` - WGSL source of the compute shader
    /// * `blit_shader_string` - WGSL source of the blit shader
    /// * `terrain_image` - Decoded terrain material pixels
    ///
    /// # Returns
    ///
    /// A fully initialized `EngineState`, or the first fatal shader
    /// validation error.
    pub fn new(
        surface: Surface<'static>,
        surface_config: SurfaceConfiguration,
        device: Device,
        queue: Queue,
        raytrace_shader_string: String,
        blit_shader_string: String,
        terrain_image: RgbaImage,
    ) -> Result<Self, AssetError> {
        let mut buffer_state = buffer_state::BufferState::new(device.clone(), queue.clone());

        let generator = WorldGenerator::new(
            (WORLD_SIZE_X, WORLD_SIZE_Y, WORLD_SIZE_Z),
            SEA_LEVEL,
            NoiseParams::default(),
        );
        let grid = generator.generate();
        info!(
            "Generated {}x{}x{} voxel world ({} cells)",
            WORLD_SIZE_X,
            WORLD_SIZE_Y,
            WORLD_SIZE_Z,
            grid.len()
        );

        buffer_state.create_buffer_init(
            VOXEL_BUFFER_NAME,
            wgpu::util::BufferInitDescriptor {
                label: Some(VOXEL_BUFFER_NAME),
                contents: bytemuck::cast_slice(grid.codes()),
                usage: wgpu::BufferUsages::STORAGE,
            },
        );
        // The upload above is the last read of the host copy; `grid` drops
        // at the end of this scope.

        let camera_state = CameraState::new(&mut buffer_state);
        let sun_light = SunLight::new();

        let renderer = RaytraceRenderer::new(
            surface,
            surface_config,
            device,
            queue,
            raytrace_shader_string,
            blit_shader_string,
            terrain_image,
            &mut buffer_state,
        )?;

        Ok(Self {
            camera_state,
            sun_light,
            player_actions: PlayerAction::default(),
            buffer_state,
            renderer,
            frames_this_second: 0,
            fps_timer: web_time::Instant::now(),
        })
    }

    /// Resizes the presentation surface when the window size changes.
    ///
    /// # Arguments
    ///
    /// * `size` - The new physical size of the window
    pub fn resize_surface(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        self.renderer.resize_surface(size);
    }

    /// Renders the current frame and updates the FPS counter.
    pub fn render(&mut self) {
        self.renderer.render(&self.buffer_state);

        self.frames_this_second += 1;
        if self.fps_timer.elapsed().as_secs_f64() > 1.0 {
            info!("FPS: {}", self.frames_this_second);
            self.frames_this_second = 0;
            self.fps_timer = web_time::Instant::now();
        }
    }

    /// Processes input and updates the camera and sun state.
    ///
    /// The frame uniforms are rewritten here from the post-update camera
    /// rotation, so the transform consumed by the next dispatch always
    /// belongs to the frame being rendered.
    ///
    /// # Arguments
    ///
    /// * `wait_duration` - The time elapsed since the last frame
    pub fn process_input(&mut self, wait_duration: web_time::Duration) {
        if self.player_actions.advance_sun {
            self.sun_light.advance();
        }
        if self.player_actions.retreat_sun {
            self.sun_light.retreat();
        }

        self.camera_state.update(
            &self.player_actions,
            wait_duration,
            self.sun_light.direction(),
            (RENDER_WIDTH, RENDER_HEIGHT),
            &self.buffer_state,
        );
    }

    /// Sets the input commands for the engine state.
    ///
    /// # Arguments
    /// * `input` - The processed input state to translate into actions
    pub fn set_input_commands(&mut self, input: ProcessedInputState) {
        self.player_actions = Self::translate_processed_input(input);
    }

    /// Translates the processed input state into player actions.
    ///
    /// # Arguments
    /// * `input` - The processed input state to translate
    ///
    /// # Returns
    /// A PlayerAction struct with the appropriate actions set
    fn translate_processed_input(input: ProcessedInputState) -> PlayerAction {
        let mut player_action = PlayerAction::default();

        // Movement actions - active if key is pressed or held
        player_action.move_forward = input.get_key_state(KeyCode::KeyW).is_active();
        player_action.move_backward = input.get_key_state(KeyCode::KeyS).is_active();
        player_action.move_left = input.get_key_state(KeyCode::KeyA).is_active();
        player_action.move_right = input.get_key_state(KeyCode::KeyD).is_active();
        player_action.move_up = input.get_key_state(KeyCode::Space).is_active();
        player_action.move_down = input.get_key_state(KeyCode::ShiftLeft).is_active();

        player_action.speed_boost = input.get_key_state(KeyCode::ControlLeft).is_active();

        // The sun steps once per frame for as long as a key is held
        player_action.advance_sun = input.get_key_state(KeyCode::NumpadAdd).is_active();
        player_action.retreat_sun = input.get_key_state(KeyCode::NumpadSubtract).is_active();

        player_action.rotate_view = input.pointer_delta;

        player_action
    }
}

/// Represents player actions derived from input
///
/// This struct contains flags for the movement and light-control actions
/// the demo supports, plus the pointer displacement driving the view
/// rotation.
#[derive(Default)]
pub struct PlayerAction {
    /// Movement actions - true if the key is pressed or held
    move_forward: bool,
    move_backward: bool,
    move_left: bool,
    move_right: bool,
    move_up: bool,
    move_down: bool,

    /// Whether the speed modifier key is held
    speed_boost: bool,

    /// Whether the sun-time advance/retreat keys are held
    advance_sun: bool,
    retreat_sun: bool,

    /// View rotation - Some if the pointer moved this frame
    rotate_view: Option<(f64, f64)>,
}
