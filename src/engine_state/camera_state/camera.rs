//! # Camera
//!
//! The first-person camera pose, the movement and rotation integration
//! that player actions drive, and the packed per-frame uniform struct
//! handed to the compute shader.
//!
//! ## Conventions
//!
//! The camera stores its rotation as a `(yaw, pitch)` pair in radians, roll
//! fixed at zero. The orientation transform is rebuilt from that pair on
//! every update; it is never cached across frames, so the matrix consumed
//! by a dispatch always reflects the rotation of the frame being rendered.

use cgmath::{Matrix4, Point3, Rad, SquareMatrix, Vector2, Vector3};
use web_time::Duration;

use crate::engine_state::PlayerAction;

/// Pointer-to-rotation sensitivity, radians per pixel per second.
pub const MOUSE_SENSITIVITY: f32 = 0.1;
/// Base movement speed in world units per second.
pub const BASE_SPEED: f32 = 20.0;
/// Movement speed while the speed modifier key is held.
pub const BOOST_SPEED: f32 = 50.0;

/// Represents the first-person camera pose in world space.
///
/// # Fields
/// - `position`: The camera's position in world units
/// - `rotation`: `(yaw, pitch)` in radians; yaw about world Y, pitch about X
#[derive(Debug)]
pub struct Camera {
    /// The camera's position in world space
    pub position: Point3<f32>,
    /// `(yaw, pitch)` rotation in radians
    pub rotation: Vector2<f32>,
}

impl Camera {
    /// Creates a new camera with the specified pose.
    ///
    /// # Arguments
    /// * `position` - Initial position in world units
    /// * `rotation` - Initial `(yaw, pitch)` in radians
    pub fn new(position: Point3<f32>, rotation: Vector2<f32>) -> Self {
        Self { position, rotation }
    }

    /// Builds the orientation transform for the current rotation.
    ///
    /// The transform composes pitch about X first, then yaw about Y, with
    /// roll fixed at zero. It is derived fresh on every call.
    pub fn rotation_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_angle_y(Rad(self.rotation.x)) * Matrix4::from_angle_x(Rad(self.rotation.y))
    }

    /// Planar forward direction for a given yaw, before speed scaling.
    ///
    /// Forward movement is this vector times `-speed`.
    pub fn planar_forward(yaw: f32) -> Vector3<f32> {
        Vector3::new(yaw.sin(), 0.0, yaw.cos())
    }

    /// Planar strafe-right direction for a given yaw, before speed scaling.
    pub fn planar_right(yaw: f32) -> Vector3<f32> {
        Vector3::new(yaw.cos(), 0.0, -yaw.sin())
    }

    /// Integrates one frame of player input into the camera pose.
    ///
    /// Rotation accumulates the pointer displacement scaled by sensitivity
    /// and elapsed time; translation moves along the yaw-derived planar
    /// vectors, with vertical movement along world up only. Neither the
    /// position nor the rotation is clamped.
    ///
    /// # Arguments
    /// * `actions` - The player's input actions for this frame
    /// * `dt` - Time elapsed since the last update
    pub fn apply_actions(&mut self, actions: &PlayerAction, dt: Duration) {
        let dt = dt.as_secs_f32();

        if let Some((delta_x, delta_y)) = actions.rotate_view {
            self.rotation.x += delta_x as f32 * MOUSE_SENSITIVITY * dt;
            self.rotation.y += delta_y as f32 * MOUSE_SENSITIVITY * dt;
        }

        let speed = if actions.speed_boost {
            BOOST_SPEED * dt
        } else {
            BASE_SPEED * dt
        };

        let yaw = self.rotation.x;

        if actions.move_forward {
            self.position += Self::planar_forward(yaw) * -speed;
        }
        if actions.move_backward {
            self.position += Self::planar_forward(yaw) * speed;
        }
        if actions.move_right {
            self.position += Self::planar_right(yaw) * speed;
        }
        if actions.move_left {
            self.position += Self::planar_right(yaw) * -speed;
        }
        if actions.move_up {
            self.position.y += speed;
        }
        if actions.move_down {
            self.position.y -= speed;
        }
    }
}

/// GPU-friendly representation of the per-frame inputs for the compute shader.
///
/// The layout matches the WGSL uniform block: a 4x4 orientation matrix,
/// camera position and light direction padded to vec4, and the screen size
/// padded out to a 16-byte boundary.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    // cgmath matrices are not Pod, so the Matrix4 is stored as a 4x4 f32 array
    camera_matrix: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    light_dir: [f32; 4],
    screen_size: [f32; 2],
    _padding: [f32; 2],
}

impl FrameUniform {
    /// Creates a new frame uniform with an identity transform.
    pub fn new() -> Self {
        Self {
            camera_matrix: Matrix4::identity().into(),
            camera_pos: [0.0, 0.0, 0.0, 0.0],
            light_dir: [0.0, 0.0, 1.0, 0.0],
            screen_size: [0.0, 0.0],
            _padding: [0.0, 0.0],
        }
    }

    /// Repacks the uniform from the current frame's camera and light state.
    ///
    /// # Arguments
    /// * `camera` - The camera to take the orientation and position from
    /// * `light_dir` - The current sun direction
    /// * `screen_size` - The render resolution in pixels
    pub fn update(&mut self, camera: &Camera, light_dir: Vector3<f32>, screen_size: (u32, u32)) {
        self.camera_matrix = camera.rotation_matrix().into();
        let pos: [f32; 3] = camera.position.into();
        self.camera_pos = [pos[0], pos[1], pos[2], 0.0];
        self.light_dir = [light_dir.x, light_dir.y, light_dir.z, 0.0];
        self.screen_size = [screen_size.0 as f32, screen_size.1 as f32];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn camera_at_origin() -> Camera {
        Camera::new(Point3::new(0.0, 0.0, 0.0), Vector2::new(0.0, 0.0))
    }

    fn assert_vec3_eq(actual: Vector3<f32>, expected: Vector3<f32>) {
        assert!(
            (actual.x - expected.x).abs() < EPSILON
                && (actual.y - expected.y).abs() < EPSILON
                && (actual.z - expected.z).abs() < EPSILON,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn forward_at_zero_yaw_moves_along_negative_z() {
        let mut camera = camera_at_origin();
        let actions = PlayerAction {
            move_forward: true,
            ..Default::default()
        };

        camera.apply_actions(&actions, Duration::from_secs(1));
        assert_vec3_eq(
            camera.position - Point3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, -BASE_SPEED),
        );
    }

    #[test]
    fn backward_at_zero_yaw_moves_along_positive_z() {
        let mut camera = camera_at_origin();
        let actions = PlayerAction {
            move_backward: true,
            ..Default::default()
        };

        camera.apply_actions(&actions, Duration::from_secs(1));
        assert_vec3_eq(
            camera.position - Point3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, BASE_SPEED),
        );
    }

    #[test]
    fn strafe_right_at_zero_yaw_moves_along_positive_x() {
        let mut camera = camera_at_origin();
        let actions = PlayerAction {
            move_right: true,
            ..Default::default()
        };

        camera.apply_actions(&actions, Duration::from_secs(1));
        assert_vec3_eq(
            camera.position - Point3::new(0.0, 0.0, 0.0),
            Vector3::new(BASE_SPEED, 0.0, 0.0),
        );
    }

    #[test]
    fn strafe_left_is_the_negation_of_strafe_right() {
        let mut camera = camera_at_origin();
        let actions = PlayerAction {
            move_left: true,
            ..Default::default()
        };

        camera.apply_actions(&actions, Duration::from_secs(1));
        assert_vec3_eq(
            camera.position - Point3::new(0.0, 0.0, 0.0),
            Vector3::new(-BASE_SPEED, 0.0, 0.0),
        );
    }

    #[test]
    fn vertical_movement_ignores_yaw() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Vector2::new(1.3, 0.0));
        let up = PlayerAction {
            move_up: true,
            ..Default::default()
        };
        let down = PlayerAction {
            move_down: true,
            ..Default::default()
        };

        camera.apply_actions(&up, Duration::from_secs(1));
        assert_vec3_eq(
            camera.position - Point3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, BASE_SPEED, 0.0),
        );

        camera.apply_actions(&down, Duration::from_secs(1));
        assert_vec3_eq(
            camera.position - Point3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 0.0),
        );
    }

    #[test]
    fn speed_modifier_uses_the_boosted_speed() {
        let mut camera = camera_at_origin();
        let actions = PlayerAction {
            move_forward: true,
            speed_boost: true,
            ..Default::default()
        };

        camera.apply_actions(&actions, Duration::from_secs(1));
        assert_vec3_eq(
            camera.position - Point3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, -BOOST_SPEED),
        );
    }

    #[test]
    fn rotation_accumulation_is_additive() {
        let deltas = [(3.0, -1.5), (0.5, 2.0)];

        let mut sequential = camera_at_origin();
        for delta in deltas {
            let actions = PlayerAction {
                rotate_view: Some(delta),
                ..Default::default()
            };
            sequential.apply_actions(&actions, Duration::from_secs(1));
        }

        let mut combined = camera_at_origin();
        let actions = PlayerAction {
            rotate_view: Some((deltas[0].0 + deltas[1].0, deltas[0].1 + deltas[1].1)),
            ..Default::default()
        };
        combined.apply_actions(&actions, Duration::from_secs(1));

        assert!((sequential.rotation.x - combined.rotation.x).abs() < EPSILON);
        assert!((sequential.rotation.y - combined.rotation.y).abs() < EPSILON);
    }

    #[test]
    fn rotation_matrix_reflects_the_current_yaw() {
        let mut camera = camera_at_origin();
        let forward = Vector3::new(0.0, 0.0, -1.0);

        let identity_forward = camera.rotation_matrix() * forward.extend(0.0);
        assert_vec3_eq(identity_forward.truncate(), forward);

        camera.rotation = Vector2::new(std::f32::consts::FRAC_PI_2, 0.0);
        let rotated_forward = camera.rotation_matrix() * forward.extend(0.0);
        assert_vec3_eq(rotated_forward.truncate(), Vector3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn frame_uniform_layout_is_std140_compatible() {
        assert_eq!(std::mem::size_of::<FrameUniform>(), 112);
        assert_eq!(std::mem::align_of::<FrameUniform>() % 4, 0);
    }
}
