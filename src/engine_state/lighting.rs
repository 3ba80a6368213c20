//! # Sun Lighting
//!
//! The demo's single directional light. The direction swings through a
//! vertical circle driven by a scalar time parameter that discrete user
//! actions step forward and backward; it is independent of the frame
//! clock, so the sun only moves while a key is held.

use cgmath::Vector3;

/// Time step applied per frame while an advance/retreat key is held.
const LIGHT_TIME_STEP: f32 = 0.01;

/// The sun's direction, parameterized by a user-controlled time scalar.
#[derive(Debug)]
pub struct SunLight {
    time: f32,
}

impl SunLight {
    /// Creates a sun at time zero, pointing along positive Z.
    pub fn new() -> Self {
        Self { time: 0.0 }
    }

    /// The current light direction, `(0, sin t, cos t)`.
    ///
    /// Unit-length by construction; the vector swings through the YZ plane
    /// as time advances.
    pub fn direction(&self) -> Vector3<f32> {
        Vector3::new(0.0, self.time.sin(), self.time.cos())
    }

    /// Steps the time parameter forward.
    pub fn advance(&mut self) {
        self.time += LIGHT_TIME_STEP;
    }

    /// Steps the time parameter backward.
    pub fn retreat(&mut self) {
        self.time -= LIGHT_TIME_STEP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn initial_direction_points_along_positive_z() {
        let sun = SunLight::new();
        let dir = sun.direction();
        assert!((dir.x - 0.0).abs() < EPSILON);
        assert!((dir.y - 0.0).abs() < EPSILON);
        assert!((dir.z - 1.0).abs() < EPSILON);
    }

    #[test]
    fn direction_stays_unit_length_as_time_moves() {
        let mut sun = SunLight::new();
        for _ in 0..500 {
            sun.advance();
        }
        assert!((sun.direction().magnitude() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn retreat_undoes_advance() {
        let mut sun = SunLight::new();
        let initial = sun.direction();

        sun.advance();
        sun.advance();
        sun.retreat();
        sun.retreat();

        let returned = sun.direction();
        assert!((initial.y - returned.y).abs() < 1e-5);
        assert!((initial.z - returned.z).abs() < 1e-5);
    }
}
