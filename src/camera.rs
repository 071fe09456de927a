//! Look-at camera.
//!
//! # Coordinate System
//!
//! Uses a **left-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive forward (into screen)
//!
//! The camera is plain data owned by the caller. The rasterizer only reads it
//! while rendering; animation (orbiting, dollying) happens between frames.

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

/// A camera defined by an eye position and the point it looks at.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Returns the world-to-view matrix, using +Y as the up direction.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_lh(self.position, self.target, Vec3::UP)
    }

    /// Distance between the eye and the target.
    pub fn distance(&self) -> f32 {
        (self.target - self.position).length()
    }

    /// Orbits the eye around the target about the world Y axis.
    ///
    /// Height above the target and horizontal distance are preserved.
    pub fn orbit_y(&mut self, angle: f32) {
        let offset = self.position - self.target;
        let rotated = Mat4::transform_coordinates(offset, &Mat4::rotation_y(angle));
        self.position = self.target + rotated;
    }

    /// Moves the eye toward (positive) or away from (negative) the target.
    ///
    /// The eye never passes through the target.
    pub fn dolly(&mut self, amount: f32) {
        let offset = self.position - self.target;
        let distance = offset.length();
        if distance == 0.0 {
            return;
        }
        let new_distance = (distance - amount).max(f32::EPSILON);
        self.position = self.target + offset * (new_distance / distance);
    }
}
