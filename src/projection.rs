//! Perspective projection parameters.
//!
//! The [`Projection`] struct holds the lens parameters (vertical FOV and the
//! near/far planes). The aspect ratio is not stored: it always comes from the
//! surface the device renders to.

use crate::math::mat4::Mat4;

/// Vertical field of view used when nothing else is configured, in radians.
pub const DEFAULT_FOV_Y: f32 = 0.78;
pub const DEFAULT_Z_NEAR: f32 = 0.01;
pub const DEFAULT_Z_FAR: f32 = 1.0;

/// Perspective projection parameters.
///
/// The defaults keep a very short depth range (0.01 to 1.0). Nothing is clipped
/// against these planes, so geometry outside that range still projects
/// correctly on x/y; only the NDC depth leaves `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    fov_y: f32,
    /// Near clipping plane distance.
    z_near: f32,
    /// Far clipping plane distance.
    z_far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(DEFAULT_FOV_Y, DEFAULT_Z_NEAR, DEFAULT_Z_FAR)
    }
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `z_near` - Near clipping plane distance (must be > 0)
    /// * `z_far` - Far clipping plane distance (must differ from z_near)
    pub fn new(fov_y: f32, z_near: f32, z_far: f32) -> Self {
        debug_assert!(z_near > 0.0, "near plane must be positive, got {z_near}");
        debug_assert!(z_near != z_far, "near and far planes must differ");
        Self {
            fov_y,
            z_near,
            z_far,
        }
    }

    /// Creates a projection from degrees instead of radians.
    pub fn from_degrees(fov_y_degrees: f32, z_near: f32, z_far: f32) -> Self {
        Self::new(fov_y_degrees.to_radians(), z_near, z_far)
    }

    /// Returns the vertical field of view in radians.
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Returns the horizontal field of view in radians for `aspect_ratio`.
    pub fn fov_x(&self, aspect_ratio: f32) -> f32 {
        2.0 * (aspect_ratio * (self.fov_y / 2.0).tan()).atan()
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// Generates the left-handed perspective projection matrix.
    pub fn matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_fov_lh(self.fov_y, aspect_ratio, self.z_near, self.z_far)
    }
}
