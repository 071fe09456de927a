//! 4x4 transformation matrix using the row-vector convention.
//!
//! # Convention
//! - Vectors are **row vectors** on the left: `v * M`
//! - Translation is stored in the **last row**
//! - Transforms chain **left-to-right**: `A * B` applies A first, then B
//! - Handedness is **left-handed**: +x right, +y up, +z into the screen
//!
//! # Example
//! ```ignore
//! let world = Mat4::rotation_yaw_pitch_roll(yaw, pitch, roll) * Mat4::translation(x, y, z);
//! let combined = world * view * projection;   // world applied first
//! let ndc = Mat4::transform_coordinates(vertex, &combined);
//! ```

use std::ops::Mul;

use super::vec3::Vec3;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix. The offset lives in the last row.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [x, y, z, 1.0],
        ])
    }

    /// Creates a rotation matrix around the X axis.
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Y axis.
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Z axis.
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation from Euler angles.
    ///
    /// Roll (Z) is applied first, then pitch (X), then yaw (Y).
    pub fn rotation_yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Self {
        Mat4::rotation_z(roll) * Mat4::rotation_x(pitch) * Mat4::rotation_y(yaw)
    }

    /// Creates a left-handed perspective projection.
    ///
    /// View-space depth `near` maps to NDC z = 0 and `far` to NDC z = 1.
    /// The view-space z ends up in w, so [`Mat4::transform_coordinates`]
    /// performs the perspective divide.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect_ratio` - Width divided by height
    /// * `near`, `far` - Clip plane distances
    pub fn perspective_fov_lh(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let focal = 1.0 / (fov_y * 0.5).tan();
        Mat4::new([
            [focal / aspect_ratio, 0.0, 0.0, 0.0],
            [0.0, focal, 0.0, 0.0],
            [0.0, 0.0, -far / (near - far), 1.0],
            [0.0, 0.0, (near * far) / (near - far), 0.0],
        ])
    }

    /// Creates a view matrix with left-handed coordinate system.
    ///
    /// # Arguments
    ///
    /// * `eye` - The position of the camera.
    /// * `target` - The point the camera is looking at.
    /// * `up` - The up direction of the camera.
    ///
    /// When `up` is parallel to the viewing direction the right axis falls
    /// back to +X.
    pub fn look_at_lh(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - eye).normalize();
        let mut right = up.cross(forward).normalize();
        if right.length() == 0.0 {
            right = Vec3::new(1.0, 0.0, 0.0);
        }
        let up = forward.cross(right).normalize();

        // Basis vectors as columns, eye offset in the last row.
        Self::new([
            [right.x, up.x, forward.x, 0.0],
            [right.y, up.y, forward.y, 0.0],
            [right.z, up.z, forward.z, 0.0],
            [-right.dot(eye), -up.dot(eye), -forward.dot(eye), 1.0],
        ])
    }

    /// Transforms a point (w = 1) by `matrix` and divides by the resulting w.
    ///
    /// A resulting w of exactly zero yields non-finite coordinates; callers
    /// that rasterize the result must reject them.
    pub fn transform_coordinates(point: Vec3, matrix: &Mat4) -> Vec3 {
        let m = &matrix.data;
        let x = point.x * m[0][0] + point.y * m[1][0] + point.z * m[2][0] + m[3][0];
        let y = point.x * m[0][1] + point.y * m[1][1] + point.z * m[2][1] + m[3][1];
        let z = point.x * m[0][2] + point.y * m[1][2] + point.z * m[2][2] + m[3][2];
        let w = point.x * m[0][3] + point.y * m[1][3] + point.z * m[2][3] + m[3][3];

        Vec3::new(x / w, y / w, z / w)
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// For the row-vector convention, `v * (A * B)` applies A first, then B.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, out) in result.iter_mut().enumerate() {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn assert_vec3_eq(actual: Vec3, expected: Vec3) {
        assert_relative_eq!(actual.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(actual.y, expected.y, epsilon = 1e-5);
        assert_relative_eq!(actual.z, expected.z, epsilon = 1e-5);
    }

    #[test]
    fn translation_moves_point() {
        let m = Mat4::translation(1.0, -2.0, 3.0);
        let p = Mat4::transform_coordinates(Vec3::new(1.0, 1.0, 1.0), &m);
        assert_vec3_eq(p, Vec3::new(2.0, -1.0, 4.0));
    }

    #[test]
    fn identity_is_neutral_for_multiplication() {
        let m = Mat4::rotation_x(0.3) * Mat4::translation(1.0, 2.0, 3.0);
        assert_eq!(m * Mat4::identity(), m);
        assert_eq!(Mat4::identity() * m, m);
    }

    #[test]
    fn rotation_y_quarter_turn() {
        let p = Mat4::transform_coordinates(Vec3::new(1.0, 0.0, 0.0), &Mat4::rotation_y(FRAC_PI_2));
        assert_vec3_eq(p, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn yaw_pitch_roll_with_only_yaw_matches_rotation_y() {
        let a = Mat4::rotation_yaw_pitch_roll(0.7, 0.0, 0.0);
        let b = Mat4::rotation_y(0.7);
        for row in 0..4 {
            for col in 0..4 {
                assert_relative_eq!(a.get(row, col), b.get(row, col), epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn rotation_is_applied_before_translation() {
        let world = Mat4::rotation_y(FRAC_PI_2) * Mat4::translation(5.0, 0.0, 0.0);
        let p = Mat4::transform_coordinates(Vec3::new(1.0, 0.0, 0.0), &world);
        assert_vec3_eq(p, Vec3::new(5.0, 0.0, -1.0));
    }

    #[test]
    fn look_at_places_target_in_front() {
        let view = Mat4::look_at_lh(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::UP);
        let origin = Mat4::transform_coordinates(Vec3::ZERO, &view);
        assert_vec3_eq(origin, Vec3::new(0.0, 0.0, 10.0));

        // Looking down -Z in a left-handed system mirrors world +X to view -X.
        let right = Mat4::transform_coordinates(Vec3::new(1.0, 0.0, 0.0), &view);
        assert_vec3_eq(right, Vec3::new(-1.0, 0.0, 10.0));
    }

    #[test]
    fn look_at_with_parallel_up_stays_finite() {
        let view = Mat4::look_at_lh(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, Vec3::UP);
        let p = Mat4::transform_coordinates(Vec3::new(1.0, 1.0, 1.0), &view);
        assert!(p.x.is_finite() && p.y.is_finite() && p.z.is_finite());
    }

    #[test]
    fn perspective_maps_near_and_far_to_unit_depth() {
        let proj = Mat4::perspective_fov_lh(0.78, 1.0, 0.5, 4.0);
        let near = Mat4::transform_coordinates(Vec3::new(0.0, 0.0, 0.5), &proj);
        let far = Mat4::transform_coordinates(Vec3::new(0.0, 0.0, 4.0), &proj);
        assert_relative_eq!(near.z, 0.0, epsilon = 1e-6);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn perspective_divides_by_depth() {
        let proj = Mat4::perspective_fov_lh(FRAC_PI_2, 2.0, 0.1, 100.0);
        // tan(45 deg) = 1, so x is scaled by 1 / aspect then divided by z.
        let p = Mat4::transform_coordinates(Vec3::new(4.0, 2.0, 2.0), &proj);
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-5);
    }
}
