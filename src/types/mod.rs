//! Shared types used throughout the library.

mod number;

pub use number::{Fixed, Scalar, Scalars, Srgb};

use glam::{Mat4, Vec3, Vec4};

/// Linear RGB color.
pub type Color = [f32; 3];

/// A 4×4 object transform, stored column-major with the translation in the
/// last column (the host's native layout).
pub type MatrixCols = [[f32; 4]; 4];

/// Identity transform in column-major layout.
pub const IDENTITY: MatrixCols = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// World transform of an object with helpers for the points and directions
/// the emitters need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Mat4,
}

impl Transform {
    pub fn from_cols(cols: &MatrixCols) -> Self {
        Self {
            matrix: Mat4::from_cols_array_2d(cols),
        }
    }

    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Transform a point given in the object's local frame.
    pub fn point(&self, local: [f32; 3]) -> [f32; 3] {
        self.matrix.transform_point3(Vec3::from(local)).to_array()
    }

    /// Transform a direction (w = 0), without normalizing.
    pub fn direction(&self, local: [f32; 3]) -> [f32; 3] {
        (self.matrix * Vec4::new(local[0], local[1], local[2], 0.0))
            .truncate()
            .to_array()
    }

    /// Transform a surface normal with the inverse-transpose and renormalize.
    pub fn normal(&self, local: [f32; 3]) -> [f32; 3] {
        let normal_matrix = self.matrix.inverse().transpose();
        let n = (normal_matrix * Vec4::new(local[0], local[1], local[2], 0.0)).truncate();
        n.normalize_or_zero().to_array()
    }

    /// First three entries of the inverse's third row. For a rigid transform
    /// this is the world-space local +Z axis, which a sun lamp faces away from.
    pub fn inverse_z_row(&self) -> [f32; 3] {
        self.matrix.inverse().row(2).truncate().to_array()
    }

    /// All sixteen entries, column by column.
    pub fn to_cols_array(&self) -> [f32; 16] {
        self.matrix.to_cols_array()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_cols(&IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translation(x: f32, y: f32, z: f32) -> MatrixCols {
        let mut m = IDENTITY;
        m[3] = [x, y, z, 1.0];
        m
    }

    #[test]
    fn test_point_applies_translation() {
        let t = Transform::from_cols(&translation(1.0, 2.0, 3.0));
        assert_eq!(t.point([0.0, 0.0, 0.0]), [1.0, 2.0, 3.0]);
        assert_eq!(t.point([1.0, 0.0, -1.0]), [2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_direction_ignores_translation() {
        let t = Transform::from_cols(&translation(5.0, 5.0, 5.0));
        assert_eq!(t.direction([0.0, 1.0, 0.0]), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_normal_under_non_uniform_scale() {
        let mut m = IDENTITY;
        m[0][0] = 2.0;
        let t = Transform::from_cols(&m);
        let n = t.normal([1.0, 1.0, 0.0]);
        // Inverse-transpose halves x before renormalizing.
        let expected = Vec3::new(0.5, 1.0, 0.0).normalize();
        assert!((Vec3::from(n) - expected).length() < 1e-6);
    }

    #[test]
    fn test_cols_array_order() {
        let t = Transform::from_cols(&translation(7.0, 8.0, 9.0));
        let cols = t.to_cols_array();
        assert_eq!(&cols[12..16], &[7.0, 8.0, 9.0, 1.0]);
    }
}
