//! 4x4 affine/projective matrix using the column-vector convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `M * v`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//!
//! Points and directions are transformed by separate methods:
//! [`Mat4::transform_point`] treats the input as `(x, y, z, 1)` and performs the
//! homogeneous divide, [`Mat4::transform_direction`] treats it as `(x, y, z, 0)`
//! so translation does not apply.

use std::ops::Mul;

use super::vec3::Vec3;

/// Pivots smaller than this are treated as zero during inversion.
const SINGULAR_EPSILON: f32 = 1e-8;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
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

    /// Creates a translation matrix.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Builds the affine matrix that maps a local frame into its parent space.
    ///
    /// The three axes become the first three columns and `origin` the
    /// translation column, so `from_basis(x, y, z, o) * (1, 0, 0)` is `o + x`.
    pub fn from_basis(axis_x: Vec3, axis_y: Vec3, axis_z: Vec3, origin: Vec3) -> Self {
        Mat4::new([
            [axis_x.x, axis_y.x, axis_z.x, origin.x],
            [axis_x.y, axis_y.y, axis_z.y, origin.y],
            [axis_x.z, axis_y.z, axis_z.z, origin.z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a right-handed off-center perspective matrix (camera looking
    /// down -Z) from the near-plane window `[left, right] x [bottom, top]`.
    ///
    /// Points inside the frustum land in `[-1, 1]` on every axis after the
    /// homogeneous divide.
    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let width = right - left;
        let height = top - bottom;
        let depth = far - near;
        Mat4::new([
            [2.0 * near / width, 0.0, (right + left) / width, 0.0],
            [0.0, 2.0 * near / height, (top + bottom) / height, 0.0],
            [0.0, 0.0, -(far + near) / depth, -2.0 * far * near / depth],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// Computes the inverse by Gauss-Jordan elimination with partial pivoting.
    /// Returns `None` if the matrix is singular.
    pub fn inverse(&self) -> Option<Mat4> {
        let mut m = self.data;
        let mut inv = Mat4::identity().data;

        for col in 0..4 {
            let pivot_row = (col..4).max_by(|&a, &b| m[a][col].abs().total_cmp(&m[b][col].abs()))?;
            if m[pivot_row][col].abs() < SINGULAR_EPSILON {
                return None;
            }
            m.swap(col, pivot_row);
            inv.swap(col, pivot_row);

            let pivot = m[col][col];
            for k in 0..4 {
                m[col][k] /= pivot;
                inv[col][k] /= pivot;
            }

            for row in 0..4 {
                if row == col {
                    continue;
                }
                let factor = m[row][col];
                if factor == 0.0 {
                    continue;
                }
                for k in 0..4 {
                    m[row][k] -= factor * m[col][k];
                    inv[row][k] -= factor * inv[col][k];
                }
            }
        }

        Some(Mat4::new(inv))
    }

    /// Transforms a point (w = 1), dividing by the resulting w when it is
    /// neither 0 nor 1.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let d = &self.data;
        let x = d[0][0] * p.x + d[0][1] * p.y + d[0][2] * p.z + d[0][3];
        let y = d[1][0] * p.x + d[1][1] * p.y + d[1][2] * p.z + d[1][3];
        let z = d[2][0] * p.x + d[2][1] * p.y + d[2][2] * p.z + d[2][3];
        let w = d[3][0] * p.x + d[3][1] * p.y + d[3][2] * p.z + d[3][3];

        if w != 0.0 && w != 1.0 {
            Vec3::new(x / w, y / w, z / w)
        } else {
            Vec3::new(x, y, z)
        }
    }

    /// Transforms a direction (w = 0): rotation and scale only.
    pub fn transform_direction(&self, v: Vec3) -> Vec3 {
        let d = &self.data;
        Vec3::new(
            d[0][0] * v.x + d[0][1] * v.y + d[0][2] * v.z,
            d[1][0] * v.x + d[1][1] * v.y + d[1][2] * v.z,
            d[2][0] * v.x + d[2][1] * v.y + d[2][2] * v.z,
        )
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// For column-vector convention, `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, out) in result.iter_mut().enumerate() {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.data[row][k] * rhs.data[k][col]).sum();
            }
        }

        Mat4::new(result)
    }
}

/// Shorthand for [`Mat4::transform_point`].
impl Mul<Vec3> for Mat4 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Self::Output {
        self.transform_point(v)
    }
}
