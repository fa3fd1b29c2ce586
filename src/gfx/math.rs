//! # Matrix Utilities
//!
//! The fixed set of matrix operations the pipeline needs, kept in-crate.
//!
//! Conventions:
//! - [`Mat3`] is stored **row major** (`rows[r][c]`) and multiplies column
//!   vectors: `p' = M · p`.
//! - [`Mat4`] is stored **column major** as a flat `[f32; 16]`
//!   (`m[col * 4 + row]`), which is the layout WGSL expects for `mat4x4<f32>`.
//! - Euler angles are in **degrees**; incremental world rotations are in
//!   **radians**.

use crate::gfx::geometry::Point3;

/// 3×3 matrix, row major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    pub rows: [[f32; 3]; 3],
}

impl Mat3 {
    pub const IDENTITY: Mat3 = Mat3 {
        rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Rotation from intrinsic yaw (Z), pitch (Y), roll (X) Euler angles in
    /// degrees, `R = Rz(alpha) · Ry(beta) · Rx(gamma)` with
    /// `alpha = euler.z`, `beta = euler.y`, `gamma = euler.x`.
    pub fn from_euler_degrees(euler: Point3) -> Mat3 {
        let (sin_gamma, cos_gamma) = euler.x.to_radians().sin_cos();
        let (sin_beta, cos_beta) = euler.y.to_radians().sin_cos();
        let (sin_alpha, cos_alpha) = euler.z.to_radians().sin_cos();

        Mat3 {
            rows: [
                [
                    cos_alpha * cos_beta,
                    cos_alpha * sin_beta * sin_gamma - sin_alpha * cos_gamma,
                    cos_alpha * sin_beta * cos_gamma + sin_alpha * sin_gamma,
                ],
                [
                    sin_alpha * cos_beta,
                    sin_alpha * sin_beta * sin_gamma + cos_alpha * cos_gamma,
                    sin_alpha * sin_beta * cos_gamma - cos_alpha * sin_gamma,
                ],
                [-sin_beta, cos_beta * sin_gamma, cos_beta * cos_gamma],
            ],
        }
    }

    /// `M · p`
    pub fn transform(&self, p: Point3) -> Point3 {
        let r = &self.rows;
        Point3::new(
            r[0][0] * p.x + r[0][1] * p.y + r[0][2] * p.z,
            r[1][0] * p.x + r[1][1] * p.y + r[1][2] * p.z,
            r[2][0] * p.x + r[2][1] * p.y + r[2][2] * p.z,
        )
    }

    pub fn transpose(&self) -> Mat3 {
        let r = &self.rows;
        Mat3 {
            rows: [
                [r[0][0], r[1][0], r[2][0]],
                [r[0][1], r[1][1], r[2][1]],
                [r[0][2], r[1][2], r[2][2]],
            ],
        }
    }

    pub fn determinant(&self) -> f32 {
        let r = &self.rows;
        r[0][0] * (r[1][1] * r[2][2] - r[1][2] * r[2][1])
            - r[0][1] * (r[1][0] * r[2][2] - r[1][2] * r[2][0])
            + r[0][2] * (r[1][0] * r[2][1] - r[1][1] * r[2][0])
    }

    /// Inverse via the adjugate, `None` for a singular matrix.
    pub fn inverse(&self) -> Option<Mat3> {
        let det = self.determinant();
        if det.abs() <= f32::EPSILON {
            return None;
        }
        let r = &self.rows;
        let inv_det = 1.0 / det;
        Some(Mat3 {
            rows: [
                [
                    (r[1][1] * r[2][2] - r[1][2] * r[2][1]) * inv_det,
                    (r[0][2] * r[2][1] - r[0][1] * r[2][2]) * inv_det,
                    (r[0][1] * r[1][2] - r[0][2] * r[1][1]) * inv_det,
                ],
                [
                    (r[1][2] * r[2][0] - r[1][0] * r[2][2]) * inv_det,
                    (r[0][0] * r[2][2] - r[0][2] * r[2][0]) * inv_det,
                    (r[0][2] * r[1][0] - r[0][0] * r[1][2]) * inv_det,
                ],
                [
                    (r[1][0] * r[2][1] - r[1][1] * r[2][0]) * inv_det,
                    (r[0][1] * r[2][0] - r[0][0] * r[2][1]) * inv_det,
                    (r[0][0] * r[1][1] - r[0][1] * r[1][0]) * inv_det,
                ],
            ],
        })
    }

    /// Columns padded to 16 bytes each, the std140 layout of `mat3x3<f32>`.
    pub fn to_padded_columns(&self) -> [[f32; 4]; 3] {
        let r = &self.rows;
        [
            [r[0][0], r[1][0], r[2][0], 0.0],
            [r[0][1], r[1][1], r[2][1], 0.0],
            [r[0][2], r[1][2], r[2][2], 0.0],
        ]
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Mat3::IDENTITY
    }
}

/// 4×4 matrix, column major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4(pub [f32; 16]);

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// Element at `row`, `col`.
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.0[col * 4 + row]
    }

    /// Perspective projection with the canvas-era scaling: half-unit x/y
    /// extents at `tan(fov/2)`, depth mapped from `[z_min, z_max]`.
    pub fn projection(fov_degrees: f32, z_min: f32, z_max: f32, aspect: f32) -> Mat4 {
        let ang = (fov_degrees * 0.5).to_radians().tan();
        Mat4([
            0.5 / ang,
            0.0,
            0.0,
            0.0,
            0.0,
            0.5 * aspect / ang,
            0.0,
            0.0,
            0.0,
            0.0,
            -(z_max + z_min) / (z_max - z_min),
            -1.0,
            0.0,
            0.0,
            (-2.0 * z_max * z_min) / (z_max - z_min),
            0.0,
        ])
    }

    /// Right-handed view matrix looking from `eye` at `center`.
    ///
    /// Returns the identity when `eye` and `center` coincide.
    pub fn look_at(eye: Point3, center: Point3, up: Point3) -> Mat4 {
        let forward = eye - center;
        let Some(z) = normalized(forward) else {
            return Mat4::IDENTITY;
        };
        let x = normalized(up.cross(z)).unwrap_or(Point3::ZERO);
        let y = z.cross(x);

        Mat4([
            x.x,
            y.x,
            z.x,
            0.0,
            x.y,
            y.y,
            z.y,
            0.0,
            x.z,
            y.z,
            z.z,
            0.0,
            -x.dot(eye),
            -y.dot(eye),
            -z.dot(eye),
            1.0,
        ])
    }

    /// Rotates in place about the X axis: `M ← Rx(radians) · M` on the
    /// upper 3×3 block.
    pub fn rotate_x(&mut self, radians: f32) {
        let (s, c) = radians.sin_cos();
        let m = &mut self.0;
        for col in [0, 4, 8] {
            let y = m[col + 1];
            let z = m[col + 2];
            m[col + 1] = y * c - z * s;
            m[col + 2] = z * c + y * s;
        }
    }

    /// Rotates in place about the Y axis on the upper 3×3 block.
    pub fn rotate_y(&mut self, radians: f32) {
        let (s, c) = radians.sin_cos();
        let m = &mut self.0;
        for col in [0, 4, 8] {
            let x = m[col];
            let z = m[col + 2];
            m[col] = c * x + s * z;
            m[col + 2] = c * z - s * x;
        }
    }

    /// Rotates in place about the Z axis on the upper 3×3 block.
    pub fn rotate_z(&mut self, radians: f32) {
        let (s, c) = radians.sin_cos();
        let m = &mut self.0;
        for col in [0, 4, 8] {
            let x = m[col];
            let y = m[col + 1];
            m[col] = c * x - s * y;
            m[col + 1] = c * y + s * x;
        }
    }

    /// Upper-left 3×3 block.
    pub fn upper_left(&self) -> Mat3 {
        Mat3 {
            rows: [
                [self.at(0, 0), self.at(0, 1), self.at(0, 2)],
                [self.at(1, 0), self.at(1, 1), self.at(1, 2)],
                [self.at(2, 0), self.at(2, 1), self.at(2, 2)],
            ],
        }
    }

    /// Inverse-transpose of the upper-left 3×3, used to rotate normals.
    /// Falls back to the identity for a singular matrix.
    pub fn normal_matrix(&self) -> Mat3 {
        self.upper_left()
            .inverse()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(|| {
                log::warn!("singular world matrix, using identity normal matrix");
                Mat3::IDENTITY
            })
    }

    /// Applies the matrix to a point (w = 1).
    pub fn transform_point(&self, p: Point3) -> Point3 {
        Point3::new(
            self.at(0, 0) * p.x + self.at(0, 1) * p.y + self.at(0, 2) * p.z + self.at(0, 3),
            self.at(1, 0) * p.x + self.at(1, 1) * p.y + self.at(1, 2) * p.z + self.at(1, 3),
            self.at(2, 0) * p.x + self.at(2, 1) * p.y + self.at(2, 2) * p.z + self.at(2, 3),
        )
    }

    /// Columns as nested arrays for uniform upload.
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        let m = &self.0;
        [
            [m[0], m[1], m[2], m[3]],
            [m[4], m[5], m[6], m[7]],
            [m[8], m[9], m[10], m[11]],
            [m[12], m[13], m[14], m[15]],
        ]
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Mat4::IDENTITY
    }
}

fn normalized(v: Point3) -> Option<Point3> {
    let length = v.dot(v).sqrt();
    if length <= f32::EPSILON {
        None
    } else {
        Some(v * (1.0 / length))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_zero_euler_is_identity() {
        assert_eq!(Mat3::from_euler_degrees(Point3::ZERO), Mat3::IDENTITY);
    }

    #[test]
    fn test_yaw_rotates_x_onto_y() {
        let rotation = Mat3::from_euler_degrees(Point3::new(0.0, 0.0, 90.0));
        let p = rotation.transform(Point3::new(1.0, 0.0, 0.0));
        assert!(p.approx_eq(Point3::new(0.0, 1.0, 0.0), EPS));
    }

    #[test]
    fn test_roll_rotates_y_onto_z() {
        let rotation = Mat3::from_euler_degrees(Point3::new(90.0, 0.0, 0.0));
        let p = rotation.transform(Point3::new(0.0, 1.0, 0.0));
        assert!(p.approx_eq(Point3::new(0.0, 0.0, 1.0), EPS));
    }

    #[test]
    fn test_inverse_of_rotation_is_transpose() {
        let rotation = Mat3::from_euler_degrees(Point3::new(-90.0, -45.0, 0.0));
        let inverse = rotation.inverse().expect("rotation is invertible");
        let transpose = rotation.transpose();
        for r in 0..3 {
            for c in 0..3 {
                assert!((inverse.rows[r][c] - transpose.rows[r][c]).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_look_at_default_camera() {
        let view = Mat4::look_at(
            Point3::new(0.0, 0.0, 3.0),
            Point3::ZERO,
            Point3::new(0.0, 1.0, 0.0),
        );
        let origin = view.transform_point(Point3::ZERO);
        assert!(origin.approx_eq(Point3::new(0.0, 0.0, -3.0), EPS));
    }

    #[test]
    fn test_look_at_degenerate_is_identity() {
        let eye = Point3::new(1.0, 1.0, 1.0);
        assert_eq!(Mat4::look_at(eye, eye, Point3::new(0.0, 1.0, 0.0)), Mat4::IDENTITY);
    }

    #[test]
    fn test_projection_layout() {
        let projection = Mat4::projection(45.0, 1.0, 10.0, 1.0);
        let ang = 22.5f32.to_radians().tan();
        assert!((projection.at(0, 0) - 0.5 / ang).abs() < EPS);
        assert_eq!(projection.at(3, 2), -1.0);
        assert!((projection.at(2, 3) - (-20.0 / 9.0)).abs() < EPS);
    }

    #[test]
    fn test_incremental_z_rotation() {
        let mut m = Mat4::IDENTITY;
        m.rotate_z(std::f32::consts::FRAC_PI_2);
        let p = m.transform_point(Point3::new(1.0, 0.0, 0.0));
        assert!(p.approx_eq(Point3::new(0.0, 1.0, 0.0), EPS));
    }

    #[test]
    fn test_normal_matrix_of_rotation_is_rotation() {
        let mut m = Mat4::IDENTITY;
        m.rotate_x(0.3);
        m.rotate_y(-0.7);
        let normal = m.normal_matrix();
        let upper = m.upper_left();
        for r in 0..3 {
            for c in 0..3 {
                assert!((normal.rows[r][c] - upper.rows[r][c]).abs() < EPS);
            }
        }
    }
}
