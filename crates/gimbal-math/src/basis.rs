// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;
use core::ops::Mul;

use crate::{Quat, Vec3};

/// 3×3 linear map (rotation, optionally combined with scale or shear).
///
/// Stored as three rows. The local axes of the map are the **columns**:
/// `column(0)` is where `+X` ends up, and so on. `Basis * v` dots each row
/// with `v`.
///
/// # Examples
/// ```
/// use gimbal_math::{Basis, Vec3};
/// let b = Basis::from_scale(Vec3::new(1.0, 2.0, 3.0));
/// assert_eq!(b.column(1).to_array(), [0.0, 2.0, 0.0]);
/// assert_eq!(b.determinant(), 6.0);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Basis {
    rows: [Vec3; 3],
}

impl Basis {
    /// The identity map.
    pub const IDENTITY: Self = Self::from_rows(Vec3::UNIT_X, Vec3::UNIT_Y, Vec3::UNIT_Z);

    /// Builds a basis from its three rows.
    pub const fn from_rows(r0: Vec3, r1: Vec3, r2: Vec3) -> Self {
        Self { rows: [r0, r1, r2] }
    }

    /// Builds a basis from its three columns (local X, Y and Z axes).
    pub fn from_columns(x: Vec3, y: Vec3, z: Vec3) -> Self {
        Self::from_rows(
            Vec3::new(x.x(), y.x(), z.x()),
            Vec3::new(x.y(), y.y(), z.y()),
            Vec3::new(x.z(), y.z(), z.z()),
        )
    }

    /// Diagonal scale matrix.
    pub fn from_scale(scale: Vec3) -> Self {
        Self::from_rows(
            Vec3::new(scale.x(), 0.0, 0.0),
            Vec3::new(0.0, scale.y(), 0.0),
            Vec3::new(0.0, 0.0, scale.z()),
        )
    }

    /// Rotation matrix for the (not necessarily unit) quaternion `q`.
    ///
    /// A zero quaternion yields the identity.
    pub fn from_quat(q: &Quat) -> Self {
        let d = q.length_squared();
        if d == 0.0 {
            return Self::IDENTITY;
        }
        let s = 2.0 / d;
        let (x, y, z, w) = (q.x(), q.y(), q.z(), q.w());
        let xs = x * s;
        let ys = y * s;
        let zs = z * s;
        let wx = w * xs;
        let wy = w * ys;
        let wz = w * zs;
        let xx = x * xs;
        let xy = x * ys;
        let xz = x * zs;
        let yy = y * ys;
        let yz = y * zs;
        let zz = z * zs;
        Self::from_rows(
            Vec3::new(1.0 - (yy + zz), xy - wz, xz + wy),
            Vec3::new(xy + wz, 1.0 - (xx + zz), yz - wx),
            Vec3::new(xz - wy, yz + wx, 1.0 - (xx + yy)),
        )
    }

    /// Rotation of `angle` radians about `axis`.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        Self::from_quat(&Quat::from_axis_angle(axis, angle))
    }

    /// Returns row `idx`.
    ///
    /// # Panics
    /// Panics if `idx > 2`.
    pub fn row(&self, idx: usize) -> Vec3 {
        self.rows[idx]
    }

    /// Returns all three rows.
    pub fn rows(&self) -> [Vec3; 3] {
        self.rows
    }

    /// Replaces row `idx`.
    ///
    /// # Panics
    /// Panics if `idx > 2`.
    pub fn set_row(&mut self, idx: usize, row: Vec3) {
        self.rows[idx] = row;
    }

    /// Element at `(row, col)`.
    ///
    /// # Panics
    /// Panics if either index exceeds 2.
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.rows[row].component(col)
    }

    /// Returns column `idx` (local axis).
    ///
    /// # Panics
    /// Panics if `idx > 2`.
    pub fn column(&self, idx: usize) -> Vec3 {
        Vec3::new(
            self.rows[0].component(idx),
            self.rows[1].component(idx),
            self.rows[2].component(idx),
        )
    }

    /// Replaces column `idx`.
    ///
    /// # Panics
    /// Panics if `idx > 2`.
    pub fn set_column(&mut self, idx: usize, column: Vec3) {
        for (r, row) in self.rows.iter_mut().enumerate() {
            row.set_component(idx, column.component(r));
        }
    }

    /// Row-major flat array.
    pub fn to_array(self) -> [f32; 9] {
        let [a, b, c] = self.rows;
        let [a0, a1, a2] = a.to_array();
        let [b0, b1, b2] = b.to_array();
        let [c0, c1, c2] = c.to_array();
        [a0, a1, a2, b0, b1, b2, c0, c1, c2]
    }

    /// Determinant; negative for reflections.
    pub fn determinant(&self) -> f32 {
        let [r0, r1, r2] = self.rows;
        r0.x() * (r1.y() * r2.z() - r2.y() * r1.z()) - r1.x() * (r0.y() * r2.z() - r2.y() * r0.z())
            + r2.x() * (r0.y() * r1.z() - r1.y() * r0.z())
    }

    /// Transposed matrix.
    #[must_use]
    pub fn transposed(&self) -> Self {
        Self::from_rows(self.column(0), self.column(1), self.column(2))
    }

    /// Matrix product `self * rhs`.
    pub fn multiply(&self, rhs: &Self) -> Self {
        Self::from_rows(
            Vec3::new(
                rhs.column(0).dot(&self.rows[0]),
                rhs.column(1).dot(&self.rows[0]),
                rhs.column(2).dot(&self.rows[0]),
            ),
            Vec3::new(
                rhs.column(0).dot(&self.rows[1]),
                rhs.column(1).dot(&self.rows[1]),
                rhs.column(2).dot(&self.rows[1]),
            ),
            Vec3::new(
                rhs.column(0).dot(&self.rows[2]),
                rhs.column(1).dot(&self.rows[2]),
                rhs.column(2).dot(&self.rows[2]),
            ),
        )
    }

    /// Applies the map to `v`.
    pub fn xform(&self, v: &Vec3) -> Vec3 {
        Vec3::new(self.rows[0].dot(v), self.rows[1].dot(v), self.rows[2].dot(v))
    }

    /// Row-wise linear blend towards `to`.
    pub fn lerp(&self, to: &Self, t: f32) -> Self {
        Self::from_rows(
            self.rows[0].lerp(&to.rows[0], t),
            self.rows[1].lerp(&to.rows[1], t),
            self.rows[2].lerp(&to.rows[2], t),
        )
    }

    /// Lengths of the three columns (the per-axis scale).
    pub fn column_lengths(&self) -> Vec3 {
        Vec3::new(
            self.column(0).length(),
            self.column(1).length(),
            self.column(2).length(),
        )
    }

    /// Multiplies column `i` by `scale[i]` (scale applied in local space).
    #[must_use]
    pub fn scaled_columns(&self, scale: &Vec3) -> Self {
        Self::from_rows(
            self.rows[0].mul_elem(scale),
            self.rows[1].mul_elem(scale),
            self.rows[2].mul_elem(scale),
        )
    }

    /// `true` when `self * selfᵀ` is the identity within `tolerance` per element.
    pub fn is_orthogonal(&self, tolerance: f32) -> bool {
        let product = self.multiply(&self.transposed());
        product.rows[0].is_equal_approx_with(&Vec3::UNIT_X, tolerance)
            && product.rows[1].is_equal_approx_with(&Vec3::UNIT_Y, tolerance)
            && product.rows[2].is_equal_approx_with(&Vec3::UNIT_Z, tolerance)
    }

    /// Row-wise [`Vec3::is_equal_approx`].
    pub fn is_equal_approx(&self, other: &Self) -> bool {
        (0..3).all(|i| self.rows[i].is_equal_approx(&other.rows[i]))
    }

    /// Row-wise absolute-tolerance comparison.
    pub fn is_equal_approx_with(&self, other: &Self, tolerance: f32) -> bool {
        (0..3).all(|i| self.rows[i].is_equal_approx_with(&other.rows[i], tolerance))
    }

    /// Returns `true` if every element is finite.
    pub fn is_finite(&self) -> bool {
        self.rows.iter().all(Vec3::is_finite)
    }
}

impl Default for Basis {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[X: {}, Y: {}, Z: {}]",
            self.column(0),
            self.column(1),
            self.column(2)
        )
    }
}

impl Mul for Basis {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Mul<Vec3> for Basis {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.xform(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_2;

    #[test]
    fn columns_round_trip_through_rows() {
        let x = Vec3::new(1.0, 2.0, 3.0);
        let y = Vec3::new(4.0, 5.0, 6.0);
        let z = Vec3::new(7.0, 8.0, 9.0);
        let b = Basis::from_columns(x, y, z);
        assert_eq!(b.column(0), x);
        assert_eq!(b.column(1), y);
        assert_eq!(b.column(2), z);
        assert_eq!(b.row(0).to_array(), [1.0, 4.0, 7.0]);
    }

    #[test]
    fn quarter_turn_about_z_maps_x_to_y() {
        let b = Basis::from_axis_angle(Vec3::UNIT_Z, FRAC_PI_2);
        let v = b.xform(&Vec3::UNIT_X);
        assert!(v.is_equal_approx(&Vec3::UNIT_Y), "{v}");
        assert!((b.determinant() - 1.0).abs() < 1e-6);
        assert!(b.is_orthogonal(1e-5));
    }

    #[test]
    fn mirror_has_negative_determinant() {
        let b = Basis::from_scale(Vec3::new(-1.0, 1.0, 1.0));
        assert!((b.determinant() + 1.0).abs() < 1e-6);
        assert!(b.is_orthogonal(1e-6));
    }
}
