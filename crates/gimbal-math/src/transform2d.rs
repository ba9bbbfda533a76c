// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::f32::consts::FRAC_PI_2;
use core::fmt;

use crate::{lerp_angle, Vec2};

/// Affine 2D transform stored as two basis columns plus an origin.
///
/// `xform(p) = x_axis * p.x + y_axis * p.y + origin`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform2D {
    columns: [Vec2; 2],
    origin: Vec2,
}

impl Transform2D {
    /// Identity transform.
    pub const IDENTITY: Self = Self::new(Vec2::UNIT_X, Vec2::UNIT_Y, Vec2::ZERO);

    /// Creates a transform from its X axis, Y axis and origin.
    pub const fn new(x_axis: Vec2, y_axis: Vec2, origin: Vec2) -> Self {
        Self {
            columns: [x_axis, y_axis],
            origin,
        }
    }

    /// Rotation (radians) followed by translation.
    pub fn from_rotation(rotation: f32, origin: Vec2) -> Self {
        let (s, c) = rotation.sin_cos();
        Self::new(Vec2::new(c, s), Vec2::new(-s, c), origin)
    }

    /// Composes rotation, non-uniform scale and skew (all radians) with a
    /// translation.
    ///
    /// Inverse of [`Transform2D::rotation`], [`Transform2D::scale`] and
    /// [`Transform2D::skew`] for non-degenerate transforms.
    pub fn from_rotation_scale_skew(rotation: f32, scale: Vec2, skew: f32, origin: Vec2) -> Self {
        let (sr, cr) = rotation.sin_cos();
        let (ss, cs) = (rotation + skew).sin_cos();
        Self::new(
            Vec2::new(cr * scale.x(), sr * scale.x()),
            Vec2::new(-ss * scale.y(), cs * scale.y()),
            origin,
        )
    }

    /// Returns basis column `idx` (`0 = x`, `1 = y`).
    ///
    /// # Panics
    /// Panics if `idx > 1`.
    pub fn column(&self, idx: usize) -> Vec2 {
        self.columns[idx]
    }

    /// Replaces basis column `idx`.
    ///
    /// # Panics
    /// Panics if `idx > 1`.
    pub fn set_column(&mut self, idx: usize, column: Vec2) {
        self.columns[idx] = column;
    }

    /// Translation.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Replaces the translation.
    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    /// Determinant of the linear part; negative for reflections.
    pub fn determinant(&self) -> f32 {
        self.columns[0].cross(&self.columns[1])
    }

    /// Transforms a point.
    pub fn xform(&self, point: &Vec2) -> Vec2 {
        self.basis_xform(point) + self.origin
    }

    /// Transforms a direction (ignores the origin).
    pub fn basis_xform(&self, v: &Vec2) -> Vec2 {
        self.columns[0].scale(v.x()) + self.columns[1].scale(v.y())
    }

    /// Rotation of the X axis in radians.
    pub fn rotation(&self) -> f32 {
        self.columns[0].angle()
    }

    /// Per-axis scale; the Y scale carries the sign of the determinant.
    pub fn scale(&self) -> Vec2 {
        let det_sign = if self.determinant() < 0.0 { -1.0 } else { 1.0 };
        Vec2::new(self.columns[0].length(), det_sign * self.columns[1].length())
    }

    /// Deviation of the Y axis from perpendicular, in radians.
    pub fn skew(&self) -> f32 {
        let det_sign = if self.determinant() < 0.0 { -1.0 } else { 1.0 };
        let x = self.columns[0].normalize();
        let y = self.columns[1].normalize().scale(det_sign);
        x.dot(&y).clamp(-1.0, 1.0).acos() - FRAC_PI_2
    }

    /// Decomposes both transforms and blends rotation and skew along the
    /// shortest angle, scale and origin linearly.
    #[must_use]
    pub fn interpolate_with(&self, to: &Self, t: f32) -> Self {
        Self::from_rotation_scale_skew(
            lerp_angle(self.rotation(), to.rotation(), t),
            self.scale().lerp(&to.scale(), t),
            lerp_angle(self.skew(), to.skew(), t),
            self.origin.lerp(&to.origin, t),
        )
    }

    /// Component-wise approximate equality.
    pub fn is_equal_approx(&self, other: &Self) -> bool {
        self.columns[0].is_equal_approx(&other.columns[0])
            && self.columns[1].is_equal_approx(&other.columns[1])
            && self.origin.is_equal_approx(&other.origin)
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Transform2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[X: {}, Y: {}, O: {}]",
            self.columns[0], self.columns[1], self.origin
        )
    }
}
