// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;

use crate::{Basis, Quat, Vec3};

/// Affine 3D transform: a linear [`Basis`] followed by a translation.
///
/// `xform(p) = basis * p + origin`. Negative scales (reflections) are
/// representable; interpolation code checks for them explicitly.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform3D {
    /// Linear part.
    pub basis: Basis,
    /// Translation.
    pub origin: Vec3,
}

impl Transform3D {
    /// Identity transform.
    pub const IDENTITY: Self = Self {
        basis: Basis::IDENTITY,
        origin: Vec3::ZERO,
    };

    /// Creates a transform from components.
    pub const fn new(basis: Basis, origin: Vec3) -> Self {
        Self { basis, origin }
    }

    /// Builds `T * R * S` from translation, rotation and per-axis scale.
    pub fn from_trs(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self::new(Basis::from_quat(&rotation).scaled_columns(&scale), translation)
    }

    /// Pure translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self::new(Basis::IDENTITY, translation)
    }

    /// Transforms a point.
    pub fn xform(&self, point: &Vec3) -> Vec3 {
        self.basis.xform(point) + self.origin
    }

    /// Transforms a direction (ignores the origin).
    pub fn xform_direction(&self, dir: &Vec3) -> Vec3 {
        self.basis.xform(dir)
    }

    /// Composition `self * rhs` (apply `rhs` first).
    pub fn multiply(&self, rhs: &Self) -> Self {
        Self::new(self.basis.multiply(&rhs.basis), self.xform(&rhs.origin))
    }

    /// Component-wise approximate equality.
    pub fn is_equal_approx(&self, other: &Self) -> bool {
        self.basis.is_equal_approx(&other.basis) && self.origin.is_equal_approx(&other.origin)
    }

    /// Returns `true` if every element is finite.
    pub fn is_finite(&self) -> bool {
        self.basis.is_finite() && self.origin.is_finite()
    }
}

impl fmt::Display for Transform3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, O: {}", self.basis, self.origin)
    }
}
