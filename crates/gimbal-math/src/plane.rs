// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;

use crate::Vec3;

/// Plane `normal · p = d`.
///
/// The signed distance of a point is `normal · p - d`; positive values lie
/// on the side the normal points to. `normal` is expected to be unit length
/// for distances to be metric, but sign tests work with any non-zero normal.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plane {
    /// Plane normal.
    pub normal: Vec3,
    /// Distance from the origin along `normal`.
    pub d: f32,
}

impl Plane {
    /// Creates a plane from a normal and distance.
    pub const fn new(normal: Vec3, d: f32) -> Self {
        Self { normal, d }
    }

    /// Plane through `point` with the given `normal`.
    pub fn from_point_normal(point: &Vec3, normal: Vec3) -> Self {
        Self::new(normal, normal.dot(point))
    }

    /// Signed distance from `point` to the plane.
    pub fn distance_to(&self, point: &Vec3) -> f32 {
        self.normal.dot(point) - self.d
    }

    /// `true` when `point` is strictly on the normal's side.
    pub fn is_point_over(&self, point: &Vec3) -> bool {
        self.distance_to(point) > 0.0
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[N: {}, D: {}]", self.normal, self.d)
    }
}
