// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;
use core::ops::{Add, Mul, Neg};

use crate::{Vec3, CMP_EPSILON, EPSILON, UNIT_EPSILON};

/// Quaternion stored as `(x, y, z, w)`.
///
/// * All angles are expressed in radians.
/// * Rotations are represented by unit quaternions; see
///   [`Quat::is_normalized`].
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[f32; 4]", into = "[f32; 4]")
)]
pub struct Quat {
    data: [f32; 4],
}

impl Quat {
    /// The identity rotation.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a quaternion from components.
    ///
    /// Callers should provide finite components; use
    /// [`Quat::from_axis_angle`] for axis/angle construction.
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { data: [x, y, z, w] }
    }

    /// Returns the quaternion as an array.
    pub fn to_array(self) -> [f32; 4] {
        self.data
    }

    fn component(&self, idx: usize) -> f32 {
        self.data[idx]
    }

    /// X (vector part) component.
    pub fn x(&self) -> f32 {
        self.data[0]
    }

    /// Y (vector part) component.
    pub fn y(&self) -> f32 {
        self.data[1]
    }

    /// Z (vector part) component.
    pub fn z(&self) -> f32 {
        self.data[2]
    }

    /// W (scalar part) component.
    pub fn w(&self) -> f32 {
        self.data[3]
    }

    /// Constructs a quaternion from a rotation axis and angle in radians.
    ///
    /// Returns the identity quaternion when the axis length is ≤ `EPSILON`.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let len_sq = axis.length_squared();
        if len_sq <= EPSILON * EPSILON {
            return Self::IDENTITY;
        }
        let len = len_sq.sqrt();
        let norm_axis = axis.scale(1.0 / len);
        let half = angle * 0.5;
        let (sin_half, cos_half) = half.sin_cos();
        let scaled = norm_axis.scale(sin_half);
        Self::new(scaled.x(), scaled.y(), scaled.z(), cos_half)
    }

    /// Four-component dot product.
    pub fn dot(&self, other: &Self) -> f32 {
        (0..4).map(|i| self.component(i) * other.component(i)).sum()
    }

    /// Squared norm.
    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Norm.
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Returns `true` when the squared norm is within `UNIT_EPSILON` of 1.
    pub fn is_normalized(&self) -> bool {
        (self.length_squared() - 1.0).abs() < UNIT_EPSILON
    }

    /// Hamilton product of two quaternions (`self * other`).
    ///
    /// Operand order matters: quaternion multiplication is non-commutative.
    pub fn multiply(&self, other: &Self) -> Self {
        let ax = self.component(0);
        let ay = self.component(1);
        let az = self.component(2);
        let aw = self.component(3);

        let bx = other.component(0);
        let by = other.component(1);
        let bz = other.component(2);
        let bw = other.component(3);

        Self::new(
            aw * bx + ax * bw + ay * bz - az * by,
            aw * by - ax * bz + ay * bw + az * bx,
            aw * bz + ax * by - ay * bx + az * bw,
            aw * bw - ax * bx - ay * by - az * bz,
        )
    }

    /// Scales every component by `scalar`.
    pub fn scale(&self, scalar: f32) -> Self {
        Self::new(
            self.component(0) * scalar,
            self.component(1) * scalar,
            self.component(2) * scalar,
            self.component(3) * scalar,
        )
    }

    /// Normalises the quaternion; returns identity when norm is ~0.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len <= EPSILON {
            return Self::IDENTITY;
        }
        self.scale(1.0 / len)
    }

    /// Conjugate; the inverse rotation for unit quaternions.
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x(), -self.y(), -self.z(), self.w())
    }

    /// Rotation angle in radians (`2·acos(w)`), assuming a unit quaternion.
    pub fn angle(&self) -> f32 {
        2.0 * self.w().clamp(-1.0, 1.0).acos()
    }

    /// Rotation axis, assuming a unit quaternion.
    ///
    /// Near the identity the axis is arbitrary; the raw vector part is returned.
    pub fn axis(&self) -> Vec3 {
        let w = self.w();
        if w.abs() > 1.0 - CMP_EPSILON {
            return Vec3::new(self.x(), self.y(), self.z());
        }
        let r = 1.0 / (1.0 - w * w).sqrt();
        Vec3::new(self.x() * r, self.y() * r, self.z() * r)
    }

    /// Angle in radians between the rotations `self` and `to`.
    pub fn angle_to(&self, to: &Self) -> f32 {
        let d = self.dot(to);
        (d * d * 2.0 - 1.0).clamp(-1.0, 1.0).acos()
    }

    /// Spherical linear interpolation along the shortest arc, with the
    /// near-parallel cutoff at [`CMP_EPSILON`].
    ///
    /// See [`Quat::slerp_with_cutoff`].
    pub fn slerp(&self, to: &Self, t: f32) -> Self {
        self.slerp_with_cutoff(to, t, CMP_EPSILON)
    }

    /// Spherical linear interpolation along the shortest arc.
    ///
    /// Both inputs are expected to be unit quaternions. When
    /// `1 - |cos θ| <= cutoff` the sine weights are ill-conditioned; the
    /// components are blended linearly and renormalised instead.
    pub fn slerp_with_cutoff(&self, to: &Self, t: f32, cutoff: f32) -> Self {
        let mut cosom = self.dot(to);
        let to1 = if cosom < 0.0 {
            cosom = -cosom;
            -*to
        } else {
            *to
        };

        if 1.0 - cosom > cutoff {
            let omega = cosom.acos();
            let sinom = 1.0 / omega.sin();
            let scale0 = ((1.0 - t) * omega).sin() * sinom;
            let scale1 = (t * omega).sin() * sinom;
            self.scale(scale0) + to1.scale(scale1)
        } else {
            (self.scale(1.0 - t) + to1.scale(t)).normalize()
        }
    }

    /// Component-wise [`crate::is_equal_approx`].
    pub fn is_equal_approx(&self, other: &Self) -> bool {
        (0..4).all(|i| crate::is_equal_approx(self.component(i), other.component(i)))
    }

    /// Returns `true` if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|c| c.is_finite())
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Converts a 4-element `[f32; 4]` array `(x, y, z, w)` into a `Quat`.
/// The components are taken verbatim; normalization is not enforced.
impl From<[f32; 4]> for Quat {
    fn from(value: [f32; 4]) -> Self {
        Self { data: value }
    }
}

impl From<Quat> for [f32; 4] {
    fn from(value: Quat) -> Self {
        value.data
    }
}

impl fmt::Display for Quat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x(), self.y(), self.z(), self.w())
    }
}

impl Add for Quat {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.component(0) + rhs.component(0),
            self.component(1) + rhs.component(1),
            self.component(2) + rhs.component(2),
            self.component(3) + rhs.component(3),
        )
    }
}

impl Neg for Quat {
    type Output = Self;
    fn neg(self) -> Self {
        self.scale(-1.0)
    }
}

impl Mul<f32> for Quat {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}

impl Mul for Quat {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}
