// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::{is_equal_approx, EPSILON};

/// 3D vector used for positions, sizes, directions and basis rows.
///
/// * Components may represent either points or directions depending on the
///   calling context; the type does not distinguish them.
/// * Arithmetic uses `f32` throughout.
/// * Axis loops index components through [`Vec3::component`] with `0 = x`,
///   `1 = y`, `2 = z`.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[f32; 3]", into = "[f32; 3]")
)]
pub struct Vec3 {
    data: [f32; 3],
}

impl Vec3 {
    /// All-zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// All-one vector.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Unit vector pointing along the positive X axis.
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit vector pointing along the positive Y axis.
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit vector pointing along the positive Z axis.
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a vector from components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { data: [x, y, z] }
    }

    /// Creates a vector with all components set to `value`.
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value)
    }

    /// Unit vector along axis `idx` (`0 = x`, `1 = y`, `2 = z`).
    ///
    /// Indices above 2 are treated as the Z axis.
    pub const fn axis(idx: usize) -> Self {
        match idx {
            0 => Self::UNIT_X,
            1 => Self::UNIT_Y,
            _ => Self::UNIT_Z,
        }
    }

    /// Returns the components as an array.
    pub fn to_array(self) -> [f32; 3] {
        self.data
    }

    /// X component.
    pub fn x(&self) -> f32 {
        self.data[0]
    }

    /// Y component.
    pub fn y(&self) -> f32 {
        self.data[1]
    }

    /// Z component.
    pub fn z(&self) -> f32 {
        self.data[2]
    }

    /// Component by axis index.
    ///
    /// # Panics
    /// Panics if `idx > 2`.
    pub fn component(&self, idx: usize) -> f32 {
        self.data[idx]
    }

    /// Overwrites the component at axis index `idx`.
    ///
    /// # Panics
    /// Panics if `idx > 2`.
    pub fn set_component(&mut self, idx: usize, value: f32) {
        self.data[idx] = value;
    }

    /// Returns a copy with the component at `idx` replaced.
    ///
    /// # Panics
    /// Panics if `idx > 2`.
    #[must_use]
    pub fn with_component(mut self, idx: usize, value: f32) -> Self {
        self.data[idx] = value;
        self
    }

    /// Adds two vectors.
    pub fn add(&self, other: &Self) -> Self {
        Self::new(
            self.component(0) + other.component(0),
            self.component(1) + other.component(1),
            self.component(2) + other.component(2),
        )
    }

    /// Subtracts another vector.
    pub fn sub(&self, other: &Self) -> Self {
        Self::new(
            self.component(0) - other.component(0),
            self.component(1) - other.component(1),
            self.component(2) - other.component(2),
        )
    }

    /// Scales the vector by a scalar.
    pub fn scale(&self, scalar: f32) -> Self {
        Self::new(
            self.component(0) * scalar,
            self.component(1) * scalar,
            self.component(2) * scalar,
        )
    }

    /// Component-wise product.
    pub fn mul_elem(&self, other: &Self) -> Self {
        Self::new(
            self.component(0) * other.component(0),
            self.component(1) * other.component(1),
            self.component(2) * other.component(2),
        )
    }

    /// Component-wise minimum.
    pub fn min(&self, other: &Self) -> Self {
        Self::new(
            self.component(0).min(other.component(0)),
            self.component(1).min(other.component(1)),
            self.component(2).min(other.component(2)),
        )
    }

    /// Component-wise maximum.
    pub fn max(&self, other: &Self) -> Self {
        Self::new(
            self.component(0).max(other.component(0)),
            self.component(1).max(other.component(1)),
            self.component(2).max(other.component(2)),
        )
    }

    /// Component-wise absolute value.
    pub fn abs(&self) -> Self {
        Self::new(
            self.component(0).abs(),
            self.component(1).abs(),
            self.component(2).abs(),
        )
    }

    /// Dot product with another vector.
    pub fn dot(&self, other: &Self) -> f32 {
        self.component(0) * other.component(0)
            + self.component(1) * other.component(1)
            + self.component(2) * other.component(2)
    }

    /// Cross product with another vector.
    pub fn cross(&self, other: &Self) -> Self {
        let ax = self.component(0);
        let ay = self.component(1);
        let az = self.component(2);
        let bx = other.component(0);
        let by = other.component(1);
        let bz = other.component(2);
        Self::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }

    /// Vector length (magnitude).
    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Squared magnitude of the vector.
    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Sum of the three components.
    pub fn sum(&self) -> f32 {
        self.component(0) + self.component(1) + self.component(2)
    }

    /// Normalises the vector, returning the zero vector if length ≤ `EPSILON`.
    ///
    /// `EPSILON` is a degeneracy threshold: vectors with length ≤ `EPSILON`
    /// are normalised to zero so downstream callers can detect them.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len <= EPSILON {
            return Self::ZERO;
        }
        self.scale(1.0 / len)
    }

    /// Linear interpolation towards `to` by `t` (`t = 0` yields `self`).
    pub fn lerp(&self, to: &Self, t: f32) -> Self {
        Self::new(
            self.component(0) + (to.component(0) - self.component(0)) * t,
            self.component(1) + (to.component(1) - self.component(1)) * t,
            self.component(2) + (to.component(2) - self.component(2)) * t,
        )
    }

    /// Component-wise [`crate::is_equal_approx`].
    pub fn is_equal_approx(&self, other: &Self) -> bool {
        (0..3).all(|i| is_equal_approx(self.component(i), other.component(i)))
    }

    /// Component-wise absolute-tolerance comparison (`|a - b| < tolerance`).
    pub fn is_equal_approx_with(&self, other: &Self, tolerance: f32) -> bool {
        (0..3).all(|i| crate::is_equal_approx_with(self.component(i), other.component(i), tolerance))
    }

    /// Returns `true` if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|c| c.is_finite())
    }

    /// Returns `true` if any component is negative.
    pub fn any_negative(&self) -> bool {
        self.data.iter().any(|c| *c < 0.0)
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(value: [f32; 3]) -> Self {
        Self { data: value }
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(value: Vec3) -> Self {
        value.data
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x(), self.y(), self.z())
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vec3::add(&self, &rhs)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vec3::sub(&self, &rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        self.scale(-1.0)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}

impl Mul<Vec3> for f32 {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs.scale(self)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = Vec3::add(self, &rhs);
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = Vec3::sub(self, &rhs);
    }
}

impl MulAssign<f32> for Vec3 {
    fn mul_assign(&mut self, rhs: f32) {
        *self = self.scale(rhs);
    }
}
