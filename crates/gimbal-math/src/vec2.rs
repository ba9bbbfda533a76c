// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::{is_equal_approx, EPSILON};

/// 2D vector used by rectangles, 2D transforms and polygon contours.
///
/// Mirrors [`crate::Vec3`]: `f32` components, `0 = x` and `1 = y` for axis
/// loops.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[f32; 2]", into = "[f32; 2]")
)]
pub struct Vec2 {
    data: [f32; 2],
}

impl Vec2 {
    /// All-zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// All-one vector.
    pub const ONE: Self = Self::new(1.0, 1.0);

    /// Unit vector pointing along the positive X axis.
    pub const UNIT_X: Self = Self::new(1.0, 0.0);

    /// Unit vector pointing along the positive Y axis.
    pub const UNIT_Y: Self = Self::new(0.0, 1.0);

    /// Creates a vector from components.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { data: [x, y] }
    }

    /// Returns the components as an array.
    pub fn to_array(self) -> [f32; 2] {
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

    /// Component by axis index.
    ///
    /// # Panics
    /// Panics if `idx > 1`.
    pub fn component(&self, idx: usize) -> f32 {
        self.data[idx]
    }

    /// Overwrites the component at axis index `idx`.
    ///
    /// # Panics
    /// Panics if `idx > 1`.
    pub fn set_component(&mut self, idx: usize, value: f32) {
        self.data[idx] = value;
    }

    /// Adds two vectors.
    pub fn add(&self, other: &Self) -> Self {
        Self::new(self.x() + other.x(), self.y() + other.y())
    }

    /// Subtracts another vector.
    pub fn sub(&self, other: &Self) -> Self {
        Self::new(self.x() - other.x(), self.y() - other.y())
    }

    /// Scales the vector by a scalar.
    pub fn scale(&self, scalar: f32) -> Self {
        Self::new(self.x() * scalar, self.y() * scalar)
    }

    /// Component-wise minimum.
    pub fn min(&self, other: &Self) -> Self {
        Self::new(self.x().min(other.x()), self.y().min(other.y()))
    }

    /// Component-wise maximum.
    pub fn max(&self, other: &Self) -> Self {
        Self::new(self.x().max(other.x()), self.y().max(other.y()))
    }

    /// Component-wise absolute value.
    pub fn abs(&self) -> Self {
        Self::new(self.x().abs(), self.y().abs())
    }

    /// Dot product with another vector.
    pub fn dot(&self, other: &Self) -> f32 {
        self.x() * other.x() + self.y() * other.y()
    }

    /// Z component of the 3D cross product (`self.x * other.y - self.y * other.x`).
    ///
    /// Positive when `other` lies counter-clockwise of `self`.
    pub fn cross(&self, other: &Self) -> f32 {
        self.x() * other.y() - self.y() * other.x()
    }

    /// Vector length (magnitude).
    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Squared magnitude of the vector.
    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Normalises the vector, returning the zero vector if length ≤ `EPSILON`.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len <= EPSILON {
            return Self::ZERO;
        }
        self.scale(1.0 / len)
    }

    /// Angle of the vector relative to +X, in radians (`atan2(y, x)`).
    pub fn angle(&self) -> f32 {
        self.y().atan2(self.x())
    }

    /// Linear interpolation towards `to` by `t` (`t = 0` yields `self`).
    pub fn lerp(&self, to: &Self, t: f32) -> Self {
        Self::new(
            self.x() + (to.x() - self.x()) * t,
            self.y() + (to.y() - self.y()) * t,
        )
    }

    /// Component-wise [`crate::is_equal_approx`].
    pub fn is_equal_approx(&self, other: &Self) -> bool {
        is_equal_approx(self.x(), other.x()) && is_equal_approx(self.y(), other.y())
    }

    /// Returns `true` if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.x().is_finite() && self.y().is_finite()
    }

    /// Returns `true` if any component is negative.
    pub fn any_negative(&self) -> bool {
        self.x() < 0.0 || self.y() < 0.0
    }
}

impl From<[f32; 2]> for Vec2 {
    fn from(value: [f32; 2]) -> Self {
        Self { data: value }
    }
}

impl From<Vec2> for [f32; 2] {
    fn from(value: Vec2) -> Self {
        value.data
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vec2::add(&self, &rhs)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vec2::sub(&self, &rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        self.scale(-1.0)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;
    fn mul(self, rhs: Vec2) -> Vec2 {
        rhs.scale(self)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = Vec2::add(self, &rhs);
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = Vec2::sub(self, &rhs);
    }
}

impl MulAssign<f32> for Vec2 {
    fn mul_assign(&mut self, rhs: f32) {
        *self = self.scale(rhs);
    }
}
