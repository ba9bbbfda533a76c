// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Value-type algebra layer for Gimbal.

This crate provides:
- 2D/3D vectors (`Vec2`, `Vec3`) and unit quaternions (`Quat`).
- A 3×3 linear map (`Basis`) and affine transforms (`Transform2D`,
  `Transform3D`).
- Planes (`Plane`), scalar helpers and the shared comparison tolerances.
- A seeded `xoroshiro128+` generator (`Prng`) with weighted choice.

Design notes:
- Float32 throughout; every type is `Copy` and has no identity beyond
  equality.
- No global state. Tolerances are plain constants; code that wants different
  thresholds passes its own.
- With the `serde` feature, vectors and quaternions serialize as flat arrays.
"]

mod basis;
mod plane;
mod prng;
mod quat;
mod transform2d;
mod transform3d;
mod vec2;
mod vec3;

pub use basis::Basis;
pub use plane::Plane;
pub use prng::Prng;
pub use quat::Quat;
pub use transform2d::Transform2D;
pub use transform3d::Transform3D;
pub use vec2::Vec2;
pub use vec3::Vec3;

use core::f32::consts::TAU;

/// Degeneracy threshold used when normalising vectors and quaternions.
pub const EPSILON: f32 = 1e-6;

/// General comparison tolerance for approximate equality and near-parallel
/// detection.
pub const CMP_EPSILON: f32 = 1e-5;

/// Tolerance on the squared norm for a quaternion or vector to count as unit
/// length.
pub const UNIT_EPSILON: f32 = 1e-3;

/// Approximate equality with a tolerance relative to the magnitude of `a`,
/// never tighter than [`CMP_EPSILON`].
///
/// Exactly equal values (including infinities) always compare equal.
#[allow(clippy::float_cmp)]
pub fn is_equal_approx(a: f32, b: f32) -> bool {
    if a == b {
        return true;
    }
    let tolerance = (CMP_EPSILON * a.abs()).max(CMP_EPSILON);
    (a - b).abs() < tolerance
}

/// Approximate equality with an absolute `tolerance` (`|a - b| < tolerance`).
#[allow(clippy::float_cmp)]
pub fn is_equal_approx_with(a: f32, b: f32, tolerance: f32) -> bool {
    if a == b {
        return true;
    }
    (a - b).abs() < tolerance
}

/// `true` when `|value| < CMP_EPSILON`.
pub fn is_zero_approx(value: f32) -> bool {
    value.abs() < CMP_EPSILON
}

/// Clamps `value` to the inclusive `[min, max]` range.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    debug_assert!(min <= max, "invalid clamp range: {min} > {max}");
    value.max(min).min(max)
}

/// Linear interpolation (`t = 0` yields `from`).
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Interpolates between two angles (radians) along the shortest arc.
pub fn lerp_angle(from: f32, to: f32, t: f32) -> f32 {
    let diff = (to - from) % TAU;
    let distance = (2.0 * diff) % TAU - diff;
    from + distance * t
}

/// Converts degrees to radians.
pub fn deg_to_rad(value: f32) -> f32 {
    value * (TAU / 360.0)
}

/// Converts radians to degrees.
pub fn rad_to_deg(value: f32) -> f32 {
    value * (360.0 / TAU)
}
