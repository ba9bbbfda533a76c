// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Debug-build diagnostics for precondition violations.
//!
//! Negative box sizes are tolerated: queries proceed with the inverted
//! extents. In debug builds a `warn!` is emitted on the `gimbal_geom::diag`
//! target so callers can find the offending box. Release builds skip the check.

use gimbal_math::{Vec2, Vec3};
use tracing::warn;

/// Warns when any of `sizes` has a negative component.
#[inline]
pub(crate) fn check_aabb_sizes(op: &'static str, sizes: &[Vec3]) {
    if cfg!(debug_assertions) && sizes.iter().any(Vec3::any_negative) {
        warn!(
            target: "gimbal_geom::diag",
            op,
            "AABB size is negative, this is not supported; use Aabb::abs() to get a box with a positive size"
        );
    }
}

/// Warns when any of `sizes` has a negative component.
#[inline]
pub(crate) fn check_rect_sizes(op: &'static str, sizes: &[Vec2]) {
    if cfg!(debug_assertions) && sizes.iter().any(Vec2::any_negative) {
        warn!(
            target: "gimbal_geom::diag",
            op,
            "Rect2 size is negative, this is not supported; use Rect2::abs() to get a rect with a positive size"
        );
    }
}
