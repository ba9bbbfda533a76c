// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Geometry kernel for Gimbal.

This crate provides:
- Axis-aligned boxes (`Aabb`) and rectangles (`Rect2`) with slab-based
  ray/segment queries, plane tests and separating-axis overlap.
- Transform interpolation (`interp`): classification into LERP, SLERP or
  scaled SLERP and the matching blend for bases, 3D and 2D transforms.
- Ear-clipping polygon triangulation (`triangulate`).

Design notes:
- Pure functions over `Copy` value types from `gimbal-math`; no global state.
- Hits are returned as `Option<…Hit>` values, never through out-parameters.
- Degenerate geometry takes an explicit fallback path; only invalid API use
  (bad indices, bad tolerances, untriangulable contours) is an error.
- Negative box sizes are tolerated and reported through `tracing` in debug
  builds (target `gimbal_geom::diag`).
"]

mod diag;
/// Error types.
pub mod error;
/// Transform interpolation.
pub mod interp;
/// Polygon triangulation.
pub mod triangulate;
/// Foundational geometric types.
pub mod types;

pub use error::{GeomError, TriangulateError};
pub use interp::{Method, Tolerances, TransformInterpolator};
pub use types::aabb::{Aabb, RayHit, SegmentHit};
pub use types::rect2::{Rect2, SegmentHit2};
