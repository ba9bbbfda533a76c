// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Axis-aligned box types (3D `Aabb`, 2D `Rect2`).
//!
//! Conventions shared by both:
//! - Boxes are `position + size`, not `min/max`, so a negative size is
//!   representable. Queries tolerate it and debug builds warn about it.
//! - Intersection queries return `Option<Hit>` instead of out-parameters.
//! - Segment queries share one slab-clipping routine over `[f32; N]`.

#[doc = "Axis-aligned bounding boxes (3D)."]
pub mod aabb;
#[doc = "Axis-aligned rectangles (2D)."]
pub mod rect2;
mod slab;
