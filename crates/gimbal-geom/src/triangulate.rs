// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Ear-clipping triangulation of simple polygons.
//!
//! The contour may be wound either way; output triangles are always
//! counter-clockwise (positive signed area). Each pass tries every remaining
//! vertex as an ear tip; after `2·n` misses the ear tests are relaxed once
//! (collinear tips and vertices on the candidate's edges are tolerated)
//! before giving up.

use gimbal_math::{Vec2, CMP_EPSILON};
use tracing::debug;

use crate::error::TriangulateError;

/// Signed area of the closed contour (shoelace formula).
///
/// Positive for counter-clockwise winding.
pub fn polygon_area(contour: &[Vec2]) -> f32 {
    let Some(last) = contour.last() else {
        return 0.0;
    };
    let mut prev = last;
    let mut twice = 0.0;
    for p in contour {
        twice += prev.cross(p);
        prev = p;
    }
    twice * 0.5
}

/// Returns `true` if `p` lies inside the counter-clockwise triangle `abc`.
///
/// With `strict`, points on an edge are outside; otherwise they count as
/// inside. Each edge is tested with its own cross product, so the result does
/// not depend on the triangle's orientation being exact, only its sign.
pub fn is_inside_triangle(a: Vec2, b: Vec2, c: Vec2, p: Vec2, strict: bool) -> bool {
    let bc_bp = (c - b).cross(&(p - b));
    let ca_cp = (a - c).cross(&(p - c));
    let ab_ap = (b - a).cross(&(p - a));
    if strict {
        bc_bp > 0.0 && ca_cp > 0.0 && ab_ap > 0.0
    } else {
        bc_bp >= 0.0 && ca_cp >= 0.0 && ab_ap >= 0.0
    }
}

/// Triangulates a simple polygon.
///
/// Returns a flat index list into `contour`; each consecutive triple is one
/// counter-clockwise triangle. A polygon with `n` vertices yields `n - 2`
/// triangles.
pub fn triangulate(contour: &[Vec2]) -> Result<Vec<usize>, TriangulateError> {
    let n = contour.len();
    if n < 3 {
        return Err(TriangulateError::TooFewPoints { len: n });
    }

    let mut verts: Vec<usize> = if polygon_area(contour) > 0.0 {
        (0..n).collect()
    } else {
        (0..n).rev().collect()
    };

    let mut result = Vec::with_capacity((n - 2) * 3);
    let mut relaxed = false;
    let mut nv = n;
    let mut budget = 2 * nv;
    let mut v = nv - 1;

    while nv > 2 {
        if budget == 0 {
            if relaxed {
                return Err(TriangulateError::NoEarFound { remaining: nv });
            }
            debug!(remaining = nv, "no strict ear found; relaxing ear tests");
            relaxed = true;
            budget = 2 * nv;
        }
        budget -= 1;

        let u = if v >= nv { 0 } else { v };
        v = if u + 1 >= nv { 0 } else { u + 1 };
        let w = if v + 1 >= nv { 0 } else { v + 1 };

        if is_ear(contour, &verts[..nv], (u, v, w), relaxed) {
            result.extend([verts[u], verts[v], verts[w]]);
            verts.remove(v);
            nv -= 1;
            budget = 2 * nv;
        }
    }

    Ok(result)
}

/// Tests whether `(u, v, w)` (positions in `verts`) is a clippable ear: a
/// convex corner whose triangle contains no other remaining vertex.
fn is_ear(contour: &[Vec2], verts: &[usize], (u, v, w): (usize, usize, usize), relaxed: bool) -> bool {
    let a = contour[verts[u]];
    let b = contour[verts[v]];
    let c = contour[verts[w]];

    let threshold = if relaxed { -CMP_EPSILON } else { CMP_EPSILON };
    if (b - a).cross(&(c - a)) < threshold {
        return false;
    }

    // Relaxed mode uses the strict interior test, so vertices lying on the
    // candidate's edges no longer block it.
    !verts
        .iter()
        .enumerate()
        .filter(|(p, _)| *p != u && *p != v && *p != w)
        .any(|(_, &idx)| is_inside_triangle(a, b, c, contour[idx], relaxed))
}
