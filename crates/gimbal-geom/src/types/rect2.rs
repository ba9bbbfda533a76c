// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;

use gimbal_math::{Transform2D, Vec2};

use crate::diag::check_rect_sizes;
use crate::types::slab::clip_segment;

/// Axis-aligned rectangle stored as a corner plus an extent.
///
/// Same conventions as [`crate::Aabb`]: the rect spans
/// `[position, position + size]`, sizes are expected non-negative and
/// negative sizes are diagnosed in debug builds rather than rejected.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect2 {
    /// Minimum corner (for non-negative sizes).
    pub position: Vec2,
    /// Width and height.
    pub size: Vec2,
}

/// Result of [`Rect2::intersects_segment`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SegmentHit2 {
    /// First point of the segment inside the rect.
    pub point: Vec2,
    /// Edge normal at `point`; zero when the segment starts inside.
    pub normal: Vec2,
}

impl Rect2 {
    /// Constructs a rect from its minimum corner and size.
    #[must_use]
    pub const fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// Opposite corner, `position + size`.
    #[must_use]
    pub fn end(&self) -> Vec2 {
        self.position + self.size
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Width times height.
    #[must_use]
    pub fn area(&self) -> f32 {
        self.size.x() * self.size.y()
    }

    /// Equivalent rect with a non-negative size.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::new(self.position + self.size.min(&Vec2::ZERO), self.size.abs())
    }

    /// `true` when both size components are positive.
    #[must_use]
    pub fn has_area(&self) -> bool {
        self.size.x() > 0.0 && self.size.y() > 0.0
    }

    /// Returns `true` if `point` lies inside; the far edges are exclusive.
    #[must_use]
    pub fn has_point(&self, point: &Vec2) -> bool {
        check_rect_sizes("has_point", &[self.size]);
        let (lo, hi) = (self.position, self.end());
        (lo.x()..hi.x()).contains(&point.x()) && (lo.y()..hi.y()).contains(&point.y())
    }

    /// Returns `true` if `other` lies entirely inside this rect (inclusive).
    #[must_use]
    pub fn encloses(&self, other: &Self) -> bool {
        check_rect_sizes("encloses", &[self.size, other.size]);
        let (a_lo, a_hi) = (self.position, self.end());
        let (b_lo, b_hi) = (other.position, other.end());
        b_lo.x() >= a_lo.x() && b_lo.y() >= a_lo.y() && b_hi.x() <= a_hi.x() && b_hi.y() <= a_hi.y()
    }

    /// Overlap test. With `include_borders`, touching edges count as overlap.
    #[must_use]
    pub fn intersects(&self, other: &Self, include_borders: bool) -> bool {
        check_rect_sizes("intersects", &[self.size, other.size]);
        let (a_lo, a_hi) = (self.position, self.end());
        let (b_lo, b_hi) = (other.position, other.end());
        (0..2).all(|i| {
            let (alo, ahi) = (a_lo.component(i), a_hi.component(i));
            let (blo, bhi) = (b_lo.component(i), b_hi.component(i));
            if include_borders {
                alo <= bhi && ahi >= blo
            } else {
                alo < bhi && ahi > blo
            }
        })
    }

    /// Overlapping region, or the default (empty) rect when the interiors
    /// do not overlap.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        if !self.intersects(other, false) {
            return Self::default();
        }
        let position = other.position.max(&self.position);
        let end = other.end().min(&self.end());
        Self::new(position, end - position)
    }

    /// Smallest rect containing both rects.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        check_rect_sizes("merge", &[self.size, other.size]);
        let position = other.position.min(&self.position);
        let end = other.end().max(&self.end());
        Self::new(position, end - position)
    }

    /// Returns a copy grown to contain `point`.
    #[must_use]
    pub fn expand(&self, point: &Vec2) -> Self {
        let begin = self.position.min(point);
        let end = self.end().max(point);
        Self::new(begin, end - begin)
    }

    /// Returns a copy inflated by `by` on every edge.
    #[must_use]
    pub fn grow(&self, by: f32) -> Self {
        self.grow_individual(by, by, by, by)
    }

    /// Returns a copy with each edge moved outward by its own amount.
    #[must_use]
    pub fn grow_individual(&self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(
            self.position - Vec2::new(left, top),
            self.size + Vec2::new(left + right, top + bottom),
        )
    }

    /// Slab test of the segment `from..to`.
    ///
    /// A segment that starts inside hits at `from` with a zero normal.
    #[must_use]
    pub fn intersects_segment(&self, from: &Vec2, to: &Vec2) -> Option<SegmentHit2> {
        check_rect_sizes("intersects_segment", &[self.size]);
        let hit = clip_segment(
            from.to_array(),
            to.to_array(),
            self.position.to_array(),
            self.end().to_array(),
        )?;
        Some(SegmentHit2 {
            point: *from + (*to - *from) * hit.t,
            normal: Vec2::from(hit.normal),
        })
    }

    /// Returns `true` when `other`, mapped through `xform`, overlaps this
    /// rect.
    ///
    /// The four mapped corners are first checked against this rect's own
    /// (untransformed) bounds; if every corner lies past one edge there is no
    /// overlap. Survivors go through a separating-axis test on the two basis
    /// columns of `xform`.
    #[must_use]
    pub fn intersects_transformed(&self, xform: &Transform2D, other: &Self) -> bool {
        check_rect_sizes("intersects_transformed", &[self.size, other.size]);
        let (o_lo, o_hi) = (other.position, other.end());
        let mapped = [
            xform.xform(&o_lo),
            xform.xform(&Vec2::new(o_hi.x(), o_lo.y())),
            xform.xform(&Vec2::new(o_lo.x(), o_hi.y())),
            xform.xform(&o_hi),
        ];

        let (lo, hi) = (self.position, self.end());
        if !mapped.iter().any(|p| p.y() > lo.y())
            || !mapped.iter().any(|p| p.y() < hi.y())
            || !mapped.iter().any(|p| p.x() > lo.x())
            || !mapped.iter().any(|p| p.x() < hi.x())
        {
            return false;
        }

        let own = [
            lo,
            Vec2::new(hi.x(), lo.y()),
            Vec2::new(lo.x(), hi.y()),
            hi,
        ];
        (0..2).all(|axis| {
            let axis = xform.column(axis);
            let (min_a, max_a) = project(&axis, &own);
            let (min_b, max_b) = project(&axis, &mapped);
            min_a <= max_b && min_b <= max_a
        })
    }

    /// Component-wise approximate equality of position and size.
    #[must_use]
    pub fn is_equal_approx(&self, other: &Self) -> bool {
        self.position.is_equal_approx(&other.position) && self.size.is_equal_approx(&other.size)
    }

    /// Returns `true` if position and size are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.size.is_finite()
    }
}

/// Interval covered by `points` projected onto `axis`.
fn project(axis: &Vec2, points: &[Vec2; 4]) -> (f32, f32) {
    let first = axis.dot(&points[0]);
    points[1..].iter().fold((first, first), |(min, max), p| {
        let d = axis.dot(p);
        (min.min(d), max.max(d))
    })
}

impl fmt::Display for Rect2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[P: {}, S: {}]", self.position, self.size)
    }
}
