// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;

use gimbal_math::{Plane, Transform3D, Vec3};

use crate::diag::check_aabb_sizes;
use crate::error::GeomError;
use crate::types::slab::clip_segment;

/// Axis-aligned bounding box stored as a corner plus an extent.
///
/// Invariants:
/// - The box spans `[position, position + size]` on each axis.
/// - `size` components are expected to be non-negative. Negative sizes are
///   not rejected: queries run on the inverted extents and debug builds log a
///   warning. Call [`Aabb::abs`] for the canonical box.
/// - A zero `size` is the degenerate (empty) box; it is also the `Default`.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    /// Minimum corner (for non-negative sizes).
    pub position: Vec3,
    /// Extent along each axis.
    pub size: Vec3,
}

/// Result of [`Aabb::find_intersects_ray`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RayHit {
    /// Entry point on the box surface.
    ///
    /// When the origin is inside, this is the point where the ray line
    /// crosses the face behind the origin.
    pub point: Vec3,
    /// Unit normal of the face the ray enters through.
    pub normal: Vec3,
    /// `true` when the ray origin lies inside the box.
    pub inside: bool,
}

/// Result of [`Aabb::intersects_segment`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SegmentHit {
    /// First point of the segment inside the box.
    pub point: Vec3,
    /// Face normal at `point`; zero when the segment starts inside.
    pub normal: Vec3,
}

impl Aabb {
    /// Constructs a box from its minimum corner and size.
    #[must_use]
    pub const fn new(position: Vec3, size: Vec3) -> Self {
        Self { position, size }
    }

    /// Builds the minimal box that contains all `points`.
    ///
    /// Returns `None` when `points` is empty.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = Self::new(*first, Vec3::ZERO);
        for p in rest {
            aabb.expand_to(p);
        }
        Some(aabb)
    }

    /// Opposite corner, `position + size`.
    #[must_use]
    pub fn end(&self) -> Vec3 {
        self.position + self.size
    }

    /// Moves the far corner to `end`, keeping `position`.
    pub fn set_end(&mut self, end: Vec3) {
        self.size = end - self.position;
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.position + self.size * 0.5
    }

    /// Equivalent box with a non-negative size.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::new(self.position + self.size.min(&Vec3::ZERO), self.size.abs())
    }

    /// Product of the size components.
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.size.x() * self.size.y() * self.size.z()
    }

    /// `true` when every size component is positive.
    #[must_use]
    pub fn has_volume(&self) -> bool {
        self.size.x() > 0.0 && self.size.y() > 0.0 && self.size.z() > 0.0
    }

    /// `true` when any size component is positive.
    #[must_use]
    pub fn has_surface(&self) -> bool {
        self.size.x() > 0.0 || self.size.y() > 0.0 || self.size.z() > 0.0
    }

    /// Returns `true` if `point` lies in the box (inclusive on faces).
    #[must_use]
    pub fn has_point(&self, point: &Vec3) -> bool {
        check_aabb_sizes("has_point", &[self.size]);
        let p = point.to_array();
        let lo = self.position.to_array();
        let hi = self.end().to_array();
        (0..3).all(|i| (lo[i]..=hi[i]).contains(&p[i]))
    }

    /// Returns `true` if `other` lies entirely inside this box (inclusive).
    #[must_use]
    pub fn encloses(&self, other: &Self) -> bool {
        check_aabb_sizes("encloses", &[self.size, other.size]);
        let (a_lo, a_hi) = (self.position.to_array(), self.end().to_array());
        let (b_lo, b_hi) = (other.position.to_array(), other.end().to_array());
        (0..3).all(|i| a_lo[i] <= b_lo[i] && a_hi[i] >= b_hi[i])
    }

    /// Returns `true` if the interiors overlap; touching faces do not count.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        check_aabb_sizes("intersects", &[self.size, other.size]);
        let (a_lo, a_hi) = (self.position.to_array(), self.end().to_array());
        let (b_lo, b_hi) = (other.position.to_array(), other.end().to_array());
        (0..3).all(|i| a_lo[i] < b_hi[i] && a_hi[i] > b_lo[i])
    }

    /// Returns `true` if the boxes overlap or touch.
    #[must_use]
    pub fn intersects_inclusive(&self, other: &Self) -> bool {
        check_aabb_sizes("intersects_inclusive", &[self.size, other.size]);
        let (a_lo, a_hi) = (self.position.to_array(), self.end().to_array());
        let (b_lo, b_hi) = (other.position.to_array(), other.end().to_array());
        (0..3).all(|i| a_lo[i] <= b_hi[i] && a_hi[i] >= b_lo[i])
    }

    /// Grows this box in place to contain `other`.
    pub fn merge_with(&mut self, other: &Self) {
        check_aabb_sizes("merge_with", &[self.size, other.size]);
        let min_pos = self.position.min(&other.position);
        let max_end = self.end().max(&other.end());
        self.position = min_pos;
        self.size = max_end - min_pos;
    }

    /// Returns the smallest box containing both boxes.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let mut aabb = *self;
        aabb.merge_with(other);
        aabb
    }

    /// Returns the overlap of two boxes, or the default (empty) box when any
    /// axis range is disjoint.
    ///
    /// Touching boxes produce a flat box of zero thickness on the shared
    /// face.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        check_aabb_sizes("intersection", &[self.size, other.size]);
        let (src_min, src_max) = (self.position.to_array(), self.end().to_array());
        let (dst_min, dst_max) = (other.position.to_array(), other.end().to_array());

        let mut min = [0.0; 3];
        let mut max = [0.0; 3];
        for i in 0..3 {
            min[i] = src_min[i].max(dst_min[i]);
            max[i] = src_max[i].min(dst_max[i]);
            if min[i] > max[i] {
                return Self::default();
            }
        }
        let min = Vec3::from(min);
        Self::new(min, Vec3::from(max) - min)
    }

    /// Grows this box in place so it contains `point`.
    pub fn expand_to(&mut self, point: &Vec3) {
        let begin = self.position.min(point);
        let end = self.end().max(point);
        self.position = begin;
        self.size = end - begin;
    }

    /// Returns a copy grown to contain `point`.
    #[must_use]
    pub fn expand(&self, point: &Vec3) -> Self {
        let mut aabb = *self;
        aabb.expand_to(point);
        aabb
    }

    /// Inflates the box in place by `by` on every face.
    pub fn grow_by(&mut self, by: f32) {
        self.position -= Vec3::splat(by);
        self.size += Vec3::splat(by * 2.0);
    }

    /// Returns a copy inflated by `by` on every face.
    #[must_use]
    pub fn grow(&self, by: f32) -> Self {
        let mut aabb = *self;
        aabb.grow_by(by);
        aabb
    }

    /// Corner `index` in `0..8`.
    ///
    /// Bit 2 of the index selects the far X face, bit 1 the far Y face and
    /// bit 0 the far Z face.
    pub fn endpoint(&self, index: usize) -> Result<Vec3, GeomError> {
        if index >= 8 {
            return Err(GeomError::CornerIndexOutOfRange { index });
        }
        let lo = self.position.to_array();
        let hi = self.end().to_array();
        let pick = |axis: usize, bit: usize| if index & bit == 0 { lo[axis] } else { hi[axis] };
        Ok(Vec3::new(pick(0, 4), pick(1, 2), pick(2, 1)))
    }

    /// Farthest point of the box in direction `dir`.
    ///
    /// Zero direction components select the near face.
    #[must_use]
    pub fn support(&self, dir: &Vec3) -> Vec3 {
        let half = self.size * 0.5;
        let center = self.position + half;
        let h = half.to_array();
        let d = dir.to_array();
        let offset: [f32; 3] = core::array::from_fn(|i| if d[i] > 0.0 { h[i] } else { -h[i] });
        center + Vec3::from(offset)
    }

    /// Edge `index` in `0..12` as `(from, to)`.
    ///
    /// Edges 0–3 run around the bottom face (`y = position.y`), 4–7 around
    /// the top face and 8–11 are the vertical edges.
    pub fn edge(&self, index: usize) -> Result<(Vec3, Vec3), GeomError> {
        let [px, py, pz] = self.position.to_array();
        let [ex, ey, ez] = self.end().to_array();
        let v = Vec3::new;
        let edge = match index {
            0 => (v(ex, py, pz), v(px, py, pz)),
            1 => (v(ex, py, ez), v(ex, py, pz)),
            2 => (v(px, py, ez), v(ex, py, ez)),
            3 => (v(px, py, pz), v(px, py, ez)),
            4 => (v(px, ey, pz), v(ex, ey, pz)),
            5 => (v(ex, ey, pz), v(ex, ey, ez)),
            6 => (v(ex, ey, ez), v(px, ey, ez)),
            7 => (v(px, ey, ez), v(px, ey, pz)),
            8 => (v(px, py, ez), v(px, ey, ez)),
            9 => (v(px, py, pz), v(px, ey, pz)),
            10 => (v(ex, py, pz), v(ex, ey, pz)),
            11 => (v(ex, py, ez), v(ex, ey, ez)),
            _ => return Err(GeomError::EdgeIndexOutOfRange { index }),
        };
        Ok(edge)
    }

    /// Unit vector along the longest axis; ties keep the earlier axis.
    #[must_use]
    pub fn longest_axis(&self) -> Vec3 {
        Vec3::axis(self.longest_axis_index())
    }

    /// Index (`0 = x`) of the longest axis; ties keep the earlier axis.
    #[must_use]
    pub fn longest_axis_index(&self) -> usize {
        let s = self.size.to_array();
        let mut axis = 0;
        let mut max_size = s[0];
        for (i, &len) in s.iter().enumerate().skip(1) {
            if len > max_size {
                axis = i;
                max_size = len;
            }
        }
        axis
    }

    /// Size along the longest axis.
    #[must_use]
    pub fn longest_axis_size(&self) -> f32 {
        self.size.component(self.longest_axis_index())
    }

    /// Unit vector along the shortest axis; ties keep the earlier axis.
    #[must_use]
    pub fn shortest_axis(&self) -> Vec3 {
        Vec3::axis(self.shortest_axis_index())
    }

    /// Index (`0 = x`) of the shortest axis; ties keep the earlier axis.
    #[must_use]
    pub fn shortest_axis_index(&self) -> usize {
        let s = self.size.to_array();
        let mut axis = 0;
        let mut min_size = s[0];
        for (i, &len) in s.iter().enumerate().skip(1) {
            if len < min_size {
                axis = i;
                min_size = len;
            }
        }
        axis
    }

    /// Size along the shortest axis.
    #[must_use]
    pub fn shortest_axis_size(&self) -> f32 {
        self.size.component(self.shortest_axis_index())
    }

    /// Slab test of the ray `from + t·dir` (`t` unbounded above, any sign
    /// allowed while the origin is inside).
    ///
    /// A zero direction component requires `from` to lie within that axis'
    /// extent. The axis with the latest entry parameter (ties go to the later
    /// axis) supplies the normal. Returns `None` when the box lies behind the
    /// origin or the slabs do not overlap.
    #[must_use]
    pub fn find_intersects_ray(&self, from: &Vec3, dir: &Vec3) -> Option<RayHit> {
        check_aabb_sizes("find_intersects_ray", &[self.size]);
        let lo = self.position.to_array();
        let hi = self.end().to_array();
        let o = from.to_array();
        let d = dir.to_array();

        let mut tmin = -1e20_f32;
        let mut tmax = 1e20_f32;
        let mut axis = 0;

        for i in 0..3 {
            if d[i] != 0.0 {
                let inv_dir = 1.0 / d[i];
                let mut t1 = (lo[i] - o[i]) * inv_dir;
                let mut t2 = (hi[i] - o[i]) * inv_dir;
                if t1 > t2 {
                    core::mem::swap(&mut t1, &mut t2);
                }
                if t1 >= tmin {
                    tmin = t1;
                    axis = i;
                }
                if t2 < tmax {
                    if t2 < 0.0 {
                        return None;
                    }
                    tmax = t2;
                }
                if tmin > tmax {
                    return None;
                }
            } else if !(lo[i]..=hi[i]).contains(&o[i]) {
                return None;
            }
        }

        let forward = d[axis] >= 0.0;
        let mut point = *from + *dir * tmin;
        point.set_component(axis, if forward { lo[axis] } else { hi[axis] });
        let normal = Vec3::ZERO.with_component(axis, if forward { -1.0 } else { 1.0 });
        Some(RayHit {
            point,
            normal,
            inside: tmin < 0.0,
        })
    }

    /// First point where the ray `from + t·dir` meets the box, or `from`
    /// itself when it starts inside.
    #[must_use]
    pub fn intersects_ray(&self, from: &Vec3, dir: &Vec3) -> Option<Vec3> {
        self.find_intersects_ray(from, dir)
            .map(|hit| if hit.inside { *from } else { hit.point })
    }

    /// Slab test of the segment `from..to`.
    ///
    /// A segment that starts inside hits at `from` with a zero normal.
    #[must_use]
    pub fn intersects_segment(&self, from: &Vec3, to: &Vec3) -> Option<SegmentHit> {
        check_aabb_sizes("intersects_segment", &[self.size]);
        let hit = clip_segment(
            from.to_array(),
            to.to_array(),
            self.position.to_array(),
            self.end().to_array(),
        )?;
        Some(SegmentHit {
            point: *from + (*to - *from) * hit.t,
            normal: Vec3::from(hit.normal),
        })
    }

    /// Returns `true` when the plane passes through the box (inclusive).
    ///
    /// Each normal component picks which corner coordinate contributes to
    /// the minimum and maximum signed distance, so only two corners are
    /// evaluated.
    #[must_use]
    pub fn intersects_plane(&self, plane: &Plane) -> bool {
        check_aabb_sizes("intersects_plane", &[self.size]);
        let n = plane.normal.to_array();
        let lo = self.position.to_array();
        let hi = self.end().to_array();

        let mut min_proj = 0.0;
        let mut max_proj = 0.0;
        for i in 0..3 {
            if n[i] >= 0.0 {
                min_proj += lo[i] * n[i];
                max_proj += hi[i] * n[i];
            } else {
                min_proj += hi[i] * n[i];
                max_proj += lo[i] * n[i];
            }
        }
        min_proj -= plane.d;
        max_proj -= plane.d;

        min_proj <= 0.0 && max_proj >= 0.0
    }

    /// Bounds of this box after mapping its eight corners through `xform`.
    #[must_use]
    pub fn transformed(&self, xform: &Transform3D) -> Self {
        let [minx, miny, minz] = self.position.to_array();
        let [maxx, maxy, maxz] = self.end().to_array();
        let corners = [
            Vec3::new(minx, miny, minz),
            Vec3::new(minx, miny, maxz),
            Vec3::new(minx, maxy, minz),
            Vec3::new(minx, maxy, maxz),
            Vec3::new(maxx, miny, minz),
            Vec3::new(maxx, miny, maxz),
            Vec3::new(maxx, maxy, minz),
            Vec3::new(maxx, maxy, maxz),
        ];
        let mut out = Self::new(xform.xform(&corners[0]), Vec3::ZERO);
        for c in &corners[1..] {
            out.expand_to(&xform.xform(c));
        }
        out
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

impl fmt::Display for Aabb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[P: {}, S: {}]", self.position, self.size)
    }
}
