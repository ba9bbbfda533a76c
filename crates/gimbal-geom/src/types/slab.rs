// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Slab clipping of a segment against an axis-aligned box, shared by the
//! 2D and 3D box types.

/// Parametric entry into the box along a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SlabHit<const N: usize> {
    /// Entry parameter in `[0, 1]`; `0` when the segment starts inside.
    pub(crate) t: f32,
    /// Outward face normal at the entry, or all zeros when the segment
    /// starts inside.
    pub(crate) normal: [f32; N],
}

/// Clips `from..to` against the box `[begin, end]` one axis at a time.
///
/// Each axis is handled in its direction of travel so a single division by
/// the (non-zero) axis length is enough; the axis that last raised the lower
/// bound supplies the normal.
pub(crate) fn clip_segment<const N: usize>(
    from: [f32; N],
    to: [f32; N],
    begin: [f32; N],
    end: [f32; N],
) -> Option<SlabHit<N>> {
    let mut t_min = 0.0_f32;
    let mut t_max = 1.0_f32;
    let mut entered: Option<(usize, f32)> = None;

    for i in 0..N {
        let (seg_from, seg_to) = (from[i], to[i]);
        let (lo, hi) = (begin[i], end[i]);

        let (near, far, sign) = if seg_from < seg_to {
            if seg_from > hi || seg_to < lo {
                return None;
            }
            let inv_length = 1.0 / (seg_to - seg_from);
            let near = if seg_from < lo { (lo - seg_from) * inv_length } else { 0.0 };
            let far = if seg_to > hi { (hi - seg_from) * inv_length } else { 1.0 };
            (near, far, -1.0)
        } else {
            if seg_to > hi || seg_from < lo {
                return None;
            }
            // `seg_from > hi` or `seg_to < lo` imply a strictly decreasing
            // axis, so the divisions below never see a zero length.
            let length = seg_to - seg_from;
            let near = if seg_from > hi { (hi - seg_from) / length } else { 0.0 };
            let far = if seg_to < lo { (lo - seg_from) / length } else { 1.0 };
            (near, far, 1.0)
        };

        if near > t_min {
            t_min = near;
            entered = Some((i, sign));
        }
        if far < t_max {
            t_max = far;
        }
        if t_max < t_min {
            return None;
        }
    }

    let mut normal = [0.0; N];
    if let Some((axis, sign)) = entered {
        normal[axis] = sign;
    }
    Some(SlabHit { t: t_min, normal })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entering_through_min_face_reports_negative_normal() {
        let hit = clip_segment([-1.0, 0.5], [1.0, 0.5], [0.0, 0.0], [1.0, 1.0]);
        assert_eq!(hit, Some(SlabHit { t: 0.5, normal: [-1.0, 0.0] }));
    }

    #[test]
    fn starting_inside_has_zero_normal() {
        let hit = clip_segment([0.5, 0.5], [3.0, 0.5], [0.0, 0.0], [1.0, 1.0]);
        assert_eq!(hit, Some(SlabHit { t: 0.0, normal: [0.0, 0.0] }));
    }

    #[test]
    fn degenerate_point_outside_misses() {
        assert_eq!(clip_segment([2.0], [2.0], [0.0], [1.0]), None);
        assert!(clip_segment([0.5], [0.5], [0.0], [1.0]).is_some());
    }
}
