// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
#![allow(clippy::expect_used)]
use gimbal_geom::{Aabb, GeomError};
use gimbal_math::{Basis, Plane, Transform3D, Vec3};
use proptest::prelude::*;

fn unit_box() -> Aabb {
    Aabb::new(Vec3::ZERO, Vec3::ONE)
}

#[test]
fn ray_at_center_hits_near_face() {
    let hit = unit_box()
        .find_intersects_ray(&Vec3::new(0.5, 0.5, -5.0), &Vec3::UNIT_Z)
        .expect("ray should hit");
    assert!(!hit.inside);
    assert_eq!(hit.point, Vec3::new(0.5, 0.5, 0.0));
    assert_eq!(hit.normal, Vec3::new(0.0, 0.0, -1.0));
}

#[test]
fn ray_from_inside_reports_inside() {
    let b = unit_box();
    let from = Vec3::new(0.25, 0.5, 0.75);
    let hit = b
        .find_intersects_ray(&from, &Vec3::new(1.0, 0.2, 0.0))
        .expect("ray should hit");
    assert!(hit.inside);
    assert_eq!(b.intersects_ray(&from, &Vec3::new(1.0, 0.2, 0.0)), Some(from));
}

#[test]
fn ray_misses_behind_and_beside() {
    let b = unit_box();
    // Box is behind the origin.
    assert!(b.find_intersects_ray(&Vec3::new(0.5, 0.5, 5.0), &Vec3::UNIT_Z).is_none());
    // Zero direction component outside that axis' extent.
    assert!(b.find_intersects_ray(&Vec3::new(2.0, 0.5, -5.0), &Vec3::UNIT_Z).is_none());
    // Diagonal ray passing beside the box.
    assert!(b.find_intersects_ray(&Vec3::new(-1.0, 3.0, 0.5), &Vec3::new(1.0, 0.1, 0.0)).is_none());
}

#[test]
fn ray_entry_point_lies_on_surface() {
    let b = Aabb::new(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(2.0, 4.0, 6.0));
    let from = Vec3::new(-10.0, 1.0, 2.0);
    let hit = b.intersects_ray(&from, &Vec3::new(1.0, 0.05, -0.1)).expect("ray should hit");
    assert!((hit.x() + 1.0).abs() < 1e-5, "{hit}");
    assert!(b.grow(1e-4).has_point(&hit));
}

#[test]
fn ray_through_edge_takes_normal_from_later_axis() {
    let b = unit_box();
    // X and Y are entered at the same t; Y wins.
    let hit = b
        .find_intersects_ray(&Vec3::new(-1.0, -1.0, 0.5), &Vec3::new(1.0, 1.0, 0.0))
        .expect("ray should hit the edge");
    assert_eq!(hit.normal, Vec3::new(0.0, -1.0, 0.0));
    assert_eq!(hit.point, Vec3::new(0.0, 0.0, 0.5));

    // X and Z tie; Z wins, entering the far face from above.
    let hit = b
        .find_intersects_ray(&Vec3::new(2.0, 0.5, 2.0), &Vec3::new(-1.0, 0.0, -1.0))
        .expect("ray should hit the edge");
    assert_eq!(hit.normal, Vec3::new(0.0, 0.0, 1.0));
    assert_eq!(hit.point, Vec3::new(1.0, 0.5, 1.0));
}

#[test]
fn segment_rejected_on_each_axis_in_both_directions() {
    let b = unit_box();
    for axis in 0..3 {
        let mut before = Vec3::splat(0.5);
        let mut after = Vec3::splat(0.5);
        before.set_component(axis, -2.0);
        after.set_component(axis, -1.0);
        assert!(b.intersects_segment(&before, &after).is_none(), "axis {axis} below, forward");
        assert!(b.intersects_segment(&after, &before).is_none(), "axis {axis} below, backward");

        before.set_component(axis, 2.0);
        after.set_component(axis, 3.0);
        assert!(b.intersects_segment(&before, &after).is_none(), "axis {axis} above, forward");
        assert!(b.intersects_segment(&after, &before).is_none(), "axis {axis} above, backward");
    }
}

#[test]
fn segment_through_box_reports_entry_face() {
    let b = unit_box();
    let hit = b
        .intersects_segment(&Vec3::new(0.5, 3.0, 0.5), &Vec3::new(0.5, -1.0, 0.5))
        .expect("segment should hit");
    assert!(hit.point.is_equal_approx(&Vec3::new(0.5, 1.0, 0.5)), "{}", hit.point);
    assert_eq!(hit.normal, Vec3::UNIT_Y);

    let inside = b
        .intersects_segment(&Vec3::splat(0.5), &Vec3::new(4.0, 0.5, 0.5))
        .expect("segment starts inside");
    assert_eq!(inside.point, Vec3::splat(0.5));
    assert_eq!(inside.normal, Vec3::ZERO);
}

#[test]
fn segment_too_short_to_reach_misses() {
    let b = unit_box();
    assert!(b.intersects_segment(&Vec3::new(-3.0, 0.5, 0.5), &Vec3::new(-0.5, 0.5, 0.5)).is_none());
}

#[test]
fn plane_test_brackets_signed_distance() {
    let b = unit_box();
    assert!(b.intersects_plane(&Plane::new(Vec3::UNIT_Y, 0.5)));
    assert!(b.intersects_plane(&Plane::new(Vec3::UNIT_Y, 1.0)));
    assert!(!b.intersects_plane(&Plane::new(Vec3::UNIT_Y, 1.5)));
    assert!(!b.intersects_plane(&Plane::new(-Vec3::UNIT_Y, 0.5)));

    let diagonal = Plane::from_point_normal(&Vec3::splat(0.5), Vec3::ONE.normalize());
    assert!(b.intersects_plane(&diagonal));
    let off_corner = Plane::from_point_normal(&Vec3::splat(1.1), Vec3::ONE.normalize());
    assert!(!b.intersects_plane(&off_corner));
}

#[test]
fn axis_queries_keep_first_on_ties() {
    let b = Aabb::new(Vec3::ZERO, Vec3::new(2.0, 2.0, 1.0));
    assert_eq!(b.longest_axis_index(), 0);
    assert_eq!(b.longest_axis(), Vec3::UNIT_X);
    assert_eq!(b.shortest_axis_index(), 2);
    assert!((b.shortest_axis_size() - 1.0).abs() < f32::EPSILON);

    let cube = unit_box();
    assert_eq!(cube.longest_axis_index(), 0);
    assert_eq!(cube.shortest_axis_index(), 0);

    let tall = Aabb::new(Vec3::ZERO, Vec3::new(1.0, 3.0, 3.0));
    assert_eq!(tall.longest_axis(), Vec3::UNIT_Y);
    assert!((tall.longest_axis_size() - 3.0).abs() < f32::EPSILON);
    assert_eq!(tall.shortest_axis(), Vec3::UNIT_X);
}

#[test]
fn edges_cover_the_box() {
    let b = Aabb::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0));
    let mut total = 0.0;
    for i in 0..12 {
        let (from, to) = b.edge(i).expect("edge in range");
        assert!(b.has_point(&from) && b.has_point(&to), "edge {i}");
        let d = (to - from).abs();
        // Exactly one axis varies along an edge.
        assert_eq!(d.to_array().iter().filter(|c| **c > 0.0).count(), 1, "edge {i}");
        total += d.sum();
    }
    assert!((total - 4.0 * (4.0 + 5.0 + 6.0)).abs() < 1e-5);
    assert!(b.edge(0).expect("edge 0").0.y() <= 2.0);
    assert!(b.edge(4).expect("edge 4").0.y() >= 7.0);
}

#[test]
fn edge_out_of_range_is_an_error() {
    assert_eq!(unit_box().edge(12), Err(GeomError::EdgeIndexOutOfRange { index: 12 }));
    assert_eq!(
        unit_box().edge(usize::MAX),
        Err(GeomError::EdgeIndexOutOfRange { index: usize::MAX })
    );
}

#[test]
fn intersection_of_disjoint_boxes_is_default() {
    let a = unit_box();
    let b = Aabb::new(Vec3::new(0.5, 2.0, 0.5), Vec3::ONE);
    assert_eq!(a.intersection(&b), Aabb::default());
    let c = Aabb::new(Vec3::splat(0.5), Vec3::ONE);
    assert_eq!(a.intersection(&c), Aabb::new(Vec3::splat(0.5), Vec3::splat(0.5)));
}

#[test]
fn strict_and_inclusive_overlap_differ_on_touching_faces() {
    let a = unit_box();
    let touching = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::ONE);
    assert!(!a.intersects(&touching));
    assert!(a.intersects_inclusive(&touching));
    assert!(a.encloses(&Aabb::new(Vec3::splat(0.25), Vec3::splat(0.5))));
    assert!(!a.encloses(&touching));
}

#[test]
fn from_points_and_expand_build_bounds() {
    let pts = [
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(-2.0, 3.0, 1.0),
        Vec3::new(0.0, 0.0, -4.0),
    ];
    let b = Aabb::from_points(&pts).expect("non-empty");
    assert_eq!(b.position, Vec3::new(-2.0, -1.0, -4.0));
    assert_eq!(b.end(), Vec3::new(1.0, 3.0, 1.0));
    assert!(Aabb::from_points(&[]).is_none());

    let mut grown = unit_box();
    grown.expand_to(&Vec3::new(2.0, -1.0, 0.5));
    assert_eq!(grown, Aabb::new(Vec3::new(0.0, -1.0, 0.0), Vec3::new(2.0, 2.0, 1.0)));
    assert_eq!(unit_box().grow(0.5), Aabb::new(Vec3::splat(-0.5), Vec3::splat(2.0)));
}

#[test]
fn volume_and_surface_flags() {
    let flat = Aabb::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0));
    assert!(!flat.has_volume());
    assert!(flat.has_surface());
    assert!(!Aabb::default().has_surface());
    assert!((Aabb::new(Vec3::ZERO, Vec3::new(2.0, 3.0, 4.0)).volume() - 24.0).abs() < f32::EPSILON);
}

#[test]
fn transformed_bounds_rotated_box() {
    let xf = Transform3D::new(
        Basis::from_axis_angle(Vec3::UNIT_Z, core::f32::consts::FRAC_PI_2),
        Vec3::new(10.0, 0.0, 0.0),
    );
    let out = Aabb::new(Vec3::ZERO, Vec3::new(2.0, 1.0, 1.0)).transformed(&xf);
    assert!(out.position.is_equal_approx_with(&Vec3::new(9.0, 0.0, 0.0), 1e-5), "{out}");
    assert!(out.size.is_equal_approx_with(&Vec3::new(1.0, 2.0, 1.0), 1e-5), "{out}");
}

#[test]
fn negative_size_is_tolerated() {
    let inverted = Aabb::new(Vec3::ONE, Vec3::splat(-1.0));
    // Queries run on the inverted extents rather than failing.
    assert!(inverted.edge(3).is_ok());
    assert!((inverted.volume() + 1.0).abs() < f32::EPSILON);
    assert!(inverted.abs().intersects_plane(&Plane::new(Vec3::UNIT_X, 0.5)));
    assert_eq!(inverted.abs(), unit_box());
}

fn arb_box() -> impl Strategy<Value = Aabb> {
    (
        prop::array::uniform3(-50.0f32..50.0),
        prop::array::uniform3(0.0f32..20.0),
    )
        .prop_map(|(p, s)| Aabb::new(Vec3::from(p), Vec3::from(s)))
}

proptest! {
    #[test]
    fn merge_is_minimal_container(a in arb_box(), b in arb_box()) {
        let m = a.merge(&b);
        prop_assert!(m.grow(1e-3).encloses(&a));
        prop_assert!(m.grow(1e-3).encloses(&b));
        let corners = [a.position, a.end(), b.position, b.end()];
        let tight = Aabb::from_points(&corners).expect("non-empty");
        prop_assert_eq!(m.position, tight.position);
        prop_assert!(m.end().is_equal_approx_with(&tight.end(), 1e-4));
    }

    #[test]
    fn intersection_empty_iff_separated(a in arb_box(), b in arb_box()) {
        let i = a.intersection(&b);
        let separated = (0..3).any(|k| {
            a.position.component(k) > b.end().component(k) || b.position.component(k) > a.end().component(k)
        });
        if separated {
            prop_assert_eq!(i, Aabb::default());
        } else {
            prop_assert!(a.grow(1e-3).encloses(&i));
            prop_assert!(b.grow(1e-3).encloses(&i));
        }
    }

    #[test]
    fn every_endpoint_is_contained(b in arb_box(), idx in 0usize..8) {
        let corner = b.endpoint(idx).expect("index in range");
        prop_assert!(b.grow(1e-3).has_point(&corner));
        prop_assert!(b.support(&(corner - b.center())).is_equal_approx_with(&corner, 1e-3));
    }
}
