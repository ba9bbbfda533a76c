// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
#![allow(clippy::expect_used)]
use core::f32::consts::TAU;

use approx::assert_abs_diff_eq;
use gimbal_geom::triangulate::{polygon_area, triangulate};
use gimbal_geom::TriangulateError;
use gimbal_math::Vec2;
use proptest::prelude::*;

fn triangle_areas(contour: &[Vec2], indices: &[usize]) -> Vec<f32> {
    indices
        .chunks_exact(3)
        .map(|t| polygon_area(&[contour[t[0]], contour[t[1]], contour[t[2]]]))
        .collect()
}

fn regular_polygon(n: usize, radius: f32) -> Vec<Vec2> {
    (0..n)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let angle = TAU * i as f32 / n as f32;
            Vec2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

fn assert_covers(contour: &[Vec2], indices: &[usize]) {
    assert_eq!(indices.len(), 3 * (contour.len() - 2));
    assert!(indices.iter().all(|&i| i < contour.len()));
    let areas = triangle_areas(contour, indices);
    assert!(areas.iter().all(|&a| a >= -1e-6), "clockwise triangle in {areas:?}");
    let total: f32 = areas.iter().sum();
    let expected = polygon_area(contour).abs();
    assert!((total - expected).abs() < 1e-4 * expected.max(1.0), "{total} vs {expected}");
}

#[test]
fn single_triangle_is_returned_ccw() {
    let tri = [Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
    assert_eq!(triangulate(&tri).expect("triangle"), vec![2, 0, 1]);
}

#[test]
fn clockwise_square_yields_ccw_triangles() {
    let cw = [
        Vec2::new(0.0, 0.0),
        Vec2::new(0.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(1.0, 0.0),
    ];
    assert!(polygon_area(&cw) < 0.0);
    let indices = triangulate(&cw).expect("square");
    assert_covers(&cw, &indices);
}

#[test]
fn concave_chevron_uses_the_reflex_diagonal() {
    // Vertex 3 is reflex; the only valid split runs from it to vertex 1.
    let contour = [
        Vec2::new(0.0, 0.0),
        Vec2::new(2.0, 1.0),
        Vec2::new(0.0, 2.0),
        Vec2::new(1.0, 1.0),
    ];
    let indices = triangulate(&contour).expect("chevron");
    assert_covers(&contour, &indices);
    for t in indices.chunks_exact(3) {
        assert!(t.contains(&1) && t.contains(&3), "triangle {t:?} skips the diagonal");
    }
}

#[test]
fn l_shape_is_covered_exactly() {
    let contour = [
        Vec2::new(0.0, 0.0),
        Vec2::new(3.0, 0.0),
        Vec2::new(3.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(1.0, 3.0),
        Vec2::new(0.0, 3.0),
    ];
    let indices = triangulate(&contour).expect("L shape");
    assert_covers(&contour, &indices);
    assert_abs_diff_eq!(polygon_area(&contour), 5.0, epsilon = 1e-6);
}

#[test]
fn collinear_vertex_on_edge_is_covered() {
    let contour = [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(2.0, 0.0),
        Vec2::new(2.0, 2.0),
        Vec2::new(0.0, 2.0),
    ];
    let indices = triangulate(&contour).expect("square with midpoint");
    assert_covers(&contour, &indices);
}

#[test]
fn fully_collinear_input_degenerates_to_zero_area() {
    let line = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)];
    let indices = triangulate(&line).expect("relaxed pass accepts the flat triangle");
    assert_eq!(indices.len(), 3);
    assert!(triangle_areas(&line, &indices)[0].abs() < 1e-6);
}

#[test]
fn fewer_than_three_points_is_rejected() {
    assert_eq!(triangulate(&[]), Err(TriangulateError::TooFewPoints { len: 0 }));
    assert_eq!(
        triangulate(&[Vec2::ZERO, Vec2::UNIT_X]),
        Err(TriangulateError::TooFewPoints { len: 2 })
    );
}

proptest! {
    #[test]
    fn regular_polygons_triangulate_fully(n in 3usize..40, radius in 1.0f32..100.0, reverse in any::<bool>()) {
        let mut contour = regular_polygon(n, radius);
        if reverse {
            contour.reverse();
        }
        let indices = triangulate(&contour).expect("convex polygon");
        prop_assert_eq!(indices.len(), 3 * (n - 2));
        let mut used = vec![false; n];
        for &i in &indices {
            used[i] = true;
        }
        prop_assert!(used.iter().all(|&u| u));
        let total: f32 = triangle_areas(&contour, &indices).iter().sum();
        let expected = polygon_area(&contour).abs();
        prop_assert!((total - expected).abs() <= 1e-3 * expected);
    }
}
