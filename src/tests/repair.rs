use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::tests::util::{self, polygon};
use crate::{repair_odd_even, Geometry, MultiPolygon, Ring, RepairOptions};

fn repair(geometry: &Geometry) -> MultiPolygon {
    repair_odd_even(geometry, &RepairOptions::default()).expect("Repair failed")
}

fn rerepair(multipolygon: &MultiPolygon) -> MultiPolygon {
    repair(&Geometry::MultiPolygon(multipolygon.clone()))
}

#[test]
fn valid_square_is_a_fixed_point() {
    let out = repair(&polygon::unit_square());
    assert_eq!(out.len(), 1);
    assert_relative_eq!(out.area(), 1.0);
    util::assert_valid(&out);
    assert_eq!(rerepair(&out), out);
}

#[test]
fn figure_eight_splits_into_two_triangles() {
    let out = repair(&polygon::figure_eight());
    assert_eq!(out.len(), 2, "parity must separate the lobes, not merge them");
    for p in &out {
        assert_relative_eq!(p.area(), 1.0);
        assert!(p.holes().is_empty());
    }
    util::assert_valid(&out);
}

#[test]
fn bowtie_crossing_is_split_by_the_kernel() {
    // The crossing at (1, 1) is not an input vertex; the kernel introduces it.
    let out = repair(&polygon::bowtie());
    assert_eq!(out.len(), 2);
    assert_relative_eq!(out.area(), 2.0);
    assert!(out
        .iter()
        .all(|p| p.shell().vertices().contains(&[1.0, 1.0])));
    util::assert_valid(&out);
}

#[test]
fn duplicated_edge_cancels() {
    // The spike's segment is traversed twice, so it contributes no boundary.
    let out = repair(&polygon::spiked_square());
    assert_eq!(out.len(), 1);
    assert_relative_eq!(out.area(), 1.0);
    assert_eq!(out.polygons()[0].shell().len(), 4);
    util::assert_valid(&out);
}

#[test]
fn area_is_conserved_for_valid_input() {
    let l_shape = polygon::polygon(&[
        (0.0, 0.0),
        (4.0, 0.0),
        (4.0, 1.0),
        (1.0, 1.0),
        (1.0, 3.0),
        (0.0, 3.0),
    ]);
    let out = repair(&l_shape);
    assert_relative_eq!(out.area(), 7.0);
    util::assert_valid(&out);
}

#[test]
fn hole_is_nested_under_its_shell() {
    let input = polygon::polygon_with_holes(
        &[(0.0, 0.0), (3.0, 0.0), (3.0, 3.0), (0.0, 3.0)],
        &[&[(1.0, 1.0), (1.0, 2.0), (2.0, 2.0), (2.0, 1.0)]],
    );
    let out = repair(&input);
    assert_eq!(out.len(), 1);
    assert_eq!(out.polygons()[0].holes().len(), 1);
    assert_relative_eq!(out.area(), 8.0);
    util::assert_valid(&out);
}

#[test]
fn island_inside_hole_becomes_its_own_polygon() {
    let input = polygon::polygon_with_holes(
        &[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0), (0.0, 5.0)],
        &[
            &[(1.0, 1.0), (1.0, 4.0), (4.0, 4.0), (4.0, 1.0)],
            &[(2.0, 2.0), (2.0, 3.0), (3.0, 3.0), (3.0, 2.0)],
        ],
    );
    let out = repair(&input);
    assert_eq!(out.len(), 2);
    assert_relative_eq!(out.area(), 25.0 - 9.0 + 1.0);
    let outer = out
        .iter()
        .find(|p| p.holes().len() == 1)
        .expect("outer polygon with the hole");
    assert_relative_eq!(outer.area(), 16.0);
    util::assert_valid(&out);
}

#[test]
fn reversed_winding_is_normalized() {
    // Same square, clockwise input; the output shell is counter-clockwise.
    let input = polygon::polygon(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
    let out = repair(&input);
    assert_eq!(out.len(), 1);
    assert!(out.polygons()[0].shell().is_ccw());
    assert_relative_eq!(out.area(), 1.0);
}

#[test]
fn repeated_vertices_are_tolerated() {
    let input = polygon::polygon(&[
        (0.0, 0.0),
        (0.0, 0.0),
        (1.0, 0.0),
        (1.0, 1.0),
        (1.0, 1.0),
        (0.0, 1.0),
    ]);
    let out = repair(&input);
    assert_eq!(out.len(), 1);
    assert_relative_eq!(out.area(), 1.0);
}

#[test]
fn collinear_input_yields_empty_output() {
    let out = repair(&polygon::polygon(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]));
    assert!(out.is_empty());
}

#[test]
fn empty_input_yields_empty_output() {
    let out = repair(&Geometry::Polygon(crate::Polygon::new(Ring::new(Vec::new()), Vec::new())));
    assert!(out.is_empty());
}

#[test]
fn repair_is_idempotent() {
    for input in [polygon::figure_eight(), polygon::bowtie(), polygon::spiked_square()].iter() {
        let once = repair(input);
        assert_eq!(rerepair(&once), once);
    }
}

#[test]
fn random_rings_repair_to_valid_output() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let n = rng.gen_range(4..12);
        let mut points = Vec::with_capacity(n);
        for _ in 0..n {
            // Half-integer coordinates provoke duplicate vertices and
            // collinear runs alongside the self-intersections.
            points.push([
                rng.gen_range(0..=20) as f64 * 0.5,
                rng.gen_range(0..=20) as f64 * 0.5,
            ]);
        }
        let input = Geometry::Polygon(crate::Polygon::new(Ring::new(points), Vec::new()));
        let out = repair(&input);
        util::assert_valid(&out);
        assert_eq!(rerepair(&out), out, "repair must be a fixed point on its own output");
    }
}

#[test]
fn min_area_option_filters_output() {
    let options = RepairOptions {
        min_area: 1.5,
        ..RepairOptions::default()
    };
    // Both figure-eight lobes have area 1.0 and fall below the threshold.
    let out = repair_odd_even(&polygon::figure_eight(), &options).expect("Repair failed");
    assert!(out.is_empty());
}
