use crate::tests::util::polygon;
use crate::{snap_round, Geometry};

fn all_on_grid(geometry: &Geometry, tolerance: f64) -> bool {
    geometry.rings().all(|ring| {
        ring.vertices().iter().all(|v| {
            let fx = (v[0] / tolerance).round() - v[0] / tolerance;
            let fy = (v[1] / tolerance).round() - v[1] / tolerance;
            fx.abs() < 1e-9 && fy.abs() < 1e-9
        })
    })
}

#[test]
fn zero_tolerance_passes_through() {
    let input = polygon::polygon(&[(0.13, 0.77), (1.01, 0.02), (0.5, 1.49)]);
    assert_eq!(snap_round(&input, 0.0).expect("snap failed"), input);
}

#[test]
fn snapped_vertices_lie_on_the_grid() {
    let input = polygon::polygon(&[(0.13, 0.77), (2.01, 0.02), (1.9, 2.24), (0.02, 1.49)]);
    let out = snap_round(&input, 0.5).expect("snap failed");
    assert!(all_on_grid(&out, 0.5));
}

#[test]
fn snapping_is_a_fixpoint() {
    let input = polygon::polygon(&[(0.13, 0.77), (2.01, 0.02), (1.9, 2.24), (0.02, 1.49)]);
    let once = snap_round(&input, 0.5).expect("snap failed");
    let twice = snap_round(&once, 0.5).expect("snap failed");
    assert_eq!(twice, once);
}

#[test]
fn near_coincident_vertices_collapse() {
    let input = polygon::polygon(&[(0.0, 0.0), (1.1, 0.05), (0.96, 1.04), (0.04, 0.96), (0.02, 1.03)]);
    let out = snap_round(&input, 1.0).expect("snap failed");
    match out {
        Geometry::Polygon(p) => {
            assert_eq!(p.shell().vertices(), [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        }
        other => panic!("expected a polygon, got {:?}", other),
    }
}

#[test]
fn constraint_crossings_are_snapped_in() {
    // The bowtie diagonals cross at (1, 1), which is not an input vertex.
    let out = snap_round(&polygon::bowtie(), 0.5).expect("snap failed");
    assert!(all_on_grid(&out, 0.5));
    assert!(out.rings().any(|ring| ring.vertices().contains(&[1.0, 1.0])));
}
