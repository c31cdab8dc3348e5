use approx::assert_relative_eq;

use crate::tests::util::polygon::ring;
use crate::{MultiPolygon, Polygon};

fn rect(x: f64, w: f64, h: f64) -> Polygon {
    Polygon::new(ring(&[(x, 0.0), (x + w, 0.0), (x + w, h), (x, h)]), Vec::new())
}

fn sample() -> MultiPolygon {
    // Areas 0.5, 3.0 and 10.0.
    let mut mp = MultiPolygon::new();
    mp.push(rect(0.0, 1.0, 0.5));
    mp.push(rect(2.0, 1.0, 3.0));
    mp.push(rect(4.0, 1.0, 10.0));
    mp
}

#[test]
fn removes_polygons_below_the_threshold() {
    let mut mp = sample();
    mp.remove_small_polygons(1.0);
    assert_eq!(mp.len(), 2);
    let mut areas: Vec<f64> = mp.iter().map(Polygon::area).collect();
    areas.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_relative_eq!(areas[0], 3.0);
    assert_relative_eq!(areas[1], 10.0);
}

#[test]
fn zero_threshold_keeps_everything() {
    let mut mp = sample();
    mp.remove_small_polygons(0.0);
    assert_eq!(mp.len(), 3);
}

#[test]
fn threshold_applies_to_net_area() {
    // Shell 2x2 with a 1x1 hole: net area 3.
    let mut mp = MultiPolygon::new();
    mp.push(Polygon::new(
        ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]),
        vec![ring(&[(0.5, 0.5), (0.5, 1.5), (1.5, 1.5), (1.5, 0.5)])],
    ));
    let mut kept = mp.clone();
    kept.remove_small_polygons(2.5);
    assert_eq!(kept.len(), 1);
    mp.remove_small_polygons(3.5);
    assert!(mp.is_empty());
}
