use crate::{Geometry, MultiPolygon, Polygon, Ring};

pub fn ring(points: &[(f64, f64)]) -> Ring {
    Ring::new(points.iter().map(|&(x, y)| [x, y]).collect())
}

pub fn polygon(shell: &[(f64, f64)]) -> Geometry {
    Geometry::Polygon(Polygon::new(ring(shell), Vec::new()))
}

pub fn polygon_with_holes(shell: &[(f64, f64)], holes: &[&[(f64, f64)]]) -> Geometry {
    Geometry::Polygon(Polygon::new(ring(shell), holes.iter().map(|h| ring(h)).collect()))
}

pub fn multipolygon(shells: &[&[(f64, f64)]]) -> Geometry {
    let mut mp = MultiPolygon::new();
    for shell in shells {
        mp.push(Polygon::new(ring(shell), Vec::new()));
    }
    Geometry::MultiPolygon(mp)
}

pub fn unit_square() -> Geometry {
    polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
}

/// A figure-eight traversed as a single ring: two triangles sharing the
/// vertex (1, 1).
pub fn figure_eight() -> Geometry {
    polygon(&[(0.0, 0.0), (2.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.0, 2.0), (1.0, 1.0)])
}

/// A bowtie whose crossing at (1, 1) is implicit: the kernel has to split
/// the two diagonals there.
pub fn bowtie() -> Geometry {
    polygon(&[(0.0, 0.0), (2.0, 0.0), (0.0, 2.0), (2.0, 2.0)])
}

/// A unit square with a dangling spike: the segment (1,1)->(2,1) is
/// traversed twice and must cancel under the even-odd rule.
pub fn spiked_square() -> Geometry {
    polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (2.0, 1.0), (1.0, 1.0), (0.0, 1.0)])
}

/// Two axis-aligned squares overlapping in a unit square.
pub fn overlapping_squares() -> Geometry {
    multipolygon(&[
        &[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)],
        &[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)],
    ])
}

/// A self-intersecting star polygon with `n` (odd) vertices, every vertex
/// skipping two positions around a circle.
pub fn large_star(n: usize) -> Geometry {
    let n = n | 1;
    let mut points = Vec::with_capacity(n);
    for i in 0..n {
        let theta = std::f64::consts::PI * 2.0 * ((2 * i) % n) as f64 / n as f64;
        let (sin, cos) = theta.sin_cos();
        points.push([cos * 100.0, sin * 100.0]);
    }
    Geometry::Polygon(Polygon::new(Ring::new(points), Vec::new()))
}
