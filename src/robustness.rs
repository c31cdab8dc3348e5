use spade::Triangulation;

use crate::triangulation::{dist2, RepairTriangulation};

/// Quantifies how close the triangulated input sits to a configuration
/// that would defeat exact predicates: the minimum squared separation
/// between a constrained edge and the opposite vertices of its two
/// incident faces. In a Delaunay-class triangulation a geometrically close
/// vertex/edge pair is always face-adjacent, so the scan is linear.
///
/// Returns `f64::INFINITY` when the triangulation carries no constraints.
/// Diagnostic only; the value never alters the repaired geometry.
pub fn compute_robustness(triangulation: &RepairTriangulation) -> f64 {
    let cdt = triangulation.cdt();
    let mut min = f64::INFINITY;
    for edge in cdt.directed_edges() {
        if !edge.as_undirected().is_constraint_edge() {
            continue;
        }
        if edge.face().is_outer() {
            continue;
        }
        let a = edge.from().position();
        let b = edge.to().position();
        // The face is a triangle a, b, c; next() leads to its third vertex.
        let c = edge.next().to().position();
        let d2 = point_segment_dist2([c.x, c.y], [a.x, a.y], [b.x, b.y]);
        if d2 < min {
            min = d2;
        }
    }
    min
}

fn point_segment_dist2(p: [f64; 2], a: [f64; 2], b: [f64; 2]) -> f64 {
    let ab2 = dist2(a, b);
    if ab2 == 0.0 {
        return dist2(p, a);
    }
    let t = ((p[0] - a[0]) * (b[0] - a[0]) + (p[1] - a[1]) * (b[1] - a[1])) / ab2;
    let t = t.max(0.0).min(1.0);
    let proj = [a[0] + t * (b[0] - a[0]), a[1] + t * (b[1] - a[1])];
    dist2(p, proj)
}
