use tracing::debug;

use crate::errors::RepairError;
use crate::geom::{Geometry, MultiPolygon, Polygon, Ring};
use crate::triangulation::RepairTriangulation;

/// Bound on snap-round passes. Iterated snap rounding converges in a
/// handful of passes for realistic tolerances; the cap guards against
/// pathological oscillation.
const MAX_ROUNDS: usize = 32;

/// Iterated snap rounding: perturbs every vertex of the geometry onto a
/// grid of spacing `tolerance`, re-triangulating between passes so that
/// constraint intersection points are snapped as well, until a pass moves
/// nothing or [MAX_ROUNDS] is reached.
///
/// With `tolerance <= 0` the input passes through unmodified. Every vertex
/// of the result is an integer multiple of `tolerance` from the origin, and
/// re-running on already-snapped output is a no-op.
pub fn snap_round(geometry: &Geometry, tolerance: f64) -> Result<Geometry, RepairError> {
    if tolerance <= 0.0 {
        return Ok(geometry.clone());
    }

    let mut shape: Vec<Vec<Vec<[f64; 2]>>> = match geometry {
        Geometry::Polygon(p) => vec![p.rings().map(|r| r.vertices().to_vec()).collect()],
        Geometry::MultiPolygon(mp) => mp
            .iter()
            .map(|p| p.rings().map(|r| r.vertices().to_vec()).collect())
            .collect(),
    };

    for round in 0..MAX_ROUNDS {
        let moved = snap_pass(&mut shape, tolerance)?;
        debug!(round, moved, tolerance, "snap-round pass");
        if !moved {
            break;
        }
    }

    Ok(rebuild(geometry, shape))
}

/// One pass: snap all vertices, collapse duplicates, triangulate the whole
/// geometry jointly, and splice every constraint-splitting vertex back into
/// its ring. Returns whether anything changed.
fn snap_pass(shape: &mut Vec<Vec<Vec<[f64; 2]>>>, tolerance: f64) -> Result<bool, RepairError> {
    let mut moved = false;

    for polygon in shape.iter_mut() {
        for ring in polygon.iter_mut() {
            let before = ring.clone();
            for v in ring.iter_mut() {
                *v = snap_to_grid(*v, tolerance);
            }
            dedupe_closed(ring);
            if *ring != before {
                moved = true;
            }
        }
    }

    // Intersections are computed across the whole geometry at once, the
    // same subdivision the repair itself will see.
    let mut triangulation = RepairTriangulation::new();
    let mut handles: Vec<Vec<Vec<spade::handles::FixedVertexHandle>>> = Vec::with_capacity(shape.len());
    for polygon in shape.iter() {
        let mut polygon_handles = Vec::with_capacity(polygon.len());
        for ring in polygon.iter() {
            let mut ring_handles = Vec::with_capacity(ring.len());
            for &v in ring.iter() {
                ring_handles.push(triangulation.insert(v)?);
            }
            polygon_handles.push(ring_handles);
        }
        handles.push(polygon_handles);
    }
    for ring_handles in handles.iter().flatten() {
        let n = ring_handles.len();
        for i in 0..n {
            let a = ring_handles[i];
            let b = ring_handles[(i + 1) % n];
            if a != b {
                triangulation.add_constraint(a, b);
            }
        }
    }

    for (polygon, polygon_handles) in shape.iter_mut().zip(handles.iter()) {
        for (ring, ring_handles) in polygon.iter_mut().zip(polygon_handles.iter()) {
            let n = ring_handles.len();
            if n < 2 {
                continue;
            }
            let mut rebuilt: Vec<[f64; 2]> = Vec::with_capacity(n);
            for i in 0..n {
                let a = ring_handles[i];
                let b = ring_handles[(i + 1) % n];
                if a == b {
                    continue;
                }
                let chain = triangulation.constraint_chain(a, b)?;
                // All chain vertices except the far endpoint; the next
                // segment contributes that one.
                for &v in &chain.vertices[..chain.vertices.len() - 1] {
                    rebuilt.push(snap_to_grid(triangulation.position(v), tolerance));
                }
            }
            dedupe_closed(&mut rebuilt);
            if rebuilt != *ring {
                *ring = rebuilt;
                moved = true;
            }
        }
    }

    Ok(moved)
}

fn rebuild(original: &Geometry, shape: Vec<Vec<Vec<[f64; 2]>>>) -> Geometry {
    let mut polygons: Vec<Polygon> = shape
        .into_iter()
        .map(|rings| {
            let mut rings = rings.into_iter().map(Ring::new);
            let shell = rings.next().unwrap_or_else(|| Ring::new(Vec::new()));
            Polygon::new(shell, rings.collect())
        })
        .collect();
    match original {
        Geometry::Polygon(_) => Geometry::Polygon(polygons.remove(0)),
        Geometry::MultiPolygon(_) => Geometry::MultiPolygon(MultiPolygon::from(polygons)),
    }
}

fn snap_to_grid(v: [f64; 2], tolerance: f64) -> [f64; 2] {
    [(v[0] / tolerance).round() * tolerance, (v[1] / tolerance).round() * tolerance]
}

/// Removes consecutive duplicate vertices of a closed loop, including the
/// wrap-around pair.
fn dedupe_closed(ring: &mut Vec<[f64; 2]>) {
    ring.dedup();
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
}
