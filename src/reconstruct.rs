use spade::Triangulation;
use tracing::debug;

use crate::errors::{RepairError, TopologyError};
use crate::geom::{MultiPolygon, Polygon, Ring};
use crate::tag::FaceTags;
use crate::triangulation::RepairTriangulation;

/// Walks the label boundary of the tagged triangulation into closed rings
/// and groups them into polygons with correct hole nesting.
///
/// Boundary edges are walked with the interior on the left, so shells come
/// out counter-clockwise and holes clockwise without a separate orientation
/// pass. At a pinch vertex the walk takes the tightest turn through the
/// interior fan, which splits figure-eight configurations into separate
/// simple rings.
pub(crate) fn reconstruct(triangulation: &RepairTriangulation, tags: &FaceTags) -> Result<MultiPolygon, RepairError> {
    let cdt = triangulation.cdt();
    let edge_count = cdt.num_directed_edges();

    // A directed edge starts a boundary step if the face on its left is
    // interior and the face on its right is exterior.
    let mut is_start = vec![false; edge_count];
    let mut degree = vec![0u32; cdt.num_vertices()];
    for edge in cdt.directed_edges() {
        let left = tags.interior_index(edge.face().fix().index());
        let right = tags.interior_index(edge.rev().face().fix().index());
        if left && !right {
            is_start[edge.fix().index()] = true;
            degree[edge.from().fix().index()] += 1;
            degree[edge.to().fix().index()] += 1;
        }
    }

    // A well-formed tagging never produces an odd-degree boundary vertex;
    // one here is a tagging defect, not something to merge through.
    for vertex in cdt.vertices() {
        let d = degree[vertex.fix().index()] as usize;
        if d % 2 == 1 {
            let p = vertex.position();
            return Err(TopologyError::OddBoundaryDegree {
                position: [p.x, p.y],
                degree: d,
            }
            .into());
        }
    }

    let mut used = vec![false; edge_count];
    let mut shells: Vec<Ring> = Vec::new();
    let mut holes: Vec<(Ring, [f64; 2])> = Vec::new();

    for edge in cdt.directed_edges() {
        let start_index = edge.fix().index();
        if !is_start[start_index] || used[start_index] {
            continue;
        }

        // Representative point for nesting tests: the centroid of the
        // interior face left of the first edge. Strictly interior to the
        // tagged region, never on any ring.
        let rep_face = edge
            .face()
            .as_inner()
            .ok_or_else(|| RepairError::internal("boundary edge with the infinite face on its interior side"))?;
        let rep = centroid(rep_face.vertices().iter().map(|v| {
            let p = v.position();
            [p.x, p.y]
        }));

        let mut points: Vec<[f64; 2]> = Vec::new();
        let start = edge.fix();
        let mut e = edge;
        let mut steps = 0usize;
        loop {
            used[e.fix().index()] = true;
            let p = e.from().position();
            points.push([p.x, p.y]);

            // Successor: rotate around the head through the interior fan to
            // the first outgoing boundary edge.
            let mut c = e.next();
            let mut fan = 0usize;
            while !is_start[c.fix().index()] {
                c = c.rev().next();
                fan += 1;
                if fan > edge_count {
                    return Err(TopologyError::UnclosedChain { position: [p.x, p.y] }.into());
                }
            }
            e = c;
            steps += 1;
            if e.fix() == start {
                break;
            }
            if steps > edge_count {
                let p = e.from().position();
                return Err(TopologyError::UnclosedChain { position: [p.x, p.y] }.into());
            }
        }

        if points.len() < 3 {
            return Err(RepairError::internal(format!("boundary walk produced a ring of {} vertices", points.len())));
        }
        let mut ring = Ring::new(points);
        ring.canonicalize();
        if ring.signed_area() > 0.0 {
            shells.push(ring);
        } else {
            holes.push((ring, rep));
        }
    }

    let mut polygons: Vec<Polygon> = shells.into_iter().map(|shell| Polygon::new(shell, Vec::new())).collect();

    // Each hole belongs to its immediately enclosing shell: the smallest
    // shell strictly containing the hole's representative point.
    for (hole, rep) in holes {
        let mut best: Option<(f64, usize)> = None;
        for (i, polygon) in polygons.iter().enumerate() {
            if polygon.shell().contains(rep) {
                let area = polygon.shell().area();
                if best.map_or(true, |(best_area, _)| area < best_area) {
                    best = Some((area, i));
                }
            }
        }
        match best {
            Some((_, i)) => polygons[i].push_hole(hole),
            None => return Err(TopologyError::OrphanHole { position: rep }.into()),
        }
    }

    let mut multipolygon = MultiPolygon::from(polygons);
    multipolygon.finish();
    debug!(polygons = multipolygon.len(), "boundary reconstructed");
    Ok(multipolygon)
}

fn centroid(points: impl Iterator<Item = [f64; 2]>) -> [f64; 2] {
    let mut x = 0.0;
    let mut y = 0.0;
    let mut n = 0usize;
    for p in points {
        x += p[0];
        y += p[1];
        n += 1;
    }
    [x / n as f64, y / n as f64]
}
