use spade::handles::FixedVertexHandle;
use tracing::debug;

use crate::errors::RepairError;
use crate::geom::{Geometry, Ring};
use crate::triangulation::RepairTriangulation;

/// An input ring segment, resolved to kernel vertex handles.
pub(crate) type Segment = (FixedVertexHandle, FixedVertexHandle);

/// The triangulation of one repair call together with the input segments
/// that constrain it, grouped by point-set source.
pub(crate) struct Loaded {
    pub triangulation: RepairTriangulation,
    pub sources: Vec<Vec<Segment>>,
}

impl Loaded {
    pub fn all_segments(&self) -> impl Iterator<Item = &Segment> {
        self.sources.iter().flatten()
    }
}

/// Inserts every ring vertex and every ring segment of the geometry into a
/// fresh triangulation. Crossing or overlapping constraints are legal; the
/// kernel splits them at intersection points. Zero-length segments are
/// dropped here.
pub(crate) fn load(geometry: &Geometry) -> Result<Loaded, RepairError> {
    let mut triangulation = RepairTriangulation::new();
    let mut sources = Vec::with_capacity(geometry.source_count());
    for source in 0..geometry.source_count() {
        let mut segments = Vec::new();
        for ring in geometry.source_rings(source) {
            insert_ring(&mut triangulation, ring, &mut segments)?;
        }
        sources.push(segments);
    }
    debug!(
        vertices = triangulation.num_vertices(),
        segments = sources.iter().map(Vec::len).sum::<usize>(),
        sources = sources.len(),
        "constraints inserted"
    );
    Ok(Loaded {
        triangulation,
        sources,
    })
}

fn insert_ring(triangulation: &mut RepairTriangulation, ring: &Ring, segments: &mut Vec<Segment>) -> Result<(), RepairError> {
    let n = ring.len();
    if n == 0 {
        return Ok(());
    }
    let mut handles = Vec::with_capacity(n);
    for &p in ring.vertices() {
        // Coincident input coordinates collapse to one kernel vertex.
        handles.push(triangulation.insert(p)?);
    }
    for i in 0..n {
        let a = handles[i];
        let b = handles[(i + 1) % n];
        if a == b {
            continue;
        }
        triangulation.add_constraint(a, b);
        segments.push((a, b));
    }
    Ok(())
}
