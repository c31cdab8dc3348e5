use smallvec::SmallVec;
use spade::handles::{FixedUndirectedEdgeHandle, FixedVertexHandle};
use spade::{ConstrainedDelaunayTriangulation, InsertionError, Point2, Triangulation};

use crate::errors::TopologyError;

pub(crate) type Kernel = ConstrainedDelaunayTriangulation<Point2<f64>>;

/// Relative tolerance for deciding that a kernel vertex lies on an input
/// segment. Split vertices are rounded intersection points, so they sit
/// within a few ulps of the segment they subdivide.
const CHAIN_EPS: f64 = 1e-9;

/// The constrained triangulation owned by one repair call.
///
/// Wraps the kernel and keeps the bookkeeping the repair stages need on
/// top of it: input segments are re-resolvable to the chain of constrained
/// sub-edges the kernel split them into, and sub-edge coverage counts form
/// the parity table that drives face tagging.
pub struct RepairTriangulation {
    cdt: Kernel,
}

impl RepairTriangulation {
    pub(crate) fn new() -> Self {
        Self { cdt: Kernel::new() }
    }

    pub(crate) fn cdt(&self) -> &Kernel {
        &self.cdt
    }

    pub(crate) fn insert(&mut self, p: [f64; 2]) -> Result<FixedVertexHandle, InsertionError> {
        self.cdt.insert(Point2::new(p[0], p[1]))
    }

    /// Registers a constraint edge, splitting it and any constraints it
    /// crosses at their intersection points (new vertices as needed).
    pub(crate) fn add_constraint(&mut self, a: FixedVertexHandle, b: FixedVertexHandle) {
        if a != b {
            let _ = self.cdt.add_constraint_and_split(a, b, |v| v);
        }
    }

    pub(crate) fn position(&self, v: FixedVertexHandle) -> [f64; 2] {
        let p = self.cdt.vertex(v).position();
        [p.x, p.y]
    }

    pub(crate) fn num_vertices(&self) -> usize {
        self.cdt.num_vertices()
    }

    /// Resolves an input segment to the chain of constrained sub-edges the
    /// kernel realized it as, walking vertex to vertex along the segment.
    ///
    /// Must only be called after every constraint has been inserted; the
    /// vertex set is final from then on.
    pub(crate) fn constraint_chain(&self, from: FixedVertexHandle, to: FixedVertexHandle) -> Result<ConstraintChain, TopologyError> {
        let origin = self.position(from);
        let target = self.position(to);

        let mut chain = ConstraintChain::new(from);
        let mut current = from;
        // A chain can never be longer than the total edge count.
        let mut remaining = self.cdt.num_undirected_edges() + 1;
        while current != to {
            if remaining == 0 {
                return Err(TopologyError::UnresolvedConstraint { from: origin, to: target });
            }
            remaining -= 1;

            let cur_pos = self.position(current);
            let cur_d2 = dist2(cur_pos, target);
            // The immediate next vertex along the segment: among constrained
            // neighbors on the segment that advance toward the target, the
            // one closest to the current vertex.
            let mut best: Option<(f64, FixedVertexHandle, FixedUndirectedEdgeHandle)> = None;
            for edge in self.cdt.vertex(current).out_edges() {
                if !edge.as_undirected().is_constraint_edge() {
                    continue;
                }
                let cand = edge.to().fix();
                let cand_pos = self.position(cand);
                if !on_segment(origin, target, cand_pos) {
                    continue;
                }
                let d2 = dist2(cand_pos, target);
                if d2 >= cur_d2 {
                    continue;
                }
                if best.map_or(true, |(best_d2, _, _)| d2 > best_d2) {
                    best = Some((d2, cand, edge.as_undirected().fix()));
                }
            }
            match best {
                Some((_, cand, edge)) => {
                    chain.edges.push(edge);
                    chain.vertices.push(cand);
                    current = cand;
                }
                None => return Err(TopologyError::UnresolvedConstraint { from: origin, to: target }),
            }
        }
        Ok(chain)
    }

    /// Builds the sub-edge coverage parity table for a set of input
    /// segments. Each traversal of a sub-edge counts once, so a segment
    /// duplicated in the input covers its sub-edges twice and cancels.
    pub(crate) fn edge_parity<'a>(&self, segments: impl IntoIterator<Item = &'a (FixedVertexHandle, FixedVertexHandle)>) -> Result<EdgeParity, TopologyError> {
        let mut counts = vec![0u32; self.cdt.num_undirected_edges()];
        for &(a, b) in segments {
            let chain = self.constraint_chain(a, b)?;
            for edge in &chain.edges {
                counts[edge.index()] += 1;
            }
        }
        Ok(EdgeParity { counts })
    }
}

/// An input segment resolved to kernel sub-edges, endpoints included in
/// `vertices`.
pub(crate) struct ConstraintChain {
    pub edges: SmallVec<[FixedUndirectedEdgeHandle; 4]>,
    pub vertices: SmallVec<[FixedVertexHandle; 4]>,
}

impl ConstraintChain {
    fn new(from: FixedVertexHandle) -> Self {
        let mut vertices = SmallVec::new();
        vertices.push(from);
        Self {
            edges: SmallVec::new(),
            vertices,
        }
    }
}

/// Per-edge coverage counts; an odd count marks a label-flipping edge.
pub(crate) struct EdgeParity {
    counts: Vec<u32>,
}

impl EdgeParity {
    pub fn flips(&self, edge: FixedUndirectedEdgeHandle) -> bool {
        self.counts.get(edge.index()).map_or(false, |c| c % 2 == 1)
    }
}

pub(crate) fn dist2(a: [f64; 2], b: [f64; 2]) -> f64 {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    dx * dx + dy * dy
}

/// Whether `t` lies on the segment `p`->`q`, within a relative tolerance.
fn on_segment(p: [f64; 2], q: [f64; 2], t: [f64; 2]) -> bool {
    let ux = q[0] - p[0];
    let uy = q[1] - p[1];
    let vx = t[0] - p[0];
    let vy = t[1] - p[1];
    let cross = ux * vy - uy * vx;
    let u_len2 = ux * ux + uy * uy;
    let v_len2 = vx * vx + vy * vy;
    if cross * cross > CHAIN_EPS * CHAIN_EPS * u_len2 * v_len2 && v_len2 > 0.0 {
        return false;
    }
    let dot = ux * vx + uy * vy;
    dot >= -CHAIN_EPS * u_len2 && dot <= (1.0 + CHAIN_EPS) * u_len2
}
