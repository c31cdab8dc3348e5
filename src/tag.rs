use std::collections::VecDeque;
use std::fmt;

use smallvec::SmallVec;
use spade::Triangulation;
use tracing::debug;

use crate::errors::RepairError;
use crate::loader::Loaded;
use crate::triangulation::{EdgeParity, RepairTriangulation};

/// The set of input polygons claiming a face as interior, as a fixed-width
/// bitmask keyed by input-polygon index.
///
/// Odd-even repair uses only bit 0; point-set repair supports up to
/// [SourceSet::MAX_SOURCES] input polygons per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceSet(u64);

impl SourceSet {
    pub const MAX_SOURCES: usize = 64;

    pub fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, source: usize) {
        debug_assert!(source < Self::MAX_SOURCES);
        self.0 |= 1 << source;
    }

    pub fn contains(&self, source: usize) -> bool {
        source < Self::MAX_SOURCES && self.0 & (1 << source) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }
}

impl fmt::Display for SourceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for source in 0..Self::MAX_SOURCES {
            if self.contains(source) {
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{}", source)?;
                first = false;
            }
        }
        write!(f, "}}")
    }
}

/// Face tag arena, indexed by the kernel's face index. The infinite face
/// keeps an empty set, so "non-empty" is the interior test in both modes.
pub(crate) struct FaceTags {
    sets: Vec<SourceSet>,
}

impl FaceTags {
    fn new(face_count: usize) -> Self {
        Self {
            sets: vec![SourceSet::empty(); face_count],
        }
    }

    pub fn interior_index(&self, face_index: usize) -> bool {
        !self.sets[face_index].is_empty()
    }

    #[cfg(feature = "debugging")]
    pub fn set_index(&self, face_index: usize) -> SourceSet {
        self.sets[face_index]
    }
}

/// Tags every face by the even-odd rule over the whole constraint set.
pub(crate) fn tag_odd_even(loaded: &Loaded) -> Result<FaceTags, RepairError> {
    let parity = loaded.triangulation.edge_parity(loaded.all_segments())?;
    let mut tags = FaceTags::new(loaded.triangulation.cdt().num_all_faces());
    propagate(&loaded.triangulation, &parity, 0, &mut tags)?;
    debug!(
        faces = loaded.triangulation.cdt().num_inner_faces(),
        interior = interior_count(&loaded.triangulation, &tags),
        "faces tagged (odd-even)"
    );
    Ok(tags)
}

/// Tags every face with the set of input polygons containing it: one
/// even-odd pass per source, restricted to that source's own constraint
/// sub-edges, accumulating into the face's [SourceSet].
pub(crate) fn tag_point_set(loaded: &Loaded) -> Result<FaceTags, RepairError> {
    if loaded.sources.len() > SourceSet::MAX_SOURCES {
        return Err(RepairError::TooManySources(loaded.sources.len()));
    }
    let mut tags = FaceTags::new(loaded.triangulation.cdt().num_all_faces());
    for (source, segments) in loaded.sources.iter().enumerate() {
        let parity = loaded.triangulation.edge_parity(segments)?;
        propagate(&loaded.triangulation, &parity, source, &mut tags)?;
    }
    debug!(
        faces = loaded.triangulation.cdt().num_inner_faces(),
        sources = loaded.sources.len(),
        interior = interior_count(&loaded.triangulation, &tags),
        "faces tagged (point-set)"
    );
    Ok(tags)
}

/// Breadth-first label propagation over the face-adjacency graph, seeded
/// EXTERIOR at the infinite face. Crossing an odd-parity edge complements
/// the label, crossing any other edge keeps it. First visit wins; the
/// result is traversal-order independent because crossing parity between
/// the infinite face and any face is structural.
fn propagate(triangulation: &RepairTriangulation, parity: &EdgeParity, source: usize, tags: &mut FaceTags) -> Result<(), RepairError> {
    let cdt = triangulation.cdt();
    if cdt.num_inner_faces() == 0 {
        return Ok(());
    }

    // Face adjacency by index; the infinite face collects the hull edges,
    // so a constrained hull edge with odd parity flips straight to
    // INTERIOR at the outer boundary.
    let mut adjacency: Vec<SmallVec<[(usize, bool); 3]>> = vec![SmallVec::new(); cdt.num_all_faces()];
    for edge in cdt.directed_edges() {
        let face = edge.face().fix().index();
        let neighbor = edge.rev().face().fix().index();
        adjacency[face].push((neighbor, parity.flips(edge.as_undirected().fix())));
    }

    let mut inside: Vec<Option<bool>> = vec![None; cdt.num_all_faces()];
    let outer = cdt.outer_face().fix().index();
    inside[outer] = Some(false);

    let mut queue: VecDeque<usize> = VecDeque::new();
    queue.push_back(outer);
    while let Some(face) = queue.pop_front() {
        let current = inside[face].ok_or_else(|| RepairError::internal("queued face without a label"))?;
        for &(neighbor, flip) in &adjacency[face] {
            if inside[neighbor].is_some() {
                continue;
            }
            inside[neighbor] = Some(current ^ flip);
            queue.push_back(neighbor);
        }
    }

    for face in cdt.inner_faces() {
        match inside[face.fix().index()] {
            Some(true) => tags.sets[face.fix().index()].insert(source),
            Some(false) => {}
            None => return Err(RepairError::internal("face left unvisited by tag propagation")),
        }
    }
    Ok(())
}

fn interior_count(triangulation: &RepairTriangulation, tags: &FaceTags) -> usize {
    triangulation
        .cdt()
        .inner_faces()
        .filter(|face| tags.interior_index(face.fix().index()))
        .count()
}
