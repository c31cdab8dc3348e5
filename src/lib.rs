//! Repairs arbitrary, possibly invalid 2D polygon input (self-intersecting
//! rings, duplicate vertices, slivers, overlapping or unordered ring sets)
//! into a topologically valid [MultiPolygon]: simple rings, consistently
//! oriented, holes correctly nested.
//!
//! The input vertices and segments are inserted into a constrained
//! triangulation (the [spade] kernel splits crossing constraints at their
//! intersection points), every triangle is labeled interior or exterior by
//! propagating across the face-adjacency graph, and valid rings are walked
//! out of the label boundary.
//!
//! Two repair rules are available: [repair_odd_even] classifies faces by
//! crossing parity (a point is inside if a path from infinity crosses the
//! boundary an odd number of times), while [repair_point_set] classifies
//! each face by which input polygons claim it and keeps the union.

mod errors;
mod geom;
mod inputs;
mod loader;
mod reconstruct;
mod robustness;
mod snap;
mod tag;
mod triangulation;

pub mod io;

#[cfg(feature = "debugging")]
pub mod debug;

#[cfg(any(test, feature = "benchmarking"))]
pub mod tests;

pub use errors::{InternalError, RepairError, TopologyError};
pub use geom::{Geometry, MultiPolygon, Polygon, Ring};
pub use inputs::Vertex;
pub use robustness::compute_robustness;
pub use snap::snap_round;
pub use tag::SourceSet;
pub use triangulation::RepairTriangulation;

pub use num_traits::real::Real;

/// Which face-labeling rule a repair uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairMode {
    /// Even-odd crossing parity over the whole constraint set.
    OddEven,
    /// Per-input-polygon provenance; a face inside any input is kept once.
    PointSet,
}

/// Per-call configuration. No repair state outlives a call.
#[derive(Debug, Clone)]
pub struct RepairOptions {
    /// Snap-rounding grid spacing applied before repair; `0.0` disables.
    pub snap_tolerance: f64,
    /// Output polygons with net area strictly below this are discarded;
    /// `0.0` keeps everything.
    pub min_area: f64,
}

impl Default for RepairOptions {
    fn default() -> Self {
        Self {
            snap_tolerance: 0.0,
            min_area: 0.0,
        }
    }
}

/// The result of one repair call, with the robustness side channel.
#[derive(Debug)]
pub struct Repair {
    pub polygons: MultiPolygon,
    /// See [compute_robustness]; squared separation, `INFINITY` when the
    /// input carried no constraints.
    pub robustness: f64,
}

/// Repairs a single polygon or ring set by the even-odd rule.
///
/// Degenerate input (zero area, collinear points) yields an empty
/// [MultiPolygon], not an error.
pub fn repair_odd_even(geometry: &Geometry, options: &RepairOptions) -> Result<MultiPolygon, RepairError> {
    do_repair(geometry, options, RepairMode::OddEven).map(|repair| repair.polygons)
}

/// Repairs a loose polygon set by provenance: each input polygon claims the
/// faces it contains, and the union of all claims is reconstructed. Two
/// overlapping inputs merge instead of duplicating their overlap.
pub fn repair_point_set(geometry: &Geometry, options: &RepairOptions) -> Result<MultiPolygon, RepairError> {
    do_repair(geometry, options, RepairMode::PointSet).map(|repair| repair.polygons)
}

/// [repair_odd_even]/[repair_point_set] plus the robustness diagnostic.
pub fn repair_report(geometry: &Geometry, options: &RepairOptions, mode: RepairMode) -> Result<Repair, RepairError> {
    do_repair(geometry, options, mode)
}

fn do_repair(geometry: &Geometry, options: &RepairOptions, mode: RepairMode) -> Result<Repair, RepairError> {
    let snapped;
    let geometry = if options.snap_tolerance > 0.0 {
        snapped = snap::snap_round(geometry, options.snap_tolerance)?;
        &snapped
    } else {
        geometry
    };

    let loaded = loader::load(geometry)?;
    let tags = match mode {
        RepairMode::OddEven => tag::tag_odd_even(&loaded)?,
        RepairMode::PointSet => tag::tag_point_set(&loaded)?,
    };

    #[cfg(feature = "debugging")]
    debug::dump_tagged(&loaded.triangulation, &tags);

    let mut polygons = reconstruct::reconstruct(&loaded.triangulation, &tags)?;
    polygons.remove_small_polygons(options.min_area);
    let robustness = robustness::compute_robustness(&loaded.triangulation);
    Ok(Repair { polygons, robustness })
}
