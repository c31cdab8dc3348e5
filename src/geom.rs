use std::{fmt, slice};

use ordered_float::OrderedFloat;

use crate::inputs::Vertex;

/// A closed loop of vertices, stored without the repeated closing vertex.
///
/// Counter-clockwise rings (positive signed area) are shells,
/// clockwise rings are holes. Input rings carry no such guarantee;
/// the convention only holds for rings produced by a repair.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    vertices: Vec<[f64; 2]>,
}

impl Ring {
    /// Builds a ring from a vertex loop, dropping a repeated closing vertex
    /// if present. Degenerate input (under 3 distinct vertices) is kept
    /// as-is; the repair simply finds no area in it.
    pub fn new(mut vertices: Vec<[f64; 2]>) -> Self {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        Self { vertices }
    }

    pub fn from_vertices<'a, V: 'a + Vertex>(vertices: impl IntoIterator<Item = &'a V>) -> Self {
        Self::new(vertices.into_iter().map(Vertex::to_position).collect())
    }

    pub fn vertices(&self) -> &[[f64; 2]] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Shoelace signed area: positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        let mut j = n - 1;
        for i in 0..n {
            let [xi, yi] = self.vertices[i];
            let [xj, yj] = self.vertices[j];
            sum += xj * yi - xi * yj;
            j = i;
        }
        sum / 2.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Even-odd containment test. The caller must ensure `p` does not lie
    /// on the ring boundary; representative points chosen by the
    /// reconstructor are strictly off every ring.
    pub fn contains(&self, p: [f64; 2]) -> bool {
        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n.wrapping_sub(1);
        for i in 0..n {
            let [xi, yi] = self.vertices[i];
            let [xj, yj] = self.vertices[j];
            if (yi > p[1]) != (yj > p[1]) {
                let x = xj + (p[1] - yj) * (xi - xj) / (yi - yj);
                if p[0] < x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Rotates the loop so it starts at its lexicographically smallest
    /// vertex, preserving cyclic order. Makes output order deterministic.
    pub(crate) fn canonicalize(&mut self) {
        if self.vertices.len() < 2 {
            return;
        }
        let start = self
            .vertices
            .iter()
            .enumerate()
            .min_by_key(|(_, v)| (OrderedFloat(v[0]), OrderedFloat(v[1])))
            .map(|(i, _)| i)
            .unwrap_or(0);
        self.vertices.rotate_left(start);
    }

    pub(crate) fn sort_key(&self) -> (OrderedFloat<f64>, OrderedFloat<f64>) {
        match self.vertices.first() {
            Some(v) => (OrderedFloat(v[0]), OrderedFloat(v[1])),
            None => (OrderedFloat(f64::INFINITY), OrderedFloat(f64::INFINITY)),
        }
    }
}

// Display prints the closed form, repeating the first vertex.
impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", v[0], v[1])?;
        }
        if let Some(v) = self.vertices.first() {
            if self.vertices.len() > 1 {
                write!(f, ", {} {}", v[0], v[1])?;
            }
        }
        write!(f, ")")
    }
}

/// One shell ring plus the hole rings strictly contained in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    shell: Ring,
    holes: Vec<Ring>,
}

impl Polygon {
    pub fn new(shell: Ring, holes: Vec<Ring>) -> Self {
        Self { shell, holes }
    }

    pub fn shell(&self) -> &Ring {
        &self.shell
    }

    pub fn holes(&self) -> &[Ring] {
        &self.holes
    }

    /// All rings, shell first.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        std::iter::once(&self.shell).chain(self.holes.iter())
    }

    /// Net area: shell area minus hole areas.
    pub fn area(&self) -> f64 {
        self.shell.area() - self.holes.iter().map(Ring::area).sum::<f64>()
    }

    pub(crate) fn push_hole(&mut self, hole: Ring) {
        self.holes.push(hole);
    }

    pub(crate) fn finish(&mut self) {
        self.holes.sort_by_key(Ring::sort_key);
    }
}

/// An ordered set of polygons. Output order is deterministic: polygons are
/// sorted by their shell's canonical first vertex.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPolygon {
    polygons: Vec<Polygon>,
}

impl MultiPolygon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn iter(&self) -> slice::Iter<'_, Polygon> {
        self.polygons.iter()
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Sum of net polygon areas.
    pub fn area(&self) -> f64 {
        self.polygons.iter().map(Polygon::area).sum()
    }

    /// Removes every polygon whose net area is strictly below `min_area`.
    /// A threshold of zero keeps everything.
    pub fn remove_small_polygons(&mut self, min_area: f64) {
        if min_area <= 0.0 {
            return;
        }
        self.polygons.retain(|p| p.area() >= min_area);
    }

    pub(crate) fn finish(&mut self) {
        for polygon in &mut self.polygons {
            polygon.finish();
        }
        self.polygons.sort_by_key(|p| p.shell.sort_key());
    }
}

impl From<Vec<Polygon>> for MultiPolygon {
    fn from(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }
}

impl<'a> IntoIterator for &'a MultiPolygon {
    type Item = &'a Polygon;
    type IntoIter = slice::Iter<'a, Polygon>;

    fn into_iter(self) -> Self::IntoIter {
        self.polygons.iter()
    }
}

/// Repair input: a single (possibly invalid) polygon, or a set of them.
///
/// No validity is assumed: rings may self-intersect, overlap each other,
/// repeat vertices, or be wound arbitrarily.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
}

impl Geometry {
    /// All rings of the geometry, in input order.
    pub fn rings(&self) -> Box<dyn Iterator<Item = &Ring> + '_> {
        match self {
            Geometry::Polygon(p) => Box::new(p.rings()),
            Geometry::MultiPolygon(mp) => Box::new(mp.iter().flat_map(Polygon::rings)),
        }
    }

    /// Point-set sources: each polygon is one source, its rings taken
    /// together (so declared holes subtract from their polygon).
    pub fn source_count(&self) -> usize {
        match self {
            Geometry::Polygon(_) => 1,
            Geometry::MultiPolygon(mp) => mp.len(),
        }
    }

    pub(crate) fn source_rings(&self, source: usize) -> impl Iterator<Item = &Ring> {
        match self {
            Geometry::Polygon(p) => p.rings(),
            Geometry::MultiPolygon(mp) => mp.polygons()[source].rings(),
        }
    }
}

impl From<Polygon> for Geometry {
    fn from(p: Polygon) -> Self {
        Geometry::Polygon(p)
    }
}

impl From<MultiPolygon> for Geometry {
    fn from(mp: MultiPolygon) -> Self {
        Geometry::MultiPolygon(mp)
    }
}
