use std::fmt::Write as _;
use std::{io, path};

use spade::Triangulation;

use crate::debug::env;
use crate::tag::FaceTags;
use crate::triangulation::RepairTriangulation;

pub(crate) struct SvgOutput {
    content: String,
    view: [f64; 4],
}

impl SvgOutput {
    pub fn save<P: AsRef<path::Path>>(&self, file_name: P) -> io::Result<()> {
        use std::io::Write;

        let f = std::fs::File::create(file_name)?;
        let mut w = io::BufWriter::new(&f);
        writeln!(
            w,
            "<svg viewBox=\"{} {} {} {}\" xmlns=\"http://www.w3.org/2000/svg\">",
            self.view[0], self.view[1], self.view[2], self.view[3]
        )?;
        writeln!(w, "{}", self.content)?;
        writeln!(w, "</svg>")?;
        Ok(())
    }
}

/// Renders interior faces filled, exterior faces hollow, constrained edges
/// stroked. Returns `None` for a triangulation without faces.
pub(crate) fn render_tagged(triangulation: &RepairTriangulation, tags: &FaceTags) -> Option<SvgOutput> {
    let cdt = triangulation.cdt();
    if cdt.num_inner_faces() == 0 {
        return None;
    }

    let mut x_min = f64::INFINITY;
    let mut y_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for vertex in cdt.vertices() {
        let p = vertex.position();
        x_min = x_min.min(p.x);
        y_min = y_min.min(p.y);
        x_max = x_max.max(p.x);
        y_max = y_max.max(p.y);
    }
    let margin = 0.05 * (x_max - x_min).max(y_max - y_min).max(1.0);

    let mut content = String::new();
    for face in cdt.inner_faces() {
        let interior = tags.interior_index(face.fix().index());
        let sources = tags.set_index(face.fix().index());
        let [a, b, c] = face.vertices();
        let (a, b, c) = (a.position(), b.position(), c.position());
        let fill = if interior { "#7fb27f" } else { "none" };
        let _ = writeln!(
            content,
            "<polygon points=\"{},{} {},{} {},{}\" fill=\"{}\" stroke=\"#cccccc\" stroke-width=\"{}\"><title>{}</title></polygon>",
            a.x, a.y, b.x, b.y, c.x, c.y, fill, margin / 20.0, sources
        );
    }

    if env::svg::show_constraints() {
        for edge in cdt.undirected_edges() {
            if !edge.is_constraint_edge() {
                continue;
            }
            let [a, b] = edge.vertices();
            let (a, b) = (a.position(), b.position());
            let _ = writeln!(
                content,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#333333\" stroke-width=\"{}\"/>",
                a.x, a.y, b.x, b.y, margin / 10.0
            );
        }
    }

    Some(SvgOutput {
        content,
        view: [
            x_min - margin,
            y_min - margin,
            (x_max - x_min) + 2.0 * margin,
            (y_max - y_min) + 2.0 * margin,
        ],
    })
}
