//! Optional SVG dumps of the tagged triangulation, for inspecting what a
//! repair decided. Enabled with the `debugging` feature and configured
//! through environment variables (see [env]).

pub(crate) mod env;
pub(crate) mod svg;

use tracing::warn;

use crate::tag::FaceTags;
use crate::triangulation::RepairTriangulation;

pub(crate) fn dump_tagged(triangulation: &RepairTriangulation, tags: &FaceTags) {
    let path = match env::svg::output_path() {
        Some(path) => path,
        None => return,
    };
    let output = match svg::render_tagged(triangulation, tags) {
        Some(output) => output,
        None => return,
    };
    if let Err(error) = output.save(&path) {
        warn!(path = %path.display(), %error, "failed to write tagged-triangulation svg");
    }
}
