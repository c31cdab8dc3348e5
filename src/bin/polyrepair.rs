use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Parser};
use tracing_subscriber::fmt::SubscriberBuilder;

use polyrepair::io::{geojson, wkt};
use polyrepair::{repair_report, Geometry, RepairMode, RepairOptions};

/// Repairs broken 2D polygons into valid multipolygons
#[derive(Parser)]
#[command(name = "polyrepair")]
#[command(about = "Repairs broken 2D polygons into valid multipolygons")]
#[command(group(ArgGroup::new("source").required(true).multiple(false)))]
struct Cmd {
    /// WKT geometry passed inline
    #[arg(long, group = "source", value_name = "WKT")]
    wkt: Option<String>,

    /// Read WKT from the first line of a file
    #[arg(short = 'f', long = "file", group = "source", value_name = "PATH")]
    file: Option<PathBuf>,

    /// Read the first polygon feature of a GeoJSON file
    #[arg(long, group = "source", value_name = "PATH")]
    geojson: Option<PathBuf>,

    /// Discard output polygons with net area below this threshold
    #[arg(long = "min-area", default_value_t = 0.0, value_name = "AREA")]
    min_area: f64,

    /// Snap-round the input to this grid spacing before repair
    #[arg(long = "isr", default_value_t = 0.0, value_name = "TOLERANCE")]
    isr: f64,

    /// Repair by provenance (point-set) rule instead of odd-even parity
    #[arg(long = "point-set")]
    point_set: bool,

    /// Print the robustness diagnostic of the input
    #[arg(long)]
    robustness: bool,

    /// Write a single-feature GeoJSON file instead of printing WKT
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();

    let geometry = load_geometry(&cmd)?;
    let options = RepairOptions {
        snap_tolerance: cmd.isr,
        min_area: cmd.min_area,
    };
    let mode = if cmd.point_set {
        RepairMode::PointSet
    } else {
        RepairMode::OddEven
    };

    let repair = repair_report(&geometry, &options, mode).context("repair failed")?;

    match &cmd.out {
        Some(path) => {
            fs::write(path, geojson::write_feature(&repair.polygons))
                .with_context(|| format!("could not write {}", path.display()))?;
        }
        None => println!("{}", wkt::to_wkt(&repair.polygons)),
    }

    if cmd.robustness {
        println!("Robustness of input polygon: {}", repair.robustness.sqrt());
    }

    Ok(())
}

fn load_geometry(cmd: &Cmd) -> Result<Geometry> {
    if let Some(text) = &cmd.wkt {
        return wkt::parse(text).context("invalid WKT");
    }
    if let Some(path) = &cmd.file {
        let text = fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))?;
        let first_line = text.lines().next().context("input file is empty")?;
        return wkt::parse(first_line).context("invalid WKT on first line");
    }
    if let Some(path) = &cmd.geojson {
        let text = fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))?;
        return geojson::read_first_polygon(&text).context("no usable polygon feature");
    }
    // clap's source group guarantees one of the branches above
    bail!("no geometry source given");
}
