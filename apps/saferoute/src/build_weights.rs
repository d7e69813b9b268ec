//! build_weights — offline crime-to-safety-weight annotation.
//!
//! Reads a road graph (JSON graph file, or an OSM PBF extract with the `osm`
//! feature) and a cleaned crime CSV, assigns every incident to its nearest
//! intersection, and writes the graph back out with `safety_weight` set on
//! every edge.
//!
//! Run with:
//!   `cargo run -p saferoute --bin build_weights -- --graph raw.json --crimes clean_crime_data.csv --out chicago_graph.json`

mod common;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{error, info};

use sr_core::SafetyConfig;
use sr_weights::{annotate_graph_file, BuildReport};
#[cfg(feature = "osm")]
use sr_spatial::save_graph_file;
#[cfg(feature = "osm")]
use sr_weights::{load_incidents_csv, WeightBuilder};

#[derive(Parser)]
#[command(name = "build_weights")]
#[command(about = "Annotate a road graph with crime-based safety weights")]
struct Cli {
    /// Input graph file (JSON)
    #[arg(long, conflicts_with = "osm")]
    graph: Option<PathBuf>,

    /// Input OpenStreetMap PBF extract (requires the `osm` feature)
    #[arg(long)]
    osm: Option<PathBuf>,

    /// Cleaned crime CSV with Latitude/Longitude columns
    #[arg(long)]
    crimes: PathBuf,

    /// Output graph file
    #[arg(long)]
    out: PathBuf,

    /// Penalty per incident at either end of a street
    #[arg(long)]
    penalty_factor: Option<f64>,

    /// JSON config file (see `SafetyConfig`)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    common::init_logging();
    if let Err(e) = run(Cli::parse()) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = common::load_config(cli.config.as_deref(), cli.penalty_factor)?;
    let t_start = Instant::now();

    let report = match (&cli.graph, &cli.osm) {
        (Some(graph), _) => annotate_graph_file(graph, &cli.crimes, &cli.out, config)
            .with_context(|| format!("annotating {}", graph.display()))?,
        (None, Some(osm)) => annotate_osm(osm, &cli.crimes, &cli.out, config)?,
        (None, None) => bail!("one of --graph or --osm is required"),
    };

    info!(
        "done in {:.2}s: {} incidents assigned, {} skipped, {} edges penalised",
        t_start.elapsed().as_secs_f64(),
        report.incidents_assigned,
        report.incidents_skipped,
        report.penalised_edges
    );
    Ok(())
}

#[cfg(feature = "osm")]
fn annotate_osm(path: &Path, crimes: &Path, out: &Path, config: SafetyConfig) -> Result<BuildReport> {
    let mut network = sr_spatial::osm::load_from_pbf(path, &config)
        .with_context(|| format!("reading OSM extract {}", path.display()))?;
    info!(
        "street network from {}: {} nodes, {} edges",
        path.display(),
        network.node_count(),
        network.edge_count()
    );

    let incidents = load_incidents_csv(crimes)
        .with_context(|| format!("reading crime data {}", crimes.display()))?;
    let report = WeightBuilder::new(config).annotate(&mut network, &incidents)?;

    save_graph_file(out, &network).with_context(|| format!("writing {}", out.display()))?;
    Ok(report)
}

#[cfg(not(feature = "osm"))]
fn annotate_osm(path: &Path, _crimes: &Path, _out: &Path, _config: SafetyConfig) -> Result<BuildReport> {
    bail!(
        "cannot read {}: build with `--features osm` for PBF input",
        path.display()
    )
}
