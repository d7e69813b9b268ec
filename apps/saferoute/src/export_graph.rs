//! Export node coordinates and annotated edges for the map front end.
//!
//! Writes two JSON files to `--out-dir` (default `output/`):
//!   - `node_coords.json`   — `[{node_id, lat, lon}, …]`
//!   - `network_edges.json` — `[{from_node, to_node, length, safety_weight, highway}, …]`
//!
//! Node ids are the graph file's external keys.
//!
//! Run with: `cargo run -p saferoute --bin export_graph -- --graph chicago_graph.json`

mod common;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde_json::json;

use sr_core::EdgeId;
use sr_spatial::load_graph_file;

#[derive(Parser)]
#[command(name = "export_graph")]
#[command(about = "Dump graph nodes and edges as JSON for visualization")]
struct Cli {
    /// Annotated graph file
    #[arg(long)]
    graph: PathBuf,

    /// Output directory
    #[arg(long, default_value = "output")]
    out_dir: PathBuf,

    /// JSON config file (defaults for missing edge attributes)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    common::init_logging();
    let cli = Cli::parse();
    let config = common::load_config(cli.config.as_deref(), None)?;

    let (net, _) = load_graph_file(&cli.graph, &config)
        .with_context(|| format!("reading graph {}", cli.graph.display()))?;

    fs::create_dir_all(&cli.out_dir)?;

    // ── node_coords.json ──────────────────────────────────────────────────────
    let node_coords: Vec<serde_json::Value> = net
        .node_pos
        .iter()
        .zip(&net.node_key)
        .map(|(pos, key)| json!({ "node_id": key, "lat": pos.lat, "lon": pos.lon }))
        .collect();

    let path = cli.out_dir.join("node_coords.json");
    fs::write(&path, serde_json::to_string_pretty(&node_coords)?)?;
    info!("wrote {} ({} nodes)", path.display(), node_coords.len());

    // ── network_edges.json ────────────────────────────────────────────────────
    let edges: Vec<serde_json::Value> = (0..net.edge_count())
        .map(|i| {
            json!({
                "from_node":     net.node_key[net.edge_from[i].index()],
                "to_node":       net.node_key[net.edge_to[i].index()],
                "length":        net.edge_length_m[i],
                "safety_weight": net.edge_safety_weight[i],
                "highway":       net.highway(EdgeId(i as u32)),
            })
        })
        .collect();

    let path = cli.out_dir.join("network_edges.json");
    fs::write(&path, serde_json::to_string_pretty(&edges)?)?;
    info!("wrote {} ({} edges)", path.display(), edges.len());

    Ok(())
}
