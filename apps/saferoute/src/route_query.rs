//! route_query — answer one route query against an annotated graph.
//!
//! Prints the response body as JSON on stdout (the same shape the serving
//! layer returns).  On failure prints the error body instead and exits with a
//! code per error kind.
//!
//! Run with:
//!   `cargo run -p saferoute --bin route_query -- --graph chicago_graph.json 41.8781 -87.6298 41.8827 -87.6233`

mod common;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::error;
use serde::Serialize;

use sr_route::{RouteEngine, RouteQuery};
use sr_spatial::GraphStore;

#[derive(Parser)]
#[command(name = "route_query")]
#[command(about = "Shortest and safer route between two coordinates")]
struct Cli {
    /// Annotated graph file
    #[arg(long)]
    graph: PathBuf,

    /// JSON config file (defaults for missing edge attributes)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON response
    #[arg(long)]
    pretty: bool,

    #[arg(allow_negative_numbers = true)]
    start_lat: f64,
    #[arg(allow_negative_numbers = true)]
    start_lon: f64,
    #[arg(allow_negative_numbers = true)]
    end_lat: f64,
    #[arg(allow_negative_numbers = true)]
    end_lon: f64,
}

fn main() -> Result<()> {
    common::init_logging();
    let cli = Cli::parse();
    let config = common::load_config(cli.config.as_deref(), None)?;

    // A graph that fails to load leaves the store unloaded; the query then
    // reports `graph_not_loaded` like any other classified error.
    let mut store = GraphStore::unloaded(config);
    if store.reload(&cli.graph).is_err() {
        error!("graph {} unavailable", cli.graph.display());
    }

    let query = RouteQuery {
        start_lat: cli.start_lat,
        start_lon: cli.start_lon,
        end_lat:   cli.end_lat,
        end_lon:   cli.end_lon,
    };

    match RouteEngine::new(&store).respond(&query) {
        Ok(body) => {
            println!("{}", to_json(&body, cli.pretty)?);
            Ok(())
        }
        Err(body) => {
            println!("{}", to_json(&body, cli.pretty)?);
            std::process::exit(exit_code(&body.kind));
        }
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

fn exit_code(kind: &str) -> i32 {
    match kind {
        "graph_not_loaded" => 2,
        "location_not_found" => 3,
        "no_path_found" => 4,
        _ => 1,
    }
}
