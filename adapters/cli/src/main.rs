#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that loads a `.world` map, traces its obstacles and
//! prints a report.

mod config;
mod report;

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use mazemap_system_obstacles::{ObstacleBuilder, TraceConfig};
use mazemap_world::WorldMap;
use tracing_subscriber::EnvFilter;

use crate::{config::CliConfig, report::Report};

/// Inspect maze maps and the obstacles traced from their terrain.
#[derive(Debug, Parser)]
#[command(name = "mazemap", version, about, long_about = None)]
struct Cli {
    /// Path of the `.world` file to inspect.
    map: PathBuf,

    /// TOML file with `log_filter` and `max_trace_steps` settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the inner rectangles of every closed obstacle.
    #[arg(long)]
    rectangles: bool,

    /// Exit with a failure status when tracing reports error tiles.
    #[arg(long)]
    strict: bool,
}

/// Entry point for the maze map command-line interface.
fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    init_tracing(&config);

    let map = WorldMap::load_from_file(&cli.map)
        .with_context(|| format!("failed to load map from {}", cli.map.display()))?;
    let builder = ObstacleBuilder::new(TraceConfig::new(config.max_trace_steps));
    let result = builder.build_obstacles(map.terrain());

    print!("{}", Report::new(&map, &result, cli.rectangles));

    if cli.strict && !result.error_tiles.is_empty() {
        tracing::error!(
            error_tiles = result.error_tiles.len(),
            "obstacle tracing reported errors"
        );
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn init_tracing(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
