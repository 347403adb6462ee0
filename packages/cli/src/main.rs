#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command line entry point for the violation map data pipeline.
//!
//! Uses `indicatif-log-bridge` (via [`violation_map_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and progress bars never fight for the terminal.

mod pipeline;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "violation-map",
    about = "Build the traffic violation heatmap dataset"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Split raw violations into before/after congestion pricing periods
    Label,
    /// Convert labeled violations CSV into the heatmap GeoJSON document
    Convert {
        /// Maximum number of violations to convert
        #[arg(long)]
        limit: Option<u64>,
    },
    /// Aggregate labeled violations and write the conclusions report
    Analyze,
    /// Run the full pipeline: label, convert, analyze
    All {
        /// Maximum number of violations to convert
        #[arg(long)]
        limit: Option<u64>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = violation_map_cli_utils::init_logger();
    let cli = Cli::parse();

    match cli.command {
        Command::Label => pipeline::run_label(&multi)?,
        Command::Convert { limit } => pipeline::run_convert(&multi, limit)?,
        Command::Analyze => pipeline::run_analyze()?,
        Command::All { limit } => pipeline::run_all(&multi, limit)?,
    }

    Ok(())
}
