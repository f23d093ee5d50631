//! Command-line interface for Slashdown
//!
//! Supports both graphical (default) and headless scenario modes.

use clap::Parser;
use std::path::PathBuf;

/// Top-down hack-and-slash combat prototype
#[derive(Parser, Debug)]
#[command(name = "slashdown")]
#[command(about = "Top-down hack-and-slash combat prototype")]
#[command(version)]
pub struct Args {
    /// Run in headless mode with the specified JSON scenario file
    #[arg(long, value_name = "SCENARIO_FILE")]
    pub headless: Option<PathBuf>,

    /// Output path for the combat log report (headless mode only)
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,
}

pub fn parse_args() -> Args {
    Args::parse()
}
