//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

/// Environment variable that overrides `--log-level` with a full filter.
pub const LOG_ENV: &str = "WALK_MYSTERY_LOG";

#[derive(Debug, Clone, Parser)]
#[command(
    name = "walk-mystery",
    about = "WalkMystery: a puzzle walking tour in the terminal",
    version
)]
pub struct Config {
    /// Directory holding tour.toml, step_*.toml and crossword.toml
    #[arg(short, long, default_value = "tour/columbia")]
    pub tour: PathBuf,

    /// Write logs to this file (the terminal UI owns the screen)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log level used when WALK_MYSTERY_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Load and validate the tour, print a summary, and exit
    #[arg(long)]
    pub check: bool,
}
