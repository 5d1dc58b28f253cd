//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Add to your WorkflowMax timesheet.
///
/// Shows what you have already logged, asks for a job, task, description
/// and duration, and submits a new time entry.
#[derive(Debug, Parser)]
#[command(name = "wfm", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file (defaults to ~/.wfm.yml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Pick the day to log against from the last two weeks.
    #[arg(short = 'd', long)]
    pub pick_day: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}
