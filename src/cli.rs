//! Command-line options for the `ambucheck` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::infrastructure::Verbosity;

/// ambucheck - ambulance readiness checklist
///
/// Walks the crew through the equipment checklist of a vehicle and posts the
/// finished record to a spreadsheet web app.
#[derive(Debug, Parser)]
#[command(name = "ambucheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Spreadsheet endpoint URL, overriding the configuration
    #[arg(short, long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Write logs to this file instead of the default location
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Log errors only
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}
