//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Timestamp events into a CSV log and turn start/done pairs into durations.
///
/// Rows have the form `YYYY-MM-DD HH:MM:SS,origin,series,event`.
#[derive(Debug, Parser)]
#[command(name = "stampy", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Append a timestamped event row to a CSV file, creating it if needed.
    Stamp {
        /// The CSV file to append to.
        csv_file: PathBuf,

        /// Where the event came from (e.g., a script or host name).
        origin: String,

        /// The series the event belongs to.
        series: String,

        /// The event kind, usually `start` or `done`.
        event: String,
    },

    /// Aggregate the time between start and done events per series.
    ///
    /// Writes the durations in seconds as CSV to stdout.
    Graph {
        /// Display orientation: horizontal or vertical. Unknown values mean horizontal.
        #[arg(long)]
        orientation: Option<String>,

        /// The CSV file to read, or `-` for stdin.
        #[arg(default_value = "-")]
        csv_file: PathBuf,
    },
}
