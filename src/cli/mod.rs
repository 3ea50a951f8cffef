//! Command-line parsing for the forecast dashboard.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! view-model and rendering code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_BACKEND_URL, DEFAULT_HORIZON_OFFSET, DEFAULT_WINDOW_SIZE};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fdash", version, about = "Rolling-window forecast dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive TUI (default).
    Tui(ViewArgs),
    /// Print the forecast window at an index as a table and ASCII plot.
    Show(ShowArgs),
    /// Print the plain series filtered by date range and series label.
    Range(RangeArgs),
    /// Write the forecast window at an index to CSV.
    Export(ExportArgs),
}

/// Options shared by every command.
#[derive(Debug, Args, Clone)]
pub struct ViewArgs {
    /// Backend base URL.
    #[arg(long, env = "FDASH_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend: String,

    /// Number of labels shown at once.
    #[arg(short = 'w', long, default_value_t = DEFAULT_WINDOW_SIZE)]
    pub window: usize,

    /// Labels between a forecast's anchor month and its first point.
    #[arg(long, default_value_t = DEFAULT_HORIZON_OFFSET)]
    pub offset: usize,

    /// Labels of history shown before the current index.
    #[arg(long, default_value_t = 0)]
    pub lead: usize,

    /// Read the forecast payload from a JSON file instead of the backend.
    #[arg(long, value_name = "JSON")]
    pub input: Option<PathBuf>,

    /// Read the plain-series payload from a JSON file instead of the backend.
    #[arg(long, value_name = "JSON")]
    pub series_input: Option<PathBuf>,

    /// Log file used by the TUI.
    #[arg(long, default_value = "fdash.log")]
    pub log_file: PathBuf,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Window index (clamped to the valid range).
    #[arg(short = 'i', long, default_value_t = 0, allow_negative_numbers = true)]
    pub index: i64,

    /// Disable the ASCII plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[derive(Debug, Args)]
pub struct RangeArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// First label to include (defaults to the first label).
    #[arg(long)]
    pub start: Option<String>,

    /// Last label to include (defaults to the last label).
    #[arg(long)]
    pub end: Option<String>,

    /// Series to hide (repeatable).
    #[arg(long = "hide", value_name = "LABEL")]
    pub hide: Vec<String>,

    /// Disable the ASCII plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Window index (clamped to the valid range).
    #[arg(short = 'i', long, default_value_t = 0, allow_negative_numbers = true)]
    pub index: i64,

    /// Output CSV path.
    #[arg(short = 'o', long, value_name = "CSV")]
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_accepts_negative_index() {
        let cli = Cli::parse_from(["fdash", "show", "--index", "-3", "--window", "12"]);
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.index, -3);
        assert_eq!(args.view.window, 12);
        assert_eq!(args.view.offset, DEFAULT_HORIZON_OFFSET);
    }

    #[test]
    fn range_collects_hidden_series() {
        let cli = Cli::parse_from([
            "fdash", "range", "--start", "2020-03", "--hide", "A", "--hide", "B",
        ]);
        let Command::Range(args) = cli.command else {
            panic!("expected range");
        };
        assert_eq!(args.start.as_deref(), Some("2020-03"));
        assert_eq!(args.end, None);
        assert_eq!(args.hide, vec!["A", "B"]);
    }
}
