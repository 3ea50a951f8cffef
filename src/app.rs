//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging for the chosen front-end
//! - builds the [`state::AppState`] and hands it to the TUI or a one-shot command

use clap::Parser;
use tracing::{info, warn};

use crate::cli::{Command, ExportArgs, RangeArgs, ShowArgs, ViewArgs};
use crate::domain::ViewConfig;
use crate::error::{AppError, DataError};
use crate::logging::{self, LogTarget};
use crate::view::{SeriesChart, SeriesSelector, filter_by_date_range, filter_by_labels};

pub mod state;

use state::{AppState, ForecastPage};

/// Entry point for the `fdash` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    // `fdash` and `fdash --window 12` behave like `fdash tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Show(args) => handle_show(args),
        Command::Range(args) => handle_range(args),
        Command::Export(args) => handle_export(args),
    }
}

fn handle_tui(args: ViewArgs) -> Result<(), AppError> {
    logging::init(LogTarget::File(&args.log_file))?;
    let config = view_config_from_args(&args);
    info!(backend = %config.backend_url, window = config.window_size, "starting tui");
    crate::tui::run(AppState::new(config))
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    logging::init(LogTarget::Stderr)?;
    let mut state = AppState::new(view_config_from_args(&args.view));
    let page = forecast_page_at(&mut state, args.index)?;

    println!(
        "{}",
        crate::report::format_window_summary(page.chart().view(), page.window(), page.dataset().len())
    );
    if !args.no_plot {
        let plot = crate::plot::render_window_plot(page.chart().view(), args.width, args.height);
        println!("{plot}");
    }
    Ok(())
}

fn handle_range(args: RangeArgs) -> Result<(), AppError> {
    logging::init(LogTarget::Stderr)?;
    let mut state = AppState::new(view_config_from_args(&args.view));
    state.load_series()?;
    let page = state
        .series
        .as_ref()
        .ok_or_else(|| DataError::Fetch("no series data".to_string()))?;
    let data = page.data();

    let mut selection = SeriesSelector::new(data.series_labels());
    for label in &args.hide {
        if selection.is_enabled(label) {
            selection.toggle(label);
        } else {
            warn!(label = %label, "--hide names an unknown series");
        }
    }

    let view = filter_by_labels(
        filter_by_date_range(data, args.start.as_deref(), args.end.as_deref()),
        &selection,
    );
    let chart = SeriesChart::new(&view.data, view.start);

    println!("{}", crate::report::format_series_table(&chart));
    if !args.no_plot {
        println!("{}", crate::plot::render_series_plot(&chart, args.width, args.height));
    }
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    logging::init(LogTarget::Stderr)?;
    let mut state = AppState::new(view_config_from_args(&args.view));
    let page = forecast_page_at(&mut state, args.index)?;

    let rows = crate::io::write_window_csv(&args.output, page.chart().view())?;
    info!(path = %args.output.display(), rows, "window exported");
    println!("Wrote {rows} rows to {}", args.output.display());
    Ok(())
}

/// Load forecasts and move the window to `index` (clamped).
fn forecast_page_at(state: &mut AppState, index: i64) -> Result<&mut ForecastPage, AppError> {
    state.load_forecasts()?;
    let page = state
        .forecasts
        .as_mut()
        .ok_or_else(|| DataError::Fetch("no forecast data".to_string()))?;

    let max = page.window().max_index(page.dataset().len());
    if !(0..=max).contains(&index) {
        warn!(index, max, "index out of range; clamping");
    }
    page.jump_to(index);
    Ok(page)
}

pub fn view_config_from_args(args: &ViewArgs) -> ViewConfig {
    ViewConfig {
        backend_url: args.backend.clone(),
        window_size: args.window.max(1),
        horizon_offset: args.offset,
        lead: args.lead,
        input: args.input.clone(),
        series_input: args.series_input.clone(),
        log_file: args.log_file.clone(),
    }
}

/// Rewrite argv so `fdash` defaults to `fdash tui`.
///
/// Rules:
/// - `fdash`                       -> `fdash tui`
/// - `fdash --window 12 ...`       -> `fdash tui --window 12 ...`
/// - `fdash --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "show" | "range" | "export");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
