//! Ratatui-based terminal UI.
//!
//! Two pages share the screen: the rolling forecast window and the
//! date-range view over the plain series. Both read and mutate the one
//! [`AppState`] owned by [`App`].

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use tracing::{info, warn};

use crate::app::state::{AppState, ForecastPage, SeriesPage};
use crate::domain::SeriesStyle;
use crate::error::AppError;
use crate::view::{AxisRange, ChartSeries, SeriesSelector};

mod plotters_chart;

use plotters_chart::{LinePlottersChart, PlotSeries, to_tui_color, x_bounds, y_bounds};

const EXPORT_DIR: &str = "exports";

/// Start the TUI.
pub fn run(state: AppState) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(state);
    app.event_loop_with_initial_load(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Forecasts,
    Series,
}

struct App {
    state: AppState,
    page: Page,
    /// Highlighted checkbox row on the series page.
    cursor: usize,
    status: String,
    /// Set when something outside the forecast chart changed on screen.
    ui_dirty: bool,
}

impl App {
    fn new(state: AppState) -> Self {
        Self {
            state,
            page: Page::Forecasts,
            cursor: 0,
            status: "Fetching data...".to_string(),
            ui_dirty: true,
        }
    }

    fn event_loop_with_initial_load<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        // Show "Waiting for data..." while the first fetch blocks.
        terminal
            .draw(|f| self.draw(f))
            .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
        self.load_all();
        self.event_loop(terminal)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if self.take_redraw() || needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }

        if let Some(page) = self.state.forecasts.take() {
            page.destroy();
        }
        Ok(())
    }

    fn load_all(&mut self) {
        let forecasts = self.state.load_forecasts();
        let series = self.state.load_series();
        self.status = match (forecasts, series) {
            (Ok(()), Ok(())) => format!("Loaded from {}", self.state.source().describe()),
            (Err(e), _) => format!("Forecast load failed: {e}"),
            (_, Err(e)) => format!("Series load failed: {e}"),
        };
        self.ui_dirty = true;
    }

    /// Whether the screen is stale. Clears both the UI flag and the chart's
    /// dirty flag.
    fn take_redraw(&mut self) -> bool {
        let chart = self
            .state
            .forecasts
            .as_mut()
            .is_some_and(|page| page.chart_mut().take_dirty());
        std::mem::take(&mut self.ui_dirty) | chart
    }

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        let previous_status = self.status.clone();
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Tab => {
                self.page = match self.page {
                    Page::Forecasts => Page::Series,
                    Page::Series => Page::Forecasts,
                };
                self.ui_dirty = true;
            }
            KeyCode::Char('r') => {
                self.reload();
                self.ui_dirty = true;
            }
            _ => match self.page {
                // Forecast page changes reach the screen through the chart's dirty flag.
                Page::Forecasts => self.handle_forecast_key(code),
                Page::Series => self.handle_series_key(code),
            },
        }
        if self.status != previous_status {
            self.ui_dirty = true;
        }
        false
    }

    fn reload(&mut self) {
        let result = match self.page {
            Page::Forecasts => self.state.load_forecasts(),
            Page::Series => self.state.load_series(),
        };
        self.status = match result {
            Ok(()) => {
                if self.page == Page::Series {
                    self.cursor = 0;
                }
                "Reloaded.".to_string()
            }
            Err(e) => format!("Reload failed: {e}"),
        };
    }

    fn handle_forecast_key(&mut self, code: KeyCode) {
        let Some(page) = self.state.forecasts.as_mut() else {
            self.status = "No forecast data loaded.".to_string();
            return;
        };

        match code {
            KeyCode::Left | KeyCode::Char('h') => {
                if !page.prev() {
                    self.status = "Already at the first window.".to_string();
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if !page.next() {
                    self.status = "Already at the last window.".to_string();
                }
            }
            KeyCode::Home => page.jump_to(0),
            KeyCode::End => page.jump_to_end(),
            KeyCode::Char(c @ '1'..='9') => {
                let n = (c as usize) - ('1' as usize);
                if let Some((label, on)) = page.toggle_nth(n) {
                    self.status = format!("{label}: {}", if on { "shown" } else { "hidden" });
                }
            }
            KeyCode::Char('e') => {
                let path = export_path(page);
                self.status = match crate::io::write_window_csv(&path, page.chart().view()) {
                    Ok(rows) => {
                        info!(path = %path.display(), rows, "window exported");
                        format!("Wrote {rows} rows to {}", path.display())
                    }
                    Err(e) => {
                        warn!(error = %e, "export failed");
                        format!("Export failed: {e}")
                    }
                };
            }
            _ => {}
        }
    }

    fn handle_series_key(&mut self, code: KeyCode) {
        let Some(page) = self.state.series.as_mut() else {
            self.status = "No series data loaded.".to_string();
            return;
        };

        match code {
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => {
                if self.cursor + 1 < page.selection().len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Char(' ') => {
                if let Some((label, on)) = page.toggle_nth(self.cursor) {
                    self.status = format!("{label}: {} (Enter to apply)", if on { "on" } else { "off" });
                }
            }
            KeyCode::Char('[') => page.move_start(-1),
            KeyCode::Char(']') => page.move_start(1),
            KeyCode::Char('{') => page.move_end(-1),
            KeyCode::Char('}') => page.move_end(1),
            KeyCode::Enter => {
                page.apply_filter();
                self.status = format!("Filter applied: {} labels", page.chart().labels.len());
            }
            _ => return,
        }
        self.ui_dirty = true;
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        match self.page {
            Page::Forecasts => self.draw_forecasts(frame, chunks[1]),
            Page::Series => self.draw_series(frame, chunks[1]),
        }
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let tab = |name: &'static str, page: Page| {
            if self.page == page {
                Span::styled(name, Style::default().fg(Color::Black).bg(Color::Cyan))
            } else {
                Span::styled(name, Style::default().fg(Color::Gray))
            }
        };

        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("fdash", Style::default().fg(Color::Cyan)),
            Span::raw(" | "),
            tab(" Forecasts ", Page::Forecasts),
            Span::raw(" "),
            tab(" Series ", Page::Series),
            Span::styled(
                format!("  source: {}", self.state.source().describe()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

        let detail = match self.page {
            Page::Forecasts => self.state.forecasts.as_ref().map(forecast_header_line),
            Page::Series => self.state.series.as_ref().map(series_header_line),
        };
        lines.push(detail.unwrap_or_else(|| Line::from(Span::styled("-", Style::default().fg(Color::Gray)))));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_forecasts(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(28)])
            .split(area);

        let Some(page) = &self.state.forecasts else {
            draw_waiting(frame, chunks[0], "Forecasts");
            return;
        };

        let view = page.chart().view();
        let series = plot_series(view.datasets().filter(|s| s.visible), page.selection());
        draw_line_chart(
            frame,
            chunks[0],
            "Forecasts",
            &page.dataset().labels,
            view.label_offset,
            view.labels.len(),
            &series,
            view.y_axis,
        );
        let styles = checkbox_styles(page.selection(), |label| {
            page.dataset()
                .models
                .iter()
                .find(|m| m.label == label)
                .map(|m| &m.style)
        });
        draw_checkboxes(frame, chunks[1], page.selection(), &styles, None);
    }

    fn draw_series(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(28)])
            .split(area);

        let Some(page) = &self.state.series else {
            draw_waiting(frame, chunks[0], "Series");
            return;
        };

        let chart = page.chart();
        let series = plot_series(chart.datasets.iter(), page.selection());
        draw_line_chart(
            frame,
            chunks[0],
            "Series",
            &page.data().labels,
            chart.label_offset,
            chart.labels.len(),
            &series,
            chart.y_axis,
        );

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(4)])
            .split(chunks[1]);
        let styles = checkbox_styles(page.selection(), |label| {
            page.data().datasets.iter().find(|s| s.label == label).map(|s| &s.style)
        });
        draw_checkboxes(frame, side[0], page.selection(), &styles, Some(self.cursor));

        let (start, end) = page.range().bounds(&page.data().labels);
        let range = Paragraph::new(Text::from(vec![
            Line::from(format!("Start: {}", start.unwrap_or("-"))),
            Line::from(format!("End:   {}", end.unwrap_or("-"))),
        ]))
        .block(Block::default().title("Range").borders(Borders::ALL));
        frame.render_widget(range, side[1]);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = match self.page {
            Page::Forecasts => "←/→ move  Home/End jump  1-9 toggle  e export  r reload  Tab page  q quit",
            Page::Series => "↑/↓ select  Space toggle  [/] start  {/} end  Enter apply  r reload  Tab page  q quit",
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn forecast_header_line(page: &ForecastPage) -> Line<'static> {
    let view = page.chart().view();
    let first = view.labels.first().map(String::as_str).unwrap_or("-");
    let last = view.labels.last().map(String::as_str).unwrap_or("-");
    let window = page.window();

    let button = |text: &'static str, enabled: bool| {
        let style = if enabled {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(text, style)
    };

    Line::from(vec![
        button("[◀ prev]", page.can_prev()),
        Span::raw(" "),
        button("[next ▶]", page.can_next()),
        Span::styled(
            format!(
                "  window: {first} .. {last} | index {} of 0..={}",
                window.current_index,
                window.max_index(page.dataset().len()),
            ),
            Style::default().fg(Color::Gray),
        ),
    ])
}

fn series_header_line(page: &SeriesPage) -> Line<'static> {
    let chart = page.chart();
    let first = chart.labels.first().map(String::as_str).unwrap_or("-");
    let last = chart.labels.last().map(String::as_str).unwrap_or("-");
    Line::from(Span::styled(
        format!(
            "showing: {first} .. {last} | {} labels | {} series",
            chart.labels.len(),
            chart.datasets.len()
        ),
        Style::default().fg(Color::Gray),
    ))
}

fn export_path(page: &ForecastPage) -> PathBuf {
    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let first = page
        .chart()
        .view()
        .labels
        .first()
        .map(String::as_str)
        .unwrap_or("empty");
    PathBuf::from(EXPORT_DIR).join(format!("window_{first}_{ts}.csv"))
}

/// Colors follow the checkbox row so toggling never recolors other series.
fn plot_series<'a>(series: impl Iterator<Item = &'a ChartSeries>, selection: &SeriesSelector) -> Vec<PlotSeries> {
    series
        .map(|s| {
            let position = selection
                .entries()
                .position(|(label, _)| label == s.label)
                .unwrap_or(0);
            PlotSeries::from_chart_series(s, position)
        })
        .collect()
}

fn draw_waiting(frame: &mut ratatui::Frame<'_>, area: Rect, title: &str) {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let msg = Paragraph::new("Waiting for data...")
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default());
    frame.render_widget(msg, inner);
}

#[allow(clippy::too_many_arguments)]
fn draw_line_chart(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    title: &str,
    all_labels: &[String],
    label_offset: usize,
    label_count: usize,
    series: &[PlotSeries],
    y_axis: AxisRange,
) {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Clear, inner);

    if series.is_empty() {
        let msg = Paragraph::new("No series selected.").style(Style::default().fg(Color::Yellow));
        frame.render_widget(msg, inner);
        return;
    }

    let xb = x_bounds(label_offset, label_count, series);
    let yb = y_bounds(y_axis);

    let (chart_rect, insets) = chart_layout(inner);
    let widget = LinePlottersChart {
        series,
        x_bounds: xb,
        y_bounds: yb,
    };
    frame.render_widget(widget, chart_rect);
    if let Some(insets) = insets {
        draw_axis_ticks(frame, inner, chart_rect, insets, xb, yb, all_labels);
    }
}

/// Style per checkbox row; rows without a style (the true line) get the default.
fn checkbox_styles<'a>(
    selection: &SeriesSelector,
    style_of: impl Fn(&str) -> Option<&'a SeriesStyle>,
) -> Vec<SeriesStyle> {
    selection
        .entries()
        .map(|(label, _)| style_of(label).cloned().unwrap_or_default())
        .collect()
}

fn draw_checkboxes(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    selection: &SeriesSelector,
    styles: &[SeriesStyle],
    cursor: Option<usize>,
) {
    let items: Vec<ListItem> = selection
        .entries()
        .enumerate()
        .map(|(i, (label, on))| {
            let mark = if on { "[x]" } else { "[ ]" };
            let key = if cursor.is_none() && i < 9 {
                format!("{} ", i + 1)
            } else {
                String::new()
            };
            let style = styles.get(i).cloned().unwrap_or_default();
            let color = plotters_chart::series_color(&style, i);
            ListItem::new(Line::from(vec![
                Span::raw(format!("{key}{mark} ")),
                Span::styled(label.to_string(), Style::default().fg(to_tui_color(color))),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title("Series").borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
        .highlight_symbol("» ");

    let mut state = ListState::default();
    state.select(cursor);
    frame.render_stateful_widget(list, area, &mut state);
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10 || inner.height <= insets.top + insets.bottom + 5 {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    labels: &[String],
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = x_bounds[0] + u * (x_bounds[1] - x_bounds[0]);
        let Some(label) = tick_label(labels, x_val) else {
            continue;
        };
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label_len = label.len() as u16;
        let start = x
            .saturating_sub(label_len / 2)
            .min((inner.x + inner.width).saturating_sub(label_len));
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = format!("{y_val:.1}");
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label_len);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new("month")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }
}

/// Label at the nearest absolute position, if there is one.
fn tick_label(labels: &[String], x: f64) -> Option<String> {
    if !x.is_finite() || x < 0.0 {
        return None;
    }
    labels.get(x.round() as usize).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::payload::{ForecastPayload, SeriesPayload};
    use crate::domain::ViewConfig;
    use crate::view::{TimeSeriesStore, load_series};
    use serde_json::json;

    fn app() -> App {
        let labels: Vec<String> = (1..=6).map(|m| format!("2020-{m:02}")).collect();
        let keys: serde_json::Map<String, serde_json::Value> = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (format!("{l}-01"), json!([i as f64, i as f64 + 0.5])))
            .collect();
        let forecasts: ForecastPayload = serde_json::from_value(json!({
            "labels": labels,
            "true_line": {"label": "True Line", "data": [0.0, 1.0, 2.0, 3.0, 4.0, 5.0]},
            "datasets": [{"label": "Model1", "data": keys}]
        }))
        .unwrap();
        let series: SeriesPayload = serde_json::from_value(json!({
            "labels": ["2020-01", "2020-02", "2020-03"],
            "datasets": [
                {"label": "A", "data": [1.0, 2.0, 3.0]},
                {"label": "B", "data": [4.0, 5.0, 6.0]},
            ]
        }))
        .unwrap();

        let config = ViewConfig {
            window_size: 3,
            ..ViewConfig::default()
        };
        let mut state = AppState::new(config.clone());
        state.forecasts = Some(ForecastPage::new(TimeSeriesStore::load(&forecasts).unwrap(), &config));
        state.series = Some(SeriesPage::new(load_series(&series).unwrap()));
        App::new(state)
    }

    #[test]
    fn navigation_keys_move_the_window() {
        let mut app = app();
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Char('l'));
        assert_eq!(app.state.forecasts.as_ref().unwrap().window().current_index, 2);

        app.handle_key(KeyCode::End);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.state.forecasts.as_ref().unwrap().window().current_index, 3);
        assert_eq!(app.status, "Already at the last window.");

        app.handle_key(KeyCode::Home);
        app.handle_key(KeyCode::Char('h'));
        assert_eq!(app.state.forecasts.as_ref().unwrap().window().current_index, 0);
        assert_eq!(app.status, "Already at the first window.");
    }

    #[test]
    fn digit_keys_toggle_checkboxes() {
        let mut app = app();
        app.handle_key(KeyCode::Char('2'));
        assert_eq!(app.status, "Model1: hidden");
        assert!(app.state.forecasts.as_ref().unwrap().chart().view().forecasts.is_empty());

        app.handle_key(KeyCode::Char('1'));
        let view = app.state.forecasts.as_ref().unwrap().chart().view();
        assert!(!view.true_line.visible);

        // No ninth series: nothing happens.
        app.handle_key(KeyCode::Char('9'));
        assert_eq!(app.status, "True Line: hidden");
    }

    #[test]
    fn series_page_applies_range_and_checkboxes_on_enter() {
        let mut app = app();
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.page, Page::Series);

        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Down);
        assert_eq!(app.cursor, 1);
        app.handle_key(KeyCode::Char(' '));
        app.handle_key(KeyCode::Char(']'));
        app.handle_key(KeyCode::Char('{'));

        // Nothing changes until Enter.
        assert_eq!(app.state.series.as_ref().unwrap().chart().datasets.len(), 2);

        app.handle_key(KeyCode::Enter);
        let chart = app.state.series.as_ref().unwrap().chart();
        assert_eq!(chart.labels, vec!["2020-02"]);
        assert_eq!(chart.label_offset, 1);
        assert_eq!(chart.datasets.len(), 1);
        assert_eq!(chart.datasets[0].label, "A");
    }

    #[test]
    fn redraw_follows_chart_and_status_changes() {
        let mut app = app();
        assert!(app.take_redraw());
        assert!(!app.take_redraw());

        // Moving the window marks the chart dirty through `update()`.
        app.handle_key(KeyCode::Right);
        assert!(app.take_redraw());
        assert!(!app.take_redraw());

        // At the last window nothing moves, but the status line changes.
        app.handle_key(KeyCode::End);
        app.take_redraw();
        app.handle_key(KeyCode::Right);
        assert!(app.take_redraw());

        // Same key again: same status, chart untouched.
        app.handle_key(KeyCode::Right);
        assert!(!app.take_redraw());

        // Unbound keys leave the screen alone.
        app.handle_key(KeyCode::Char('z'));
        assert!(!app.take_redraw());
    }

    #[test]
    fn keys_without_data_only_update_status() {
        let mut app = App::new(AppState::new(ViewConfig::default()));
        assert!(!app.handle_key(KeyCode::Right));
        assert_eq!(app.status, "No forecast data loaded.");
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn tick_labels_use_absolute_positions() {
        let labels = vec!["2020-01".to_string(), "2020-02".to_string()];
        assert_eq!(tick_label(&labels, 0.6).as_deref(), Some("2020-02"));
        assert_eq!(tick_label(&labels, 5.0), None);
        assert_eq!(tick_label(&labels, -1.0), None);
    }
}
