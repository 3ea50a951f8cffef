//! Application state shared by the CLI and TUI front-ends.
//!
//! Every handler gets `&mut AppState` (or one of its pages); there is no
//! global chart or index. Each page owns its chart and is the only writer.

use tracing::{debug, error, info};

use crate::data::DataSource;
use crate::domain::{Dataset, SeriesDataset, ViewConfig, WindowState};
use crate::error::DataError;
use crate::view::{
    ChartView, LiveChart, RangeSelection, RangeView, SeriesChart, SeriesSelector, TimeSeriesStore,
    compute_forecast_slice, compute_window, filter_by_date_range, filter_by_labels, load_series,
};

/// Rolling-window forecast page.
#[derive(Debug)]
pub struct ForecastPage {
    store: TimeSeriesStore,
    window: WindowState,
    horizon_offset: usize,
    selection: SeriesSelector,
    chart: LiveChart,
}

impl ForecastPage {
    pub fn new(store: TimeSeriesStore, config: &ViewConfig) -> Self {
        let window = WindowState::new(config.window_size).with_lead(config.lead);
        let dataset = store.dataset();
        let selection = SeriesSelector::new(dataset.series_labels());

        let slice = compute_window(dataset, &window);
        let forecasts = compute_forecast_slice(dataset, &window, config.horizon_offset);
        let chart = LiveChart::create(ChartView::new(dataset, &slice, &forecasts));

        Self {
            store,
            window,
            horizon_offset: config.horizon_offset,
            selection,
            chart,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        self.store.dataset()
    }

    pub fn window(&self) -> &WindowState {
        &self.window
    }

    pub fn selection(&self) -> &SeriesSelector {
        &self.selection
    }

    pub fn chart(&self) -> &LiveChart {
        &self.chart
    }

    pub fn chart_mut(&mut self) -> &mut LiveChart {
        &mut self.chart
    }

    pub fn can_prev(&self) -> bool {
        self.window.current_index > 0
    }

    pub fn can_next(&self) -> bool {
        self.window.current_index < self.window.max_index(self.dataset().len())
    }

    /// Step back one label. Ignored (returns `false`) at the first index.
    pub fn prev(&mut self) -> bool {
        if !self.can_prev() {
            return false;
        }
        self.window.current_index -= 1;
        self.refresh();
        true
    }

    /// Step forward one label. Ignored (returns `false`) at the last index.
    pub fn next(&mut self) -> bool {
        if !self.can_next() {
            return false;
        }
        self.window.current_index += 1;
        self.refresh();
        true
    }

    /// Jump to an index, clamped to the navigable range.
    pub fn jump_to(&mut self, index: i64) {
        let max = self.window.max_index(self.dataset().len());
        self.window.current_index = index.clamp(0, max);
        self.refresh();
    }

    pub fn jump_to_end(&mut self) {
        self.jump_to(i64::MAX);
    }

    pub fn toggle(&mut self, label: &str) -> bool {
        let on = self.selection.toggle(label);
        self.refresh();
        on
    }

    /// Toggle the n-th checkbox (true line is row 0).
    pub fn toggle_nth(&mut self, n: usize) -> Option<(String, bool)> {
        let toggled = self.selection.toggle_nth(n)?;
        self.refresh();
        Some(toggled)
    }

    fn refresh(&mut self) {
        let dataset = self.store.dataset();
        let slice = compute_window(dataset, &self.window);
        let forecasts = self
            .selection
            .filter(compute_forecast_slice(dataset, &self.window, self.horizon_offset));

        debug!(
            index = self.window.current_index,
            start = slice.start,
            forecasts = forecasts.len(),
            "window moved"
        );

        self.chart.sync(&slice, &forecasts);
        self.chart
            .set_true_line_visible(self.selection.is_enabled(&dataset.true_line.label));
        self.chart.update();
    }

    pub fn destroy(self) {
        self.chart.destroy();
    }
}

/// Date-range page over the plain series.
#[derive(Debug)]
pub struct SeriesPage {
    data: SeriesDataset,
    selection: SeriesSelector,
    range: RangeSelection,
    chart: SeriesChart,
}

impl SeriesPage {
    pub fn new(data: SeriesDataset) -> Self {
        let selection = SeriesSelector::new(data.series_labels());
        let range = RangeSelection::new(data.labels.len());
        let chart = SeriesChart::new(&data, 0);
        Self {
            data,
            selection,
            range,
            chart,
        }
    }

    pub fn data(&self) -> &SeriesDataset {
        &self.data
    }

    pub fn selection(&self) -> &SeriesSelector {
        &self.selection
    }

    pub fn range(&self) -> &RangeSelection {
        &self.range
    }

    pub fn chart(&self) -> &SeriesChart {
        &self.chart
    }

    /// Flip a checkbox. Takes effect on the next [`SeriesPage::apply_filter`].
    pub fn toggle_nth(&mut self, n: usize) -> Option<(String, bool)> {
        self.selection.toggle_nth(n)
    }

    pub fn move_start(&mut self, delta: i64) {
        self.range.move_start(delta);
    }

    pub fn move_end(&mut self, delta: i64) {
        self.range.move_end(delta);
    }

    /// Rebuild the chart from the selected range and enabled series.
    pub fn apply_filter(&mut self) {
        let (start, end) = self.range.bounds(&self.data.labels);
        let view = self.filtered(start, end);
        self.chart = SeriesChart::new(&view.data, view.start);
    }

    pub fn filtered(&self, start: Option<&str>, end: Option<&str>) -> RangeView {
        filter_by_labels(filter_by_date_range(&self.data, start, end), &self.selection)
    }
}

pub struct AppState {
    config: ViewConfig,
    source: DataSource,
    pub forecasts: Option<ForecastPage>,
    pub series: Option<SeriesPage>,
}

impl AppState {
    pub fn new(config: ViewConfig) -> Self {
        let source = DataSource::from_config(&config);
        Self {
            config,
            source,
            forecasts: None,
            series: None,
        }
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Fetch and (re)build the forecast page.
    ///
    /// On failure the current page, if any, is left untouched.
    pub fn load_forecasts(&mut self) -> Result<(), DataError> {
        let store = self
            .source
            .fetch_forecasts()
            .and_then(|payload| TimeSeriesStore::load(&payload))
            .inspect_err(|e| error!(error = %e, "failed to load forecasts"))?;

        if let Some(old) = self.forecasts.take() {
            old.destroy();
        }
        self.forecasts = Some(ForecastPage::new(store, &self.config));
        info!(source = %self.source.describe(), "forecast page ready");
        Ok(())
    }

    /// Fetch and (re)build the plain-series page.
    pub fn load_series(&mut self) -> Result<(), DataError> {
        let data = self
            .source
            .fetch_series()
            .and_then(|payload| load_series(&payload))
            .inspect_err(|e| error!(error = %e, "failed to load series"))?;

        self.series = Some(SeriesPage::new(data));
        info!(source = %self.source.describe(), "series page ready");
        Ok(())
    }
}
