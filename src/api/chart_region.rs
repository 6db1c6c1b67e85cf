use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::core::{
    Axis, Camera, DateIndex, HoverValue, ScatterSeries, Series, SeriesAggregator, SeriesId,
    TickState, Viewport, YAxisMode,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{DragMode, HeldKeys, InteractionState, NavigationKey};
use crate::render::{Renderer, ViewFrame};

use super::{ChartConfig, HoverValueDisplayMode, ResolvedTheme};

/// Vertical tolerance of the hover read-out, as a fraction of view height.
pub const HOVER_Y_PADDING_RATIO: f64 = 0.025;

/// Values under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverInfo {
    pub index: usize,
    pub x_value: f64,
    pub y_value: f64,
    pub date: Option<DateTime<Utc>>,
    pub values: Vec<(SeriesId, HoverValue)>,
}

/// One plot region: its series, camera, ticks and input state.
///
/// Host input goes in through the `on_*` handlers; once per frame
/// [`ChartRegion::frame`] applies held keys, re-fits a pinned y-axis,
/// maintains the ticks and returns the [`ViewFrame`] to draw.
#[derive(Debug, Clone)]
pub struct ChartRegion {
    config: ChartConfig,
    theme: ResolvedTheme,
    aggregator: SeriesAggregator,
    camera: Camera,
    ticks: TickState,
    interaction: InteractionState,
    date_index: Option<DateIndex>,
    show_x_gridlines: bool,
    show_y_gridlines: bool,
}

impl ChartRegion {
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        let config = config.validate()?;

        let mut camera = Camera::new(config.camera, config.axis_side, config.viewport)?;
        camera.set_num_starting_datapoints(config.num_starting_datapoints)?;
        camera.set_x_axis_limits(config.x_axis_limits)?;

        let aggregator = SeriesAggregator::new();
        match config.y_axis_mode {
            YAxisMode::Pinned => {}
            YAxisMode::FixedAuto => camera.pin_y_axis(false, &aggregator),
            YAxisMode::FixedUser => {
                camera.set_y_limits(config.y_axis_limits.min, config.y_axis_limits.max)?;
            }
        }

        let ticks = TickState::new(config.x_axis, config.y_axis, config.axis_side)?;

        Ok(Self {
            theme: config.resolve_theme(),
            show_x_gridlines: config.x_axis.show_gridlines,
            show_y_gridlines: config.y_axis.show_gridlines,
            config,
            aggregator,
            camera,
            ticks,
            interaction: InteractionState::default(),
            date_index: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn theme(&self) -> ResolvedTheme {
        self.theme
    }

    #[must_use]
    pub fn aggregator(&self) -> &SeriesAggregator {
        &self.aggregator
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[must_use]
    pub fn ticks(&self) -> &TickState {
        &self.ticks
    }

    #[must_use]
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    #[must_use]
    pub fn date_index(&self) -> Option<&DateIndex> {
        self.date_index.as_ref()
    }

    /// Attaches a series. The first dense series fixes the x-domain and
    /// places the initial view.
    pub fn add_series(&mut self, series: impl Into<Series>) -> ChartResult<SeriesId> {
        let series = series.into();
        if let Some(dates) = &self.date_index {
            if series.is_dense() && series.num_datapoints() != dates.len() {
                return Err(ChartError::DomainMismatch {
                    expected: dates.len(),
                    actual: series.num_datapoints(),
                });
            }
        }

        let id = self.aggregator.add_series(series)?;
        self.camera.refresh_fixed_auto_limits(&self.aggregator);

        if !self.ticks.is_initialized() && self.aggregator.num_datapoints() > 0 {
            self.camera.setup_view(&self.aggregator);
            self.ticks.init(
                self.camera.view_bounds(),
                self.aggregator.num_datapoints(),
                self.aggregator.delta(),
            );
        }
        Ok(id)
    }

    /// Attaches timestamps for the x-domain. Must match the domain size once
    /// one is established.
    pub fn set_date_index(&mut self, dates: DateIndex) -> ChartResult<()> {
        let num_datapoints = self.aggregator.num_datapoints();
        if num_datapoints > 0 && dates.len() != num_datapoints {
            return Err(ChartError::DomainMismatch {
                expected: num_datapoints,
                actual: dates.len(),
            });
        }
        self.date_index = Some(dates);
        Ok(())
    }

    /// Scatter overlay keyed by timestamps of the attached [`DateIndex`].
    pub fn add_scatter_at_dates(
        &mut self,
        dates: &[DateTime<Utc>],
        values: Vec<f64>,
    ) -> ChartResult<SeriesId> {
        let date_index = self.date_index.as_ref().ok_or_else(|| {
            ChartError::InvalidData("scatter by date requires a date index".to_owned())
        })?;
        let scatter = ScatterSeries::from_dates(dates, values, date_index)?;
        self.add_series(scatter)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        self.camera.set_viewport(viewport)?;
        self.config.viewport = viewport;
        Ok(())
    }

    pub fn set_y_limits(&mut self, min: Option<f64>, max: Option<f64>) -> ChartResult<()> {
        self.camera.set_y_limits(min, max)
    }

    pub fn pin_y_axis(&mut self, on: bool) {
        self.camera.pin_y_axis(on, &self.aggregator);
    }

    /// Shows the whole domain on x and the data (or limits) on y.
    pub fn reset_view(&mut self) {
        self.camera.reset_x();
        self.camera.reset_y(&self.aggregator);
        if self.ticks.is_initialized() {
            self.ticks.init_y(self.camera.view_bounds());
        }
    }

    pub fn toggle_gridlines(&mut self) {
        self.show_x_gridlines = !self.show_x_gridlines;
        self.show_y_gridlines = !self.show_y_gridlines;
        debug!(
            x = self.show_x_gridlines,
            y = self.show_y_gridlines,
            "gridlines toggled"
        );
    }

    pub fn on_pointer_move(&mut self, x_proportion: f64, y_proportion: f64) {
        self.interaction.on_pointer_move(x_proportion, y_proportion);
    }

    pub fn on_pointer_leave(&mut self) {
        self.interaction.on_pointer_leave();
    }

    /// Primary button down: start panning.
    pub fn on_pan_start(&mut self) {
        self.interaction.on_pan_start();
    }

    /// Secondary button down at the given plot proportions: start zooming
    /// around that point.
    pub fn on_zoom_start(&mut self, x_proportion: f64, y_proportion: f64) {
        self.interaction
            .on_zoom_start(self.camera.click_anchor(x_proportion, y_proportion));
    }

    pub fn on_drag_end(&mut self) {
        if self.interaction.on_drag_end() {
            self.camera.ensure_zoom_switched_mode_off();
        }
    }

    /// Pointer moved by raw pixel deltas while a button is held.
    pub fn on_drag(&mut self, dx_px: f64, dy_px: f64) {
        self.drag(dx_px, dy_px, true);
    }

    /// Applies the active drag gesture, optionally leaving y untouched.
    pub fn drag(&mut self, dx_px: f64, dy_px: f64, change_y: bool) {
        match self.interaction.drag_mode() {
            DragMode::Idle => {}
            DragMode::Panning => self.camera.left_drag(dx_px, dy_px, change_y),
            DragMode::Zooming => {
                let anchor = self.interaction.mouse();
                self.camera.right_drag(dx_px, dy_px, change_y, anchor);
            }
        }
    }

    /// Wheel at the last pointer position; ignored while the pointer is
    /// outside the plot.
    pub fn on_wheel(&mut self, wheel_delta: f64, y_modifier: bool) {
        if let Some(pointer) = self.interaction.pointer() {
            self.camera.wheel_zoom(wheel_delta, pointer, y_modifier);
        }
    }

    pub fn wheel_zoom(&mut self, wheel_delta: f64, pointer: (f64, f64), y_modifier: bool) {
        self.camera.wheel_zoom(wheel_delta, pointer, y_modifier);
    }

    /// Zoom-mode switch key (Ctrl) pressed or released.
    pub fn on_zoom_modifier(&mut self, on: bool) {
        let zoom_drag_active = self.interaction.drag_mode() == DragMode::Zooming;
        self.camera.fix_zoom_to_edge(on, zoom_drag_active);
    }

    pub fn on_key(&mut self, key: NavigationKey, held: bool) {
        self.interaction.held_keys_mut().set(key, held);
    }

    /// Applies held keys, re-fits a pinned y-axis and maintains ticks.
    pub fn frame(&mut self, elapsed: Duration) -> ViewFrame {
        let keys = *self.interaction.held_keys();
        self.apply_keys(&keys, elapsed, true, true);
        self.build_frame()
    }

    /// Applies held navigation keys to x and/or y.
    pub fn apply_keys(&mut self, keys: &HeldKeys, elapsed: Duration, x: bool, y: bool) {
        if x && keys.any_x() {
            self.camera.apply_held_x_keys(keys, elapsed);
        }
        if y && keys.any_y() {
            self.camera.apply_held_y_keys(keys, elapsed);
        }
    }

    /// Runs the per-frame pipeline on the current camera state without
    /// applying input.
    pub fn build_frame(&mut self) -> ViewFrame {
        if self.camera.y_axis_mode() == YAxisMode::Pinned && self.aggregator.num_datapoints() > 0
        {
            self.camera.fit_y_to_view(&self.aggregator);
        }

        let bounds = self.camera.view_bounds();
        let delta = self.aggregator.delta();
        let num_datapoints = self.aggregator.num_datapoints();
        self.ticks.update(bounds, delta);

        ViewFrame {
            viewport: self.camera.viewport(),
            bounds,
            transform: self.camera.transform(),
            x_ticks: self.ticks.x(),
            y_ticks: self.ticks.y(),
            x_tick_positions: self
                .ticks
                .tick_positions(Axis::X, bounds, delta, num_datapoints),
            y_tick_positions: self
                .ticks
                .tick_positions(Axis::Y, bounds, delta, num_datapoints),
            x_tick_label_decimals: self.ticks.settings(Axis::X).tick_label_decimal_places,
            y_tick_label_decimals: self.ticks.settings(Axis::Y).tick_label_decimal_places,
            visible_range: self.aggregator.query_range(bounds.left, bounds.right),
            show_x_gridlines: self.show_x_gridlines,
            show_y_gridlines: self.show_y_gridlines,
        }
    }

    pub fn render<R: Renderer>(&mut self, renderer: &mut R, elapsed: Duration) -> ChartResult<()> {
        let frame = self.frame(elapsed);
        renderer.render(&frame)
    }

    /// Series values at the pointer, following the configured hover mode.
    #[must_use]
    pub fn hover(&self, x_proportion: f64, y_proportion: f64) -> Option<HoverInfo> {
        if self.config.hover_mode == HoverValueDisplayMode::Off
            || !(0.0..1.0).contains(&x_proportion)
        {
            return None;
        }
        let index = self.camera.index_at(x_proportion)?;
        let x_value = self.camera.x_value_at(x_proportion);
        let y_value = self.camera.y_value_at(y_proportion);
        let y_padding = self.camera.view_height() * HOVER_Y_PADDING_RATIO;
        let always_show = self.config.hover_mode == HoverValueDisplayMode::AlwaysShow;

        Some(HoverInfo {
            index,
            x_value,
            y_value,
            date: self
                .date_index
                .as_ref()
                .and_then(|dates| dates.date_at(index)),
            values: self
                .aggregator
                .values_at(index, x_value, y_value, y_padding, always_show),
        })
    }

    /// Timestamp under the pointer, when a date index is attached.
    #[must_use]
    pub fn date_at(&self, x_proportion: f64) -> Option<DateTime<Utc>> {
        let index = self.camera.index_at(x_proportion)?;
        self.date_index.as_ref()?.date_at(index)
    }

    pub(super) fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }
}
