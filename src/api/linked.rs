use std::time::Duration;

use tracing::debug;

use crate::core::{DateIndex, Series, SeriesId};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{HeldKeys, NavigationKey};
use crate::render::{Renderer, ViewFrame};

use super::{ChartConfig, ChartRegion};

/// Vertically stacked chart regions sharing one x-domain.
///
/// X gestures and x keys move every region together. Y drags, y wheel zooms
/// and y keys reach only the active region (the one last hovered or
/// clicked), plus any region whose config sets `link_y_zoom_and_pan`.
pub struct LinkedCharts<R: Renderer> {
    renderer: R,
    regions: Vec<ChartRegion>,
    active: usize,
    held_keys: HeldKeys,
    date_index: Option<DateIndex>,
}

impl<R: Renderer> LinkedCharts<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            regions: Vec::new(),
            active: 0,
            held_keys: HeldKeys::default(),
            date_index: None,
        }
    }

    /// Appends a region below the existing ones and returns its index.
    pub fn add_region(&mut self, config: ChartConfig) -> ChartResult<usize> {
        let mut region = ChartRegion::new(config)?;
        if let Some(dates) = &self.date_index {
            region.set_date_index(dates.clone())?;
        }
        self.regions.push(region);
        let index = self.regions.len() - 1;
        debug!(region = index, "linked region added");
        Ok(index)
    }

    /// Attaches a series to one region. Dense series must match the domain
    /// already used by the other regions.
    pub fn add_series(
        &mut self,
        region: usize,
        series: impl Into<Series>,
    ) -> ChartResult<SeriesId> {
        let series = series.into();
        self.check_region(region)?;
        if series.is_dense() {
            if let Some(expected) = self.shared_num_datapoints() {
                if series.num_datapoints() != expected {
                    return Err(ChartError::DomainMismatch {
                        expected,
                        actual: series.num_datapoints(),
                    });
                }
            }
        }

        let had_view = self.regions[region].aggregator().num_datapoints() > 0;
        let reference = self.reference_x_bounds(region);
        let id = self.regions[region].add_series(series)?;

        if !had_view {
            if let Some((left, right)) = reference {
                self.regions[region].camera_mut().set_x_bounds(left, right);
            }
        }
        Ok(id)
    }

    /// Shares one timestamp index between every region, including regions
    /// added later. A length mismatch leaves every region untouched.
    pub fn set_date_index(&mut self, dates: DateIndex) -> ChartResult<()> {
        if let Some(expected) = self.shared_num_datapoints() {
            if dates.len() != expected {
                return Err(ChartError::DomainMismatch {
                    expected,
                    actual: dates.len(),
                });
            }
        }
        for region in &mut self.regions {
            region.set_date_index(dates.clone())?;
        }
        self.date_index = Some(dates);
        Ok(())
    }

    #[must_use]
    pub fn date_index(&self) -> Option<&DateIndex> {
        self.date_index.as_ref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    #[must_use]
    pub fn regions(&self) -> &[ChartRegion] {
        &self.regions
    }

    #[must_use]
    pub fn region(&self, index: usize) -> Option<&ChartRegion> {
        self.regions.get(index)
    }

    #[must_use]
    pub fn active_region(&self) -> usize {
        self.active
    }

    #[must_use]
    pub fn held_keys(&self) -> &HeldKeys {
        &self.held_keys
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Pointer over `region`; the region becomes active.
    pub fn on_pointer_move(&mut self, region: usize, x_proportion: f64, y_proportion: f64) {
        if self.check_region(region).is_err() {
            return;
        }
        self.active = region;
        for (index, chart) in self.regions.iter_mut().enumerate() {
            if index == region {
                chart.on_pointer_move(x_proportion, y_proportion);
            } else {
                chart.on_pointer_leave();
            }
        }
    }

    pub fn on_pointer_leave(&mut self) {
        for chart in &mut self.regions {
            chart.on_pointer_leave();
        }
    }

    pub fn on_pan_start(&mut self, region: usize) {
        if self.check_region(region).is_err() {
            return;
        }
        self.active = region;
        for chart in &mut self.regions {
            chart.on_pan_start();
        }
    }

    /// Every region stores its own click anchor at the same proportions so
    /// the x zoom stays aligned.
    pub fn on_zoom_start(&mut self, region: usize, x_proportion: f64, y_proportion: f64) {
        if self.check_region(region).is_err() {
            return;
        }
        self.active = region;
        for chart in &mut self.regions {
            chart.on_zoom_start(x_proportion, y_proportion);
        }
    }

    pub fn on_drag_end(&mut self) {
        for chart in &mut self.regions {
            chart.on_drag_end();
        }
    }

    pub fn on_drag(&mut self, dx_px: f64, dy_px: f64) {
        let active = self.active;
        for (index, chart) in self.regions.iter_mut().enumerate() {
            let change_y = index == active || chart.config().link_y_zoom_and_pan;
            chart.drag(dx_px, dy_px, change_y);
        }
        self.sync_x();
    }

    /// Wheel over the active region. With the y modifier the active region
    /// and y-linked regions zoom y; otherwise every region zooms x.
    pub fn on_wheel(&mut self, wheel_delta: f64, y_modifier: bool) {
        let Some(pointer) = self
            .regions
            .get(self.active)
            .and_then(|chart| chart.interaction().pointer())
        else {
            return;
        };

        if y_modifier {
            let active = self.active;
            for (index, chart) in self.regions.iter_mut().enumerate() {
                if index == active || chart.config().link_y_zoom_and_pan {
                    chart.wheel_zoom(wheel_delta, pointer, true);
                }
            }
            return;
        }
        for chart in &mut self.regions {
            chart.wheel_zoom(wheel_delta, pointer, false);
        }
        self.sync_x();
    }

    pub fn on_zoom_modifier(&mut self, on: bool) {
        for chart in &mut self.regions {
            chart.on_zoom_modifier(on);
        }
    }

    pub fn on_key(&mut self, key: NavigationKey, held: bool) {
        self.held_keys.set(key, held);
    }

    pub fn reset_view(&mut self) {
        for chart in &mut self.regions {
            chart.reset_view();
        }
    }

    pub fn toggle_gridlines(&mut self) {
        for chart in &mut self.regions {
            chart.toggle_gridlines();
        }
    }

    /// Runs the per-frame pipeline of every region, top to bottom.
    pub fn frames(&mut self, elapsed: Duration) -> Vec<ViewFrame> {
        let keys = self.held_keys;
        let active = self.active;
        for (index, chart) in self.regions.iter_mut().enumerate() {
            let apply_y = index == active || chart.config().link_y_zoom_and_pan;
            chart.apply_keys(&keys, elapsed, true, apply_y);
        }
        self.sync_x();
        self.regions
            .iter_mut()
            .map(ChartRegion::build_frame)
            .collect()
    }

    pub fn render(&mut self, elapsed: Duration) -> ChartResult<()> {
        let frames = self.frames(elapsed);
        for frame in &frames {
            self.renderer.render(frame)?;
        }
        Ok(())
    }

    fn check_region(&self, region: usize) -> ChartResult<()> {
        if region < self.regions.len() {
            return Ok(());
        }
        Err(ChartError::InvalidData(format!(
            "unknown region {region} (have {})",
            self.regions.len()
        )))
    }

    fn shared_num_datapoints(&self) -> Option<usize> {
        self.regions
            .iter()
            .map(|chart| chart.aggregator().num_datapoints())
            .find(|count| *count > 0)
    }

    /// X-window of the first populated region other than `exclude`.
    fn reference_x_bounds(&self, exclude: usize) -> Option<(f64, f64)> {
        self.regions
            .iter()
            .enumerate()
            .find(|(index, chart)| *index != exclude && chart.aggregator().num_datapoints() > 0)
            .map(|(_, chart)| (chart.camera().left(), chart.camera().right()))
    }

    /// Copies the active region's x-window to the others so per-region
    /// clamping never lets them drift apart.
    fn sync_x(&mut self) {
        let Some(source) = self.regions.get(self.active) else {
            return;
        };
        if source.aggregator().num_datapoints() == 0 {
            return;
        }
        let (left, right) = (source.camera().left(), source.camera().right());
        let active = self.active;
        for (index, chart) in self.regions.iter_mut().enumerate() {
            if index != active {
                chart.camera_mut().set_x_bounds(left, right);
            }
        }
    }
}
