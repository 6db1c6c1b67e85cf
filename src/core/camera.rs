use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::aggregator::{SeriesAggregator, Y_AXIS_PADDING_RATIO};
use crate::core::series::sample_delta;
use crate::core::transform::ViewTransform;
use crate::core::types::{AxisSide, ViewBounds, Viewport, YAxisMode};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{
    HeldKeys, MouseState, NavigationKey, PinInputs, PinState, ZoomModifierState, resolve_pin_state,
};

/// X padding beyond the data, in samples, when no explicit x-limits are set.
pub const X_AXIS_PADDING_FACTOR: f64 = 0.75;

/// Right-drag zoom deltas are scaled down to this magnitude per event.
pub const RIGHT_DRAG_MAGNITUDE_CAP_PX: f64 = 50.0;

/// Key speeds are tuned per frame at this rate and scaled by elapsed time.
pub const KEY_REFERENCE_RATE_HZ: f64 = 60.0;

pub const DEFAULT_NUM_STARTING_DATAPOINTS: usize = 150;

const KEY_SPEED_SCALE: f64 = 0.01;

/// User-facing pan and zoom tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub key_zoom_speed: f64,
    pub mouse_zoom_speed: f64,
    pub key_pan_speed: f64,
    pub mouse_pan_speed: f64,
    pub wheel_speed: f64,
    /// Keep the most recent sample in view: pans and zooms only move the
    /// trailing edge.
    pub lock_most_recent_date: bool,
    /// Zoom pinned to the axis side by default; the zoom modifier flips it.
    pub fix_zoom_at_edge: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            key_zoom_speed: 2.5,
            mouse_zoom_speed: 0.012,
            key_pan_speed: 0.35,
            mouse_pan_speed: 0.70,
            wheel_speed: 0.002,
            lock_most_recent_date: false,
            fix_zoom_at_edge: false,
        }
    }
}

impl CameraSettings {
    pub fn validate(self) -> ChartResult<Self> {
        let speeds = [
            ("key_zoom_speed", self.key_zoom_speed),
            ("mouse_zoom_speed", self.mouse_zoom_speed),
            ("key_pan_speed", self.key_pan_speed),
            ("mouse_pan_speed", self.mouse_pan_speed),
            ("wheel_speed", self.wheel_speed),
        ];
        for (name, speed) in speeds {
            if !speed.is_finite() || speed < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Allowed x-range of the window: `[min_x - padding, max_x + padding]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XExtent {
    pub min_x: f64,
    pub max_x: f64,
    pub padding: f64,
}

impl XExtent {
    #[must_use]
    pub fn lower(self) -> f64 {
        self.min_x - self.padding
    }

    #[must_use]
    pub fn upper(self) -> f64 {
        self.max_x + self.padding
    }
}

/// View window over one chart region's data.
///
/// X is in normalized index units (sample `i` sits at `i * delta`), y in data
/// units. The camera clamps or ignores out-of-range interactive requests
/// instead of failing, so every reachable state keeps `right - left >= delta`
/// and the window inside [`XExtent`].
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    bounds: ViewBounds,
    settings: CameraSettings,
    axis_side: AxisSide,
    viewport: Viewport,
    y_axis_mode: YAxisMode,
    y_axis_limits: (f64, f64),
    x_axis_limits: Option<(f64, f64)>,
    num_starting_datapoints: usize,
    num_datapoints: usize,
    modifier: ZoomModifierState,
}

impl Camera {
    pub fn new(
        settings: CameraSettings,
        axis_side: AxisSide,
        viewport: Viewport,
    ) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        Ok(Self {
            bounds: ViewBounds {
                left: 0.0,
                right: 1.0,
                bottom: 0.0,
                top: 1.0,
            },
            settings: settings.validate()?,
            axis_side,
            viewport,
            y_axis_mode: YAxisMode::Pinned,
            y_axis_limits: (f64::NEG_INFINITY, f64::INFINITY),
            x_axis_limits: None,
            num_starting_datapoints: DEFAULT_NUM_STARTING_DATAPOINTS,
            num_datapoints: 0,
            modifier: ZoomModifierState::default(),
        })
    }

    pub fn set_num_starting_datapoints(&mut self, count: usize) -> ChartResult<()> {
        if count == 0 {
            return Err(ChartError::InvalidData(
                "num_starting_datapoints must be > 0".to_owned(),
            ));
        }
        self.num_starting_datapoints = count;
        Ok(())
    }

    /// Explicit x-limits in normalized units; `None` uses the data extent.
    pub fn set_x_axis_limits(&mut self, limits: Option<(f64, f64)>) -> ChartResult<()> {
        if let Some((min, max)) = limits {
            if !min.is_finite() || !max.is_finite() || min >= max {
                return Err(ChartError::InvalidData(format!(
                    "x-axis limits must be finite with min < max (got {min}, {max})"
                )));
            }
        }
        self.x_axis_limits = limits;
        Ok(())
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        Ok(())
    }

    pub fn set_settings(&mut self, settings: CameraSettings) -> ChartResult<()> {
        self.settings = settings.validate()?;
        Ok(())
    }

    #[must_use]
    pub fn settings(&self) -> CameraSettings {
        self.settings
    }

    #[must_use]
    pub fn axis_side(&self) -> AxisSide {
        self.axis_side
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn view_bounds(&self) -> ViewBounds {
        self.bounds
    }

    #[must_use]
    pub fn left(&self) -> f64 {
        self.bounds.left
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.bounds.right
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.bounds.bottom
    }

    #[must_use]
    pub fn top(&self) -> f64 {
        self.bounds.top
    }

    #[must_use]
    pub fn view_width(&self) -> f64 {
        self.bounds.width()
    }

    #[must_use]
    pub fn view_height(&self) -> f64 {
        self.bounds.height()
    }

    /// Plot-area width over height.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        self.viewport.aspect_ratio()
    }

    #[must_use]
    pub fn y_axis_mode(&self) -> YAxisMode {
        self.y_axis_mode
    }

    /// Active y-limits; unbounded sides are infinite.
    #[must_use]
    pub fn y_axis_limits(&self) -> (f64, f64) {
        self.y_axis_limits
    }

    #[must_use]
    pub fn zoom_modifier(&self) -> ZoomModifierState {
        self.modifier
    }

    #[must_use]
    pub fn delta(&self) -> f64 {
        sample_delta(self.num_datapoints)
    }

    #[must_use]
    pub fn num_datapoints(&self) -> usize {
        self.num_datapoints
    }

    fn has_domain(&self) -> bool {
        self.num_datapoints > 0
    }

    #[must_use]
    pub fn x_extent(&self) -> XExtent {
        let delta = self.delta();
        match self.x_axis_limits {
            Some((min_x, max_x)) => XExtent {
                min_x,
                max_x,
                padding: delta / 2.0,
            },
            None => XExtent {
                min_x: 0.0,
                max_x: if self.has_domain() { 1.0 - delta } else { 0.0 },
                padding: X_AXIS_PADDING_FACTOR * delta,
            },
        }
    }

    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        ViewTransform::from_bounds(self.bounds)
    }

    /// Adopts the aggregator's domain and places the initial window on the
    /// most recent samples, flush against the axis side.
    pub fn setup_view(&mut self, aggregator: &SeriesAggregator) {
        self.num_datapoints = aggregator.num_datapoints();
        if !self.has_domain() {
            return;
        }
        self.init_x_view();
        if self.y_axis_mode == YAxisMode::FixedAuto {
            self.refresh_fixed_auto_limits(aggregator);
        }
        if !self.fit_y_to_view(aggregator) {
            self.reset_y(aggregator);
        }
        debug!(
            left = self.bounds.left,
            right = self.bounds.right,
            bottom = self.bounds.bottom,
            top = self.bounds.top,
            "camera view initialized"
        );
    }

    fn init_x_view(&mut self) {
        let delta = self.delta();
        let samples = self.num_starting_datapoints.min(self.num_datapoints).max(1);
        let view_width = samples as f64 * delta;
        let extent = self.x_extent();

        match self.axis_side {
            AxisSide::Right => {
                self.bounds.right = extent.max_x;
                self.bounds.left = extent.max_x - view_width;
            }
            AxisSide::Left => {
                self.bounds.left = extent.min_x;
                self.bounds.right = extent.min_x + view_width;
            }
        }
        self.bounds.left = self.bounds.left.max(extent.lower());
        self.bounds.right = self.bounds.right.min(extent.upper());
        if self.bounds.width() < delta {
            self.bounds.left = extent.lower();
            self.bounds.right = extent.upper();
        }
    }

    /// Fits y to the data visible in `[left, right]`. Returns `false` and
    /// keeps the current y-bounds when nothing is visible.
    pub fn fit_y_to_view(&mut self, aggregator: &SeriesAggregator) -> bool {
        match aggregator.query_range(self.bounds.left, self.bounds.right) {
            Some((min, max)) => {
                let (bottom, top) = widen_flat_range(min, max);
                self.bounds.bottom = bottom;
                self.bounds.top = top;
                true
            }
            None => {
                trace!(
                    left = self.bounds.left,
                    right = self.bounds.right,
                    "no data in view, keeping y bounds"
                );
                false
            }
        }
    }

    /// Re-derives `FixedAuto` limits from the aggregator's global extent.
    pub fn refresh_fixed_auto_limits(&mut self, aggregator: &SeriesAggregator) {
        if self.y_axis_mode != YAxisMode::FixedAuto {
            return;
        }
        if let Some(limits) = aggregator.fixed_auto_limits() {
            self.y_axis_limits = limits;
        }
    }

    /// `FixedUser` limits; a missing bound is unbounded on that side.
    pub fn set_y_limits(&mut self, min: Option<f64>, max: Option<f64>) -> ChartResult<()> {
        let lower = min.unwrap_or(f64::NEG_INFINITY);
        let upper = max.unwrap_or(f64::INFINITY);
        if lower.is_nan() || upper.is_nan() || lower >= upper {
            return Err(ChartError::InvalidData(format!(
                "y-axis limits must satisfy min < max (got {lower}, {upper})"
            )));
        }

        self.y_axis_mode = YAxisMode::FixedUser;
        self.y_axis_limits = (lower, upper);

        let bottom = self.bounds.bottom.max(lower);
        let top = self.bounds.top.min(upper);
        if bottom < top {
            self.bounds.bottom = bottom;
            self.bounds.top = top;
        } else if lower.is_finite() && upper.is_finite() {
            self.bounds.bottom = lower;
            self.bounds.top = upper;
        }
        debug!(lower, upper, "y-axis limits set");
        Ok(())
    }

    /// `true` re-fits y to the view every frame; `false` switches to
    /// `FixedAuto` limits around the global data extent.
    pub fn pin_y_axis(&mut self, on: bool, aggregator: &SeriesAggregator) {
        if on {
            self.y_axis_mode = YAxisMode::Pinned;
            self.y_axis_limits = (f64::NEG_INFINITY, f64::INFINITY);
            self.fit_y_to_view(aggregator);
        } else {
            self.y_axis_mode = YAxisMode::FixedAuto;
            self.refresh_fixed_auto_limits(aggregator);
        }
        debug!(mode = ?self.y_axis_mode, "y-axis mode changed");
    }

    /// Shows the whole x-domain plus padding.
    pub fn reset_x(&mut self) {
        if !self.has_domain() {
            return;
        }
        let extent = self.x_extent();
        self.bounds.left = extent.lower();
        self.bounds.right = extent.upper();
        debug!(
            left = self.bounds.left,
            right = self.bounds.right,
            "x view reset"
        );
    }

    /// Fixed modes show their limits, `Pinned` the global data extent.
    pub fn reset_y(&mut self, aggregator: &SeriesAggregator) {
        let target = match self.y_axis_mode {
            YAxisMode::FixedAuto | YAxisMode::FixedUser => {
                let (lower, upper) = self.y_axis_limits;
                if lower.is_finite() && upper.is_finite() {
                    Some((lower, upper))
                } else {
                    global_extent(aggregator).map(|(min, max)| {
                        let (bottom, top) = widen_flat_range(min, max);
                        (bottom.max(lower), top.min(upper))
                    })
                }
            }
            YAxisMode::Pinned => {
                global_extent(aggregator).map(|(min, max)| widen_flat_range(min, max))
            }
        };

        match target {
            Some((bottom, top)) if bottom < top => {
                self.bounds.bottom = bottom;
                self.bounds.top = top;
                debug!(bottom, top, "y view reset");
            }
            _ => warn!(
                bottom = self.bounds.bottom,
                top = self.bounds.top,
                "y auto-fit found no data, keeping previous bounds"
            ),
        }
    }

    /// Pans x by a signed fraction of the current width.
    pub fn pan_x(&mut self, amount: f64) {
        if !amount.is_finite() {
            trace!(amount, "ignoring non-finite x pan");
            return;
        }
        if amount == 0.0 || !self.has_domain() {
            return;
        }

        let offset = amount * self.bounds.width();
        let extent = self.x_extent();
        let delta = self.delta();

        if self.settings.lock_most_recent_date {
            match self.axis_side {
                AxisSide::Right => {
                    let floor = extent.min_x.min(self.bounds.left);
                    self.bounds.left = (self.bounds.left - offset)
                        .max(floor)
                        .min(self.bounds.right - delta);
                }
                AxisSide::Left => {
                    let ceiling = extent.upper().max(self.bounds.right);
                    self.bounds.right = (self.bounds.right - offset)
                        .min(ceiling)
                        .max(self.bounds.left + delta);
                }
            }
            return;
        }

        let shift = if offset > 0.0 {
            offset.min((extent.upper() - self.bounds.right).max(0.0))
        } else {
            offset.max((extent.lower() - self.bounds.left).min(0.0))
        };
        if shift != offset {
            trace!(offset, shift, "x pan clamped at data edge");
        }
        self.bounds.left += shift;
        self.bounds.right += shift;
    }

    /// Pans y by a signed fraction of the current height, optionally scaled
    /// by the plot aspect ratio. Fixed modes keep the height while clamping.
    pub fn pan_y(&mut self, amount: f64, apply_aspect_ratio: bool) {
        if !amount.is_finite() {
            trace!(amount, "ignoring non-finite y pan");
            return;
        }
        let height = self.bounds.height();
        let mut offset = amount * height;
        if apply_aspect_ratio {
            offset *= self.aspect_ratio();
        }
        self.bounds.bottom += offset;
        self.bounds.top += offset;

        if self.y_axis_mode.is_fixed() {
            let (lower, upper) = self.y_axis_limits;
            if self.bounds.bottom < lower {
                self.bounds.bottom = lower;
                self.bounds.top = lower + height;
            } else if self.bounds.top > upper {
                self.bounds.top = upper;
                self.bounds.bottom = upper - height;
            }
        }
    }

    #[must_use]
    pub fn pin_state(&self, focus_proportion: f64) -> PinState {
        let extent = self.x_extent();
        resolve_pin_state(&PinInputs {
            lock_most_recent_date: self.settings.lock_most_recent_date,
            fix_zoom_at_edge: self.settings.fix_zoom_at_edge,
            zoom_mode_switched: self.modifier.is_switched(),
            axis_side: self.axis_side,
            left: self.bounds.left,
            right: self.bounds.right,
            min_x: extent.min_x,
            max_x: extent.max_x,
            focus_proportion,
        })
    }

    /// Zooms x by `factor` (> 1 narrows the window) around `focus`, unless a
    /// pin keeps one edge fixed.
    ///
    /// `focus_proportion` is the pointer position across the plot, negative
    /// for keyboard and centred zooms. A zoom that would leave the window
    /// narrower than one sample is ignored.
    pub fn zoom_x(&mut self, factor: f64, focus: f64, focus_proportion: f64) {
        if !factor.is_finite() || factor <= 0.0 || !focus.is_finite() || focus_proportion.is_nan()
        {
            trace!(factor, focus, focus_proportion, "ignoring invalid x zoom");
            return;
        }
        if factor == 1.0 || !self.has_domain() {
            return;
        }

        let delta = self.delta();
        let width = self.bounds.width();
        let new_width = width / factor;
        if new_width < delta {
            trace!(factor, width, "x zoom would show less than one sample");
            return;
        }

        let ViewBounds { left, right, .. } = self.bounds;
        let (mut new_left, mut new_right) = match self.pin_state(focus_proportion) {
            PinState::PinnedRight => (right - new_width, right),
            PinState::PinnedLeft => (left, left + new_width),
            PinState::Unpinned => (
                focus - (focus - left) / factor,
                focus + (right - focus) / factor,
            ),
        };

        let extent = self.x_extent();
        if new_left < extent.lower() || new_left > extent.max_x {
            new_left = extent.lower();
        }
        if new_right > extent.upper() || new_right < extent.min_x {
            new_right = extent.upper();
        }
        if new_right - new_left < delta {
            trace!(new_left, new_right, "x zoom clamp collapsed the window");
            return;
        }

        self.bounds.left = new_left;
        self.bounds.right = new_right;
    }

    /// Zooms y by `factor` around `focus`. Ignored while the y-axis is pinned.
    pub fn zoom_y(&mut self, factor: f64, focus: f64) {
        if self.y_axis_mode == YAxisMode::Pinned {
            return;
        }
        if !factor.is_finite() || factor <= 0.0 || !focus.is_finite() {
            trace!(factor, focus, "ignoring invalid y zoom");
            return;
        }

        let mut top = focus + (self.bounds.top - focus) / factor;
        let mut bottom = focus - (focus - self.bounds.bottom) / factor;
        let (lower, upper) = self.y_axis_limits;
        bottom = bottom.max(lower);
        top = top.min(upper);

        if bottom < top {
            self.bounds.bottom = bottom;
            self.bounds.top = top;
        } else {
            trace!(bottom, top, "y zoom collapsed the window");
        }
    }

    /// Primary-button drag: pans by raw pixel deltas (screen convention, y
    /// grows downward).
    pub fn left_drag(&mut self, dx_px: f64, dy_px: f64, change_y: bool) {
        let plot_width = f64::from(self.viewport.width);
        let speed = self.settings.mouse_pan_speed;

        self.pan_x(-(dx_px * speed) / plot_width);
        if change_y {
            // Aspect ratio is folded in here, not in `pan_y`.
            self.pan_y((dy_px * speed * self.aspect_ratio()) / plot_width, false);
        }
    }

    /// Secondary-button drag: zooms around the pressed location.
    pub fn right_drag(&mut self, dx_px: f64, dy_px: f64, change_y: bool, anchor: MouseState) {
        let (mut dx, mut dy) = (dx_px, dy_px);
        let magnitude = dx.hypot(dy);
        if magnitude > RIGHT_DRAG_MAGNITUDE_CAP_PX {
            let scale = RIGHT_DRAG_MAGNITUDE_CAP_PX / magnitude;
            dx *= scale;
            dy *= scale;
        }

        let speed = self.settings.mouse_zoom_speed;
        self.zoom_x(
            1.0 + dx * speed,
            anchor.click_view_x,
            anchor.click_x_proportion,
        );
        if change_y {
            self.zoom_y(1.0 - dy * speed, anchor.click_view_y);
        }
    }

    /// Wheel zoom at a pointer given as plot proportions. With the y modifier
    /// held only y zooms, otherwise only x.
    pub fn wheel_zoom(&mut self, wheel_delta: f64, pointer: (f64, f64), y_modifier: bool) {
        let factor = 1.0 + wheel_delta * self.settings.wheel_speed;
        let (x_proportion, y_proportion) = pointer;

        if y_modifier {
            if self.y_axis_mode != YAxisMode::Pinned {
                self.zoom_y(factor, self.y_value_at(y_proportion));
            }
        } else {
            self.zoom_x(factor, self.x_value_at(x_proportion), x_proportion);
        }
    }

    /// Applies held x-navigation keys for one frame.
    pub fn apply_held_x_keys(&mut self, keys: &HeldKeys, elapsed: Duration) {
        let step = key_step(elapsed);
        let pan = self.settings.key_pan_speed * KEY_SPEED_SCALE * step;
        let zoom = self.settings.key_zoom_speed * KEY_SPEED_SCALE * step;

        if keys.is_held(NavigationKey::PanLeft) {
            self.pan_x(-pan);
        }
        if keys.is_held(NavigationKey::PanRight) {
            self.pan_x(pan);
        }

        let (center_x, _) = self.bounds.center();
        if keys.is_held(NavigationKey::ZoomInX) {
            self.zoom_x(1.0 + zoom, center_x, -1.0);
        }
        if keys.is_held(NavigationKey::ZoomOutX) {
            self.zoom_x(1.0 - zoom, center_x, -1.0);
        }
    }

    /// Applies held y-navigation keys for one frame.
    pub fn apply_held_y_keys(&mut self, keys: &HeldKeys, elapsed: Duration) {
        let step = key_step(elapsed);
        let pan = self.settings.key_pan_speed * KEY_SPEED_SCALE * step;
        let zoom = self.settings.key_zoom_speed * KEY_SPEED_SCALE * step;

        if keys.is_held(NavigationKey::PanUp) {
            self.pan_y(pan, true);
        }
        if keys.is_held(NavigationKey::PanDown) {
            self.pan_y(-pan, true);
        }

        let (_, center_y) = self.bounds.center();
        if keys.is_held(NavigationKey::ZoomInY) {
            self.zoom_y(1.0 + zoom, center_y);
        }
        if keys.is_held(NavigationKey::ZoomOutY) {
            self.zoom_y(1.0 - zoom, center_y);
        }
    }

    pub fn apply_held_keys(&mut self, keys: &HeldKeys, elapsed: Duration) {
        self.apply_held_x_keys(keys, elapsed);
        self.apply_held_y_keys(keys, elapsed);
    }

    pub fn fix_zoom_to_edge(&mut self, on: bool, zoom_drag_active: bool) {
        self.modifier.fix_zoom_to_edge(on, zoom_drag_active);
    }

    pub fn ensure_zoom_switched_mode_off(&mut self) {
        self.modifier.ensure_switched_mode_off();
    }

    /// Press location for a zoom drag starting at the given proportions.
    #[must_use]
    pub fn click_anchor(&self, x_proportion: f64, y_proportion: f64) -> MouseState {
        MouseState {
            click_x_proportion: x_proportion,
            click_view_x: self.x_value_at(x_proportion),
            click_view_y: self.y_value_at(y_proportion),
        }
    }

    #[must_use]
    pub fn x_value_at(&self, x_proportion: f64) -> f64 {
        self.bounds.left + self.bounds.width() * x_proportion
    }

    /// `y_proportion` is measured from the bottom of the plot.
    #[must_use]
    pub fn y_value_at(&self, y_proportion: f64) -> f64 {
        self.bounds.bottom + self.bounds.height() * y_proportion
    }

    /// Nearest sample index under the pointer, clamped into the domain.
    #[must_use]
    pub fn index_at(&self, x_proportion: f64) -> Option<usize> {
        if !self.has_domain() || !x_proportion.is_finite() {
            return None;
        }
        let index = (self.x_value_at(x_proportion) / self.delta()).round();
        let last = (self.num_datapoints - 1) as f64;
        Some(index.clamp(0.0, last) as usize)
    }

    /// Overwrites the x-window, e.g. to mirror a linked region. Ignored when
    /// the window would be narrower than one sample.
    pub fn set_x_bounds(&mut self, left: f64, right: f64) {
        if !left.is_finite() || !right.is_finite() || right - left < self.delta() {
            trace!(left, right, "ignoring invalid x bounds");
            return;
        }
        self.bounds.left = left;
        self.bounds.right = right;
    }
}

fn key_step(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * KEY_REFERENCE_RATE_HZ
}

fn global_extent(aggregator: &SeriesAggregator) -> Option<(f64, f64)> {
    Some((aggregator.global_min()?, aggregator.global_max()?))
}

/// A flat range is widened so the y-window keeps a positive height.
fn widen_flat_range(min: f64, max: f64) -> (f64, f64) {
    if max > min {
        return (min, max);
    }
    let padding = min.abs().max(1.0) * Y_AXIS_PADDING_RATIO;
    (min - padding, max + padding)
}
