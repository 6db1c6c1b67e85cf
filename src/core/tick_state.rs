use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::tick_finder::{find_ticks, round_to_sample_spacing};
use crate::core::types::{AxisSide, ViewBounds};
use crate::error::{ChartError, ChartResult};

/// Upper bound on ticks handed to the label renderer in one frame.
pub const MAX_MATERIALIZED_TICKS: usize = 50;

const X_INIT_TICKS: usize = 8;
const Y_INIT_TICKS: usize = 12;
const DEFAULT_MIN_TICKS: usize = 6;
const DEFAULT_MAX_TICKS: usize = 12;

/// Anchors within this many tick deltas of an edge count as on it.
const PHASE_EPSILON: f64 = 1e-9;

/// Tick density limits and label options for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSettings {
    pub min_ticks: usize,
    pub max_ticks: usize,
    pub init_ticks: usize,
    #[serde(default = "default_true")]
    pub show_gridlines: bool,
    #[serde(default)]
    pub tick_label_decimal_places: Option<u32>,
}

fn default_true() -> bool {
    true
}

impl AxisSettings {
    #[must_use]
    pub fn x_default() -> Self {
        Self {
            min_ticks: DEFAULT_MIN_TICKS,
            max_ticks: DEFAULT_MAX_TICKS,
            init_ticks: X_INIT_TICKS,
            show_gridlines: true,
            tick_label_decimal_places: None,
        }
    }

    #[must_use]
    pub fn y_default() -> Self {
        Self {
            init_ticks: Y_INIT_TICKS,
            ..Self::x_default()
        }
    }

    /// Requires `1 <= min_ticks <= init_ticks <= max_ticks` and `init_ticks > 1`.
    pub fn validate(self) -> ChartResult<Self> {
        let ordered = self.min_ticks >= 1
            && self.min_ticks <= self.init_ticks
            && self.init_ticks <= self.max_ticks;
        if !ordered || self.init_ticks <= 1 {
            return Err(ChartError::InvalidTickBounds {
                min_ticks: self.min_ticks,
                max_ticks: self.max_ticks,
                init_ticks: self.init_ticks,
            });
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Anchor tick and spacing of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisTicks {
    pub first_tick: f64,
    pub tick_delta: f64,
}

impl AxisTicks {
    fn is_usable(self) -> bool {
        self.first_tick.is_finite() && self.tick_delta.is_finite() && self.tick_delta > 0.0
    }
}

/// Tick values inside the view, ascending. For the x-axis `sample_indices`
/// holds the matching domain index of every value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickPositions {
    pub values: SmallVec<[f64; 16]>,
    pub sample_indices: SmallVec<[usize; 16]>,
}

/// Incrementally maintained tick anchors for both axes.
///
/// Ticks are not recomputed from scratch each frame: the spacing doubles or
/// halves when the view spans too many or too few ticks, and the anchor tick
/// jumps by whole tick deltas to the edge of the view so labels stay put
/// while panning. X ticks stay
/// on the sample grid so they line up with sample centres.
#[derive(Debug, Clone, PartialEq)]
pub struct TickState {
    x_settings: AxisSettings,
    y_settings: AxisSettings,
    axis_side: AxisSide,
    x: AxisTicks,
    y: AxisTicks,
    initialized: bool,
}

impl TickState {
    pub fn new(
        x_settings: AxisSettings,
        y_settings: AxisSettings,
        axis_side: AxisSide,
    ) -> ChartResult<Self> {
        Ok(Self {
            x_settings: x_settings.validate()?,
            y_settings: y_settings.validate()?,
            axis_side,
            x: AxisTicks {
                first_tick: 0.0,
                tick_delta: 1.0,
            },
            y: AxisTicks {
                first_tick: 0.0,
                tick_delta: 1.0,
            },
            initialized: false,
        })
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[must_use]
    pub fn x(&self) -> AxisTicks {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> AxisTicks {
        self.y
    }

    #[must_use]
    pub fn axis(&self, axis: Axis) -> AxisTicks {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    #[must_use]
    pub fn settings(&self, axis: Axis) -> AxisSettings {
        match axis {
            Axis::X => self.x_settings,
            Axis::Y => self.y_settings,
        }
    }

    /// Seeds both axes from the current view.
    pub fn init(&mut self, bounds: ViewBounds, num_datapoints: usize, delta: f64) {
        self.init_x(bounds, num_datapoints, delta);
        self.init_y(bounds);
        self.initialized = true;
    }

    fn init_x(&mut self, bounds: ViewBounds, num_datapoints: usize, delta: f64) {
        let first_tick = match self.axis_side {
            AxisSide::Right => num_datapoints as f64 * delta,
            AxisSide::Left => 0.0,
        };
        let spacing = bounds.width() / self.x_settings.init_ticks as f64;
        let tick_delta = round_to_sample_spacing(spacing, delta).max(delta);
        self.x = AxisTicks {
            first_tick,
            tick_delta,
        };
        debug!(first_tick, tick_delta, "x ticks initialized");
    }

    /// Re-runs the nice-number search for the y-axis, e.g. after a reset.
    pub fn init_y(&mut self, bounds: ViewBounds) {
        let settings = self.y_settings;
        self.y = match find_ticks(
            bounds.bottom,
            bounds.top,
            settings.init_ticks,
            settings.min_ticks,
            settings.max_ticks,
        ) {
            Some(candidate) => AxisTicks {
                first_tick: candidate.first_tick,
                tick_delta: candidate.step,
            },
            None => {
                let height = bounds.height();
                let tick_delta = if height.is_finite() && height > 0.0 {
                    height / settings.init_ticks as f64
                } else {
                    1.0
                };
                debug!(
                    bottom = bounds.bottom,
                    top = bounds.top,
                    "no nice y tick layout, using even spacing"
                );
                AxisTicks {
                    first_tick: bounds.bottom,
                    tick_delta,
                }
            }
        };
        debug!(
            first_tick = self.y.first_tick,
            tick_delta = self.y.tick_delta,
            "y ticks initialized"
        );
    }

    /// Per-frame maintenance: zoom phase first, then pan phase.
    pub fn update(&mut self, bounds: ViewBounds, delta: f64) {
        if !self.initialized {
            return;
        }
        self.update_x_zoom(bounds, delta);
        self.update_y_zoom(bounds);
        self.update_x_pan(bounds);
        self.update_y_pan(bounds);
    }

    fn update_x_zoom(&mut self, bounds: ViewBounds, delta: f64) {
        if !self.x.is_usable() {
            return;
        }
        let span = bounds.width();
        if !(span > 0.0) {
            return;
        }
        let tick_delta = self.x.tick_delta;
        let shown = (span / tick_delta).ceil();

        if shown > self.x_settings.max_ticks as f64 {
            self.x.tick_delta = round_to_sample_spacing(tick_delta * 2.0, delta).max(delta);
        } else if shown < self.x_settings.min_ticks as f64 {
            // Never more than one tick per sample.
            if tick_delta / 2.0 < delta {
                return;
            }
            self.x.tick_delta = round_to_sample_spacing(tick_delta / 2.0, delta).max(delta);
        }
    }

    fn update_y_zoom(&mut self, bounds: ViewBounds) {
        if !self.y.is_usable() {
            return;
        }
        let span = bounds.height();
        if !(span > 0.0) {
            return;
        }
        let shown = (span / self.y.tick_delta).ceil();
        if shown > self.y_settings.max_ticks as f64 {
            self.y.tick_delta *= 2.0;
        } else if shown < self.y_settings.min_ticks as f64 {
            self.y.tick_delta /= 2.0;
        }
    }

    fn update_x_pan(&mut self, bounds: ViewBounds) {
        if !self.x.is_usable() {
            return;
        }
        match self.axis_side {
            AxisSide::Right => snap_to_trailing_edge(&mut self.x, bounds.right),
            AxisSide::Left => snap_to_leading_edge(&mut self.x, bounds.left),
        }
    }

    fn update_y_pan(&mut self, bounds: ViewBounds) {
        if !self.y.is_usable() {
            return;
        }
        snap_to_leading_edge(&mut self.y, bounds.bottom);
    }

    /// Materializes the ticks visible in `bounds` for the label renderer.
    ///
    /// X values are mapped to sample indices clamped into
    /// `[0, num_datapoints - 1]`.
    #[must_use]
    pub fn tick_positions(
        &self,
        axis: Axis,
        bounds: ViewBounds,
        delta: f64,
        num_datapoints: usize,
    ) -> TickPositions {
        let ticks = self.axis(axis);
        let (low, high) = match axis {
            Axis::X => (bounds.left, bounds.right),
            Axis::Y => (bounds.bottom, bounds.top),
        };
        let mut positions = TickPositions::default();
        if !self.initialized || !ticks.is_usable() || !(low < high) {
            return positions;
        }

        let first_step = ((low - ticks.first_tick) / ticks.tick_delta).ceil();
        let last_step = ((high - ticks.first_tick) / ticks.tick_delta).floor();
        if !first_step.is_finite() || !last_step.is_finite() || last_step < first_step {
            return positions;
        }

        let count = ((last_step - first_step) as usize + 1).min(MAX_MATERIALIZED_TICKS);
        for offset in 0..count {
            let value = ticks.first_tick + (first_step + offset as f64) * ticks.tick_delta;
            positions.values.push(value);
            if axis == Axis::X && num_datapoints > 0 && delta > 0.0 {
                let index = (value / delta).round().max(0.0) as usize;
                positions.sample_indices.push(index.min(num_datapoints - 1));
            }
        }
        positions
    }
}

/// Moves the anchor by the whole number of tick deltas that makes it the
/// first tick at or above `edge`.
fn snap_to_leading_edge(ticks: &mut AxisTicks, edge: f64) {
    let steps = ((edge - ticks.first_tick) / ticks.tick_delta - PHASE_EPSILON).ceil();
    if steps.is_finite() && steps != 0.0 {
        ticks.first_tick += steps * ticks.tick_delta;
    }
}

/// Moves the anchor by the whole number of tick deltas that makes it the
/// last tick at or below `edge`.
fn snap_to_trailing_edge(ticks: &mut AxisTicks, edge: f64) {
    let steps = ((edge - ticks.first_tick) / ticks.tick_delta + PHASE_EPSILON).floor();
    if steps.is_finite() && steps != 0.0 {
        ticks.first_tick += steps * ticks.tick_delta;
    }
}
