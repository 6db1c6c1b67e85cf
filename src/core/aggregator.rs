use indexmap::IndexMap;
use tracing::debug;

#[cfg(feature = "parallel-aggregation")]
use rayon::prelude::*;

use crate::core::primitives::{nan_max, nan_min};
use crate::core::series::sample_delta;
use crate::core::{HoverValue, Series, SeriesId};
use crate::error::{ChartError, ChartResult};

/// Fraction of the data span added on both sides of `FixedAuto` y-limits.
pub const Y_AXIS_PADDING_RATIO: f64 = 0.05;

/// Guards `floor(x / delta)` against landing one index short when `x` is an
/// exact multiple of `delta` up to rounding.
const INDEX_EPSILON: f64 = 1e-9;

/// Joint min/max view over every series attached to one chart region.
///
/// All dense series share one x-domain of `num_datapoints` samples. The
/// per-index envelopes are rebuilt whenever a series is added so that
/// visible-range queries only scan the visible slice.
#[derive(Debug, Clone, Default)]
pub struct SeriesAggregator {
    series: IndexMap<SeriesId, Series>,
    next_id: u32,
    num_datapoints: usize,
    min_at_index: Vec<f64>,
    max_at_index: Vec<f64>,
    global_min: Option<f64>,
    global_max: Option<f64>,
}

impl SeriesAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a series and rebuilds the joint envelopes.
    ///
    /// Fails without modifying the aggregator when the series would corrupt
    /// the shared domain: a scatter series as first series, a dense series of
    /// a different length, or a scatter index outside the domain.
    pub fn add_series(&mut self, series: impl Into<Series>) -> ChartResult<SeriesId> {
        let series = series.into();
        self.validate_new_series(&series)?;

        if series.is_dense() && self.num_datapoints == 0 {
            self.num_datapoints = series.num_datapoints();
        }

        let id = SeriesId(self.next_id);
        self.next_id += 1;
        debug!(
            series_id = id.0,
            kind = ?series.kind(),
            num_datapoints = series.num_datapoints(),
            "attach series"
        );
        self.series.insert(id, series);
        self.recompute();
        Ok(id)
    }

    fn validate_new_series(&self, series: &Series) -> ChartResult<()> {
        match series {
            Series::Scatter(scatter) => {
                if self.num_datapoints == 0 {
                    return Err(ChartError::ScatterBaseSeries);
                }
                if let Some(index) = scatter
                    .indices()
                    .iter()
                    .copied()
                    .find(|index| *index >= self.num_datapoints)
                {
                    return Err(ChartError::IndexOutOfDomain {
                        index,
                        num_datapoints: self.num_datapoints,
                    });
                }
            }
            dense => {
                let actual = dense.num_datapoints();
                if self.num_datapoints != 0 && actual != self.num_datapoints {
                    return Err(ChartError::DomainMismatch {
                        expected: self.num_datapoints,
                        actual,
                    });
                }
            }
        }
        Ok(())
    }

    fn recompute(&mut self) {
        let len = self.num_datapoints;
        let mut min_at_index = vec![f64::NAN; len];
        let mut max_at_index = vec![f64::NAN; len];

        // NaN seeds make the first dense series the base; later series merge.
        for series in self.series.values().filter(|series| series.is_dense()) {
            merge_dense(series, &mut min_at_index, &mut max_at_index);
        }

        for series in self.series.values() {
            if let Series::Scatter(scatter) = series {
                for (index, value) in scatter.points() {
                    min_at_index[index] = nan_min(min_at_index[index], value);
                    max_at_index[index] = nan_max(max_at_index[index], value);
                }
            }
        }

        self.global_min = non_nan(min_at_index.iter().copied().fold(f64::NAN, nan_min));
        self.global_max = non_nan(max_at_index.iter().copied().fold(f64::NAN, nan_max));
        self.min_at_index = min_at_index;
        self.max_at_index = max_at_index;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn series(&self, id: SeriesId) -> Option<&Series> {
        self.series.get(&id)
    }

    /// Series in attachment order.
    pub fn iter(&self) -> impl Iterator<Item = (SeriesId, &Series)> + '_ {
        self.series.iter().map(|(id, series)| (*id, series))
    }

    /// Size of the shared x-domain, `0` before the first dense series.
    #[must_use]
    pub fn num_datapoints(&self) -> usize {
        self.num_datapoints
    }

    #[must_use]
    pub fn delta(&self) -> f64 {
        sample_delta(self.num_datapoints)
    }

    /// The x-domain always starts at zero.
    #[must_use]
    pub fn data_min_x(&self) -> f64 {
        0.0
    }

    /// Centre of the last sample: `1 - delta`.
    #[must_use]
    pub fn data_max_x(&self) -> f64 {
        if self.num_datapoints == 0 {
            return 0.0;
        }
        1.0 - self.delta()
    }

    #[must_use]
    pub fn min_at_index(&self) -> &[f64] {
        &self.min_at_index
    }

    #[must_use]
    pub fn max_at_index(&self) -> &[f64] {
        &self.max_at_index
    }

    #[must_use]
    pub fn global_min(&self) -> Option<f64> {
        self.global_min
    }

    #[must_use]
    pub fn global_max(&self) -> Option<f64> {
        self.global_max
    }

    /// Data extent widened by [`Y_AXIS_PADDING_RATIO`] on both sides.
    #[must_use]
    pub fn fixed_auto_limits(&self) -> Option<(f64, f64)> {
        let (min, max) = (self.global_min?, self.global_max?);
        let span = max - min;
        let padding = if span > 0.0 {
            span * Y_AXIS_PADDING_RATIO
        } else {
            min.abs().max(1.0) * Y_AXIS_PADDING_RATIO
        };
        Some((min - padding, max + padding))
    }

    /// Inclusive index slice covered by `[left, right]`, clamped into the domain.
    #[must_use]
    pub fn index_range(&self, left: f64, right: f64) -> Option<(usize, usize)> {
        if self.num_datapoints == 0 || !left.is_finite() || !right.is_finite() || right < left {
            return None;
        }
        let delta = self.delta();
        let last = (self.num_datapoints - 1) as f64;
        let start = (left / delta + INDEX_EPSILON).floor().max(0.0);
        let end = (right / delta + INDEX_EPSILON).floor().min(last);
        if end < 0.0 || start > last || start > end {
            return None;
        }
        Some((start as usize, end as usize))
    }

    /// Minimum and maximum plotted value in the visible x-window.
    ///
    /// Scans only the visible slice of the precomputed envelopes. Returns
    /// `None` when the window misses the domain or only covers gaps.
    #[must_use]
    pub fn query_range(&self, left: f64, right: f64) -> Option<(f64, f64)> {
        let (start, end) = self.index_range(left, right)?;
        let min = self.min_at_index[start..=end]
            .iter()
            .copied()
            .fold(f64::NAN, nan_min);
        let max = self.max_at_index[start..=end]
            .iter()
            .copied()
            .fold(f64::NAN, nan_max);
        Some((non_nan(min)?, non_nan(max)?))
    }

    /// Per-series hover values at a domain index, in attachment order.
    #[must_use]
    pub fn values_at(
        &self,
        index: usize,
        x_world: f64,
        y_world: f64,
        y_padding: f64,
        always_show: bool,
    ) -> Vec<(SeriesId, HoverValue)> {
        self.series
            .iter()
            .filter_map(|(id, series)| {
                series
                    .hover_value(index, x_world, y_world, y_padding, always_show)
                    .map(|value| (*id, value))
            })
            .collect()
    }
}

fn non_nan(value: f64) -> Option<f64> {
    (!value.is_nan()).then_some(value)
}

fn merge_dense(series: &Series, min_at_index: &mut [f64], max_at_index: &mut [f64]) {
    match series {
        Series::Line(line) => {
            merge_column(min_at_index, line.values(), nan_min);
            merge_column(max_at_index, line.values(), nan_max);
        }
        Series::Bar(bar) => {
            merge_column(min_at_index, bar.values(), nan_min);
            merge_column(max_at_index, bar.values(), nan_max);
            if let Some(baseline) = bar.baseline() {
                merge_baseline(min_at_index, bar.values(), baseline, nan_min);
                merge_baseline(max_at_index, bar.values(), baseline, nan_max);
            }
        }
        Series::Candlestick(candles) => {
            merge_column(min_at_index, candles.lows(), nan_min);
            merge_column(max_at_index, candles.highs(), nan_max);
        }
        Series::Scatter(_) => {}
    }
}

#[cfg(not(feature = "parallel-aggregation"))]
fn merge_column(target: &mut [f64], source: &[f64], combine: fn(f64, f64) -> f64) {
    for (current, value) in target.iter_mut().zip(source) {
        *current = combine(*current, *value);
    }
}

#[cfg(feature = "parallel-aggregation")]
fn merge_column(target: &mut [f64], source: &[f64], combine: fn(f64, f64) -> f64) {
    target
        .par_iter_mut()
        .zip(source.par_iter())
        .for_each(|(current, value)| *current = combine(*current, *value));
}

fn merge_baseline(
    target: &mut [f64],
    values: &[f64],
    baseline: f64,
    combine: fn(f64, f64) -> f64,
) {
    for (current, value) in target.iter_mut().zip(values) {
        if !value.is_nan() {
            *current = combine(*current, baseline);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LineSeries, ScatterSeries};

    #[test]
    fn index_range_includes_right_edge_sample() {
        let mut aggregator = SeriesAggregator::new();
        aggregator
            .add_series(LineSeries::new(vec![1.0; 10]).expect("line"))
            .expect("attach");

        let (start, end) = aggregator
            .index_range(0.0, aggregator.data_max_x())
            .expect("range");
        assert_eq!((start, end), (0, 9));
    }

    #[test]
    fn index_range_rejects_window_outside_domain() {
        let mut aggregator = SeriesAggregator::new();
        aggregator
            .add_series(LineSeries::new(vec![1.0; 10]).expect("line"))
            .expect("attach");
        assert_eq!(aggregator.index_range(-0.5, -0.2), None);
        assert_eq!(aggregator.index_range(1.5, 2.0), None);
    }

    #[test]
    fn failed_attach_leaves_state_untouched() {
        let mut aggregator = SeriesAggregator::new();
        let err = aggregator
            .add_series(ScatterSeries::new(vec![0], vec![1.0]).expect("scatter"))
            .expect_err("scatter cannot be base");
        assert_eq!(err, ChartError::ScatterBaseSeries);
        assert!(aggregator.is_empty());
        assert_eq!(aggregator.num_datapoints(), 0);
    }
}
