use serde::{Deserialize, Serialize};

use crate::core::{BarSeries, CandlestickSeries, LineSeries, OhlcBar, ScatterSeries};
use crate::error::{ChartError, ChartResult};

/// Stable handle of a series attached to a chart region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesKind {
    Line,
    Bar,
    Candlestick,
    Scatter,
}

/// Any plot that can share a chart's x-domain.
///
/// Dense variants cover every index of the domain and define its size.
/// `Scatter` is sparse and only ever overlays an existing domain.
#[derive(Debug, Clone, PartialEq)]
pub enum Series {
    Line(LineSeries),
    Bar(BarSeries),
    Candlestick(CandlestickSeries),
    Scatter(ScatterSeries),
}

/// Value read under the pointer for one series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HoverValue {
    Candle(OhlcBar),
    Value(f64),
}

impl Series {
    #[must_use]
    pub fn kind(&self) -> SeriesKind {
        match self {
            Self::Line(_) => SeriesKind::Line,
            Self::Bar(_) => SeriesKind::Bar,
            Self::Candlestick(_) => SeriesKind::Candlestick,
            Self::Scatter(_) => SeriesKind::Scatter,
        }
    }

    #[must_use]
    pub fn is_dense(&self) -> bool {
        !matches!(self, Self::Scatter(_))
    }

    /// Samples held by the series. For dense series this is the domain size.
    #[must_use]
    pub fn num_datapoints(&self) -> usize {
        match self {
            Self::Line(line) => line.num_datapoints(),
            Self::Bar(bar) => bar.num_datapoints(),
            Self::Candlestick(candles) => candles.num_datapoints(),
            Self::Scatter(scatter) => scatter.len(),
        }
    }

    /// Sample spacing in normalized x. `None` for scatter series, whose
    /// spacing is the one of the domain they overlay.
    #[must_use]
    pub fn delta(&self) -> Option<f64> {
        match self {
            Self::Line(line) => Some(line.delta()),
            Self::Bar(bar) => Some(bar.delta()),
            Self::Candlestick(candles) => Some(candles.delta()),
            Self::Scatter(_) => None,
        }
    }

    /// `(min, max)` plotted at a domain index, `None` when nothing is there.
    #[must_use]
    pub fn value_range_at(&self, index: usize) -> Option<(f64, f64)> {
        match self {
            Self::Line(line) => line.value_at(index).map(|value| (value, value)),
            Self::Bar(bar) => bar.value_range_at(index),
            Self::Candlestick(candles) => candles.value_range_at(index),
            Self::Scatter(scatter) => scatter.value_at(index).map(|value| (value, value)),
        }
    }

    /// Hover value at `index` (and world x for interpolating lines).
    ///
    /// With `always_show` unset the value is only reported when `y_world`
    /// lies within `y_padding` of what is drawn.
    #[must_use]
    pub fn hover_value(
        &self,
        index: usize,
        x_world: f64,
        y_world: f64,
        y_padding: f64,
        always_show: bool,
    ) -> Option<HoverValue> {
        let near = |low: f64, high: f64| {
            always_show || (low - y_padding < y_world && y_world < high + y_padding)
        };

        match self {
            Self::Candlestick(candles) => {
                let candle = candles.candle_at(index)?;
                near(candle.low, candle.high).then_some(HoverValue::Candle(candle))
            }
            Self::Line(line) => {
                let value = line.interpolate_at(x_world)?;
                near(value, value).then_some(HoverValue::Value(value))
            }
            Self::Bar(bar) => {
                let value = bar.value_at(index)?;
                near(value, value).then_some(HoverValue::Value(value))
            }
            Self::Scatter(scatter) => {
                let value = scatter.value_at(index)?;
                near(value, value).then_some(HoverValue::Value(value))
            }
        }
        .filter(|value| match value {
            HoverValue::Value(value) => !value.is_nan(),
            HoverValue::Candle(candle) => !candle.low.is_nan() && !candle.high.is_nan(),
        })
    }
}

impl From<LineSeries> for Series {
    fn from(value: LineSeries) -> Self {
        Self::Line(value)
    }
}

impl From<BarSeries> for Series {
    fn from(value: BarSeries) -> Self {
        Self::Bar(value)
    }
}

impl From<CandlestickSeries> for Series {
    fn from(value: CandlestickSeries) -> Self {
        Self::Candlestick(value)
    }
}

impl From<ScatterSeries> for Series {
    fn from(value: ScatterSeries) -> Self {
        Self::Scatter(value)
    }
}

/// Sample spacing of a dense series with `len` samples.
#[must_use]
pub(crate) fn sample_delta(len: usize) -> f64 {
    if len == 0 { 0.0 } else { 1.0 / len as f64 }
}

/// Dense columns must be non-empty; NaN marks a gap, infinities are rejected.
pub(crate) fn validate_column(values: &[f64], field_name: &str) -> ChartResult<()> {
    if values.is_empty() {
        return Err(ChartError::InvalidData(format!(
            "{field_name} cannot be empty"
        )));
    }
    if values.iter().any(|value| value.is_infinite()) {
        return Err(ChartError::InvalidData(format!(
            "{field_name} must be finite or NaN"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candle_hover_respects_padding() {
        let candles = CandlestickSeries::new(vec![10.0], vec![12.0], vec![9.0], vec![11.0])
            .expect("valid candles");
        let series = Series::from(candles);

        assert!(series.hover_value(0, 0.0, 12.5, 1.0, false).is_some());
        assert!(series.hover_value(0, 0.0, 20.0, 1.0, false).is_none());
        assert!(series.hover_value(0, 0.0, 20.0, 1.0, true).is_some());
    }

    #[test]
    fn scatter_is_not_dense() {
        let scatter = ScatterSeries::new(vec![3], vec![1.0]).expect("valid scatter");
        let series = Series::from(scatter);
        assert!(!series.is_dense());
        assert_eq!(series.delta(), None);
        assert_eq!(series.value_range_at(3), Some((1.0, 1.0)));
    }
}
