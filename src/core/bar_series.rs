use std::sync::Arc;

use rust_decimal::Decimal;

use crate::core::primitives::{decimals_to_f64, nan_max, nan_min};
use crate::core::series::{sample_delta, validate_column};
use crate::error::{ChartError, ChartResult};

/// One-value series drawn as bars centred on each sample.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    values: Arc<[f64]>,
    baseline: Option<f64>,
}

impl BarSeries {
    pub fn new(values: impl Into<Arc<[f64]>>) -> ChartResult<Self> {
        let values = values.into();
        validate_column(&values, "bar values")?;
        Ok(Self {
            values,
            baseline: None,
        })
    }

    pub fn from_decimals(values: &[Decimal]) -> ChartResult<Self> {
        Self::new(decimals_to_f64(values, "bar value")?)
    }

    /// Anchors bars to `baseline` so auto-fit keeps the bar feet in view.
    pub fn with_baseline(mut self, baseline: f64) -> ChartResult<Self> {
        if !baseline.is_finite() {
            return Err(ChartError::InvalidData(
                "bar baseline must be finite".to_owned(),
            ));
        }
        self.baseline = Some(baseline);
        Ok(self)
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn baseline(&self) -> Option<f64> {
        self.baseline
    }

    #[must_use]
    pub fn num_datapoints(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn delta(&self) -> f64 {
        sample_delta(self.values.len())
    }

    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// `(min, max)` contributed to auto-fit at `index`.
    #[must_use]
    pub fn value_range_at(&self, index: usize) -> Option<(f64, f64)> {
        let value = self.value_at(index)?;
        match self.baseline {
            Some(baseline) if !value.is_nan() => {
                Some((nan_min(baseline, value), nan_max(baseline, value)))
            }
            _ => Some((value, value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_extends_range_below_positive_bars() {
        let bars = BarSeries::new(vec![5.0, 7.0])
            .expect("valid bars")
            .with_baseline(0.0)
            .expect("finite baseline");
        assert_eq!(bars.value_range_at(1), Some((0.0, 7.0)));
    }

    #[test]
    fn without_baseline_value_is_both_bounds() {
        let bars = BarSeries::new(vec![-3.0]).expect("valid bars");
        assert_eq!(bars.value_range_at(0), Some((-3.0, -3.0)));
        assert_eq!(bars.value_range_at(1), None);
    }
}
