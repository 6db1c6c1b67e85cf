use std::sync::Arc;

use rust_decimal::Decimal;

use crate::core::primitives::decimals_to_f64;
use crate::core::series::{sample_delta, validate_column};
use crate::error::ChartResult;

/// One-value series drawn as a polyline through sample centres.
///
/// `NaN` samples are gaps: they never contribute to auto-fit.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    values: Arc<[f64]>,
}

impl LineSeries {
    pub fn new(values: impl Into<Arc<[f64]>>) -> ChartResult<Self> {
        let values = values.into();
        validate_column(&values, "line values")?;
        Ok(Self { values })
    }

    pub fn from_decimals(values: &[Decimal]) -> ChartResult<Self> {
        Self::new(decimals_to_f64(values, "line value")?)
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
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

    /// Linearly interpolates the line at world x.
    ///
    /// Positions left of the first sample are clamped to it; positions past
    /// the last sample hold the last value.
    #[must_use]
    pub fn interpolate_at(&self, x_world: f64) -> Option<f64> {
        if !x_world.is_finite() {
            return None;
        }
        let last = self.values.len().checked_sub(1)?;
        let delta = self.delta();
        let x = x_world.max(0.0);

        let lower = ((x / delta).floor() as usize).min(last);
        let upper = (lower + 1).min(last);
        let slope = (self.values[upper] - self.values[lower]) / delta;
        let x_start = lower as f64 * delta;

        Some(self.values[lower] + (x - x_start) * slope)
    }
}
