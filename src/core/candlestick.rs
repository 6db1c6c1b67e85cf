use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::decimals_to_f64;
use crate::core::series::{sample_delta, validate_column};
use crate::error::{ChartError, ChartResult};

/// One OHLC sample read back from a [`CandlestickSeries`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcBar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl OhlcBar {
    /// Returns `true` when close price is greater than or equal to open price.
    #[must_use]
    pub fn is_bullish(self) -> bool {
        self.close >= self.open
    }
}

/// Four-value series. Auto-fit uses `low` as the minimum and `high` as the
/// maximum of each sample.
#[derive(Debug, Clone, PartialEq)]
pub struct CandlestickSeries {
    open: Arc<[f64]>,
    high: Arc<[f64]>,
    low: Arc<[f64]>,
    close: Arc<[f64]>,
}

impl CandlestickSeries {
    /// Builds a candlestick series from four equally long columns.
    ///
    /// Invariants:
    /// - all columns are non-empty and share one length
    /// - `low <= high` wherever both are present
    pub fn new(
        open: impl Into<Arc<[f64]>>,
        high: impl Into<Arc<[f64]>>,
        low: impl Into<Arc<[f64]>>,
        close: impl Into<Arc<[f64]>>,
    ) -> ChartResult<Self> {
        let open = open.into();
        let high = high.into();
        let low = low.into();
        let close = close.into();

        validate_column(&open, "candle open")?;
        validate_column(&high, "candle high")?;
        validate_column(&low, "candle low")?;
        validate_column(&close, "candle close")?;

        let len = open.len();
        if high.len() != len || low.len() != len || close.len() != len {
            return Err(ChartError::InvalidData(format!(
                "candle columns must share one length (open={}, high={}, low={}, close={})",
                open.len(),
                high.len(),
                low.len(),
                close.len()
            )));
        }

        if let Some(index) = low
            .iter()
            .zip(high.iter())
            .position(|(low, high)| low > high)
        {
            return Err(ChartError::InvalidData(format!(
                "candle low must be <= high (index {index})"
            )));
        }

        Ok(Self {
            open,
            high,
            low,
            close,
        })
    }

    /// Converts strongly-typed decimal prices into a validated series.
    pub fn from_decimals(
        open: &[Decimal],
        high: &[Decimal],
        low: &[Decimal],
        close: &[Decimal],
    ) -> ChartResult<Self> {
        Self::new(
            decimals_to_f64(open, "open")?,
            decimals_to_f64(high, "high")?,
            decimals_to_f64(low, "low")?,
            decimals_to_f64(close, "close")?,
        )
    }

    #[must_use]
    pub fn num_datapoints(&self) -> usize {
        self.open.len()
    }

    #[must_use]
    pub fn delta(&self) -> f64 {
        sample_delta(self.open.len())
    }

    #[must_use]
    pub fn lows(&self) -> &[f64] {
        &self.low
    }

    #[must_use]
    pub fn highs(&self) -> &[f64] {
        &self.high
    }

    #[must_use]
    pub fn candle_at(&self, index: usize) -> Option<OhlcBar> {
        Some(OhlcBar {
            open: *self.open.get(index)?,
            high: self.high[index],
            low: self.low[index],
            close: self.close[index],
        })
    }

    #[must_use]
    pub fn value_range_at(&self, index: usize) -> Option<(f64, f64)> {
        Some((*self.low.get(index)?, self.high[index]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_columns_are_rejected() {
        let err = CandlestickSeries::new(
            vec![1.0, 2.0],
            vec![2.0, 3.0],
            vec![0.5],
            vec![1.5, 2.5],
        )
        .expect_err("length mismatch");
        assert!(matches!(err, ChartError::InvalidData(_)));
    }

    #[test]
    fn inverted_candle_is_rejected() {
        let result = CandlestickSeries::new(vec![1.0], vec![0.5], vec![2.0], vec![1.0]);
        assert!(result.is_err());
    }

    #[test]
    fn gaps_do_not_trip_low_high_check() {
        let series = CandlestickSeries::new(
            vec![1.0, f64::NAN],
            vec![2.0, f64::NAN],
            vec![0.5, f64::NAN],
            vec![1.5, f64::NAN],
        )
        .expect("NaN gap allowed");
        assert_eq!(series.value_range_at(0), Some((0.5, 2.0)));
        assert!(series.candle_at(0).expect("present").is_bullish());
    }
}
