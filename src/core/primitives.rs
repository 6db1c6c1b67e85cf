use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Converts a slice of decimal prices, naming the offending field on failure.
pub fn decimals_to_f64(values: &[Decimal], field_name: &str) -> ChartResult<Vec<f64>> {
    values
        .iter()
        .map(|value| decimal_to_f64(*value, field_name))
        .collect()
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// NaN-safe minimum: a NaN on either side yields the other operand.
#[must_use]
pub(crate) fn nan_min(current: f64, candidate: f64) -> f64 {
    current.min(candidate)
}

/// NaN-safe maximum: a NaN on either side yields the other operand.
#[must_use]
pub(crate) fn nan_max(current: f64, candidate: f64) -> f64 {
    current.max(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn nan_helpers_ignore_gaps() {
        assert_eq!(nan_min(f64::NAN, 3.0), 3.0);
        assert_eq!(nan_max(2.0, f64::NAN), 2.0);
        assert!(nan_min(f64::NAN, f64::NAN).is_nan());
    }

    #[test]
    fn decimals_convert_in_order() {
        let values = [Decimal::new(1050, 2), Decimal::new(-25, 1)];
        let converted = decimals_to_f64(&values, "close").expect("convertible");
        assert_eq!(converted, vec![10.5, -2.5]);
    }
}
