use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::primitives::datetime_to_unix_seconds;
use crate::error::{ChartError, ChartResult};

/// Timestamps of the shared x-domain, one per sample index.
///
/// The camera works in normalized index units; this table is how hosts turn
/// an index back into a date and how date-keyed scatter data finds its index.
#[derive(Debug, Clone, PartialEq)]
pub struct DateIndex {
    dates: Arc<[DateTime<Utc>]>,
}

impl DateIndex {
    /// Dates must be strictly increasing.
    pub fn new(dates: impl Into<Arc<[DateTime<Utc>]>>) -> ChartResult<Self> {
        let dates = dates.into();
        if dates.is_empty() {
            return Err(ChartError::InvalidData(
                "date index cannot be empty".to_owned(),
            ));
        }
        if let Some(position) = dates.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(ChartError::InvalidData(format!(
                "dates must be strictly increasing (index {})",
                position + 1
            )));
        }
        Ok(Self { dates })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    #[must_use]
    pub fn date_at(&self, index: usize) -> Option<DateTime<Utc>> {
        self.dates.get(index).copied()
    }

    #[must_use]
    pub fn unix_seconds_at(&self, index: usize) -> Option<f64> {
        self.date_at(index).map(datetime_to_unix_seconds)
    }

    #[must_use]
    pub fn index_of(&self, date: DateTime<Utc>) -> Option<usize> {
        self.dates.binary_search(&date).ok()
    }

    pub fn indices_of(&self, dates: &[DateTime<Utc>]) -> ChartResult<Vec<usize>> {
        dates
            .iter()
            .map(|date| {
                self.index_of(*date).ok_or_else(|| {
                    ChartError::InvalidData(format!("date {date} is not part of the x-domain"))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0)
            .single()
            .expect("valid date")
    }

    #[test]
    fn maps_dates_both_ways() {
        let index = DateIndex::new(vec![day(1), day(2), day(5)]).expect("sorted");
        assert_eq!(index.index_of(day(5)), Some(2));
        assert_eq!(index.date_at(1), Some(day(2)));
        assert!(index.indices_of(&[day(3)]).is_err());
    }

    #[test]
    fn unsorted_dates_are_rejected() {
        assert!(DateIndex::new(vec![day(2), day(1)]).is_err());
    }
}
