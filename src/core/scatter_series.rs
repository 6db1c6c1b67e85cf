use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::date_index::DateIndex;
use crate::error::{ChartError, ChartResult};

/// Sparse overlay keyed by sample index of the shared x-domain.
///
/// A scatter series never defines the domain: it is attached on top of at
/// least one dense series and only touches the indices it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    indices: Arc<[usize]>,
    values: Arc<[f64]>,
    positions: HashMap<usize, usize>,
}

impl ScatterSeries {
    pub fn new(
        indices: impl Into<Arc<[usize]>>,
        values: impl Into<Arc<[f64]>>,
    ) -> ChartResult<Self> {
        let indices = indices.into();
        let values = values.into();

        if indices.len() != values.len() {
            return Err(ChartError::InvalidData(format!(
                "scatter indices ({}) and values ({}) must have the same length",
                indices.len(),
                values.len()
            )));
        }
        if values.iter().any(|value| value.is_infinite()) {
            return Err(ChartError::InvalidData(
                "scatter values must be finite or NaN".to_owned(),
            ));
        }

        let mut positions = HashMap::with_capacity(indices.len());
        for (position, index) in indices.iter().enumerate() {
            positions.entry(*index).or_insert(position);
        }

        Ok(Self {
            indices,
            values,
            positions,
        })
    }

    /// Places values at the domain indices of `dates`.
    ///
    /// Every date must exist in `date_index`.
    pub fn from_dates(
        dates: &[DateTime<Utc>],
        values: impl Into<Arc<[f64]>>,
        date_index: &DateIndex,
    ) -> ChartResult<Self> {
        let indices = date_index.indices_of(dates)?;
        Self::new(indices, values)
    }

    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of points carried, not the size of the shared domain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[must_use]
    pub fn max_index(&self) -> Option<usize> {
        self.indices.iter().copied().max()
    }

    /// Value at a domain index, the first one when an index repeats.
    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.positions
            .get(&index)
            .map(|position| self.values[*position])
    }

    /// Iterates `(domain index, value)` pairs in insertion order.
    pub fn points(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_domain_index() {
        let scatter = ScatterSeries::new(vec![10, 50], vec![1.5, 2.5]).expect("valid");
        assert_eq!(scatter.value_at(50), Some(2.5));
        assert_eq!(scatter.value_at(11), None);
        assert_eq!(scatter.max_index(), Some(50));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        assert!(ScatterSeries::new(vec![1, 2], vec![1.0]).is_err());
    }
}
