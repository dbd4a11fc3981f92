//! The startup pipeline: interpolated series, union calendar, aligned matrix.
//!
//! Built once after loading; immutable afterwards.

use thiserror::Error;

use super::align::{AlignError, AlignedMatrix, CalendarAligner, UnionCalendar};
use super::store::{InterpolatedSet, SeriesStore, StoreError};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Align(#[from] AlignError),
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub series: InterpolatedSet,
    pub calendar: UnionCalendar,
    pub aligned: AlignedMatrix,
}

impl Dataset {
    /// Interpolate, build the calendar, and align.
    pub fn build(store: SeriesStore) -> Result<Self, DatasetError> {
        let series = store.interpolate_all()?;
        let calendar = CalendarAligner::build(&series)?;
        let aligned = CalendarAligner::align(&series, &calendar)?;
        tracing::info!(
            series = series.len(),
            first = %calendar.first(),
            last = %calendar.last(),
            "dataset ready"
        );
        Ok(Self {
            series,
            calendar,
            aligned,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.aligned.labels
    }

    pub fn color(&self, index: usize) -> Option<&str> {
        self.series.get(index).map(|s| s.color.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn builds_from_store() {
        let mut store = SeriesStore::new();
        store
            .add_series(
                "A",
                "brown",
                vec![(d("2020-01-01"), Some(10.0)), (d("2020-01-03"), Some(12.0))],
            )
            .unwrap();
        let ds = Dataset::build(store).unwrap();
        assert_eq!(ds.calendar.len(), 3);
        assert_eq!(ds.aligned.value(0, d("2020-01-02")), Some(10.0));
        assert_eq!(ds.labels(), &["A".to_string()]);
        assert_eq!(ds.color(0), Some("brown"));
    }

    #[test]
    fn insufficient_series_is_fatal() {
        let mut store = SeriesStore::new();
        store
            .add_series("A", "brown", vec![(d("2020-01-01"), Some(10.0))])
            .unwrap();
        assert!(matches!(
            Dataset::build(store),
            Err(DatasetError::Store(StoreError::InsufficientData { .. }))
        ));
    }
}
