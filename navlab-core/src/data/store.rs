//! SeriesStore — owns the raw per-instrument series and produces their
//! gap-interpolated forms.
//!
//! Series are held on the *observation index*: the union of every date any
//! instrument published. A series is missing on index dates it did not publish.
//! Interpolation fills those gaps inside each series' own valid span, weighted
//! by elapsed calendar time; nothing before the first or after the last valid
//! observation is touched.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{Point, Series};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("malformed series '{label}': {reason}")]
    MalformedSeries { label: String, reason: String },

    #[error("series '{label}' has fewer than two valid observations and cannot be normalized")]
    InsufficientData { label: String },

    #[error("unknown series '{label}'")]
    UnknownSeries { label: String },

    #[error("no series could be loaded")]
    Empty,
}

/// Raw series in insertion (legend) order.
#[derive(Debug, Default)]
pub struct SeriesStore {
    series: Vec<Series>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw series. Dates must be strictly increasing.
    pub fn add_series(
        &mut self,
        label: impl Into<String>,
        color: impl Into<String>,
        points: Vec<Point>,
    ) -> Result<(), StoreError> {
        let label = label.into();
        if self.series.iter().any(|s| s.label == label) {
            return Err(StoreError::MalformedSeries {
                label,
                reason: "duplicate label".into(),
            });
        }
        if let Some(pair) = points.windows(2).find(|w| w[0].0 >= w[1].0) {
            let reason = if pair[0].0 == pair[1].0 {
                format!("duplicate date {}", pair[0].0)
            } else {
                format!("dates out of order at {}", pair[1].0)
            };
            return Err(StoreError::MalformedSeries { label, reason });
        }

        self.series.push(Series {
            label,
            color: color.into(),
            points,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.label.as_str())
    }

    pub fn raw(&self, label: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.label == label)
    }

    /// Union of every date present in any series.
    pub fn observation_index(&self) -> Vec<NaiveDate> {
        let mut all = BTreeSet::new();
        for s in &self.series {
            all.extend(s.points.iter().map(|(d, _)| *d));
        }
        all.into_iter().collect()
    }

    /// Interpolated form of one series, on the observation index.
    pub fn interpolate(&self, label: &str) -> Result<Series, StoreError> {
        let raw = self.raw(label).ok_or_else(|| StoreError::UnknownSeries {
            label: label.to_string(),
        })?;
        interpolate_on(raw, &self.observation_index())
    }

    /// Interpolate every series. Any series lacking two valid points aborts.
    pub fn interpolate_all(self) -> Result<InterpolatedSet, StoreError> {
        if self.series.is_empty() {
            return Err(StoreError::Empty);
        }
        let index = self.observation_index();
        let series = self
            .series
            .iter()
            .map(|s| interpolate_on(s, &index))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!(
            series = series.len(),
            index_dates = index.len(),
            "interpolated all series"
        );
        Ok(InterpolatedSet { series })
    }
}

/// Reindex `raw` onto `index` and fill gaps between its first and last valid dates.
fn interpolate_on(raw: &Series, index: &[NaiveDate]) -> Result<Series, StoreError> {
    if raw.valid_count() < 2 {
        return Err(StoreError::InsufficientData {
            label: raw.label.clone(),
        });
    }

    let mut points: Vec<Point> = index.iter().map(|d| (*d, raw.value_at(*d))).collect();

    let mut prev: Option<usize> = None;
    for i in 0..points.len() {
        let Some(v1) = points[i].1 else { continue };
        if let Some(p) = prev {
            if i > p + 1 {
                let (d0, v0) = (points[p].0, points[p].1.unwrap_or(v1));
                let d1 = points[i].0;
                let span = (d1 - d0).num_days() as f64;
                let (lo, hi) = (v0.min(v1), v0.max(v1));
                for gap in &mut points[p + 1..i] {
                    let t = (gap.0 - d0).num_days() as f64 / span;
                    gap.1 = Some((v0 + (v1 - v0) * t).clamp(lo, hi));
                }
            }
        }
        prev = Some(i);
    }

    Ok(Series {
        label: raw.label.clone(),
        color: raw.color.clone(),
        points,
    })
}

/// The immutable, interpolated series set, in legend order.
#[derive(Debug, Clone)]
pub struct InterpolatedSet {
    series: Vec<Series>,
}

impl InterpolatedSet {
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn get(&self, index: usize) -> Option<&Series> {
        self.series.get(index)
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.series.iter().position(|s| s.label == label)
    }

    pub fn labels(&self) -> Vec<String> {
        self.series.iter().map(|s| s.label.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn rejects_unsorted_and_duplicate_dates() {
        let mut store = SeriesStore::new();
        let err = store
            .add_series(
                "A",
                "red",
                vec![(d("2020-01-02"), Some(1.0)), (d("2020-01-01"), Some(2.0))],
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::MalformedSeries { .. }));

        let err = store
            .add_series(
                "A",
                "red",
                vec![(d("2020-01-01"), Some(1.0)), (d("2020-01-01"), Some(2.0))],
            )
            .unwrap_err();
        assert!(err.to_string().contains("duplicate date"));
        assert!(store.is_empty());
    }

    #[test]
    fn rejects_duplicate_label() {
        let mut store = SeriesStore::new();
        store
            .add_series("A", "red", vec![(d("2020-01-01"), Some(1.0))])
            .unwrap();
        assert!(store
            .add_series("A", "blue", vec![(d("2020-01-02"), Some(1.0))])
            .is_err());
    }

    #[test]
    fn interpolates_on_other_series_trading_days() {
        let mut store = SeriesStore::new();
        store
            .add_series(
                "A",
                "red",
                vec![(d("2020-01-01"), Some(10.0)), (d("2020-01-11"), Some(20.0))],
            )
            .unwrap();
        store
            .add_series(
                "B",
                "blue",
                vec![
                    (d("2020-01-01"), Some(1.0)),
                    (d("2020-01-06"), Some(1.0)),
                    (d("2020-01-11"), Some(1.0)),
                    (d("2020-01-15"), Some(1.0)),
                ],
            )
            .unwrap();

        let a = store.interpolate("A").unwrap();
        assert_eq!(a.value_at(d("2020-01-06")), Some(15.0));
        // After A's last valid date: untouched.
        assert_eq!(a.value_at(d("2020-01-15")), None);
    }

    #[test]
    fn time_weighted_not_sample_weighted() {
        let mut store = SeriesStore::new();
        store
            .add_series(
                "A",
                "red",
                vec![
                    (d("2020-01-01"), Some(0.0)),
                    (d("2020-01-02"), None),
                    (d("2020-01-05"), Some(4.0)),
                ],
            )
            .unwrap();
        let a = store.interpolate("A").unwrap();
        // One day out of four, not one sample out of two.
        assert_eq!(a.value_at(d("2020-01-02")), Some(1.0));
    }

    #[test]
    fn single_valid_point_is_insufficient() {
        let mut store = SeriesStore::new();
        store
            .add_series(
                "A",
                "red",
                vec![(d("2020-01-01"), Some(10.0)), (d("2020-01-02"), None)],
            )
            .unwrap();
        assert!(matches!(
            store.interpolate("A"),
            Err(StoreError::InsufficientData { .. })
        ));
        assert!(matches!(
            store.interpolate_all(),
            Err(StoreError::InsufficientData { .. })
        ));
    }

    #[test]
    fn unknown_label() {
        let store = SeriesStore::new();
        assert!(matches!(
            store.interpolate("nope"),
            Err(StoreError::UnknownSeries { .. })
        ));
    }
}
