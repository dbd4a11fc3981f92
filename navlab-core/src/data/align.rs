//! Multi-series calendar alignment.
//!
//! Given interpolated series, build a gap-free daily calendar and align every
//! series to it. Calendar days without an observation carry the most recent
//! prior value forward (NAVs are not published on non-trading days). Days
//! before a series' first valid value stay missing; nothing is back-filled.

use chrono::NaiveDate;
use thiserror::Error;

use super::store::InterpolatedSet;
use crate::domain::ValueMatrix;

/// Aligned values: one row per calendar day, one column per series.
pub type AlignedMatrix = ValueMatrix;

#[derive(Debug, Error)]
pub enum AlignError {
    #[error("no series has any valid observation")]
    NoValidData,

    /// Internal invariant violation; never expected from a correctly built calendar.
    #[error("alignment invariant violated: calendar start {date} missing from aligned matrix")]
    CalendarStartMissing { date: NaiveDate },
}

/// Every day from the earliest first-valid date to the latest last-valid date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionCalendar {
    dates: Vec<NaiveDate>,
}

impl UnionCalendar {
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn first(&self) -> NaiveDate {
        self.dates[0]
    }

    pub fn last(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.first()..=self.last()).contains(&date)
    }
}

/// Calendar construction and alignment.
pub struct CalendarAligner;

impl CalendarAligner {
    /// Build the union calendar spanning every series' valid range.
    pub fn build(set: &InterpolatedSet) -> Result<UnionCalendar, AlignError> {
        let first = set.series().iter().filter_map(|s| s.first_valid()).min();
        let last = set.series().iter().filter_map(|s| s.last_valid()).max();
        let (Some(first), Some(last)) = (first, last) else {
            return Err(AlignError::NoValidData);
        };

        let dates: Vec<NaiveDate> = first
            .iter_days()
            .take_while(|d| *d <= last)
            .collect();
        tracing::debug!(%first, %last, days = dates.len(), "built union calendar");
        Ok(UnionCalendar { dates })
    }

    /// Align every series onto the calendar with forward-fill.
    pub fn align(
        set: &InterpolatedSet,
        calendar: &UnionCalendar,
    ) -> Result<AlignedMatrix, AlignError> {
        let columns = set
            .series()
            .iter()
            .map(|series| {
                let mut cursor = 0;
                let mut carried: Option<f64> = None;
                calendar
                    .dates()
                    .iter()
                    .map(|date| {
                        while cursor < series.points.len() && series.points[cursor].0 <= *date {
                            if let Some(v) = series.points[cursor].1 {
                                carried = Some(v);
                            }
                            cursor += 1;
                        }
                        carried
                    })
                    .collect()
            })
            .collect();

        let matrix = ValueMatrix {
            dates: calendar.dates().to_vec(),
            labels: set.labels(),
            columns,
        };

        if matrix.row_index(calendar.first()).is_none() {
            return Err(AlignError::CalendarStartMissing {
                date: calendar.first(),
            });
        }
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::store::SeriesStore;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn two_series() -> InterpolatedSet {
        let mut store = SeriesStore::new();
        store
            .add_series(
                "SPY",
                "red",
                vec![
                    (d("2024-01-02"), Some(100.0)),
                    (d("2024-01-03"), Some(101.0)),
                    (d("2024-01-05"), Some(102.0)),
                ],
            )
            .unwrap();
        store
            .add_series(
                "QQQ",
                "blue",
                vec![(d("2024-01-03"), Some(200.0)), (d("2024-01-08"), Some(205.0))],
            )
            .unwrap();
        store.interpolate_all().unwrap()
    }

    #[test]
    fn calendar_spans_all_valid_dates_daily() {
        let set = two_series();
        let cal = CalendarAligner::build(&set).unwrap();
        assert_eq!(cal.first(), d("2024-01-02"));
        assert_eq!(cal.last(), d("2024-01-08"));
        assert_eq!(cal.len(), 7);
        for w in cal.dates().windows(2) {
            assert_eq!(w[1] - w[0], chrono::Duration::days(1));
        }
    }

    #[test]
    fn forward_fills_but_never_back_fills() {
        let set = two_series();
        let cal = CalendarAligner::build(&set).unwrap();
        let m = CalendarAligner::align(&set, &cal).unwrap();

        // SPY: 2024-01-04 is a calendar-only day → carried from 01-03.
        assert_eq!(m.value(0, d("2024-01-04")), Some(101.0));
        // SPY after its last observation keeps the last value.
        assert_eq!(m.value(0, d("2024-01-08")), Some(102.0));
        // QQQ before its first observation stays missing.
        assert_eq!(m.value(1, d("2024-01-02")), None);
        // QQQ was interpolated on SPY's 01-05 trading day.
        assert_eq!(m.value(1, d("2024-01-05")), Some(202.0));
        assert_eq!(m.value(1, d("2024-01-06")), Some(202.0));
    }

    #[test]
    fn labels_keep_insertion_order() {
        let set = two_series();
        let cal = CalendarAligner::build(&set).unwrap();
        let m = CalendarAligner::align(&set, &cal).unwrap();
        assert_eq!(m.labels, vec!["SPY".to_string(), "QQQ".to_string()]);
        assert_eq!(m.columns.len(), 2);
        assert!(m.columns.iter().all(|c| c.len() == cal.len()));
    }
}
