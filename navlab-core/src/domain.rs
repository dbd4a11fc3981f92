//! Domain types shared by every layer: dated series, value matrices, and the
//! numeric date domain used for pointer positions.

use chrono::{Datelike, NaiveDate, ParseResult};

/// Display and input format for dates (day-month-year).
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// `num_days_from_ce` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// One observation; `None` is a missing value.
pub type Point = (NaiveDate, Option<f64>);

/// Parse a `dd-mm-yyyy` date.
pub fn parse_date(text: &str) -> ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
}

/// Format a date as `dd-mm-yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Map a date into the continuous x-domain (days since 1970-01-01).
pub fn date_to_num(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
}

/// Map an x-domain position back to a date, truncating to midnight.
///
/// Returns `None` for non-finite or out-of-range positions.
pub fn num_to_date(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() {
        return None;
    }
    let days = i32::try_from(x.floor() as i64).ok()?;
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}

/// A labelled, dated series with strictly increasing dates.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    /// Render color name, e.g. `"brown"` or `"#a52a2a"`.
    pub color: String,
    pub points: Vec<Point>,
}

impl Series {
    /// First date carrying a value.
    pub fn first_valid(&self) -> Option<NaiveDate> {
        self.points.iter().find(|(_, v)| v.is_some()).map(|(d, _)| *d)
    }

    /// Last date carrying a value.
    pub fn last_valid(&self) -> Option<NaiveDate> {
        self.points.iter().rev().find(|(_, v)| v.is_some()).map(|(d, _)| *d)
    }

    /// Value recorded exactly at `date`, if any.
    pub fn value_at(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |(d, _)| *d)
            .ok()
            .and_then(|i| self.points[i].1)
    }

    pub fn valid_count(&self) -> usize {
        self.points.iter().filter(|(_, v)| v.is_some()).count()
    }
}

/// Dates × series grid of optional values.
///
/// Used for both the aligned matrix and the normalized matrix; the rebasing
/// engine accepts either.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueMatrix {
    /// Row keys, strictly increasing.
    pub dates: Vec<NaiveDate>,
    /// Column keys in legend order.
    pub labels: Vec<String>,
    /// One column per label, each `dates.len()` long.
    pub columns: Vec<Vec<Option<f64>>>,
}

impl ValueMatrix {
    pub fn row_index(&self, date: NaiveDate) -> Option<usize> {
        self.dates.binary_search(&date).ok()
    }

    pub fn row(&self, index: usize) -> Vec<Option<f64>> {
        self.columns.iter().map(|c| c[index]).collect()
    }

    pub fn column(&self, label: &str) -> Option<&[Option<f64>]> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.columns[i].as_slice())
    }

    pub fn value(&self, series: usize, date: NaiveDate) -> Option<f64> {
        let row = self.row_index(date)?;
        self.columns.get(series)?.get(row).copied().flatten()
    }

    /// Rows within the closed interval `[min, max]`.
    pub fn restrict(&self, min: NaiveDate, max: NaiveDate) -> ValueMatrix {
        let start = self.dates.partition_point(|d| *d < min);
        let end = self.dates.partition_point(|d| *d <= max).max(start);
        ValueMatrix {
            dates: self.dates[start..end].to_vec(),
            labels: self.labels.clone(),
            columns: self
                .columns
                .iter()
                .map(|c| c[start..end].to_vec())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
