//! Ingest: provider records → sorted raw series points.

use chrono::NaiveDate;

use super::provider::NavRecord;
use super::store::StoreError;
use crate::domain::{parse_date, Point};

/// Parse records (in any order) into strictly increasing points.
///
/// A bad date, a non-numeric or non-finite value, or two records for the same
/// date make the whole series malformed.
pub fn ingest(label: &str, records: &[NavRecord]) -> Result<Vec<Point>, StoreError> {
    let malformed = |reason: String| StoreError::MalformedSeries {
        label: label.to_string(),
        reason,
    };

    let mut points: Vec<(NaiveDate, f64)> = Vec::with_capacity(records.len());
    for record in records {
        let date = parse_date(&record.date)
            .map_err(|e| malformed(format!("bad date '{}': {e}", record.date)))?;
        let nav: f64 = record
            .nav
            .trim()
            .parse()
            .map_err(|_| malformed(format!("bad value '{}' on {}", record.nav, record.date)))?;
        if !nav.is_finite() {
            return Err(malformed(format!("non-finite value on {}", record.date)));
        }
        points.push((date, nav));
    }

    // The source publishes newest first.
    points.sort_by_key(|(d, _)| *d);
    if let Some(w) = points.windows(2).find(|w| w[0].0 == w[1].0) {
        return Err(malformed(format!("duplicate date {}", w[0].0)));
    }

    Ok(points.into_iter().map(|(d, v)| (d, Some(v))).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(date: &str, nav: &str) -> NavRecord {
        NavRecord {
            date: date.into(),
            nav: nav.into(),
        }
    }

    #[test]
    fn sorts_newest_first_input() {
        let points = ingest(
            "A",
            &[rec("03-01-2020", "12.5"), rec("01-01-2020", "10.25")],
        )
        .unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].0, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(points[0].1, Some(10.25));
        assert_eq!(points[1].1, Some(12.5));
    }

    #[test]
    fn bad_date_is_malformed() {
        let err = ingest("A", &[rec("2020-01-03", "1.0")]).unwrap_err();
        assert!(matches!(err, StoreError::MalformedSeries { .. }));
    }

    #[test]
    fn bad_value_is_malformed() {
        assert!(ingest("A", &[rec("03-01-2020", "N.A.")]).is_err());
        assert!(ingest("A", &[rec("03-01-2020", "inf")]).is_err());
    }

    #[test]
    fn duplicate_date_is_malformed() {
        let err = ingest("A", &[rec("03-01-2020", "1"), rec("03-01-2020", "2")]).unwrap_err();
        assert!(err.to_string().contains("duplicate date"));
    }
}
