//! Rebasing: every series expressed relative to its value at the anchor date.

use chrono::NaiveDate;

use super::ViewError;
use crate::domain::ValueMatrix;

/// Value every valid series takes at the anchor.
pub const INDEX_BASE: f64 = 100.0;

/// A window of rebased values plus the anchor row.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMatrix {
    pub matrix: ValueMatrix,
    pub anchor: NaiveDate,
    /// `Some(100.0)` for each series valid at the anchor, `None` otherwise.
    pub anchor_row: Vec<Option<f64>>,
}

impl NormalizedMatrix {
    pub fn dates(&self) -> &[NaiveDate] {
        &self.matrix.dates
    }

    pub fn column(&self, series: usize) -> Option<&[Option<f64>]> {
        self.matrix.columns.get(series).map(Vec::as_slice)
    }
}

pub struct NormalizationEngine;

impl NormalizationEngine {
    /// Restrict `source` to `[min, max]` and divide each column by its value at `norm`.
    ///
    /// A series that is missing, zero, or non-finite at the anchor is missing
    /// throughout the result. `source` may itself be a normalized matrix.
    pub fn normalize(
        source: &ValueMatrix,
        min: NaiveDate,
        max: NaiveDate,
        norm: NaiveDate,
    ) -> Result<NormalizedMatrix, ViewError> {
        let mut matrix = source.restrict(min, max);
        let anchor_idx = matrix
            .row_index(norm)
            .ok_or(ViewError::AnchorNotInWindow { date: norm })?;

        let mut anchor_row = Vec::with_capacity(matrix.columns.len());
        for column in &mut matrix.columns {
            let base = column[anchor_idx].filter(|b| b.is_finite() && *b != 0.0);
            match base {
                Some(base) => {
                    for v in column.iter_mut() {
                        *v = v.map(|x| x / base * INDEX_BASE);
                    }
                    column[anchor_idx] = Some(INDEX_BASE);
                    anchor_row.push(Some(INDEX_BASE));
                }
                None => {
                    column.iter_mut().for_each(|v| *v = None);
                    anchor_row.push(None);
                }
            }
        }

        Ok(NormalizedMatrix {
            matrix,
            anchor: norm,
            anchor_row,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn aligned() -> ValueMatrix {
        ValueMatrix {
            dates: vec![
                d("2020-01-01"),
                d("2020-01-02"),
                d("2020-01-03"),
                d("2020-01-04"),
            ],
            labels: vec!["A".into(), "B".into(), "Z".into()],
            columns: vec![
                vec![Some(10.0), Some(20.0), Some(5.0), Some(40.0)],
                vec![None, None, Some(3.0), Some(6.0)],
                vec![Some(0.0), Some(0.0), Some(0.0), Some(1.0)],
            ],
        }
    }

    #[test]
    fn rebases_to_hundred_at_anchor() {
        let n =
            NormalizationEngine::normalize(&aligned(), d("2020-01-02"), d("2020-01-04"), d("2020-01-03"))
                .unwrap();
        assert_eq!(n.dates().len(), 3);
        assert_eq!(n.column(0).unwrap(), &[Some(400.0), Some(100.0), Some(800.0)]);
        assert_eq!(n.column(1).unwrap(), &[None, Some(100.0), Some(200.0)]);
        assert_eq!(n.anchor_row[0], Some(100.0));
    }

    #[test]
    fn missing_or_zero_anchor_blanks_the_series() {
        let n =
            NormalizationEngine::normalize(&aligned(), d("2020-01-01"), d("2020-01-04"), d("2020-01-01"))
                .unwrap();
        assert!(n.column(1).unwrap().iter().all(Option::is_none));
        assert!(n.column(2).unwrap().iter().all(Option::is_none));
        assert_eq!(n.anchor_row, vec![Some(100.0), None, None]);
    }

    #[test]
    fn anchor_outside_data_fails() {
        let err =
            NormalizationEngine::normalize(&aligned(), d("2020-01-01"), d("2020-01-04"), d("2020-02-01"))
                .unwrap_err();
        assert_eq!(err, ViewError::AnchorNotInWindow { date: d("2020-02-01") });
    }

    #[test]
    fn normalizing_a_normalized_matrix() {
        let first =
            NormalizationEngine::normalize(&aligned(), d("2020-01-01"), d("2020-01-04"), d("2020-01-01"))
                .unwrap();
        let second = NormalizationEngine::normalize(
            &first.matrix,
            d("2020-01-01"),
            d("2020-01-04"),
            d("2020-01-02"),
        )
        .unwrap();
        assert_eq!(second.column(0).unwrap()[1], Some(100.0));
        assert_eq!(second.column(0).unwrap()[3], Some(200.0));
    }
}
