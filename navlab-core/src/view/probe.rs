//! Pointer → sample lookup on a displayed line.

use chrono::NaiveDate;
use thiserror::Error;

use super::normalize::NormalizedMatrix;
use crate::domain::{date_to_num, num_to_date};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProbeError {
    #[error("no valid sample at or before {date}")]
    NoValidSample { date: NaiveDate },

    #[error("line has no samples")]
    EmptyLine,
}

/// One rendered line in the numeric x-domain. `xs` is strictly increasing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineData {
    pub xs: Vec<f64>,
    pub ys: Vec<Option<f64>>,
}

impl LineData {
    /// Every series of a normalized matrix, in column order.
    pub fn from_normalized(normalized: &NormalizedMatrix) -> Vec<LineData> {
        let xs: Vec<f64> = normalized.dates().iter().map(|d| date_to_num(*d)).collect();
        normalized
            .matrix
            .columns
            .iter()
            .map(|ys| LineData {
                xs: xs.clone(),
                ys: ys.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Finite y-range of the line.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        self.ys.iter().flatten().copied().fold(None, |acc, y| match acc {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        })
    }
}

/// The sample the probe settled on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub index: usize,
    pub x: f64,
    pub date: NaiveDate,
    pub value: f64,
}

pub struct CursorProbe;

impl CursorProbe {
    /// Nearest x to `pointer_x` (ties go to the earlier sample), then the most
    /// recent valid y at or before it.
    pub fn locate(line: &LineData, pointer_x: f64) -> Result<Sample, ProbeError> {
        if line.is_empty() {
            return Err(ProbeError::EmptyLine);
        }

        let right = line.xs.partition_point(|x| *x < pointer_x);
        let nearest = if right == 0 {
            0
        } else if right == line.xs.len() {
            right - 1
        } else {
            let left = right - 1;
            if (pointer_x - line.xs[left]).abs() <= (line.xs[right] - pointer_x).abs() {
                left
            } else {
                right
            }
        };

        let found = line.ys[..=nearest]
            .iter()
            .rposition(Option::is_some)
            .and_then(|i| line.ys[i].map(|v| (i, v)));

        match found {
            Some((index, value)) => {
                let x = line.xs[index];
                Ok(Sample {
                    index,
                    x,
                    date: num_to_date(x).ok_or(ProbeError::EmptyLine)?,
                    value,
                })
            }
            None => Err(ProbeError::NoValidSample {
                date: num_to_date(line.xs[nearest]).ok_or(ProbeError::EmptyLine)?,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn line(values: &[Option<f64>]) -> LineData {
        let start = date_to_num(d("2020-01-01"));
        LineData {
            xs: (0..values.len()).map(|i| start + i as f64).collect(),
            ys: values.to_vec(),
        }
    }

    #[test]
    fn nearest_with_tie_to_earlier() {
        let l = line(&[Some(1.0), Some(2.0), Some(3.0)]);
        let x0 = l.xs[0];
        assert_eq!(CursorProbe::locate(&l, x0 + 0.5).unwrap().index, 0);
        assert_eq!(CursorProbe::locate(&l, x0 + 0.51).unwrap().index, 1);
        assert_eq!(CursorProbe::locate(&l, x0 - 10.0).unwrap().index, 0);
        assert_eq!(CursorProbe::locate(&l, x0 + 99.0).unwrap().index, 2);
    }

    #[test]
    fn carries_back_over_missing() {
        let l = line(&[Some(1.0), Some(2.0), None, None]);
        let s = CursorProbe::locate(&l, l.xs[3]).unwrap();
        assert_eq!(s.index, 1);
        assert_eq!(s.value, 2.0);
        assert_eq!(s.date, d("2020-01-02"));
    }

    #[test]
    fn nothing_at_or_before_is_an_error() {
        let l = line(&[None, None, Some(3.0)]);
        assert_eq!(
            CursorProbe::locate(&l, l.xs[1]),
            Err(ProbeError::NoValidSample {
                date: d("2020-01-02")
            })
        );
        assert_eq!(
            CursorProbe::locate(&LineData::default(), 0.0),
            Err(ProbeError::EmptyLine)
        );
    }

    #[test]
    fn y_range_skips_missing() {
        let l = line(&[None, Some(90.0), Some(130.0)]);
        assert_eq!(l.y_range(), Some((90.0, 130.0)));
    }
}
