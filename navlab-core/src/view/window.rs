//! The three controlling dates and their clamping rules.

use chrono::{Duration, NaiveDate};

use super::normalize::{NormalizationEngine, NormalizedMatrix};
use super::ViewError;
use crate::domain::{parse_date, ValueMatrix};

/// Which of the three date controls an input refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateControl {
    Anchor,
    Min,
    Max,
}

impl DateControl {
    pub const ALL: [DateControl; 3] = [DateControl::Anchor, DateControl::Min, DateControl::Max];

    pub fn name(self) -> &'static str {
        match self {
            DateControl::Anchor => "Normalization Date",
            DateControl::Min => "Minimum Display Date",
            DateControl::Max => "Maximum Display Date",
        }
    }

    pub fn next(self) -> Self {
        match self {
            DateControl::Anchor => DateControl::Min,
            DateControl::Min => DateControl::Max,
            DateControl::Max => DateControl::Anchor,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            DateControl::Anchor => DateControl::Max,
            DateControl::Min => DateControl::Anchor,
            DateControl::Max => DateControl::Min,
        }
    }
}

/// Visible range and normalization anchor.
///
/// Invariant: `first <= min <= norm <= max <= last` and `max >= min + 1 day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewWindow {
    pub min: NaiveDate,
    pub max: NaiveDate,
    pub norm: NaiveDate,
}

impl ViewWindow {
    pub fn get(&self, control: DateControl) -> NaiveDate {
        match control {
            DateControl::Anchor => self.norm,
            DateControl::Min => self.min,
            DateControl::Max => self.max,
        }
    }

    /// Copy with one control replaced (unclamped).
    pub fn with(mut self, control: DateControl, date: NaiveDate) -> Self {
        match control {
            DateControl::Anchor => self.norm = date,
            DateControl::Min => self.min = date,
            DateControl::Max => self.max = date,
        }
        self
    }

    /// Midpoint of the visible range.
    pub fn midpoint(&self) -> NaiveDate {
        self.min + Duration::days((self.max - self.min).num_days() / 2)
    }
}

/// Holds the committed window for a calendar `[first, last]`.
#[derive(Debug, Clone)]
pub struct ViewState {
    first: NaiveDate,
    last: NaiveDate,
    window: ViewWindow,
}

impl ViewState {
    /// Full range with the anchor at the first calendar date.
    pub fn new(first: NaiveDate, last: NaiveDate) -> Self {
        let mut state = Self {
            first,
            last,
            window: ViewWindow {
                min: first,
                max: last,
                norm: first,
            },
        };
        state.window = state.resolve(first, last, first);
        state
    }

    pub fn window(&self) -> ViewWindow {
        self.window
    }

    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        (self.first, self.last)
    }

    /// Apply the clamping rules without committing.
    ///
    /// Each date is first bounded by the calendar (min stops one day short of
    /// its end), then: (1) an anchor before min moves to min; (2) a max not
    /// after min moves to min + 1 day; (3) an anchor after max moves to max.
    pub fn resolve(&self, min: NaiveDate, max: NaiveDate, norm: NaiveDate) -> ViewWindow {
        let one_day = Duration::days(1);
        let min_cap = (self.last - one_day).max(self.first);
        let mut min = min.clamp(self.first, min_cap);
        let mut max = max.clamp(self.first, self.last);
        let mut norm = norm.clamp(self.first, self.last);

        if norm < min {
            norm = min;
        }
        if max <= min {
            max = min + one_day;
        }
        if norm > max {
            norm = max;
        }
        // Only reachable for a single-day calendar.
        if max > self.last {
            min = self.first;
            max = self.last;
            norm = norm.clamp(min, max);
        }
        ViewWindow { min, max, norm }
    }

    /// Resolve, renormalize from `aligned`, and commit on success.
    ///
    /// On `AnchorNotInWindow` the previous window stays in place.
    pub fn set_window(
        &mut self,
        min: NaiveDate,
        max: NaiveDate,
        norm: NaiveDate,
        aligned: &ValueMatrix,
    ) -> Result<NormalizedMatrix, ViewError> {
        let window = self.resolve(min, max, norm);
        let normalized = NormalizationEngine::normalize(aligned, window.min, window.max, window.norm)?;
        tracing::debug!(
            min = %window.min,
            max = %window.max,
            norm = %window.norm,
            "window committed"
        );
        self.window = window;
        Ok(normalized)
    }

    /// Parse three `dd-mm-yyyy` strings and apply them as one window change.
    ///
    /// Any unparseable field discards the whole submission.
    pub fn submit_explicit_dates(
        &mut self,
        min_text: &str,
        max_text: &str,
        norm_text: &str,
        aligned: &ValueMatrix,
    ) -> Result<NormalizedMatrix, ViewError> {
        let parse = |field: &'static str, input: &str| {
            parse_date(input).map_err(|_| ViewError::InvalidDate {
                field,
                input: input.to_string(),
            })
        };
        let min = parse("min", min_text)?;
        let max = parse("max", max_text)?;
        let norm = parse("normalization", norm_text)?;
        self.set_window(min, max, norm, aligned)
    }
}
