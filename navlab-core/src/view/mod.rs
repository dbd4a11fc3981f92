//! View engine: the controlling dates, rebasing, probing, markers, and the
//! presentation toggles that never touch data.

pub mod legend;
pub mod marker;
pub mod normalize;
pub mod probe;
pub mod scale;
pub mod window;

use chrono::NaiveDate;
use thiserror::Error;

pub use legend::VisibilityState;
pub use marker::{DragState, Marker, MultiMarker, MARKER_PALETTE};
pub use normalize::{NormalizationEngine, NormalizedMatrix, INDEX_BASE};
pub use probe::{CursorProbe, LineData, ProbeError, Sample};
pub use scale::{ScaleMode, YScale};
pub use window::{DateControl, ViewState, ViewWindow};

/// Errors raised by view-state operations. None of them is fatal: the caller
/// keeps the previous state and reports the message.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ViewError {
    #[error("no data at {date}")]
    AnchorNotInWindow { date: NaiveDate },

    #[error("invalid {field} date '{input}', expected dd-mm-yyyy")]
    InvalidDate { field: &'static str, input: String },

    #[error("unknown series '{label}'")]
    UnknownSeries { label: String },
}
