//! Shared fixtures for TUI unit tests.

use chrono::NaiveDate;

use navlab_core::config::ViewOptions;
use navlab_core::data::{Dataset, SeriesStore};

use crate::app::AppState;

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Two funds over 2020-01-01..=2020-01-31.
pub fn app() -> AppState {
    let mut store = SeriesStore::new();
    store
        .add_series(
            "Alpha",
            "brown",
            vec![(d("2020-01-01"), Some(10.0)), (d("2020-01-31"), Some(13.0))],
        )
        .unwrap();
    store
        .add_series(
            "Beta",
            "#ff0000",
            vec![(d("2020-01-01"), Some(50.0)), (d("2020-01-20"), Some(45.0))],
        )
        .unwrap();
    let dataset = Dataset::build(store).unwrap();
    AppState::new(dataset, &ViewOptions::default()).unwrap()
}
