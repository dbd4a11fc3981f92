//! Load orchestrator — fetches every configured instrument into a SeriesStore
//! with progress reporting.

use super::ingest;
use super::provider::{DataProvider, DownloadProgress};
use super::store::{SeriesStore, StoreError};
use crate::config::InstrumentConfig;

/// Fetch and ingest every instrument, in configuration order.
///
/// An instrument that fails to fetch or parse is dropped with a warning; the
/// rest keep their relative order. Fails with `StoreError::Empty` only when
/// nothing could be loaded.
pub fn load_store(
    provider: &dyn DataProvider,
    instruments: &[InstrumentConfig],
    progress: &dyn DownloadProgress,
) -> Result<(SeriesStore, LoadSummary), StoreError> {
    let total = instruments.len();
    let mut store = SeriesStore::new();
    let mut failures: Vec<(String, String)> = Vec::new();

    for (i, instrument) in instruments.iter().enumerate() {
        progress.on_start(&instrument.label, i, total);

        let result = load_single(provider, &mut store, instrument);
        progress.on_complete(&instrument.label, i, total, &result);

        if let Err(reason) = result {
            tracing::warn!(
                label = %instrument.label,
                source = %instrument.source,
                provider = provider.name(),
                %reason,
                "dropping instrument"
            );
            failures.push((instrument.label.clone(), reason));
        }
    }

    let summary = LoadSummary {
        total,
        succeeded: store.len(),
        failures,
    };
    progress.on_batch_complete(summary.succeeded, summary.failures.len(), total);

    if store.is_empty() {
        return Err(StoreError::Empty);
    }
    tracing::info!(
        loaded = summary.succeeded,
        dropped = summary.failures.len(),
        "instrument load finished"
    );
    Ok((store, summary))
}

/// Load one instrument: fetch → ingest → store.
fn load_single(
    provider: &dyn DataProvider,
    store: &mut SeriesStore,
    instrument: &InstrumentConfig,
) -> Result<(), String> {
    let fetched = provider
        .fetch(&instrument.source)
        .map_err(|e| e.to_string())?;
    let points = ingest::ingest(&instrument.label, &fetched.records).map_err(|e| e.to_string())?;
    store
        .add_series(&instrument.label, &instrument.color, points)
        .map_err(|e| e.to_string())
}

/// Summary of a batch load.
#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    pub total: usize,
    pub succeeded: usize,
    /// (label, reason) for every dropped instrument.
    pub failures: Vec<(String, String)>,
}

impl LoadSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}
