//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over NAV sources (the mfapi.in web service,
//! a directory of saved responses) so we can swap implementations and mock for tests.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One record as published by the source: a `dd-mm-yyyy` date and a decimal string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavRecord {
    pub date: String,
    pub nav: String,
}

/// Response body of a scheme request.
#[derive(Debug, Deserialize)]
struct SchemeResponse {
    #[serde(default)]
    meta: serde_json::Value,
    data: Option<Vec<NavRecord>>,
    #[serde(default)]
    status: Option<String>,
}

/// Structured error types for fetching one instrument.
///
/// These are designed to be displayable in both CLI and TUI contexts. Every
/// variant is a fetch failure: the instrument is dropped and loading continues.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} for '{identifier}'")]
    HttpStatus { identifier: String, status: u16 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("no NAV records for '{identifier}'")]
    NotFound { identifier: String },

    #[error("could not read '{path}': {reason}")]
    Io { path: String, reason: String },

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

/// Result of a successful fetch for a single instrument.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub identifier: String,
    pub records: Vec<NavRecord>,
    pub source: DataSource,
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    MfApi,
    JsonFile,
}

/// Trait for NAV providers.
///
/// Implementations return the raw records for one instrument; parsing and
/// validation happen in the ingest step above this trait.
pub trait DataProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch every published record for an instrument.
    fn fetch(&self, identifier: &str) -> Result<FetchResult, DataError>;
}

/// Parse a scheme response body into records.
pub(crate) fn parse_body(identifier: &str, body: &str) -> Result<Vec<NavRecord>, DataError> {
    let resp: SchemeResponse = serde_json::from_str(body).map_err(|e| {
        DataError::ResponseFormatChanged(format!("failed to parse response for {identifier}: {e}"))
    })?;

    if let Some(status) = resp.status.as_deref() {
        if !status.eq_ignore_ascii_case("success") {
            return Err(DataError::ResponseFormatChanged(format!(
                "status '{status}' for {identifier}"
            )));
        }
    }

    match resp.data {
        Some(records) if !records.is_empty() => {
            tracing::debug!(
                identifier,
                records = records.len(),
                scheme = resp.meta.get("scheme_name").and_then(|v| v.as_str()).unwrap_or("?"),
                "parsed scheme response"
            );
            Ok(records)
        }
        _ => Err(DataError::NotFound {
            identifier: identifier.to_string(),
        }),
    }
}

/// Progress callback for multi-instrument loads.
pub trait DownloadProgress {
    /// Called when starting to fetch an instrument.
    fn on_start(&self, label: &str, index: usize, total: usize);

    /// Called when an instrument has been fetched and ingested (or dropped).
    fn on_complete(&self, label: &str, index: usize, total: usize, result: &Result<(), String>);

    /// Called when the entire batch is done.
    fn on_batch_complete(&self, succeeded: usize, failed: usize, total: usize);
}

/// Simple progress reporter that prints to stdout.
pub struct StdoutProgress;

impl DownloadProgress for StdoutProgress {
    fn on_start(&self, label: &str, index: usize, total: usize) {
        println!("[{}/{}] Fetching {label}...", index + 1, total);
    }

    fn on_complete(&self, label: &str, _index: usize, _total: usize, result: &Result<(), String>) {
        match result {
            Ok(()) => println!("  OK: {label}"),
            Err(e) => println!("  FAIL: {label}: {e}"),
        }
    }

    fn on_batch_complete(&self, succeeded: usize, failed: usize, total: usize) {
        println!("\nLoad complete: {succeeded}/{total} succeeded, {failed} failed");
    }
}
