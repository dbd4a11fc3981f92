//! Data ingestion, interpolation, and calendar alignment

pub mod align;
pub mod dataset;
pub mod download;
pub mod file;
pub mod ingest;
pub mod mfapi;
pub mod provider;
pub mod store;

pub use align::{AlignError, AlignedMatrix, CalendarAligner, UnionCalendar};
pub use dataset::{Dataset, DatasetError};
pub use download::{load_store, LoadSummary};
pub use file::JsonFileProvider;
pub use mfapi::MfApiProvider;
pub use provider::{DataError, DataProvider, DataSource, DownloadProgress, FetchResult, NavRecord};
pub use store::{InterpolatedSet, SeriesStore, StoreError};
