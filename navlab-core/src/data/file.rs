//! Offline provider: reads saved scheme responses from a directory.
//!
//! The file for an instrument is `<dir>/<identifier>.json`; URL identifiers use
//! their last path segment (`https://api.mfapi.in/mf/119364` → `119364.json`).

use super::provider::{parse_body, DataError, DataProvider, DataSource, FetchResult};
use std::path::{Path, PathBuf};

pub struct JsonFileProvider {
    dir: PathBuf,
}

impl JsonFileProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, identifier: &str) -> PathBuf {
        let stem = identifier
            .trim()
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(identifier);
        self.dir.join(format!("{stem}.json"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DataProvider for JsonFileProvider {
    fn name(&self) -> &str {
        "json_file"
    }

    fn fetch(&self, identifier: &str) -> Result<FetchResult, DataError> {
        let path = self.path_for(identifier);
        let body = std::fs::read_to_string(&path).map_err(|e| DataError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(FetchResult {
            identifier: identifier.to_string(),
            records: parse_body(identifier, &body)?,
            source: DataSource::JsonFile,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_saved_response() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("42.json"),
            r#"{"data": [{"date": "01-01-2020", "nav": "10.0"}], "status": "SUCCESS"}"#,
        )
        .unwrap();

        let provider = JsonFileProvider::new(dir.path());
        let result = provider.fetch("https://api.mfapi.in/mf/42").unwrap();
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.source, DataSource::JsonFile);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let provider = JsonFileProvider::new(dir.path());
        assert!(matches!(provider.fetch("7"), Err(DataError::Io { .. })));
    }
}
