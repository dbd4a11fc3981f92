//! mfapi.in NAV provider.
//!
//! Fetches the complete NAV history of an Indian mutual fund scheme from
//! `https://api.mfapi.in/mf/<scheme_code>`. Connection failures and timeouts are
//! retried a few times with exponential backoff; any other failure is final and
//! the caller drops the instrument.

use super::provider::{parse_body, DataError, DataProvider, DataSource, FetchResult, NavRecord};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.mfapi.in";

/// mfapi.in data provider.
pub struct MfApiProvider {
    client: reqwest::blocking::Client,
    base_url: String,
    max_retries: u32,
    base_delay: Duration,
}

impl MfApiProvider {
    pub fn new(base_url: impl Into<String>) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("navlab/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DataError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_retries: 2,
            base_delay: Duration::from_millis(500),
        })
    }

    /// URL for an instrument. Identifiers that are already URLs are used verbatim.
    pub fn scheme_url(&self, identifier: &str) -> String {
        if identifier.starts_with("http://") || identifier.starts_with("https://") {
            identifier.to_string()
        } else {
            format!("{}/mf/{}", self.base_url, identifier.trim())
        }
    }

    /// Execute the request, retrying only transport-level failures.
    fn fetch_with_retry(&self, identifier: &str) -> Result<Vec<NavRecord>, DataError> {
        let url = self.scheme_url(identifier);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                tracing::debug!(identifier, attempt, ?delay, "retrying fetch");
                std::thread::sleep(delay);
            }

            match self.client.get(&url).send() {
                Ok(resp) => {
                    let status = resp.status();
                    if !status.is_success() {
                        return Err(DataError::HttpStatus {
                            identifier: identifier.to_string(),
                            status: status.as_u16(),
                        });
                    }
                    let body = resp
                        .text()
                        .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;
                    return parse_body(identifier, &body);
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                        continue;
                    }
                    return Err(DataError::NetworkUnreachable(e.to_string()));
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| DataError::NetworkUnreachable("max retries exceeded".into())))
    }
}

impl DataProvider for MfApiProvider {
    fn name(&self) -> &str {
        "mfapi"
    }

    fn fetch(&self, identifier: &str) -> Result<FetchResult, DataError> {
        let records = self.fetch_with_retry(identifier)?;
        Ok(FetchResult {
            identifier: identifier.to_string(),
            records,
            source: DataSource::MfApi,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_url_from_code_or_url() {
        let p = MfApiProvider::new("https://api.mfapi.in/").unwrap();
        assert_eq!(p.scheme_url("119364"), "https://api.mfapi.in/mf/119364");
        assert_eq!(
            p.scheme_url("https://example.org/mf/1"),
            "https://example.org/mf/1"
        );
    }
}
