//! TOML configuration: the instrument list and view options.
//!
//! ```toml
//! [constants]
//! urls   = ["https://api.mfapi.in/mf/119364", "145454"]
//! labels = ["BoI Mfg & Infra", "DSP Healthcare"]
//! colors = ["brown", "red"]
//!
//! [view]
//! log_ticks = [10, 20, 50, 100, 200, 500, 1000]
//! marker_hit_radius = 1.5
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_LOG_TICKS: [f64; 7] = [10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1000.0];
pub const DEFAULT_MARKER_HIT_RADIUS: f64 = 1.5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("urls, labels and colors must have equal length (got {urls}, {labels}, {colors})")]
    LengthMismatch {
        urls: usize,
        labels: usize,
        colors: usize,
    },

    #[error("config lists no instruments")]
    Empty,

    #[error("log_ticks must be positive, finite, and strictly increasing")]
    InvalidTicks,
}

/// File layout as written by users.
#[derive(Debug, Deserialize)]
struct RawConfig {
    constants: Constants,
    #[serde(default)]
    view: ViewOptions,
}

#[derive(Debug, Deserialize)]
struct Constants {
    urls: Vec<String>,
    labels: Vec<String>,
    colors: Vec<String>,
}

/// One instrument: where to fetch it, what to call it, how to draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    /// Scheme code or full URL.
    pub source: String,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    /// Fixed tick values for the logarithmic y-scale.
    pub log_ticks: Vec<f64>,
    /// Marker hit radius, in terminal columns.
    pub marker_hit_radius: f64,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            log_ticks: DEFAULT_LOG_TICKS.to_vec(),
            marker_hit_radius: DEFAULT_MARKER_HIT_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub instruments: Vec<InstrumentConfig>,
    pub view: ViewOptions,
}

/// Read and validate a config file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&text)
}

/// Parse and validate config text.
pub fn parse_config(text: &str) -> Result<AppConfig, ConfigError> {
    let raw: RawConfig = toml::from_str(text)?;
    let Constants {
        urls,
        labels,
        colors,
    } = raw.constants;

    if urls.len() != labels.len() || urls.len() != colors.len() {
        return Err(ConfigError::LengthMismatch {
            urls: urls.len(),
            labels: labels.len(),
            colors: colors.len(),
        });
    }
    if urls.is_empty() {
        return Err(ConfigError::Empty);
    }

    let ticks = &raw.view.log_ticks;
    let ticks_ok = !ticks.is_empty()
        && ticks.iter().all(|t| t.is_finite() && *t > 0.0)
        && ticks.windows(2).all(|w| w[0] < w[1]);
    if !ticks_ok {
        return Err(ConfigError::InvalidTicks);
    }

    let instruments = urls
        .into_iter()
        .zip(labels)
        .zip(colors)
        .map(|((source, label), color)| InstrumentConfig {
            source,
            label,
            color,
        })
        .collect();

    Ok(AppConfig {
        instruments,
        view: raw.view,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_constants_with_default_view() {
        let cfg = parse_config(
            r#"
            [constants]
            urls = ["https://api.mfapi.in/mf/119364", "145454"]
            labels = ["BoI", "DSP"]
            colors = ["brown", "red"]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.instruments.len(), 2);
        assert_eq!(cfg.instruments[1].source, "145454");
        assert_eq!(cfg.instruments[0].color, "brown");
        assert_eq!(cfg.view, ViewOptions::default());
    }

    #[test]
    fn view_overrides() {
        let cfg = parse_config(
            r#"
            [constants]
            urls = ["1"]
            labels = ["A"]
            colors = ["blue"]
            [view]
            log_ticks = [50, 100, 150]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.view.log_ticks, vec![50.0, 100.0, 150.0]);
        assert_eq!(cfg.view.marker_hit_radius, DEFAULT_MARKER_HIT_RADIUS);
    }

    #[test]
    fn mismatched_lengths_fail() {
        let err = parse_config(
            r#"
            [constants]
            urls = ["1", "2"]
            labels = ["A"]
            colors = ["blue", "red"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::LengthMismatch {
                urls: 2,
                labels: 1,
                colors: 2
            }
        ));
    }

    #[test]
    fn empty_and_bad_ticks_fail() {
        let empty = "[constants]\nurls = []\nlabels = []\ncolors = []\n";
        assert!(matches!(parse_config(empty), Err(ConfigError::Empty)));

        let bad = "[constants]\nurls = [\"1\"]\nlabels = [\"A\"]\ncolors = [\"red\"]\n[view]\nlog_ticks = [100, 10]\n";
        assert!(matches!(parse_config(bad), Err(ConfigError::InvalidTicks)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
