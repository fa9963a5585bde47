use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("timed out after {timeout:?} waiting for {what}")]
    Timeout { what: String, timeout: Duration },

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("missing {field} in listing card")]
    Extraction { field: &'static str },

    #[error("invalid selector \"{selector}\": {reason}")]
    Selector { selector: String, reason: String },

    #[error("invalid URL \"{url}\": {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("page source could not be started: {0}")]
    Setup(String),

    #[error("invalid configuration value for {key}: {reason}")]
    Config { key: String, reason: String },

    #[error("failed to write {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV encoding error: {0}")]
    Csv(#[from] csv::Error),
}

impl ScrapeError {
    /// Timeouts and navigation failures mean "no data here", never a fatal run error.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            ScrapeError::Timeout { .. } | ScrapeError::Navigation { .. }
        )
    }
}
