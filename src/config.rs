//! Run configuration read from `SCOUT_*` environment variables.

use crate::error::ScrapeError;
use crate::scrapers::types::ScrapeSettings;
use std::str::FromStr;
use std::time::Duration;

/// Which page source drives the scrape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    /// Headless Chrome, for directories that render results with scripts
    Chrome,
    /// Plain HTTP fetch of server-rendered HTML
    Http,
}

impl FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chrome" => Ok(Engine::Chrome),
            "http" => Ok(Engine::Http),
            other => Err(format!("unknown engine \"{other}\" (expected chrome or http)")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub engine: Engine,
    pub user_agent: String,
    pub settings: ScrapeSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ScrapeError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScrapeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ScrapeSettings::default();
        let secs = |key: &str, default: Duration| -> Result<Duration, ScrapeError> {
            parse_or(&lookup, key, default.as_secs()).map(Duration::from_secs)
        };

        let settings = ScrapeSettings {
            max_pages: parse_or(&lookup, "SCOUT_MAX_PAGES", defaults.max_pages)?,
            page_timeout: secs("SCOUT_PAGE_TIMEOUT_SECS", defaults.page_timeout)?,
            marker_timeout: secs("SCOUT_MARKER_TIMEOUT_SECS", defaults.marker_timeout)?,
            detail_timeout: secs("SCOUT_DETAIL_TIMEOUT_SECS", defaults.detail_timeout)?,
            detail_settle: secs("SCOUT_SETTLE_SECS", defaults.detail_settle)?,
            ..defaults
        };

        Ok(Self {
            engine: parse_or(&lookup, "SCOUT_ENGINE", Engine::Chrome)?,
            user_agent: lookup("SCOUT_USER_AGENT").unwrap_or_else(|| "Mozilla/5.0".to_string()),
            settings,
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ScrapeError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ScrapeError::Config {
            key: key.to_string(),
            reason: e.to_string(),
        }),
    }
}
