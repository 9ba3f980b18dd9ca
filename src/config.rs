//! Runtime configuration, read from the environment (and `.env` via
//! `dotenvy`, loaded by the binary).
//!
//! | Variable | Default |
//! |---|---|
//! | `VAX_API_BASE_URL` | `https://localhost:44305` |
//! | `VAX_DASHBOARD_BASE_URL` | value of `VAX_API_BASE_URL` |
//! | `VAX_SESSION_FILE` | `.vax_session.json` |
//! | `VAX_FONT_DIR` | `./fonts` |
//! | `VAX_FONT_FAMILY` | `LiberationSans` |
//! | `VAX_PAGE_SIZE` | `5` |
//! | `VAX_UPCOMING_WINDOW_DAYS` | `30` |
//! | `VAX_HTTP_TIMEOUT_SECS` | `30` |
//! | `VAX_ACCEPT_INVALID_CERTS` | `false` |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::dashboard::DEFAULT_WINDOW_DAYS;
use crate::error::{ConsoleError, Result};
use crate::export::pdf::PdfFonts;
use crate::report::DEFAULT_PAGE_SIZE;

pub const DEFAULT_API_BASE_URL: &str = "https://localhost:44305";

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    pub dashboard_base_url: String,
    pub session_file: PathBuf,
    pub fonts: PdfFonts,
    pub page_size: usize,
    pub upcoming_window_days: i64,
    pub http_timeout: Duration,
    pub accept_invalid_certs: bool,
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConsoleError::Config(format!("{key} has invalid value `{raw}`"))),
    }
}

impl ConsoleConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_base_url =
            lookup("VAX_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let dashboard_base_url =
            lookup("VAX_DASHBOARD_BASE_URL").unwrap_or_else(|| api_base_url.clone());

        let page_size = parsed(&lookup, "VAX_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(ConsoleError::Config("VAX_PAGE_SIZE must be positive".into()));
        }

        Ok(Self {
            api_base_url,
            dashboard_base_url,
            session_file: lookup("VAX_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".vax_session.json")),
            fonts: PdfFonts {
                dir: lookup("VAX_FONT_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("./fonts")),
                family: lookup("VAX_FONT_FAMILY").unwrap_or_else(|| "LiberationSans".to_string()),
            },
            page_size,
            upcoming_window_days: parsed(&lookup, "VAX_UPCOMING_WINDOW_DAYS", DEFAULT_WINDOW_DAYS)?,
            http_timeout: Duration::from_secs(parsed(&lookup, "VAX_HTTP_TIMEOUT_SECS", 30)?),
            accept_invalid_certs: parsed(&lookup, "VAX_ACCEPT_INVALID_CERTS", false)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<ConsoleConfig> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ConsoleConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let c = config(&[]).unwrap();
        assert_eq!(c.api_base_url, "https://localhost:44305");
        assert_eq!(c.dashboard_base_url, c.api_base_url);
        assert_eq!(c.page_size, 5);
        assert_eq!(c.upcoming_window_days, 30);
        assert_eq!(c.http_timeout, Duration::from_secs(30));
        assert!(!c.accept_invalid_certs);
        assert_eq!(c.fonts.family, "LiberationSans");
    }

    #[test]
    fn test_dashboard_base_override() {
        let c = config(&[
            ("VAX_API_BASE_URL", "https://api.school"),
            ("VAX_DASHBOARD_BASE_URL", "https://dash.school"),
        ])
        .unwrap();
        assert_eq!(c.api_base_url, "https://api.school");
        assert_eq!(c.dashboard_base_url, "https://dash.school");
    }

    #[test]
    fn test_numeric_and_bool_values() {
        let c = config(&[
            ("VAX_PAGE_SIZE", "10"),
            ("VAX_UPCOMING_WINDOW_DAYS", "7"),
            ("VAX_ACCEPT_INVALID_CERTS", "true"),
        ])
        .unwrap();
        assert_eq!(c.page_size, 10);
        assert_eq!(c.upcoming_window_days, 7);
        assert!(c.accept_invalid_certs);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            config(&[("VAX_PAGE_SIZE", "lots")]),
            Err(ConsoleError::Config(_))
        ));
        assert!(matches!(
            config(&[("VAX_PAGE_SIZE", "0")]),
            Err(ConsoleError::Config(_))
        ));
    }
}
