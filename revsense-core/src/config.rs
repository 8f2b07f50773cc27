//! Configuration for revsense.
//!
//! Read from `$XDG_CONFIG_HOME/revsense/config.toml` (falling back to
//! `~/.config/revsense/config.toml`). Every key is optional:
//!
//! ```toml
//! theme = "dark"
//!
//! [api]
//! base_url = "http://localhost:8000"
//! request_timeout_secs = 30
//!
//! [analysis]
//! analyze_on_edit = false
//!
//! [tickets]
//! latency_ms = 1500
//!
//! [log]
//! file = "/tmp/revsense.log"
//! ```
//!
//! The service base address resolves in this order: `REVSENSE_API_BASE_URL`
//! at run time, `[api] base_url`, `REVSENSE_API_BASE_URL` at build time, the
//! public default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable overriding the analysis service base address.
pub const BASE_URL_ENV: &str = "REVSENSE_API_BASE_URL";

const PUBLIC_BASE_URL: &str = "https://sentiment-analysis-h2h5.onrender.com";

/// Base address baked in at build time, or the public service.
pub fn default_base_url() -> String {
    option_env!("REVSENSE_API_BASE_URL")
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(PUBLIC_BASE_URL)
        .to_owned()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: String,
    pub api: ApiConfig,
    pub analysis: AnalysisConfig,
    pub tickets: TicketConfig,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "catppuccin-mocha".to_owned(),
            api: ApiConfig::default(),
            analysis: AnalysisConfig::default(),
            tickets: TicketConfig::default(),
            log: LogConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Whole-request timeout. Unset or `0` means the transport default (none).
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Start an analysis after every edit of the review text.
    pub analyze_on_edit: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TicketConfig {
    /// Latency of the simulated ticketing system.
    pub latency_ms: u64,
}

impl Default for TicketConfig {
    fn default() -> Self {
        Self { latency_ms: 1500 }
    }
}

impl TicketConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub file: Option<PathBuf>,
}

impl Config {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(raw)?;
        config.api.base_url = normalize_base_url(&config.api.base_url);
        Ok(config)
    }

    /// Loads the config at `path`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` for unreadable files and `ConfigError::Parse`
    /// for malformed TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_toml_str(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// Applies environment overrides using `lookup` (normally `std::env::var`).
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = normalize_base_url(&url);
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_owned()
}

/// Returns `<dir>/revsense/<file>` under the XDG directory `xdg_var`,
/// falling back to `~/<home_fallback>` and finally to `./<home_fallback>`.
fn xdg_path(xdg_var: &str, home_fallback: &str, file: &str) -> PathBuf {
    let base = std::env::var(xdg_var)
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(home_fallback)))
        .unwrap_or_else(|| PathBuf::from(home_fallback));
    base.join("revsense").join(file)
}

pub fn config_path() -> PathBuf {
    xdg_path("XDG_CONFIG_HOME", ".config", "config.toml")
}

/// Default log file location when `[log] file` is not set.
pub fn default_log_path() -> PathBuf {
    xdg_path("XDG_STATE_HOME", ".local/state", "revsense.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.tickets.latency(), Duration::from_millis(1500));
        assert!(config.api.request_timeout().is_none());
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config = Config::from_toml_str(
            "theme = \"dark\"\n[api]\nbase_url = \"http://localhost:8000/\"\n",
        )
        .unwrap();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert!(!config.analysis.analyze_on_edit);
    }

    #[test]
    fn env_override_beats_file() {
        let mut config =
            Config::from_toml_str("[api]\nbase_url = \"http://file.example\"\n").unwrap();
        config.apply_env(|key| {
            (key == BASE_URL_ENV).then(|| "http://env.example/".to_owned())
        });
        assert_eq!(config.api.base_url, "http://env.example");
    }

    #[test]
    fn blank_env_override_is_ignored() {
        let mut config = Config::default();
        let before = config.api.base_url.clone();
        config.apply_env(|_| Some("   ".to_owned()));
        assert_eq!(config.api.base_url, before);
    }

    #[test]
    fn zero_timeout_means_no_timeout() {
        let config = Config::from_toml_str("[api]\nrequest_timeout_secs = 0\n").unwrap();
        assert_eq!(config.api.request_timeout(), None);

        let config = Config::from_toml_str("[api]\nrequest_timeout_secs = 30\n").unwrap();
        assert_eq!(config.api.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Config::from_toml_str("theme = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
