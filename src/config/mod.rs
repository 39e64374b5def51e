//! Configuration loading with precedence handling.
//!
//! Precedence (lowest to highest): hardcoded defaults → config file →
//! environment variables → CLI arguments.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default debounce quiet window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Default per-request deadline in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Default API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

// ===== ConfigError =====

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permissions, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

// ===== ConfigFile =====

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/reposcope/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Debounce quiet window in milliseconds.
    #[serde(default)]
    pub debounce_ms: Option<u64>,

    /// Per-request deadline in milliseconds.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,

    /// API base URL (override for testing or GitHub Enterprise hosts).
    #[serde(default)]
    pub api_base: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

// ===== ResolvedConfig =====

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Debounce quiet window in milliseconds.
    pub debounce_ms: u64,
    /// Per-request deadline in milliseconds.
    pub request_timeout_ms: u64,
    /// API base URL.
    pub api_base: String,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            api_base: DEFAULT_API_BASE.to_string(),
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Debounce window as a `Duration`.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Request deadline as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Resolve default log file path.
///
/// `~/.local/state/reposcope/reposcope.log` on Unix-like systems, the
/// platform equivalent elsewhere, current directory as a last resort.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("reposcope").join("reposcope.log")
    } else {
        PathBuf::from("reposcope.log")
    }
}

/// Resolve default config file path.
///
/// `~/.config/reposcope/config.toml` on Unix, the platform equivalent
/// elsewhere. `None` if no config directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("reposcope").join("config.toml"))
}

/// Load a configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist (not an error - defaults
/// are used). Returns `Err` only if the file exists but cannot be read or
/// parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `REPOSCOPE_CONFIG` environment variable
/// 3. Default path `~/.config/reposcope/config.toml`
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("REPOSCOPE_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge a config file into defaults to create the resolved config.
///
/// For each field in `ConfigFile`: if `Some(value)`, use it; otherwise the
/// default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        debounce_ms: config.debounce_ms.unwrap_or(defaults.debounce_ms),
        request_timeout_ms: config
            .request_timeout_ms
            .unwrap_or(defaults.request_timeout_ms),
        api_base: config.api_base.unwrap_or(defaults.api_base),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to the resolved config.
///
/// Checks `REPOSCOPE_API_BASE` and `REPOSCOPE_DEBOUNCE_MS` (a non-numeric
/// value is ignored rather than fatal).
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(api_base) = std::env::var("REPOSCOPE_API_BASE") {
        config.api_base = api_base;
    }
    if let Ok(debounce) = std::env::var("REPOSCOPE_DEBOUNCE_MS") {
        if let Ok(ms) = debounce.parse() {
            config.debounce_ms = ms;
        }
    }
    config
}

/// Apply CLI argument overrides to the resolved config.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    log_file: Option<PathBuf>,
    api_base: Option<String>,
) -> ResolvedConfig {
    if let Some(log_file) = log_file {
        config.log_file_path = log_file;
    }
    if let Some(api_base) = api_base {
        config.api_base = api_base;
    }
    config
}

// ===== Tests =====

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
