//! Configuration management for the client.

use crate::{CoreError, CoreResult, Paths};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Default API base URL (can be overridden at compile time via STAFFDESK_API_URL env var).
pub const DEFAULT_API_BASE_URL: &str = match option_env!("STAFFDESK_API_URL") {
    Some(url) => url,
    None => "http://localhost:8080/api",
};

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Fixed request timeout in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Envelope code the backend uses for success.
pub const DEFAULT_ENVELOPE_SUCCESS_CODE: i64 = 200;

/// Minimum time an error notice stays visible, in milliseconds.
pub const DEFAULT_NOTICE_MIN_DURATION_MS: u64 = 5_000;

/// Delay before the login redirect fires after the session expired, in milliseconds.
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 1_500;

/// Backend message substrings that mark a failure as a database error.
pub const DEFAULT_DB_ERROR_FINGERPRINTS: [&str; 2] = ["Unknown column", "SQLSyntaxErrorException"];

/// Troubleshooting hint appended when a database error is detected.
pub const DEFAULT_MIGRATION_HINT: &str =
    "hint: a database migration script may need to be applied";

/// Main client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Base URL every API request is prefixed with.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Envelope code treated as success.
    #[serde(default = "default_envelope_success_code")]
    pub envelope_success_code: i64,
    /// Minimum visible duration for error notices, in milliseconds.
    #[serde(default = "default_notice_min_duration_ms")]
    pub notice_min_duration_ms: u64,
    /// Delay before the scheduled login redirect, in milliseconds.
    #[serde(default = "default_redirect_delay_ms")]
    pub redirect_delay_ms: u64,
    /// Message substrings that mark a backend failure as a database error.
    #[serde(default = "default_db_error_fingerprints")]
    pub db_error_fingerprints: Vec<String>,
    /// Hint appended to database-error notices.
    #[serde(default = "default_migration_hint")]
    pub migration_hint: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

fn default_envelope_success_code() -> i64 {
    DEFAULT_ENVELOPE_SUCCESS_CODE
}

fn default_notice_min_duration_ms() -> u64 {
    DEFAULT_NOTICE_MIN_DURATION_MS
}

fn default_redirect_delay_ms() -> u64 {
    DEFAULT_REDIRECT_DELAY_MS
}

fn default_db_error_fingerprints() -> Vec<String> {
    DEFAULT_DB_ERROR_FINGERPRINTS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_migration_hint() -> String {
    DEFAULT_MIGRATION_HINT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            api_base_url: default_api_base_url(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            envelope_success_code: DEFAULT_ENVELOPE_SUCCESS_CODE,
            notice_min_duration_ms: DEFAULT_NOTICE_MIN_DURATION_MS,
            redirect_delay_ms: DEFAULT_REDIRECT_DELAY_MS,
            db_error_fingerprints: default_db_error_fingerprints(),
            migration_hint: default_migration_hint(),
        }
    }
}

impl Config {
    /// Create a new Config with default values, then override from environment.
    pub fn new() -> Self {
        let mut config = Self::default();
        config.load_from_env();
        config
    }

    /// Load configuration from the config file, falling back to defaults.
    /// Note: api_base_url defaults are compile-time (STAFFDESK_API_URL at
    /// build) but deployments may still override them in the config file.
    pub fn load(paths: &Paths) -> CoreResult<Self> {
        let config_path = paths.config_file();

        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            Self::default()
        };

        // Environment variables can only override log_level
        config.load_from_env();

        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, paths: &Paths) -> CoreResult<()> {
        paths.ensure_dirs()?;
        let config_path = paths.config_file();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Override configuration from environment variables.
    fn load_from_env(&mut self) {
        if let Ok(log_level) = std::env::var("STAFFDESK_LOG_LEVEL") {
            self.log_level = log_level;
        }
    }

    /// Get the API base URL as a parsed URL.
    pub fn api_base_url(&self) -> CoreResult<Url> {
        Url::parse(&self.api_base_url).map_err(CoreError::from)
    }
}
