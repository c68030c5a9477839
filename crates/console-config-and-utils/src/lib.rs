//! Core types, configuration, and utilities for the staffdesk client.

mod config;
mod error;
mod logging;
mod paths;

pub use config::{
    Config, DEFAULT_API_BASE_URL, DEFAULT_DB_ERROR_FINGERPRINTS, DEFAULT_ENVELOPE_SUCCESS_CODE,
    DEFAULT_LOG_LEVEL, DEFAULT_MIGRATION_HINT, DEFAULT_NOTICE_MIN_DURATION_MS,
    DEFAULT_REDIRECT_DELAY_MS, DEFAULT_REQUEST_TIMEOUT_MS,
};
pub use error::{CoreError, CoreResult};
pub use logging::{init_logging, parse_level};
pub use paths::Paths;
