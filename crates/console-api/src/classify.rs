//! Pure classification of transport failures.

use console_config_and_utils::{Config, DEFAULT_DB_ERROR_FINGERPRINTS, DEFAULT_MIGRATION_HINT};
use serde::{Deserialize, Serialize};

/// Failure categories surfaced to callers and the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// 401: the session is no longer valid.
    AuthExpired,
    /// 403: the caller lacks permission.
    PermissionDenied,
    /// 500: the backend failed.
    ServerError,
    /// 400: the request was malformed.
    BadRequest,
    /// Any other status, or no response at all.
    Unclassified,
}

/// Error body the backend attaches to non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

/// Normalized failure record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub category: ErrorCategory,
    /// Human-readable message shown in the UI notice.
    pub display_message: String,
    /// HTTP status, absent for pure network failures.
    pub original_status: Option<u16>,
    /// Source message before templating.
    pub original_message: String,
}

/// Database-error detection tunables.
///
/// Deployments adjust these via the config file without touching
/// classification logic.
#[derive(Debug, Clone)]
pub struct ClassifyRules {
    pub db_error_fingerprints: Vec<String>,
    pub migration_hint: String,
}

impl Default for ClassifyRules {
    fn default() -> Self {
        Self {
            db_error_fingerprints: DEFAULT_DB_ERROR_FINGERPRINTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            migration_hint: DEFAULT_MIGRATION_HINT.to_string(),
        }
    }
}

impl From<&Config> for ClassifyRules {
    fn from(config: &Config) -> Self {
        Self {
            db_error_fingerprints: config.db_error_fingerprints.clone(),
            migration_hint: config.migration_hint.clone(),
        }
    }
}

/// Map a failure signal to a category and display message.
///
/// Pure and deterministic; no state, no side effects. Source-message
/// precedence: payload `message`, else payload `error`, else the transport
/// error's own message. Empty strings count as absent.
pub fn classify(
    status: Option<u16>,
    payload: Option<&ErrorPayload>,
    transport_message: &str,
    rules: &ClassifyRules,
) -> ClassifiedError {
    let source_message = payload
        .and_then(|p| {
            p.message
                .clone()
                .filter(|m| !m.is_empty())
                .or_else(|| p.error.clone().filter(|e| !e.is_empty()))
        })
        .unwrap_or_else(|| transport_message.to_string());
    let details = payload
        .and_then(|p| p.details.clone())
        .filter(|d| !d.is_empty());

    let (category, mut display_message) = match status {
        Some(401) => (
            ErrorCategory::AuthExpired,
            "session expired, please log in again".to_string(),
        ),
        Some(403) => (
            ErrorCategory::PermissionDenied,
            format!("insufficient permission: {}", source_message),
        ),
        Some(500) => (
            ErrorCategory::ServerError,
            format!("server error: {}", source_message),
        ),
        Some(400) => (
            ErrorCategory::BadRequest,
            format!("request error: {}", source_message),
        ),
        other => {
            let shown = match other {
                Some(status) => status.to_string(),
                None => "network error".to_string(),
            };
            (
                ErrorCategory::Unclassified,
                format!("request failed ({}): {}", shown, source_message),
            )
        }
    };

    if category == ErrorCategory::ServerError {
        if let Some(details) = &details {
            display_message.push('\n');
            display_message.push_str("details: ");
            display_message.push_str(details);
        }
        if rules
            .db_error_fingerprints
            .iter()
            .any(|f| source_message.contains(f.as_str()))
        {
            display_message.push('\n');
            display_message.push_str(&rules.migration_hint);
        }
    }

    ClassifiedError {
        category,
        display_message,
        original_status: status,
        original_message: source_message,
    }
}
