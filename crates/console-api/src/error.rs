//! API error types.

use crate::classify::{ClassifiedError, ErrorCategory, ErrorPayload};
use thiserror::Error;

/// Error type for API calls.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Enveloped response with a non-success code (application-level failure)
    #[error("{message}")]
    Application { code: i64, message: String },

    /// Transport-level failure: non-2xx status, timeout, or network error.
    /// Carries the classified record for display plus the raw signals so
    /// callers keep full detail.
    #[error("{}", .classified.display_message)]
    Transport {
        classified: ClassifiedError,
        /// Error body the backend returned, if one could be parsed
        payload: Option<ErrorPayload>,
        /// Underlying transport error, when the failure never produced a response
        #[source]
        source: Option<reqwest::Error>,
    },

    /// HTTP client error (construction, invalid request)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response payload could not be deserialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Failure category, for call-site logic on transport failures.
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            ApiError::Transport { classified, .. } => Some(classified.category),
            _ => None,
        }
    }

    /// True for the application-level failure produced by a non-success envelope.
    pub fn is_application(&self) -> bool {
        matches!(self, ApiError::Application { .. })
    }
}

/// Result type alias using ApiError.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify, ClassifyRules};

    #[test]
    fn test_application_error_displays_message() {
        let err = ApiError::Application {
            code: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "boom");
        assert!(err.is_application());
        assert_eq!(err.category(), None);
    }

    #[test]
    fn test_transport_error_displays_classified_message() {
        let classified = classify(Some(403), None, "HTTP 403", &ClassifyRules::default());
        let err = ApiError::Transport {
            classified,
            payload: None,
            source: None,
        };
        assert_eq!(err.to_string(), "insufficient permission: HTTP 403");
        assert_eq!(err.category(), Some(ErrorCategory::PermissionDenied));
        assert!(!err.is_application());
    }
}
