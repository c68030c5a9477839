//! UI-facing events emitted by the HTTP client.
//!
//! The client never renders anything itself; it publishes events on a
//! broadcast channel and the UI shell decides how to show them.

use serde::Serialize;
use uuid::Uuid;

/// A non-blocking user notification.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    /// Stable id so a UI can dismiss a specific notice.
    pub id: Uuid,
    pub message: String,
    /// Minimum time the notice stays visible, in milliseconds.
    pub min_duration_ms: u64,
    /// Whether the user can dismiss the notice explicitly.
    pub dismissible: bool,
}

impl Notice {
    /// Create an error notice. Always dismissible.
    pub fn error(message: impl Into<String>, min_duration_ms: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            min_duration_ms,
            dismissible: true,
        }
    }
}

/// Events a UI/router collaborator subscribes to.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Show a notification.
    Notice(Notice),
    /// Navigate to the login screen. Emitted once after the session expires.
    RedirectToLogin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_notice_is_dismissible() {
        let notice = Notice::error("boom", 5_000);
        assert!(notice.dismissible);
        assert_eq!(notice.message, "boom");
        assert_eq!(notice.min_duration_ms, 5_000);
    }

    #[test]
    fn test_notice_ids_are_unique() {
        let a = Notice::error("one", 5_000);
        let b = Notice::error("two", 5_000);
        assert_ne!(a.id, b.id);
    }
}
