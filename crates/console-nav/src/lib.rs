//! Navigation guard for the staffdesk client.
//!
//! Evaluated before every route entry: unauthenticated navigation anywhere
//! but the login screen is redirected to the login screen. The guard derives
//! its state live from the session store and never mutates it.

use console_session::SessionStore;
use std::sync::Arc;
use tracing::debug;

/// Route of the login screen.
pub const LOGIN_ROUTE: &str = "/login";

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavDecision {
    /// Proceed to the requested route unchanged.
    Allow,
    /// Go to this route instead.
    Redirect(String),
}

/// Pre-route hook enforcing authentication-based access control.
pub struct NavigationGuard {
    session: Arc<SessionStore>,
}

impl NavigationGuard {
    /// Create a guard over the given session store.
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }

    /// Evaluate the transition rule for a target route.
    pub fn check(&self, target: &str) -> NavDecision {
        if target != LOGIN_ROUTE && !self.session.is_authenticated() {
            debug!(route = %target, "Unauthenticated navigation, redirecting to login");
            return NavDecision::Redirect(LOGIN_ROUTE.to_string());
        }
        NavDecision::Allow
    }

    /// The route actually entered for a requested target.
    pub fn resolve(&self, target: &str) -> String {
        match self.check(target) {
            NavDecision::Allow => target.to_string(),
            NavDecision::Redirect(route) => route,
        }
    }
}
