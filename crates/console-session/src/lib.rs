//! Session state for the staffdesk client.
//!
//! Owns the authenticated identity (token, user id, username) and the cached
//! menu tree, plus the identity's durable persistence. No other component
//! writes the durable identity keys directly.

mod menu;
mod store;

pub use menu::MenuItem;
pub use store::{SessionError, SessionResult, SessionStore};
