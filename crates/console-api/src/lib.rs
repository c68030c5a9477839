//! Backend API access for the staffdesk client.
//!
//! Wraps the HTTP transport, applies outbound authentication from the session
//! store, normalizes enveloped and legacy response bodies into one
//! success/failure contract, classifies failures, and emits
//! notification/navigation events for the UI shell to act on.

mod classify;
mod client;
mod envelope;
mod error;
mod notify;

pub use classify::{classify, ClassifiedError, ClassifyRules, ErrorCategory, ErrorPayload};
pub use client::ApiClient;
pub use envelope::{decode_body, Decoded, DEFAULT_FAILURE_MESSAGE};
pub use error::{ApiError, ApiResult};
pub use notify::{Notice, UiEvent};
