//! The request/response pipeline.

use crate::classify::{classify, ClassifyRules, ErrorCategory, ErrorPayload};
use crate::envelope::{decode_body, Decoded};
use crate::error::{ApiError, ApiResult};
use crate::notify::{Notice, UiEvent};
use console_config_and_utils::Config;
use console_session::SessionStore;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Capacity of the UI event channel.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// HTTP client for the backend API.
///
/// Applies outbound authentication from the session store, unwraps response
/// envelopes, classifies transport failures, and publishes UI events. Share
/// one instance behind an `Arc`; all methods take `&self`.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    success_code: i64,
    rules: ClassifyRules,
    notice_min_duration_ms: u64,
    redirect_delay: Duration,
    session: Arc<SessionStore>,
    events: broadcast::Sender<UiEvent>,
    /// One-shot guard: set by the first 401, re-armed on a fresh login.
    auth_expired: AtomicBool,
    /// Pending redirect task, kept so it can be cancelled.
    pending_redirect: Mutex<Option<JoinHandle<()>>>,
}

impl ApiClient {
    /// Create a new client from the given configuration and session store.
    pub fn new(config: &Config, session: Arc<SessionStore>) -> ApiResult<Self> {
        url::Url::parse(&config.api_base_url)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            success_code: config.envelope_success_code,
            rules: ClassifyRules::from(config),
            notice_min_duration_ms: config.notice_min_duration_ms,
            redirect_delay: Duration::from_millis(config.redirect_delay_ms),
            session,
            events,
            auth_expired: AtomicBool::new(false),
            pending_redirect: Mutex::new(None),
        })
    }

    /// Subscribe to UI events (notices, navigation commands).
    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.events.subscribe()
    }

    /// Build the full URL for an API path.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start a request, attaching the bearer token current at issue time.
    ///
    /// Headers are only ever added, never replaced; unauthenticated requests
    /// go out without an Authorization header.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, self.endpoint(path));
        if self.session.is_authenticated() {
            if let Some(token) = self.session.token() {
                builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
            }
        }
        builder
    }

    /// GET with query parameters.
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> ApiResult<Value> {
        self.execute(self.request(Method::GET, path).query(query)).await
    }

    /// POST with a JSON body.
    pub async fn post(&self, path: &str, body: &impl Serialize) -> ApiResult<Value> {
        self.execute(self.request(Method::POST, path).json(body)).await
    }

    /// PUT with a JSON body.
    pub async fn put(&self, path: &str, body: &impl Serialize) -> ApiResult<Value> {
        self.execute(self.request(Method::PUT, path).json(body)).await
    }

    /// DELETE.
    pub async fn delete(&self, path: &str) -> ApiResult<Value> {
        self.execute(self.request(Method::DELETE, path)).await
    }

    /// GET and deserialize the resolved payload.
    pub async fn get_as<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<T> {
        let value = self.get(path, query).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// POST and deserialize the resolved payload.
    pub async fn post_as<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> ApiResult<T> {
        let value = self.post(path, body).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Send the request and run the inbound stages.
    async fn execute(&self, builder: RequestBuilder) -> ApiResult<Value> {
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                let status = e.status().map(|s| s.as_u16());
                let message = e.to_string();
                return Err(self.transport_failure(status, None, &message, Some(e)));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let transport_message = format!("HTTP {}", status);
            let payload = response.json::<ErrorPayload>().await.ok();
            return Err(self.transport_failure(
                Some(status.as_u16()),
                payload,
                &transport_message,
                None,
            ));
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                let message = e.to_string();
                return Err(self.transport_failure(None, None, &message, Some(e)));
            }
        };

        // Empty bodies resolve as null; non-JSON legacy bodies pass through
        // as plain strings.
        let body: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        match decode_body(body, self.success_code) {
            Decoded::Payload(data) => Ok(data),
            Decoded::Rejected { code, message } => Err(self.application_failure(code, message)),
        }
    }

    /// Application-level failure: enveloped response with a non-success code.
    fn application_failure(&self, code: i64, message: String) -> ApiError {
        warn!(code, message = %message, "Backend rejected request");
        self.emit_notice(&message);
        ApiError::Application { code, message }
    }

    /// Inbound failure stage: classify, notify, handle auth expiry, reject.
    fn transport_failure(
        &self,
        status: Option<u16>,
        payload: Option<ErrorPayload>,
        transport_message: &str,
        source: Option<reqwest::Error>,
    ) -> ApiError {
        let classified = classify(status, payload.as_ref(), transport_message, &self.rules);
        warn!(
            status = ?status,
            category = ?classified.category,
            "Request failed: {}",
            classified.original_message
        );

        self.emit_notice(&classified.display_message);

        if classified.category == ErrorCategory::AuthExpired {
            self.handle_auth_expiry();
        }

        ApiError::Transport {
            classified,
            payload,
            source,
        }
    }

    fn emit_notice(&self, message: &str) {
        let notice = Notice::error(message, self.notice_min_duration_ms);
        // Nobody listening is fine; notices are advisory.
        let _ = self.events.send(UiEvent::Notice(notice));
    }

    /// The first 401 clears the session and schedules one login redirect;
    /// later 401s in the same window only produce their notice.
    fn handle_auth_expiry(&self) {
        if self.auth_expired.swap(true, Ordering::SeqCst) {
            debug!("Session already cleared, skipping duplicate 401 handling");
            return;
        }

        if let Err(e) = self.session.logout() {
            warn!("Failed to clear session after 401: {}", e);
        }

        let events = self.events.clone();
        let delay = self.redirect_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(UiEvent::RedirectToLogin);
        });

        let mut pending = self.pending_redirect.lock().unwrap();
        *pending = Some(handle);
    }

    /// Cancel a scheduled login redirect, e.g. because the router is already
    /// navigating there.
    pub fn cancel_scheduled_redirect(&self) {
        let mut pending = self.pending_redirect.lock().unwrap();
        if let Some(handle) = pending.take() {
            handle.abort();
            debug!("Cancelled scheduled login redirect");
        }
    }

    /// Re-arm the auth-expiry guard after a fresh successful login. Also
    /// cancels any redirect still pending from the expired session.
    pub fn reset_auth_expiry(&self) {
        self.cancel_scheduled_redirect();
        self.auth_expired.store(false, Ordering::SeqCst);
    }
}
