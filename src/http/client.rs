//! Bananatag API client
//!
//! Owns one reqwest client, the account credentials and the pagination
//! sessions. Calls are issued one at a time: `request` takes `&mut self`.

use super::response::{Envelope, Page};
use crate::auth::Authenticator;
use crate::config::{ClientConfig, CONNECT_TIMEOUT};
use crate::error::{Error, Result};
use crate::session::{NextPage, SessionState, SessionTracker};
use crate::types::{Cursors, JsonValue, Method, RequestParams};
use crate::validate::validate;
use futures::{Stream, TryStreamExt};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::time::Instant;
use tracing::{debug, warn};

/// Client for the Bananatag API
pub struct BtagClient {
    http: Client,
    config: ClientConfig,
    authenticator: Authenticator,
    sessions: SessionTracker,
}

impl BtagClient {
    /// Create a client with default settings
    pub fn new(auth_id: impl Into<String>, access_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::builder(auth_id, access_key).build()?)
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(!config.verify_tls)
            .connection_verbose(config.debug)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        let authenticator = Authenticator::new(config.auth_id.clone(), config.access_key.clone());
        let sessions = SessionTracker::new(config.base_url.clone(), config.max_sessions);

        Ok(Self {
            http,
            config,
            authenticator,
            sessions,
        })
    }

    /// The client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Signature the client would send for `params`
    pub fn signature(&self, params: &RequestParams) -> String {
        self.authenticator.signature(params)
    }

    /// Fetch the next page of `endpoint` for `params`
    ///
    /// Repeating a call with the same endpoint and parameters continues the
    /// same pagination session. Once the server-reported total is reached the
    /// call returns [`Page::Exhausted`] without touching the network.
    pub async fn request(&mut self, endpoint: &str, params: &RequestParams) -> Result<Page> {
        validate(params)?;

        let outgoing = match self.sessions.resolve_next_page(endpoint, params) {
            NextPage::Continue(outgoing) => outgoing,
            NextPage::Exhausted => {
                if self.config.debug {
                    debug!("No pages left for '{endpoint}', skipping request");
                }
                return Ok(Page::Exhausted);
            }
        };

        let envelope = self.send(endpoint, &outgoing).await?;

        if let Some(cursors) = page_cursors(endpoint, &envelope) {
            self.sessions.record_page_result(endpoint, params, &cursors);
        }

        Ok(Page::Data(envelope))
    }

    /// Stream every remaining page of `endpoint`, starting from the first
    ///
    /// Any existing session for the same call is discarded first. The stream
    /// ends when the session is exhausted, when a response carries no
    /// `cursors` (non-paginated endpoints yield once), after one page when
    /// `params` pins a `page`, or when a page leaves the cursor where it was.
    pub fn pages<'a>(
        &'a mut self,
        endpoint: &'a str,
        params: &'a RequestParams,
    ) -> impl Stream<Item = Result<Envelope>> + 'a {
        self.sessions.evict(endpoint, params);
        let pinned_page = params.contains_key("page");

        futures::stream::try_unfold(Some(self), move |client| async move {
            let Some(client) = client else {
                return Ok::<_, Error>(None);
            };
            let cursor_before = client.next_cursor(endpoint, params);
            match client.request(endpoint, params).await? {
                Page::Exhausted => Ok(None),
                Page::Data(envelope) => {
                    let paginated = envelope.cursors().is_some();
                    let cursor_after = client.next_cursor(endpoint, params);
                    let stalled = paginated && cursor_after == cursor_before;
                    if stalled {
                        warn!(
                            endpoint,
                            cursor = cursor_after,
                            "Pagination cursor did not advance, stopping"
                        );
                    }
                    let more = paginated && !pinned_page && !stalled;
                    Ok(Some((envelope, more.then_some(client))))
                }
            }
        })
    }

    /// Collect every page of `endpoint`
    pub async fn fetch_all(
        &mut self,
        endpoint: &str,
        params: &RequestParams,
    ) -> Result<Vec<Envelope>> {
        self.pages(endpoint, params).try_collect().await
    }

    /// Session state for `endpoint` and `params`, if one is open
    pub fn session(&self, endpoint: &str, params: &RequestParams) -> Option<&SessionState> {
        self.sessions.get(endpoint, params)
    }

    /// Discard the session for `endpoint` and `params`
    pub fn evict_session(&mut self, endpoint: &str, params: &RequestParams) -> bool {
        self.sessions.evict(endpoint, params)
    }

    /// Discard every session
    pub fn reset_sessions(&mut self) {
        self.sessions.reset();
    }

    /// Number of open sessions
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Cursor the next call for this session would send; 0 before it opens
    fn next_cursor(&self, endpoint: &str, params: &RequestParams) -> u64 {
        self.sessions
            .get(endpoint, params)
            .map_or(0, |state| state.next)
    }

    /// Sign and send one request
    async fn send(&self, endpoint: &str, params: &RequestParams) -> Result<Envelope> {
        let method = Method::for_endpoint(endpoint);
        let url = format!("{}{}", self.config.base_url, endpoint);
        let encoded = params.to_query_string();

        let req = match method {
            Method::Get => self
                .http
                .request(method.into(), format!("{url}?{encoded}")),
            Method::Put => self
                .http
                .request(method.into(), url.as_str())
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(encoded.clone()),
        };
        let req = self.authenticator.apply(req, params);

        if self.config.debug {
            debug!("Call to {method} {url}: {encoded}");
        }
        let started = Instant::now();

        let response = req
            .send()
            .await
            .map_err(|e| Error::transport(endpoint, &url, error_chain(&e)))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(endpoint, &url, error_chain(&e)))?;

        if self.config.debug {
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
            debug!("Completed in {elapsed_ms:.2}ms");
            debug!("Got response: {body}");
        }

        if status.is_client_error() || status.is_server_error() {
            return Err(rejection(status, &body));
        }

        let value: JsonValue = serde_json::from_str(&body)
            .map_err(|e| Error::decode(endpoint, status.as_u16(), e.to_string()))?;

        Ok(Envelope::new(value))
    }
}

impl std::fmt::Debug for BtagClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BtagClient")
            .field("config", &self.config)
            .field("sessions", &self.sessions.len())
            .finish_non_exhaustive()
    }
}

/// Pagination metadata of a response, warning on a malformed object
fn page_cursors(endpoint: &str, envelope: &Envelope) -> Option<Cursors> {
    let raw = envelope.raw_cursors()?;
    match serde_json::from_value(raw.clone()) {
        Ok(cursors) => Some(cursors),
        Err(e) => {
            warn!(endpoint, error = %e, "Ignoring malformed cursors in response");
            None
        }
    }
}

/// Build an API rejection from an error response
///
/// The API answers errors with `{"error", "message", "statusCode"}`; anything
/// else falls back to the HTTP status and raw body.
fn rejection(status: StatusCode, body: &str) -> Error {
    let reason = status.canonical_reason().unwrap_or("HTTP error");

    let Ok(JsonValue::Object(fields)) = serde_json::from_str::<JsonValue>(body) else {
        return Error::rejection(status.as_u16(), reason, body.trim());
    };

    let error = fields
        .get("error")
        .and_then(JsonValue::as_str)
        .unwrap_or(reason);
    let message = match fields.get("message") {
        Some(JsonValue::String(message)) => message.clone(),
        Some(JsonValue::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    let code = fields
        .get("statusCode")
        .and_then(JsonValue::as_u64)
        .and_then(|code| u16::try_from(code).ok())
        .unwrap_or(status.as_u16());

    Error::rejection(code, error, message)
}

/// Display an error with its sources
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
