//! Session tracker implementation

use super::types::{NextPage, SessionKey, SessionState};
use crate::types::{Cursors, RequestParams};
use std::collections::HashMap;
use tracing::trace;

/// Records per page; `page=N` jumps to cursor `N * PAGE_SIZE`
pub const PAGE_SIZE: u64 = 250;

/// Owns the pagination sessions of one client
#[derive(Debug, Clone)]
pub struct SessionTracker {
    sessions: HashMap<SessionKey, SessionState>,
    base_url: String,
    max_sessions: Option<usize>,
    clock: u64,
}

impl SessionTracker {
    /// Create a tracker for `base_url`, keeping at most `max_sessions` sessions
    pub fn new(base_url: impl Into<String>, max_sessions: Option<usize>) -> Self {
        Self {
            sessions: HashMap::new(),
            base_url: base_url.into(),
            max_sessions,
            clock: 0,
        }
    }

    /// Compute the outgoing parameters for the next page of a session
    ///
    /// Opens the session on first use. Returns [`NextPage::Exhausted`] once
    /// the server-reported total has been reached.
    pub fn resolve_next_page(&mut self, endpoint: &str, params: &RequestParams) -> NextPage {
        let state = self.session_mut(endpoint, params);
        if state.is_exhausted() {
            return NextPage::Exhausted;
        }

        let mut outgoing = state.params.clone();
        let page = outgoing.get("page").and_then(|p| p.parse::<u64>().ok());
        let cursor = match page {
            Some(page) => {
                outgoing.remove("page");
                page.saturating_mul(PAGE_SIZE)
            }
            None => state.next,
        };
        outgoing.insert("cursor", cursor);

        NextPage::Continue(outgoing)
    }

    /// Store the cursors returned for a page of the session opened with
    /// `original_params`
    pub fn record_page_result(
        &mut self,
        endpoint: &str,
        original_params: &RequestParams,
        cursors: &Cursors,
    ) {
        let params = with_default_rtn(original_params);
        let state = self.session_mut(endpoint, original_params);
        state.apply(cursors, params);
        trace!(
            endpoint,
            next = state.next,
            prev = state.prev,
            total = state.total,
            "Updated pagination session"
        );
    }

    /// Look up the session for `endpoint` and `params`
    pub fn get(&self, endpoint: &str, params: &RequestParams) -> Option<&SessionState> {
        self.sessions.get(&SessionKey::derive(endpoint, params))
    }

    /// Drop the session for `endpoint` and `params`
    pub fn evict(&mut self, endpoint: &str, params: &RequestParams) -> bool {
        self.sessions
            .remove(&SessionKey::derive(endpoint, params))
            .is_some()
    }

    /// Drop every session
    pub fn reset(&mut self) {
        self.sessions.clear();
    }

    /// Number of tracked sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Check if no sessions are tracked
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Get the session for the given identity, opening it if needed
    fn session_mut(&mut self, endpoint: &str, params: &RequestParams) -> &mut SessionState {
        let key = SessionKey::derive(endpoint, params);
        self.clock += 1;

        if !self.sessions.contains_key(&key) {
            self.make_room();
            trace!(endpoint, key = %key, "Opened pagination session");
        }

        let base_url = &self.base_url;
        let state = self
            .sessions
            .entry(key)
            .or_insert_with(|| SessionState::new(with_default_rtn(params), base_url.clone()));
        state.last_used = self.clock;
        state
    }

    /// Evict least recently used sessions until one more fits
    ///
    /// Linear in the number of sessions per eviction.
    fn make_room(&mut self) {
        let Some(max) = self.max_sessions else {
            return;
        };

        while self.sessions.len() >= max.max(1) {
            let oldest = self
                .sessions
                .iter()
                .min_by_key(|(_, state)| state.last_used)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    trace!(key = %key, "Evicted pagination session");
                    self.sessions.remove(&key);
                }
                None => break,
            }
        }
    }
}

/// Copy of `params` with `rtn` defaulted to `json`
fn with_default_rtn(params: &RequestParams) -> RequestParams {
    let mut params = params.clone();
    if !params.contains_key("rtn") {
        params.insert("rtn", "json");
    }
    params
}
