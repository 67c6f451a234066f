//! Session types

use crate::types::{Cursors, RequestParams};
use sha1::{Digest, Sha1};
use std::fmt;

/// Identity of one logical paginated request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey(String);

impl SessionKey {
    /// Derive the key for `endpoint` called with the caller's original `params`
    ///
    /// Hex SHA-1 of `endpoint`, a NUL byte, then the params as a JSON object
    /// in insertion order.
    pub fn derive(endpoint: &str, params: &RequestParams) -> Self {
        let json = serde_json::to_vec(params).expect("string map always serializes");
        let mut hasher = Sha1::new();
        hasher.update(endpoint.as_bytes());
        hasher.update([0u8]);
        hasher.update(&json);
        Self(hex::encode(hasher.finalize()))
    }

    /// Hex digest
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pagination state for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Parameters the session was opened with (`rtn` defaulted)
    pub params: RequestParams,
    /// Cursor of the next page to fetch
    pub next: u64,
    /// Cursor of the previous page
    pub prev: u64,
    /// Total reported by the server
    pub total: u64,
    /// API root the session was opened against
    pub base_url: String,
    pub(crate) last_used: u64,
}

impl SessionState {
    /// Open a session before any page has been fetched
    pub fn new(params: RequestParams, base_url: impl Into<String>) -> Self {
        Self {
            params,
            next: 0,
            prev: 0,
            total: 1,
            base_url: base_url.into(),
            last_used: 0,
        }
    }

    /// No further pages remain
    pub fn is_exhausted(&self) -> bool {
        self.next >= self.total
    }

    /// Record the cursors returned with a page
    ///
    /// `next` is clamped so it never passes `total`.
    pub fn apply(&mut self, cursors: &Cursors, params: RequestParams) {
        if let Some(total) = cursors.total {
            self.total = total;
        }
        self.next = cursors.next.min(self.total);
        self.prev = cursors.prev;
        self.params = params;
    }
}

/// Result of resolving the next page of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Fetch a page with these outgoing parameters
    Continue(RequestParams),
    /// The session has no pages left
    Exhausted,
}

impl NextPage {
    /// Check if this is an exhausted result
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}
