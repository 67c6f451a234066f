//! Response types

use crate::types::{Cursors, JsonValue};

/// Parsed JSON body of a successful response
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    body: JsonValue,
}

impl Envelope {
    /// Wrap a parsed body
    pub fn new(body: JsonValue) -> Self {
        Self { body }
    }

    /// The whole body
    pub fn body(&self) -> &JsonValue {
        &self.body
    }

    /// Take the whole body
    pub fn into_body(self) -> JsonValue {
        self.body
    }

    /// The `data` field of a paginated response
    pub fn data(&self) -> Option<&JsonValue> {
        self.body.get("data")
    }

    /// Raw `cursors` object, if the response carries one
    pub fn raw_cursors(&self) -> Option<&JsonValue> {
        self.body.get("cursors").filter(|v| !v.is_null())
    }

    /// Pagination metadata, if present and well formed
    pub fn cursors(&self) -> Option<Cursors> {
        serde_json::from_value(self.raw_cursors()?.clone()).ok()
    }
}

/// Outcome of one `request` call
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    /// A page of results
    Data(Envelope),
    /// The session has no pages left; no request was sent
    Exhausted,
}

impl Page {
    /// Check if this is an exhausted result
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// The envelope, if a page was fetched
    pub fn into_envelope(self) -> Option<Envelope> {
        match self {
            Self::Data(envelope) => Some(envelope),
            Self::Exhausted => None,
        }
    }
}
