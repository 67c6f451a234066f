//! Common types used throughout the Bananatag client
//!
//! This module contains the request parameter map, the HTTP method
//! selection, and the pagination metadata carried in responses.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

// ============================================================================
// Request Parameters
// ============================================================================

/// Insertion-ordered request parameters
///
/// Order matters: the signature is computed over the parameters in the order
/// they were inserted, and the server rebuilds the same string. Inserting an
/// existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    entries: Vec<(String, String)>,
}

impl RequestParams {
    /// Create an empty parameter map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a parameter
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check whether a parameter is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove a parameter, returning its value
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Iterate over parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no parameters
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode as `application/x-www-form-urlencoded`, in insertion order
    ///
    /// Spaces become `+`. This exact string is used as the GET query, the
    /// PUT body, and the input to the signer.
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.iter() {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<String>, V: ToString> Extend<(K, V)> for RequestParams {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl Serialize for RequestParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method used for an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Put,
}

impl Method {
    /// The method the API expects for `endpoint`
    ///
    /// The root endpoint (empty string) is the only one written with PUT.
    pub fn for_endpoint(endpoint: &str) -> Self {
        if endpoint.is_empty() {
            Method::Put
        } else {
            Method::Get
        }
    }

    /// Uppercase method name
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Put => reqwest::Method::PUT,
        }
    }
}

// ============================================================================
// Pagination Metadata
// ============================================================================

/// The `cursors` object returned by paginated endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Cursors {
    /// Cursor of the next page
    #[serde(default)]
    pub next: u64,
    /// Cursor of the previous page
    #[serde(default)]
    pub prev: u64,
    /// Total number of records, when the server reports it
    #[serde(default)]
    pub total: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_params_preserve_insertion_order() {
        let params = RequestParams::new()
            .with("start", "2020-01-01")
            .with("end", "2020-02-01")
            .with("aggregateData", true);

        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["start", "end", "aggregateData"]);
        assert_eq!(params.get("aggregateData"), Some("true"));
    }

    #[test]
    fn test_params_insert_replaces_in_place() {
        let mut params = RequestParams::new().with("a", 1).with("b", 2);
        params.insert("a", 3);

        assert_eq!(params.len(), 2);
        assert_eq!(params.to_query_string(), "a=3&b=2");
    }

    #[test]
    fn test_params_remove() {
        let mut params: RequestParams = [("page", "3"), ("rtn", "json")].into_iter().collect();
        assert_eq!(params.remove("page"), Some("3".to_string()));
        assert_eq!(params.remove("page"), None);
        assert!(!params.contains_key("page"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_query_string_encoding() {
        let params = RequestParams::new()
            .with("q", "hello world")
            .with("sum", "1+2")
            .with("mail", "a@b.com");
        assert_eq!(params.to_query_string(), "q=hello+world&sum=1%2B2&mail=a%40b.com");
    }

    #[test]
    fn test_params_serialize_as_ordered_map() {
        let params = RequestParams::new().with("z", "1").with("a", "2");
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"z":"1","a":"2"}"#);
    }

    #[test]
    fn test_method_for_endpoint() {
        assert_eq!(Method::for_endpoint(""), Method::Put);
        assert_eq!(Method::for_endpoint("tags"), Method::Get);
        assert_eq!(Method::for_endpoint("stats/aggregate"), Method::Get);
        assert_eq!(Method::Put.to_string(), "PUT");
        assert_eq!(reqwest::Method::from(Method::Get), reqwest::Method::GET);
    }

    #[test]
    fn test_cursors_deserialize() {
        let cursors: Cursors = serde_json::from_str(r#"{"next":1,"prev":0,"total":2}"#).unwrap();
        assert_eq!(
            cursors,
            Cursors {
                next: 1,
                prev: 0,
                total: Some(2)
            }
        );

        let cursors: Cursors = serde_json::from_str(r#"{"next":250}"#).unwrap();
        assert_eq!(cursors.total, None);
        assert_eq!(cursors.prev, 0);
    }
}
