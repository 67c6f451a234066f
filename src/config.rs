//! Client configuration
//!
//! A [`ClientConfig`] is built once, validated, and then owned by a
//! [`BtagClient`](crate::http::BtagClient) for its whole lifetime.

use crate::error::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://api.bananatag.com/";

/// Default total request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 500;

/// Connect timeout, not configurable
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default bound on tracked pagination sessions
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

/// Configuration for a Bananatag client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Account AuthID, sent with every request
    pub auth_id: String,
    /// Secret access key, only ever used to sign
    pub access_key: SecretString,
    /// API root; endpoints are appended verbatim
    pub base_url: String,
    /// Total request timeout
    pub timeout: Duration,
    /// Log every call, its timing and the raw response
    pub debug: bool,
    /// Verify the server's TLS certificate
    pub verify_tls: bool,
    /// User agent string
    pub user_agent: String,
    /// Maximum number of pagination sessions kept; `None` is unbounded
    ///
    /// Opening a session while the tracker is full scans every session to
    /// find the least recently used one, so that open costs O(n) in this
    /// bound.
    pub max_sessions: Option<usize>,
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder(auth_id: impl Into<String>, access_key: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self {
                auth_id: auth_id.into(),
                access_key: SecretString::from(access_key.into()),
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
                debug: false,
                verify_tls: true,
                user_agent: format!("bananatag-rs/{}", env!("CARGO_PKG_VERSION")),
                max_sessions: Some(DEFAULT_MAX_SESSIONS),
            },
        }
    }

    /// Load a config from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_json_str(&contents)
    }

    /// Load a config from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(json)?;
        file.into_builder().build()
    }

    /// Check that both credentials are present
    pub fn validate(&self) -> Result<()> {
        if self.auth_id.trim().is_empty() || self.access_key.expose_secret().trim().is_empty() {
            return Err(Error::MissingCredentials);
        }
        Ok(())
    }
}

/// Builder for [`ClientConfig`]
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the API root
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the total request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Enable or disable debug logging
    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Enable or disable TLS peer verification
    #[must_use]
    pub fn verify_tls(mut self, verify: bool) -> Self {
        self.config.verify_tls = verify;
        self
    }

    /// Set user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Bound the number of tracked sessions (`None` for unbounded)
    ///
    /// Eviction is a linear scan, see [`ClientConfig::max_sessions`].
    #[must_use]
    pub fn max_sessions(mut self, max: Option<usize>) -> Self {
        self.config.max_sessions = max;
        self
    }

    /// Build and validate the config
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// On-disk shape of a config file
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    #[serde(default)]
    auth_id: String,
    #[serde(default)]
    access_key: String,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    timeout_seconds: Option<u64>,
    #[serde(default)]
    debug: bool,
    #[serde(default)]
    verify_tls: Option<bool>,
    #[serde(default)]
    max_sessions: Option<usize>,
}

impl ConfigFile {
    fn into_builder(self) -> ClientConfigBuilder {
        let mut builder = ClientConfig::builder(self.auth_id, self.access_key).debug(self.debug);
        if let Some(url) = self.base_url {
            builder = builder.base_url(url);
        }
        if let Some(secs) = self.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(verify) = self.verify_tls {
            builder = builder.verify_tls(verify);
        }
        if self.max_sessions.is_some() {
            builder = builder.max_sessions(self.max_sessions);
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builder_defaults() {
        let config = ClientConfig::builder("id", "key").build().unwrap();
        assert_eq!(config.base_url, "https://api.bananatag.com/");
        assert_eq!(config.timeout, Duration::from_secs(500));
        assert!(!config.debug);
        assert!(config.verify_tls);
        assert_eq!(config.max_sessions, Some(DEFAULT_MAX_SESSIONS));
        assert!(config.user_agent.starts_with("bananatag-rs/"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::builder("id", "key")
            .base_url("http://localhost:8080/")
            .timeout(Duration::from_secs(5))
            .debug(true)
            .verify_tls(false)
            .user_agent("test-agent/1.0")
            .max_sessions(None)
            .build()
            .unwrap();

        assert_eq!(config.base_url, "http://localhost:8080/");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.debug);
        assert!(!config.verify_tls);
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_eq!(config.max_sessions, None);
    }

    #[test]
    fn test_missing_credentials() {
        let err = ClientConfig::builder("", "key").build().unwrap_err();
        assert!(matches!(err, Error::MissingCredentials));

        let err = ClientConfig::builder("id", "   ").build().unwrap_err();
        assert!(matches!(err, Error::MissingCredentials));
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_debug_output_redacts_key() {
        let config = ClientConfig::builder("id", "super-secret-key").build().unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret-key"));
    }

    #[test]
    fn test_from_json_str() {
        let config = ClientConfig::from_json_str(
            r#"{"authId": "id", "accessKey": "key", "timeoutSeconds": 20, "debug": true}"#,
        )
        .unwrap();
        assert_eq!(config.auth_id, "id");
        assert_eq!(config.access_key.expose_secret(), "key");
        assert_eq!(config.timeout, Duration::from_secs(20));
        assert!(config.debug);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_from_json_str_missing_key() {
        let err = ClientConfig::from_json_str(r#"{"authId": "id"}"#).unwrap_err();
        assert!(matches!(err, Error::MissingCredentials));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"authId": "id", "accessKey": "key", "baseUrl": "http://127.0.0.1:9000/"}}"#
        )
        .unwrap();

        let config = ClientConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9000/");
    }

    #[test]
    fn test_from_json_file_not_found() {
        let err = ClientConfig::from_json_file("/nonexistent/btag.json").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
