//! Error types for the Bananatag client
//!
//! Every public API returns `Result<T, Error>` where Error is defined here.
//! Each variant maps onto one [`ErrorKind`] and an HTTP-style status code so
//! callers can inspect failures without matching on every variant.

use thiserror::Error;

/// The main error type for the Bananatag client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("You must provide both an authID and access key.")]
    MissingCredentials,

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Validation Errors
    // ============================================================================
    #[error("Error with provided parameters: {message}")]
    Validation { message: String },

    #[error("Failed to build message: {message}")]
    Message { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("API call to {url} failed, {message}")]
    Transport {
        endpoint: String,
        url: String,
        message: String,
    },

    #[error("{error}, {message}")]
    ApiRejection {
        status: u16,
        error: String,
        message: String,
    },

    #[error("Failed to decode response from '{endpoint}' (HTTP {status}): {message}")]
    Decode {
        endpoint: String,
        status: u16,
        message: String,
    },
}

/// Broad classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing credentials, bad config file, or the HTTP client could not be built
    Configuration,
    /// Malformed or contradictory input, rejected before any I/O
    Validation,
    /// Connection errors and timeouts
    TransportFailure,
    /// 4xx/5xx responses from the API
    ApiRejection,
    /// A successful response whose body is not JSON
    MalformedResponse,
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a message builder error
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }

    /// Create a transport error for a call to `url`
    pub fn transport(
        endpoint: impl Into<String>,
        url: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an API rejection error
    pub fn rejection(status: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ApiRejection {
            status,
            error: error.into(),
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(endpoint: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            status,
            message: message.into(),
        }
    }

    /// The kind of failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingCredentials | Error::Config { .. } | Error::JsonParse(_) | Error::Io(_) => {
                ErrorKind::Configuration
            }
            Error::Validation { .. } | Error::Message { .. } => ErrorKind::Validation,
            Error::Transport { .. } => ErrorKind::TransportFailure,
            Error::ApiRejection { .. } => ErrorKind::ApiRejection,
            Error::Decode { .. } => ErrorKind::MalformedResponse,
        }
    }

    /// HTTP-style status code associated with the failure
    pub fn status_code(&self) -> u16 {
        match self {
            Error::MissingCredentials => 401,
            Error::ApiRejection { status, .. } | Error::Decode { status, .. } => *status,
            _ => 400,
        }
    }
}

/// Result type alias for the Bananatag client
pub type Result<T> = std::result::Result<T, Error>;
