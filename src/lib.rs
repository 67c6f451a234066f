// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

//! # Bananatag API client
//!
//! Signed, paginated access to the Bananatag email analytics API.
//!
//! ## Features
//!
//! - **Request Signing**: HMAC-SHA1 over the request parameters, the access
//!   key never leaves the process
//! - **Cursor Pagination**: Repeating a call continues where the last page
//!   ended, and reports `Exhausted` once the total is reached
//! - **Input Validation**: Date and flag parameters are checked before any I/O
//! - **Message Builder**: Base64 MIME payloads with attachments
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bananatag::{BtagClient, Page, RequestParams, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut client = BtagClient::new("your AuthID", "your access key")?;
//!     let params = RequestParams::new()
//!         .with("start", "2024-01-01")
//!         .with("end", "2024-03-30");
//!
//!     // Each call returns the next page until the session is exhausted
//!     while let Page::Data(page) = client.request("tags", &params).await? {
//!         println!("{}", page.body());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! request(endpoint, params)
//!   │
//!   ├─ validate ───────── ValidationError, nothing touched
//!   ├─ session tracker ── Exhausted, no request sent
//!   ├─ signer ─────────── Authorization: base64(authId:hmac)
//!   ├─ transport ──────── TransportFailure / ApiRejection
//!   └─ cursors ────────── fed back into the session
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types
pub mod types;

/// Client configuration
pub mod config;

/// Request signing
pub mod auth;

/// Parameter validation
pub mod validate;

/// Pagination sessions
pub mod session;

/// HTTP request engine
pub mod http;

/// MIME message builder
pub mod message;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::ClientConfig;
pub use error::{Error, ErrorKind, Result};
pub use http::{BtagClient, Envelope, Page};
pub use message::{Attachment, Disposition, EmailMessage};
pub use types::{Cursors, Method, RequestParams};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
