//! Email message builder
//!
//! Assembles a MIME message from structured fields and returns it base64
//! encoded, ready to be embedded in a request payload. Has no state and no
//! pagination concerns.

mod builder;

pub use builder::{Attachment, Disposition, EmailMessage};
