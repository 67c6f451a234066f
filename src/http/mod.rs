//! HTTP request engine
//!
//! Turns one logical call into a signed HTTP request.
//!
//! # Flow
//!
//! 1. Validate parameters (nothing is touched on failure)
//! 2. Resolve the next page from the session tracker, or stop if exhausted
//! 3. Sign the outgoing parameters and send them
//! 4. Map transport failures and 4xx/5xx responses onto typed errors
//! 5. Feed any `cursors` in the response back into the session

mod client;
mod response;

pub use client::BtagClient;
pub use response::{Envelope, Page};
