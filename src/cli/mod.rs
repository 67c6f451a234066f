//! CLI module
//!
//! Command-line interface for the Bananatag API.
//!
//! # Commands
//!
//! - `request` - Fetch a page (or every page) of an endpoint
//! - `sign` - Print the signature for a set of parameters
//! - `message` - Build a base64 MIME payload

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
