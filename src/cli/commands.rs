//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bananatag API command-line client
#[derive(Parser, Debug)]
#[command(name = "btag")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Account AuthID
    #[arg(long, env = "BTAG_AUTH_ID", global = true, hide_env_values = true)]
    pub auth_id: Option<String>,

    /// Account access key
    #[arg(long, env = "BTAG_ACCESS_KEY", global = true, hide_env_values = true)]
    pub access_key: Option<String>,

    /// API root URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Total request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Log every call, its timing and the raw response
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the next page of an endpoint
    Request {
        /// Endpoint path, e.g. "tags" (empty string for the root endpoint)
        endpoint: String,

        /// Request parameter as key=value (repeatable)
        #[arg(short, long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,

        /// Follow cursors and fetch every page
        #[arg(long)]
        all: bool,
    },

    /// Print the signature and Authorization header for parameters
    Sign {
        /// Request parameter as key=value (repeatable)
        #[arg(short, long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },

    /// Build a base64-encoded MIME message
    Message {
        /// Sender address
        #[arg(long)]
        from: Option<String>,

        /// Recipient address (repeatable)
        #[arg(long)]
        to: Vec<String>,

        /// Carbon-copy address (repeatable)
        #[arg(long)]
        cc: Vec<String>,

        /// Subject line
        #[arg(long)]
        subject: Option<String>,

        /// HTML body
        #[arg(long)]
        html: Option<String>,

        /// Plain-text alternative body
        #[arg(long)]
        text: Option<String>,

        /// Custom header as Name:value (repeatable)
        #[arg(long = "header", value_parser = parse_header)]
        headers: Vec<(String, String)>,

        /// File to attach (repeatable)
        #[arg(long = "attach")]
        attachments: Vec<PathBuf>,
    },
}

/// Parse a `key=value` pair
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid key=value pair: no '=' found in '{s}'"))?;
    if key.is_empty() {
        return Err(format!("invalid key=value pair: empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Parse a `Name:value` header
pub fn parse_header(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("invalid header: no ':' found in '{s}'"))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}
