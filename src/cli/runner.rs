//! CLI runner - executes commands

use crate::auth::authorization_value;
use crate::cli::commands::{Cli, Commands};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{BtagClient, Envelope, Page};
use crate::message::{Attachment, EmailMessage};
use crate::types::RequestParams;
use secrecy::SecretString;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Request {
                endpoint,
                params,
                all,
            } => self.request(endpoint, params, *all).await,
            Commands::Sign { params } => self.sign(params),
            Commands::Message {
                from,
                to,
                cc,
                subject,
                html,
                text,
                headers,
                attachments,
            } => {
                let message = EmailMessage {
                    from: from.clone(),
                    to: to.clone(),
                    cc: cc.clone(),
                    subject: subject.clone(),
                    html: html.clone(),
                    text: text.clone(),
                    headers: headers.clone(),
                    attachments: load_attachments(attachments)?,
                };
                println!("{}", message.build()?);
                Ok(())
            }
        }
    }

    /// Resolve client configuration: flags override the config file
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_json_file(path)?,
            None => ClientConfig::builder(
                self.cli.auth_id.clone().unwrap_or_default(),
                self.cli.access_key.clone().unwrap_or_default(),
            )
            .build()?,
        };

        if let Some(auth_id) = &self.cli.auth_id {
            config.auth_id = auth_id.clone();
        }
        if let Some(access_key) = &self.cli.access_key {
            config.access_key = SecretString::from(access_key.clone());
        }
        if let Some(base_url) = &self.cli.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout) = self.cli.timeout {
            config.timeout = Duration::from_secs(timeout);
        }
        if self.cli.insecure {
            config.verify_tls = false;
        }
        if self.cli.debug {
            config.debug = true;
        }

        config.validate()?;
        Ok(config)
    }

    async fn request(&self, endpoint: &str, params: &[(String, String)], all: bool) -> Result<()> {
        let params: RequestParams = params.iter().cloned().collect();
        let mut client = BtagClient::with_config(self.client_config()?)?;

        if all {
            let pages = client.fetch_all(endpoint, &params).await?;
            let bodies: Vec<Value> = pages.into_iter().map(Envelope::into_body).collect();
            print_json(&Value::Array(bodies))
        } else {
            match client.request(endpoint, &params).await? {
                Page::Data(envelope) => print_json(envelope.body()),
                Page::Exhausted => {
                    println!("No more pages.");
                    Ok(())
                }
            }
        }
    }

    fn sign(&self, params: &[(String, String)]) -> Result<()> {
        let params: RequestParams = params.iter().cloned().collect();
        let config = self.client_config()?;
        let client = BtagClient::with_config(config)?;

        let signature = client.signature(&params);
        println!("Signature:     {signature}");
        println!(
            "Authorization: {}",
            authorization_value(&client.config().auth_id, &signature)
        );
        Ok(())
    }
}

fn load_attachments(paths: &[PathBuf]) -> Result<Vec<Attachment>> {
    paths.iter().map(Attachment::from_path).collect()
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
