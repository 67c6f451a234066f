//! Authenticator implementation
//!
//! Holds the account credentials and applies a fresh signature to each
//! outgoing request.

use super::signer::{authorization_value, sign};
use crate::types::RequestParams;
use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};

/// Signs requests on behalf of one account
#[derive(Clone)]
pub struct Authenticator {
    auth_id: String,
    access_key: SecretString,
}

impl Authenticator {
    /// Create an authenticator for the given credentials
    pub fn new(auth_id: impl Into<String>, access_key: SecretString) -> Self {
        Self {
            auth_id: auth_id.into(),
            access_key,
        }
    }

    /// The account AuthID
    pub fn auth_id(&self) -> &str {
        &self.auth_id
    }

    /// Signature for `params`
    pub fn signature(&self, params: &RequestParams) -> String {
        sign(params, self.access_key.expose_secret())
    }

    /// `Authorization` header value for `params`
    pub fn header_value(&self, params: &RequestParams) -> String {
        authorization_value(&self.auth_id, &self.signature(params))
    }

    /// Apply the `Authorization` header for `params` to a request builder
    pub fn apply(&self, req: RequestBuilder, params: &RequestParams) -> RequestBuilder {
        req.header(AUTHORIZATION, self.header_value(params))
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("auth_id", &self.auth_id)
            .finish_non_exhaustive()
    }
}
