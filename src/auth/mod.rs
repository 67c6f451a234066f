//! Authentication module
//!
//! Every request carries an `Authorization` header of the form
//! `base64(authId:signature)`, where the signature is an HMAC-SHA1 over the
//! request parameters keyed with the account's access key. The access key
//! itself never leaves the process.

mod authenticator;
mod signer;

pub use authenticator::Authenticator;
pub use signer::{authorization_value, canonical_bytes, hmac_sha1_hex, sign};
