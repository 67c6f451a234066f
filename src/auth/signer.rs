//! Request signing
//!
//! The signed string is the form-encoded query string decoded back to raw
//! bytes. The server rebuilds the same bytes from what it receives, so the
//! encode/decode round trip must not be short-circuited.

use crate::types::RequestParams;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Bytes covered by the signature for `params`
pub fn canonical_bytes(params: &RequestParams) -> Vec<u8> {
    // urldecode semantics: '+' is a space, then %XX escapes
    let encoded = params.to_query_string().replace('+', " ");
    urlencoding::decode_binary(encoded.as_bytes()).into_owned()
}

/// Lowercase hex HMAC-SHA1 of `data` keyed with `key`
pub fn hmac_sha1_hex(key: &[u8], data: &[u8]) -> String {
    let mut mac = HmacSha1::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);
    hex::encode(mac.finalize().into_bytes())
}

/// Sign `params` with `secret_key`
pub fn sign(params: &RequestParams, secret_key: &str) -> String {
    hmac_sha1_hex(secret_key.as_bytes(), &canonical_bytes(params))
}

/// Value of the `Authorization` header for a signed request
pub fn authorization_value(auth_id: &str, signature: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(format!("{auth_id}:{signature}"))
}
