//! OAuth 1.0a request signing (HMAC-SHA1, user context).
//!
//! Only what `POST /2/tweets` needs: a JSON body, so no body parameters take
//! part in the signature, and no query string on the endpoint.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use fnshop_core::TwitterCredentials;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::distr::Alphanumeric;
use rand::Rng;
use sha1::Sha1;

use crate::error::SocialError;

/// RFC 3986 unreserved characters stay literal; everything else is encoded.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const NONCE_LEN: usize = 32;

pub(crate) fn encode(value: &str) -> String {
    utf8_percent_encode(value, OAUTH_ENCODE_SET).to_string()
}

/// Random alphanumeric nonce.
#[must_use]
pub fn generate_nonce() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

/// `METHOD&encoded-url&encoded-sorted-params`.
pub(crate) fn signature_base_string(method: &str, url: &str, params: &[(&str, &str)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (encode(k), encode(v)))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        encode(url),
        encode(&param_string)
    )
}

/// Base64 HMAC-SHA1 of `base` keyed with `consumer_secret&token_secret`.
pub(crate) fn sign(
    base: &str,
    consumer_secret: &str,
    token_secret: &str,
) -> Result<String, SocialError> {
    let key = format!("{}&{}", encode(consumer_secret), encode(token_secret));
    let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())
        .map_err(|e| SocialError::Signing(e.to_string()))?;
    mac.update(base.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Builds the `Authorization: OAuth ...` header value for one request.
///
/// `nonce` and `timestamp` are parameters so the header is reproducible in
/// tests; callers normally pass [`generate_nonce`] and the current Unix time.
///
/// # Errors
///
/// Returns [`SocialError::Signing`] if the HMAC key is rejected.
pub fn authorization_header(
    credentials: &TwitterCredentials,
    method: &str,
    url: &str,
    nonce: &str,
    timestamp: i64,
) -> Result<String, SocialError> {
    let timestamp = timestamp.to_string();
    let oauth_params = [
        ("oauth_consumer_key", credentials.api_key.as_str()),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", timestamp.as_str()),
        ("oauth_token", credentials.access_token.as_str()),
        ("oauth_version", "1.0"),
    ];

    let base = signature_base_string(method, url, &oauth_params);
    let signature = sign(&base, &credentials.api_secret, &credentials.access_secret)?;

    let mut fields: Vec<String> = oauth_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
        .collect();
    fields.push(format!("oauth_signature=\"{}\"", encode(&signature)));
    fields.sort();

    Ok(format!("OAuth {}", fields.join(", ")))
}
