//! Delegated (third-party) request signing.
//!
//! This module provides:
//! - [`signature`] - OAuth 1.0 HMAC-SHA1 signature generation
//! - [`clock`] - Injectable time sources
//! - [`sign_delegated_request`] - Builds the `X-PP-AUTHORIZATION` header for a
//!   call made with a [`TokenAuthorization`]

pub mod clock;
pub mod signature;

pub use clock::{Clock, FixedClock, SystemClock};
pub use signature::OAuthSignature;

use std::collections::HashMap;
use thiserror::Error;

use crate::constants::PAYPAL_AUTHORIZATION_MERCHANT_HEADER;
use crate::secret::Secret;
use crate::token::TokenAuthorization;

/// Error type for request signing.
#[derive(Debug, Error)]
pub enum SigningError {
    /// A value required for signing is missing or empty.
    #[error("missing signing parameter: {name}")]
    MissingParameter { name: &'static str },

    /// The request URI cannot be parsed.
    #[error("invalid request URI {uri}: {message}")]
    InvalidUri { uri: String, message: String },

    /// The HMAC implementation rejected the signing key.
    #[error("invalid signing key")]
    InvalidKey,
}

/// Sign a call made on behalf of a third party.
///
/// The signature covers `POST`, the endpoint URL, the access token and a
/// timestamp read once from `clock`. Returns a map holding exactly one
/// header:
///
/// ```text
/// X-PP-AUTHORIZATION: token=<access token>,signature=<signature>,timestamp=<timestamp>
/// ```
pub fn sign_delegated_request(
    username: &str,
    password: &Secret,
    token: &TokenAuthorization,
    endpoint: &str,
    clock: &dyn Clock,
) -> Result<HashMap<String, String>, SigningError> {
    let timestamp = clock.now_unix();

    let signature = OAuthSignature::new(username, password.clone())
        .with_token(token.access_token.clone())
        .with_token_secret(token.token_secret.clone())
        .with_timestamp(timestamp)
        .with_request_uri(endpoint)
        .compute()?;

    tracing::debug!(timestamp, uri = endpoint, "computed delegated authorization signature");

    let authorization = format!(
        "token={},signature={},timestamp={}",
        token.access_token, signature, timestamp
    );

    let mut headers = HashMap::with_capacity(1);
    headers.insert(PAYPAL_AUTHORIZATION_MERCHANT_HEADER.to_string(), authorization);
    Ok(headers)
}
