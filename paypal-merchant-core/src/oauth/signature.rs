//! OAuth 1.0 HMAC-SHA1 signature generation.
//!
//! PayPal's Permissions service hands a third party an access token and a
//! token secret. Calls made with that grant carry a signature computed the
//! OAuth 1.0 way, keyed by the API password and the token secret:
//!
//! ```text
//! base = POST & enc(normalized-uri) & enc(sorted-parameters)
//! key  = enc(api-password) & enc(token-secret)
//! sig  = base64(hmac-sha1(key, base))
//! ```
//!
//! Encoding follows RFC 3986: `A-Z a-z 0-9 - . _ ~` pass through, every other
//! byte becomes upper-case `%XX`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use url::{Url, form_urlencoded};

use super::SigningError;
use crate::secret::Secret;

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

// Merchant API calls are always POSTed.
const HTTP_METHOD: &str = "POST";

/// Builder for a single OAuth signature.
///
/// # Example
///
/// ```
/// use paypal_merchant_core::oauth::OAuthSignature;
///
/// let signature = OAuthSignature::new("api_username", "api_password")
///     .with_token("access-token")
///     .with_token_secret("token-secret")
///     .with_timestamp(1_700_000_000)
///     .with_request_uri("https://api-3t.sandbox.paypal.com/2.0")
///     .compute()
///     .unwrap();
/// assert!(!signature.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct OAuthSignature {
    consumer_key: String,
    consumer_secret: Secret,
    token: Option<String>,
    token_secret: Option<Secret>,
    timestamp: Option<i64>,
    request_uri: Option<String>,
}

impl OAuthSignature {
    /// Start a signature keyed by the API username and password.
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<Secret>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token: None,
            token_secret: None,
            timestamp: None,
            request_uri: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_token_secret(mut self, token_secret: impl Into<Secret>) -> Self {
        self.token_secret = Some(token_secret.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_request_uri(mut self, uri: impl Into<String>) -> Self {
        self.request_uri = Some(uri.into());
        self
    }

    /// The signature base string.
    pub fn base_string(&self) -> Result<String, SigningError> {
        if self.consumer_key.is_empty() {
            return Err(SigningError::MissingParameter {
                name: "consumer key",
            });
        }
        let token = non_empty(self.token.as_deref(), "token")?;
        let timestamp = self
            .timestamp
            .ok_or(SigningError::MissingParameter { name: "timestamp" })?;
        let uri = non_empty(self.request_uri.as_deref(), "request URI")?;

        let (normalized_uri, query) = normalize_uri(uri)?;

        let timestamp = timestamp.to_string();
        let mut params: Vec<(String, String)> = [
            ("oauth_consumer_key", self.consumer_key.as_str()),
            ("oauth_signature_method", SIGNATURE_METHOD),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_token", token),
            ("oauth_version", OAUTH_VERSION),
        ]
        .into_iter()
        .map(|(k, v)| (encode(k), encode(v)))
        .chain(query.iter().map(|(k, v)| (encode(k), encode(v))))
        .collect();
        params.sort();

        let param_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        Ok(format!(
            "{}&{}&{}",
            HTTP_METHOD,
            encode(&normalized_uri),
            encode(&param_string)
        ))
    }

    /// Compute the Base64-encoded HMAC-SHA1 signature.
    pub fn compute(&self) -> Result<String, SigningError> {
        if self.consumer_secret.is_empty() {
            return Err(SigningError::MissingParameter {
                name: "consumer secret",
            });
        }
        let token_secret = self
            .token_secret
            .as_ref()
            .filter(|s| !s.is_empty())
            .ok_or(SigningError::MissingParameter {
                name: "token secret",
            })?;

        let base = self.base_string()?;
        let key = format!(
            "{}&{}",
            encode(self.consumer_secret.expose()),
            encode(token_secret.expose())
        );

        let mut mac =
            HmacSha1::new_from_slice(key.as_bytes()).map_err(|_| SigningError::InvalidKey)?;
        mac.update(base.as_bytes());
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

fn non_empty<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, SigningError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(SigningError::MissingParameter { name })
}

/// Percent-encode a value per RFC 3986.
pub(crate) fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
        .replace('*', "%2A")
        .replace("%7E", "~")
}

/// Lower-case scheme and host, drop the default port and the query.
///
/// Query pairs are returned separately so they can join the signed
/// parameters.
fn normalize_uri(uri: &str) -> Result<(String, Vec<(String, String)>), SigningError> {
    let url = Url::parse(uri).map_err(|e| SigningError::InvalidUri {
        uri: uri.to_string(),
        message: e.to_string(),
    })?;
    let host = url.host_str().ok_or_else(|| SigningError::InvalidUri {
        uri: uri.to_string(),
        message: "missing host".to_string(),
    })?;

    let mut normalized = format!("{}://{}", url.scheme(), host);
    // `port()` is None when the port is the scheme default
    if let Some(port) = url.port() {
        normalized.push_str(&format!(":{}", port));
    }
    normalized.push_str(url.path());

    let query = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    Ok((normalized, query))
}
