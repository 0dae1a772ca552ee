//! Third-party authorization attached to a credential.
//!
//! Two independent delegates exist:
//! - [`SubjectAuthorization`] - calls made on behalf of another account,
//!   identified only by its email or payer id. Travels in the SOAP header.
//! - [`TokenAuthorization`] - calls made with an access token granted through
//!   the Permissions service. Produces a signed `X-PP-AUTHORIZATION` header.

use crate::secret::Secret;

/// Subject-based third-party authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectAuthorization {
    subject: String,
}

impl SubjectAuthorization {
    /// Create a subject authorization.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }

    /// The subject (third-party email or payer id).
    pub fn subject(&self) -> &str {
        &self.subject
    }
}

/// Token-based third-party authorization.
///
/// Holds the access token and token secret a third party granted to the API
/// caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAuthorization {
    /// Access token.
    pub access_token: String,

    /// Token secret used as part of the signing key.
    pub token_secret: Secret,
}

impl TokenAuthorization {
    /// Create a token authorization.
    pub fn new(access_token: impl Into<String>, token_secret: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_secret: Secret::new(token_secret),
        }
    }
}
