//! API credentials.
//!
//! This module provides:
//! - [`Credential`] - Tagged union over the two authentication schemes
//! - [`SignatureCredential`] - Username, password and API signature
//! - [`CertificateCredential`] - Username, password and an API certificate
//! - [`CredentialError`] - Missing or invalid credential errors
//!
//! Credentials are built once per call and never mutated afterwards. Both
//! variants can carry a [`SubjectAuthorization`] and a [`TokenAuthorization`];
//! the two are independent.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::secret::Secret;
use crate::token::{SubjectAuthorization, TokenAuthorization};

/// A credential field checked during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    Username,
    Password,
    Signature,
    Certificate,
    PrivateKeyPassword,
}

impl CredentialField {
    /// Human-readable message reported when the field is empty.
    pub fn empty_message(&self) -> &'static str {
        match self {
            Self::Username => "API Username is Empty",
            Self::Password => "API Password is Empty",
            Self::Signature => "API Signature is Empty",
            Self::Certificate => "Certificate is Empty",
            Self::PrivateKeyPassword => "Private Key Password is null or Empty",
        }
    }
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Username => "username",
            Self::Password => "password",
            Self::Signature => "signature",
            Self::Certificate => "certificate",
            Self::PrivateKeyPassword => "private key password",
        };
        write!(f, "{}", name)
    }
}

/// Error type for credential resolution.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// No account matches the requested username.
    #[error("Missing credentials for {}", .username.as_deref().unwrap_or("default account"))]
    Missing { username: Option<String> },

    /// A required field is empty for the selected variant.
    #[error("{}", .field.empty_message())]
    Invalid { field: CredentialField },
}

/// Which authentication scheme a credential uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKind {
    Signature,
    Certificate,
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Signature => write!(f, "signature"),
            Self::Certificate => write!(f, "certificate"),
        }
    }
}

/// Signature-based API credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureCredential {
    username: String,
    password: Secret,
    signature: Secret,
    application_id: Option<String>,
    subject_authorization: Option<SubjectAuthorization>,
    token_authorization: Option<TokenAuthorization>,
}

impl SignatureCredential {
    /// Create a signature credential.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<Secret>,
        signature: impl Into<Secret>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            signature: signature.into(),
            application_id: None,
            subject_authorization: None,
            token_authorization: None,
        }
    }

    pub fn with_application_id(mut self, application_id: Option<String>) -> Self {
        self.application_id = application_id;
        self
    }

    pub fn with_subject_authorization(mut self, subject: SubjectAuthorization) -> Self {
        self.subject_authorization = Some(subject);
        self
    }

    pub fn with_token_authorization(mut self, token: TokenAuthorization) -> Self {
        self.token_authorization = Some(token);
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &Secret {
        &self.password
    }

    pub fn signature(&self) -> &Secret {
        &self.signature
    }
}

/// Certificate-based API credential.
///
/// The certificate file is a PKCS#12 bundle whose private key is protected by
/// `private_key_password`. It is presented by the transport during the TLS
/// handshake rather than embedded in the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateCredential {
    username: String,
    password: Secret,
    certificate_file: PathBuf,
    private_key_password: Secret,
    application_id: Option<String>,
    subject_authorization: Option<SubjectAuthorization>,
    token_authorization: Option<TokenAuthorization>,
}

impl CertificateCredential {
    /// Create a certificate credential.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<Secret>,
        certificate_file: impl Into<PathBuf>,
        private_key_password: impl Into<Secret>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            certificate_file: certificate_file.into(),
            private_key_password: private_key_password.into(),
            application_id: None,
            subject_authorization: None,
            token_authorization: None,
        }
    }

    pub fn with_application_id(mut self, application_id: Option<String>) -> Self {
        self.application_id = application_id;
        self
    }

    pub fn with_subject_authorization(mut self, subject: SubjectAuthorization) -> Self {
        self.subject_authorization = Some(subject);
        self
    }

    pub fn with_token_authorization(mut self, token: TokenAuthorization) -> Self {
        self.token_authorization = Some(token);
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &Secret {
        &self.password
    }

    pub fn certificate_file(&self) -> &Path {
        &self.certificate_file
    }

    pub fn private_key_password(&self) -> &Secret {
        &self.private_key_password
    }
}

/// A resolved API credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    Signature(SignatureCredential),
    Certificate(CertificateCredential),
}

impl Credential {
    /// The authentication scheme of this credential.
    pub fn kind(&self) -> CredentialKind {
        match self {
            Self::Signature(_) => CredentialKind::Signature,
            Self::Certificate(_) => CredentialKind::Certificate,
        }
    }

    pub fn username(&self) -> &str {
        match self {
            Self::Signature(c) => &c.username,
            Self::Certificate(c) => &c.username,
        }
    }

    pub fn password(&self) -> &Secret {
        match self {
            Self::Signature(c) => &c.password,
            Self::Certificate(c) => &c.password,
        }
    }

    pub fn application_id(&self) -> Option<&str> {
        match self {
            Self::Signature(c) => c.application_id.as_deref(),
            Self::Certificate(c) => c.application_id.as_deref(),
        }
    }

    pub fn subject_authorization(&self) -> Option<&SubjectAuthorization> {
        match self {
            Self::Signature(c) => c.subject_authorization.as_ref(),
            Self::Certificate(c) => c.subject_authorization.as_ref(),
        }
    }

    pub fn token_authorization(&self) -> Option<&TokenAuthorization> {
        match self {
            Self::Signature(c) => c.token_authorization.as_ref(),
            Self::Certificate(c) => c.token_authorization.as_ref(),
        }
    }

    /// Attach a token authorization, consuming the credential.
    pub fn with_token_authorization(self, token: TokenAuthorization) -> Self {
        match self {
            Self::Signature(c) => Self::Signature(c.with_token_authorization(token)),
            Self::Certificate(c) => Self::Certificate(c.with_token_authorization(token)),
        }
    }
}

impl From<SignatureCredential> for Credential {
    fn from(c: SignatureCredential) -> Self {
        Self::Signature(c)
    }
}

impl From<CertificateCredential> for Credential {
    fn from(c: CertificateCredential) -> Self {
        Self::Certificate(c)
    }
}
