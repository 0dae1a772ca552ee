//! Domain model types.
//!
//! - [`Account`] - One `account<N>.*` block read from configuration
//! - [`AccountField`] - The recognized per-account configuration keys

use std::fmt;

use crate::secret::Secret;

/// Prefix shared by every per-account configuration key.
pub const ACCOUNT_PREFIX: &str = "account";

/// Per-account configuration fields.
///
/// Each field is stored under `account<N>.<key>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountField {
    ApiUsername,
    ApiPassword,
    ApiSignature,
    ApiCertificate,
    PrivateKeyPassword,
    Subject,
    ApplicationId,
}

impl AccountField {
    /// The configuration key suffix for this field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiUsername => "apiUsername",
            Self::ApiPassword => "apiPassword",
            Self::ApiSignature => "apiSignature",
            Self::ApiCertificate => "apiCertificate",
            Self::PrivateKeyPassword => "privateKeyPassword",
            Self::Subject => "subject",
            Self::ApplicationId => "applicationId",
        }
    }

    /// Full configuration key for the account at `index`.
    ///
    /// `index` is the digit text exactly as it appears in the configuration,
    /// so `"01"` and `"1"` name different accounts.
    ///
    /// # Examples
    ///
    /// ```
    /// use paypal_merchant_core::model::AccountField;
    ///
    /// assert_eq!(AccountField::ApiPassword.key("3"), "account3.apiPassword");
    /// ```
    pub fn key(&self, index: &str) -> String {
        format!("{}{}.{}", ACCOUNT_PREFIX, index, self.as_str())
    }
}

impl fmt::Display for AccountField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// API account read from configuration.
///
/// Fields other than the username are optional at this stage; whether the
/// account is usable is decided once it has been turned into a
/// [`Credential`](crate::credential::Credential) and validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// The `N` in `account<N>.*`, as written in the configuration.
    pub index: String,

    /// API username.
    pub api_username: String,

    /// API password.
    pub api_password: Option<Secret>,

    /// API signature (signature-based authentication).
    pub api_signature: Option<Secret>,

    /// Path to the API certificate (certificate-based authentication).
    pub api_certificate: Option<String>,

    /// Password protecting the certificate's private key.
    pub private_key_password: Option<Secret>,

    /// Third-party subject the calls are made on behalf of.
    pub subject: Option<String>,

    /// Application ID.
    pub application_id: Option<String>,
}

impl Account {
    /// Create an account with only a username set.
    pub fn new(index: impl Into<String>, api_username: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            api_username: api_username.into(),
            api_password: None,
            api_signature: None,
            api_certificate: None,
            private_key_password: None,
            subject: None,
            application_id: None,
        }
    }

    /// Whether a non-empty certificate path is configured.
    pub fn uses_certificate(&self) -> bool {
        self.api_certificate
            .as_deref()
            .is_some_and(|path| !path.is_empty())
    }
}
