//! Credential resolution.
//!
//! [`CredentialManager`] turns flat configuration plus an optional API
//! username into a validated [`Credential`]:
//!
//! 1. [`AccountStore`] picks the `account<N>` block
//! 2. the account becomes a certificate credential when it names a
//!    certificate file, otherwise a signature credential
//! 3. a configured `subject` becomes a [`SubjectAuthorization`]
//! 4. the credential is validated before it is handed out
//!
//! # Example
//!
//! ```
//! use paypal_merchant_core::{ConfigMap, CredentialKind, CredentialManager};
//!
//! let config = ConfigMap::from_pairs([
//!     ("account1.apiUsername", "seller_api1.example.com"),
//!     ("account1.apiPassword", "WX4WTU3S8MY44S7F"),
//!     ("account1.apiSignature", "AFcWxV21C7fd0v3bYYYRCpSSRl31A7yDhhsPUU2XhtMoZXsWHFxu-RWy"),
//! ]);
//!
//! let credential = CredentialManager::new()
//!     .get_credentials(&config, Some("seller_api1.example.com"))
//!     .unwrap();
//! assert_eq!(credential.kind(), CredentialKind::Signature);
//! ```

use crate::account_store::AccountStore;
use crate::config::ConfigMap;
use crate::credential::{CertificateCredential, Credential, CredentialError, SignatureCredential};
use crate::model::Account;
use crate::token::SubjectAuthorization;
use crate::validate::validate;

/// Stateless credential factory.
///
/// Holds no per-call data, so a single instance can be shared freely across
/// threads or created on demand.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialManager;

impl CredentialManager {
    pub fn new() -> Self {
        Self
    }

    /// Resolve and validate the credential for `api_username`.
    ///
    /// With `None`, the first configured account is used.
    pub fn get_credentials(
        &self,
        config: &ConfigMap,
        api_username: Option<&str>,
    ) -> Result<Credential, CredentialError> {
        let account = AccountStore::resolve_account(config, api_username).ok_or_else(|| {
            CredentialError::Missing {
                username: api_username.map(str::to_string),
            }
        })?;

        let credential = self.build_credential(&account);
        validate(&credential)?;

        tracing::debug!(
            index = %account.index,
            kind = %credential.kind(),
            "resolved API credential"
        );
        Ok(credential)
    }

    /// Build an unvalidated credential from an account.
    ///
    /// A non-empty certificate path always selects the certificate variant,
    /// even when a signature is configured as well.
    pub fn build_credential(&self, account: &Account) -> Credential {
        let password = account.api_password.clone().unwrap_or_default();
        let subject = account
            .subject
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(SubjectAuthorization::new);

        if account.uses_certificate() {
            let mut credential = CertificateCredential::new(
                account.api_username.clone(),
                password,
                account.api_certificate.clone().unwrap_or_default(),
                account.private_key_password.clone().unwrap_or_default(),
            )
            .with_application_id(account.application_id.clone());
            if let Some(subject) = subject {
                credential = credential.with_subject_authorization(subject);
            }
            Credential::Certificate(credential)
        } else {
            let mut credential = SignatureCredential::new(
                account.api_username.clone(),
                password,
                account.api_signature.clone().unwrap_or_default(),
            )
            .with_application_id(account.application_id.clone());
            if let Some(subject) = subject {
                credential = credential.with_subject_authorization(subject);
            }
            Credential::Signature(credential)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::{CredentialField, CredentialKind};
    use crate::secret::Secret;

    #[test]
    fn test_certificate_takes_precedence_over_signature() {
        let mut account = Account::new("1", "user");
        account.api_password = Some(Secret::new("pass"));
        account.api_signature = Some(Secret::new("sig"));
        account.api_certificate = Some("cert.p12".to_string());
        account.private_key_password = Some(Secret::new("keypw"));

        let credential = CredentialManager::new().build_credential(&account);
        assert_eq!(credential.kind(), CredentialKind::Certificate);
    }

    #[test]
    fn test_empty_certificate_path_selects_signature() {
        let mut account = Account::new("1", "user");
        account.api_signature = Some(Secret::new("sig"));
        account.api_certificate = Some(String::new());

        let credential = CredentialManager::new().build_credential(&account);
        assert_eq!(credential.kind(), CredentialKind::Signature);
    }

    #[test]
    fn test_subject_attached_to_both_variants() {
        let mut account = Account::new("1", "user");
        account.subject = Some("buyer@example.com".to_string());

        let credential = CredentialManager::new().build_credential(&account);
        assert_eq!(
            credential.subject_authorization().map(|s| s.subject()),
            Some("buyer@example.com")
        );

        account.api_certificate = Some("cert.p12".to_string());
        let credential = CredentialManager::new().build_credential(&account);
        assert_eq!(credential.kind(), CredentialKind::Certificate);
        assert!(credential.subject_authorization().is_some());
    }

    #[test]
    fn test_empty_subject_is_ignored() {
        let mut account = Account::new("1", "user");
        account.subject = Some(String::new());

        let credential = CredentialManager::new().build_credential(&account);
        assert!(credential.subject_authorization().is_none());
    }

    #[test]
    fn test_application_id_copied() {
        let mut account = Account::new("1", "user");
        account.application_id = Some("APP-80W284485P519543T".to_string());

        let credential = CredentialManager::new().build_credential(&account);
        assert_eq!(credential.application_id(), Some("APP-80W284485P519543T"));
    }

    #[test]
    fn test_get_credentials_missing_account() {
        let result = CredentialManager::new().get_credentials(&ConfigMap::new(), Some("ghost"));
        match result {
            Err(CredentialError::Missing { username }) => {
                assert_eq!(username.as_deref(), Some("ghost"));
            }
            other => panic!("expected missing credential, got {:?}", other),
        }
    }

    #[test]
    fn test_get_credentials_validates() {
        let config = ConfigMap::from_pairs([
            ("account1.apiUsername", "user"),
            ("account1.apiPassword", "pass"),
        ]);
        let result = CredentialManager::new().get_credentials(&config, None);
        assert!(matches!(
            result,
            Err(CredentialError::Invalid {
                field: CredentialField::Signature
            })
        ));
    }
}
