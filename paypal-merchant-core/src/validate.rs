//! Required-field checks for resolved credentials.
//!
//! Fields are checked in a fixed order so the reported field is always the
//! first empty one:
//!
//! - signature: username, password, signature
//! - certificate: username, password, certificate, private key password

use crate::credential::{CertificateCredential, Credential, CredentialError, CredentialField, SignatureCredential};

/// Validate a credential.
pub fn validate(credential: &Credential) -> Result<(), CredentialError> {
    match credential {
        Credential::Signature(c) => validate_signature(c),
        Credential::Certificate(c) => validate_certificate(c),
    }
}

fn validate_signature(credential: &SignatureCredential) -> Result<(), CredentialError> {
    require(!credential.username().is_empty(), CredentialField::Username)?;
    require(!credential.password().is_empty(), CredentialField::Password)?;
    require(!credential.signature().is_empty(), CredentialField::Signature)
}

fn validate_certificate(credential: &CertificateCredential) -> Result<(), CredentialError> {
    require(!credential.username().is_empty(), CredentialField::Username)?;
    require(!credential.password().is_empty(), CredentialField::Password)?;
    require(
        !credential.certificate_file().as_os_str().is_empty(),
        CredentialField::Certificate,
    )?;
    require(
        !credential.private_key_password().is_empty(),
        CredentialField::PrivateKeyPassword,
    )
}

fn require(present: bool, field: CredentialField) -> Result<(), CredentialError> {
    if present {
        Ok(())
    } else {
        Err(CredentialError::Invalid { field })
    }
}
