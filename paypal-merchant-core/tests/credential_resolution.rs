//! Integration tests for credential resolution.
//!
//! These tests verify the path from flat configuration to a validated
//! credential:
//! - Account selection by username and by configuration order
//! - Signature vs. certificate variant selection
//! - Validation order and error messages
//! - Loading accounts from a TOML file

use paypal_merchant_core::{
    ConfigMap, Credential, CredentialError, CredentialField, CredentialKind, CredentialManager,
};
use tempfile::TempDir;

const API_USERNAME: &str = "jb-us-seller_api1.paypal.com";
const API_PASSWORD: &str = "WX4WTU3S8MY44S7F";
const API_SIGNATURE: &str = "AFcWxV21C7fd0v3bYYYRCpSSRl31A7yDhhsPUU2XhtMoZXsWHFxu-RWy";
const APPLICATION_ID: &str = "APP-80W284485P519543T";
const CERT_API_USERNAME: &str = "certuser_biz_api1.paypal.com";
const CERT_API_PASSWORD: &str = "D6JNKKULHN3G5B8A";
const CERT_PATH: &str = "resource/sdk-cert.p12";
const CERT_PASSWORD: &str = "password";

/// Helper building the two-account configuration used across tests.
fn account_config() -> ConfigMap {
    ConfigMap::from_pairs([
        ("account1.apiUsername", API_USERNAME),
        ("account1.apiPassword", API_PASSWORD),
        ("account1.applicationId", APPLICATION_ID),
        ("account1.apiSignature", API_SIGNATURE),
        ("account2.apiUsername", CERT_API_USERNAME),
        ("account2.apiPassword", CERT_API_PASSWORD),
        ("account2.applicationId", APPLICATION_ID),
        ("account2.apiCertificate", CERT_PATH),
        ("account2.privateKeyPassword", CERT_PASSWORD),
    ])
}

#[test]
fn test_signature_credential_resolution() {
    let credential = CredentialManager::new()
        .get_credentials(&account_config(), Some(API_USERNAME))
        .unwrap();

    match credential {
        Credential::Signature(c) => {
            assert_eq!(c.username(), API_USERNAME);
            assert_eq!(c.password().expose(), API_PASSWORD);
            assert_eq!(c.signature().expose(), API_SIGNATURE);
        }
        other => panic!("expected signature credential, got {:?}", other),
    }
}

#[test]
fn test_certificate_credential_resolution() {
    let credential = CredentialManager::new()
        .get_credentials(&account_config(), Some(CERT_API_USERNAME))
        .unwrap();

    assert_eq!(credential.application_id(), Some(APPLICATION_ID));
    match credential {
        Credential::Certificate(c) => {
            assert_eq!(c.username(), CERT_API_USERNAME);
            assert_eq!(c.certificate_file().to_str(), Some(CERT_PATH));
            assert_eq!(c.private_key_password().expose(), CERT_PASSWORD);
        }
        other => panic!("expected certificate credential, got {:?}", other),
    }
}

#[test]
fn test_default_account_is_first_configured() {
    let credential = CredentialManager::new()
        .get_credentials(&account_config(), None)
        .unwrap();
    assert_eq!(credential.username(), API_USERNAME);
}

#[test]
fn test_certificate_wins_over_signature() {
    let config = ConfigMap::from_pairs([
        ("account1.apiUsername", "both"),
        ("account1.apiPassword", "pw"),
        ("account1.apiSignature", "sig"),
        ("account1.apiCertificate", "cert.p12"),
        ("account1.privateKeyPassword", "keypw"),
    ]);
    let credential = CredentialManager::new().get_credentials(&config, None).unwrap();
    assert_eq!(credential.kind(), CredentialKind::Certificate);
}

#[test]
fn test_no_accounts_is_missing_credential() {
    let config = ConfigMap::from_pairs([("mode", "sandbox")]);
    let result = CredentialManager::new().get_credentials(&config, Some(API_USERNAME));

    let err = result.unwrap_err();
    assert!(matches!(err, CredentialError::Missing { .. }));
    assert_eq!(err.to_string(), format!("Missing credentials for {}", API_USERNAME));
}

#[test]
fn test_empty_username_and_password_reports_username() {
    let config = ConfigMap::from_pairs([
        ("account1.apiUsername", ""),
        ("account1.apiPassword", ""),
        ("account1.apiSignature", "sig"),
    ]);
    let err = CredentialManager::new()
        .get_credentials(&config, None)
        .unwrap_err();

    assert!(matches!(
        err,
        CredentialError::Invalid {
            field: CredentialField::Username
        }
    ));
    assert_eq!(err.to_string(), "API Username is Empty");
}

#[test]
fn test_certificate_without_key_password_fails() {
    let config = ConfigMap::from_pairs([
        ("account1.apiUsername", "user"),
        ("account1.apiPassword", "pw"),
        ("account1.apiCertificate", "cert.p12"),
    ]);
    let err = CredentialManager::new()
        .get_credentials(&config, None)
        .unwrap_err();
    assert_eq!(err.to_string(), "Private Key Password is null or Empty");
}

#[test]
fn test_resolution_is_repeatable() {
    let config = account_config();
    let manager = CredentialManager::new();

    let first = manager.get_credentials(&config, Some(CERT_API_USERNAME)).unwrap();
    let second = manager.get_credentials(&config, Some(CERT_API_USERNAME)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_resolution_from_toml_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("sdk_config.toml");
    std::fs::write(
        &path,
        format!(
            r#"
mode = "sandbox"

[account1]
apiUsername = "{API_USERNAME}"
apiPassword = "{API_PASSWORD}"
apiSignature = "{API_SIGNATURE}"
subject = "buyer@example.com"
"#
        ),
    )
    .unwrap();

    let config = ConfigMap::load_from_path(&path).unwrap();
    let credential = CredentialManager::new().get_credentials(&config, None).unwrap();

    assert_eq!(credential.kind(), CredentialKind::Signature);
    assert_eq!(
        credential.subject_authorization().map(|s| s.subject()),
        Some("buyer@example.com")
    );
}

#[test]
fn test_zero_padded_account_index_resolves_fully() {
    let config = ConfigMap::from_pairs([
        ("account01.apiUsername", "zero"),
        ("account01.apiPassword", "pw"),
        ("account01.apiSignature", "sig"),
    ]);
    let credential = CredentialManager::new()
        .get_credentials(&config, Some("zero"))
        .unwrap();

    match credential {
        Credential::Signature(c) => {
            assert_eq!(c.username(), "zero");
            assert_eq!(c.password().expose(), "pw");
            assert_eq!(c.signature().expose(), "sig");
        }
        other => panic!("expected signature credential, got {:?}", other),
    }
}
