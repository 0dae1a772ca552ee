//! # PayPal Merchant Core
//!
//! Credential resolution and SOAP call assembly for PayPal's Merchant APIs.
//!
//! This crate provides:
//! - A flat, ordered configuration map and TOML loader
//! - Account lookup over `account<N>.*` configuration keys
//! - Signature and certificate credentials with deterministic validation
//! - OAuth-style signing for calls made on behalf of a third party
//! - Assembly of headers, SOAP envelope and endpoint URL for a call
//! - (optionally) an HTTP transport that dispatches the assembled call
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use paypal_merchant_core::{ConfigMap, CredentialManager, MerchantCallHandler};
//!
//! fn prepare(body: &str) -> Result<(), paypal_merchant_core::MerchantError> {
//!     let config = ConfigMap::load()?;
//!     let credential = CredentialManager::new().get_credentials(&config, None)?;
//!     let call = MerchantCallHandler::new(&config, &credential, body).prepare()?;
//!     println!("POST {}", call.endpoint);
//!     Ok(())
//! }
//! ```

pub mod account_store;
pub mod config;
pub mod constants;
pub mod credential;
pub mod credential_manager;
pub mod error;
pub mod model;
pub mod oauth;
pub mod secret;
pub mod soap;
pub mod token;
pub mod validate;

#[cfg(feature = "http")]
pub mod transport;

// Re-export commonly used types at crate root
pub use account_store::AccountStore;

pub use config::{
    ConfigError,
    ConfigMap,
    Mode,
};

pub use credential::{
    CertificateCredential,
    Credential,
    CredentialError,
    CredentialField,
    CredentialKind,
    SignatureCredential,
};

pub use credential_manager::CredentialManager;

pub use error::MerchantError;

pub use model::Account;

pub use oauth::{
    Clock,
    FixedClock,
    SigningError,
    SystemClock,
    sign_delegated_request,
};

pub use secret::Secret;

pub use soap::{
    ClientCertificate,
    MerchantCallHandler,
    PreparedCall,
};

pub use token::{
    SubjectAuthorization,
    TokenAuthorization,
};

pub use validate::validate;

#[cfg(feature = "http")]
pub use transport::{
    HttpTransport,
    Transport,
    TransportError,
};
