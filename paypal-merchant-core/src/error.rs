//! Top-level error types.

use thiserror::Error;

use crate::config::ConfigError;
use crate::credential::CredentialError;
use crate::oauth::SigningError;

#[cfg(feature = "http")]
use crate::transport::TransportError;

/// Top-level error type encompassing all SDK errors.
#[derive(Debug, Error)]
pub enum MerchantError {
    /// Missing or invalid API credentials.
    #[error("credential error: {0}")]
    Credential(#[from] CredentialError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Delegated request signing failed.
    #[error(transparent)]
    Signing(#[from] SigningError),

    /// Dispatching the call failed.
    #[cfg(feature = "http")]
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}
