//! Redacting wrapper for credential material.
//!
//! API passwords, API signatures, private-key passwords and token secrets
//! are all held as [`Secret`]. A credential can then be `Debug`-printed or
//! attached to a tracing span without leaking what the account
//! authenticates with.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// One piece of account credential material.
///
/// Formatting prints `[REDACTED]`; the value itself is reachable only through
/// [`expose`](Secret::expose), which is what the SOAP header, the HTTP
/// headers and the signing key read. The buffer is wiped on drop.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The plain value, for placing on the wire.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether nothing was configured. Validation rejects empty credentials.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret([REDACTED])")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

// Two credentials resolved from the same account compare equal.
impl PartialEq for Secret {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Secret {}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatting_hides_api_password() {
        let password = Secret::new("WX4WTU3S8MY44S7F");
        assert_eq!(format!("{:?}", password), "Secret([REDACTED])");
        assert_eq!(password.to_string(), "[REDACTED]");
        assert_eq!(password.expose(), "WX4WTU3S8MY44S7F");
    }

    #[test]
    fn test_unconfigured_secret_is_empty() {
        assert!(Secret::default().is_empty());
        assert!(Secret::from(String::new()).is_empty());
        assert!(!Secret::from("sig").is_empty());
    }

    #[test]
    fn test_equality_compares_values() {
        assert_eq!(Secret::from("pw"), Secret::new("pw".to_string()));
        assert_ne!(Secret::from("pw"), Secret::from("other"));
    }
}
