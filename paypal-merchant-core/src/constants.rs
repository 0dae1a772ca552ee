//! Wire constants shared with the PayPal service.
//!
//! Header names and endpoint URLs must match the service byte for byte.

/// API username header.
pub const PAYPAL_SECURITY_USERID_HEADER: &str = "X-PAYPAL-SECURITY-USERID";

/// API password header.
pub const PAYPAL_SECURITY_PASSWORD_HEADER: &str = "X-PAYPAL-SECURITY-PASSWORD";

/// API signature header (signature credentials only).
pub const PAYPAL_SECURITY_SIGNATURE_HEADER: &str = "X-PAYPAL-SECURITY-SIGNATURE";

/// Request payload format header.
pub const PAYPAL_REQUEST_DATA_FORMAT_HEADER: &str = "X-PAYPAL-REQUEST-DATA-FORMAT";

/// Response payload format header.
pub const PAYPAL_RESPONSE_DATA_FORMAT_HEADER: &str = "X-PAYPAL-RESPONSE-DATA-FORMAT";

/// SDK identification header.
pub const PAYPAL_REQUEST_SOURCE_HEADER: &str = "X-PAYPAL-REQUEST-SOURCE";

/// Delegated (third-party token) authorization header.
pub const PAYPAL_AUTHORIZATION_MERCHANT_HEADER: &str = "X-PP-AUTHORIZATION";

/// Data format tag for SOAP calls.
pub const SOAP: &str = "SOAP";

/// Headers whose values are credential material.
pub const SENSITIVE_HEADERS: &[&str] = &[
    PAYPAL_SECURITY_PASSWORD_HEADER,
    PAYPAL_SECURITY_SIGNATURE_HEADER,
    PAYPAL_AUTHORIZATION_MERCHANT_HEADER,
];

/// Signature credentials against the production service.
pub const MERCHANT_SIGNATURE_LIVE_ENDPOINT: &str = "https://api-3t.paypal.com/2.0";

/// Signature credentials against the sandbox.
pub const MERCHANT_SIGNATURE_SANDBOX_ENDPOINT: &str = "https://api-3t.sandbox.paypal.com/2.0";

/// Certificate credentials against the production service.
pub const MERCHANT_CERTIFICATE_LIVE_ENDPOINT: &str = "https://api.paypal.com/2.0";

/// Certificate credentials against the sandbox.
pub const MERCHANT_CERTIFICATE_SANDBOX_ENDPOINT: &str = "https://api.sandbox.paypal.com/2.0";

/// Default value reported in the SDK identification header.
pub const DEFAULT_SDK_NAME: &str = "paypal-merchant-sdk-rust";

/// Version reported in the SDK identification header.
pub const DEFAULT_SDK_VERSION: &str = env!("CARGO_PKG_VERSION");
