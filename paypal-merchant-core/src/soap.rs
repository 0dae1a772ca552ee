//! SOAP call assembly.
//!
//! [`MerchantCallHandler`] takes a resolved [`Credential`] and a raw request
//! body and produces everything a transport needs to dispatch the call:
//!
//! - the endpoint URL ([`resolve_endpoint`](MerchantCallHandler::resolve_endpoint))
//! - the HTTP headers ([`build_headers`](MerchantCallHandler::build_headers))
//! - the SOAP envelope ([`build_payload`](MerchantCallHandler::build_payload))
//!
//! No network I/O happens here.
//!
//! # Example
//!
//! ```
//! use paypal_merchant_core::{ConfigMap, CredentialManager, MerchantCallHandler};
//!
//! let config = ConfigMap::from_pairs([
//!     ("mode", "sandbox"),
//!     ("account1.apiUsername", "seller_api1.example.com"),
//!     ("account1.apiPassword", "WX4WTU3S8MY44S7F"),
//!     ("account1.apiSignature", "AFcWxV21C7fd0v3bYYYRCpSSRl31A7yDhhsPUU2XhtMoZXsWHFxu-RWy"),
//! ]);
//! let credential = CredentialManager::new().get_credentials(&config, None).unwrap();
//!
//! let call = MerchantCallHandler::new(&config, &credential, "<ns:GetBalanceReq/>")
//!     .prepare()
//!     .unwrap();
//! assert_eq!(call.endpoint, "https://api-3t.sandbox.paypal.com/2.0");
//! assert!(call.payload.contains("<ns:GetBalanceReq/>"));
//! ```

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{ConfigError, ConfigMap, ENDPOINT_KEY, Mode};
use crate::constants::*;
use crate::credential::{Credential, CredentialKind};
use crate::error::MerchantError;
use crate::oauth::{Clock, SystemClock, sign_delegated_request};
use crate::secret::Secret;

const SOAP_ENVELOPE_OPEN: &str = concat!(
    r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/""#,
    r#" xmlns:ns="urn:ebay:api:PayPalAPI""#,
    r#" xmlns:ebl="urn:ebay:apis:eBLBaseComponents""#,
    r#" xmlns:cc="urn:ebay:apis:CoreComponentTypes""#,
    r#" xmlns:ed="urn:ebay:apis:EnhancedDataTypes">"#,
);

const REDACTED: &str = "[REDACTED]";

/// Client certificate presented during the TLS handshake.
#[derive(Debug, Clone, Serialize)]
pub struct ClientCertificate {
    /// Path to the PKCS#12 bundle.
    pub path: PathBuf,

    /// Password protecting the bundle's private key.
    #[serde(skip)]
    pub private_key_password: Secret,
}

/// A dispatch-ready merchant API call.
#[derive(Debug, Clone, Serialize)]
pub struct PreparedCall {
    /// Target endpoint URL.
    pub endpoint: String,

    /// HTTP headers.
    pub headers: BTreeMap<String, String>,

    /// SOAP envelope.
    pub payload: String,

    /// Client certificate for certificate credentials.
    pub client_certificate: Option<ClientCertificate>,
}

impl PreparedCall {
    /// A copy with credential material masked, suitable for display.
    pub fn redacted(&self) -> Self {
        let headers = self
            .headers
            .iter()
            .map(|(name, value)| {
                if SENSITIVE_HEADERS.contains(&name.as_str()) {
                    (name.clone(), REDACTED.to_string())
                } else {
                    (name.clone(), value.clone())
                }
            })
            .collect();

        let mut payload = self.payload.clone();
        for element in ["ebl:Password", "ebl:Signature"] {
            payload = mask_element(&payload, element);
        }

        Self {
            endpoint: self.endpoint.clone(),
            headers,
            payload,
            client_certificate: self.client_certificate.clone(),
        }
    }
}

/// Assembles headers, payload and endpoint for one merchant API call.
pub struct MerchantCallHandler<'a> {
    config: &'a ConfigMap,
    credential: &'a Credential,
    raw_payload: String,
    port_name: Option<String>,
    sdk_name: String,
    sdk_version: String,
    clock: Arc<dyn Clock>,
}

impl<'a> MerchantCallHandler<'a> {
    /// Create a handler for `raw_payload`, the XML body of the call.
    pub fn new(
        config: &'a ConfigMap,
        credential: &'a Credential,
        raw_payload: impl Into<String>,
    ) -> Self {
        Self {
            config,
            credential,
            raw_payload: raw_payload.into(),
            port_name: None,
            sdk_name: DEFAULT_SDK_NAME.to_string(),
            sdk_version: DEFAULT_SDK_VERSION.to_string(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Name a configuration key whose value overrides the endpoint.
    pub fn with_port_name(mut self, port_name: impl Into<String>) -> Self {
        self.port_name = Some(port_name.into());
        self
    }

    pub fn with_sdk_name(mut self, sdk_name: impl Into<String>) -> Self {
        self.sdk_name = sdk_name.into();
        self
    }

    pub fn with_sdk_version(mut self, sdk_version: impl Into<String>) -> Self {
        self.sdk_version = sdk_version.into();
        self
    }

    /// Replace the time source used for delegated signing.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn sdk_name(&self) -> &str {
        &self.sdk_name
    }

    pub fn sdk_version(&self) -> &str {
        &self.sdk_version
    }

    pub fn port_name(&self) -> Option<&str> {
        self.port_name.as_deref()
    }

    /// Resolve the endpoint URL.
    ///
    /// Precedence, highest first:
    /// 1. the configuration value named by the port name
    /// 2. the `endpoint` configuration key
    /// 3. the built-in endpoint for `mode` and the credential kind
    pub fn resolve_endpoint(&self) -> Result<String, ConfigError> {
        if let Some(endpoint) = self
            .port_name
            .as_deref()
            .and_then(|port| self.config.get_non_empty(port))
        {
            tracing::debug!(port = ?self.port_name, "endpoint from port name");
            return Ok(endpoint.to_string());
        }

        if let Some(endpoint) = self.config.get_non_empty(ENDPOINT_KEY) {
            tracing::debug!("endpoint from explicit configuration");
            return Ok(endpoint.to_string());
        }

        let mode = self.config.mode().ok_or(ConfigError::MissingEndpoint)?;
        let endpoint = match (mode, self.credential.kind()) {
            (Mode::Live, CredentialKind::Signature) => MERCHANT_SIGNATURE_LIVE_ENDPOINT,
            (Mode::Sandbox, CredentialKind::Signature) => MERCHANT_SIGNATURE_SANDBOX_ENDPOINT,
            (Mode::Live, CredentialKind::Certificate) => MERCHANT_CERTIFICATE_LIVE_ENDPOINT,
            (Mode::Sandbox, CredentialKind::Certificate) => MERCHANT_CERTIFICATE_SANDBOX_ENDPOINT,
        };
        tracing::debug!(?mode, kind = %self.credential.kind(), endpoint, "endpoint from mode");
        Ok(endpoint.to_string())
    }

    /// Build the HTTP headers.
    ///
    /// A delegated token authorization is signed against the resolved
    /// endpoint, so endpoint resolution errors surface here as well.
    pub fn build_headers(&self) -> Result<BTreeMap<String, String>, MerchantError> {
        let endpoint = self.resolve_endpoint()?;
        self.headers_for(&endpoint)
    }

    fn headers_for(&self, endpoint: &str) -> Result<BTreeMap<String, String>, MerchantError> {
        let mut headers = BTreeMap::new();

        headers.insert(
            PAYPAL_SECURITY_USERID_HEADER.to_string(),
            self.credential.username().to_string(),
        );
        headers.insert(
            PAYPAL_SECURITY_PASSWORD_HEADER.to_string(),
            self.credential.password().expose().to_string(),
        );
        match self.credential {
            Credential::Signature(c) => {
                headers.insert(
                    PAYPAL_SECURITY_SIGNATURE_HEADER.to_string(),
                    c.signature().expose().to_string(),
                );
            }
            Credential::Certificate(_) => {}
        }

        headers.insert(PAYPAL_REQUEST_DATA_FORMAT_HEADER.to_string(), SOAP.to_string());
        headers.insert(PAYPAL_RESPONSE_DATA_FORMAT_HEADER.to_string(), SOAP.to_string());
        headers.insert(
            PAYPAL_REQUEST_SOURCE_HEADER.to_string(),
            format!("{}-{}", self.sdk_name, self.sdk_version),
        );

        if let Some(token) = self.credential.token_authorization() {
            let signed = sign_delegated_request(
                self.credential.username(),
                self.credential.password(),
                token,
                endpoint,
                &*self.clock,
            )?;
            headers.extend(signed);
        }

        Ok(headers)
    }

    /// Build the SOAP envelope around the raw request body.
    ///
    /// The body is embedded verbatim; credential values are XML-escaped.
    pub fn build_payload(&self) -> String {
        let mut credentials = String::new();
        push_element(&mut credentials, "ebl:Username", self.credential.username());
        push_element(
            &mut credentials,
            "ebl:Password",
            self.credential.password().expose(),
        );
        match self.credential {
            Credential::Signature(c) => {
                push_element(&mut credentials, "ebl:Signature", c.signature().expose());
            }
            Credential::Certificate(_) => {}
        }
        if let Some(subject) = self.credential.subject_authorization() {
            push_element(&mut credentials, "ebl:Subject", subject.subject());
        }

        format!(
            "{open}<soapenv:Header><ns:RequesterCredentials><ebl:Credentials>{credentials}\
             </ebl:Credentials></ns:RequesterCredentials></soapenv:Header>\
             <soapenv:Body>{body}</soapenv:Body></soapenv:Envelope>",
            open = SOAP_ENVELOPE_OPEN,
            credentials = credentials,
            body = self.raw_payload,
        )
    }

    /// Assemble the dispatch-ready call.
    pub fn prepare(&self) -> Result<PreparedCall, MerchantError> {
        let endpoint = self.resolve_endpoint()?;
        let headers = self.headers_for(&endpoint)?;
        let payload = self.build_payload();

        let client_certificate = match self.credential {
            Credential::Certificate(c) => Some(ClientCertificate {
                path: c.certificate_file().to_path_buf(),
                private_key_password: c.private_key_password().clone(),
            }),
            Credential::Signature(_) => None,
        };

        Ok(PreparedCall {
            endpoint,
            headers,
            payload,
            client_certificate,
        })
    }
}

fn push_element(out: &mut String, tag: &str, value: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    out.push_str(&escape_xml(value));
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Replace the text of the first `<tag>...</tag>` element.
fn mask_element(payload: &str, tag: &str) -> String {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let Some(start) = payload.find(&open).map(|i| i + open.len()) else {
        return payload.to_string();
    };
    let Some(end) = payload[start..].find(&close).map(|i| start + i) else {
        return payload.to_string();
    };
    format!("{}{}{}", &payload[..start], REDACTED, &payload[end..])
}
