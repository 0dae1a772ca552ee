//! HTTP dispatch of prepared calls.
//!
//! The core hands a [`PreparedCall`] to a [`Transport`]; the transport only
//! moves bytes. There is no retry, backoff or connection pooling beyond what
//! the HTTP client does on its own.
//!
//! This module is only available when the `http` feature is enabled.

use async_trait::async_trait;
use thiserror::Error;

use crate::soap::{ClientCertificate, PreparedCall};

/// Error type for call dispatch.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The client certificate could not be loaded.
    #[error("client certificate {path}: {message}")]
    Certificate { path: String, message: String },

    /// The request could not be sent or its body read.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Dispatches prepared calls and returns the raw response body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn dispatch(&self, call: &PreparedCall) -> Result<String, TransportError>;
}

/// [`Transport`] backed by `reqwest`.
///
/// Certificate credentials are presented as a TLS client identity, so a new
/// client is built for those calls.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Use an existing client for signature-credential calls.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn client_for(&self, call: &PreparedCall) -> Result<reqwest::Client, TransportError> {
        match &call.client_certificate {
            Some(cert) => {
                let identity = load_identity(cert)?;
                Ok(reqwest::Client::builder().identity(identity).build()?)
            }
            None => Ok(self.client.clone()),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn dispatch(&self, call: &PreparedCall) -> Result<String, TransportError> {
        let client = self.client_for(call)?;

        let mut request = client
            .post(&call.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "text/xml; charset=utf-8");
        for (name, value) in &call.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        tracing::debug!(endpoint = %call.endpoint, "dispatching merchant API call");
        let response = request.body(call.payload.clone()).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

fn load_identity(cert: &ClientCertificate) -> Result<reqwest::Identity, TransportError> {
    let path = cert.path.display().to_string();
    let der = std::fs::read(&cert.path).map_err(|e| TransportError::Certificate {
        path: path.clone(),
        message: e.to_string(),
    })?;
    reqwest::Identity::from_pkcs12_der(&der, cert.private_key_password.expose()).map_err(|e| {
        TransportError::Certificate {
            path,
            message: e.to_string(),
        }
    })
}
