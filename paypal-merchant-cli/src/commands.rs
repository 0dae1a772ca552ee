//! Command handlers for the merchant CLI.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use paypal_merchant_core::{
    AccountStore, ConfigMap, Credential, CredentialManager, HttpTransport, MerchantCallHandler,
    PreparedCall, TokenAuthorization, Transport,
};
use tracing::debug;

/// Output format for prepared calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Inputs shared by `prepare` and `send`.
#[derive(Debug, Clone, Args)]
pub struct CallArgs {
    /// API username of the account to use (defaults to the first configured)
    #[arg(short, long)]
    pub username: Option<String>,

    /// File holding the XML request body (reads stdin when omitted)
    #[arg(short, long)]
    pub request: Option<PathBuf>,

    /// Configuration key whose value overrides the endpoint
    #[arg(long)]
    pub port_name: Option<String>,

    /// Access token for a call made on behalf of a third party
    #[arg(long, requires = "token_secret")]
    pub token: Option<String>,

    /// Token secret paired with --token
    #[arg(long, requires = "token")]
    pub token_secret: Option<String>,
}

/// Load the configuration from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<ConfigMap> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => ConfigMap::default_path().context("Failed to locate configuration directory")?,
    };
    debug!("Loading configuration from {:?}", path);
    ConfigMap::load_from_path(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Render the configured accounts, one per line.
pub fn list_accounts(config: &ConfigMap) -> String {
    let accounts = AccountStore::list_accounts(config);
    if accounts.is_empty() {
        return "No accounts configured".to_string();
    }

    let mut out = String::from("Configured accounts:");
    for account in accounts {
        let kind = if account.uses_certificate() {
            "certificate"
        } else {
            "signature"
        };
        out.push_str(&format!(
            "\n  account{}  {}  ({})",
            account.index, account.api_username, kind
        ));
    }
    out
}

/// Assemble the call described by `args` around `body`.
pub fn prepare_call(config: &ConfigMap, args: &CallArgs, body: &str) -> Result<PreparedCall> {
    let credential = resolve_credential(config, args)?;

    let mut handler = MerchantCallHandler::new(config, &credential, body);
    if let Some(port_name) = &args.port_name {
        handler = handler.with_port_name(port_name.as_str());
    }

    handler.prepare().context("Failed to assemble merchant call")
}

/// Dispatch a prepared call and return the response body.
pub async fn send_call(call: &PreparedCall) -> Result<String> {
    HttpTransport::new()
        .dispatch(call)
        .await
        .with_context(|| format!("Failed to send call to {}", call.endpoint))
}

/// Render a prepared call, masking credentials unless `show_secrets` is set.
pub fn render_call(call: &PreparedCall, format: OutputFormat, show_secrets: bool) -> Result<String> {
    let shown = if show_secrets {
        call.clone()
    } else {
        call.redacted()
    };

    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&shown).context("Failed to serialize prepared call")
        }
        OutputFormat::Text => {
            let mut out = format!("POST {}", shown.endpoint);
            for (name, value) in &shown.headers {
                out.push_str(&format!("\n  {}: {}", name, value));
            }
            if let Some(cert) = &shown.client_certificate {
                out.push_str(&format!("\n  client certificate: {}", cert.path.display()));
            }
            if show_secrets {
                out.push_str("\n\n");
                out.push_str(&shown.payload);
            }
            Ok(out)
        }
    }
}

/// Read the request body from `path`, or from stdin.
pub fn read_request(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request body from {}", path.display())),
        None => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("Failed to read request body from stdin")?;
            Ok(body)
        }
    }
}

fn resolve_credential(config: &ConfigMap, args: &CallArgs) -> Result<Credential> {
    let credential = CredentialManager::new()
        .get_credentials(config, args.username.as_deref())
        .context("Failed to resolve credentials")?;

    Ok(match (&args.token, &args.token_secret) {
        (Some(token), Some(secret)) => credential
            .with_token_authorization(TokenAuthorization::new(token.as_str(), secret.as_str())),
        _ => credential,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ConfigMap {
        ConfigMap::from_pairs([
            ("mode", "sandbox"),
            ("account1.apiUsername", "seller_api1.example.com"),
            ("account1.apiPassword", "WX4WTU3S8MY44S7F"),
            ("account1.apiSignature", "AFcWxV21C7fd0v3bYYYRCpSSRl31A7yDhhsPUU2XhtMoZXsWHFxu"),
            ("account2.apiUsername", "cert_api1.example.com"),
            ("account2.apiPassword", "D6JNKKULHN3G5B8A"),
            ("account2.apiCertificate", "sdk-cert.p12"),
            ("account2.privateKeyPassword", "password"),
        ])
    }

    fn args(username: Option<&str>) -> CallArgs {
        CallArgs {
            username: username.map(String::from),
            request: None,
            port_name: None,
            token: None,
            token_secret: None,
        }
    }

    #[test]
    fn test_list_accounts() {
        let listing = list_accounts(&config());
        assert!(listing.contains("account1  seller_api1.example.com  (signature)"));
        assert!(listing.contains("account2  cert_api1.example.com  (certificate)"));
    }

    #[test]
    fn test_list_accounts_empty() {
        assert_eq!(list_accounts(&ConfigMap::new()), "No accounts configured");
    }

    #[test]
    fn test_text_output_masks_secrets() {
        let call = prepare_call(&config(), &args(None), "<Request>test</Request>").unwrap();
        let text = render_call(&call, OutputFormat::Text, false).unwrap();

        assert!(text.starts_with("POST https://api-3t.sandbox.paypal.com/2.0"));
        assert!(text.contains("X-PAYPAL-SECURITY-USERID: seller_api1.example.com"));
        assert!(text.contains("X-PAYPAL-SECURITY-PASSWORD: [REDACTED]"));
        assert!(!text.contains("WX4WTU3S8MY44S7F"));
        assert!(!text.contains("<Request>test</Request>"));
    }

    #[test]
    fn test_text_output_with_secrets_includes_payload() {
        let call = prepare_call(&config(), &args(None), "<Request>test</Request>").unwrap();
        let text = render_call(&call, OutputFormat::Text, true).unwrap();

        assert!(text.contains("X-PAYPAL-SECURITY-PASSWORD: WX4WTU3S8MY44S7F"));
        assert!(text.contains("<Request>test</Request>"));
    }

    #[test]
    fn test_json_output_for_certificate_account() {
        let call = prepare_call(
            &config(),
            &args(Some("cert_api1.example.com")),
            "<Request>test</Request>",
        )
        .unwrap();
        let json = render_call(&call, OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["endpoint"], "https://api.sandbox.paypal.com/2.0");
        assert_eq!(value["client_certificate"]["path"], "sdk-cert.p12");
        assert_eq!(value["headers"]["X-PAYPAL-SECURITY-PASSWORD"], "[REDACTED]");
    }

    #[test]
    fn test_token_arguments_add_authorization() {
        let mut call_args = args(None);
        call_args.token = Some("access-token".to_string());
        call_args.token_secret = Some("token-secret".to_string());

        let call = prepare_call(&config(), &call_args, "<Request/>").unwrap();
        assert!(call.headers["X-PP-AUTHORIZATION"].starts_with("token=access-token,"));
    }

    #[test]
    fn test_unknown_username_fails() {
        let result = prepare_call(&config(), &args(Some("nobody")), "<Request/>");
        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("Missing credentials for nobody"));
    }
}
