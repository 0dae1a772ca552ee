//! Account lookup over flat configuration.
//!
//! Accounts are described by numbered key groups:
//!
//! ```text
//! account1.apiUsername = ...
//! account1.apiPassword = ...
//! account1.apiSignature = ...
//! account2.apiUsername = ...
//! account2.apiCertificate = ...
//! ```
//!
//! The store never mutates the configuration and holds no state of its own.
//!
//! # Example
//!
//! ```
//! use paypal_merchant_core::{AccountStore, ConfigMap};
//!
//! let config = ConfigMap::from_pairs([
//!     ("account1.apiUsername", "seller_api1.example.com"),
//!     ("account1.apiPassword", "pw"),
//! ]);
//!
//! let account = AccountStore::resolve_account(&config, None).unwrap();
//! assert_eq!(account.index, "1");
//! assert_eq!(account.api_username, "seller_api1.example.com");
//! ```

use crate::config::ConfigMap;
use crate::model::{ACCOUNT_PREFIX, Account, AccountField};
use crate::secret::Secret;

/// Stateless reader of `account<N>.*` configuration blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountStore;

impl AccountStore {
    /// Resolve one account from configuration.
    ///
    /// With `requested_username == None` the first `account<N>.apiUsername`
    /// key (in configuration order) wins. Otherwise the first account whose
    /// username equals `requested_username` wins. Returns `None` when nothing
    /// matches.
    pub fn resolve_account(config: &ConfigMap, requested_username: Option<&str>) -> Option<Account> {
        let index = config.iter().find_map(|(key, value)| {
            let index = parse_username_key(key)?;
            match requested_username {
                None => Some(index),
                Some(wanted) if wanted == value => Some(index),
                Some(_) => None,
            }
        })?;

        tracing::debug!(%index, "resolved account from configuration");
        Some(Self::read_account(config, index))
    }

    /// List every configured account in configuration order.
    pub fn list_accounts(config: &ConfigMap) -> Vec<Account> {
        config
            .iter()
            .filter_map(|(key, _)| parse_username_key(key))
            .map(|index| Self::read_account(config, index))
            .collect()
    }

    /// Gather all fields for the account at `index` by direct key lookup.
    fn read_account(config: &ConfigMap, index: &str) -> Account {
        let field = |f: AccountField| config.get(&f.key(index)).map(str::to_string);

        Account {
            index: index.to_string(),
            api_username: field(AccountField::ApiUsername).unwrap_or_default(),
            api_password: field(AccountField::ApiPassword).map(Secret::new),
            api_signature: field(AccountField::ApiSignature).map(Secret::new),
            api_certificate: field(AccountField::ApiCertificate),
            private_key_password: field(AccountField::PrivateKeyPassword).map(Secret::new),
            subject: field(AccountField::Subject),
            application_id: field(AccountField::ApplicationId),
        }
    }
}

/// Extract the digit text `N` from a key of the form `account<N>.apiUsername`.
///
/// The text is kept verbatim so sibling keys are looked up under the same
/// spelling, leading zeros included.
fn parse_username_key(key: &str) -> Option<&str> {
    let rest = key.strip_prefix(ACCOUNT_PREFIX)?;
    let (digits, field) = rest.split_once('.')?;
    if field != AccountField::ApiUsername.as_str() {
        return None;
    }
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits)
}
