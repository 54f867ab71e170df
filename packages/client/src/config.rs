//! Configuration constants and validation functions for the client.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::error::{FreshBooksError, Result};

/// XML namespace of FreshBooks API documents.
pub const API_NAMESPACE: &str = "http://www.freshbooks.com/api/";

/// Path of the XML endpoint on an account host.
pub const API_PATH: &str = "/api/2.1/xml-in";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// User agent string identifying this client.
pub const USER_AGENT: &str = concat!("freshbooks-client/", env!("CARGO_PKG_VERSION"));

/// Environment variable holding the account name.
pub const ENV_ACCOUNT: &str = "FRESHBOOKS_ACCOUNT";

/// Environment variable holding a full endpoint URL (takes precedence over the account).
pub const ENV_API_URL: &str = "FRESHBOOKS_API_URL";

/// Environment variable holding the authentication token.
pub const ENV_TOKEN: &str = "FRESHBOOKS_TOKEN";

/// Environment variable overriding the HTTP timeout.
pub const ENV_TIMEOUT_SECS: &str = "FRESHBOOKS_TIMEOUT_SECS";

/// Account name pattern: a DNS label.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ACCOUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$").expect("valid regex")
});

/// Validate an account name.
///
/// The account name becomes the host label of the API endpoint, so it must be
/// a valid DNS label.
///
/// # Examples
/// ```
/// use freshbooks_client::config::validate_account;
///
/// assert!(validate_account("acme-ltd").is_ok());
/// assert!(validate_account("acme.evil.com").is_err());
/// ```
pub fn validate_account(account: &str) -> Result<()> {
    if ACCOUNT_PATTERN.is_match(account) {
        Ok(())
    } else {
        Err(FreshBooksError::InvalidAccount(account.to_string()))
    }
}

/// Build the XML endpoint URL for an account.
///
/// # Panics
/// Debug builds panic if `account` doesn't match the expected format.
pub fn api_url(account: &str) -> String {
    debug_assert!(
        ACCOUNT_PATTERN.is_match(account),
        "account should be validated before calling api_url"
    );
    format!("https://{account}.freshbooks.com{API_PATH}")
}

/// Connection settings for [`crate::http::HttpTransport`].
///
/// `Debug` redacts the token.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub token: String,
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Configuration for the standard endpoint of `account`.
    pub fn new(account: &str, token: impl Into<String>) -> Result<Self> {
        validate_account(account)?;
        Self::with_api_url(api_url(account), token)
    }

    /// Configuration for an explicit endpoint URL.
    pub fn with_api_url(api_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(FreshBooksError::Config(format!("{ENV_TOKEN} is empty")));
        }
        Ok(Self {
            api_url: api_url.into(),
            token,
            timeout_secs: HTTP_TIMEOUT_SECS,
        })
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps variable names to values.
    ///
    /// `FRESHBOOKS_API_URL` wins over `FRESHBOOKS_ACCOUNT`; one of them and
    /// `FRESHBOOKS_TOKEN` must be set. An unparsable timeout falls back to the
    /// default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(ENV_TOKEN)
            .ok_or_else(|| FreshBooksError::Config(format!("{ENV_TOKEN} not set")))?;

        let config = match (lookup(ENV_API_URL), lookup(ENV_ACCOUNT)) {
            (Some(url), _) => Self::with_api_url(url, token)?,
            (None, Some(account)) => Self::new(&account, token)?,
            (None, None) => {
                return Err(FreshBooksError::Config(format!(
                    "neither {ENV_API_URL} nor {ENV_ACCOUNT} is set"
                )))
            }
        };

        let timeout_secs = lookup(ENV_TIMEOUT_SECS)
            .and_then(|v| v.parse().ok())
            .unwrap_or(HTTP_TIMEOUT_SECS);

        Ok(config.timeout_secs(timeout_secs))
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_validate_account_valid() {
        assert!(validate_account("acme").is_ok());
        assert!(validate_account("acme-ltd").is_ok());
        assert!(validate_account("a1").is_ok());
    }

    #[test]
    fn test_validate_account_invalid() {
        assert!(validate_account("").is_err());
        assert!(validate_account("-acme").is_err());
        assert!(validate_account("acme-").is_err());
        assert!(validate_account("acme.com").is_err());
        assert!(validate_account("acme/x").is_err());
    }

    #[test]
    fn test_api_url() {
        assert_eq!(
            api_url("acme"),
            "https://acme.freshbooks.com/api/2.1/xml-in"
        );
    }

    #[test]
    fn test_from_lookup_with_account() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (ENV_ACCOUNT, "acme"),
            (ENV_TOKEN, "secret"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "https://acme.freshbooks.com/api/2.1/xml-in");
        assert_eq!(config.token, "secret");
        assert_eq!(config.timeout_secs, HTTP_TIMEOUT_SECS);
    }

    #[test]
    fn test_from_lookup_api_url_wins() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (ENV_ACCOUNT, "acme"),
            (ENV_API_URL, "http://127.0.0.1:9000/xml-in"),
            (ENV_TOKEN, "secret"),
            (ENV_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "http://127.0.0.1:9000/xml-in");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_from_lookup_missing_token() {
        let err = ClientConfig::from_lookup(lookup_from(&[(ENV_ACCOUNT, "acme")])).unwrap_err();
        assert!(err.to_string().contains(ENV_TOKEN));
    }

    #[test]
    fn test_from_lookup_missing_endpoint() {
        let err = ClientConfig::from_lookup(lookup_from(&[(ENV_TOKEN, "secret")])).unwrap_err();
        assert!(matches!(err, FreshBooksError::Config(_)));
    }

    #[test]
    fn test_from_lookup_rejects_bad_account() {
        let err = ClientConfig::from_lookup(lookup_from(&[
            (ENV_ACCOUNT, "acme.evil.com"),
            (ENV_TOKEN, "secret"),
        ]))
        .unwrap_err();
        assert!(matches!(err, FreshBooksError::InvalidAccount(_)));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new("acme", "very-secret-token").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("very-secret-token"));
        assert!(debug.contains("<redacted>"));
    }
}
