//! HTTP session configuration.

use std::time::Duration;

use tracing::debug;

use cellophane_core::error::InvalidInputError;
use cellophane_core::{Headers, Result};

use crate::session::{header_map, transport_error};

/// Environment variable overriding the User-Agent.
pub const USER_AGENT_ENV: &str = "CELLOPHANE_USER_AGENT";

/// Environment variable setting a whole-request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "CELLOPHANE_TIMEOUT_SECS";

/// Settings for the pooled session behind [`PooledHttpVerbs`](crate::PooledHttpVerbs).
///
/// The default has no timeout: a call blocks until the transport succeeds
/// or gives up on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// User-Agent sent with every request.
    pub user_agent: String,
    /// Whole-request timeout. `None` disables it.
    pub timeout: Option<Duration>,
    /// Headers sent with every request, under any per-call headers.
    pub default_headers: Headers,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("cellophane/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
            default_headers: Headers::new(),
        }
    }
}

impl HttpConfig {
    /// Defaults, overridden by `CELLOPHANE_USER_AGENT` and
    /// `CELLOPHANE_TIMEOUT_SECS` when set.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is not a whole number of seconds.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(user_agent) = lookup(USER_AGENT_ENV).filter(|v| !v.trim().is_empty()) {
            config.user_agent = user_agent;
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| InvalidInputError::Other {
                message: format!("{TIMEOUT_ENV} must be a whole number of seconds, got '{raw}'"),
            })?;
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Set the whole-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add a header sent with every request.
    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Build the pooled blocking client these settings describe.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid default header or if the TLS backend
    /// cannot be initialized.
    pub fn build_client(&self) -> Result<reqwest::blocking::Client> {
        debug!(user_agent = %self.user_agent, timeout = ?self.timeout, "building HTTP session");

        let client = reqwest::blocking::Client::builder()
            .user_agent(&self.user_agent)
            .default_headers(header_map(&self.default_headers)?)
            // reqwest's blocking client times out after 30s unless told otherwise
            .timeout(self.timeout)
            .build()
            .map_err(transport_error)?;

        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use cellophane_core::Error;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn default_has_no_timeout() {
        let config = HttpConfig::default();
        assert!(config.timeout.is_none());
        assert!(config.user_agent.starts_with("cellophane/"));
        assert!(config.default_headers.is_empty());
    }

    #[test]
    fn env_overrides() {
        let config = HttpConfig::from_lookup(lookup(&[
            (USER_AGENT_ENV, "my-agent/1.0"),
            (TIMEOUT_ENV, "15"),
        ]))
        .unwrap();
        assert_eq!(config.user_agent, "my-agent/1.0");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn zero_timeout_means_none() {
        let config = HttpConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "0")])).unwrap();
        assert!(config.timeout.is_none());
    }

    #[test]
    fn bad_timeout_rejected() {
        let err = HttpConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "soon")])).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(InvalidInputError::Other { .. })));
    }

    #[test]
    fn blank_user_agent_ignored() {
        let config = HttpConfig::from_lookup(lookup(&[(USER_AGENT_ENV, "  ")])).unwrap();
        assert_eq!(config.user_agent, HttpConfig::default().user_agent);
    }

    #[test]
    fn builds_client() {
        let config = HttpConfig::default()
            .with_timeout(Duration::from_secs(5))
            .with_default_header("Accept", "application/json");
        assert!(config.build_client().is_ok());
    }

    #[test]
    fn bad_default_header_fails_build() {
        let config = HttpConfig::default().with_default_header("bad header", "x");
        assert!(config.build_client().is_err());
    }
}
