//! API base URL type.

use std::fmt;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated API base URL.
///
/// Concrete clients resolve their resource paths against this URL. Only
/// absolute `http` and `https` URLs with a host are accepted.
///
/// # Example
///
/// ```
/// use cellophane_core::BaseUrl;
///
/// let base = BaseUrl::new("https://api.example.com/v1/").unwrap();
/// assert_eq!(base.endpoint_url("users/42").unwrap(),
///            "https://api.example.com/v1/users/42");
///
/// // Absolute endpoints pass through untouched
/// assert_eq!(base.endpoint_url("https://other.example.com/x").unwrap(),
///            "https://other.example.com/x");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Create a new base URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::BaseUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Resolve an endpoint against this base URL.
    ///
    /// An endpoint that is already an absolute `http(s)` URL is returned
    /// unchanged. Anything else is treated as a path below the base.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty endpoint.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<String, Error> {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Err(InvalidInputError::Endpoint {
                value: endpoint.to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        if let Ok(url) = Url::parse(endpoint)
            && matches!(url.scheme(), "http" | "https")
        {
            return Ok(url.into());
        }

        // The URL crate always adds a trailing slash to root paths
        let base = self.0.as_str().trim_end_matches('/');
        Ok(format!("{}/{}", base, endpoint.trim_start_matches('/')))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        if !matches!(url.scheme(), "http" | "https") {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must use http or https".to_string(),
            }
            .into());
        }

        if url.host_str().is_none_or(str::is_empty) {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must not carry a query or fragment".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
