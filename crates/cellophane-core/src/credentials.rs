//! API key credential type.

use std::fmt;

use crate::error::AuthError;

/// The API key a client authenticates with.
///
/// The key is supplied once at construction and never changes for the
/// lifetime of the client that owns it.
///
/// # Security
///
/// The key is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use cellophane_core::ApiKey;
///
/// let key = ApiKey::new("sk-live-1234").unwrap();
/// assert!(!format!("{:?}", key).contains("sk-live"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new API key.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmptyCredential`] if the key is empty or whitespace.
    pub fn new(key: impl Into<String>) -> Result<Self, AuthError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(AuthError::EmptyCredential);
        }
        Ok(Self(key))
    }

    /// Returns the raw key.
    ///
    /// # Security
    ///
    /// Use this only when constructing authentication requests.
    /// Never log or display this value.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&"[REDACTED]").finish()
    }
}
