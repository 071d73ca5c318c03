//! Per-call request options.
//!
//! Each verb takes an explicit options struct instead of an open-ended
//! keyword bag. GET and DELETE take a [`QueryRequest`]; POST, PUT and PATCH
//! take a [`BodyRequest`]. Every field is optional and an absent field is
//! forwarded as absent, never replaced by an empty default.

use std::collections::BTreeMap;

use serde_json::Value;

/// Request headers, name to value.
pub type Headers = BTreeMap<String, String>;

/// URL query parameters, name to value.
pub type Params = BTreeMap<String, String>;

/// Form-encoded body fields, name to value.
pub type FormData = BTreeMap<String, String>;

/// Options for verbs without a body (GET, DELETE).
///
/// # Example
///
/// ```
/// use cellophane_core::QueryRequest;
///
/// let request = QueryRequest::new()
///     .header("X-Test", "test")
///     .param("page", "2");
/// assert_eq!(request.params.unwrap()["page"], "2");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryRequest {
    pub headers: Option<Headers>,
    pub params: Option<Params>,
}

impl QueryRequest {
    /// An empty request: no headers, no params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Headers::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replace all headers.
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Add a query parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params
            .get_or_insert_with(Params::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replace all query parameters.
    pub fn params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }
}

/// Options for verbs with a body (POST, PUT, PATCH).
///
/// `data` and `json` are independent. Setting one never implies the other.
///
/// # Example
///
/// ```
/// use cellophane_core::BodyRequest;
///
/// let request = BodyRequest::new()
///     .header("X-Test", "test")
///     .field("key", "value");
/// assert!(request.json.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyRequest {
    pub headers: Option<Headers>,
    pub data: Option<FormData>,
    pub json: Option<Value>,
}

impl BodyRequest {
    /// An empty request: no headers, no data, no JSON payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Headers::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replace all headers.
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Add a form field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.data
            .get_or_insert_with(FormData::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replace the whole form body.
    pub fn data(mut self, data: FormData) -> Self {
        self.data = Some(data);
        self
    }

    /// Set the structured JSON payload.
    pub fn json(mut self, json: Value) -> Self {
        self.json = Some(json);
        self
    }
}

/// Merge `extra` headers into a request's headers.
///
/// Entries in `extra` overwrite existing entries with the same name
/// (compared case-insensitively, since HTTP header names are).
pub fn merge_headers(headers: Option<Headers>, extra: &Headers) -> Option<Headers> {
    if extra.is_empty() {
        return headers;
    }
    let mut merged = headers.unwrap_or_default();
    for (name, value) in extra {
        merged.retain(|existing, _| !existing.eq_ignore_ascii_case(name));
        merged.insert(name.clone(), value.clone());
    }
    Some(merged)
}
