//! The five HTTP verbs over one pooled session.

use tracing::{debug, instrument, trace};

use cellophane_core::{BodyRequest, Method, QueryRequest, ResponseBody, Result, decode_body};

use crate::config::HttpConfig;
use crate::session::{HttpRequest, HttpSession};

/// Reusable implementation of GET, POST, PUT, PATCH and DELETE.
///
/// One session is created with the instance and reused by every call, so
/// connections (and TLS handshakes) are amortized across requests. Each
/// verb issues exactly one request and returns the parsed JSON object.
/// There is no retry, and the response status is never inspected: an error
/// status with a JSON body comes back as a body.
///
/// Concrete clients compose this with [`ApiClient`](cellophane_core::ApiClient);
/// see [`BearerClient`](crate::BearerClient).
///
/// # Example
///
/// ```no_run
/// use cellophane_core::QueryRequest;
/// use cellophane_http::PooledHttpVerbs;
///
/// # fn example() -> cellophane_core::Result<()> {
/// let verbs = PooledHttpVerbs::new()?;
/// let body = verbs.get(
///     "https://api.example.com/status",
///     QueryRequest::new().param("verbose", "1"),
/// )?;
/// println!("{:?}", body.get("status"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PooledHttpVerbs<S = reqwest::blocking::Client> {
    session: S,
}

impl PooledHttpVerbs {
    /// Create verbs over a fresh session with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpConfig::default())
    }

    /// Create verbs over a fresh session built from `config`.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        Ok(Self::with_session(config.build_client()?))
    }
}

impl<S: HttpSession> PooledHttpVerbs<S> {
    /// Create verbs over an existing session.
    pub fn with_session(session: S) -> Self {
        Self { session }
    }

    /// Returns the underlying session.
    pub fn session(&self) -> &S {
        &self.session
    }

    /// Make a GET request.
    #[instrument(skip(self, request))]
    pub fn get(&self, url: &str, request: QueryRequest) -> Result<ResponseBody> {
        self.execute(query(Method::Get, url, request))
    }

    /// Make a POST request.
    #[instrument(skip(self, request))]
    pub fn post(&self, url: &str, request: BodyRequest) -> Result<ResponseBody> {
        self.execute(body(Method::Post, url, request))
    }

    /// Make a PUT request.
    #[instrument(skip(self, request))]
    pub fn put(&self, url: &str, request: BodyRequest) -> Result<ResponseBody> {
        self.execute(body(Method::Put, url, request))
    }

    /// Make a PATCH request.
    #[instrument(skip(self, request))]
    pub fn patch(&self, url: &str, request: BodyRequest) -> Result<ResponseBody> {
        self.execute(body(Method::Patch, url, request))
    }

    /// Make a DELETE request.
    #[instrument(skip(self, request))]
    pub fn delete(&self, url: &str, request: QueryRequest) -> Result<ResponseBody> {
        self.execute(query(Method::Delete, url, request))
    }

    fn execute(&self, request: HttpRequest) -> Result<ResponseBody> {
        debug!(method = %request.method, url = %request.url, "HTTP request");
        trace!(params = ?request.params, "query parameters");

        let response = self.session.send(request)?;
        debug!(status = response.status, bytes = response.body.len(), "HTTP response");

        Ok(decode_body(&response.body)?)
    }
}

fn query(method: Method, url: &str, request: QueryRequest) -> HttpRequest {
    HttpRequest {
        method,
        url: url.to_string(),
        headers: request.headers,
        params: request.params,
        data: None,
        json: None,
    }
}

fn body(method: Method, url: &str, request: BodyRequest) -> HttpRequest {
    HttpRequest {
        method,
        url: url.to_string(),
        headers: request.headers,
        params: None,
        data: request.data,
        json: request.json,
    }
}
