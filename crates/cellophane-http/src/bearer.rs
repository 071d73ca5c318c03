//! Bearer-token client built from the contract and the pooled verbs.
//!
//! [`BearerClient`] exchanges its API key for a token at a configurable
//! endpoint, then sends `Authorization: Bearer <token>` with every verb.
//! It is the reference composition of [`ApiClient`] and [`PooledHttpVerbs`].

use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use cellophane_core::error::AuthError;
use cellophane_core::request::merge_headers;
use cellophane_core::{
    ApiClient, ApiKey, BaseUrl, BodyRequest, Headers, QueryRequest, ResponseBody, Result, Token,
};

use crate::config::HttpConfig;
use crate::session::HttpSession;
use crate::verbs::PooledHttpVerbs;

/// Default path of the token exchange endpoint.
pub const DEFAULT_TOKEN_PATH: &str = "/auth/token";

/// Default request field carrying the API key.
pub const DEFAULT_KEY_FIELD: &str = "api_key";

/// Default response field carrying the token.
pub const DEFAULT_TOKEN_FIELD: &str = "token";

/// Construction options for [`BearerClient`].
#[derive(Debug, Clone)]
pub struct BearerOptions<S = reqwest::blocking::Client> {
    /// Base URL relative endpoints are resolved against.
    pub base_url: BaseUrl,
    /// Path (or absolute URL) of the token exchange endpoint.
    pub token_path: String,
    /// JSON field the API key is sent in.
    pub key_field: String,
    /// JSON field the token is read from.
    pub token_field: String,
    /// Verbs used for the exchange and, afterwards, by the client.
    pub verbs: PooledHttpVerbs<S>,
}

impl BearerOptions {
    /// Options with a fresh pooled session built from `config`.
    pub fn new(base_url: BaseUrl, config: &HttpConfig) -> Result<Self> {
        Ok(Self::with_verbs(base_url, PooledHttpVerbs::with_config(config)?))
    }
}

impl<S> BearerOptions<S> {
    /// Options over existing verbs.
    pub fn with_verbs(base_url: BaseUrl, verbs: PooledHttpVerbs<S>) -> Self {
        Self {
            base_url,
            token_path: DEFAULT_TOKEN_PATH.to_string(),
            key_field: DEFAULT_KEY_FIELD.to_string(),
            token_field: DEFAULT_TOKEN_FIELD.to_string(),
            verbs,
        }
    }

    /// Set the token exchange path.
    pub fn token_path(mut self, path: impl Into<String>) -> Self {
        self.token_path = path.into();
        self
    }

    /// Set the request field carrying the API key.
    pub fn key_field(mut self, field: impl Into<String>) -> Self {
        self.key_field = field.into();
        self
    }

    /// Set the response field carrying the token.
    pub fn token_field(mut self, field: impl Into<String>) -> Self {
        self.token_field = field.into();
        self
    }
}

/// An API client that authenticates once and then sends a bearer token.
#[derive(Debug)]
pub struct BearerClient<S = reqwest::blocking::Client> {
    credential: ApiKey,
    token: Token,
    base_url: BaseUrl,
    verbs: PooledHttpVerbs<S>,
}

impl<S: HttpSession> BearerClient<S> {
    /// Returns the base URL endpoints are resolved against.
    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Headers for one call: the caller's, with our Authorization on top.
    fn authorized(&self, headers: Option<Headers>) -> Option<Headers> {
        let auth = Headers::from([("Authorization".to_string(), self.token.bearer())]);
        merge_headers(headers, &auth)
    }
}

impl<S: HttpSession> ApiClient for BearerClient<S> {
    type Options = BearerOptions<S>;

    /// POST `{key_field: api_key}` to the token path and read `token_field`.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Rejected`] if the reply is a JSON object carrying an
    ///   `error` or `message` field instead of a token.
    /// - [`AuthError::MissingToken`] if the reply is a JSON object without a
    ///   non-empty string token.
    /// - [`Error::Decode`](cellophane_core::Error::Decode) if the reply is not
    ///   a JSON object at all, such as an HTML error page from a proxy. It is
    ///   propagated unchanged, not turned into an auth error.
    /// - [`Error::Transport`](cellophane_core::Error::Transport) if the
    ///   exchange never gets a reply.
    #[instrument(skip_all, fields(base_url = %options.base_url))]
    fn authenticate(credential: &ApiKey, options: &BearerOptions<S>) -> Result<Token> {
        let url = options.base_url.endpoint_url(&options.token_path)?;
        debug!(%url, "exchanging API key for token");

        let mut payload = Map::new();
        payload.insert(
            options.key_field.clone(),
            Value::String(credential.expose().to_string()),
        );

        let body = options
            .verbs
            .post(&url, BodyRequest::new().json(Value::Object(payload)))?;

        match body.get(&options.token_field) {
            Some(Value::String(token)) if !token.is_empty() => Ok(Token::new(token.as_str())),
            _ => {
                let err = match rejection_reason(&body) {
                    Some(reason) => AuthError::Rejected { reason },
                    None => AuthError::MissingToken {
                        field: options.token_field.clone(),
                    },
                };
                warn!(error = %err, "token exchange failed");
                Err(err.into())
            }
        }
    }

    fn from_parts(credential: ApiKey, token: Token, options: BearerOptions<S>) -> Self {
        Self {
            credential,
            token,
            base_url: options.base_url,
            verbs: options.verbs,
        }
    }

    fn credential(&self) -> &ApiKey {
        &self.credential
    }

    fn token(&self) -> &Token {
        &self.token
    }

    fn get(&self, endpoint: &str, request: QueryRequest) -> Result<ResponseBody> {
        let url = self.base_url.endpoint_url(endpoint)?;
        let request = QueryRequest {
            headers: self.authorized(request.headers),
            ..request
        };
        self.verbs.get(&url, request)
    }

    fn post(&self, endpoint: &str, request: BodyRequest) -> Result<ResponseBody> {
        let url = self.base_url.endpoint_url(endpoint)?;
        let request = BodyRequest {
            headers: self.authorized(request.headers),
            ..request
        };
        self.verbs.post(&url, request)
    }

    fn put(&self, endpoint: &str, request: BodyRequest) -> Result<ResponseBody> {
        let url = self.base_url.endpoint_url(endpoint)?;
        let request = BodyRequest {
            headers: self.authorized(request.headers),
            ..request
        };
        self.verbs.put(&url, request)
    }

    fn patch(&self, endpoint: &str, request: BodyRequest) -> Result<ResponseBody> {
        let url = self.base_url.endpoint_url(endpoint)?;
        let request = BodyRequest {
            headers: self.authorized(request.headers),
            ..request
        };
        self.verbs.patch(&url, request)
    }

    fn delete(&self, endpoint: &str, request: QueryRequest) -> Result<ResponseBody> {
        let url = self.base_url.endpoint_url(endpoint)?;
        let request = QueryRequest {
            headers: self.authorized(request.headers),
            ..request
        };
        self.verbs.delete(&url, request)
    }
}

/// Pull a human-readable reason out of an auth error body, if it has one.
fn rejection_reason(body: &ResponseBody) -> Option<String> {
    let field = |name: &str| body.get(name).and_then(Value::as_str).map(str::to_string);
    match (field("error"), field("message")) {
        (Some(error), Some(message)) => Some(format!("{error}: {message}")),
        (Some(reason), None) | (None, Some(reason)) => Some(reason),
        (None, None) => None,
    }
}
