//! The pooled HTTP session seam.
//!
//! [`HttpSession`] is the one place a request actually leaves the process.
//! [`PooledHttpVerbs`](crate::PooledHttpVerbs) hands it a fully described
//! [`HttpRequest`] and gets back the raw status and body. The default
//! session is a `reqwest::blocking::Client`, which keeps a connection pool
//! alive for as long as it lives.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tracing::{debug, trace};

use cellophane_core::error::{InvalidInputError, TransportError};
use cellophane_core::{FormData, Headers, Method, Params, Result};

/// A single outgoing request, exactly as the caller described it.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Option<Headers>,
    pub params: Option<Params>,
    pub data: Option<FormData>,
    pub json: Option<Value>,
}

/// The raw result of a request. The status is reported, never judged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// A reusable handle that sends requests over pooled connections.
pub trait HttpSession {
    /// Send one request and read the whole response body.
    ///
    /// Implementations must not retry. A failure to connect or to read the
    /// body is a transport error.
    fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

impl<S: HttpSession + ?Sized> HttpSession for &S {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        (**self).send(request)
    }
}

impl HttpSession for reqwest::blocking::Client {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.request(reqwest_method(request.method), &request.url);

        if let Some(headers) = &request.headers {
            builder = builder.headers(header_map(headers)?);
        }
        if let Some(params) = &request.params {
            builder = builder.query(params);
        }

        // Non-empty form data wins over JSON; an empty form is no body.
        if request.method.has_body() {
            match (&request.data, &request.json) {
                (Some(data), json) if !data.is_empty() => {
                    if json.is_some() {
                        debug!("both form data and JSON given, sending form data");
                    }
                    builder = builder.form(data);
                }
                (_, Some(json)) => builder = builder.json(json),
                (_, None) => {}
            }
        }

        let response = builder.send().map_err(transport_error)?;
        let status = response.status().as_u16();
        trace!(status, "response headers received");

        let body = response.bytes().map_err(transport_error)?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Convert a header mapping into a reqwest [`HeaderMap`].
pub(crate) fn header_map(headers: &Headers) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| InvalidInputError::Header {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| InvalidInputError::Header {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

/// Classify a reqwest failure.
pub(crate) fn transport_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout {
            message: err.to_string(),
        }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellophane_core::Error;

    #[test]
    fn header_map_accepts_valid_headers() {
        let mut headers = Headers::new();
        headers.insert("X-Test".into(), "test".into());
        headers.insert("Accept".into(), "application/json".into());

        let map = header_map(&headers).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["x-test"], "test");
    }

    #[test]
    fn header_map_rejects_bad_name() {
        let mut headers = Headers::new();
        headers.insert("bad header".into(), "x".into());

        let err = header_map(&headers).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::Header { ref name, .. }) if name == "bad header"
        ));
    }

    #[test]
    fn header_map_rejects_bad_value() {
        let mut headers = Headers::new();
        headers.insert("X-Test".into(), "line\nbreak".into());
        assert!(header_map(&headers).is_err());
    }

    #[test]
    fn methods_map_one_to_one() {
        assert_eq!(reqwest_method(Method::Get), reqwest::Method::GET);
        assert_eq!(reqwest_method(Method::Patch), reqwest::Method::PATCH);
        assert_eq!(reqwest_method(Method::Delete), reqwest::Method::DELETE);
    }
}
