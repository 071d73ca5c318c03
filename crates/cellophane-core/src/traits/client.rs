//! Authenticated API client trait.

use tracing::{debug, instrument};

use crate::request::{BodyRequest, QueryRequest};
use crate::response::ResponseBody;
use crate::{ApiKey, Result, Token};

/// An authenticated API client.
///
/// Implementors supply their own authentication flow and the five verbs.
/// Leaving any of them out is a compile error, so there is no way to build
/// a client that lacks part of the contract. A client that deliberately
/// does not serve a verb returns [`Error::Unsupported`](crate::Error::Unsupported).
///
/// Clients are built with [`create`](ApiClient::create), never by hand:
///
/// ```
/// use cellophane_core::{ApiClient, ApiKey, BodyRequest, Error, Method, QueryRequest,
///                       ResponseBody, Result, Token};
///
/// struct Echo {
///     key: ApiKey,
///     token: Token,
/// }
///
/// impl ApiClient for Echo {
///     type Options = ();
///
///     fn authenticate(key: &ApiKey, _: &()) -> Result<Token> {
///         Ok(Token::new(format!("token-for-{}", key.expose())))
///     }
///
///     fn from_parts(key: ApiKey, token: Token, _: ()) -> Self {
///         Self { key, token }
///     }
///
///     fn credential(&self) -> &ApiKey { &self.key }
///     fn token(&self) -> &Token { &self.token }
///
///     fn get(&self, _: &str, _: QueryRequest) -> Result<ResponseBody> { Ok(ResponseBody::new()) }
///     fn post(&self, _: &str, _: BodyRequest) -> Result<ResponseBody> { Ok(ResponseBody::new()) }
///     fn put(&self, _: &str, _: BodyRequest) -> Result<ResponseBody> { Ok(ResponseBody::new()) }
///     fn patch(&self, _: &str, _: BodyRequest) -> Result<ResponseBody> {
///         Err(Error::Unsupported { method: Method::Patch })
///     }
///     fn delete(&self, _: &str, _: QueryRequest) -> Result<ResponseBody> { Ok(ResponseBody::new()) }
/// }
///
/// let client = Echo::create(ApiKey::new("k").unwrap(), ()).unwrap();
/// assert_eq!(client.token().as_str(), "token-for-k");
/// ```
///
/// An implementation without `delete` is rejected by the compiler:
///
/// ```compile_fail,E0046
/// use cellophane_core::{ApiClient, ApiKey, BodyRequest, QueryRequest, ResponseBody, Result,
///                       Token};
///
/// struct NoDelete(ApiKey, Token);
///
/// impl ApiClient for NoDelete {
///     type Options = ();
///
///     fn authenticate(_: &ApiKey, _: &()) -> Result<Token> { Ok(Token::new("t")) }
///     fn from_parts(key: ApiKey, token: Token, _: ()) -> Self { Self(key, token) }
///     fn credential(&self) -> &ApiKey { &self.0 }
///     fn token(&self) -> &Token { &self.1 }
///
///     fn get(&self, _: &str, _: QueryRequest) -> Result<ResponseBody> { Ok(ResponseBody::new()) }
///     fn post(&self, _: &str, _: BodyRequest) -> Result<ResponseBody> { Ok(ResponseBody::new()) }
///     fn put(&self, _: &str, _: BodyRequest) -> Result<ResponseBody> { Ok(ResponseBody::new()) }
///     fn patch(&self, _: &str, _: BodyRequest) -> Result<ResponseBody> { Ok(ResponseBody::new()) }
/// }
/// ```
pub trait ApiClient: Sized {
    /// Client-specific construction options.
    ///
    /// The contract never reads these; they are handed to
    /// [`authenticate`](ApiClient::authenticate) and then to
    /// [`from_parts`](ApiClient::from_parts).
    type Options;

    /// Exchange the credential for a token.
    ///
    /// Called exactly once per [`create`](ApiClient::create).
    fn authenticate(credential: &ApiKey, options: &Self::Options) -> Result<Token>;

    /// Assemble a ready client from an authenticated credential.
    fn from_parts(credential: ApiKey, token: Token, options: Self::Options) -> Self;

    /// Returns the credential this client was created with.
    fn credential(&self) -> &ApiKey;

    /// Returns the token obtained at creation.
    fn token(&self) -> &Token;

    /// Make a GET request.
    fn get(&self, endpoint: &str, request: QueryRequest) -> Result<ResponseBody>;

    /// Make a POST request.
    fn post(&self, endpoint: &str, request: BodyRequest) -> Result<ResponseBody>;

    /// Make a PUT request.
    fn put(&self, endpoint: &str, request: BodyRequest) -> Result<ResponseBody>;

    /// Make a PATCH request.
    fn patch(&self, endpoint: &str, request: BodyRequest) -> Result<ResponseBody>;

    /// Make a DELETE request.
    fn delete(&self, endpoint: &str, request: QueryRequest) -> Result<ResponseBody>;

    /// Authenticate and build the client.
    ///
    /// # Errors
    ///
    /// Returns whatever [`authenticate`](ApiClient::authenticate) fails with.
    /// No client is produced in that case.
    #[instrument(skip_all, fields(client = std::any::type_name::<Self>()))]
    fn create(credential: ApiKey, options: Self::Options) -> Result<Self> {
        debug!("Authenticating");
        let token = Self::authenticate(&credential, &options)?;
        debug!("Authenticated");
        Ok(Self::from_parts(credential, token, options))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::error::AuthError;
    use crate::{Error, Method};

    struct Options {
        calls: Rc<Cell<usize>>,
        fail: bool,
    }

    struct StubClient {
        credential: ApiKey,
        token: Token,
    }

    impl ApiClient for StubClient {
        type Options = Options;

        fn authenticate(_credential: &ApiKey, options: &Options) -> Result<Token> {
            options.calls.set(options.calls.get() + 1);
            if options.fail {
                return Err(AuthError::Rejected {
                    reason: "bad key".into(),
                }
                .into());
            }
            Ok(Token::new("mock_token"))
        }

        fn from_parts(credential: ApiKey, token: Token, _options: Options) -> Self {
            Self { credential, token }
        }

        fn credential(&self) -> &ApiKey {
            &self.credential
        }

        fn token(&self) -> &Token {
            &self.token
        }

        fn get(&self, _endpoint: &str, _request: QueryRequest) -> Result<ResponseBody> {
            Err(Error::Unsupported {
                method: Method::Get,
            })
        }

        fn post(&self, _endpoint: &str, _request: BodyRequest) -> Result<ResponseBody> {
            Err(Error::Unsupported {
                method: Method::Post,
            })
        }

        fn put(&self, _endpoint: &str, _request: BodyRequest) -> Result<ResponseBody> {
            Err(Error::Unsupported {
                method: Method::Put,
            })
        }

        fn patch(&self, _endpoint: &str, _request: BodyRequest) -> Result<ResponseBody> {
            Err(Error::Unsupported {
                method: Method::Patch,
            })
        }

        fn delete(&self, _endpoint: &str, _request: QueryRequest) -> Result<ResponseBody> {
            Err(Error::Unsupported {
                method: Method::Delete,
            })
        }
    }

    fn options(fail: bool) -> (Options, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        (
            Options {
                calls: Rc::clone(&calls),
                fail,
            },
            calls,
        )
    }

    #[test]
    fn create_stores_credential_and_token() {
        let (opts, _) = options(false);
        let client = StubClient::create(ApiKey::new("test_key").unwrap(), opts).unwrap();
        assert_eq!(client.credential().expose(), "test_key");
        assert_eq!(client.token().as_str(), "mock_token");
    }

    #[test]
    fn create_authenticates_exactly_once() {
        let (opts, calls) = options(false);
        StubClient::create(ApiKey::new("test_key").unwrap(), opts).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn failed_authentication_yields_no_client() {
        let (opts, calls) = options(true);
        let result = StubClient::create(ApiKey::new("test_key").unwrap(), opts);
        assert!(matches!(
            result,
            Err(Error::Auth(AuthError::Rejected { .. }))
        ));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn unsupported_verbs_report_their_method() {
        let (opts, _) = options(false);
        let client = StubClient::create(ApiKey::new("test_key").unwrap(), opts).unwrap();

        let cases = [
            (client.get("/test", QueryRequest::new()), Method::Get),
            (client.put("/test", BodyRequest::new()), Method::Put),
            (client.patch("/test", BodyRequest::new()), Method::Patch),
            (client.delete("/test", QueryRequest::new()), Method::Delete),
        ];
        for (result, expected) in cases {
            match result {
                Err(Error::Unsupported { method }) => assert_eq!(method, expected),
                other => panic!("expected Unsupported({expected}), got {other:?}"),
            }
        }
    }
}
