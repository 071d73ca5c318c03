//! cellophane-core - Core types and the client contract.
//!
//! Concrete API wrappers implement [`ApiClient`]: one authentication step
//! plus the five HTTP verbs. Construction goes through
//! [`ApiClient::create`], which authenticates exactly once and never hands
//! out a client without a token.

pub mod credentials;
pub mod error;
pub mod request;
pub mod response;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::ApiKey;
pub use error::Error;
pub use request::{BodyRequest, FormData, Headers, Params, QueryRequest};
pub use response::{ResponseBody, decode_body};
pub use tokens::Token;
pub use traits::ApiClient;
pub use types::{BaseUrl, Method};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
