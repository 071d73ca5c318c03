//! cellophane-http - Pooled HTTP verbs for cellophane API clients.
//!
//! [`PooledHttpVerbs`] issues GET, POST, PUT, PATCH and DELETE through one
//! long-lived `reqwest::blocking::Client`. [`BearerClient`] composes it with
//! the [`ApiClient`](cellophane_core::ApiClient) contract.

pub mod bearer;
pub mod config;
pub mod session;
mod verbs;

pub use bearer::{BearerClient, BearerOptions};
pub use config::HttpConfig;
pub use session::{HttpRequest, HttpResponse, HttpSession};
pub use verbs::PooledHttpVerbs;
