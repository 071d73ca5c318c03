//! Error types for cellophane clients.
//!
//! This module provides a unified error type with explicit variants for
//! authentication, transport, decoding, and input validation errors.
//! Nothing in the library recovers from these locally; every failure is
//! returned to the caller as-is.

use thiserror::Error;

use crate::types::Method;

/// The unified error type for cellophane operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Credential exchange failed.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The response body could not be parsed as a JSON object.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Input validation errors (bad URL, header, or option value).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The concrete client does not provide this verb.
    #[error("{method} is not supported by this client")]
    Unsupported { method: Method },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The API key was empty.
    #[error("API key must not be empty")]
    EmptyCredential,

    /// The auth endpoint answered, but not with a usable token.
    #[error("token missing from auth response (expected string field '{field}')")]
    MissingToken { field: String },

    /// The credential exchange was refused.
    #[error("credential rejected: {reason}")]
    Rejected { reason: String },
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed (refused, reset, DNS).
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Any other failure while sending the request or reading the body.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Response decoding errors.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body is not valid JSON.
    #[error("invalid JSON body: {message}")]
    InvalidJson { message: String },

    /// The body is valid JSON, but not an object.
    #[error("expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::InvalidJson {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(DecodeError::from(err))
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// Invalid endpoint path or URL.
    #[error("invalid endpoint '{value}': {reason}")]
    Endpoint { value: String, reason: String },

    /// Invalid header name or value.
    #[error("invalid header '{name}': {reason}")]
    Header { name: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
