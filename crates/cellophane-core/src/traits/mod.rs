//! Core traits for authenticated API clients.

mod client;

pub use client::ApiClient;
