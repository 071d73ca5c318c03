//! Subcommand implementations.

mod login;
mod request;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use cellophane_core::{ApiClient, ApiKey, BaseUrl};
use cellophane_http::{BearerClient, BearerOptions, HttpConfig};

use crate::cli::Commands;

pub use login::LoginArgs;
pub use request::{BodyArgs, QueryArgs};

/// How to reach and authenticate with the API.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// API base URL
    #[arg(long, env = "CELLOPHANE_BASE_URL")]
    pub base_url: String,

    /// API key to exchange for a token
    #[arg(long, env = "CELLOPHANE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Path of the token exchange endpoint
    #[arg(long, default_value = cellophane_http::bearer::DEFAULT_TOKEN_PATH)]
    pub token_path: String,

    /// Request field carrying the API key
    #[arg(long, default_value = cellophane_http::bearer::DEFAULT_KEY_FIELD)]
    pub key_field: String,

    /// Response field carrying the token
    #[arg(long, default_value = cellophane_http::bearer::DEFAULT_TOKEN_FIELD)]
    pub token_field: String,

    /// Request timeout in seconds (default: wait for the transport)
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl ConnectionArgs {
    /// Authenticate and return a ready client.
    pub fn connect(&self) -> Result<BearerClient> {
        let base_url = BaseUrl::new(&self.base_url).context("Invalid base URL")?;
        let api_key = ApiKey::new(&self.api_key).context("Invalid API key")?;

        let mut config = HttpConfig::from_env().context("Invalid HTTP configuration")?;
        if let Some(secs) = self.timeout {
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        debug!(base_url = %base_url, timeout = ?config.timeout, "connecting");

        let options = BearerOptions::new(base_url, &config)
            .context("Failed to create HTTP session")?
            .token_path(&self.token_path)
            .key_field(&self.key_field)
            .token_field(&self.token_field);

        BearerClient::create(api_key, options).context("Failed to authenticate")
    }
}

pub fn handle(command: Commands) -> Result<()> {
    match command {
        Commands::Login(args) => login::run(args),
        Commands::Get(args) => request::get(args),
        Commands::Post(args) => request::post(args),
        Commands::Put(args) => request::put(args),
        Commands::Patch(args) => request::patch(args),
        Commands::Delete(args) => request::delete(args),
    }
}
