//! Login command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use cellophane_core::ApiClient;

use super::ConnectionArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Print the obtained token
    #[arg(long)]
    pub show_token: bool,
}

pub fn run(args: LoginArgs) -> Result<()> {
    eprintln!("{}", "Authenticating...".dimmed());

    let client = args.connection.connect()?;

    output::success("Authenticated successfully");
    output::field("Base URL", client.base_url().as_str());
    if args.show_token {
        output::field("Token", client.token().as_str());
    }

    Ok(())
}
