//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{BodyArgs, LoginArgs, QueryArgs};

/// Explore authenticated JSON APIs from the command line.
#[derive(Parser, Debug)]
#[command(name = "cellophane")]
#[command(author, version = env!("CELLOPHANE_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Exchange the API key for a token and report the result
    Login(LoginArgs),

    /// Send a GET request
    Get(QueryArgs),

    /// Send a POST request
    Post(BodyArgs),

    /// Send a PUT request
    Put(BodyArgs),

    /// Send a PATCH request
    Patch(BodyArgs),

    /// Send a DELETE request
    Delete(QueryArgs),
}
