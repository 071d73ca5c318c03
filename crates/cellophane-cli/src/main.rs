//! cellophane - CLI tool for exploring authenticated JSON APIs.
//!
//! This is a thin wrapper over `cellophane-http`'s bearer client, intended
//! for manual exploration and debugging of an API that exchanges an API key
//! for a bearer token.

mod cli;
mod commands;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.json_logs);

    match commands::handle(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr at a level picked by `-v` count, unless `RUST_LOG` is set.
fn init_logging(verbosity: u8, json: bool) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let layer = fmt::layer().with_writer(std::io::stderr);
    let layer = if json {
        layer.json().boxed()
    } else {
        layer.with_target(false).boxed()
    };

    tracing_subscriber::registry().with(filter).with(layer).init();
}
