//! Verb command implementations.

use std::io::{self, Read};

use anyhow::{Context, Result, bail};
use clap::Args;
use serde_json::Value;

use cellophane_core::{ApiClient, BodyRequest, QueryRequest};

use super::ConnectionArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Resource path (relative to the base URL) or absolute URL
    pub endpoint: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Request header as NAME:VALUE (repeatable)
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Query parameter as KEY=VALUE (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_pair)]
    pub params: Vec<(String, String)>,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args, Debug)]
pub struct BodyArgs {
    /// Resource path (relative to the base URL) or absolute URL
    pub endpoint: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Request header as NAME:VALUE (repeatable)
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Form field as KEY=VALUE (repeatable)
    #[arg(short = 'd', long = "data", value_parser = parse_pair)]
    pub data: Vec<(String, String)>,

    /// JSON payload
    #[arg(long, conflicts_with = "json_file")]
    pub json: Option<String>,

    /// JSON file with the payload (use - for stdin)
    #[arg(long)]
    pub json_file: Option<String>,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

impl QueryArgs {
    fn request(&self) -> QueryRequest {
        let mut request = QueryRequest::new();
        for (name, value) in &self.headers {
            request = request.header(name, value);
        }
        for (key, value) in &self.params {
            request = request.param(key, value);
        }
        request
    }
}

impl BodyArgs {
    fn request(&self) -> Result<BodyRequest> {
        let mut request = BodyRequest::new();
        for (name, value) in &self.headers {
            request = request.header(name, value);
        }
        for (key, value) in &self.data {
            request = request.field(key, value);
        }
        if let Some(json) = self.payload()? {
            request = request.json(json);
        }
        Ok(request)
    }

    fn payload(&self) -> Result<Option<Value>> {
        let raw = match (&self.json, &self.json_file) {
            (Some(inline), _) => inline.clone(),
            (None, Some(path)) if path == "-" => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read from stdin")?;
                buf
            }
            (None, Some(path)) => {
                std::fs::read_to_string(path).context("Failed to read JSON file")?
            }
            (None, None) => return Ok(None),
        };
        let value = serde_json::from_str(&raw).context("Invalid JSON payload")?;
        Ok(Some(value))
    }
}

pub fn get(args: QueryArgs) -> Result<()> {
    let client = args.connection.connect()?;
    let body = client
        .get(&args.endpoint, args.request())
        .context("GET failed")?;
    output::body(&body, args.compact)
}

pub fn delete(args: QueryArgs) -> Result<()> {
    let client = args.connection.connect()?;
    let body = client
        .delete(&args.endpoint, args.request())
        .context("DELETE failed")?;
    output::body(&body, args.compact)
}

pub fn post(args: BodyArgs) -> Result<()> {
    let request = args.request()?;
    let client = args.connection.connect()?;
    let body = client
        .post(&args.endpoint, request)
        .context("POST failed")?;
    output::body(&body, args.compact)
}

pub fn put(args: BodyArgs) -> Result<()> {
    let request = args.request()?;
    let client = args.connection.connect()?;
    let body = client.put(&args.endpoint, request).context("PUT failed")?;
    output::body(&body, args.compact)
}

pub fn patch(args: BodyArgs) -> Result<()> {
    let request = args.request()?;
    let client = args.connection.connect()?;
    let body = client
        .patch(&args.endpoint, request)
        .context("PATCH failed")?;
    output::body(&body, args.compact)
}

/// Parse `NAME:VALUE`.
fn parse_header(s: &str) -> Result<(String, String)> {
    let Some((name, value)) = s.split_once(':') else {
        bail!("expected NAME:VALUE, got '{s}'");
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("header name must not be empty");
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Parse `KEY=VALUE`.
fn parse_pair(s: &str) -> Result<(String, String)> {
    let Some((key, value)) = s.split_once('=') else {
        bail!("expected KEY=VALUE, got '{s}'");
    };
    if key.is_empty() {
        bail!("key must not be empty");
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_parsing() {
        assert_eq!(
            parse_header("X-Test: test").unwrap(),
            ("X-Test".to_string(), "test".to_string())
        );
        // Only the first colon splits
        assert_eq!(
            parse_header("Referer:http://x/y").unwrap(),
            ("Referer".to_string(), "http://x/y".to_string())
        );
        assert!(parse_header("no-colon").is_err());
        assert!(parse_header(": value").is_err());
    }

    #[test]
    fn pair_parsing() {
        assert_eq!(
            parse_pair("k=v").unwrap(),
            ("k".to_string(), "v".to_string())
        );
        assert_eq!(
            parse_pair("q=a=b").unwrap(),
            ("q".to_string(), "a=b".to_string())
        );
        assert_eq!(parse_pair("empty=").unwrap().1, "");
        assert!(parse_pair("novalue").is_err());
        assert!(parse_pair("=v").is_err());
    }
}
