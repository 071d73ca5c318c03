use std::process::{Command, Output};

/// API key the mock token endpoint accepts.
pub const TEST_API_KEY: &str = "test_key";

/// Token the mock token endpoint hands out.
pub const TEST_TOKEN: &str = "test-access-token";

/// Run the CLI binary with arguments against the given base URL.
///
/// Connection settings come from the environment, the way a user would
/// configure them, so `args` only carries the command itself.
pub fn run_cli(args: &[&str], base_url: &str, api_key: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cellophane"));
    cmd.args(args);
    cmd.env("CELLOPHANE_BASE_URL", base_url);
    cmd.env("CELLOPHANE_API_KEY", api_key);
    cmd.env_remove("CELLOPHANE_TIMEOUT_SECS");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI off the async runtime so the mock server keeps serving.
pub async fn run_cli_async(args: &[&str], base_url: &str, api_key: &str) -> Output {
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    let base_url = base_url.to_string();
    let api_key = api_key.to_string();
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_cli(&args, &base_url, &api_key)
    })
    .await
    .expect("CLI task panicked")
}

/// Assert success and return stdout.
pub fn expect_success(output: &Output) -> String {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed\nstderr: {}", stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Assert failure and return stderr.
pub fn expect_failure(output: &Output) -> String {
    if output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        panic!("CLI command should have failed\nstdout: {}", stdout);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}
