#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

use wiremock::MockServer;

/// Base URL of a mock API server.
pub fn mock_api_url(server: &MockServer) -> String {
    format!("http://127.0.0.1:{}/api", server.address().port())
}

/// Run the CLI with an isolated session file.
pub fn run_cli_with_env(args: &[&str], session_file: &Path, api_url: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_slate"));
    cmd.args(args);
    cmd.env("SLATE_SESSION_FILE", session_file);
    cmd.env("SLATE_API_URL", api_url);
    cmd.env_remove("SLATE_PASSWORD");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI with an isolated session file and expect success.
pub fn run_cli_with_env_success(args: &[&str], session_file: &Path, api_url: &str) -> Output {
    let output = run_cli_with_env(args, session_file, api_url);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    output
}

/// Write a complete session file the CLI will pick up.
pub fn write_session(session_file: &Path, access: &str, role: &str) {
    let json = serde_json::json!({
        "access_token": access,
        "refresh_token": "R",
        "role": role,
    });
    std::fs::write(session_file, json.to_string()).unwrap();
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
