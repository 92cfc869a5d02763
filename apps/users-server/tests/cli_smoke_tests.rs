//! CLI smoke tests for the users-server binary
//!
//! These tests verify that the CLI commands work correctly, including
//! configuration validation, help output, and a real serve-and-answer run.

use std::process::{Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::time::{sleep, timeout};

/// Helper to run the users-server binary with given arguments
fn run_users_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_users-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute users-server")
}

fn write_config(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write config file");
    path.to_str().unwrap().to_string()
}

#[test]
fn test_cli_help_command() {
    let output = run_users_server(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("users-server"), "Should contain binary name");
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--port"), "Should mention port option");
}

#[test]
fn test_cli_version_command() {
    let output = run_users_server(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("users-server"), "Should contain binary name");
    assert!(
        stdout.chars().any(|c| c.is_ascii_digit()),
        "Should contain version numbers"
    );
}

#[test]
fn test_cli_invalid_command() {
    let output = run_users_server(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("unrecognized"),
        "Should show error for invalid command: {}",
        stderr
    );
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = run_users_server(&["--config", "/nonexistent/config.yaml", "check"]);

    assert!(!output.status.success(), "Should fail with missing config");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Config file not found"),
        "Should mention config file issue: {}",
        stderr
    );
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&temp_dir, "invalid.yaml", "invalid: yaml: content: [unclosed");

    let output = run_users_server(&["--config", &config_path, "check"]);

    assert!(!output.status.success(), "Should fail with invalid YAML");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to load config"),
        "Should mention config loading issue: {}",
        stderr
    );
}

#[test]
fn test_cli_config_validation_valid_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        &temp_dir,
        "valid.yaml",
        r#"
server:
  listen: "127.0.0.1:3000"

logging:
  # global section
  default:
    console_level: info
    file: "logs/users.log"
    file_level: info
    max_backups: 3
    max_size_mb: 100

modules:
  api_ingress:
    enable_docs: false
    cors_enabled: true
"#,
    );

    let output = run_users_server(&["--config", &config_path, "check"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "Should succeed with valid config: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("Configuration check passed"), "{}", stdout);
}

#[test]
fn test_cli_check_rejects_bad_listen_address() {
    let output = run_users_server(&["--port", "not-an-address", "check"]);

    assert!(!output.status.success(), "Should fail with bad listen address");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid listen address"), "{}", stderr);
}

#[test]
fn test_cli_check_rejects_bad_ingress_section() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        &temp_dir,
        "ingress.yaml",
        r#"
server:
  listen: ":3000"
modules:
  api_ingress:
    bind_addr: "0.0.0.0:8087"
"#,
    );

    let output = run_users_server(&["--config", &config_path, "check"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("api_ingress"), "{}", stderr);
}

#[test]
fn test_cli_print_config_applies_overrides() {
    let output = run_users_server(&["--print-config", "--port", "8080", "-vv"]);

    assert!(output.status.success(), "Print config should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let printed: serde_yaml::Value =
        serde_yaml::from_str(&stdout).expect("print-config should emit YAML");
    assert_eq!(printed["server"]["listen"].as_str(), Some("8080"));
    assert_eq!(
        printed["logging"]["default"]["console_level"].as_str(),
        Some("trace")
    );
}

#[test]
fn test_cli_config_flag_short_form() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&temp_dir, "short.yaml", "server:\n  listen: \":4000\"\n");

    let output = run_users_server(&["-c", &config_path, "--print-config"]);

    assert!(output.status.success(), "Short config flag should work");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(":4000"), "{}", stdout);
}

#[test]
fn test_cli_subcommand_help() {
    for subcommand in ["run", "check"] {
        let output = run_users_server(&[subcommand, "--help"]);
        assert!(
            output.status.success(),
            "{} --help should succeed",
            subcommand
        );
    }
}

#[tokio::test]
async fn test_cli_run_serves_http() {
    // Reserve a free port, then release it for the server.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let listen = format!("127.0.0.1:{port}");

    let mut child = tokio::process::Command::new(env!("CARGO_BIN_EXE_users-server"))
        .args(["--port", &listen, "run"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn users-server");

    let response = timeout(Duration::from_secs(10), async {
        loop {
            if let Ok(mut stream) = tokio::net::TcpStream::connect(&listen).await {
                stream
                    .write_all(
                        b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
                    )
                    .await
                    .unwrap();
                let mut raw = String::new();
                stream.read_to_string(&mut raw).await.unwrap();
                break raw;
            }
            sleep(Duration::from_millis(100)).await;
        }
    })
    .await
    .expect("Server should start listening");

    assert!(response.starts_with("HTTP/1.1 200 OK"), "{}", response);
    assert!(response.contains("healthy"));
    assert!(
        response.to_ascii_lowercase().contains("x-request-id"),
        "{}",
        response
    );

    child.kill().await.unwrap();
}
