//! Tests for CLI argument parsing and the offline subcommands

use assert_cmd::Command;
use clap::Parser;
use infrasee::auth::{AuthState, Role};
use infrasee::cli::{effective_auth, Cli, Commands};
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_cli_reset_password_with_email() {
    let cli = Cli::parse_from(["infrasee", "reset-password", "--email", "a@b.com"]);

    match cli.command {
        Commands::ResetPassword { email } => assert_eq!(email.as_deref(), Some("a@b.com")),
        other => panic!("unexpected command {:?}", other),
    }
    assert_eq!(cli.verbose, 0);
    assert!(cli.config.is_none());
}

#[test]
fn test_cli_global_flags_after_subcommand() {
    let cli = Cli::parse_from([
        "infrasee",
        "filters",
        "status",
        "--json",
        "-vv",
        "--config",
        "/etc/infrasee.toml",
    ]);

    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.config, Some(PathBuf::from("/etc/infrasee.toml")));
    match cli.command {
        Commands::Filters { column, json } => {
            assert_eq!(column, "status");
            assert!(json);
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_cli_sms_requires_destination() {
    let result = Cli::try_parse_from(["infrasee", "sms", "--message", "hi"]);
    assert!(result.is_err(), "--to is required");
}

#[test]
fn test_cli_routes_role_conflicts_with_anonymous() {
    let result = Cli::try_parse_from(["infrasee", "routes", "--role", "admin", "--anonymous"]);
    assert!(result.is_err());

    let cli = Cli::parse_from(["infrasee", "routes", "--role", "moderator"]);
    match cli.command {
        Commands::Routes { role, .. } => assert_eq!(role, Some(Role::Moderator)),
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_effective_auth_precedence() {
    let configured = AuthState::signed_in(Some(Role::Admin));
    assert_eq!(effective_auth(&configured, None, false), configured);
    assert_eq!(effective_auth(&configured, None, true), AuthState::anonymous());
    assert_eq!(
        effective_auth(&AuthState::anonymous(), Some(Role::Moderator), false),
        AuthState::signed_in(Some(Role::Moderator))
    );
}

// ============================================================================
// Binary
// ============================================================================

/// Run the binary with an isolated config directory
fn infrasee(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("infrasee").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_binary_routes_path_allowed() {
    let home = TempDir::new().unwrap();
    infrasee(&home)
        .args(["routes", "--path", "/admin/users", "--role", "admin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("allow"));
}

#[test]
fn test_binary_routes_path_denied_exits_non_zero() {
    let home = TempDir::new().unwrap();
    infrasee(&home)
        .args(["routes", "--path", "/admin/users", "--role", "moderator"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("unauthorized"));
}

#[test]
fn test_binary_routes_table() {
    let home = TempDir::new().unwrap();
    infrasee(&home)
        .args(["routes", "--anonymous"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/reset-password"))
        .stdout(predicate::str::contains("/moderator/*"));
}

#[test]
fn test_binary_reads_config_from_default_location() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join("infrasee");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[auth]\nauthenticated = true\nrole = \"admin\"\n",
    )
    .unwrap();

    infrasee(&home)
        .args(["routes", "--path", "/admin/users"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a signed-in admin"))
        .stdout(predicate::str::contains("allow"));
}

#[test]
fn test_binary_without_config_file_is_signed_out() {
    let home = TempDir::new().unwrap();
    infrasee(&home)
        .args(["routes", "--path", "/admin/users"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("a signed-out visitor"))
        .stdout(predicate::str::contains("unauthorized"));
}

#[test]
fn test_binary_sms_without_api_key_fails() {
    let home = TempDir::new().unwrap();
    infrasee(&home)
        .env_remove("INFRASEE_SMS_API_KEY")
        .args(["sms", "--to", "+15550109999", "--message", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sms.api_key"));
}

#[test]
fn test_binary_rejects_missing_config_file() {
    let home = TempDir::new().unwrap();
    infrasee(&home)
        .args(["--config", "/definitely/not/here.toml", "routes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}
