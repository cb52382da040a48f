//! Tests for general CLI behavior and error reporting.

use crate::support::*;

#[test]
fn test_help() {
    let t = Test::new();
    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    for command in ["secrets", "play", "install-roles", "list", "completions"] {
        assert_stdout_contains(&output, command);
    }
}

#[test]
fn test_version() {
    let t = Test::new();
    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_unknown_command_is_usage_error() {
    let t = Test::new();
    let output = t.cmd().arg("decrypt").output().unwrap();
    assert_exit_code(&output, 2);
    assert_stdout_empty(&output);
}

#[test]
fn test_secrets_requires_environment() {
    let t = Test::new();
    let output = t.cmd().arg("secrets").output().unwrap();
    assert_exit_code(&output, 2);
    assert_stderr_contains(&output, "<ENVIRONMENT>");
}

#[test]
fn test_completions() {
    let t = Test::new();
    for shell in ["bash", "zsh", "fish", "power-shell"] {
        let output = t.cmd().args(["completions", shell]).output().unwrap();
        assert_success(&output);
        assert_stdout_contains(&output, "tequila");
    }
}

#[test]
fn test_bad_config_is_rejected() {
    let t = Test::with_key();
    t.write_secrets("staging", STAGING);
    t.write(".tequila.toml", "[layout]\nbase = \"ops\"\n");

    let output = t.secrets("staging", &[]);
    assert_exit_code(&output, 2);
    assert_stdout_empty(&output);
    assert_stderr_contains(&output, "failed to parse config file");
}

#[test]
fn test_invalid_config_value() {
    let t = Test::with_key();
    t.write(".tequila.toml", "[secrets]\ngit = \"\"\n");

    let output = t.list();
    assert_exit_code(&output, 2);
    assert_stderr_contains(&output, "invalid config value");
}

#[test]
fn test_empty_key_file() {
    let t = Test::new();
    t.write(".vault_pass", "\n");
    t.write_secrets("staging", STAGING);

    let output = t.secrets("staging", &[]);
    assert_exit_code(&output, 3);
    assert_stdout_empty(&output);
    assert_stderr_contains(&output, "vault password file is empty");
}

#[test]
fn test_errors_are_not_colored_with_no_color() {
    let t = Test::with_key();
    let output = t.secrets("staging", &[]);
    assert_failure(&output);
    assert_stderr_excludes(&output, "\u{1b}[");
}

#[test]
fn test_failure_shows_hint() {
    let t = Test::new();
    t.write_secrets("staging", STAGING);

    let output = t.secrets("staging", &[]);
    assert_exit_code(&output, 3);
    assert_stderr_contains(&output, "--vault-password-file");
}

#[test]
fn test_password_never_echoed() {
    let t = Test::new();
    t.write_key(WRONG_PASSWORD);
    t.write_secrets("staging", STAGING);

    let output = t
        .cmd()
        .args(["--verbose", "secrets", "staging"])
        .env("TEQUILA_LOG", "tequila=trace")
        .output()
        .unwrap();
    assert_exit_code(&output, 4);
    assert!(!stdout(&output).contains(WRONG_PASSWORD));
    assert_stderr_excludes(&output, WRONG_PASSWORD);
}

#[test]
fn test_missing_environment_names_origin() {
    use predicates::prelude::*;

    let t = Test::with_key();
    t.cmd()
        .args(["secrets", "staging"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(format!(
            "secrets file not found: .:{}",
            secrets_path("staging")
        )));
}
