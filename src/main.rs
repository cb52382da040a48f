//! Tequila - run playbooks and inspect vault secrets for your environments.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tequila::cli::output;
use tequila::cli::{execute, Cli};
use tequila::error::{Error, FetchError, KeyError, ProcessError, VaultError};

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only secrets or diffs.
    let filter = EnvFilter::try_from_env("TEQUILA_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("tequila=debug")
        } else {
            EnvFilter::new("tequila=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    match execute(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            output::error(&e.to_string());
            if let Some(hint) = suggestion(&e) {
                output::hint(hint);
            }
            std::process::exit(e.exit_code());
        }
    }
}

fn suggestion(e: &Error) -> Option<&'static str> {
    match e {
        Error::Key(KeyError::Missing(_)) | Error::Key(KeyError::Empty(_)) => {
            Some("put the vault password in .vault_pass or pass --vault-password-file")
        }
        Error::Vault(VaultError::AuthenticationFailed { .. }) => {
            Some("check that the vault password file holds the right password")
        }
        Error::Fetch(FetchError::NotFound { .. }) => Some("run: tequila list"),
        Error::Fetch(FetchError::RevisionNotFound { .. }) => {
            Some("check the revision with: git log -- <path>")
        }
        Error::Process(ProcessError::NotInstalled { .. }) => {
            Some("install Ansible or set [ansible] in .tequila.toml")
        }
        _ => None,
    }
}
