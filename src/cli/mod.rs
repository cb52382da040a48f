//! Command-line interface.

pub mod completions;
pub mod list;
pub mod output;
pub mod play;
pub mod roles;
pub mod secrets;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::constants;

/// Tequila - run playbooks and inspect vault secrets for your environments.
#[derive(Parser)]
#[command(
    name = "tequila",
    about = "Run playbooks and inspect vault secrets for your environments",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Vault password file (overrides .tequila.toml)
    #[arg(long, global = true, env = "TEQUILA_VAULT_PASSWORD_FILE", value_name = "FILE")]
    pub vault_password_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Examine the secrets for an environment
    Secrets {
        /// Environment name (e.g., production)
        environment: String,
        /// Git reference to read from ("." is the working copy)
        #[arg(default_value = constants::WORKING_COPY)]
        reference: String,
        /// Git reference to compare against
        #[arg(long, value_name = "REF")]
        diff: Option<String>,
    },

    /// Run a playbook for an environment
    Play {
        /// Environment name
        environment: String,
        /// Playbook name, with or without .yml
        #[arg(default_value = constants::DEFAULT_PLAYBOOK)]
        playbook: String,
        /// Connect as this user
        #[arg(short, long, value_name = "REMOTE_USER")]
        user: Option<String>,
        /// Prompt for the connection password
        #[arg(short = 'k', long)]
        ask_pass: bool,
        /// Use this file to authenticate the connection
        #[arg(long, visible_alias = "key-file", value_name = "PRIVATE_KEY_FILE")]
        private_key: Option<PathBuf>,
    },

    /// Install the Ansible roles in the requirements file
    InstallRoles,

    /// List environments and playbooks
    List,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command, returning the process exit code.
pub fn execute(cli: Cli) -> crate::error::Result<i32> {
    use Command::*;

    match cli.command {
        Secrets {
            environment,
            reference,
            diff,
        } => secrets::execute(
            &environment,
            &reference,
            diff.as_deref(),
            cli.vault_password_file,
        ),
        Play {
            environment,
            playbook,
            user,
            ask_pass,
            private_key,
        } => play::execute(
            &environment,
            &playbook,
            crate::core::playbook::PlayOptions {
                user,
                ask_pass,
                private_key,
            },
        ),
        InstallRoles => roles::execute(),
        List => list::execute(),
        Completions { shell } => completions::execute(shell),
    }
}
