//! Ansible invocations.
//!
//! Thin pass-through to `ansible-playbook` and `ansible-galaxy`: build the
//! argument vector, inherit stdio, return the child's exit code.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::core::layout::Layout;
use crate::error::{ProcessError, Result};

/// Options for a playbook run.
#[derive(Debug, Clone, Default)]
pub struct PlayOptions {
    /// Connect as this remote user.
    pub user: Option<String>,
    /// Prompt for the connection password.
    pub ask_pass: bool,
    /// Private key file used to authenticate the connection.
    pub private_key: Option<PathBuf>,
}

/// A fully resolved external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<OsString>,
}

impl Invocation {
    /// Run with inherited stdio and return the exit code.
    ///
    /// A child killed by a signal reports 1.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::NotInstalled` if the program is not on PATH and
    /// `ProcessError::Spawn` if it cannot be started.
    pub fn run(&self) -> Result<i32> {
        let program = which::which(&self.program).map_err(|_| ProcessError::NotInstalled {
            program: self.program.clone(),
        })?;
        debug!(program = %program.display(), args = ?self.args, "running");

        let status = Command::new(&program)
            .args(&self.args)
            .status()
            .map_err(|e| ProcessError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        debug!(status = ?status.code(), "finished");
        Ok(status.code().unwrap_or(1))
    }
}

/// `ansible-playbook -i <inventory> <playbook> [--user U] [--ask-pass] [--private-key F]`
pub fn play(
    program: &str,
    layout: &Layout,
    environment: &str,
    playbook: &str,
    options: &PlayOptions,
) -> Result<Invocation> {
    let inventory = layout.inventory_path(environment)?;
    let playbook = layout.playbook_path(playbook)?;

    let mut args: Vec<OsString> = vec!["-i".into(), inventory.into(), playbook.into()];
    if let Some(user) = &options.user {
        args.push("--user".into());
        args.push(user.into());
    }
    if options.ask_pass {
        args.push("--ask-pass".into());
    }
    if let Some(key) = &options.private_key {
        args.push("--private-key".into());
        args.push(key.into());
    }

    Ok(Invocation {
        program: program.to_string(),
        args,
    })
}

/// `ansible-galaxy install -i -r <requirements>`
pub fn install_roles(program: &str, layout: &Layout) -> Invocation {
    Invocation {
        program: program.to_string(),
        args: vec![
            "install".into(),
            "-i".into(),
            "-r".into(),
            layout.requirements_path().into(),
        ],
    }
}
