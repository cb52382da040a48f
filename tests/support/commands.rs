//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a tequila command running in the project directory.
    ///
    /// Logging and color variables from the caller's environment are
    /// cleared so output is stable.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("tequila").expect("failed to find tequila binary");
        cmd.current_dir(self.dir.path());
        cmd.env_remove("TEQUILA_LOG");
        cmd.env_remove("TEQUILA_VAULT_PASSWORD_FILE");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// Shortcut for `tequila secrets <environment> [args...]`.
    pub fn secrets(&self, environment: &str, args: &[&str]) -> Output {
        self.cmd()
            .arg("secrets")
            .arg(environment)
            .args(args)
            .output()
            .expect("failed to run tequila secrets")
    }

    /// Shortcut for `tequila secrets <environment> [reference] --diff <comparison>`.
    pub fn secrets_diff(&self, environment: &str, reference: &str, comparison: &str) -> Output {
        self.secrets(environment, &[reference, "--diff", comparison])
    }

    /// Shortcut for `tequila play <args...>`.
    pub fn play(&self, args: &[&str]) -> Output {
        self.cmd()
            .arg("play")
            .args(args)
            .output()
            .expect("failed to run tequila play")
    }

    /// Shortcut for `tequila install-roles`.
    pub fn install_roles(&self) -> Output {
        self.cmd()
            .arg("install-roles")
            .output()
            .expect("failed to run tequila install-roles")
    }

    /// Shortcut for `tequila list`.
    pub fn list(&self) -> Output {
        self.cmd()
            .arg("list")
            .output()
            .expect("failed to run tequila list")
    }
}
