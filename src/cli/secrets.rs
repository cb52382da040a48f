//! Secrets command.
//!
//! Prints an environment's decrypted secrets, or a diff between two
//! references.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::config::Config;
use crate::core::layout;
use crate::core::secrets::{SecretsCommand, SecretsRequest};
use crate::core::source::Repository;
use crate::core::types::Reference;
use crate::error::Result;

/// Print the secrets for `environment` at `reference`, optionally diffed
/// against `diff`.
pub fn execute(
    environment: &str,
    reference: &str,
    diff: Option<&str>,
    key_file: Option<PathBuf>,
) -> Result<i32> {
    layout::validate_environment(environment)?;

    let root = Path::new(".");
    let config = Config::load(root)?;

    let mut request = SecretsRequest::new(environment).at(reference.parse::<Reference>()?);
    if let Some(diff) = diff {
        request = request.diff_against(diff.parse()?);
    }

    let key_file = key_file.unwrap_or_else(|| root.join(&config.secrets.key_file));
    let command = SecretsCommand::new(
        config.layout(),
        Repository::new(root, config.secrets.git.clone()),
        key_file,
        config.reporter(),
    );

    // Nothing reaches stdout unless the whole run succeeded.
    let result = command.execute(&request)?;

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", result)?;
    stdout.flush()?;
    Ok(0)
}
