//! Install-roles command.

use std::path::Path;

use crate::core::config::Config;
use crate::core::playbook;
use crate::error::Result;

/// Install the roles listed in the requirements file.
pub fn execute() -> Result<i32> {
    let config = Config::load(Path::new("."))?;
    playbook::install_roles(&config.ansible.galaxy, &config.layout()).run()
}
