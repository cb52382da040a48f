//! Play command.

use std::path::Path;

use crate::core::config::Config;
use crate::core::layout;
use crate::core::playbook::{self, PlayOptions};
use crate::error::Result;

/// Run a playbook against an environment's inventory.
pub fn execute(environment: &str, playbook: &str, options: PlayOptions) -> Result<i32> {
    layout::validate_environment(environment)?;

    let config = Config::load(Path::new("."))?;
    playbook::play(
        &config.ansible.playbook,
        &config.layout(),
        environment,
        playbook,
        &options,
    )?
    .run()
}
