//! List command.
//!
//! Shows the environments and playbooks of the deployment tree.

use std::path::Path;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::constants;
use crate::error::Result;

/// Print environments and playbooks.
pub fn execute() -> Result<i32> {
    let config = Config::load(Path::new("."))?;
    let layout = config.layout();

    let environments = layout.environments()?;
    let playbooks = layout.playbooks()?;

    output::header("Environments");
    if environments.is_empty() {
        output::dimmed(&format!("  none under {}", output::path(&layout.base().display().to_string())));
    }
    for env in &environments {
        output::list_item(env);
    }

    println!();
    output::header("Playbooks");
    if playbooks.is_empty() {
        output::dimmed("  none");
    }
    for playbook in &playbooks {
        output::list_item(&playbook_label(playbook));
    }

    Ok(0)
}

fn playbook_label(name: &str) -> String {
    if name == constants::DEFAULT_PLAYBOOK {
        format!("{} (default)", name)
    } else {
        name.to_string()
    }
}
