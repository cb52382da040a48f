//! Constants used throughout tequila.
//!
//! Centralizes file names and the deployment tree layout.

/// Project configuration file name (.tequila.toml).
pub const CONFIG_FILE: &str = ".tequila.toml";

/// Vault password file, relative to the project root.
pub const KEY_FILE: &str = ".vault_pass";

/// Root of the deployment tree, relative to the project root.
pub const DEPLOYMENT_DIR: &str = "deployment";

/// Directory holding one subdirectory per environment.
pub const ENVIRONMENTS_DIR: &str = "environments";

/// Directory holding playbooks.
pub const PLAYBOOKS_DIR: &str = "playbooks";

/// Path of the secrets file inside an environment directory.
pub const SECRETS_FILE: &[&str] = &["group_vars", "all", "secrets.yml"];

/// Inventory file inside an environment directory.
pub const INVENTORY_FILE: &str = "inventory";

/// Role requirements file inside the deployment tree.
pub const REQUIREMENTS_FILE: &str = "requirements.yml";

/// Playbook run when none is named.
pub const DEFAULT_PLAYBOOK: &str = "site";

/// Playbook file extension.
pub const PLAYBOOK_EXT: &str = "yml";

/// Command-line spelling of the working-copy reference.
pub const WORKING_COPY: &str = ".";

/// Default executables.
pub const GIT: &str = "git";
pub const ANSIBLE_PLAYBOOK: &str = "ansible-playbook";
pub const ANSIBLE_GALAXY: &str = "ansible-galaxy";

/// Lines of context around each diff hunk.
pub const DIFF_CONTEXT: usize = 3;
