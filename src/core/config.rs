//! Configuration file management.
//!
//! Handles reading and validating the optional `.tequila.toml` in the
//! project root. Every key has a default, so a missing file and an empty
//! file behave the same.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::core::constants;
use crate::core::diff::{DiffAlgorithm, DiffReporter};
use crate::core::layout::Layout;
use crate::error::{ConfigError, Result};

/// Project configuration stored in `.tequila.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub layout: LayoutConfig,
    pub secrets: SecretsConfig,
    pub diff: DiffConfig,
    pub ansible: AnsibleConfig,
}

/// Where the deployment tree lives.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Root of the deployment tree, relative to the project root
    pub base_dir: PathBuf,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(constants::DEPLOYMENT_DIR),
        }
    }
}

/// Secrets retrieval settings.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SecretsConfig {
    /// Vault password file, relative to the project root
    pub key_file: PathBuf,
    /// git executable used for history queries
    pub git: String,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            key_file: PathBuf::from(constants::KEY_FILE),
            git: constants::GIT.to_string(),
        }
    }
}

/// Diff rendering settings.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffConfig {
    /// Lines of context around each hunk
    pub context: usize,
    pub algorithm: DiffAlgorithm,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            context: constants::DIFF_CONTEXT,
            algorithm: DiffAlgorithm::default(),
        }
    }
}

/// External Ansible executables.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnsibleConfig {
    pub playbook: String,
    pub galaxy: String,
}

impl Default for AnsibleConfig {
    fn default() -> Self {
        Self {
            playbook: constants::ANSIBLE_PLAYBOOK.to_string(),
            galaxy: constants::ANSIBLE_GALAXY.to_string(),
        }
    }
}

/// Upper bound for `diff.context`; more is indistinguishable from the whole file.
const MAX_CONTEXT: usize = 10_000;

impl Config {
    /// Path to the configuration file under `root`
    pub fn config_path(root: &Path) -> PathBuf {
        root.join(constants::CONFIG_FILE)
    }

    /// Load configuration from `<root>/.tequila.toml`, or defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file exists but cannot be read,
    /// `ConfigError::Parse` if the TOML is malformed or has unknown keys,
    /// and `ConfigError::InvalidValue` if validation fails.
    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::config_path(root);
        debug!(path = %path.display(), "loading config");

        let config = match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no config file, using defaults");
                Self::default()
            }
            Err(e) => return Err(ConfigError::Read(e).into()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e).into())
    }

    /// Validate the configuration values
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for empty paths or executables
    /// and for an out-of-range diff context.
    pub fn validate(&self) -> Result<()> {
        let empty = |field: &'static str| ConfigError::InvalidValue {
            field,
            reason: "must not be empty".to_string(),
        };

        if self.layout.base_dir.as_os_str().is_empty() {
            return Err(empty("layout.base_dir").into());
        }
        if self.secrets.key_file.as_os_str().is_empty() {
            return Err(empty("secrets.key_file").into());
        }
        if self.secrets.git.trim().is_empty() {
            return Err(empty("secrets.git").into());
        }
        if self.ansible.playbook.trim().is_empty() {
            return Err(empty("ansible.playbook").into());
        }
        if self.ansible.galaxy.trim().is_empty() {
            return Err(empty("ansible.galaxy").into());
        }
        if self.diff.context > MAX_CONTEXT {
            return Err(ConfigError::InvalidValue {
                field: "diff.context",
                reason: format!("{} exceeds the maximum of {}", self.diff.context, MAX_CONTEXT),
            }
            .into());
        }
        Ok(())
    }

    /// The deployment tree layout.
    pub fn layout(&self) -> Layout {
        Layout::new(&self.layout.base_dir)
    }

    /// The diff reporter configured by `[diff]`.
    pub fn reporter(&self) -> DiffReporter {
        DiffReporter::new(self.diff.context, self.diff.algorithm)
    }
}
