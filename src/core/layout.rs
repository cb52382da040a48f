//! Deployment tree layout.
//!
//! Maps environment and playbook names onto paths inside the deployment
//! tree. Path derivation is pure; only the listing helpers touch the disk.
//!
//! ```text
//! deployment/
//! ├── environments/
//! │   └── <name>/
//! │       ├── inventory
//! │       └── group_vars/all/secrets.yml
//! ├── playbooks/<playbook>.yml
//! └── requirements.yml
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::constants;
use crate::error::{Result, ValidationError};

/// Path conventions of a deployment tree rooted at `base`.
#[derive(Debug, Clone)]
pub struct Layout {
    base: PathBuf,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(constants::DEPLOYMENT_DIR)
    }
}

impl Layout {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn environments_dir(&self) -> PathBuf {
        self.base.join(constants::ENVIRONMENTS_DIR)
    }

    fn playbooks_dir(&self) -> PathBuf {
        self.base.join(constants::PLAYBOOKS_DIR)
    }

    /// Path to an environment's encrypted secrets file.
    ///
    /// Pure: no I/O is performed, so a name that passes validation but has no
    /// directory on disk still yields a path.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidEnvironment` if the name is empty,
    /// is `.` or `..`, or contains a path separator or NUL byte.
    pub fn secrets_path(&self, environment: &str) -> Result<PathBuf> {
        let mut path = self.environment_dir(environment)?;
        path.extend(constants::SECRETS_FILE);
        Ok(path)
    }

    /// Path to an environment's inventory.
    pub fn inventory_path(&self, environment: &str) -> Result<PathBuf> {
        Ok(self
            .environment_dir(environment)?
            .join(constants::INVENTORY_FILE))
    }

    /// Path to a playbook, appending `.yml` when the name lacks it.
    pub fn playbook_path(&self, playbook: &str) -> Result<PathBuf> {
        if let Err(reason) = check_segment(playbook) {
            return Err(ValidationError::InvalidPlaybook {
                name: playbook.to_string(),
                reason,
            }
            .into());
        }
        let suffix = format!(".{}", constants::PLAYBOOK_EXT);
        let file = if playbook.ends_with(&suffix) {
            playbook.to_string()
        } else {
            format!("{}{}", playbook, suffix)
        };
        Ok(self.playbooks_dir().join(file))
    }

    /// Path to the role requirements file.
    pub fn requirements_path(&self) -> PathBuf {
        self.base.join(constants::REQUIREMENTS_FILE)
    }

    /// Environment names present on disk, sorted.
    ///
    /// A missing environments directory yields an empty list.
    pub fn environments(&self) -> Result<Vec<String>> {
        let dir = self.environments_dir();
        let mut names = Vec::new();
        for entry in read_dir_or_empty(&dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        names.sort();
        debug!(dir = %dir.display(), count = names.len(), "listed environments");
        Ok(names)
    }

    /// Playbook names (file stems of `*.yml`) present on disk, sorted.
    pub fn playbooks(&self) -> Result<Vec<String>> {
        let dir = self.playbooks_dir();
        let mut names = Vec::new();
        for entry in read_dir_or_empty(&dir)? {
            let path = entry?.path();
            let is_playbook = path
                .extension()
                .is_some_and(|ext| ext == constants::PLAYBOOK_EXT);
            if !is_playbook || !path.is_file() {
                continue;
            }
            if let Some(stem) = path.file_stem() {
                names.push(stem.to_string_lossy().to_string());
            }
        }
        names.sort();
        debug!(dir = %dir.display(), count = names.len(), "listed playbooks");
        Ok(names)
    }

    fn environment_dir(&self, environment: &str) -> Result<PathBuf> {
        validate_environment(environment)?;
        Ok(self.environments_dir().join(environment))
    }
}

/// Check an environment name without deriving any path.
///
/// The rules do not depend on the base directory, so commands call this
/// before loading configuration.
///
/// # Errors
///
/// Returns `ValidationError::InvalidEnvironment` for the names
/// [`Layout::secrets_path`] rejects.
pub fn validate_environment(environment: &str) -> Result<()> {
    check_segment(environment).map_err(|reason| ValidationError::InvalidEnvironment {
        name: environment.to_string(),
        reason,
    })?;
    Ok(())
}

/// A name must be a single normal path segment.
fn check_segment(name: &str) -> std::result::Result<(), &'static str> {
    if name.is_empty() {
        return Err("name is empty");
    }
    if name == "." || name == ".." {
        return Err("path traversal is not allowed");
    }
    if name.contains(['/', '\\']) {
        return Err("path separators are not allowed");
    }
    if name.contains('\0') {
        return Err("NUL bytes are not allowed");
    }
    Ok(())
}

fn read_dir_or_empty(dir: &Path) -> Result<Vec<std::io::Result<fs::DirEntry>>> {
    match fs::read_dir(dir) {
        Ok(entries) => Ok(entries.collect()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}
