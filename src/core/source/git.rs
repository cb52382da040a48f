//! Git history backend.
//!
//! Reads a file as stored at a revision with `git show <rev>:./<path>`,
//! run from the project root so paths resolve relative to it.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, trace};

use super::{Ciphertext, ContentSource};
use crate::core::types::{slash_path, Origin, Reference};
use crate::error::{FetchError, Result};

/// stderr fragments git prints when the revision or the path does not exist.
const MISSING_MARKERS: &[&str] = &[
    "does not exist in",
    "exists on disk, but not in",
    "invalid object name",
    "not a valid object name",
    "unknown revision",
    "bad revision",
];

/// Reads historical file contents through the git CLI.
#[derive(Debug, Clone)]
pub struct GitHistory {
    root: PathBuf,
    program: String,
}

impl GitHistory {
    pub fn new(root: impl Into<PathBuf>, program: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            program: program.into(),
        }
    }

    fn show(&self, revision: &str, path: &Path, origin: &Origin) -> Result<Vec<u8>> {
        let query_failed = |reason: String| FetchError::HistoryQuery {
            origin: origin.to_string(),
            reason,
        };

        let program = which::which(&self.program)
            .map_err(|_| query_failed(format!("{} not found on PATH", self.program)))?;

        let spec = format!("{}:./{}", revision, slash_path(path));
        debug!(spec = %spec, "querying git history");

        let output = Command::new(program)
            .args(["show", "--no-textconv", &spec])
            .current_dir(&self.root)
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| query_failed(format!("failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            trace!(status = ?output.status.code(), stderr = %stderr.trim(), "git show failed");
            if is_missing_object(&stderr) {
                return Err(FetchError::RevisionNotFound {
                    origin: origin.to_string(),
                }
                .into());
            }
            return Err(query_failed(stderr.trim().to_string()).into());
        }

        debug!(len = output.stdout.len(), "read from history");
        Ok(output.stdout)
    }
}

impl ContentSource for GitHistory {
    fn fetch(&self, reference: &Reference, path: &Path) -> Result<Ciphertext> {
        let origin = Origin::new(reference.clone(), path);
        let bytes = match reference {
            Reference::Revision(revision) => self.show(revision, path, &origin)?,
            Reference::WorkingCopy => {
                return Err(FetchError::HistoryQuery {
                    origin: origin.to_string(),
                    reason: "the working copy is not a revision".to_string(),
                }
                .into())
            }
        };
        Ok(Ciphertext { origin, bytes })
    }
}

/// Whether git's stderr says the revision or path does not exist.
fn is_missing_object(stderr: &str) -> bool {
    let stderr = stderr.to_ascii_lowercase();
    MISSING_MARKERS.iter().any(|m| stderr.contains(m))
}
