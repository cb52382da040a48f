//! Working-copy backend.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Ciphertext, ContentSource};
use crate::core::types::{Origin, Reference};
use crate::error::{FetchError, Result};

/// Reads files from the live filesystem under a project root.
#[derive(Debug, Clone)]
pub struct WorkingCopy {
    root: PathBuf,
}

impl WorkingCopy {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ContentSource for WorkingCopy {
    fn fetch(&self, reference: &Reference, path: &Path) -> Result<Ciphertext> {
        let origin = Origin::new(reference.clone(), path);
        if !reference.is_working_copy() {
            return Err(FetchError::HistoryQuery {
                origin: origin.to_string(),
                reason: "the working copy has no history".to_string(),
            }
            .into());
        }

        let full = self.root.join(path);
        debug!(path = %full.display(), "reading working copy");

        let bytes = std::fs::read(&full).map_err(|e| match e.kind() {
            ErrorKind::NotFound => FetchError::NotFound {
                origin: origin.to_string(),
            },
            _ => FetchError::Read {
                origin: origin.to_string(),
                source: e,
            },
        })?;

        debug!(len = bytes.len(), "read working copy");
        Ok(Ciphertext { origin, bytes })
    }
}
