//! Retrieval points and origin labels.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::core::constants::WORKING_COPY;
use crate::error::{Error, ValidationError};

/// A point in time to read a tracked file from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Reference {
    /// The live file on disk.
    #[default]
    WorkingCopy,
    /// An opaque git revision (commit, tag, branch, `HEAD~2`, ...).
    Revision(String),
}

impl Reference {
    pub fn is_working_copy(&self) -> bool {
        matches!(self, Self::WorkingCopy)
    }
}

impl FromStr for Reference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == WORKING_COPY {
            return Ok(Self::WorkingCopy);
        }
        if s.trim().is_empty() {
            return Err(ValidationError::InvalidReference {
                reference: s.to_string(),
                reason: "empty",
            }
            .into());
        }
        // git would parse it as an option
        if s.starts_with('-') {
            return Err(ValidationError::InvalidReference {
                reference: s.to_string(),
                reason: "cannot start with '-'",
            }
            .into());
        }
        Ok(Self::Revision(s.to_string()))
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorkingCopy => f.write_str(WORKING_COPY),
            Self::Revision(rev) => f.write_str(rev),
        }
    }
}

/// Where a blob came from: a reference plus a project-relative path.
///
/// Displays as `<reference>:<path>`, the form used in diff headers and
/// error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub reference: Reference,
    pub path: String,
}

impl Origin {
    pub fn new(reference: Reference, path: &Path) -> Self {
        Self {
            reference,
            path: slash_path(path),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.reference, self.path)
    }
}

/// Render a relative path with `/` separators regardless of platform.
pub fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
