//! Ciphertext retrieval.
//!
//! A [`ContentSource`] turns a `(reference, path)` pair into raw bytes.
//! Two backends ship with tequila:
//!
//! - [`WorkingCopy`]: reads the live file under the project root
//! - [`GitHistory`]: reads the file as stored at a git revision
//!
//! [`Repository`] routes each reference to the backend that serves it, so
//! callers never branch on the reference kind themselves.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `ContentSource` trait
//! 2. Add the implementation in a new file (e.g., `remote.rs`)
//! 3. Route the references it serves in `Repository::backend_for`

use std::path::{Path, PathBuf};

use crate::core::types::{Origin, Reference};
use crate::error::Result;

mod fs;
mod git;

pub use fs::WorkingCopy;
pub use git::GitHistory;

/// Raw encrypted bytes tagged with where they were read from.
#[derive(Debug, Clone)]
pub struct Ciphertext {
    pub origin: Origin,
    pub bytes: Vec<u8>,
}

/// Retrieval backend trait.
///
/// Every call is an independent read: no caching, no side effects on the
/// underlying store.
pub trait ContentSource {
    /// Read `path` as it exists at `reference`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the content cannot be retrieved.
    fn fetch(&self, reference: &Reference, path: &Path) -> Result<Ciphertext>;
}

impl<S: ContentSource + ?Sized> ContentSource for &S {
    fn fetch(&self, reference: &Reference, path: &Path) -> Result<Ciphertext> {
        (**self).fetch(reference, path)
    }
}

/// The project checkout: working copy plus its git history.
#[derive(Debug, Clone)]
pub struct Repository {
    working: WorkingCopy,
    history: GitHistory,
}

impl Repository {
    /// Open the project rooted at `root`, using `git` for history queries.
    pub fn new(root: impl Into<PathBuf>, git: impl Into<String>) -> Self {
        let root = root.into();
        Self {
            working: WorkingCopy::new(root.clone()),
            history: GitHistory::new(root, git),
        }
    }

    fn backend_for(&self, reference: &Reference) -> &dyn ContentSource {
        match reference {
            Reference::WorkingCopy => &self.working,
            Reference::Revision(_) => &self.history,
        }
    }
}

impl ContentSource for Repository {
    fn fetch(&self, reference: &Reference, path: &Path) -> Result<Ciphertext> {
        self.backend_for(reference).fetch(reference, path)
    }
}
