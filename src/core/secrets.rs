//! Secrets inspection.
//!
//! Wires the pieces together for one invocation: locate the secrets file,
//! fetch it at one or two references, decrypt each with the same key, and
//! report the plaintext or the diff between them.

use std::path::PathBuf;

use tracing::debug;

use crate::core::diff::{DiffReporter, DiffResult};
use crate::core::layout::Layout;
use crate::core::source::ContentSource;
use crate::core::types::Reference;
use crate::core::vault::{KeyMaterial, SecretsDecryptor};
use crate::error::Result;

/// One `secrets` invocation.
#[derive(Debug, Clone)]
pub struct SecretsRequest {
    pub environment: String,
    /// Defaults to the working copy.
    pub primary: Reference,
    /// Reference to diff against, shown as the "from" side.
    pub comparison: Option<Reference>,
}

impl SecretsRequest {
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            primary: Reference::WorkingCopy,
            comparison: None,
        }
    }

    pub fn at(mut self, reference: Reference) -> Self {
        self.primary = reference;
        self
    }

    pub fn diff_against(mut self, reference: Reference) -> Self {
        self.comparison = Some(reference);
        self
    }
}

/// Secrets orchestrator over any [`ContentSource`].
#[derive(Debug)]
pub struct SecretsCommand<S> {
    layout: Layout,
    source: S,
    key_file: PathBuf,
    reporter: DiffReporter,
}

impl<S: ContentSource> SecretsCommand<S> {
    pub fn new(layout: Layout, source: S, key_file: impl Into<PathBuf>, reporter: DiffReporter) -> Self {
        Self {
            layout,
            source,
            key_file: key_file.into(),
            reporter,
        }
    }

    /// Run the request, reading the password from the key file.
    ///
    /// The environment name is validated before the key file is touched.
    ///
    /// # Errors
    ///
    /// Fails as a whole on the first error; nothing is partially reported.
    pub fn execute(&self, request: &SecretsRequest) -> Result<DiffResult> {
        self.layout.secrets_path(&request.environment)?;
        let key = KeyMaterial::load(&self.key_file)?;
        self.execute_with_key(request, key)
    }

    /// Run the request with an already-loaded password.
    pub fn execute_with_key(&self, request: &SecretsRequest, key: KeyMaterial) -> Result<DiffResult> {
        let path = self.layout.secrets_path(&request.environment)?;
        debug!(
            environment = %request.environment,
            primary = %request.primary,
            comparison = ?request.comparison.as_ref().map(|r| r.to_string()),
            "inspecting secrets"
        );

        // Fetch everything before decrypting anything.
        let primary = self.source.fetch(&request.primary, &path)?;
        let comparison = request
            .comparison
            .as_ref()
            .map(|reference| self.source.fetch(reference, &path))
            .transpose()?;

        let decryptor = SecretsDecryptor::new(key);
        let primary = decryptor.decrypt(primary)?;
        let comparison = comparison.map(|c| decryptor.decrypt(c)).transpose()?;

        Ok(self.reporter.report(primary, comparison))
    }
}
