//! Error types.
//!
//! One enum per layer, wrapped by the top-level [`Error`]. Retrieval and
//! decryption errors always carry the origin (`<reference>:<path>`) they
//! were raised for.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::vault::envelope::EnvelopeError;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit code for this error.
    ///
    /// - 2: invalid input (environment, reference, configuration)
    /// - 3: retrieval failure (key file, working copy, history)
    /// - 4: decryption failure
    /// - 1: anything else
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) | Self::Config(_) => 2,
            Self::Key(_) | Self::Fetch(_) => 3,
            Self::Vault(_) => 4,
            Self::Process(_) | Self::Io(_) => 1,
        }
    }
}

/// Invalid user input, detected before any I/O.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("invalid environment '{name}': {reason}")]
    InvalidEnvironment { name: String, reason: &'static str },

    #[error("invalid reference '{reference}': {reason}")]
    InvalidReference {
        reference: String,
        reason: &'static str,
    },

    #[error("invalid playbook '{name}': {reason}")]
    InvalidPlaybook { name: String, reason: &'static str },
}

/// Vault password file errors.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("vault password file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to read vault password file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("vault password file is empty: {}", .0.display())]
    Empty(PathBuf),
}

/// Ciphertext retrieval errors.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("secrets file not found: {origin}")]
    NotFound { origin: String },

    #[error("failed to read {origin}: {source}")]
    Read {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("not found in history: {origin}")]
    RevisionNotFound { origin: String },

    #[error("history query failed for {origin}: {reason}")]
    HistoryQuery { origin: String, reason: String },
}

/// Decryption errors.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("not a vault file: {origin}: {source}")]
    Malformed {
        origin: String,
        #[source]
        source: EnvelopeError,
    },

    #[error("decryption failed for {origin}: HMAC mismatch (wrong vault password?)")]
    AuthenticationFailed { origin: String },

    #[error("decrypted {origin} is not valid UTF-8")]
    InvalidUtf8 { origin: String },

    #[error("key derivation failed for {origin}")]
    KeyDerivation { origin: String },
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// External process errors.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("{program} not found on PATH")]
    NotInstalled { program: String },

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
