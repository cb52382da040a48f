//! Tequila - run playbooks and inspect vault secrets for your environments.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── secrets       # Print or diff an environment's secrets
//! │   ├── play          # Run a playbook
//! │   ├── roles         # Install role requirements
//! │   ├── list          # List environments and playbooks
//! │   ├── completions   # Shell completions
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── config        # .tequila.toml management
//!     ├── layout        # Deployment tree path conventions
//!     ├── source/       # Ciphertext retrieval backends
//!     │   ├── mod       # ContentSource trait, Repository router
//!     │   ├── fs        # Working copy
//!     │   └── git       # git history
//!     ├── vault/        # Vault decryption
//!     │   ├── mod       # KeyMaterial, SecretsDecryptor
//!     │   └── envelope  # $ANSIBLE_VAULT text framing
//!     ├── diff          # Unified diff reporting
//!     ├── secrets       # Secrets orchestration
//!     └── playbook      # ansible-playbook / ansible-galaxy invocations
//! ```
//!
//! # Features
//!
//! - Reads Ansible Vault 1.1 and 1.2 (`AES256`) files
//! - Reads secrets from the working copy or any git revision
//! - Unified diffs between two revisions of an environment's secrets
//! - Pass-through playbook runs with the right inventory

pub mod cli;
pub mod core;
pub mod error;
