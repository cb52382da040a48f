//! Test fixtures and constants.
//!
//! The `*.vault` files are real Ansible Vault 1.1/1.2 files encrypted with
//! [`PASSWORD`].

/// Password every fixture is encrypted with.
pub const PASSWORD: &str = "correct horse";

/// A password that decrypts nothing.
pub const WRONG_PASSWORD: &str = "battery staple";

/// [`PASSWORD`] with a trailing newline, as a `.vault_pass` file.
pub const VAULT_PASS: &str = "vault_pass";

/// `db_password: abc123\n`
pub const STAGING: &str = "staging.vault";

/// `key: new\n`
pub const KEY_NEW: &str = "key_new.vault";

/// `key: new\n` again, sealed with a different salt.
pub const KEY_NEW_RESEALED: &str = "key_new_resealed.vault";

/// `key: old\n`
pub const KEY_OLD: &str = "key_old.vault";

/// Empty plaintext.
pub const EMPTY: &str = "empty.vault";

/// `a: 1\nb: 2` (no trailing newline)
pub const NO_NEWLINE: &str = "no_newline.vault";

/// `user: admin\npassword: s3cret\n`, format 1.2 with vault id `prod`.
pub const PROD_V12: &str = "prod_v12.vault";

/// Raw bytes of a fixture.
pub fn fixture(name: &str) -> Vec<u8> {
    let path = super::fixtures_dir().join(name);
    std::fs::read(&path).unwrap_or_else(|e| panic!("missing fixture {}: {}", path.display(), e))
}
