//! Vault decryption.
//!
//! Decrypts Ansible Vault `AES256` files (format versions 1.1 and 1.2):
//!
//! 1. PBKDF2-HMAC-SHA256 (10000 rounds) stretches the password and the
//!    file's salt into 80 bytes: AES key, HMAC key, CTR counter block
//! 2. HMAC-SHA256 over the ciphertext is verified before anything is
//!    decrypted
//! 3. AES-256-CTR decrypts, then PKCS#7 padding is stripped
//!
//! Key material is read once per invocation and handed to
//! [`SecretsDecryptor::new`]; it is zeroized when the decryptor drops.

use std::fmt;
use std::io::ErrorKind;
use std::path::Path;

use ctr::cipher::generic_array::GenericArray;
use ctr::cipher::{KeyIvInit, StreamCipher};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::core::source::Ciphertext;
use crate::core::types::Origin;
use crate::error::{KeyError, Result, VaultError};

pub mod envelope;

use envelope::Envelope;

type Aes256Ctr = ctr::Ctr128BE<aes::Aes256>;
type HmacSha256 = Hmac<Sha256>;

/// PBKDF2 iteration count fixed by the format.
pub const PBKDF2_ROUNDS: u32 = 10_000;

const CIPHER_KEY_LEN: usize = 32;
const HMAC_KEY_LEN: usize = 32;
const IV_LEN: usize = 16;
const DERIVED_LEN: usize = CIPHER_KEY_LEN + HMAC_KEY_LEN + IV_LEN;

/// The vault password.
///
/// Surrounding whitespace is trimmed on construction. The bytes are wiped
/// from memory on drop and never appear in `Debug` output.
pub struct KeyMaterial(Zeroizing<Vec<u8>>);

impl KeyMaterial {
    /// Wrap password bytes, trimming leading and trailing whitespace.
    pub fn new(bytes: impl AsRef<[u8]>) -> Self {
        Self(Zeroizing::new(trim(bytes.as_ref()).to_vec()))
    }

    /// Read the password from a file.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Missing` if the file does not exist,
    /// `KeyError::Read` on other I/O failures and `KeyError::Empty` if the
    /// file holds nothing but whitespace.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading vault password");

        let raw = std::fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => KeyError::Missing(path.to_path_buf()),
            _ => KeyError::Read {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        let raw = Zeroizing::new(raw);

        let key = Self::new(&raw[..]);
        if key.is_empty() {
            return Err(KeyError::Empty(path.to_path_buf()).into());
        }
        Ok(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn expose(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyMaterial(<redacted>)")
    }
}

/// Trim whitespace the way the password file has always been read.
fn trim(bytes: &[u8]) -> &[u8] {
    let is_space = |b: &u8| b.is_ascii_whitespace() || *b == 0x0b;
    let start = bytes.iter().position(|b| !is_space(b)).unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !is_space(b))
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

/// Decrypted text with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plaintext {
    pub origin: Origin,
    pub text: String,
}

/// Decrypts vault files with a single password.
#[derive(Debug)]
pub struct SecretsDecryptor {
    key: KeyMaterial,
}

impl SecretsDecryptor {
    pub fn new(key: KeyMaterial) -> Self {
        Self { key }
    }

    /// Decrypt a retrieved vault file.
    ///
    /// # Errors
    ///
    /// - `VaultError::Malformed` if the bytes are not a supported vault file
    /// - `VaultError::AuthenticationFailed` if the HMAC does not verify
    ///   (wrong password or tampered file)
    /// - `VaultError::InvalidUtf8` if the decrypted bytes are not text
    pub fn decrypt(&self, ciphertext: Ciphertext) -> Result<Plaintext> {
        let Ciphertext { origin, bytes } = ciphertext;
        trace!(origin = %origin, ciphertext_len = bytes.len(), "decrypting");

        let malformed = |source| VaultError::Malformed {
            origin: origin.to_string(),
            source,
        };

        let envelope = Envelope::parse(&bytes).map_err(malformed)?;
        debug!(version = ?envelope.version, vault_id = ?envelope.vault_id, "parsed vault envelope");

        let mut derived = Zeroizing::new([0u8; DERIVED_LEN]);
        pbkdf2::pbkdf2_hmac::<Sha256>(
            self.key.expose(),
            &envelope.salt,
            PBKDF2_ROUNDS,
            &mut derived[..],
        );
        let (cipher_key, rest) = derived.split_at(CIPHER_KEY_LEN);
        let (hmac_key, iv) = rest.split_at(HMAC_KEY_LEN);

        let mut mac = HmacSha256::new_from_slice(hmac_key).map_err(|_| {
            VaultError::KeyDerivation {
                origin: origin.to_string(),
            }
        })?;
        mac.update(&envelope.ciphertext);
        mac.verify_slice(&envelope.hmac)
            .map_err(|_| VaultError::AuthenticationFailed {
                origin: origin.to_string(),
            })?;

        let mut buf = envelope.ciphertext;
        let mut cipher = Aes256Ctr::new(
            GenericArray::from_slice(cipher_key),
            GenericArray::from_slice(iv),
        );
        cipher.apply_keystream(&mut buf);
        let buf = envelope::unpad(buf).map_err(malformed)?;

        let text = String::from_utf8(buf).map_err(|_| VaultError::InvalidUtf8 {
            origin: origin.to_string(),
        })?;

        trace!(plaintext_len = text.len(), "decrypted");
        Ok(Plaintext { origin, text })
    }
}
