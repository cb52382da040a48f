//! Vault file envelope.
//!
//! Parses the text framing of an Ansible Vault file:
//!
//! ```text
//! $ANSIBLE_VAULT;1.1;AES256
//! 6236356265323531...   (hex, wrapped at 80 columns)
//! ```
//!
//! The hex body decodes to three newline-separated fields:
//! `hex(salt)`, `hex(hmac)` and `hex(ciphertext)`.

use thiserror::Error;

/// Magic tag opening every vault file.
pub const MAGIC: &str = "$ANSIBLE_VAULT";

/// The only cipher the format defines.
pub const CIPHER: &str = "AES256";

/// Envelope parse failures.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("missing $ANSIBLE_VAULT header")]
    MissingHeader,

    #[error("not valid UTF-8 text")]
    NotText,

    #[error("unsupported format version {0}")]
    UnsupportedVersion(String),

    #[error("unsupported cipher {0}")]
    UnsupportedCipher(String),

    #[error("invalid hex in {0}")]
    InvalidHex(&'static str),

    #[error("missing {0} section")]
    MissingSection(&'static str),

    #[error("invalid padding")]
    InvalidPadding,
}

/// Format versions understood by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    /// `1.1`: no vault id.
    V1_1,
    /// `1.2`: header carries a vault id.
    V1_2,
}

/// A parsed, still-encrypted vault file.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub version: Version,
    pub vault_id: Option<String>,
    pub salt: Vec<u8>,
    pub hmac: Vec<u8>,
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Parse the raw bytes of a vault file.
    ///
    /// # Errors
    ///
    /// Returns `EnvelopeError` describing the first framing problem found.
    pub fn parse(raw: &[u8]) -> Result<Self, EnvelopeError> {
        let text = std::str::from_utf8(raw).map_err(|_| EnvelopeError::NotText)?;
        let mut lines = text.lines();
        let header = lines.next().ok_or(EnvelopeError::MissingHeader)?.trim();

        let fields: Vec<&str> = header.split(';').map(str::trim).collect();
        if fields.first() != Some(&MAGIC) || fields.len() < 3 {
            return Err(EnvelopeError::MissingHeader);
        }

        let version = match fields[1] {
            "1.1" => Version::V1_1,
            "1.2" => Version::V1_2,
            other => return Err(EnvelopeError::UnsupportedVersion(other.to_string())),
        };
        if fields[2] != CIPHER {
            return Err(EnvelopeError::UnsupportedCipher(fields[2].to_string()));
        }
        let vault_id = match version {
            Version::V1_2 => fields.get(3).map(|id| id.to_string()),
            Version::V1_1 => None,
        };

        let body: String = lines.map(str::trim).collect();
        if body.is_empty() {
            return Err(EnvelopeError::MissingSection("payload"));
        }
        let payload = hex::decode(body).map_err(|_| EnvelopeError::InvalidHex("payload"))?;

        let mut sections = payload.splitn(3, |b| *b == b'\n');
        let salt = decode_section(sections.next(), "salt")?;
        let hmac = decode_section(sections.next(), "hmac")?;
        let ciphertext = decode_section(sections.next(), "ciphertext")?;

        Ok(Self {
            version,
            vault_id,
            salt,
            hmac,
            ciphertext,
        })
    }
}

fn decode_section(section: Option<&[u8]>, name: &'static str) -> Result<Vec<u8>, EnvelopeError> {
    let section = section.ok_or(EnvelopeError::MissingSection(name))?;
    if section.is_empty() && name != "ciphertext" {
        return Err(EnvelopeError::MissingSection(name));
    }
    hex::decode(section).map_err(|_| EnvelopeError::InvalidHex(name))
}

/// Strip PKCS#7 padding for a 16-byte block cipher.
pub fn unpad(mut data: Vec<u8>) -> Result<Vec<u8>, EnvelopeError> {
    const BLOCK: usize = 16;
    let n = *data.last().ok_or(EnvelopeError::InvalidPadding)? as usize;
    if n == 0 || n > BLOCK || n > data.len() || data.len() % BLOCK != 0 {
        return Err(EnvelopeError::InvalidPadding);
    }
    if !data[data.len() - n..].iter().all(|b| *b as usize == n) {
        return Err(EnvelopeError::InvalidPadding);
    }
    data.truncate(data.len() - n);
    Ok(data)
}
