//! The stored form of an encrypted field
//!
//! An encrypted field is stored as `<ivHex>:<cipherHex>`: the 12-byte nonce
//! and the ciphertext (tag included), both lowercase hex, joined by a single
//! colon.

use std::fmt;
use std::str::FromStr;

use crate::error::{CryptError, CryptResult};

use super::encryption::{NONCE_SIZE, TAG_SIZE};

/// Separator between the IV and ciphertext segments
pub const DELIMITER: char = ':';

/// An encrypted payload: IV plus ciphertext body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedValue {
    iv: [u8; NONCE_SIZE],
    body: Vec<u8>,
}

impl EncryptedValue {
    pub(crate) fn new(iv: [u8; NONCE_SIZE], body: Vec<u8>) -> Self {
        Self { iv, body }
    }

    /// Check whether a string has the encrypted shape
    ///
    /// The shape is exactly one colon between a 24-digit hex IV and a
    /// non-empty hex body. The body's length is not part of the shape, so a
    /// truncated ciphertext still counts as encrypted.
    pub fn matches(s: &str) -> bool {
        let Some((iv_hex, body_hex)) = s.split_once(DELIMITER) else {
            return false;
        };
        iv_hex.len() == NONCE_SIZE * 2
            && is_hex(iv_hex)
            && !body_hex.is_empty()
            && is_hex(body_hex)
    }

    /// Decode a value with the encrypted shape
    ///
    /// Returns `None` when `s` doesn't have the encrypted shape, and
    /// `CryptError::DecryptionFailure` when it does but the body can't be a
    /// ciphertext (odd hex length, or shorter than the tag).
    pub fn parse(s: &str) -> Option<CryptResult<Self>> {
        if !Self::matches(s) {
            return None;
        }
        let (iv_hex, body_hex) = s.split_once(DELIMITER)?;
        Some(Self::decode(iv_hex, body_hex))
    }

    fn decode(iv_hex: &str, body_hex: &str) -> CryptResult<Self> {
        let mut iv = [0u8; NONCE_SIZE];
        hex::decode_to_slice(iv_hex, &mut iv)
            .map_err(|e| CryptError::DecryptionFailure(format!("Malformed IV: {}", e)))?;

        let body = hex::decode(body_hex)
            .map_err(|e| CryptError::DecryptionFailure(format!("Malformed ciphertext: {}", e)))?;
        if body.len() < TAG_SIZE {
            return Err(CryptError::DecryptionFailure(format!(
                "Ciphertext too short: {} bytes",
                body.len()
            )));
        }

        Ok(Self { iv, body })
    }

    /// The initialization vector
    pub fn iv(&self) -> &[u8; NONCE_SIZE] {
        &self.iv
    }

    /// The ciphertext body, authentication tag included
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

fn is_hex(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_hexdigit())
}

impl fmt::Display for EncryptedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            hex::encode(self.iv),
            DELIMITER,
            hex::encode(&self.body)
        )
    }
}

impl FromStr for EncryptedValue {
    type Err = CryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).unwrap_or_else(|| {
            Err(CryptError::Validation(
                "value is not in '<ivHex>:<cipherHex>' form".to_string(),
            ))
        })
    }
}
