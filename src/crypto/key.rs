//! Encryption key provisioning
//!
//! The server-held key comes from process configuration. The configured
//! secret is interpreted, in order, as 64 hex digits, as base64 of 32 bytes,
//! or as a passphrase stretched with Argon2id using the salt and cost
//! parameters stored in settings.

use std::fmt;

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use argon2::{password_hash::SaltString, Argon2, Params};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{CryptError, CryptResult};

/// Key length for AES-256
pub const KEY_SIZE: usize = 32;

/// Shortest passphrase accepted as key material
pub const MIN_PASSPHRASE_LEN: usize = 8;

/// Default environment variable holding the key material
pub const DEFAULT_KEY_ENV_VAR: &str = "FIELDCRYPT_KEY";

/// Parameters for stretching a passphrase into a key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDerivationParams {
    /// Salt for key derivation (unpadded base64, as produced by `SaltString`)
    pub salt: String,
    /// Memory cost in KiB (default: 65536 = 64 MiB)
    pub memory_cost: u32,
    /// Time cost (iterations, default: 3)
    pub time_cost: u32,
    /// Parallelism degree (default: 4)
    pub parallelism: u32,
}

impl Default for KeyDerivationParams {
    fn default() -> Self {
        Self {
            salt: String::new(),
            memory_cost: 65536,
            time_cost: 3,
            parallelism: 4,
        }
    }
}

impl KeyDerivationParams {
    /// Create new params with a random salt
    pub fn new() -> Self {
        let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
        Self {
            salt: salt.to_string(),
            ..Default::default()
        }
    }

    /// Create params with specific values
    pub fn with_values(salt: String, memory_cost: u32, time_cost: u32, parallelism: u32) -> Self {
        Self {
            salt,
            memory_cost,
            time_cost,
            parallelism,
        }
    }
}

/// How a piece of key material will be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFormat {
    /// 64 hex digits, used as the raw key
    Hex,
    /// Standard base64 of exactly 32 bytes, used as the raw key
    Base64,
    /// Anything else, stretched with Argon2id
    Passphrase,
}

impl KeyFormat {
    /// Classify key material without deriving anything
    pub fn detect(material: &str) -> Self {
        let material = material.trim();
        if material.len() == KEY_SIZE * 2 && material.bytes().all(|b| b.is_ascii_hexdigit()) {
            return KeyFormat::Hex;
        }
        match STANDARD.decode(material) {
            Ok(mut bytes) => {
                let is_key = bytes.len() == KEY_SIZE;
                bytes.zeroize();
                if is_key {
                    KeyFormat::Base64
                } else {
                    KeyFormat::Passphrase
                }
            }
            Err(_) => KeyFormat::Passphrase,
        }
    }
}

impl fmt::Display for KeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyFormat::Hex => write!(f, "hex"),
            KeyFormat::Base64 => write!(f, "base64"),
            KeyFormat::Passphrase => write!(f, "passphrase (Argon2id)"),
        }
    }
}

/// A 256-bit symmetric key, zeroed on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey {
    key: [u8; KEY_SIZE],
}

impl EncryptionKey {
    /// Wrap raw key bytes
    pub fn from_bytes(key: [u8; KEY_SIZE]) -> Self {
        Self { key }
    }

    /// Generate a fresh random key from the OS CSPRNG
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_SIZE];
        OsRng.fill_bytes(&mut key);
        Self { key }
    }

    /// Build a key from configured material
    ///
    /// `params` is only consulted when the material is a passphrase.
    ///
    /// # Errors
    ///
    /// Returns `CryptError::Configuration` if the material is empty, if a
    /// passphrase is too short, or if a passphrase is given without
    /// derivation parameters.
    pub fn from_material(
        material: &str,
        params: Option<&KeyDerivationParams>,
    ) -> CryptResult<Self> {
        let material = material.trim();
        if material.is_empty() {
            return Err(CryptError::Configuration(
                "Key material is empty".to_string(),
            ));
        }

        match KeyFormat::detect(material) {
            KeyFormat::Hex => {
                let mut key = [0u8; KEY_SIZE];
                hex::decode_to_slice(material, &mut key).map_err(|e| {
                    CryptError::Configuration(format!("Invalid hex key: {}", e))
                })?;
                Ok(Self { key })
            }
            KeyFormat::Base64 => {
                let bytes = Zeroizing::new(STANDARD.decode(material).map_err(|e| {
                    CryptError::Configuration(format!("Invalid base64 key: {}", e))
                })?);
                let mut key = [0u8; KEY_SIZE];
                key.copy_from_slice(&bytes);
                Ok(Self { key })
            }
            KeyFormat::Passphrase => {
                if material.chars().count() < MIN_PASSPHRASE_LEN {
                    return Err(CryptError::Configuration(format!(
                        "Passphrase must be at least {} characters",
                        MIN_PASSPHRASE_LEN
                    )));
                }
                let params = params.ok_or_else(|| {
                    CryptError::Configuration(
                        "Passphrase key material needs key derivation settings (run 'fieldcrypt init')"
                            .to_string(),
                    )
                })?;
                derive_key(material, params)
            }
        }
    }

    /// Read key material from an environment variable
    ///
    /// # Errors
    ///
    /// Returns `CryptError::Configuration` if the variable is unset, not
    /// valid unicode, or holds unusable material.
    pub fn from_env(var: &str, params: Option<&KeyDerivationParams>) -> CryptResult<Self> {
        let material = Zeroizing::new(std::env::var(var).map_err(|e| {
            CryptError::Configuration(format!("Cannot read key from {}: {}", var, e))
        })?);
        Self::from_material(&material, params)
    }

    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }

    /// Export the key as lowercase hex
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.key))
    }
}

// Never print key bytes
impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionKey")
            .field("len", &KEY_SIZE)
            .finish()
    }
}

/// Stretch a passphrase into a key with Argon2id
pub fn derive_key(passphrase: &str, params: &KeyDerivationParams) -> CryptResult<EncryptionKey> {
    let salt = SaltString::from_b64(&params.salt)
        .map_err(|e| CryptError::Configuration(format!("Invalid salt: {}", e)))?;

    let argon2_params = Params::new(
        params.memory_cost,
        params.time_cost,
        params.parallelism,
        Some(KEY_SIZE),
    )
    .map_err(|e| CryptError::Configuration(format!("Invalid Argon2 parameters: {}", e)))?;

    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        argon2_params,
    );

    let mut key = [0u8; KEY_SIZE];
    argon2
        .hash_password_into(passphrase.as_bytes(), salt.as_str().as_bytes(), &mut key)
        .map_err(|e| CryptError::Configuration(format!("Key derivation failed: {}", e)))?;

    Ok(EncryptionKey { key })
}
