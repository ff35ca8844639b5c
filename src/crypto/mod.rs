//! Cryptographic functions for fieldcrypt
//!
//! Provides AES-256-GCM field encryption under a server-held key, stored as
//! `<ivHex>:<cipherHex>`, with a pass-through for legacy plaintext.

pub mod encrypted_value;
pub mod encryption;
pub mod key;
pub mod service;

pub use encrypted_value::EncryptedValue;
pub use key::{derive_key, EncryptionKey, KeyDerivationParams, KeyFormat};
pub use service::CryptoService;
