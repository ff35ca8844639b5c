//! AES-256-GCM encryption/decryption
//!
//! Provides authenticated encryption for values at rest using AES-256-GCM.
//! Each encryption operation generates a unique nonce.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};

use crate::error::{CryptError, CryptResult};

use super::EncryptionKey;

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Size of the GCM authentication tag appended to every ciphertext
pub const TAG_SIZE: usize = 16;

fn cipher(key: &EncryptionKey) -> CryptResult<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| CryptError::Encryption(format!("Failed to create cipher: {}", e)))
}

/// Encrypt plaintext bytes
///
/// Returns the freshly generated nonce and the ciphertext with its tag.
pub fn encrypt(plaintext: &[u8], key: &EncryptionKey) -> CryptResult<([u8; NONCE_SIZE], Vec<u8>)> {
    let cipher = cipher(key)?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| CryptError::Encryption(format!("Encryption failed: {}", e)))?;

    Ok((nonce_bytes, ciphertext))
}

/// Decrypt ciphertext bytes
///
/// Any authentication failure is reported as `DecryptionFailure`; partially
/// decrypted bytes are never returned.
pub fn decrypt(nonce: &[u8], ciphertext: &[u8], key: &EncryptionKey) -> CryptResult<Vec<u8>> {
    if nonce.len() != NONCE_SIZE {
        return Err(CryptError::DecryptionFailure(format!(
            "Invalid nonce size: expected {}, got {}",
            NONCE_SIZE,
            nonce.len()
        )));
    }

    let cipher = cipher(key)?;
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| {
            CryptError::DecryptionFailure("invalid key or corrupted data".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> EncryptionKey {
        EncryptionKey::from_bytes([0x42; 32])
    }

    #[test]
    fn test_encrypt_decrypt() {
        let key = test_key();
        let plaintext = b"plaid-access-sandbox-1234";

        let (nonce, ciphertext) = encrypt(plaintext, &key).unwrap();
        assert_eq!(ciphertext.len(), plaintext.len() + TAG_SIZE);

        let decrypted = decrypt(&nonce, &ciphertext, &key).unwrap();
        assert_eq!(plaintext, decrypted.as_slice());
    }

    #[test]
    fn test_different_nonces() {
        let key = test_key();
        let (nonce1, ct1) = encrypt(b"same", &key).unwrap();
        let (nonce2, ct2) = encrypt(b"same", &key).unwrap();

        assert_ne!(nonce1, nonce2);
        assert_ne!(ct1, ct2);
    }

    #[test]
    fn test_wrong_key_fails() {
        let (nonce, ciphertext) = encrypt(b"secret", &test_key()).unwrap();
        let other = EncryptionKey::from_bytes([0x43; 32]);

        let err = decrypt(&nonce, &ciphertext, &other).unwrap_err();
        assert!(err.is_decryption_failure());
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let key = test_key();
        let (nonce, mut ciphertext) = encrypt(b"secret", &key).unwrap();
        ciphertext[0] ^= 0xFF;

        let err = decrypt(&nonce, &ciphertext, &key).unwrap_err();
        assert!(err.is_decryption_failure());
    }

    #[test]
    fn test_truncated_ciphertext_fails() {
        let key = test_key();
        let (nonce, ciphertext) = encrypt(b"secret", &key).unwrap();

        let err = decrypt(&nonce, &ciphertext[..4], &key).unwrap_err();
        assert!(err.is_decryption_failure());
    }

    #[test]
    fn test_bad_nonce_size_fails() {
        let key = test_key();
        let (_, ciphertext) = encrypt(b"secret", &key).unwrap();

        let err = decrypt(&[0u8; 16], &ciphertext, &key).unwrap_err();
        assert!(err.is_decryption_failure());
    }

    #[test]
    fn test_large_plaintext() {
        let key = test_key();
        let plaintext: Vec<u8> = (0..10000).map(|i| (i % 256) as u8).collect();

        let (nonce, ciphertext) = encrypt(&plaintext, &key).unwrap();
        let decrypted = decrypt(&nonce, &ciphertext, &key).unwrap();

        assert_eq!(plaintext, decrypted);
    }
}
