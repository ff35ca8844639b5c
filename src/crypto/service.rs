//! Field encryption service
//!
//! `CryptoService` turns short text values into `<ivHex>:<cipherHex>` and
//! back. It holds nothing but the injected key, so one instance can be
//! shared across threads behind an `Arc`.

use crate::config::settings::Settings;
use crate::error::{CryptError, CryptResult};

use super::encrypted_value::EncryptedValue;
use super::{encryption, EncryptionKey};

/// Reversible encryption of text fields under a server-held key
#[derive(Debug, Clone)]
pub struct CryptoService {
    key: EncryptionKey,
}

impl CryptoService {
    /// Create a service around an already provisioned key
    pub fn new(key: EncryptionKey) -> Self {
        Self { key }
    }

    /// Create a service from process configuration
    ///
    /// Reads the key material from the environment variable named in
    /// `settings.key_env_var`, using `settings.key_derivation` for
    /// passphrases.
    pub fn from_config(settings: &Settings) -> CryptResult<Self> {
        let key = EncryptionKey::from_env(&settings.key_env_var, settings.key_derivation.as_ref())?;
        Ok(Self::new(key))
    }

    /// Encrypt a text value
    ///
    /// The empty string is returned unchanged. Every other input gets a
    /// fresh IV, so encrypting the same text twice gives different output.
    pub fn encrypt(&self, plaintext: &str) -> CryptResult<String> {
        if plaintext.is_empty() {
            return Ok(String::new());
        }

        let (iv, body) = encryption::encrypt(plaintext.as_bytes(), &self.key)?;
        Ok(EncryptedValue::new(iv, body).to_string())
    }

    /// Decrypt a stored value
    ///
    /// Values that don't have the encrypted shape are records written before
    /// encryption was introduced; they are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `CryptError::DecryptionFailure` when the value has the
    /// encrypted shape but is truncated, fails authentication or isn't UTF-8.
    pub fn decrypt(&self, input: &str) -> CryptResult<String> {
        if input.is_empty() {
            return Ok(String::new());
        }

        let Some(value) = EncryptedValue::parse(input) else {
            return Ok(input.to_string());
        };
        let value = value?;

        let plaintext = encryption::decrypt(value.iv(), value.body(), &self.key)?;
        String::from_utf8(plaintext).map_err(|e| {
            CryptError::DecryptionFailure(format!("Invalid UTF-8 in decrypted data: {}", e))
        })
    }

    /// Check whether a stored value has the encrypted shape
    pub fn is_encrypted(&self, value: &str) -> bool {
        EncryptedValue::matches(value)
    }

    /// Decrypt, falling back to the stored value on `DecryptionFailure`
    ///
    /// `on_failure` sees the error before the stored value is returned; an
    /// error it returns is propagated.
    pub fn decrypt_or_raw<F>(&self, input: &str, on_failure: F) -> CryptResult<String>
    where
        F: FnOnce(&CryptError) -> CryptResult<()>,
    {
        match self.decrypt(input) {
            Ok(plaintext) => Ok(plaintext),
            Err(err) if err.is_decryption_failure() => {
                on_failure(&err)?;
                Ok(input.to_string())
            }
            Err(err) => Err(err),
        }
    }

    /// Encrypt a value unless it is already encrypted
    pub fn reseal(&self, value: &str) -> CryptResult<String> {
        if self.is_encrypted(value) {
            Ok(value.to_string())
        } else {
            self.encrypt(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn service() -> CryptoService {
        CryptoService::new(EncryptionKey::from_bytes([0x5a; 32]))
    }

    #[test]
    fn test_round_trip() {
        let svc = service();
        let long = "x".repeat(5000);
        for s in ["a", "MySecretData123", "unicodé ✓ 🔐", "with:colon", long.as_str()] {
            let encrypted = svc.encrypt(s).unwrap();
            assert_eq!(svc.decrypt(&encrypted).unwrap(), s);
        }
    }

    #[test]
    fn test_empty_string_identity() {
        let svc = service();
        assert_eq!(svc.encrypt("").unwrap(), "");
        assert_eq!(svc.decrypt("").unwrap(), "");
    }

    #[test]
    fn test_iv_freshness() {
        let svc = service();
        let first = svc.encrypt("same value").unwrap();
        let second = svc.encrypt("same value").unwrap();

        assert_ne!(first, second);
        assert_eq!(svc.decrypt(&first).unwrap(), "same value");
        assert_eq!(svc.decrypt(&second).unwrap(), "same value");
    }

    #[test]
    fn test_legacy_fallback() {
        let svc = service();
        assert_eq!(
            svc.decrypt("plain text with no colon").unwrap(),
            "plain text with no colon"
        );
        assert_eq!(svc.decrypt("12:30").unwrap(), "12:30");
    }

    #[test]
    fn test_shape_invariant() {
        let svc = service();
        let encrypted = svc.encrypt("4111 1111 1111 1111").unwrap();

        assert_eq!(encrypted.matches(':').count(), 1);
        let (iv, body) = encrypted.split_once(':').unwrap();
        assert!(!iv.is_empty() && !body.is_empty());
        assert!(iv.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert!(body.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_scenario_secret_data() {
        let svc = service();
        let encrypted = svc.encrypt("MySecretData123").unwrap();

        assert_ne!(encrypted, "MySecretData123");
        assert_eq!(encrypted.matches(':').count(), 1);
        assert_eq!(svc.decrypt(&encrypted).unwrap(), "MySecretData123");
    }

    #[test]
    fn test_scenario_not_encrypted() {
        assert_eq!(service().decrypt("NotEncrypted").unwrap(), "NotEncrypted");
    }

    #[test]
    fn test_wrong_key_is_decryption_failure() {
        let encrypted = service().encrypt("token").unwrap();
        let other = CryptoService::new(EncryptionKey::from_bytes([0x5b; 32]));

        let err = other.decrypt(&encrypted).unwrap_err();
        assert!(err.is_decryption_failure());
    }

    #[test]
    fn test_corrupted_value_is_decryption_failure() {
        let svc = service();
        let encrypted = svc.encrypt("token").unwrap();
        let (iv, body) = encrypted.split_once(':').unwrap();
        let flipped = if body.starts_with('0') { "1" } else { "0" };
        let corrupted = format!("{}:{}{}", iv, flipped, &body[1..]);

        let err = svc.decrypt(&corrupted).unwrap_err();
        assert!(err.is_decryption_failure());
    }

    #[test]
    fn test_truncated_body_is_decryption_failure() {
        let svc = service();
        let encrypted = svc.encrypt("access-sandbox-123").unwrap();

        let err = svc.decrypt(&encrypted[..encrypted.len() - 1]).unwrap_err();
        assert!(err.is_decryption_failure());

        let err = svc.decrypt(&encrypted[..encrypted.len() - 2]).unwrap_err();
        assert!(err.is_decryption_failure());
    }

    #[test]
    fn test_body_shorter_than_tag_is_decryption_failure() {
        let svc = service();
        let encrypted = svc.encrypt("token").unwrap();
        let (iv, body) = encrypted.split_once(':').unwrap();
        let short = format!("{}:{}", iv, &body[..20]);

        assert!(svc.is_encrypted(&short));
        let err = svc.decrypt(&short).unwrap_err();
        assert!(err.is_decryption_failure());
    }

    #[test]
    fn test_corrupted_iv_is_decryption_failure() {
        let svc = service();
        let encrypted = svc.encrypt("token").unwrap();
        let flipped = if encrypted.starts_with('0') { "1" } else { "0" };
        let corrupted = format!("{}{}", flipped, &encrypted[1..]);

        let err = svc.decrypt(&corrupted).unwrap_err();
        assert!(err.is_decryption_failure());
    }

    #[test]
    fn test_reseal_keeps_truncated_ciphertext() {
        let svc = service();
        let encrypted = svc.encrypt("token").unwrap();
        let truncated = &encrypted[..encrypted.len() - 1];

        assert_eq!(svc.reseal(truncated).unwrap(), truncated);
    }

    #[test]
    fn test_decrypt_or_raw() {
        let svc = service();
        let foreign = CryptoService::new(EncryptionKey::from_bytes([1; 32]))
            .encrypt("token")
            .unwrap();

        let mut failures = Vec::new();
        let out = svc
            .decrypt_or_raw(&foreign, |err| {
                failures.push(err.to_string());
                Ok(())
            })
            .unwrap();
        assert_eq!(out, foreign);
        assert_eq!(failures.len(), 1);

        let sealed = svc.encrypt("token").unwrap();
        assert_eq!(svc.decrypt_or_raw(&sealed, |_| Ok(())).unwrap(), "token");
        assert_eq!(svc.decrypt_or_raw("legacy", |_| Ok(())).unwrap(), "legacy");
    }

    #[test]
    fn test_decrypt_or_raw_propagates_callback_error() {
        let svc = service();
        let foreign = CryptoService::new(EncryptionKey::from_bytes([1; 32]))
            .encrypt("token")
            .unwrap();

        let err = svc
            .decrypt_or_raw(&foreign, |_| Err(CryptError::Io("audit".into())))
            .unwrap_err();
        assert!(matches!(err, CryptError::Io(_)));
    }

    #[test]
    fn test_reseal() {
        let svc = service();
        let sealed = svc.reseal("legacy-token").unwrap();
        assert!(svc.is_encrypted(&sealed));
        assert_eq!(svc.reseal(&sealed).unwrap(), sealed);
        assert_eq!(svc.reseal("").unwrap(), "");
    }

    #[test]
    fn test_concurrent_use() {
        let svc = Arc::new(service());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let svc = Arc::clone(&svc);
                thread::spawn(move || {
                    for j in 0..50 {
                        let value = format!("thread-{}-value-{}", i, j);
                        let encrypted = svc.encrypt(&value).unwrap();
                        assert_eq!(svc.decrypt(&encrypted).unwrap(), value);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_from_config() {
        let var = "FIELDCRYPT_TEST_SERVICE_KEY";
        std::env::set_var(var, "33".repeat(32));
        let settings = Settings {
            key_env_var: var.to_string(),
            ..Settings::default()
        };

        let svc = CryptoService::from_config(&settings).unwrap();
        let encrypted = svc.encrypt("hello").unwrap();
        assert_eq!(svc.decrypt(&encrypted).unwrap(), "hello");
        std::env::remove_var(var);
    }

    #[test]
    fn test_from_config_missing_key() {
        let settings = Settings {
            key_env_var: "FIELDCRYPT_TEST_SERVICE_KEY_UNSET".to_string(),
            ..Settings::default()
        };
        let err = CryptoService::from_config(&settings).unwrap_err();
        assert!(err.is_configuration());
    }
}
