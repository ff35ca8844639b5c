//! Custom error types for fieldcrypt
//!
//! This module defines the error hierarchy for the library using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for fieldcrypt operations
#[derive(Error, Debug)]
pub enum CryptError {
    /// Missing or malformed key configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A value had the encrypted shape but could not be decrypted
    #[error("Decryption failed: {0}")]
    DecryptionFailure(String),

    /// Encryption errors
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Validation errors for parsed values
    #[error("Validation error: {0}")]
    Validation(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CryptError {
    /// Check if this is a decryption failure
    pub fn is_decryption_failure(&self) -> bool {
        matches!(self, Self::DecryptionFailure(_))
    }

    /// Check if this is a configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<std::io::Error> for CryptError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CryptError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for fieldcrypt operations
pub type CryptResult<T> = Result<T, CryptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CryptError::Configuration("FIELDCRYPT_KEY is not set".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: FIELDCRYPT_KEY is not set"
        );
    }

    #[test]
    fn test_classification() {
        assert!(CryptError::DecryptionFailure("bad tag".into()).is_decryption_failure());
        assert!(!CryptError::Validation("x".into()).is_decryption_failure());
        assert!(CryptError::Configuration("x".into()).is_configuration());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CryptError = io_err.into();
        assert!(matches!(err, CryptError::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CryptError = json_err.into();
        assert!(matches!(err, CryptError::Json(_)));
    }
}
