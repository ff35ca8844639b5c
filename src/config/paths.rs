//! Path management for fieldcrypt
//!
//! ## Path Resolution Order
//!
//! 1. `FIELDCRYPT_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories::ProjectDirs`
//!    (`~/.config/fieldcrypt` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::CryptError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV_VAR: &str = "FIELDCRYPT_DATA_DIR";

/// Manages all paths used by fieldcrypt
#[derive(Debug, Clone)]
pub struct FieldcryptPaths {
    base_dir: PathBuf,
}

impl FieldcryptPaths {
    /// Resolve the base directory from the environment or the platform
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, CryptError> {
        let base_dir = match std::env::var(DATA_DIR_ENV_VAR) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "fieldcrypt")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    CryptError::Configuration("Could not determine home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), CryptError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CryptError::Io(format!("Failed to create base directory: {}", e)))
    }

    /// Check if fieldcrypt has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
