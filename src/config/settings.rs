//! Settings for fieldcrypt
//!
//! Names the environment variable that carries the key, the Argon2id
//! parameters used when that key is a passphrase, the document fields that
//! are treated as sensitive, and whether operations are audited.

use serde::{Deserialize, Serialize};

use super::paths::FieldcryptPaths;
use crate::crypto::key::{KeyDerivationParams, DEFAULT_KEY_ENV_VAR};
use crate::error::CryptError;

/// Settings for fieldcrypt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Environment variable holding the key material
    #[serde(default = "default_key_env_var")]
    pub key_env_var: String,

    /// Key derivation parameters, needed when the key is a passphrase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_derivation: Option<KeyDerivationParams>,

    /// Document fields sealed when no `--field` is given
    #[serde(default = "default_sensitive_fields")]
    pub sensitive_fields: Vec<String>,

    /// Whether seal/unseal/migrate runs are written to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_key_env_var() -> String {
    DEFAULT_KEY_ENV_VAR.to_string()
}

fn default_sensitive_fields() -> Vec<String> {
    vec![
        "accessToken".to_string(),
        "itemId".to_string(),
        "accountNumber".to_string(),
        "phone".to_string(),
    ]
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            key_env_var: default_key_env_var(),
            key_derivation: None,
            sensitive_fields: default_sensitive_fields(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FieldcryptPaths) -> Result<Self, CryptError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                CryptError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                CryptError::Configuration(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FieldcryptPaths) -> Result<(), CryptError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            CryptError::Configuration(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| CryptError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
