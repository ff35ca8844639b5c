//! Setup CLI commands
//!
//! `init`, `config` and `keygen`: everything about where the key comes from.
//! The key itself is never written to disk or printed, except by `keygen`.

use crate::audit::{AuditEntry, AuditLogger, Operation};
use crate::config::{FieldcryptPaths, Settings};
use crate::crypto::{EncryptionKey, KeyDerivationParams, KeyFormat};
use crate::error::CryptResult;

use base64::{engine::general_purpose::STANDARD, Engine};
use zeroize::Zeroizing;

/// Write settings with a fresh Argon2id salt
pub fn handle_init(paths: &FieldcryptPaths, settings: &mut Settings, force: bool) -> CryptResult<()> {
    if paths.is_initialized() && settings.key_derivation.is_some() && !force {
        println!("fieldcrypt is already initialized at {}", paths.base_dir().display());
        println!("Use 'fieldcrypt init --force' to generate a new salt.");
        println!("WARNING: a new salt changes passphrase-derived keys.");
        return Ok(());
    }

    settings.key_derivation = Some(KeyDerivationParams::new());
    settings.save(paths)?;

    println!("Initialized fieldcrypt at: {}", paths.base_dir().display());
    println!();
    println!("Provide the key through the {} environment variable:", settings.key_env_var);
    println!("  - 64 hex digits (see 'fieldcrypt keygen'), or");
    println!("  - base64 of 32 bytes, or");
    println!("  - a passphrase of at least 8 characters (stretched with Argon2id)");

    Ok(())
}

/// Show paths and settings without revealing the key
pub fn handle_config(paths: &FieldcryptPaths, settings: &Settings) -> CryptResult<()> {
    println!("fieldcrypt Configuration");
    println!("========================");
    println!("Config directory: {}", paths.base_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!("Audit log:        {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Key variable:     {}", settings.key_env_var);

    match std::env::var(&settings.key_env_var) {
        Ok(material) => {
            let material = Zeroizing::new(material);
            if material.trim().is_empty() {
                println!("  Key status:       set but empty");
            } else {
                println!("  Key status:       set ({})", KeyFormat::detect(&material));
            }
        }
        Err(_) => println!("  Key status:       NOT SET"),
    }

    match &settings.key_derivation {
        Some(params) => {
            println!("  Key derivation:   Argon2id");
            println!("    Memory Cost:    {} KiB", params.memory_cost);
            println!("    Time Cost:      {} iterations", params.time_cost);
            println!("    Parallelism:    {} threads", params.parallelism);
        }
        None => println!("  Key derivation:   not configured (raw keys only)"),
    }

    println!("  Sensitive fields: {}", settings.sensitive_fields.join(", "));
    println!("  Audit enabled:    {}", settings.audit_enabled);

    Ok(())
}

/// Print a fresh random key
pub fn handle_keygen(paths: &FieldcryptPaths, settings: &Settings, base64: bool) -> CryptResult<()> {
    let key = EncryptionKey::generate();

    if base64 {
        let encoded = Zeroizing::new(STANDARD.encode(key.as_bytes()));
        println!("{}", encoded.as_str());
    } else {
        println!("{}", key.to_hex().as_str());
    }

    if settings.audit_enabled {
        let format = if base64 { "base64" } else { "hex" };
        AuditLogger::new(paths.audit_log())
            .log(&AuditEntry::new(Operation::Keygen, "stdout").with_detail(format!("{} key", format)))?;
    }

    Ok(())
}
