//! Single-value CLI commands: encrypt, decrypt, status

use zeroize::Zeroizing;

use crate::audit::{AuditEntry, AuditLogger, Operation};
use crate::crypto::{CryptoService, EncryptedValue};
use crate::error::{CryptError, CryptResult};

/// Take the value from the command line, or prompt for it with hidden input
fn value_or_prompt(value: Option<String>, prompt: &str) -> CryptResult<Zeroizing<String>> {
    match value {
        Some(value) => Ok(Zeroizing::new(value)),
        None => rpassword::prompt_password(prompt)
            .map(Zeroizing::new)
            .map_err(|e| CryptError::Io(format!("Failed to read value: {}", e))),
    }
}

/// Encrypt one value and print the stored form
pub fn handle_encrypt(service: &CryptoService, value: Option<String>) -> CryptResult<()> {
    let plaintext = value_or_prompt(value, "Value to encrypt: ")?;
    println!("{}", service.encrypt(&plaintext)?);
    Ok(())
}

/// Decrypt one value and print the plaintext
///
/// With `raw_on_failure`, a value that fails to decrypt is printed as
/// stored instead of failing the command.
pub fn handle_decrypt(
    service: &CryptoService,
    audit: Option<&AuditLogger>,
    value: Option<String>,
    raw_on_failure: bool,
) -> CryptResult<()> {
    let stored = value_or_prompt(value, "Value to decrypt: ")?;

    let record_failure = |err: &CryptError| -> CryptResult<()> {
        if let Some(logger) = audit {
            logger.log(
                &AuditEntry::new(Operation::DecryptFailure, "argument").with_detail(err.to_string()),
            )?;
        }
        Ok(())
    };

    let plaintext = if raw_on_failure {
        service.decrypt_or_raw(&stored, |err| {
            record_failure(err)?;
            eprintln!("Warning: {}; printing stored value", err);
            Ok(())
        })?
    } else {
        service.decrypt(&stored).or_else(|err| {
            record_failure(&err)?;
            Err(err)
        })?
    };

    let plaintext = Zeroizing::new(plaintext);
    println!("{}", plaintext.as_str());
    Ok(())
}

/// Describe whether a value is stored encrypted
pub fn describe_value(value: &str) -> String {
    if value.is_empty() {
        return "empty (stored as-is)".to_string();
    }
    match EncryptedValue::parse(value) {
        Some(Ok(encrypted)) => format!(
            "encrypted (AES-256-GCM, {}-byte IV, {}-byte ciphertext)",
            encrypted.iv().len(),
            encrypted.body().len()
        ),
        Some(Err(err)) => format!("encrypted but damaged ({})", err),
        None => "plaintext (legacy or unencrypted)".to_string(),
    }
}

/// Print whether a value is stored encrypted
pub fn handle_status(value: &str) -> CryptResult<()> {
    println!("{}", describe_value(value));
    Ok(())
}
