//! Applying the crypto service to sensitive fields of JSON documents

use serde_json::Value;

use crate::crypto::CryptoService;
use crate::error::{CryptError, CryptResult};

use super::path::FieldPath;
use super::report::SealReport;

/// Encrypts and decrypts a fixed set of fields across documents
#[derive(Debug)]
pub struct FieldSealer<'a> {
    service: &'a CryptoService,
    fields: Vec<FieldPath>,
}

impl<'a> FieldSealer<'a> {
    pub fn new(service: &'a CryptoService, fields: Vec<FieldPath>) -> Self {
        Self { service, fields }
    }

    /// Build a sealer from dot-separated field names
    pub fn from_names<S: AsRef<str>>(service: &'a CryptoService, names: &[S]) -> CryptResult<Self> {
        let fields = names
            .iter()
            .map(|name| FieldPath::parse(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(service, fields))
    }

    pub fn fields(&self) -> &[FieldPath] {
        &self.fields
    }

    /// Encrypt every configured plaintext field of one document
    pub fn seal(&self, document: &mut Value) -> CryptResult<SealReport> {
        let mut report = SealReport::default();

        for path in &self.fields {
            match path.get_mut(document) {
                Some(Value::String(value)) if !value.is_empty() => {
                    if self.service.is_encrypted(value) {
                        report.already_sealed += 1;
                    } else {
                        *value = self.service.encrypt(value)?;
                        report.sealed += 1;
                    }
                }
                _ => report.skipped += 1,
            }
        }

        Ok(report)
    }

    /// Decrypt every configured field of one document
    ///
    /// Legacy plaintext is left in place and counted.
    ///
    /// # Errors
    ///
    /// Returns `CryptError::DecryptionFailure`, naming the field, if an
    /// encrypted value cannot be decrypted.
    pub fn unseal(&self, document: &mut Value) -> CryptResult<SealReport> {
        let mut report = SealReport::default();

        for path in &self.fields {
            match path.get_mut(document) {
                Some(Value::String(value)) if !value.is_empty() => {
                    if self.service.is_encrypted(value) {
                        *value = self
                            .service
                            .decrypt(value)
                            .map_err(|e| with_field(path, e))?;
                        report.unsealed += 1;
                    } else {
                        report.legacy_plaintext += 1;
                    }
                }
                _ => report.skipped += 1,
            }
        }

        Ok(report)
    }

    /// Seal a batch of documents
    pub fn seal_all(&self, documents: &mut [Value]) -> CryptResult<SealReport> {
        let mut total = SealReport::default();
        for document in documents.iter_mut() {
            total += self.seal(document)?;
        }
        Ok(total)
    }

    /// Unseal a batch of documents
    pub fn unseal_all(&self, documents: &mut [Value]) -> CryptResult<SealReport> {
        let mut total = SealReport::default();
        for document in documents.iter_mut() {
            total += self.unseal(document)?;
        }
        Ok(total)
    }

    /// Encrypt legacy plaintext across a batch written before encryption
    ///
    /// Every value that is already encrypted must decrypt under the current
    /// key; otherwise nothing is modified and the failure is returned.
    pub fn migrate(&self, documents: &mut [Value]) -> CryptResult<SealReport> {
        self.verify_all(documents)?;

        let mut total = SealReport::default();
        for document in documents.iter_mut() {
            let report = self.seal(document)?;
            total.legacy_plaintext += report.sealed;
            total += report;
        }
        Ok(total)
    }

    /// Check that every encrypted field decrypts under the current key
    pub fn verify_all(&self, documents: &[Value]) -> CryptResult<()> {
        for document in documents {
            for path in &self.fields {
                if let Some(Value::String(value)) = path.get(document) {
                    if self.service.is_encrypted(value) {
                        self.service.decrypt(value).map_err(|e| with_field(path, e))?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn with_field(path: &FieldPath, err: CryptError) -> CryptError {
    match err {
        CryptError::DecryptionFailure(msg) => {
            CryptError::DecryptionFailure(format!("field '{}': {}", path, msg))
        }
        other => other,
    }
}
