//! Counters describing what a seal, unseal or migrate pass did

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// Outcome of sealing or unsealing one or more documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealReport {
    /// Plaintext values that were encrypted
    pub sealed: usize,
    /// Encrypted values that were decrypted
    pub unsealed: usize,
    /// Values already encrypted and left as they were
    pub already_sealed: usize,
    /// Plaintext values found where ciphertext was expected
    pub legacy_plaintext: usize,
    /// Missing, null, empty or non-string fields
    pub skipped: usize,
}

impl SealReport {
    /// Number of field values that were rewritten
    pub fn changed(&self) -> usize {
        self.sealed + self.unsealed
    }

    /// One-line summary for terminal output
    pub fn summary(&self) -> String {
        format!(
            "{} sealed, {} unsealed, {} already sealed, {} legacy plaintext, {} skipped",
            self.sealed, self.unsealed, self.already_sealed, self.legacy_plaintext, self.skipped
        )
    }
}

impl AddAssign for SealReport {
    fn add_assign(&mut self, other: Self) {
        self.sealed += other.sealed;
        self.unsealed += other.unsealed;
        self.already_sealed += other.already_sealed;
        self.legacy_plaintext += other.legacy_plaintext;
        self.skipped += other.skipped;
    }
}
