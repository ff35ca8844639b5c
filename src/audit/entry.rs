//! Audit entry data structures
//!
//! Entries record which fields of which file were touched and how many
//! values changed. They never carry plaintext or ciphertext.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::records::SealReport;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Plaintext fields were encrypted
    Seal,
    /// Encrypted fields were decrypted
    Unseal,
    /// Legacy plaintext was encrypted in bulk
    Migrate,
    /// A new key was generated
    Keygen,
    /// A value had the encrypted shape but could not be decrypted
    DecryptFailure,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Seal => write!(f, "SEAL"),
            Operation::Unseal => write!(f, "UNSEAL"),
            Operation::Migrate => write!(f, "MIGRATE"),
            Operation::Keygen => write!(f, "KEYGEN"),
            Operation::DecryptFailure => write!(f, "DECRYPT_FAILURE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// File or other target of the operation
    pub target: String,

    /// Field paths the operation covered
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,

    /// Number of documents processed
    #[serde(default)]
    pub documents: usize,

    /// What the pass did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<SealReport>,

    /// Free-form detail, e.g. an error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AuditEntry {
    /// Create a new entry stamped with the current time
    pub fn new(operation: Operation, target: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            target: target.into(),
            fields: Vec::new(),
            documents: 0,
            report: None,
            detail: None,
        }
    }

    /// Entry for a completed seal, unseal or migrate pass
    pub fn pass<S: ToString>(
        operation: Operation,
        target: impl Into<String>,
        fields: &[S],
        documents: usize,
        report: SealReport,
    ) -> Self {
        Self {
            fields: fields.iter().map(ToString::to_string).collect(),
            documents,
            report: Some(report),
            ..Self::new(operation, target)
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.target
        );

        if !self.fields.is_empty() {
            output.push_str(&format!(" [{}]", self.fields.join(", ")));
        }

        if let Some(report) = &self.report {
            output.push_str(&format!(
                "\n  {} document(s): {}",
                self.documents,
                report.summary()
            ));
        }

        if let Some(detail) = &self.detail {
            output.push_str(&format!("\n  {}", detail));
        }

        output
    }
}
