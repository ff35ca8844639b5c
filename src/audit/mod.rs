//! Audit logging for fieldcrypt
//!
//! Records seal, unseal, migrate and key generation runs in an append-only
//! line-delimited JSON log. Entries carry field names and counts only.
//!
//! # Example
//!
//! ```rust,ignore
//! use fieldcrypt::audit::{AuditEntry, AuditLogger, Operation};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::pass(Operation::Seal, "items.json", &fields, docs, report);
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
