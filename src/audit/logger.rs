//! Audit logger for append-only audit log
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{CryptError, CryptResult};

use super::entry::AuditEntry;

/// Handles writing audit entries to the audit log file (JSONL)
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a new AuditLogger that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    fn open_for_append(&self) -> CryptResult<File> {
        if let Some(parent) = self.log_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CryptError::Io(format!("Failed to create audit log directory: {}", e)))?;
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| CryptError::Io(format!("Failed to open audit log: {}", e)))
    }

    /// Append an entry as a JSON line
    pub fn log(&self, entry: &AuditEntry) -> CryptResult<()> {
        self.log_batch(std::slice::from_ref(entry))
    }

    /// Log multiple audit entries, flushing once at the end
    pub fn log_batch(&self, entries: &[AuditEntry]) -> CryptResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut file = self.open_for_append()?;

        for entry in entries {
            let json = serde_json::to_string(entry)
                .map_err(|e| CryptError::Json(format!("Failed to serialize audit entry: {}", e)))?;

            writeln!(file, "{}", json)
                .map_err(|e| CryptError::Io(format!("Failed to write audit entry: {}", e)))?;
        }

        file.flush()
            .map_err(|e| CryptError::Io(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Read all audit entries, oldest first
    pub fn read_all(&self) -> CryptResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| CryptError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                CryptError::Io(format!("Failed to read audit log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                CryptError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent N entries from the log
    pub fn read_recent(&self, count: usize) -> CryptResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    /// Get the number of entries in the audit log
    pub fn entry_count(&self) -> CryptResult<usize> {
        Ok(self.read_all()?.len())
    }

    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::Operation;
    use crate::records::SealReport;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn seal_entry(target: &str) -> AuditEntry {
        AuditEntry::pass(
            Operation::Seal,
            target,
            &["accessToken"],
            1,
            SealReport {
                sealed: 1,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        logger.log(&seal_entry("items.json")).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Seal);
        assert_eq!(entries[0].target, "items.json");
    }

    #[test]
    fn test_log_batch() {
        let (logger, _temp) = create_test_logger();
        let entries: Vec<AuditEntry> = (0..3).map(|i| seal_entry(&format!("f{}.json", i))).collect();

        logger.log_batch(&entries).unwrap();
        assert_eq!(logger.entry_count().unwrap(), 3);
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = create_test_logger();
        for i in 0..10 {
            logger.log(&seal_entry(&format!("f{}.json", i))).unwrap();
        }

        let recent = logger.read_recent(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].target, "f7.json");
        assert_eq!(recent[2].target, "f9.json");
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = create_test_logger();

        assert!(!logger.exists());
        assert_eq!(logger.entry_count().unwrap(), 0);
        assert!(logger.read_recent(5).unwrap().is_empty());
    }

    #[test]
    fn test_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("nested").join("audit.log"));

        logger.log(&seal_entry("items.json")).unwrap();
        assert!(logger.exists());
    }

    #[test]
    fn test_survives_restart() {
        let (logger, temp) = create_test_logger();
        logger.log(&seal_entry("items.json")).unwrap();

        let logger2 = AuditLogger::new(temp.path().join("audit.log"));
        assert_eq!(logger2.read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_line_reports_line_number() {
        let (logger, _temp) = create_test_logger();
        logger.log(&seal_entry("items.json")).unwrap();
        std::fs::OpenOptions::new()
            .append(true)
            .open(logger.path())
            .and_then(|mut f| writeln!(f, "{{broken"))
            .unwrap();

        let err = logger.read_all().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
