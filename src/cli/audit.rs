//! Audit log CLI command

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::CryptResult;

/// Format audit entries as a table
pub fn format_audit_table(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No audit entries found.".to_string();
    }

    let op_width = entries
        .iter()
        .map(|e| e.operation.to_string().len())
        .max()
        .unwrap_or(9)
        .max(9);

    let target_width = entries
        .iter()
        .map(|e| e.target.len())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<19}  {:<op_width$}  {:<target_width$}  {:>5}  {:>7}  {}\n",
        "Time",
        "Operation",
        "Target",
        "Docs",
        "Changed",
        "Fields",
        op_width = op_width,
        target_width = target_width,
    ));

    output.push_str(&format!(
        "{:-<19}  {:-<op_width$}  {:-<target_width$}  {:->5}  {:->7}  {:-<6}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        op_width = op_width,
        target_width = target_width,
    ));

    for entry in entries {
        let changed = entry
            .report
            .map(|r| r.changed().to_string())
            .unwrap_or_else(|| "-".to_string());

        output.push_str(&format!(
            "{:<19}  {:<op_width$}  {:<target_width$}  {:>5}  {:>7}  {}\n",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.operation.to_string(),
            entry.target,
            entry.documents,
            changed,
            entry.fields.join(", "),
            op_width = op_width,
            target_width = target_width,
        ));
    }

    output
}

/// Show the most recent audit entries
pub fn handle_audit(logger: &AuditLogger, recent: usize, verbose: bool) -> CryptResult<()> {
    if !logger.exists() {
        println!("No audit log at {}", logger.path().display());
        return Ok(());
    }

    let entries = logger.read_recent(recent)?;

    if verbose {
        if entries.is_empty() {
            println!("No audit entries found.");
        }
        for entry in &entries {
            println!("{}", entry.format_human_readable());
        }
    } else {
        print!("{}", format_audit_table(&entries));
        if entries.is_empty() {
            println!();
        }
    }

    Ok(())
}
