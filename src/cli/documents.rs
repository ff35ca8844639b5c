//! Document CLI commands: seal, unseal, migrate
//!
//! Each command loads a JSON document file, rewrites the sensitive fields
//! and saves the result atomically, to the same file unless `--output` is
//! given.

use std::path::PathBuf;

use clap::Args;

use crate::audit::{AuditEntry, AuditLogger, Operation};
use crate::config::Settings;
use crate::crypto::CryptoService;
use crate::error::CryptResult;
use crate::records::{FieldSealer, SealReport};
use crate::storage::DocumentFile;

/// Arguments shared by the document commands
#[derive(Args, Debug, Clone)]
pub struct DocumentArgs {
    /// JSON file holding one document or an array of documents
    pub file: PathBuf,

    /// Field to process, dot-separated for nested fields (repeatable;
    /// defaults to the configured sensitive fields)
    #[arg(short, long = "field")]
    pub fields: Vec<String>,

    /// Write the result here instead of overwriting the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Which pass to run over the documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentAction {
    Seal,
    Unseal,
    Migrate,
}

impl DocumentAction {
    fn operation(self) -> Operation {
        match self {
            DocumentAction::Seal => Operation::Seal,
            DocumentAction::Unseal => Operation::Unseal,
            DocumentAction::Migrate => Operation::Migrate,
        }
    }
}

/// Run a document pass and return its report
pub fn run_document_action(
    service: &CryptoService,
    settings: &Settings,
    audit: Option<&AuditLogger>,
    action: DocumentAction,
    args: &DocumentArgs,
) -> CryptResult<SealReport> {
    let names: &[String] = if args.fields.is_empty() {
        &settings.sensitive_fields
    } else {
        &args.fields
    };
    let sealer = FieldSealer::from_names(service, names)?;
    let mut file = DocumentFile::load(&args.file)?;
    let target = file.path().display().to_string();

    let result = match action {
        DocumentAction::Seal => sealer.seal_all(file.documents_mut()),
        DocumentAction::Unseal => sealer.unseal_all(file.documents_mut()),
        DocumentAction::Migrate => sealer.migrate(file.documents_mut()),
    };

    let report = match result {
        Ok(report) => report,
        Err(err) => {
            if let (Some(logger), true) = (audit, err.is_decryption_failure()) {
                logger.log(
                    &AuditEntry::new(Operation::DecryptFailure, target.as_str())
                        .with_detail(err.to_string()),
                )?;
            }
            return Err(err);
        }
    };

    if args.dry_run {
        return Ok(report);
    }

    match &args.output {
        Some(output) => file.save_to(output)?,
        None => file.save()?,
    }

    if let Some(logger) = audit {
        logger.log(&AuditEntry::pass(
            action.operation(),
            target,
            sealer.fields(),
            file.len(),
            report,
        ))?;
    }

    Ok(report)
}

/// Handle a document command and print its summary
pub fn handle_document_command(
    service: &CryptoService,
    settings: &Settings,
    audit: Option<&AuditLogger>,
    action: DocumentAction,
    args: &DocumentArgs,
) -> CryptResult<()> {
    let report = run_document_action(service, settings, audit, action, args)?;

    if args.dry_run {
        println!("Dry run: {}", report.summary());
    } else {
        let written = args.output.as_ref().unwrap_or(&args.file);
        println!("{}: {}", written.display(), report.summary());
    }

    Ok(())
}
