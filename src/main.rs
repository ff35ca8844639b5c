use anyhow::Result;
use clap::{Parser, Subcommand};

use fieldcrypt::audit::AuditLogger;
use fieldcrypt::cli::{
    handle_audit, handle_config, handle_decrypt, handle_document_command, handle_encrypt,
    handle_init, handle_keygen, handle_status, DocumentAction, DocumentArgs,
};
use fieldcrypt::config::{FieldcryptPaths, Settings};
use fieldcrypt::crypto::CryptoService;

#[derive(Parser)]
#[command(
    name = "fieldcrypt",
    author = "Kaylee Beyene",
    version,
    about = "Symmetric field encryption for sensitive finance data",
    long_about = "fieldcrypt encrypts sensitive values such as bank access tokens \
                  and account numbers with AES-256-GCM before they are stored, \
                  and reads back both encrypted values and legacy plaintext."
)]
struct Cli {
    /// Environment variable holding the key (overrides settings)
    #[arg(long, global = true, value_name = "VAR")]
    key_env: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write settings with a fresh key-derivation salt
    Init {
        /// Replace an existing salt
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration and paths
    Config,

    /// Generate a random 256-bit key
    Keygen {
        /// Print the key as base64 instead of hex
        #[arg(long)]
        base64: bool,
    },

    /// Encrypt a value (prompts when omitted)
    Encrypt { value: Option<String> },

    /// Decrypt a stored value (prompts when omitted)
    Decrypt {
        value: Option<String>,

        /// Print the stored value if it cannot be decrypted
        #[arg(long)]
        raw_on_failure: bool,
    },

    /// Report whether a stored value is encrypted
    Status { value: String },

    /// Encrypt sensitive fields in a JSON document file
    Seal(DocumentArgs),

    /// Decrypt sensitive fields in a JSON document file
    Unseal(DocumentArgs),

    /// Encrypt legacy plaintext fields, verifying existing ciphertext first
    Migrate(DocumentArgs),

    /// Show the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        recent: usize,

        /// Show full entries instead of a table
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = FieldcryptPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    if let Some(var) = cli.key_env {
        settings.key_env_var = var;
    }

    let logger = AuditLogger::new(paths.audit_log());
    let audit = settings.audit_enabled.then_some(&logger);

    match cli.command {
        Some(Commands::Init { force }) => handle_init(&paths, &mut settings, force)?,
        Some(Commands::Config) => handle_config(&paths, &settings)?,
        Some(Commands::Keygen { base64 }) => handle_keygen(&paths, &settings, base64)?,
        Some(Commands::Encrypt { value }) => {
            let service = CryptoService::from_config(&settings)?;
            handle_encrypt(&service, value)?;
        }
        Some(Commands::Decrypt {
            value,
            raw_on_failure,
        }) => {
            let service = CryptoService::from_config(&settings)?;
            handle_decrypt(&service, audit, value, raw_on_failure)?;
        }
        Some(Commands::Status { value }) => handle_status(&value)?,
        Some(Commands::Seal(args)) => {
            let service = CryptoService::from_config(&settings)?;
            handle_document_command(&service, &settings, audit, DocumentAction::Seal, &args)?;
        }
        Some(Commands::Unseal(args)) => {
            let service = CryptoService::from_config(&settings)?;
            handle_document_command(&service, &settings, audit, DocumentAction::Unseal, &args)?;
        }
        Some(Commands::Migrate(args)) => {
            let service = CryptoService::from_config(&settings)?;
            handle_document_command(&service, &settings, audit, DocumentAction::Migrate, &args)?;
        }
        Some(Commands::Audit { recent, verbose }) => handle_audit(&logger, recent, verbose)?,
        None => {
            println!("fieldcrypt - field encryption for sensitive finance data");
            println!();
            println!("Run 'fieldcrypt --help' for usage information.");
            println!("Run 'fieldcrypt keygen' to create a key.");
        }
    }

    Ok(())
}
