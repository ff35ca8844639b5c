//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the library.

pub mod audit;
pub mod documents;
pub mod setup;
pub mod values;

pub use audit::handle_audit;
pub use documents::{handle_document_command, DocumentAction, DocumentArgs};
pub use setup::{handle_config, handle_init, handle_keygen};
pub use values::{handle_decrypt, handle_encrypt, handle_status};
