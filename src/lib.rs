//! fieldcrypt - symmetric field encryption for a personal-finance backend
//!
//! Protects sensitive values (bank-aggregator access tokens, account
//! numbers, phone numbers) before they are written to the document store.
//!
//! # Architecture
//!
//! - `crypto`: the `CryptoService` (`encrypt` / `decrypt` of text values,
//!   stored as `<ivHex>:<cipherHex>`) and key provisioning
//! - `records`: sealing and unsealing named fields of JSON documents
//! - `storage`: document files with atomic writes
//! - `audit`: append-only JSONL audit trail
//! - `config`: path resolution and settings
//! - `error`: custom error types
//! - `cli`: command handlers for the `fieldcrypt` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use fieldcrypt::config::{FieldcryptPaths, Settings};
//! use fieldcrypt::crypto::CryptoService;
//!
//! let paths = FieldcryptPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let service = CryptoService::from_config(&settings)?;
//!
//! let stored = service.encrypt("access-sandbox-123")?;
//! assert_eq!(service.decrypt(&stored)?, "access-sandbox-123");
//! assert_eq!(service.decrypt("NotEncrypted")?, "NotEncrypted");
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod records;
pub mod storage;

pub use crypto::CryptoService;
pub use error::{CryptError, CryptResult};
