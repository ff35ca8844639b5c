//! Field-level protection for stored documents
//!
//! Documents are plain JSON values as the document database stores them.
//! A `FieldSealer` encrypts or decrypts the named sensitive fields in place
//! and reports what it touched.
//!
//! # Example
//!
//! ```rust,ignore
//! use fieldcrypt::crypto::CryptoService;
//! use fieldcrypt::records::FieldSealer;
//!
//! let service = CryptoService::from_config(&settings)?;
//! let sealer = FieldSealer::from_names(&service, &["plaid.accessToken"])?;
//! let report = sealer.seal(&mut document)?;
//! println!("{}", report.summary());
//! ```

mod path;
mod report;
mod sealer;

pub use path::FieldPath;
pub use report::SealReport;
pub use sealer::FieldSealer;
