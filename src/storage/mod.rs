//! Storage layer for fieldcrypt
//!
//! JSON document files with atomic writes and automatic directory creation.

pub mod documents;
pub mod file_io;

pub use documents::DocumentFile;
pub use file_io::{read_json, write_json_atomic};
