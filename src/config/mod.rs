//! Configuration module for fieldcrypt
//!
//! Path resolution and persisted settings. The key itself is never stored
//! here; settings only name the environment variable that carries it.

pub mod paths;
pub mod settings;

pub use paths::FieldcryptPaths;
pub use settings::Settings;
