//! Document files: a JSON array of records, or a single record

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{CryptError, CryptResult};

use super::file_io::{read_json, write_json_atomic};

/// Records loaded from a document file, remembering the file's shape
#[derive(Debug, Clone)]
pub struct DocumentFile {
    path: PathBuf,
    documents: Vec<Value>,
    single: bool,
}

impl DocumentFile {
    /// Load a document file
    ///
    /// # Errors
    ///
    /// Returns `CryptError::Validation` if the top level is neither an array
    /// nor an object.
    pub fn load(path: impl AsRef<Path>) -> CryptResult<Self> {
        let path = path.as_ref().to_path_buf();
        let (documents, single) = match read_json::<Value, _>(&path)? {
            Value::Array(items) => (items, false),
            object @ Value::Object(_) => (vec![object], true),
            _ => {
                return Err(CryptError::Validation(format!(
                    "{} must contain a JSON object or array",
                    path.display()
                )))
            }
        };

        Ok(Self {
            path,
            documents,
            single,
        })
    }

    /// Write the documents back in the shape they were read
    pub fn save(&self) -> CryptResult<()> {
        self.save_to(&self.path)
    }

    /// Write the documents to another file
    pub fn save_to(&self, path: impl AsRef<Path>) -> CryptResult<()> {
        match (self.single, self.documents.first()) {
            (true, Some(document)) => write_json_atomic(path, document),
            _ => write_json_atomic(path, &self.documents),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn documents(&self) -> &[Value] {
        &self.documents
    }

    pub fn documents_mut(&mut self) -> &mut [Value] {
        &mut self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_array_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("items.json");
        std::fs::write(&path, r#"[{"a": 1}, {"a": 2}]"#).unwrap();

        let mut file = DocumentFile::load(&path).unwrap();
        assert_eq!(file.len(), 2);
        file.documents_mut()[0]["a"] = json!(10);
        file.save().unwrap();

        let reloaded = DocumentFile::load(&path).unwrap();
        assert_eq!(reloaded.documents()[0]["a"], 10);
    }

    #[test]
    fn test_single_object_keeps_shape() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("user.json");
        std::fs::write(&path, r#"{"phone": "555-0100"}"#).unwrap();

        let file = DocumentFile::load(&path).unwrap();
        assert_eq!(file.len(), 1);
        file.save().unwrap();

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw.is_object());
    }

    #[test]
    fn test_scalar_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scalar.json");
        std::fs::write(&path, "42").unwrap();

        assert!(matches!(
            DocumentFile::load(&path),
            Err(CryptError::Validation(_))
        ));
    }

    #[test]
    fn test_save_to_other_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("in.json");
        let out = temp_dir.path().join("out.json");
        std::fs::write(&path, "[]").unwrap();

        let file = DocumentFile::load(&path).unwrap();
        assert!(file.is_empty());
        file.save_to(&out).unwrap();
        assert!(out.exists());
    }
}
