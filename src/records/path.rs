//! Dot-separated paths into JSON documents

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::CryptError;

/// A path such as `plaid.accessToken` naming a nested object field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dot-separated path
    pub fn parse(s: &str) -> Result<Self, CryptError> {
        let segments: Vec<String> = s.split('.').map(str::to_string).collect();
        if segments.iter().any(|seg| seg.trim().is_empty()) {
            return Err(CryptError::Validation(format!("Invalid field path: '{}'", s)));
        }
        Ok(Self { segments })
    }

    /// Resolve the path in a document, if every intermediate value is an object
    pub fn get<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(document, |current, segment| current.as_object()?.get(segment))
    }

    pub fn get_mut<'a>(&self, document: &'a mut Value) -> Option<&'a mut Value> {
        self.segments
            .iter()
            .try_fold(document, |current, segment| {
                current.as_object_mut()?.get_mut(segment)
            })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl FromStr for FieldPath {
    type Err = CryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
