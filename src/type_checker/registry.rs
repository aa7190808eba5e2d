//! Host-supplied built-in registry.
//!
//! Names of pre-existing objects, properties (with their value type) and
//! functions (with their signature). The registry is read-only while a
//! source is tokenized and parsed.
//!
//! It is usually loaded from JSON:
//!
//! ```json
//! {
//!     "objects": ["console"],
//!     "properties": { "length": "Number" },
//!     "functions": { "print": { "input": ["String"], "output": "Number" } }
//! }
//! ```

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{
    ast::types::{Signature, ValueType},
    lexer::tokens::BuiltinKind,
};

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("failed to read registry {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid registry: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Registry {
    pub objects: BTreeSet<String>,
    pub properties: BTreeMap<String, ValueType>,
    pub functions: BTreeMap<String, Signature>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    pub fn with_object(mut self, name: &str) -> Self {
        self.objects.insert(name.to_string());
        self
    }

    pub fn with_property(mut self, name: &str, value_type: ValueType) -> Self {
        self.properties.insert(name.to_string(), value_type);
        self
    }

    pub fn with_function(mut self, name: &str, input: Vec<ValueType>, output: ValueType) -> Self {
        self.functions
            .insert(name.to_string(), Signature::new(input, output));
        self
    }

    /// Looks a name up in the Object, Property and Function tables, in that order.
    pub fn probe(&self, name: &str) -> Option<BuiltinKind> {
        if self.objects.contains(name) {
            Some(BuiltinKind::Object)
        } else if self.properties.contains_key(name) {
            Some(BuiltinKind::Property)
        } else if self.functions.contains_key(name) {
            Some(BuiltinKind::Function)
        } else {
            None
        }
    }

    pub fn signature(&self, name: &str) -> Option<&Signature> {
        self.functions.get(name)
    }

    pub fn len(&self) -> usize {
        self.objects.len() + self.properties.len() + self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let registry: Registry = serde_json::from_str(json)?;
        debug!(
            objects = registry.objects.len(),
            properties = registry.properties.len(),
            functions = registry.functions.len(),
            "loaded registry"
        );
        Ok(registry)
    }

    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let json = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Registry::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_order() {
        let registry = Registry::new()
            .with_object("shared")
            .with_property("shared", ValueType::Number)
            .with_property("width", ValueType::Number)
            .with_function("width", vec![], ValueType::Number)
            .with_function("print", vec![ValueType::String], ValueType::Number);

        assert_eq!(registry.probe("shared"), Some(BuiltinKind::Object));
        assert_eq!(registry.probe("width"), Some(BuiltinKind::Property));
        assert_eq!(registry.probe("print"), Some(BuiltinKind::Function));
        assert_eq!(registry.probe("missing"), None);
    }

    #[test]
    fn test_from_json() {
        let registry = Registry::from_json(
            r#"{
                "objects": ["screen"],
                "properties": { "width": "Number", "title": "String" },
                "functions": { "print": { "input": ["String", "Number"], "output": "Number" } }
            }"#,
        )
        .unwrap();

        assert!(registry.objects.contains("screen"));
        assert_eq!(registry.properties.get("title"), Some(&ValueType::String));
        assert_eq!(
            registry.signature("print"),
            Some(&Signature::new(
                vec![ValueType::String, ValueType::Number],
                ValueType::Number
            ))
        );
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_from_json_sections_are_optional() {
        let registry = Registry::from_json(r#"{ "objects": ["screen"] }"#).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(Registry::from_json("{}").unwrap().is_empty());
    }

    #[test]
    fn test_from_json_rejects_unknown_type() {
        let result = Registry::from_json(r#"{ "properties": { "width": "Boolean" } }"#);
        assert!(matches!(result, Err(RegistryError::Json(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Registry::load(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(RegistryError::Io { .. })));
    }
}
