//! Structure (schema descriptor) of a test dictionary source.
//!
//! A structure is split into three ordered groups: key fields, range fields
//! and ordinary fields. The positional order used everywhere a row is
//! flattened (TSV lines, SQL value tuples, key-value writes) is keys first,
//! then range fields, then ordinary fields. Adapters cache that order in
//! `prepare` and reuse it in `load_data`.
//!
//! ## YAML format
//!
//! ```yaml
//! fields:
//!   - name: id
//!     type: UInt64
//!     role: key
//!   - name: start
//!     type: Date
//!     role: range
//!   - name: value
//!     type: String
//! ```

use crate::types::FieldType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Error type for structure operations.
#[derive(Debug, thiserror::Error)]
pub enum StructureError {
    /// Error reading structure file
    #[error("Failed to read structure file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Two fields share a name
    #[error("Duplicate field name: {0}")]
    DuplicateField(String),
}

/// Which group of the structure a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    Key,
    Range,
    #[default]
    Ordinary,
}

/// A single typed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(default)]
    pub role: FieldRole,
}

impl Field {
    /// Create an ordinary field.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            role: FieldRole::Ordinary,
        }
    }

    /// Create a key field.
    pub fn key(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            role: FieldRole::Key,
            ..Self::new(name, field_type)
        }
    }

    /// Create a range field.
    pub fn range(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            role: FieldRole::Range,
            ..Self::new(name, field_type)
        }
    }
}

#[derive(Deserialize)]
struct StructureFile {
    fields: Vec<Field>,
}

/// Schema descriptor for a test table / collection / file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    pub keys: Vec<Field>,
    pub range_fields: Vec<Field>,
    pub ordinary_fields: Vec<Field>,
}

impl Structure {
    /// Build a structure, grouping fields by role while keeping their
    /// relative order inside each group.
    pub fn new(fields: Vec<Field>) -> Result<Self, StructureError> {
        let mut seen = HashSet::new();
        let mut structure = Self {
            keys: Vec::new(),
            range_fields: Vec::new(),
            ordinary_fields: Vec::new(),
        };

        for field in fields {
            if !seen.insert(field.name.clone()) {
                return Err(StructureError::DuplicateField(field.name));
            }
            match field.role {
                FieldRole::Key => structure.keys.push(field),
                FieldRole::Range => structure.range_fields.push(field),
                FieldRole::Ordinary => structure.ordinary_fields.push(field),
            }
        }

        Ok(structure)
    }

    /// Parse a structure from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, StructureError> {
        let file: StructureFile = serde_yaml::from_str(yaml)?;
        Self::new(file.fields)
    }

    /// Load a structure from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StructureError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// All fields in positional order: keys, range fields, ordinary fields.
    pub fn all_fields(&self) -> impl Iterator<Item = &Field> {
        self.keys
            .iter()
            .chain(self.range_fields.iter())
            .chain(self.ordinary_fields.iter())
    }

    /// Field names in positional order.
    pub fn ordered_names(&self) -> Vec<String> {
        self.all_fields().map(|f| f.name.clone()).collect()
    }

    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.all_fields().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.keys.len() + self.range_fields.len() + self.ordinary_fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
