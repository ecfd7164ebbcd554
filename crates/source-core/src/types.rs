//! Field types understood by every source adapter.
//!
//! `FieldType` is the small fixed type universe a dictionary structure is
//! declared in. Its canonical spelling is the ClickHouse type name, which is
//! also what appears in YAML structure files:
//!
//! ```yaml
//! type: UInt64
//! type: DateTime
//! ```
//!
//! Backends derive their native column types from it (see the `ToDdl`
//! implementations in the backend crates).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared type of a structure field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Int8,
    Int16,
    Int32,
    Int64,
    #[serde(rename = "UUID")]
    Uuid,
    Date,
    DateTime,
    String,
    Float32,
    Float64,
}

impl FieldType {
    /// Every field type, in declaration order.
    pub const ALL: [FieldType; 14] = [
        FieldType::UInt8,
        FieldType::UInt16,
        FieldType::UInt32,
        FieldType::UInt64,
        FieldType::Int8,
        FieldType::Int16,
        FieldType::Int32,
        FieldType::Int64,
        FieldType::Uuid,
        FieldType::Date,
        FieldType::DateTime,
        FieldType::String,
        FieldType::Float32,
        FieldType::Float64,
    ];

    /// Canonical (ClickHouse) type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::UInt8 => "UInt8",
            FieldType::UInt16 => "UInt16",
            FieldType::UInt32 => "UInt32",
            FieldType::UInt64 => "UInt64",
            FieldType::Int8 => "Int8",
            FieldType::Int16 => "Int16",
            FieldType::Int32 => "Int32",
            FieldType::Int64 => "Int64",
            FieldType::Uuid => "UUID",
            FieldType::Date => "Date",
            FieldType::DateTime => "DateTime",
            FieldType::String => "String",
            FieldType::Float32 => "Float32",
            FieldType::Float64 => "Float64",
        }
    }

    pub fn is_unsigned(&self) -> bool {
        matches!(
            self,
            FieldType::UInt8 | FieldType::UInt16 | FieldType::UInt32 | FieldType::UInt64
        )
    }

    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            FieldType::Int8 | FieldType::Int16 | FieldType::Int32 | FieldType::Int64
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self, FieldType::Float32 | FieldType::Float64)
    }

    /// Date and DateTime values travel as strings and need parsing on
    /// backends with a native temporal type.
    pub fn is_temporal(&self) -> bool {
        matches!(self, FieldType::Date | FieldType::DateTime)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown field type: {0}")]
pub struct UnknownFieldType(pub String);

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownFieldType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for ty in FieldType::ALL {
            assert_eq!(ty.as_str().parse::<FieldType>().unwrap(), ty);
        }
        assert!("Decimal".parse::<FieldType>().is_err());
    }

    #[test]
    fn test_yaml_uses_canonical_names() {
        let ty: FieldType = serde_yaml::from_str("UUID").unwrap();
        assert_eq!(ty, FieldType::Uuid);
        assert_eq!(serde_yaml::to_string(&FieldType::UInt64).unwrap().trim(), "UInt64");
    }

    #[test]
    fn test_categories() {
        assert!(FieldType::UInt32.is_unsigned());
        assert!(!FieldType::UInt32.is_signed());
        assert!(FieldType::Int8.is_signed());
        assert!(FieldType::Float32.is_float());
        assert!(FieldType::DateTime.is_temporal());
        assert!(!FieldType::String.is_temporal());
    }
}
