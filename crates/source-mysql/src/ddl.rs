//! MySQL DDL generation from `FieldType`.

use dict_source_core::{FieldType, ToDdl};

/// MySQL DDL generator.
pub struct MySQLDdl;

impl ToDdl for MySQLDdl {
    fn to_ddl(&self, field_type: FieldType) -> String {
        match field_type {
            FieldType::UInt8 => "tinyint unsigned",
            FieldType::UInt16 => "smallint unsigned",
            FieldType::UInt32 => "int unsigned",
            FieldType::UInt64 => "bigint unsigned",
            FieldType::Int8 => "tinyint",
            FieldType::Int16 => "smallint",
            FieldType::Int32 => "int",
            FieldType::Int64 => "bigint",
            FieldType::Uuid => "varchar(36)",
            FieldType::Date => "date",
            FieldType::DateTime => "datetime",
            FieldType::String => "text",
            FieldType::Float32 => "float",
            FieldType::Float64 => "double",
        }
        .to_string()
    }
}
