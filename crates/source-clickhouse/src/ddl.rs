//! ClickHouse DDL generation. Field types already use ClickHouse names.

use dict_source_core::{FieldType, ToDdl};

/// ClickHouse DDL generator (MergeTree tables without a sorting key).
pub struct ClickHouseDdl;

impl ToDdl for ClickHouseDdl {
    fn to_ddl(&self, field_type: FieldType) -> String {
        field_type.as_str().to_string()
    }

    fn table_suffix(&self) -> &str {
        " ENGINE MergeTree ORDER BY tuple()"
    }
}
