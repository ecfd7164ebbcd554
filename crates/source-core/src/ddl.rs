//! DDL generation for the relational sources.

use crate::structure::Structure;
use crate::types::FieldType;

/// Trait for generating DDL from a [`Structure`].
pub trait ToDdl {
    /// Native column type for a field type.
    fn to_ddl(&self, field_type: FieldType) -> String;

    /// Text appended after the column list (engine clauses and the like).
    fn table_suffix(&self) -> &str {
        ""
    }

    /// Complete CREATE TABLE statement. Columns follow the structure's
    /// positional order.
    fn to_create_table(&self, qualified_table: &str, structure: &Structure) -> String {
        let columns: Vec<String> = structure
            .all_fields()
            .map(|f| format!("{} {}", f.name, self.to_ddl(f.field_type)))
            .collect();
        format!(
            "CREATE TABLE {} ({}){}",
            qualified_table,
            columns.join(", "),
            self.table_suffix()
        )
    }
}
