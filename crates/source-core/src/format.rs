//! Row serialization shared by several backends: SQL literals for the
//! relational sources, TabSeparated lines for the file-fed sources, and
//! shell quoting for commands run inside cluster nodes.

use crate::error::SourceError;
use crate::values::{Row, Value};

/// Render a value as an SQL literal. Strings are single-quoted with `\` and
/// `'` backslash-escaped, which both MySQL and ClickHouse accept.
pub fn sql_literal(value: &Value) -> String {
    match value {
        Value::String(s) => {
            let mut out = String::with_capacity(s.len() + 2);
            out.push('\'');
            for c in s.chars() {
                match c {
                    '\\' => out.push_str("\\\\"),
                    '\'' => out.push_str("\\'"),
                    _ => out.push(c),
                }
            }
            out.push('\'');
            out
        }
        other => other.to_string(),
    }
}

/// Build a single multi-row INSERT with literal values, columns in `names`
/// order. Returns `None` for an empty batch.
pub fn build_insert_query(
    qualified_table: &str,
    names: &[String],
    rows: &[Row],
) -> Result<Option<String>, SourceError> {
    if rows.is_empty() {
        return Ok(None);
    }

    let mut tuples = Vec::with_capacity(rows.len());
    for row in rows {
        let literals: Vec<String> = row
            .ordered_values(names)?
            .into_iter()
            .map(sql_literal)
            .collect();
        tuples.push(format!("({})", literals.join(",")));
    }

    Ok(Some(format!(
        "INSERT INTO {} ({}) VALUES {}",
        qualified_table,
        names.join(","),
        tuples.join(",")
    )))
}

/// Escape a cell for the TabSeparated format.
pub fn tsv_escape(cell: &str) -> String {
    let mut out = String::with_capacity(cell.len());
    for c in cell.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// One TabSeparated line (without the trailing newline).
pub fn tsv_line(row: &Row, names: &[String]) -> Result<String, SourceError> {
    let cells: Vec<String> = row
        .ordered_values(names)?
        .into_iter()
        .map(|v| tsv_escape(&v.to_string()))
        .collect();
    Ok(cells.join("\t"))
}

/// Quote a string for POSIX shells.
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Shell script appending `lines` to `path`, one per line.
pub fn append_lines_script(path: &str, lines: &[String]) -> String {
    let quoted: Vec<String> = lines.iter().map(|l| shell_quote(l)).collect();
    format!("printf '%s\\n' {} >> {}", quoted.join(" "), shell_quote(path))
}
