//! Rows to load, read from JSON Lines.
//!
//! Each non-blank line is one object mapping field names to scalars:
//!
//! ```text
//! {"id": 1, "value": "a"}
//! {"id": 2, "value": "b"}
//! ```

use dict_source_core::Row;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RowsError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid row on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

pub fn parse_rows(text: &str) -> Result<Vec<Row>, RowsError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|source| RowsError::Json {
                line: idx + 1,
                source,
            })
        })
        .collect()
}

pub fn read_rows(path: impl AsRef<Path>) -> Result<Vec<Row>, RowsError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| RowsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rows(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dict_source_core::Value;
    use std::io::Write;

    #[test]
    fn test_parse_rows() {
        let rows = parse_rows("{\"id\": 1, \"value\": \"a\"}\n\n{\"id\": -2, \"value\": 0.5}\n")
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("id"), Some(&Value::UInt(1)));
        assert_eq!(rows[0].get("value"), Some(&Value::from("a")));
        assert_eq!(rows[1].get("id"), Some(&Value::Int(-2)));
        assert_eq!(rows[1].get("value"), Some(&Value::Float(0.5)));
    }

    #[test]
    fn test_parse_error_reports_line() {
        let err = parse_rows("{\"id\": 1}\n{oops}\n").unwrap_err();
        assert!(matches!(err, RowsError::Json { line: 2, .. }));
    }

    #[test]
    fn test_read_rows_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{\"id\": 7}}").unwrap();
        let rows = read_rows(file.path()).unwrap();
        assert_eq!(rows, vec![Row::from_pairs([("id", Value::UInt(7))])]);
    }
}
