//! Row shape → Redis command mapping.

use dict_source_core::SourceError;

/// One Redis write derived from a flattened row.
///
/// A two-column row is a plain key/value pair; a three-column row is a hash
/// field under a key. Rows of any other width cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyValueWrite {
    Set {
        key: String,
        value: String,
    },
    HashSet {
        key: String,
        field: String,
        value: String,
    },
}

impl KeyValueWrite {
    pub fn from_values(values: Vec<String>) -> Result<Self, SourceError> {
        let width = values.len();
        let mut values = values.into_iter();
        match (values.next(), values.next(), values.next(), values.next()) {
            (Some(key), Some(value), None, None) => Ok(KeyValueWrite::Set { key, value }),
            (Some(key), Some(field), Some(value), None) => {
                Ok(KeyValueWrite::HashSet { key, field, value })
            }
            _ => Err(SourceError::UnsupportedRowWidth(width)),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            KeyValueWrite::Set { key, .. } | KeyValueWrite::HashSet { key, .. } => key,
        }
    }

    /// Append this write to a pipeline.
    pub fn add_to(&self, pipe: &mut redis::Pipeline) {
        match self {
            KeyValueWrite::Set { key, value } => {
                pipe.set(key, value).ignore();
            }
            KeyValueWrite::HashSet { key, field, value } => {
                pipe.hset(key, field, value).ignore();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_width_two_is_set() {
        assert_eq!(
            KeyValueWrite::from_values(strings(&["1", "a"])).unwrap(),
            KeyValueWrite::Set {
                key: "1".to_string(),
                value: "a".to_string()
            }
        );
    }

    #[test]
    fn test_width_three_is_hash_set() {
        let write = KeyValueWrite::from_values(strings(&["1", "2", "a"])).unwrap();
        assert_eq!(
            write,
            KeyValueWrite::HashSet {
                key: "1".to_string(),
                field: "2".to_string(),
                value: "a".to_string()
            }
        );
        assert_eq!(write.key(), "1");
    }

    #[test]
    fn test_other_widths_rejected() {
        for width in [0usize, 1, 4] {
            let values = (0..width).map(|i| i.to_string()).collect();
            assert!(matches!(
                KeyValueWrite::from_values(values),
                Err(SourceError::UnsupportedRowWidth(w)) if w == width
            ));
        }
    }
}
