//! Redis source adapter.

use crate::error::RedisSourceError;
use crate::write::KeyValueWrite;
use async_trait::async_trait;
use dict_source_core::{
    Cluster, Element, ExternalSource, Layout, PreparedState, Row, SourceEndpoint, SourceError,
    Structure,
};
use redis::aio::MultiplexedConnection;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Database index every Redis source uses.
pub const DB_INDEX: u8 = 0;

/// How the system under test reads values back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedisStorageType {
    /// `GET key`
    Simple,
    /// `HGET key field`
    HashMap,
}

impl RedisStorageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedisStorageType::Simple => "simple",
            RedisStorageType::HashMap => "hash_map",
        }
    }
}

impl fmt::Display for RedisStorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RedisStorageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(RedisStorageType::Simple),
            "hash_map" => Ok(RedisStorageType::HashMap),
            other => Err(format!("Unknown Redis storage type: {other}")),
        }
    }
}

/// Redis-backed dictionary source.
pub struct RedisSource {
    endpoint: SourceEndpoint,
    storage_type: RedisStorageType,
    connection: Option<MultiplexedConnection>,
    state: PreparedState,
}

impl RedisSource {
    pub fn new(endpoint: SourceEndpoint, storage_type: RedisStorageType) -> Self {
        Self {
            endpoint,
            storage_type,
            connection: None,
            state: PreparedState::default(),
        }
    }

    pub fn storage_type(&self) -> RedisStorageType {
        self.storage_type
    }

    /// Connection opened by `prepare`.
    pub fn connection(&self) -> Option<MultiplexedConnection> {
        self.connection.clone()
    }

    async fn connect(&mut self) -> Result<(), RedisSourceError> {
        let url = format!(
            "redis://{}:{}/{}",
            self.endpoint.internal_hostname, self.endpoint.internal_port, DB_INDEX
        );
        let client = redis::Client::open(url)?;
        self.connection = Some(client.get_multiplexed_async_connection().await?);
        Ok(())
    }

    /// Flatten rows into writes using the cached field order.
    fn plan_writes(&self, rows: &[Row]) -> Result<Vec<KeyValueWrite>, SourceError> {
        let names = self.state.ordered_names(&self.endpoint.name)?;
        rows.iter()
            .map(|row| {
                let values = row
                    .ordered_values(names)?
                    .into_iter()
                    .map(|v| v.to_string())
                    .collect();
                KeyValueWrite::from_values(values)
            })
            .collect()
    }

    async fn write(&self, writes: &[KeyValueWrite]) -> Result<(), RedisSourceError> {
        let mut conn = self
            .connection
            .clone()
            .ok_or_else(|| SourceError::NotPrepared(self.endpoint.name.clone()))?;

        redis::cmd("FLUSHDB").query_async::<()>(&mut conn).await?;

        let mut pipe = redis::pipe();
        for write in writes {
            debug!("Redis write: {:?}", write);
            write.add_to(&mut pipe);
        }
        pipe.query_async::<()>(&mut conn).await?;
        Ok(())
    }
}

#[async_trait]
impl ExternalSource for RedisSource {
    fn endpoint(&self) -> &SourceEndpoint {
        &self.endpoint
    }

    fn kind_name(&self) -> &'static str {
        "SourceRedis"
    }

    fn get_source_str(&mut self, _table_name: &str) -> Result<String, SourceError> {
        let fragment = Element::new("redis")
            .with("host", &self.endpoint.docker_hostname)
            .with("port", self.endpoint.docker_port)
            .with("db_index", DB_INDEX)
            .with("storage_type", self.storage_type);
        Ok(fragment.render())
    }

    async fn prepare(
        &mut self,
        structure: &Structure,
        _table_name: &str,
        _cluster: &dyn Cluster,
    ) -> Result<(), SourceError> {
        if self.state.is_prepared() {
            return Ok(());
        }
        self.connect().await?;
        self.state.mark_prepared(structure);
        Ok(())
    }

    /// Replaces the whole database content with `rows`.
    async fn load_data(&mut self, rows: &[Row], _table_name: &str) -> Result<(), SourceError> {
        if rows.is_empty() {
            return Ok(());
        }
        let writes = self.plan_writes(rows)?;
        self.write(&writes).await?;
        info!("Wrote {} keys to Redis", writes.len());
        Ok(())
    }

    fn compatible_with_layout(&self, layout: &Layout) -> bool {
        match self.storage_type {
            RedisStorageType::Simple => {
                layout.is_simple()
                    || (layout.is_complex() && layout.name == "complex_key_hashed_one_key")
            }
            RedisStorageType::HashMap => {
                layout.is_complex() && layout.name == "complex_key_hashed_two_keys"
            }
        }
    }

    fn is_prepared(&self) -> bool {
        self.state.is_prepared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dict_source_core::{Field, FieldType, Value};

    fn source(storage_type: RedisStorageType) -> RedisSource {
        RedisSource::new(
            SourceEndpoint::new("Redis", "localhost", 6380, "redis1", 6379),
            storage_type,
        )
    }

    /// Reference predicate, written the way the compatibility rule reads.
    fn expected(layout: &Layout, storage: RedisStorageType) -> bool {
        let simple = storage == RedisStorageType::Simple;
        (layout.is_simple() && simple)
            || (layout.is_complex() && simple && layout.name == "complex_key_hashed_one_key")
            || (layout.is_complex() && !simple && layout.name == "complex_key_hashed_two_keys")
    }

    #[test]
    fn test_compatibility_matrix() {
        for storage in [RedisStorageType::Simple, RedisStorageType::HashMap] {
            let source = source(storage);
            for layout in Layout::catalog() {
                assert_eq!(
                    source.compatible_with_layout(&layout),
                    expected(&layout, storage),
                    "{layout} with {storage}"
                );
            }
        }
    }

    #[test]
    fn test_compatibility_examples() {
        let simple = source(RedisStorageType::Simple);
        let hash_map = source(RedisStorageType::HashMap);

        assert!(simple.compatible_with_layout(&Layout::new("flat")));
        assert!(simple.compatible_with_layout(&Layout::new("cache")));
        assert!(simple.compatible_with_layout(&Layout::new("complex_key_hashed_one_key")));
        assert!(!simple.compatible_with_layout(&Layout::new("complex_key_hashed_two_keys")));
        assert!(!simple.compatible_with_layout(&Layout::new("range_hashed")));

        assert!(hash_map.compatible_with_layout(&Layout::new("complex_key_hashed_two_keys")));
        assert!(!hash_map.compatible_with_layout(&Layout::new("flat")));
        assert!(!hash_map.compatible_with_layout(&Layout::new("complex_key_hashed_one_key")));
    }

    #[test]
    fn test_source_str() {
        let fragment = source(RedisStorageType::HashMap)
            .get_source_str("ignored")
            .unwrap();
        assert!(fragment.contains("<host>redis1</host>"));
        assert!(fragment.contains("<port>6379</port>"));
        assert!(fragment.contains("<db_index>0</db_index>"));
        assert!(fragment.contains("<storage_type>hash_map</storage_type>"));
    }

    #[test]
    fn test_plan_writes() {
        let structure = Structure::new(vec![
            Field::key("k1", FieldType::UInt64),
            Field::key("k2", FieldType::String),
            Field::new("value", FieldType::String),
        ])
        .unwrap();
        let mut source = source(RedisStorageType::HashMap);
        source.state.mark_prepared(&structure);

        let writes = source
            .plan_writes(&[Row::from_pairs([
                ("value", Value::from("v")),
                ("k2", Value::from("f")),
                ("k1", Value::UInt(1)),
            ])])
            .unwrap();
        assert_eq!(
            writes,
            vec![KeyValueWrite::HashSet {
                key: "1".to_string(),
                field: "f".to_string(),
                value: "v".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_load_empty_is_noop() {
        let mut source = source(RedisStorageType::Simple);
        source.load_data(&[], "t").await.unwrap();
        assert!(source.connection().is_none());
    }

    #[test]
    fn test_storage_type_parse() {
        assert_eq!("simple".parse::<RedisStorageType>(), Ok(RedisStorageType::Simple));
        assert_eq!("hash_map".parse::<RedisStorageType>(), Ok(RedisStorageType::HashMap));
        assert!("list".parse::<RedisStorageType>().is_err());
    }
}
