//! Aerospike source adapter.

use crate::error::AerospikeSourceError;
use aerospike::{Bin, Bins, Client, ClientPolicy, Host, Key, ScanPolicy, WritePolicy};
use async_trait::async_trait;
use dict_source_core::{
    Cluster, Element, ExternalSource, Layout, PreparedState, Row, SourceEndpoint, SourceError,
    Structure, Value,
};
use std::sync::Arc;
use tracing::{debug, info};

pub const NAMESPACE: &str = "test";
pub const SET_NAME: &str = "test_set";
pub const BIN_NAME: &str = "bin_value";

/// One record derived from a two-column row.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordWrite {
    pub key: aerospike::Value,
    pub value: aerospike::Value,
}

impl RecordWrite {
    pub fn from_values(values: Vec<Value>) -> Result<Self, AerospikeSourceError> {
        let width = values.len();
        let mut values = values.into_iter();
        match (values.next(), values.next(), values.next()) {
            (Some(key), Some(value), None) => Ok(RecordWrite {
                key: to_aerospike(key)?,
                value: to_aerospike(value)?,
            }),
            _ => Err(SourceError::UnsupportedRowWidth(width).into()),
        }
    }
}

/// The server has no unsigned integers; values that fit go in as `i64`.
fn to_aerospike(value: Value) -> Result<aerospike::Value, AerospikeSourceError> {
    match value {
        Value::UInt(v) => i64::try_from(v)
            .map(aerospike::Value::from)
            .map_err(|_| AerospikeSourceError::UnsupportedValue(v.to_string())),
        Value::Int(v) => Ok(aerospike::Value::from(v)),
        Value::Float(v) => Ok(aerospike::Value::from(v)),
        Value::String(v) => Ok(aerospike::Value::from(v)),
    }
}

/// Delete every record of the set, then write one record per row.
fn replace_set(client: &Client, writes: &[RecordWrite]) -> Result<(), AerospikeSourceError> {
    let policy = WritePolicy::default();

    let recordset = client.scan(&ScanPolicy::default(), NAMESPACE, SET_NAME, Bins::None)?;
    let mut removed = 0usize;
    for record in &*recordset {
        if let Some(key) = record?.key {
            client.delete(&policy, &key)?;
            removed += 1;
        }
    }
    debug!("Removed {} records from {}.{}", removed, NAMESPACE, SET_NAME);

    for write in writes {
        let key = Key::new(NAMESPACE, SET_NAME, write.key.clone())?;
        let bins = [Bin::new(BIN_NAME, write.value.clone())];
        client.put(&policy, &key, &bins)?;
    }
    Ok(())
}

/// Aerospike-backed dictionary source.
pub struct AerospikeSource {
    endpoint: SourceEndpoint,
    client: Option<Arc<Client>>,
    state: PreparedState,
}

impl AerospikeSource {
    pub fn new(endpoint: SourceEndpoint) -> Self {
        Self {
            endpoint,
            client: None,
            state: PreparedState::default(),
        }
    }

    /// Client opened by `prepare`.
    pub fn client(&self) -> Option<Arc<Client>> {
        self.client.clone()
    }

    async fn connect(&mut self) -> Result<(), AerospikeSourceError> {
        info!(
            "Connecting to Aerospike at {}:{}",
            self.endpoint.internal_hostname, self.endpoint.internal_port
        );
        let host = Host::new(&self.endpoint.internal_hostname, self.endpoint.internal_port);
        let client = tokio::task::spawn_blocking(move || {
            Client::new(&ClientPolicy::default(), &vec![host])
        })
        .await??;
        self.client = Some(Arc::new(client));
        Ok(())
    }

    /// Flatten rows into records using the cached field order.
    fn plan_writes(&self, rows: &[Row]) -> Result<Vec<RecordWrite>, AerospikeSourceError> {
        let names = self.state.ordered_names(&self.endpoint.name)?;
        rows.iter()
            .map(|row| {
                let values = row.ordered_values(names)?.into_iter().cloned().collect();
                RecordWrite::from_values(values)
            })
            .collect()
    }

    async fn write(&self, writes: Vec<RecordWrite>) -> Result<(), AerospikeSourceError> {
        let client = self
            .client
            .clone()
            .ok_or_else(|| SourceError::NotPrepared(self.endpoint.name.clone()))?;
        tokio::task::spawn_blocking(move || replace_set(&client, &writes)).await?
    }
}

#[async_trait]
impl ExternalSource for AerospikeSource {
    fn endpoint(&self) -> &SourceEndpoint {
        &self.endpoint
    }

    fn kind_name(&self) -> &'static str {
        "SourceAerospike"
    }

    fn get_source_str(&mut self, _table_name: &str) -> Result<String, SourceError> {
        let fragment = Element::new("aerospike")
            .with("host", &self.endpoint.docker_hostname)
            .with("port", self.endpoint.docker_port);
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

    /// Replaces the whole set content with `rows`.
    async fn load_data(&mut self, rows: &[Row], _table_name: &str) -> Result<(), SourceError> {
        if rows.is_empty() {
            return Ok(());
        }
        let writes = self.plan_writes(rows)?;
        let count = writes.len();
        self.write(writes).await?;
        info!("Wrote {} records to Aerospike", count);
        Ok(())
    }

    fn compatible_with_layout(&self, layout: &Layout) -> bool {
        layout.is_simple()
    }

    fn is_prepared(&self) -> bool {
        self.state.is_prepared()
    }
}
