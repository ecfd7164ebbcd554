//! ClickHouse source adapter.

use crate::ddl::ClickHouseDdl;
use async_trait::async_trait;
use dict_source_core::format::build_insert_query;
use dict_source_core::{
    Cluster, Element, ExternalSource, Node, PreparedState, Row, SourceEndpoint, SourceError,
    Structure, ToDdl, TEST_DATABASE,
};
use std::sync::Arc;
use tracing::{debug, info};

/// ClickHouse-backed dictionary source.
pub struct ClickHouseSource {
    endpoint: SourceEndpoint,
    node: Option<Arc<dyn Node>>,
    state: PreparedState,
}

impl ClickHouseSource {
    pub fn new(endpoint: SourceEndpoint) -> Self {
        Self {
            endpoint,
            node: None,
            state: PreparedState::default(),
        }
    }

    fn node(&self) -> Result<&Arc<dyn Node>, SourceError> {
        self.node
            .as_ref()
            .ok_or_else(|| SourceError::NotPrepared(self.endpoint.name.clone()))
    }
}

#[async_trait]
impl ExternalSource for ClickHouseSource {
    fn endpoint(&self) -> &SourceEndpoint {
        &self.endpoint
    }

    fn kind_name(&self) -> &'static str {
        "SourceClickHouse"
    }

    fn get_source_str(&mut self, table_name: &str) -> Result<String, SourceError> {
        let fragment = Element::new("clickhouse")
            .with("host", &self.endpoint.docker_hostname)
            .with("port", self.endpoint.docker_port)
            .with("user", self.endpoint.user())
            .with("password", self.endpoint.password())
            .with("db", TEST_DATABASE)
            .with("table", table_name);
        Ok(fragment.render())
    }

    async fn prepare(
        &mut self,
        structure: &Structure,
        table_name: &str,
        cluster: &dyn Cluster,
    ) -> Result<(), SourceError> {
        if self.state.is_prepared() {
            return Ok(());
        }
        let node = cluster.require_instance(&self.endpoint.docker_hostname)?;

        node.query(&format!("CREATE DATABASE IF NOT EXISTS {TEST_DATABASE}"))
            .await?;

        info!("Creating ClickHouse table: {}.{}", TEST_DATABASE, table_name);
        let ddl = ClickHouseDdl.to_create_table(&format!("{TEST_DATABASE}.{table_name}"), structure);
        debug!("DDL: {}", ddl);
        node.query(&ddl).await?;

        self.node = Some(node);
        self.state.mark_prepared(structure);
        Ok(())
    }

    async fn load_data(&mut self, rows: &[Row], table_name: &str) -> Result<(), SourceError> {
        if rows.is_empty() {
            return Ok(());
        }
        let names = self.state.ordered_names(&self.endpoint.name)?;
        let Some(sql) = build_insert_query(&format!("{TEST_DATABASE}.{table_name}"), names, rows)?
        else {
            return Ok(());
        };
        self.node()?.query(&sql).await?;
        info!(
            "Inserted {} rows into ClickHouse table {}",
            rows.len(),
            table_name
        );
        Ok(())
    }

    fn is_prepared(&self) -> bool {
        self.state.is_prepared()
    }
}
