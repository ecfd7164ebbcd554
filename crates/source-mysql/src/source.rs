//! MySQL source adapter.

use crate::ddl::MySQLDdl;
use crate::error::MySQLSourceError;
use async_trait::async_trait;
use dict_source_core::format::build_insert_query;
use dict_source_core::{
    Cluster, Element, ExternalSource, PreparedState, Row, SourceEndpoint, SourceError, Structure,
    ToDdl, TEST_DATABASE,
};
use mysql_async::prelude::*;
use mysql_async::{OptsBuilder, Pool};
use tracing::{debug, info};

/// Port of the deliberately unreachable first replica in the fragment, so the
/// system under test has to fail over to the real one.
pub const FAILOVER_PORT: u16 = 3333;

/// MySQL-backed dictionary source.
pub struct MySQLSource {
    endpoint: SourceEndpoint,
    pool: Option<Pool>,
    state: PreparedState,
}

impl MySQLSource {
    pub fn new(endpoint: SourceEndpoint) -> Self {
        Self {
            endpoint,
            pool: None,
            state: PreparedState::default(),
        }
    }

    /// Connection pool opened by `prepare`.
    pub fn pool(&self) -> Option<&Pool> {
        self.pool.as_ref()
    }

    fn connect(&self) -> Pool {
        let opts = OptsBuilder::default()
            .ip_or_hostname(self.endpoint.internal_hostname.clone())
            .tcp_port(self.endpoint.internal_port)
            .user(self.endpoint.user.clone())
            .pass(self.endpoint.password.clone());
        Pool::new(opts)
    }

    async fn execute(pool: &Pool, sql: &str) -> Result<(), MySQLSourceError> {
        let mut conn = pool.get_conn().await?;
        debug!("MySQL: {}", sql);
        conn.query_drop(sql).await?;
        Ok(())
    }

    async fn create_table(
        &mut self,
        structure: &Structure,
        table_name: &str,
    ) -> Result<(), MySQLSourceError> {
        let pool = self.connect();

        Self::execute(
            &pool,
            &format!("CREATE DATABASE IF NOT EXISTS {TEST_DATABASE} DEFAULT CHARACTER SET 'utf8'"),
        )
        .await?;

        info!("Creating MySQL table: {}.{}", TEST_DATABASE, table_name);
        let ddl = MySQLDdl.to_create_table(&format!("{TEST_DATABASE}.{table_name}"), structure);
        Self::execute(&pool, &ddl).await?;

        self.pool = Some(pool);
        Ok(())
    }

    async fn insert_rows(&self, rows: &[Row], table_name: &str) -> Result<(), MySQLSourceError> {
        let names = self.state.ordered_names(&self.endpoint.name)?;
        let Some(sql) = build_insert_query(&format!("{TEST_DATABASE}.{table_name}"), names, rows)?
        else {
            return Ok(());
        };
        let pool = self
            .pool
            .as_ref()
            .ok_or_else(|| SourceError::NotPrepared(self.endpoint.name.clone()))?;

        Self::execute(pool, &sql).await?;
        info!("Inserted {} rows into MySQL table {}", rows.len(), table_name);
        Ok(())
    }
}

#[async_trait]
impl ExternalSource for MySQLSource {
    fn endpoint(&self) -> &SourceEndpoint {
        &self.endpoint
    }

    fn kind_name(&self) -> &'static str {
        "SourceMySQL"
    }

    fn get_source_str(&mut self, table_name: &str) -> Result<String, SourceError> {
        let fragment = Element::new("mysql")
            .child(
                Element::new("replica")
                    .with("priority", 1)
                    .with("host", "127.0.0.1")
                    .with("port", FAILOVER_PORT),
            )
            .child(
                Element::new("replica")
                    .with("priority", 2)
                    .with("host", &self.endpoint.docker_hostname)
                    .with("port", self.endpoint.docker_port),
            )
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
        _cluster: &dyn Cluster,
    ) -> Result<(), SourceError> {
        if self.state.is_prepared() {
            return Ok(());
        }
        self.create_table(structure, table_name).await?;
        self.state.mark_prepared(structure);
        Ok(())
    }

    async fn load_data(&mut self, rows: &[Row], table_name: &str) -> Result<(), SourceError> {
        if rows.is_empty() {
            return Ok(());
        }
        Ok(self.insert_rows(rows, table_name).await?)
    }

    fn is_prepared(&self) -> bool {
        self.state.is_prepared()
    }
}
