//! Source running a command that prints the TSV file.

use crate::feed::{tsv_path, TsvFeed};
use crate::TSV_FORMAT;
use async_trait::async_trait;
use dict_source_core::{
    Cluster, Element, ExternalSource, Layout, Row, SourceEndpoint, SourceError, Structure,
};

/// Whether the command is run once per load or once per key request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutableMode {
    /// Full-load dictionaries; the command ignores stdin.
    Stream,
    /// Cache dictionaries; requested keys arrive on stdin and are discarded.
    OnDemand,
}

pub struct ExecutableSource {
    endpoint: SourceEndpoint,
    mode: ExecutableMode,
    feed: TsvFeed,
}

impl ExecutableSource {
    pub fn new(endpoint: SourceEndpoint, mode: ExecutableMode) -> Self {
        Self {
            endpoint,
            mode,
            feed: TsvFeed::default(),
        }
    }

    pub fn mode(&self) -> ExecutableMode {
        self.mode
    }

    pub fn command(&self, table_name: &str) -> String {
        let path = tsv_path(table_name);
        match self.mode {
            ExecutableMode::Stream => format!("cat {path}"),
            ExecutableMode::OnDemand => format!("cat - >/dev/null;cat {path}"),
        }
    }
}

#[async_trait]
impl ExternalSource for ExecutableSource {
    fn endpoint(&self) -> &SourceEndpoint {
        &self.endpoint
    }

    fn kind_name(&self) -> &'static str {
        match self.mode {
            ExecutableMode::Stream => "SourceExecutableCache",
            ExecutableMode::OnDemand => "SourceExecutableHashed",
        }
    }

    fn get_source_str(&mut self, table_name: &str) -> Result<String, SourceError> {
        let fragment = Element::new("executable")
            .with("command", self.command(table_name))
            .with("format", TSV_FORMAT);
        Ok(fragment.render())
    }

    async fn prepare(
        &mut self,
        structure: &Structure,
        table_name: &str,
        cluster: &dyn Cluster,
    ) -> Result<(), SourceError> {
        if self.feed.is_prepared() {
            return Ok(());
        }
        self.feed
            .create_file(cluster, &self.endpoint.docker_hostname, table_name)
            .await?;
        self.feed.mark_prepared(structure);
        Ok(())
    }

    async fn load_data(&mut self, rows: &[Row], table_name: &str) -> Result<(), SourceError> {
        self.feed.append(rows, table_name, &self.endpoint.name).await
    }

    fn compatible_with_layout(&self, layout: &Layout) -> bool {
        match self.mode {
            ExecutableMode::Stream => !layout.is_cache() && !layout.is_direct(),
            ExecutableMode::OnDemand => layout.is_cache(),
        }
    }

    fn is_prepared(&self) -> bool {
        self.feed.is_prepared()
    }
}
