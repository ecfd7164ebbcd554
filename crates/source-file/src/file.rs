//! Source reading the TSV file straight from the node's filesystem.

use crate::feed::{tsv_path, TsvFeed};
use crate::TSV_FORMAT;
use async_trait::async_trait;
use dict_source_core::{
    Cluster, Element, ExternalSource, Layout, Row, SourceEndpoint, SourceError, Structure,
};

pub struct FileSource {
    endpoint: SourceEndpoint,
    feed: TsvFeed,
}

impl FileSource {
    pub fn new(endpoint: SourceEndpoint) -> Self {
        Self {
            endpoint,
            feed: TsvFeed::default(),
        }
    }
}

#[async_trait]
impl ExternalSource for FileSource {
    fn endpoint(&self) -> &SourceEndpoint {
        &self.endpoint
    }

    fn kind_name(&self) -> &'static str {
        "SourceFile"
    }

    fn get_source_str(&mut self, table_name: &str) -> Result<String, SourceError> {
        let fragment = Element::new("file")
            .with("path", tsv_path(table_name))
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
        !layout.is_cache() && !layout.is_direct()
    }

    fn is_prepared(&self) -> bool {
        self.feed.is_prepared()
    }
}
