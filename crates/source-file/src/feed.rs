//! Shared TSV file handling for the file-fed sources.

use dict_source_core::format::{append_lines_script, tsv_line};
use dict_source_core::{
    bash, Cluster, ExecOptions, Node, PreparedState, Row, SourceError, Structure,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Path of the data file for `table_name` inside the node.
pub fn tsv_path(table_name: &str) -> String {
    format!("/{table_name}.tsv")
}

/// Node handle plus prepared state for a TSV-fed source.
#[derive(Default)]
pub struct TsvFeed {
    node: Option<Arc<dyn Node>>,
    state: PreparedState,
}

impl TsvFeed {
    pub fn is_prepared(&self) -> bool {
        self.state.is_prepared()
    }

    pub fn node(&self) -> Option<&Arc<dyn Node>> {
        self.node.as_ref()
    }

    /// Look up the node and create an empty data file in it.
    pub async fn create_file(
        &mut self,
        cluster: &dyn Cluster,
        hostname: &str,
        table_name: &str,
    ) -> Result<Arc<dyn Node>, SourceError> {
        let node = cluster.require_instance(hostname)?;
        let path = tsv_path(table_name);
        info!("Creating {} on {}", path, hostname);
        node.exec_in_container(&bash(format!("touch {path}")), ExecOptions::as_root())
            .await?;
        self.node = Some(node.clone());
        Ok(node)
    }

    pub fn mark_prepared(&mut self, structure: &Structure) {
        self.state.mark_prepared(structure);
    }

    /// Append one TSV line per row to the data file.
    pub async fn append(
        &self,
        rows: &[Row],
        table_name: &str,
        source_name: &str,
    ) -> Result<(), SourceError> {
        if rows.is_empty() {
            return Ok(());
        }
        let names = self.state.ordered_names(source_name)?;
        let node = self
            .node
            .as_ref()
            .ok_or_else(|| SourceError::NotPrepared(source_name.to_string()))?;

        let lines = rows
            .iter()
            .map(|row| tsv_line(row, names))
            .collect::<Result<Vec<_>, _>>()?;

        let path = tsv_path(table_name);
        debug!("Appending {} lines to {}", lines.len(), path);
        node.exec_in_container(
            &bash(append_lines_script(&path, &lines)),
            ExecOptions::as_root(),
        )
        .await?;
        Ok(())
    }
}
