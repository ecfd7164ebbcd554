//! Test-cluster collaborator.
//!
//! Adapters that live inside a cluster node (file, executable, HTTP,
//! ClickHouse) look the node up by its docker hostname and drive it through
//! the [`Node`] trait. Container lifecycle is owned by whoever implements
//! [`Cluster`].

use crate::error::SourceError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Options for [`Node::exec_in_container`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOptions {
    /// Run as this user inside the container.
    pub user: Option<String>,
    /// Start the command and return without waiting for it.
    pub detach: bool,
}

impl ExecOptions {
    pub fn as_root() -> Self {
        Self {
            user: Some("root".to_string()),
            detach: false,
        }
    }

    pub fn detached() -> Self {
        Self {
            user: None,
            detach: true,
        }
    }
}

/// Handle to one node (container) of the test cluster.
#[async_trait]
pub trait Node: Send + Sync {
    /// Hostname of the node inside the cluster network.
    fn hostname(&self) -> &str;

    /// Execute a command inside the container and return its stdout.
    async fn exec_in_container(
        &self,
        command: &[String],
        options: ExecOptions,
    ) -> Result<String, SourceError>;

    /// Copy a local file into the container.
    async fn copy_file_to_container(
        &self,
        local_path: &Path,
        container_path: &str,
    ) -> Result<(), SourceError>;

    /// Run a query against the database server running in the node.
    async fn query(&self, sql: &str) -> Result<String, SourceError>;
}

/// The test cluster: nodes addressable by hostname.
pub trait Cluster: Send + Sync {
    fn instance(&self, hostname: &str) -> Option<Arc<dyn Node>>;

    /// Like [`Cluster::instance`] but failing with `NodeNotFound`.
    fn require_instance(&self, hostname: &str) -> Result<Arc<dyn Node>, SourceError> {
        self.instance(hostname)
            .ok_or_else(|| SourceError::NodeNotFound(hostname.to_string()))
    }
}

/// Cluster backed by a fixed hostname → node map.
#[derive(Default, Clone)]
pub struct StaticCluster {
    instances: HashMap<String, Arc<dyn Node>>,
}

impl StaticCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instance(mut self, node: Arc<dyn Node>) -> Self {
        self.add_instance(node);
        self
    }

    pub fn add_instance(&mut self, node: Arc<dyn Node>) {
        self.instances.insert(node.hostname().to_string(), node);
    }
}

impl Cluster for StaticCluster {
    fn instance(&self, hostname: &str) -> Option<Arc<dyn Node>> {
        self.instances.get(hostname).cloned()
    }
}

/// `bash -c <script>` as an argv.
pub fn bash(script: impl Into<String>) -> Vec<String> {
    vec!["bash".to_string(), "-c".to_string(), script.into()]
}
