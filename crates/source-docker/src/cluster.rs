use crate::node::DockerNode;
use dict_source_core::{Cluster, Node};
use std::collections::HashMap;
use std::sync::Arc;

/// Hostname → container map for a running test cluster.
#[derive(Debug, Default, Clone)]
pub struct DockerCluster {
    nodes: HashMap<String, Arc<DockerNode>>,
}

impl DockerCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(mut self, node: DockerNode) -> Self {
        self.add_node(node);
        self
    }

    pub fn add_node(&mut self, node: DockerNode) {
        self.nodes
            .insert(node.hostname().to_string(), Arc::new(node));
    }

    /// Register a docker compose service, whose container is named
    /// `<project>-<service>-1`.
    pub fn with_compose_service(self, project: &str, service: &str) -> Self {
        self.with_node(DockerNode::new(service, format!("{project}-{service}-1")))
    }

    pub fn hostnames(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }
}

impl Cluster for DockerCluster {
    fn instance(&self, hostname: &str) -> Option<Arc<dyn Node>> {
        self.nodes
            .get(hostname)
            .map(|node| node.clone() as Arc<dyn Node>)
    }
}
