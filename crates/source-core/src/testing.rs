//! In-memory cluster for exercising node-backed sources without docker.
//!
//! [`RecordingNode`] records every call made to it and answers queries
//! with an empty result (or a canned failure), so tests can assert on the
//! exact commands an adapter would run.

use crate::cluster::{ExecOptions, Node, StaticCluster};
use crate::error::SourceError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// One call received by a [`RecordingNode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeCall {
    Exec {
        command: Vec<String>,
        options: ExecOptions,
    },
    Copy {
        local_path: PathBuf,
        container_path: String,
    },
    Query(String),
}

#[derive(Debug, Default)]
pub struct RecordingNode {
    hostname: String,
    calls: Mutex<Vec<NodeCall>>,
    fail_matching: Option<String>,
}

impl RecordingNode {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            ..Default::default()
        }
    }

    /// Fail every exec or query whose text contains `needle`.
    pub fn failing_on(mut self, needle: impl Into<String>) -> Self {
        self.fail_matching = Some(needle.into());
        self
    }

    fn lock(&self) -> MutexGuard<'_, Vec<NodeCall>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn calls(&self) -> Vec<NodeCall> {
        self.lock().clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|call| match call {
                NodeCall::Query(sql) => Some(sql.clone()),
                _ => None,
            })
            .collect()
    }

    /// Scripts passed to `bash -c`, in call order.
    pub fn scripts(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|call| match call {
                NodeCall::Exec { command, .. } if command.len() == 3 && command[0] == "bash" => {
                    Some(command[2].clone())
                }
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn check(&self, text: &str) -> Result<(), SourceError> {
        match &self.fail_matching {
            Some(needle) if text.contains(needle.as_str()) => Err(SourceError::CommandFailed {
                command: text.to_string(),
                status: Some(1),
                stderr: "simulated failure".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl Node for RecordingNode {
    fn hostname(&self) -> &str {
        &self.hostname
    }

    async fn exec_in_container(
        &self,
        command: &[String],
        options: ExecOptions,
    ) -> Result<String, SourceError> {
        self.check(&command.join(" "))?;
        self.lock().push(NodeCall::Exec {
            command: command.to_vec(),
            options,
        });
        Ok(String::new())
    }

    async fn copy_file_to_container(
        &self,
        local_path: &Path,
        container_path: &str,
    ) -> Result<(), SourceError> {
        self.lock().push(NodeCall::Copy {
            local_path: local_path.to_path_buf(),
            container_path: container_path.to_string(),
        });
        Ok(())
    }

    async fn query(&self, sql: &str) -> Result<String, SourceError> {
        self.check(sql)?;
        self.lock().push(NodeCall::Query(sql.to_string()));
        Ok(String::new())
    }
}

/// A cluster holding a single recording node.
pub fn recording_cluster(hostname: &str) -> (StaticCluster, Arc<RecordingNode>) {
    let node = Arc::new(RecordingNode::new(hostname));
    let cluster = StaticCluster::new().with_instance(node.clone());
    (cluster, node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{bash, Cluster};

    #[tokio::test]
    async fn test_records_calls() {
        let (cluster, node) = recording_cluster("node1");
        let handle = cluster.require_instance("node1").unwrap();

        handle
            .exec_in_container(&bash("touch /t.tsv"), ExecOptions::as_root())
            .await
            .unwrap();
        handle.query("SELECT 1").await.unwrap();

        assert_eq!(node.scripts(), vec!["touch /t.tsv"]);
        assert_eq!(node.queries(), vec!["SELECT 1"]);
        assert!(matches!(
            cluster.require_instance("node2"),
            Err(SourceError::NodeNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_simulated_failure() {
        let node = RecordingNode::new("node1").failing_on("CREATE");
        let err = node.query("CREATE TABLE t (x UInt8)").await.unwrap_err();
        assert!(matches!(err, SourceError::CommandFailed { .. }));
        assert!(node.calls().is_empty());
    }
}
