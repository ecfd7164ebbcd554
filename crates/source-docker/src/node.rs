use async_trait::async_trait;
use dict_source_core::{ExecOptions, Node, SourceError};
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Client invocation used by [`Node::query`]; the SQL is appended.
pub const DEFAULT_QUERY_COMMAND: [&str; 3] = ["clickhouse", "client", "--query"];

/// One cluster node running as a docker container.
#[derive(Debug, Clone)]
pub struct DockerNode {
    hostname: String,
    container: String,
    query_command: Vec<String>,
}

impl DockerNode {
    pub fn new(hostname: impl Into<String>, container: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            container: container.into(),
            query_command: DEFAULT_QUERY_COMMAND.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replace the client used for queries (e.g. a different binary path).
    pub fn with_query_command<I, S>(mut self, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query_command = command.into_iter().map(Into::into).collect();
        self
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub(crate) fn exec_args(&self, command: &[String], options: &ExecOptions) -> Vec<String> {
        let mut args = vec!["exec".to_string()];
        if let Some(user) = &options.user {
            args.push("-u".to_string());
            args.push(user.clone());
        }
        if options.detach {
            args.push("-d".to_string());
        }
        args.push(self.container.clone());
        args.extend(command.iter().cloned());
        args
    }

    pub(crate) fn copy_args(&self, local_path: &Path, container_path: &str) -> Vec<String> {
        vec![
            "cp".to_string(),
            local_path.display().to_string(),
            format!("{}:{}", self.container, container_path),
        ]
    }

    pub(crate) fn query_args(&self, sql: &str) -> Vec<String> {
        let mut command = self.query_command.clone();
        command.push(sql.to_string());
        self.exec_args(&command, &ExecOptions::default())
    }

    async fn docker(&self, args: Vec<String>) -> Result<String, SourceError> {
        debug!("docker {}", args.join(" "));
        let output = Command::new("docker").args(&args).output().await?;

        if !output.status.success() {
            return Err(SourceError::CommandFailed {
                command: format!("docker {}", args.join(" ")),
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl Node for DockerNode {
    fn hostname(&self) -> &str {
        &self.hostname
    }

    async fn exec_in_container(
        &self,
        command: &[String],
        options: ExecOptions,
    ) -> Result<String, SourceError> {
        self.docker(self.exec_args(command, &options)).await
    }

    async fn copy_file_to_container(
        &self,
        local_path: &Path,
        container_path: &str,
    ) -> Result<(), SourceError> {
        self.docker(self.copy_args(local_path, container_path))
            .await
            .map(|_| ())
    }

    async fn query(&self, sql: &str) -> Result<String, SourceError> {
        self.docker(self.query_args(sql)).await
    }
}
