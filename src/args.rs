//! CLI argument groups shared by the subcommands.

use clap::Args;
use dict_source_core::{PortAllocator, SourceEndpoint, DEFAULT_START_PORT};
use dict_source_docker::{DockerCluster, DockerNode};
use dict_source_file::HttpServerAssets;
use std::path::PathBuf;

/// Where the backend lives.
#[derive(Args, Clone, Debug)]
pub struct EndpointArgs {
    /// Name used in logs and error messages
    #[arg(long, env = "DICT_SOURCE_NAME", default_value = "source")]
    pub name: String,

    /// Host the test process connects to
    #[arg(long, env = "DICT_SOURCE_INTERNAL_HOST", default_value = "localhost")]
    pub internal_host: String,

    #[arg(long, env = "DICT_SOURCE_INTERNAL_PORT", default_value_t = 0)]
    pub internal_port: u16,

    /// Host the system under test connects to (also the cluster node name)
    #[arg(long, env = "DICT_SOURCE_DOCKER_HOST", default_value = "localhost")]
    pub docker_host: String,

    #[arg(long, env = "DICT_SOURCE_DOCKER_PORT", default_value_t = 0)]
    pub docker_port: u16,

    #[arg(long, env = "DICT_SOURCE_USER")]
    pub user: Option<String>,

    #[arg(long, env = "DICT_SOURCE_PASSWORD")]
    pub password: Option<String>,
}

impl EndpointArgs {
    pub fn to_endpoint(&self) -> SourceEndpoint {
        let mut endpoint = SourceEndpoint::new(
            self.name.clone(),
            self.internal_host.clone(),
            self.internal_port,
            self.docker_host.clone(),
            self.docker_port,
        );
        endpoint.user = self.user.clone();
        endpoint.password = self.password.clone();
        endpoint
    }
}

/// Files and ports for the HTTP sources.
#[derive(Args, Clone, Debug)]
pub struct HttpArgs {
    /// Linux build of tsv-http-server to copy into the node
    #[arg(
        long,
        env = "DICT_SOURCE_HTTP_SERVER",
        default_value = "target/release/tsv-http-server"
    )]
    pub http_server: PathBuf,

    /// PEM with certificate and key for HTTPS
    #[arg(long, env = "DICT_SOURCE_HTTP_CERT", default_value = "fake_cert.pem")]
    pub http_cert: PathBuf,

    /// First port handed to HTTP sources
    #[arg(long, default_value_t = DEFAULT_START_PORT)]
    pub first_port: u16,
}

impl HttpArgs {
    pub fn assets(&self) -> HttpServerAssets {
        HttpServerAssets::new(self.http_server.clone(), self.http_cert.clone())
    }

    pub fn ports(&self) -> PortAllocator {
        PortAllocator::new(self.first_port)
    }
}

/// How cluster node hostnames map to docker containers.
#[derive(Args, Clone, Debug, Default)]
pub struct DockerArgs {
    /// Explicit container name for the node
    #[arg(long, env = "DICT_SOURCE_CONTAINER")]
    pub container: Option<String>,

    /// docker compose project; the container is `<project>-<host>-1`
    #[arg(long, env = "COMPOSE_PROJECT_NAME")]
    pub compose_project: Option<String>,
}

impl DockerArgs {
    /// Cluster holding the single node `hostname`.
    pub fn cluster(&self, hostname: &str) -> DockerCluster {
        let container = match (&self.container, &self.compose_project) {
            (Some(container), _) => container.clone(),
            (None, Some(project)) => format!("{project}-{hostname}-1"),
            (None, None) => hostname.to_string(),
        };
        DockerCluster::new().with_node(DockerNode::new(hostname, container))
    }
}
