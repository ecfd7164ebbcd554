//! Source served over HTTP(S) by a `tsv-http-server` inside the node.

use crate::feed::{tsv_path, TsvFeed};
use crate::TSV_FORMAT;
use async_trait::async_trait;
use dict_source_core::{
    bash, Cluster, Element, ExecOptions, ExternalSource, PortAllocator, Row, SourceEndpoint,
    SourceError, Structure,
};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub const CONTAINER_SERVER_PATH: &str = "/tsv-http-server";
pub const CONTAINER_CERT_PATH: &str = "/fake_cert.pem";

/// Header the system under test is told to send with every request.
pub const API_KEY_HEADER: (&str, &str) = ("api-key", "secret");

const HTTP_USER: &str = "foo";
const HTTP_PASSWORD: &str = "bar";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpScheme {
    Http,
    Https,
}

impl HttpScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpScheme::Http => "http",
            HttpScheme::Https => "https",
        }
    }
}

impl fmt::Display for HttpScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host-side files copied into the node before the server starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServerAssets {
    /// Linux build of `tsv-http-server`.
    pub server_binary: PathBuf,
    /// PEM holding both certificate and private key.
    pub certificate: PathBuf,
}

impl HttpServerAssets {
    pub fn new(server_binary: impl Into<PathBuf>, certificate: impl Into<PathBuf>) -> Self {
        Self {
            server_binary: server_binary.into(),
            certificate: certificate.into(),
        }
    }
}

pub struct HttpSource {
    endpoint: SourceEndpoint,
    scheme: HttpScheme,
    ports: Arc<PortAllocator>,
    assets: HttpServerAssets,
    http_port: Option<u16>,
    feed: TsvFeed,
}

impl HttpSource {
    pub fn new(
        endpoint: SourceEndpoint,
        scheme: HttpScheme,
        ports: Arc<PortAllocator>,
        assets: HttpServerAssets,
    ) -> Self {
        Self {
            endpoint,
            scheme,
            ports,
            assets,
            http_port: None,
            feed: TsvFeed::default(),
        }
    }

    pub fn scheme(&self) -> HttpScheme {
        self.scheme
    }

    /// Port of the most recent fragment, if one was rendered.
    pub fn http_port(&self) -> Option<u16> {
        self.http_port
    }

    fn url(&self, port: u16) -> String {
        format!("{}://{}:{}/", self.scheme, self.endpoint.docker_hostname, port)
    }

    fn server_command(&self, table_name: &str, port: u16) -> String {
        format!(
            "{CONTAINER_SERVER_PATH} --data-path={} --scheme={} --host={} --port={} --cert-path={CONTAINER_CERT_PATH}",
            tsv_path(table_name),
            self.scheme,
            self.endpoint.docker_hostname,
            port
        )
    }
}

#[async_trait]
impl ExternalSource for HttpSource {
    fn endpoint(&self) -> &SourceEndpoint {
        &self.endpoint
    }

    fn kind_name(&self) -> &'static str {
        match self.scheme {
            HttpScheme::Http => "SourceHTTP",
            HttpScheme::Https => "SourceHTTPS",
        }
    }

    /// Allocates a fresh port on every call.
    fn get_source_str(&mut self, _table_name: &str) -> Result<String, SourceError> {
        let port = self.ports.allocate()?;
        self.http_port = Some(port);

        let (header_name, header_value) = API_KEY_HEADER;
        let fragment = Element::new("http")
            .with("url", self.url(port))
            .with("format", TSV_FORMAT)
            .child(
                Element::new("credentials")
                    .with("user", HTTP_USER)
                    .with("password", HTTP_PASSWORD),
            )
            .child(
                Element::new("headers").child(
                    Element::new("header")
                        .with("name", header_name)
                        .with("value", header_value),
                ),
            );
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
        let port = match self.http_port {
            Some(port) => port,
            None => {
                let port = self.ports.allocate()?;
                self.http_port = Some(port);
                port
            }
        };

        let node = self
            .feed
            .create_file(cluster, &self.endpoint.docker_hostname, table_name)
            .await?;
        node.copy_file_to_container(&self.assets.server_binary, CONTAINER_SERVER_PATH)
            .await?;
        node.copy_file_to_container(&self.assets.certificate, CONTAINER_CERT_PATH)
            .await?;

        info!(
            "Starting {} server on {}:{}",
            self.scheme, self.endpoint.docker_hostname, port
        );
        node.exec_in_container(
            &bash(self.server_command(table_name, port)),
            ExecOptions::detached(),
        )
        .await?;

        self.feed.mark_prepared(structure);
        Ok(())
    }

    async fn load_data(&mut self, rows: &[Row], table_name: &str) -> Result<(), SourceError> {
        self.feed.append(rows, table_name, &self.endpoint.name).await
    }

    fn is_prepared(&self) -> bool {
        self.feed.is_prepared()
    }
}
