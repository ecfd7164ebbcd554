//! [`Cluster`](dict_source_core::Cluster) backed by running docker containers.
//!
//! Each node maps a cluster hostname to a container name. Commands go
//! through `docker exec`, file copies through `docker cp`, and queries
//! through the ClickHouse client inside the container.

mod cluster;
mod node;

pub use cluster::DockerCluster;
pub use node::{DockerNode, DEFAULT_QUERY_COMMAND};
