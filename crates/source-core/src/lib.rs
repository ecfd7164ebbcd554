//! Core types for dictionary source fixtures.
//!
//! This crate provides the pieces every source adapter shares:
//!
//! - [`Structure`] / [`Field`] / [`FieldType`] - schema descriptor of a test table
//! - [`Row`] / [`Value`] - records to load
//! - [`Layout`] - dictionary layouts used for compatibility filtering
//! - [`ExternalSource`] - the adapter trait (`get_source_str`, `prepare`,
//!   `load_data`, `compatible_with_layout`)
//! - [`Cluster`] / [`Node`] - the test-cluster collaborator
//! - [`PortAllocator`] - injected port counter for listener-backed sources
//!
//! # Architecture
//!
//! ```text
//! dict-source-core (this crate)
//!    │
//!    ├─── dict-source-mysql       (relational, mysql_async)
//!    ├─── dict-source-clickhouse  (relational, via Node::query)
//!    ├─── dict-source-mongodb     (document store)
//!    ├─── dict-source-redis       (key-value store)
//!    ├─── dict-source-aerospike   (key-value store, blocking client)
//!    ├─── dict-source-file        (file, executable, HTTP)
//!    └─── dict-source-docker      (Cluster implementation over the docker CLI)
//! ```

pub mod cluster;
pub mod ddl;
pub mod error;
pub mod format;
pub mod fragment;
pub mod layout;
pub mod ports;
pub mod source;
pub mod structure;
pub mod testing;
pub mod types;
pub mod values;

pub use cluster::{bash, Cluster, ExecOptions, Node, StaticCluster};
pub use ddl::ToDdl;
pub use error::{BackendError, SourceError};
pub use fragment::Element;
pub use layout::{Layout, LayoutKind, LAYOUT_NAMES};
pub use ports::{PortAllocator, DEFAULT_START_PORT};
pub use source::{ExternalSource, PreparedState, SourceEndpoint};
pub use structure::{Field, FieldRole, Structure, StructureError};
pub use types::FieldType;
pub use values::{Row, Value};

/// Database every relational and document source provisions into.
pub const TEST_DATABASE: &str = "test";
