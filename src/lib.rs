//! dict-sources
//!
//! Test fixtures for dictionary integration tests. Each external source
//! adapter renders the configuration fragment a dictionary uses to reach
//! its backend, provisions the backend with a table, and loads rows.
//!
//! # Backend Crates
//!
//! - `dict_source_mysql` - MySQL via `mysql_async`
//! - `dict_source_clickhouse` - ClickHouse through the node's query client
//! - `dict_source_mongodb` - MongoDB, discrete-parameter and URI forms
//! - `dict_source_redis` - Redis, `simple` and `hash_map` storage
//! - `dict_source_aerospike` - Aerospike, key/value records in one set
//! - `dict_source_file` - file, executable and HTTP(S) sources fed from TSV
//!
//! # CLI Usage
//!
//! ```bash
//! # Which layouts can a Redis hash_map source serve?
//! dict-sources layouts --source redis-hash-map
//!
//! # Print the fragment for a MySQL source
//! dict-sources config --source mysql --table users \
//!   --docker-host mysql1 --docker-port 3306 --user root --password clickhouse
//!
//! # Create and fill a file source inside a running compose cluster
//! dict-sources provision --source file --table users \
//!   --structure users.yaml --rows users.jsonl \
//!   --docker-host clickhouse1 --compose-project dict
//! ```

pub mod args;
mod kind;
pub mod rows;

pub use kind::{build_source, layout_matrix, SourceKind};

pub use dict_source_aerospike as aerospike;
pub use dict_source_clickhouse as clickhouse;
pub use dict_source_core as source_core;
pub use dict_source_docker as docker;
pub use dict_source_file as file;
pub use dict_source_mongodb as mongodb;
pub use dict_source_mysql as mysql;
pub use dict_source_redis as redis;
