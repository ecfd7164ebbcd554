//! MySQL dictionary source.
//!
//! Provisions `test.<table>` on a MySQL server and loads rows with a single
//! literal multi-row INSERT.
//!
//! # Example
//!
//! ```ignore
//! use dict_source_core::{ExternalSource, SourceEndpoint};
//! use dict_source_mysql::MySQLSource;
//!
//! let endpoint = SourceEndpoint::new("MySQL", "localhost", 3308, "mysql1", 3306)
//!     .with_credentials("root", "clickhouse");
//! let mut source = MySQLSource::new(endpoint);
//! let fragment = source.get_source_str("users")?;
//! source.prepare(&structure, "users", &cluster).await?;
//! source.load_data(&rows, "users").await?;
//! ```

pub mod ddl;
mod error;
mod source;

pub use ddl::MySQLDdl;
pub use error::MySQLSourceError;
pub use source::{MySQLSource, FAILOVER_PORT};
