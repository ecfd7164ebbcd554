//! ClickHouse dictionary source.
//!
//! The table lives on a ClickHouse node of the test cluster; all statements
//! go through [`Node::query`](dict_source_core::Node::query).

mod ddl;
mod source;

pub use ddl::ClickHouseDdl;
pub use source::ClickHouseSource;
