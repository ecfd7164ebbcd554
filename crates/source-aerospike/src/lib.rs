//! Aerospike dictionary source.
//!
//! Rows are two-column key/value pairs stored as one record per key in
//! [`NAMESPACE`]/[`SET_NAME`], with the value in the [`BIN_NAME`] bin. The
//! client is blocking, so every call runs on the tokio blocking pool.

mod error;
mod source;

pub use error::AerospikeSourceError;
pub use source::{AerospikeSource, RecordWrite, BIN_NAME, NAMESPACE, SET_NAME};
