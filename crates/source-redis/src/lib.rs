//! Redis dictionary source.
//!
//! Rows are written either as plain values (`SET key value`) or as hash
//! fields (`HSET key field value`), see [`KeyValueWrite`]. Which dictionary
//! layouts can read them depends on the configured [`RedisStorageType`].

mod error;
mod source;
mod write;

pub use error::RedisSourceError;
pub use source::{RedisSource, RedisStorageType};
pub use write::KeyValueWrite;
