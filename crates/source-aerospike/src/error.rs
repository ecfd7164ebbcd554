//! Error types for the Aerospike source.

use dict_source_core::SourceError;
use thiserror::Error;

/// Errors that can occur while loading Aerospike.
#[derive(Error, Debug)]
pub enum AerospikeSourceError {
    /// Client error. The driver error is not `Sync`, so only its message is
    /// kept.
    #[error("Aerospike error: {0}")]
    Aerospike(String),

    /// Value the server cannot store, such as a `u64` above `i64::MAX`.
    #[error("Value {0} cannot be stored in Aerospike")]
    UnsupportedValue(String),

    /// Blocking task panicked or was cancelled.
    #[error("Aerospike task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Source(#[from] SourceError),
}

impl From<aerospike::Error> for AerospikeSourceError {
    fn from(e: aerospike::Error) -> Self {
        AerospikeSourceError::Aerospike(e.to_string())
    }
}

impl From<AerospikeSourceError> for SourceError {
    fn from(e: AerospikeSourceError) -> Self {
        match e {
            AerospikeSourceError::Source(inner) => inner,
            other => SourceError::backend(other),
        }
    }
}
