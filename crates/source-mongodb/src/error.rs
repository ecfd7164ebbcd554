//! Error types for the MongoDB source.

use dict_source_core::SourceError;
use thiserror::Error;

/// Errors that can occur while provisioning or loading MongoDB.
#[derive(Error, Debug)]
pub enum MongoSourceError {
    /// MongoDB driver error.
    #[error("MongoDB error: {0}")]
    MongoDB(#[from] mongodb::error::Error),

    /// A Date / DateTime cell did not parse.
    #[error("Invalid {expected} value '{value}': {source}")]
    InvalidTemporal {
        expected: &'static str,
        value: String,
        source: chrono::ParseError,
    },

    /// A Date / DateTime cell was not a string.
    #[error("Expected a string for {expected}, got {value}")]
    NotAString { expected: &'static str, value: String },

    /// A local datetime falls into a timezone gap.
    #[error("Local time '{0}' does not exist in the current timezone")]
    NonexistentLocalTime(String),

    /// BSON has no unsigned 64-bit integer.
    #[error("Unsigned value {0} does not fit into Int64")]
    UnsignedOutOfRange(u64),

    /// Row serialization error.
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl From<MongoSourceError> for SourceError {
    fn from(e: MongoSourceError) -> Self {
        match e {
            MongoSourceError::Source(inner) => inner,
            MongoSourceError::MongoDB(driver) => SourceError::backend(driver),
            other => SourceError::backend(other),
        }
    }
}
