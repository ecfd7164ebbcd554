//! Error types for the Redis source.

use dict_source_core::SourceError;
use thiserror::Error;

/// Errors that can occur while loading Redis.
#[derive(Error, Debug)]
pub enum RedisSourceError {
    /// Redis connection or command error.
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Row serialization error.
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl From<RedisSourceError> for SourceError {
    fn from(e: RedisSourceError) -> Self {
        match e {
            RedisSourceError::Source(inner) => inner,
            RedisSourceError::Redis(driver) => SourceError::backend(driver),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_error_stays_downcastable() {
        let driver = redis::RedisError::from((redis::ErrorKind::IoError, "refused"));
        let expected = driver.to_string();
        let err = SourceError::from(RedisSourceError::from(driver));
        assert_eq!(err.to_string(), expected);
        match err {
            SourceError::Backend(inner) => {
                let driver = inner.downcast_ref::<redis::RedisError>().unwrap();
                assert_eq!(driver.kind(), redis::ErrorKind::IoError);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
