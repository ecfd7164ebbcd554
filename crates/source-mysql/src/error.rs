//! Error types for the MySQL source.

use dict_source_core::SourceError;
use thiserror::Error;

/// Errors that can occur while provisioning or loading MySQL.
#[derive(Error, Debug)]
pub enum MySQLSourceError {
    /// MySQL connection or query error.
    #[error("MySQL error: {0}")]
    MySQL(#[from] mysql_async::Error),

    /// Row serialization error.
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl From<MySQLSourceError> for SourceError {
    fn from(e: MySQLSourceError) -> Self {
        match e {
            MySQLSourceError::Source(inner) => inner,
            MySQLSourceError::MySQL(driver) => SourceError::backend(driver),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_error_stays_downcastable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let driver = mysql_async::Error::from(io);
        let expected = driver.to_string();
        let err = SourceError::from(MySQLSourceError::from(driver));
        assert_eq!(err.to_string(), expected);
        match err {
            SourceError::Backend(inner) => {
                assert!(matches!(
                    inner.downcast_ref::<mysql_async::Error>(),
                    Some(mysql_async::Error::Io(_))
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
