//! Error type shared by every source adapter.

use crate::structure::StructureError;
use thiserror::Error;

/// Boxed driver error, kept intact so callers can downcast it.
pub type BackendError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while configuring, provisioning or loading a source.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The adapter does not provide this operation.
    #[error("Method {method} is not implemented for {source_kind}")]
    NotImplemented {
        method: &'static str,
        source_kind: String,
    },

    /// `load_data` was called before `prepare`.
    #[error("Source '{0}' has not been prepared")]
    NotPrepared(String),

    /// The cluster has no node with this hostname.
    #[error("Cluster has no instance named '{0}'")]
    NodeNotFound(String),

    /// A shell command (inside or outside a container) exited unsuccessfully.
    #[error("Command `{command}` failed with status {status:?}: {stderr}")]
    CommandFailed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    /// A row lacks a field declared in the structure.
    #[error("Row is missing field '{0}'")]
    MissingField(String),

    /// Key-value rows must have exactly two or three fields.
    #[error("Unsupported row width {0} for key-value source (expected 2 or 3)")]
    UnsupportedRowWidth(usize),

    /// Every port up to 65535 has been handed out.
    #[error("No ports left to allocate")]
    PortsExhausted,

    /// Structure error.
    #[error("Structure error: {0}")]
    Structure(#[from] StructureError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error raised by a backend driver.
    #[error("{0}")]
    Backend(#[source] BackendError),
}

impl SourceError {
    pub fn not_implemented(method: &'static str, source_kind: impl Into<String>) -> Self {
        SourceError::NotImplemented {
            method,
            source_kind: source_kind.into(),
        }
    }

    /// Wrap a driver error without altering it.
    pub fn backend(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        SourceError::Backend(Box::new(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_is_downcastable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = SourceError::backend(io);
        match err {
            SourceError::Backend(inner) => {
                let io = inner.downcast_ref::<std::io::Error>().unwrap();
                assert_eq!(io.kind(), std::io::ErrorKind::ConnectionRefused);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_not_implemented_message() {
        let err = SourceError::not_implemented("load_data", "SourceAerospike");
        assert_eq!(
            err.to_string(),
            "Method load_data is not implemented for SourceAerospike"
        );
    }
}
