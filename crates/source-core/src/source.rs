//! The source adapter capability trait.

use crate::cluster::Cluster;
use crate::error::SourceError;
use crate::layout::Layout;
use crate::structure::Structure;
use crate::values::Row;
use async_trait::async_trait;

/// Where a backend lives.
///
/// `internal_*` is how the test process reaches the backend, `docker_*` is
/// how the system under test reaches it from inside the cluster network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEndpoint {
    pub name: String,
    pub internal_hostname: String,
    pub internal_port: u16,
    pub docker_hostname: String,
    pub docker_port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl SourceEndpoint {
    pub fn new(
        name: impl Into<String>,
        internal_hostname: impl Into<String>,
        internal_port: u16,
        docker_hostname: impl Into<String>,
        docker_port: u16,
    ) -> Self {
        Self {
            name: name.into(),
            internal_hostname: internal_hostname.into(),
            internal_port,
            docker_hostname: docker_hostname.into(),
            docker_port,
            user: None,
            password: None,
        }
    }

    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    /// User name, empty when unset.
    pub fn user(&self) -> &str {
        self.user.as_deref().unwrap_or_default()
    }

    /// Password, empty when unset.
    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or_default()
    }
}

/// Bookkeeping recorded by `prepare` and consumed by `load_data`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreparedState {
    prepared: bool,
    ordered_names: Vec<String>,
}

impl PreparedState {
    pub fn mark_prepared(&mut self, structure: &Structure) {
        self.ordered_names = structure.ordered_names();
        self.prepared = true;
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Field order cached at prepare time.
    pub fn ordered_names(&self, source_name: &str) -> Result<&[String], SourceError> {
        if !self.prepared {
            return Err(SourceError::NotPrepared(source_name.to_string()));
        }
        Ok(&self.ordered_names)
    }
}

/// A test-fixture adapter for one external data source.
///
/// The operations without a meaningful default fail with
/// [`SourceError::NotImplemented`], naming the adapter.
#[async_trait]
pub trait ExternalSource: Send + Sync {
    /// Connection details of the backend.
    fn endpoint(&self) -> &SourceEndpoint;

    /// Adapter type name used in error messages and logs.
    fn kind_name(&self) -> &'static str;

    /// Configuration fragment describing how to reach `table_name`.
    fn get_source_str(&mut self, _table_name: &str) -> Result<String, SourceError> {
        Err(SourceError::not_implemented(
            "get_source_str",
            self.kind_name(),
        ))
    }

    /// Create the table / collection / file / listener described by
    /// `structure`. Calling it again on a prepared adapter does nothing.
    async fn prepare(
        &mut self,
        _structure: &Structure,
        _table_name: &str,
        _cluster: &dyn Cluster,
    ) -> Result<(), SourceError> {
        Err(SourceError::not_implemented("prepare", self.kind_name()))
    }

    /// Write `rows` using the field order cached by `prepare`. An empty batch
    /// leaves the backend untouched.
    async fn load_data(&mut self, _rows: &[Row], _table_name: &str) -> Result<(), SourceError> {
        Err(SourceError::not_implemented("load_data", self.kind_name()))
    }

    /// Whether this adapter can back a dictionary with `layout`.
    fn compatible_with_layout(&self, _layout: &Layout) -> bool {
        true
    }

    fn is_prepared(&self) -> bool;
}
