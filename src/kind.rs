use clap::ValueEnum;
use dict_source_aerospike::AerospikeSource;
use dict_source_clickhouse::ClickHouseSource;
use dict_source_core::{ExternalSource, Layout, PortAllocator, SourceEndpoint};
use dict_source_file::{
    ExecutableMode, ExecutableSource, FileSource, HttpScheme, HttpServerAssets, HttpSource,
};
use dict_source_mongodb::MongoSource;
use dict_source_mysql::MySQLSource;
use dict_source_redis::{RedisSource, RedisStorageType};
use std::fmt;
use std::sync::Arc;

/// Every source variant the fixtures support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum SourceKind {
    Mysql,
    Clickhouse,
    Mongodb,
    MongodbUri,
    RedisSimple,
    RedisHashMap,
    Aerospike,
    File,
    Executable,
    ExecutableOnDemand,
    Http,
    Https,
}

impl SourceKind {
    pub const ALL: [SourceKind; 12] = [
        SourceKind::Mysql,
        SourceKind::Clickhouse,
        SourceKind::Mongodb,
        SourceKind::MongodbUri,
        SourceKind::RedisSimple,
        SourceKind::RedisHashMap,
        SourceKind::Aerospike,
        SourceKind::File,
        SourceKind::Executable,
        SourceKind::ExecutableOnDemand,
        SourceKind::Http,
        SourceKind::Https,
    ];

    /// Whether `prepare` works through a cluster node rather than a direct
    /// driver connection.
    pub fn is_node_backed(&self) -> bool {
        matches!(
            self,
            SourceKind::Clickhouse
                | SourceKind::File
                | SourceKind::Executable
                | SourceKind::ExecutableOnDemand
                | SourceKind::Http
                | SourceKind::Https
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Mysql => "mysql",
            SourceKind::Clickhouse => "clickhouse",
            SourceKind::Mongodb => "mongodb",
            SourceKind::MongodbUri => "mongodb-uri",
            SourceKind::RedisSimple => "redis-simple",
            SourceKind::RedisHashMap => "redis-hash-map",
            SourceKind::Aerospike => "aerospike",
            SourceKind::File => "file",
            SourceKind::Executable => "executable",
            SourceKind::ExecutableOnDemand => "executable-on-demand",
            SourceKind::Http => "http",
            SourceKind::Https => "https",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Construct the adapter for `kind`.
///
/// `ports` and `http_assets` are only used by the HTTP variants.
pub fn build_source(
    kind: SourceKind,
    endpoint: SourceEndpoint,
    ports: Arc<PortAllocator>,
    http_assets: HttpServerAssets,
) -> Box<dyn ExternalSource> {
    match kind {
        SourceKind::Mysql => Box::new(MySQLSource::new(endpoint)),
        SourceKind::Clickhouse => Box::new(ClickHouseSource::new(endpoint)),
        SourceKind::Mongodb => Box::new(MongoSource::new(endpoint)),
        SourceKind::MongodbUri => Box::new(MongoSource::with_uri(endpoint)),
        SourceKind::RedisSimple => Box::new(RedisSource::new(endpoint, RedisStorageType::Simple)),
        SourceKind::RedisHashMap => {
            Box::new(RedisSource::new(endpoint, RedisStorageType::HashMap))
        }
        SourceKind::Aerospike => Box::new(AerospikeSource::new(endpoint)),
        SourceKind::File => Box::new(FileSource::new(endpoint)),
        SourceKind::Executable => Box::new(ExecutableSource::new(endpoint, ExecutableMode::Stream)),
        SourceKind::ExecutableOnDemand => {
            Box::new(ExecutableSource::new(endpoint, ExecutableMode::OnDemand))
        }
        SourceKind::Http => Box::new(HttpSource::new(endpoint, HttpScheme::Http, ports, http_assets)),
        SourceKind::Https => {
            Box::new(HttpSource::new(endpoint, HttpScheme::Https, ports, http_assets))
        }
    }
}

/// Every catalog layout paired with whether `kind` can serve it.
///
/// Compatibility never depends on the endpoint, so a placeholder one is used.
pub fn layout_matrix(kind: SourceKind) -> Vec<(Layout, bool)> {
    let source = build_source(
        kind,
        SourceEndpoint::new(kind.as_str(), "localhost", 0, "localhost", 0),
        Arc::new(PortAllocator::default()),
        HttpServerAssets::new("tsv-http-server", "fake_cert.pem"),
    );
    Layout::catalog()
        .into_iter()
        .map(|layout| {
            let compatible = source.compatible_with_layout(&layout);
            (layout, compatible)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_enum_names_match_display() {
        for kind in SourceKind::ALL {
            let parsed = SourceKind::from_str(kind.as_str(), false).unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_kind_names() {
        let endpoint = SourceEndpoint::new("s", "localhost", 0, "node", 0);
        let names: Vec<&str> = SourceKind::ALL
            .iter()
            .map(|kind| {
                build_source(
                    *kind,
                    endpoint.clone(),
                    Arc::new(PortAllocator::default()),
                    HttpServerAssets::new("srv", "cert.pem"),
                )
                .kind_name()
            })
            .collect();
        assert_eq!(
            names,
            [
                "SourceMySQL",
                "SourceClickHouse",
                "SourceMongo",
                "SourceMongoURI",
                "SourceRedis",
                "SourceRedis",
                "SourceAerospike",
                "SourceFile",
                "SourceExecutableCache",
                "SourceExecutableHashed",
                "SourceHTTP",
                "SourceHTTPS",
            ]
        );
    }

    #[test]
    fn test_layout_matrix_covers_catalog() {
        let matrix = layout_matrix(SourceKind::Mysql);
        assert_eq!(matrix.len(), Layout::catalog().len());
        assert!(matrix.iter().all(|(_, compatible)| *compatible));
    }
}
