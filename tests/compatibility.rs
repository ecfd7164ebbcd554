//! Layout compatibility across every source kind.

use dict_source_core::Layout;
use dict_sources::{layout_matrix, SourceKind};

fn compatible(kind: SourceKind) -> Vec<String> {
    layout_matrix(kind)
        .into_iter()
        .filter(|(_, ok)| *ok)
        .map(|(layout, _)| layout.name)
        .collect()
}

#[test]
fn test_sources_without_restrictions_accept_everything() {
    for kind in [
        SourceKind::Mysql,
        SourceKind::Clickhouse,
        SourceKind::Mongodb,
        SourceKind::Http,
        SourceKind::Https,
    ] {
        assert_eq!(compatible(kind).len(), Layout::catalog().len(), "{kind}");
    }
}

#[test]
fn test_mongodb_uri_only_flat() {
    assert_eq!(compatible(SourceKind::MongodbUri), ["flat"]);
}

#[test]
fn test_redis_storage_modes() {
    assert_eq!(
        compatible(SourceKind::RedisSimple),
        ["flat", "hashed", "cache", "complex_key_hashed_one_key", "direct"]
    );
    assert_eq!(
        compatible(SourceKind::RedisHashMap),
        ["complex_key_hashed_two_keys"]
    );
}

#[test]
fn test_aerospike_only_simple_layouts() {
    assert_eq!(
        compatible(SourceKind::Aerospike),
        ["flat", "hashed", "cache", "direct"]
    );
}

#[test]
fn test_file_fed_sources_never_serve_cache_or_direct() {
    for kind in [SourceKind::File, SourceKind::Executable] {
        for name in compatible(kind) {
            assert!(
                !name.contains("cache") && !name.contains("direct"),
                "{kind} accepted {name}"
            );
        }
        assert!(compatible(kind).contains(&"range_hashed".to_string()));
    }
}

#[test]
fn test_on_demand_executable_only_cache() {
    assert_eq!(
        compatible(SourceKind::ExecutableOnDemand),
        ["cache", "complex_key_cache"]
    );
}
