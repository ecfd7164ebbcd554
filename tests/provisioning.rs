//! Node-backed sources driven end to end against a recording cluster.

use dict_source_core::testing::{recording_cluster, NodeCall, RecordingNode};
use dict_source_core::{
    ExecOptions, ExternalSource, Field, FieldType, PortAllocator, Row, SourceEndpoint,
    SourceError, StaticCluster, Structure, Value,
};
use dict_source_file::HttpServerAssets;
use dict_sources::{build_source, SourceKind};
use std::sync::Arc;

fn endpoint() -> SourceEndpoint {
    SourceEndpoint::new("fixture", "localhost", 9000, "clickhouse1", 9000)
        .with_credentials("default", "")
}

fn assets() -> HttpServerAssets {
    HttpServerAssets::new("/build/tsv-http-server", "/certs/fake_cert.pem")
}

/// Declared out of order on purpose: loads must follow keys, range, ordinary.
fn structure() -> Structure {
    Structure::new(vec![
        Field::new("value", FieldType::String),
        Field::range("start", FieldType::Date),
        Field::key("id", FieldType::UInt64),
    ])
    .unwrap()
}

fn rows() -> Vec<Row> {
    vec![
        Row::new(
            structure().all_fields(),
            vec![Value::UInt(1), Value::from("2019-01-01"), Value::from("a")],
        ),
        Row::from_pairs([
            ("value", Value::from("b")),
            ("id", Value::UInt(2)),
            ("start", Value::from("2019-02-01")),
        ]),
    ]
}

#[test]
fn test_ordered_names_are_stable() {
    let structure = structure();
    assert_eq!(structure.ordered_names(), ["id", "start", "value"]);
    assert_eq!(structure.ordered_names(), structure.ordered_names());
}

#[tokio::test]
async fn test_file_source_appends_in_field_order() {
    let (cluster, node) = recording_cluster("clickhouse1");
    let mut source = build_source(
        SourceKind::File,
        endpoint(),
        Arc::new(PortAllocator::default()),
        assets(),
    );

    source.prepare(&structure(), "ranges", &cluster).await.unwrap();
    source.load_data(&rows(), "ranges").await.unwrap();

    assert_eq!(
        node.scripts(),
        [
            "touch /ranges.tsv",
            "printf '%s\\n' '1\t2019-01-01\ta' '2\t2019-02-01\tb' >> '/ranges.tsv'",
        ]
    );
}

#[tokio::test]
async fn test_clickhouse_source_uses_same_order_for_ddl_and_insert() {
    let (cluster, node) = recording_cluster("clickhouse1");
    let mut source = build_source(
        SourceKind::Clickhouse,
        endpoint(),
        Arc::new(PortAllocator::default()),
        assets(),
    );

    source.prepare(&structure(), "ranges", &cluster).await.unwrap();
    source.load_data(&rows(), "ranges").await.unwrap();

    let queries = node.queries();
    assert_eq!(
        queries[1],
        "CREATE TABLE test.ranges (id UInt64, start Date, value String) ENGINE MergeTree ORDER BY tuple()"
    );
    assert_eq!(
        queries[2],
        "INSERT INTO test.ranges (id,start,value) VALUES (1,'2019-01-01','a'),(2,'2019-02-01','b')"
    );
}

#[tokio::test]
async fn test_http_sources_share_port_counter() {
    let (cluster, node) = recording_cluster("clickhouse1");
    let ports = Arc::new(PortAllocator::new(8000));
    let mut http = build_source(SourceKind::Http, endpoint(), ports.clone(), assets());
    let mut https = build_source(SourceKind::Https, endpoint(), ports.clone(), assets());

    assert!(http
        .get_source_str("t")
        .unwrap()
        .contains("<url>http://clickhouse1:8000/</url>"));
    assert!(https
        .get_source_str("t")
        .unwrap()
        .contains("<url>https://clickhouse1:8001/</url>"));

    https.prepare(&structure(), "t", &cluster).await.unwrap();
    let last = node.calls().pop().unwrap();
    assert_eq!(
        last,
        NodeCall::Exec {
            command: vec![
                "bash".to_string(),
                "-c".to_string(),
                "/tsv-http-server --data-path=/t.tsv --scheme=https --host=clickhouse1 --port=8001 --cert-path=/fake_cert.pem".to_string(),
            ],
            options: ExecOptions::detached(),
        }
    );
}

#[tokio::test]
async fn test_load_before_prepare_fails() {
    for kind in [SourceKind::File, SourceKind::Executable, SourceKind::Clickhouse] {
        let mut source = build_source(
            kind,
            endpoint(),
            Arc::new(PortAllocator::default()),
            assets(),
        );
        let err = source.load_data(&rows(), "t").await.unwrap_err();
        assert!(matches!(err, SourceError::NotPrepared(_)), "{kind}");
    }
}

#[tokio::test]
async fn test_empty_load_touches_nothing() {
    let (cluster, node) = recording_cluster("clickhouse1");
    for kind in [
        SourceKind::Clickhouse,
        SourceKind::File,
        SourceKind::ExecutableOnDemand,
        SourceKind::Http,
    ] {
        let mut source = build_source(
            kind,
            endpoint(),
            Arc::new(PortAllocator::default()),
            assets(),
        );
        source.prepare(&structure(), "t", &cluster).await.unwrap();
        node.clear();
        source.load_data(&[], "t").await.unwrap();
        assert!(node.calls().is_empty(), "{kind}");
    }
}

#[tokio::test]
async fn test_failed_command_propagates() {
    let node = Arc::new(RecordingNode::new("clickhouse1").failing_on("touch"));
    let cluster = StaticCluster::new().with_instance(node);
    let mut source = build_source(
        SourceKind::File,
        endpoint(),
        Arc::new(PortAllocator::default()),
        assets(),
    );
    let err = source.prepare(&structure(), "t", &cluster).await.unwrap_err();
    assert!(matches!(err, SourceError::CommandFailed { status: Some(1), .. }));
    assert!(!source.is_prepared());
}
