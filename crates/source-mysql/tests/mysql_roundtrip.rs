//! Round-trip against a live MySQL server.
//!
//! Run with `MYSQL_TEST_HOST` / `MYSQL_TEST_PORT` pointing at a server that
//! accepts `root` / `MYSQL_TEST_PASSWORD`, then
//! `cargo test -p dict-source-mysql -- --ignored`.

use dict_source_core::{
    ExternalSource, Field, FieldType, Row, SourceEndpoint, StaticCluster, Structure, Value,
};
use dict_source_mysql::MySQLSource;
use mysql_async::prelude::*;

fn endpoint() -> SourceEndpoint {
    let host = std::env::var("MYSQL_TEST_HOST").unwrap_or_else(|_| "mysql".to_string());
    let port = std::env::var("MYSQL_TEST_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3306);
    let password = std::env::var("MYSQL_TEST_PASSWORD").unwrap_or_else(|_| "root".to_string());
    SourceEndpoint::new("MySQL", host.clone(), port, host, port).with_credentials("root", password)
}

#[tokio::test]
#[ignore = "requires a running MySQL server"]
async fn test_prepare_load_and_read_back() {
    let table = format!(
        "roundtrip_{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis()
    );
    let structure = Structure::new(vec![
        Field::key("id", FieldType::UInt64),
        Field::new("value", FieldType::String),
    ])
    .unwrap();
    let rows = vec![
        Row::from_pairs([("id", Value::UInt(1)), ("value", Value::from("a"))]),
        Row::from_pairs([("id", Value::UInt(2)), ("value", Value::from("b"))]),
    ];

    let mut source = MySQLSource::new(endpoint());
    source
        .prepare(&structure, &table, &StaticCluster::new())
        .await
        .unwrap();
    // Second prepare is a no-op rather than a "table exists" error.
    source
        .prepare(&structure, &table, &StaticCluster::new())
        .await
        .unwrap();
    source.load_data(&rows, &table).await.unwrap();

    let mut conn = source.pool().unwrap().get_conn().await.unwrap();
    let read: Vec<(u64, String)> = conn
        .query(format!("SELECT id, value FROM test.{table} ORDER BY id"))
        .await
        .unwrap();
    assert_eq!(read, vec![(1, "a".to_string()), (2, "b".to_string())]);

    conn.query_drop(format!("DROP TABLE test.{table}"))
        .await
        .unwrap();
}
