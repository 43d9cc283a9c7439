use microcms_source::config::Config;
use microcms_source::infra::content_graph::InMemoryContentGraph;
use microcms_source::infra::http_client::ReqwestHttp;
use microcms_source::infra::id_generator::RandomIdGenerator;
use microcms_source::infra::json_output::write_collections;
use microcms_source::{MicrocmsSource, SourceError};
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

#[tokio::test]
async fn test_bad_source_in_config_schedules_nothing_further() {
    let mut config = Config::from_toml(
        r#"
[[sources]]
serviceId = "demo"
endpoint = "articles"

[[sources]]
serviceId = "demo"
endpoint = "tags"
limit = 5000
"#,
    )
    .unwrap();
    config.apply_api_key_fallback(Some("key".to_string()));

    let graph = InMemoryContentGraph::new();
    let http = Arc::new(ReqwestHttp::new(Duration::from_secs(1)).unwrap());
    let ids = Arc::new(RandomIdGenerator::seeded(3));

    let results: Vec<_> = config
        .sources
        .into_iter()
        .map(|options| MicrocmsSource::new(graph.as_ref(), options, http.clone(), ids.clone()))
        .collect();

    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(SourceError::InvalidLimit(_))));
    assert_eq!(graph.pending_tasks(), 1);
}

#[tokio::test]
async fn test_missing_api_key_without_fallback() {
    let config = Config::from_toml("[[sources]]\nserviceId = \"demo\"\nendpoint = \"articles\"\n").unwrap();
    let graph = InMemoryContentGraph::new();
    let http = Arc::new(ReqwestHttp::new(Duration::from_secs(1)).unwrap());
    let ids = Arc::new(RandomIdGenerator::new());

    let options = config.sources.into_iter().next().unwrap();
    let err = MicrocmsSource::new(graph.as_ref(), options, http, ids).err().unwrap();

    assert!(matches!(err, SourceError::MissingField("apiKey")));
    assert_eq!(graph.pending_tasks(), 0);
}

#[tokio::test]
async fn test_empty_graph_writes_nothing() {
    let dir = tempdir().unwrap();
    let graph = InMemoryContentGraph::new();
    let reports = graph.run_sources().await.unwrap();
    assert!(reports.is_empty());

    let written = write_collections(dir.path(), &graph.collections(), chrono::Utc::now()).unwrap();
    assert!(written.is_empty());
}
