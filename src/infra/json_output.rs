use crate::error::Result;
use crate::infra::content_graph::CollectionSnapshot;
use crate::types::Node;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectionDocument<'a> {
    type_name: &'a str,
    fetched_at: DateTime<Utc>,
    nodes: &'a [Node],
}

/// Write each collection to `<output_dir>/<typeName>.json`.
pub fn write_collections(
    output_dir: &Path,
    collections: &[CollectionSnapshot],
    fetched_at: DateTime<Utc>,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(collections.len());
    for collection in collections {
        let path = output_dir.join(format!("{}.json", collection.type_name));
        let document = CollectionDocument {
            type_name: &collection.type_name,
            fetched_at,
            nodes: &collection.nodes,
        };
        fs::write(&path, serde_json::to_string_pretty(&document)?)?;
        info!(path = %path.display(), nodes = collection.nodes.len(), "Wrote collection");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::tempdir;

    #[test]
    fn test_writes_one_file_per_collection() {
        let dir = tempdir().unwrap();
        let node = Node::from_record(
            json!({"id": "src-1", "title": "Hello"}).as_object().cloned().unwrap(),
            "_n1".to_string(),
        );
        let collections = vec![
            CollectionSnapshot { type_name: "microcmsNews".into(), nodes: vec![node] },
            CollectionSnapshot { type_name: "microcmsTags".into(), nodes: vec![] },
        ];

        let written = write_collections(dir.path(), &collections, Utc::now()).unwrap();

        assert_eq!(written.len(), 2);
        let raw = fs::read_to_string(dir.path().join("microcmsNews.json")).unwrap();
        let doc: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc["typeName"], "microcmsNews");
        assert!(doc["fetchedAt"].is_string());
        assert_eq!(doc["nodes"][0]["id"], "_n1");
        assert_eq!(doc["nodes"][0]["microcmsId"], "src-1");
        assert_eq!(doc["nodes"][0]["title"], "Hello");
    }
}
