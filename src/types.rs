use crate::constants::{CONTENTS_FIELD, NODE_ID_FIELD, SOURCE_ID_FIELD, TOTAL_COUNT_FIELD};
use crate::error::{Result, SourceError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A raw content record as returned by the remote API
pub type ContentRecord = Map<String, Value>;

/// One node contributed to the content graph.
///
/// The fields of the content record are passed through untouched, except
/// `id`, which holds a freshly synthesized identifier. The record's own
/// `id` (when present) is kept under `microcmsId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Node(ContentRecord);

impl Node {
    pub fn from_record(mut record: ContentRecord, node_id: String) -> Self {
        if let Some(source_id) = record.remove(NODE_ID_FIELD) {
            record.insert(SOURCE_ID_FIELD.to_string(), source_id);
        }
        record.insert(NODE_ID_FIELD.to_string(), Value::String(node_id));
        Self(record)
    }

    pub fn id(&self) -> &str {
        self.0
            .get(NODE_ID_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn source_id(&self) -> Option<&Value> {
        self.0.get(SOURCE_ID_FIELD)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

/// One page of a `list` endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage {
    pub contents: Vec<ContentRecord>,
    /// Only set when the payload carries a positive `totalCount`
    pub total_count: Option<u64>,
}

impl ListPage {
    /// Checks that `contents` is an array and splits it into records.
    pub fn from_payload(payload: &Value) -> Result<Self> {
        let items = payload
            .get(CONTENTS_FIELD)
            .and_then(Value::as_array)
            .ok_or_else(|| SourceError::ShapeMismatch("expected array".to_string()))?;

        let contents = items.iter().map(record_from).collect();

        let total_count = payload
            .get(TOTAL_COUNT_FIELD)
            .and_then(usable_count);

        Ok(Self { contents, total_count })
    }
}

/// The single record of an `object` endpoint
pub fn object_record(payload: &Value) -> ContentRecord {
    record_from(payload)
}

// Non-object values carry no fields of their own; they still become a node.
fn record_from(value: &Value) -> ContentRecord {
    value.as_object().cloned().unwrap_or_default()
}

// Absent, null, zero, negative or non-numeric counts all mean "single page".
// Numeric strings such as "12" are read as counts.
fn usable_count(value: &Value) -> Option<u64> {
    let n = match value {
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        other => {
            if let Some(n) = other.as_u64() {
                return (n > 0).then_some(n);
            }
            other.as_f64()?
        }
    };
    (n.is_finite() && n > 0.0).then(|| n.ceil() as u64)
}

/// Summary of one completed ingestion run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    pub type_name: String,
    pub pages_fetched: usize,
    pub nodes_added: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> ContentRecord {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_node_moves_source_id_aside() {
        let node = Node::from_record(record(json!({"id": "abc", "title": "Hello"})), "_n1".into());
        assert_eq!(node.id(), "_n1");
        assert_eq!(node.source_id(), Some(&json!("abc")));
        assert_eq!(node.get("title"), Some(&json!("Hello")));
    }

    #[test]
    fn test_node_without_source_id() {
        let node = Node::from_record(record(json!({"title": "Hello"})), "_n1".into());
        assert_eq!(node.id(), "_n1");
        assert!(node.source_id().is_none());
    }

    #[test]
    fn test_list_page_reads_contents_and_count() {
        let page = ListPage::from_payload(&json!({
            "contents": [{"id": "a"}, {"id": "b"}],
            "totalCount": 2,
            "offset": 0,
            "limit": 10
        }))
        .unwrap();
        assert_eq!(page.contents.len(), 2);
        assert_eq!(page.total_count, Some(2));
    }

    #[test]
    fn test_list_page_unusable_counts() {
        for count in [json!(0), json!(null), json!(false), json!("many"), json!(""), json!(-4)] {
            let page = ListPage::from_payload(&json!({"contents": [], "totalCount": count})).unwrap();
            assert_eq!(page.total_count, None, "count {:?}", count);
        }
        let page = ListPage::from_payload(&json!({"contents": []})).unwrap();
        assert_eq!(page.total_count, None);
    }

    #[test]
    fn test_list_page_rejects_non_array_contents() {
        let err = ListPage::from_payload(&json!({"contents": {}})).unwrap_err();
        assert!(matches!(err, SourceError::ShapeMismatch(reason) if reason == "expected array"));

        let err = ListPage::from_payload(&json!({})).unwrap_err();
        assert!(matches!(err, SourceError::ShapeMismatch(_)));
    }

    #[test]
    fn test_list_page_reads_numeric_string_count() {
        let page = ListPage::from_payload(&json!({"contents": [{}], "totalCount": "12"})).unwrap();
        assert_eq!(page.total_count, Some(12));
    }

    #[test]
    fn test_list_page_keeps_non_object_elements() {
        let page = ListPage::from_payload(&json!({"contents": [1, "x", null]})).unwrap();
        assert_eq!(page.contents.len(), 3);
        assert!(page.contents.iter().all(|record| record.is_empty()));
    }

    #[test]
    fn test_object_record_passes_non_object_through_as_empty() {
        assert_eq!(object_record(&json!({"siteName": "demo"})).len(), 1);
        assert!(object_record(&json!(null)).is_empty());
        assert!(object_record(&json!([1, 2])).is_empty());
    }
}
