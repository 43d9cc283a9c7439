use crate::error::Result;
use crate::types::{IngestReport, Node};
use async_trait::async_trait;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

// Transport-side ports
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    async fn get(&self, request: &HttpGetRequest) -> std::result::Result<HttpGetResult, String>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpGetRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl HttpGetRequest {
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub body: Value,
}

// Host-side ports

pub type LoadSourceFuture = Pin<Box<dyn Future<Output = Result<IngestReport>> + Send>>;

/// Work registered with the host, run during its ingestion phase
pub type LoadSourceTask = Box<dyn FnOnce(Arc<dyn ActionsPort>) -> LoadSourceFuture + Send>;

pub trait SourceApiPort: Send + Sync {
    fn load_source(&self, task: LoadSourceTask);
}

pub trait ActionsPort: Send + Sync {
    fn add_collection(&self, type_name: &str) -> std::result::Result<Arc<dyn CollectionPort>, String>;
}

pub trait CollectionPort: Send + Sync {
    fn type_name(&self) -> &str;
    fn add_node(&self, node: Node) -> std::result::Result<(), String>;
}

pub trait IdGeneratorPort: Send + Sync {
    fn next_id(&self) -> String;
}
