use crate::app::ports::{ActionsPort, CollectionPort, LoadSourceTask, SourceApiPort};
use crate::error::Result;
use crate::types::{IngestReport, Node};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Read-only copy of a collection and its nodes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSnapshot {
    pub type_name: String,
    pub nodes: Vec<Node>,
}

pub struct InMemoryCollection {
    type_name: String,
    nodes: Mutex<Vec<Node>>,
    ids: Mutex<HashSet<String>>,
}

impl InMemoryCollection {
    fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            nodes: Mutex::new(Vec::new()),
            ids: Mutex::new(HashSet::new()),
        }
    }

    fn snapshot(&self) -> CollectionSnapshot {
        CollectionSnapshot {
            type_name: self.type_name.clone(),
            nodes: lock(&self.nodes).clone(),
        }
    }
}

impl CollectionPort for InMemoryCollection {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn add_node(&self, node: Node) -> std::result::Result<(), String> {
        if !lock(&self.ids).insert(node.id().to_string()) {
            return Err(format!(
                "duplicate node id {:?} in collection {}",
                node.id(),
                self.type_name
            ));
        }
        lock(&self.nodes).push(node);
        Ok(())
    }
}

/// A minimal content graph host.
///
/// Sources register tasks through [`SourceApiPort::load_source`]; nothing
/// runs until [`InMemoryContentGraph::run_sources`] drives them.
#[derive(Default)]
pub struct InMemoryContentGraph {
    tasks: Mutex<Vec<LoadSourceTask>>,
    collections: Mutex<Vec<Arc<InMemoryCollection>>>,
}

impl InMemoryContentGraph {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn pending_tasks(&self) -> usize {
        lock(&self.tasks).len()
    }

    /// Run every registered task in registration order, stopping at the
    /// first failure.
    pub async fn run_sources(self: &Arc<Self>) -> Result<Vec<IngestReport>> {
        let tasks: Vec<LoadSourceTask> = lock(&self.tasks).drain(..).collect();
        info!("Running {} source task(s)", tasks.len());

        let mut reports = Vec::with_capacity(tasks.len());
        for task in tasks {
            let actions: Arc<dyn ActionsPort> = self.clone();
            reports.push(task(actions).await?);
        }
        Ok(reports)
    }

    pub fn collections(&self) -> Vec<CollectionSnapshot> {
        lock(&self.collections).iter().map(|c| c.snapshot()).collect()
    }

    pub fn collection(&self, type_name: &str) -> Option<CollectionSnapshot> {
        lock(&self.collections)
            .iter()
            .find(|c| c.type_name == type_name)
            .map(|c| c.snapshot())
    }
}

impl SourceApiPort for InMemoryContentGraph {
    fn load_source(&self, task: LoadSourceTask) {
        lock(&self.tasks).push(task);
    }
}

impl ActionsPort for InMemoryContentGraph {
    fn add_collection(&self, type_name: &str) -> std::result::Result<Arc<dyn CollectionPort>, String> {
        let mut collections = lock(&self.collections);
        if collections.iter().any(|c| c.type_name == type_name) {
            return Err(format!("collection {} already exists", type_name));
        }
        let collection = Arc::new(InMemoryCollection::new(type_name));
        collections.push(collection.clone());
        debug!(type_name, "Collection created");
        Ok(collection)
    }
}
