use crate::app::ports::{ActionsPort, CollectionPort, HttpClientPort, HttpGetRequest, IdGeneratorPort};
use crate::constants::API_KEY_HEADER;
use crate::error::{Result, SourceError};
use crate::observability::metrics;
use crate::options::{ContentType, SourceOptions};
use crate::types::{object_record, ContentRecord, IngestReport, ListPage, Node};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument};

/// Use case for pulling one endpoint into one collection.
///
/// Pages are fetched strictly one after another: whether page N is needed
/// depends on the offset and `totalCount` seen on page N-1. Any failure
/// aborts the run; nodes registered from earlier pages stay registered.
pub struct IngestUseCase {
    http: Arc<dyn HttpClientPort>,
    ids: Arc<dyn IdGeneratorPort>,
}

impl IngestUseCase {
    pub fn new(http: Arc<dyn HttpClientPort>, ids: Arc<dyn IdGeneratorPort>) -> Self {
        Self { http, ids }
    }

    #[instrument(skip(self, actions, options), fields(endpoint = %options.endpoint, content_type = %options.content_type))]
    pub async fn run(&self, actions: &dyn ActionsPort, base_url: &str, options: &SourceOptions) -> Result<IngestReport> {
        let type_name = options.type_name();
        let collection = actions.add_collection(&type_name).map_err(SourceError::Host)?;

        let result = match options.content_type {
            ContentType::List => self.fetch_list(collection.as_ref(), base_url, options).await,
            ContentType::Object => self.fetch_object(collection.as_ref(), base_url, options).await,
        };

        match result {
            Ok((pages_fetched, nodes_added)) => {
                metrics::ingest::run_completed(&type_name);
                info!(type_name = %type_name, pages_fetched, nodes_added, "Ingestion finished");
                Ok(IngestReport { type_name, pages_fetched, nodes_added })
            }
            Err(e) => {
                error!(type_name = %type_name, "Ingestion aborted: {}", e);
                Err(e)
            }
        }
    }

    async fn fetch_list(
        &self,
        collection: &dyn CollectionPort,
        base_url: &str,
        options: &SourceOptions,
    ) -> Result<(usize, usize)> {
        let mut offset: u64 = 0;
        let mut pages = 0;
        let mut nodes = 0;

        loop {
            let query = vec![
                ("offset".to_string(), offset.to_string()),
                ("limit".to_string(), options.limit.to_string()),
            ];
            let payload = self.fetch(base_url, query, options).await?;
            pages += 1;

            let page = ListPage::from_payload(&payload).map_err(|e| {
                metrics::ingest::shape_error();
                e
            })?;
            debug!(
                offset,
                limit = options.limit,
                records = page.contents.len(),
                total_count = ?page.total_count,
                "Fetched list page"
            );

            nodes += self.add_records(collection, page.contents)?;

            let Some(total_count) = page.total_count else {
                break;
            };
            offset += options.limit;
            if offset >= total_count {
                break;
            }
        }

        Ok((pages, nodes))
    }

    async fn fetch_object(
        &self,
        collection: &dyn CollectionPort,
        base_url: &str,
        options: &SourceOptions,
    ) -> Result<(usize, usize)> {
        let payload = self.fetch(base_url, Vec::new(), options).await?;
        let record = object_record(&payload);
        debug!(fields = record.len(), "Fetched object");
        let nodes = self.add_records(collection, vec![record])?;
        Ok((1, nodes))
    }

    async fn fetch(&self, url: &str, query: Vec<(String, String)>, options: &SourceOptions) -> Result<Value> {
        let request = HttpGetRequest {
            url: url.to_string(),
            query,
            headers: vec![(API_KEY_HEADER.to_string(), options.api_key.clone())],
        };

        let started = Instant::now();
        let response = self.http.get(&request).await.map_err(SourceError::Transport)?;
        metrics::ingest::request_duration(started.elapsed().as_secs_f64());

        if response.status != 200 {
            metrics::ingest::fetch_error(response.status);
            return Err(SourceError::FetchFailed { status: response.status });
        }
        metrics::ingest::page_fetched(&options.type_name());
        Ok(response.body)
    }

    fn add_records(&self, collection: &dyn CollectionPort, records: Vec<ContentRecord>) -> Result<usize> {
        let mut added = 0;
        for record in records {
            let node = Node::from_record(record, self.ids.next_id());
            collection.add_node(node).map_err(SourceError::Host)?;
            metrics::ingest::nodes_added(collection.type_name(), 1);
            added += 1;
        }
        Ok(added)
    }
}
