use crate::app::ingest_use_case::IngestUseCase;
use crate::app::ports::{ActionsPort, HttpClientPort, IdGeneratorPort, LoadSourceFuture, SourceApiPort};
use crate::error::Result;
use crate::options::{validate, PartialOptions, SourceOptions};
use std::sync::Arc;
use tracing::{info, warn};

/// A configured microCMS source.
///
/// Construction validates the options and, only when they are valid,
/// registers the ingestion run with the host. An invalid configuration
/// never reaches the network.
pub struct MicrocmsSource {
    options: SourceOptions,
    base_url: String,
}

impl MicrocmsSource {
    pub fn new(
        api: &dyn SourceApiPort,
        options: PartialOptions,
        http: Arc<dyn HttpClientPort>,
        ids: Arc<dyn IdGeneratorPort>,
    ) -> Result<Self> {
        let options = validate(options).map_err(|e| {
            warn!("Rejected microCMS source options: {}", e);
            e
        })?;
        let base_url = options.base_url();

        let use_case = Arc::new(IngestUseCase::new(http, ids));
        let task_url = base_url.clone();
        let task_options = options.clone();
        api.load_source(Box::new(move |actions: Arc<dyn ActionsPort>| -> LoadSourceFuture {
            Box::pin(async move { use_case.run(actions.as_ref(), &task_url, &task_options).await })
        }));

        info!(
            endpoint = %options.endpoint,
            content_type = %options.content_type,
            limit = options.limit,
            "Scheduled microCMS source"
        );
        Ok(Self { options, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn type_name(&self) -> String {
        self.options.type_name()
    }
}
