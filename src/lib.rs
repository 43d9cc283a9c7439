pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod observability;
pub mod options;
pub mod source;
pub mod types;

// Layered boundaries for application and infrastructure
pub mod app;
pub mod infra;

pub use error::{Result, SourceError};
pub use options::{ContentType, PartialOptions, SourceOptions};
pub use source::MicrocmsSource;
pub use types::{IngestReport, Node};
