use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Missing {0} option.")]
    MissingField(&'static str),

    #[error("Type option must be list or object, got {0:?}")]
    InvalidType(String),

    #[error("limit option must be number and 1 <= limit <= 1000, got {0}")]
    InvalidLimit(String),

    #[error("Failed to load. status code: {status}")]
    FetchFailed { status: u16 },

    #[error("Unexpected response shape: {0}")]
    ShapeMismatch(String),

    #[error("Unknown content type: {0:?}")]
    UnknownType(String),

    #[error("HTTP transport failed: {0}")]
    Transport(String),

    #[error("Content graph rejected the request: {0}")]
    Host(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SourceError {
    /// True for errors raised by the option validator, before any request is made.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SourceError::MissingField(_) | SourceError::InvalidType(_) | SourceError::InvalidLimit(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;
