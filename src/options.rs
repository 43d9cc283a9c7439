//! Option validation for a microCMS source.
//!
//! Caller options are merged over the defaults and checked in a fixed
//! order: `serviceId`, `endpoint`, `apiKey`, `type`, `limit`. The first
//! violation wins. Nothing here touches the network.

use crate::constants::{self, DEFAULT_LIMIT, DEFAULT_VERSION, MAX_LIMIT, MIN_LIMIT, TYPE_LIST, TYPE_OBJECT};
use crate::error::{Result, SourceError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Shape of the remote resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    List,
    Object,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::List => TYPE_LIST,
            ContentType::Object => TYPE_OBJECT,
        }
    }
}

impl FromStr for ContentType {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            TYPE_LIST => Ok(ContentType::List),
            TYPE_OBJECT => Ok(ContentType::Object),
            other => Err(SourceError::UnknownType(other.to_string())),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options as supplied by the caller; every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialOptions {
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default, rename = "type")]
    pub content_type: Option<String>,
    /// Kept raw so that a non-numeric value is reported as an invalid limit
    #[serde(default)]
    pub limit: Option<Value>,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl PartialOptions {
    pub fn new(service_id: &str, endpoint: &str, api_key: &str) -> Self {
        Self {
            service_id: Some(service_id.to_string()),
            endpoint: Some(endpoint.to_string()),
            api_key: Some(api_key.to_string()),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    pub fn with_limit(mut self, limit: impl Into<Value>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }
}

/// Fully validated options for one source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceOptions {
    pub service_id: String,
    pub version: u32,
    pub endpoint: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub limit: u64,
    #[serde(skip_serializing)]
    pub api_key: String,
}

impl SourceOptions {
    pub fn base_url(&self) -> String {
        constants::base_url(&self.service_id, self.version, &self.endpoint)
    }

    pub fn type_name(&self) -> String {
        constants::type_name_for(&self.endpoint)
    }
}

/// Merge caller options over the defaults and validate them.
pub fn validate(options: PartialOptions) -> Result<SourceOptions> {
    let service_id = required(options.service_id, "serviceId")?;
    let endpoint = required(options.endpoint, "endpoint")?;
    let api_key = required(options.api_key, "apiKey")?;

    let content_type = match options.content_type.as_deref() {
        None => ContentType::List,
        Some(raw) => raw
            .parse::<ContentType>()
            .map_err(|_| SourceError::InvalidType(raw.to_string()))?,
    };

    let limit = match options.limit {
        None => DEFAULT_LIMIT,
        Some(raw) => parse_limit(&raw)?,
    };

    Ok(SourceOptions {
        service_id,
        version: options.version.unwrap_or(DEFAULT_VERSION),
        endpoint,
        content_type,
        limit,
        api_key,
    })
}

fn required(value: Option<String>, field: &'static str) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(SourceError::MissingField(field)),
    }
}

fn parse_limit(raw: &Value) -> Result<u64> {
    // Integral values only: 10.0 passes, 2.5 does not.
    let limit = raw
        .as_u64()
        .or_else(|| raw.as_f64().filter(|n| n.fract() == 0.0 && *n >= 0.0).map(|n| n as u64));

    match limit {
        Some(n) if (MIN_LIMIT..=MAX_LIMIT).contains(&n) => Ok(n),
        _ => Err(SourceError::InvalidLimit(raw.to_string())),
    }
}
