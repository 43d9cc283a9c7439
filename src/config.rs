use crate::constants::{API_KEY_ENV, DEFAULT_OUTPUT_DIR, DEFAULT_TIMEOUT_SECONDS};
use crate::error::{Result, SourceError};
use crate::options::PartialOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub sources: Vec<PartialOptions>,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl Config {
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            SourceError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        Self::from_toml(&config_content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.sources.is_empty() {
            return Err(SourceError::Config("no [[sources]] configured".to_string()));
        }
        Ok(config)
    }

    /// Fill in `apiKey` for sources that leave it out.
    pub fn apply_api_key_fallback(&mut self, api_key: Option<String>) {
        let Some(api_key) = api_key.filter(|k| !k.is_empty()) else {
            return;
        };
        for source in &mut self.sources {
            if source.api_key.as_deref().map_or(true, str::is_empty) {
                source.api_key = Some(api_key.clone());
            }
        }
    }

    /// Same as [`Config::apply_api_key_fallback`], reading the key from the environment
    pub fn apply_env(&mut self) {
        self.apply_api_key_fallback(std::env::var(API_KEY_ENV).ok());
    }
}
