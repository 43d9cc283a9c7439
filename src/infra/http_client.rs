use crate::app::ports::{HttpClientPort, HttpGetRequest, HttpGetResult};
use crate::error::{Result, SourceError};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClientPort for ReqwestHttp {
    async fn get(&self, request: &HttpGetRequest) -> std::result::Result<HttpGetResult, String> {
        let mut builder = self.client.get(&request.url).query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let resp = builder.send().await.map_err(|e| e.to_string())?;
        let status = resp.status().as_u16();
        let bytes = resp.bytes().await.map_err(|e| e.to_string())?;
        debug!(url = %request.url, status, bytes = bytes.len(), "GET completed");

        // Only a successful response needs a readable body; the status alone
        // decides failure otherwise.
        let body = if status != 200 || bytes.is_empty() {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        } else {
            serde_json::from_slice(&bytes).map_err(|e| format!("invalid JSON body: {}", e))?
        };

        Ok(HttpGetResult { status, body })
    }
}
