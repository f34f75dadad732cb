use crate::utils::error::Result;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const STATUS_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Deserialize)]
pub struct DriverStatus {
    #[serde(default)]
    pub ready: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    value: DriverStatus,
}

/// 查詢驅動程式 `GET /status`，不需要 session
#[derive(Debug, Clone)]
pub struct StatusClient {
    client: Client,
    base_url: String,
}

impl StatusClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().timeout(STATUS_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn status(&self) -> Result<DriverStatus> {
        let url = format!("{}/status", self.base_url);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body: StatusResponse = response.json().await?;
        Ok(body.value)
    }
}
