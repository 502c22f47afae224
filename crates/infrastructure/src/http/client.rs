use anyhow::{anyhow, Result};
use domain::config::BackendConfig;
use reqwest::{Client, Method, RequestBuilder};
use std::time::Duration;

/// reqwest client with the configured timeout and anon key auth
#[derive(Debug, Clone)]
pub(crate) struct BackendClient {
    client: Client,
    anon_key: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            anon_key: config.anon_key.clone(),
        })
    }

    /// Every backend call carries the key as `apikey` and as bearer token
    pub fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
    }
}
