use super::client::BackendClient;
use anyhow::Result;
use application::ports::{GatewayError, GatewayResult, ManifestSource};
use async_trait::async_trait;
use domain::config::BackendConfig;
use domain::{ManifestDescriptor, SubjectId};
use reqwest::Method;
use tracing::{debug, instrument};

/// Serverless `GET {functions}/manifest/{toolId}` endpoint
#[derive(Debug, Clone)]
pub struct HttpManifestSource {
    client: BackendClient,
    functions_url: String,
}

impl HttpManifestSource {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        Ok(Self {
            client: BackendClient::new(config)?,
            functions_url: config.functions_url.trim_end_matches('/').to_string(),
        })
    }

    fn manifest_url(&self, tool: &SubjectId) -> String {
        format!(
            "{}/manifest/{}",
            self.functions_url,
            urlencoding::encode(tool.as_str())
        )
    }
}

#[async_trait]
impl ManifestSource for HttpManifestSource {
    #[instrument(skip(self), fields(tool = %tool))]
    async fn fetch_manifest(&self, tool: &SubjectId) -> GatewayResult<ManifestDescriptor> {
        let response = self
            .client
            .request(Method::GET, self.manifest_url(tool))
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let descriptor = response
            .json::<ManifestDescriptor>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;

        debug!(name = %descriptor.name, "manifest fetched");
        Ok(descriptor)
    }
}
