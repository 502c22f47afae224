use super::GatewayResult;
use async_trait::async_trait;
use domain::{ManifestDescriptor, SubjectId};

/// Endpoint serving tool-scoped web app manifests (`GET /manifest/{toolId}`)
#[async_trait]
pub trait ManifestSource: Send + Sync {
    async fn fetch_manifest(&self, tool: &SubjectId) -> GatewayResult<ManifestDescriptor>;
}
