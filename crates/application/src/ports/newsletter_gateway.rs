use super::GatewayResult;
use async_trait::async_trait;

/// Newsletter subscriber list
#[async_trait]
pub trait NewsletterGateway: Send + Sync {
    /// Add an (already validated, normalized) address.
    /// An existing subscription surfaces as a 409 `GatewayError::Status`.
    async fn subscribe(&self, email: &str, source: Option<&str>) -> GatewayResult<()>;
}
