use super::GatewayResult;
use async_trait::async_trait;
use domain::AnalyticsEvent;

/// Append-only analytics destination. There is no read path.
#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    async fn record(&self, event: &AnalyticsEvent) -> GatewayResult<()>;
}
