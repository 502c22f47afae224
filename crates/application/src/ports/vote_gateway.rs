//! Vote Gateway Port
//!
//! Remote votes table: one row per (subject, client) pair, plus an
//! aggregated counts view.

use super::GatewayResult;
use async_trait::async_trait;
use domain::{ClientIdentity, SubjectId, VoteCounts, VoteType};

#[async_trait]
pub trait VoteGateway: Send + Sync {
    /// Aggregated counts; `None` means the subject has no votes yet
    async fn fetch_counts(&self, subject: &SubjectId) -> GatewayResult<Option<VoteCounts>>;

    /// The identity's current vote on the subject, if any
    async fn fetch_user_vote(
        &self,
        subject: &SubjectId,
        client: &ClientIdentity,
    ) -> GatewayResult<Option<VoteType>>;

    /// Insert or replace the row keyed by (subject, client)
    async fn upsert_vote(
        &self,
        subject: &SubjectId,
        client: &ClientIdentity,
        vote: VoteType,
    ) -> GatewayResult<()>;

    /// Remove the row keyed by (subject, client)
    async fn delete_vote(&self, subject: &SubjectId, client: &ClientIdentity) -> GatewayResult<()>;
}
