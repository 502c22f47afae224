use super::GatewayResult;
use async_trait::async_trait;
use domain::{Comment, SubjectId};

/// Remote comments table
#[async_trait]
pub trait CommentGateway: Send + Sync {
    /// Comments for a subject, newest first
    async fn list_comments(&self, subject: &SubjectId) -> GatewayResult<Vec<Comment>>;

    /// Insert a comment and return the stored row (server id and timestamp)
    async fn insert_comment(&self, comment: &Comment) -> GatewayResult<Comment>;
}
