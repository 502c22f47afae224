//! Comment - user comment on a tool, possibly still awaiting the server

use crate::entities::ClientIdentity;
use crate::value_objects::{CommentContent, SubjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Comment identifier; locally predicted comments carry a `local-` id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(String);

impl CommentId {
    const LOCAL_PREFIX: &'static str = "local-";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Temporary id for an optimistic comment
    pub fn local() -> Self {
        Self(format!("{}{}", Self::LOCAL_PREFIX, Uuid::new_v4()))
    }

    pub fn is_local(&self) -> bool {
        self.0.starts_with(Self::LOCAL_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub subject_id: SubjectId,
    pub client_id: ClientIdentity,
    pub author_name: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// True until the backend has accepted the comment
    #[serde(skip)]
    pub pending: bool,
}

impl Comment {
    /// Build the locally predicted version of a comment being posted
    pub fn pending(
        subject_id: SubjectId,
        client_id: ClientIdentity,
        author_name: Option<String>,
        content: CommentContent,
    ) -> Self {
        Self {
            id: CommentId::local(),
            subject_id,
            client_id,
            author_name,
            content: content.into_inner(),
            created_at: Utc::now(),
            pending: true,
        }
    }

    /// Name shown next to the comment
    pub fn display_author(&self) -> &str {
        self.author_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Anonymous")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_comment_has_local_id() {
        let comment = Comment::pending(
            SubjectId::new("perplexity").unwrap(),
            ClientIdentity::generate(),
            None,
            CommentContent::new("useful for research").unwrap(),
        );

        assert!(comment.pending);
        assert!(comment.id.is_local());
        assert_eq!(comment.display_author(), "Anonymous");
    }
}
