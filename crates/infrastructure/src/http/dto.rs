//! Row shapes of the REST backend tables

use chrono::{DateTime, Utc};
use domain::{AnalyticsAction, AnalyticsEvent, ClientIdentity, Comment, CommentId, SubjectId, VoteCounts, VoteType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub(crate) struct VoteRow<'a> {
    pub tool_id: &'a str,
    pub client_id: &'a str,
    pub vote_type: VoteType,
}

/// `tool_vote_counts` view; aggregates may come back as null
#[derive(Debug, Deserialize)]
pub(crate) struct VoteCountsRow {
    #[serde(default)]
    pub upvotes: Option<i64>,
    #[serde(default)]
    pub downvotes: Option<i64>,
    #[serde(default)]
    pub score: Option<i64>,
}

impl From<VoteCountsRow> for VoteCounts {
    fn from(row: VoteCountsRow) -> Self {
        let clamp = |n: Option<i64>| u32::try_from(n.unwrap_or(0).max(0)).unwrap_or(u32::MAX);
        let upvotes = clamp(row.upvotes);
        let downvotes = clamp(row.downvotes);
        VoteCounts {
            upvotes,
            downvotes,
            score: row
                .score
                .unwrap_or(i64::from(upvotes) - i64::from(downvotes)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserVoteRow {
    pub vote_type: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnalyticsRow<'a> {
    pub tool_id: &'a str,
    pub action: AnalyticsAction,
    pub metadata: &'a BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a AnalyticsEvent> for AnalyticsRow<'a> {
    fn from(event: &'a AnalyticsEvent) -> Self {
        Self {
            tool_id: event.subject_id.as_str(),
            action: event.action,
            metadata: &event.metadata,
            client_id: event.client_id.as_ref().map(ClientIdentity::as_str),
            created_at: event.timestamp,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct NewCommentRow<'a> {
    pub tool_id: &'a str,
    pub client_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<&'a str>,
    pub content: &'a str,
}

impl<'a> From<&'a Comment> for NewCommentRow<'a> {
    fn from(comment: &'a Comment) -> Self {
        Self {
            tool_id: comment.subject_id.as_str(),
            client_id: comment.client_id.as_str(),
            author_name: comment.author_name.as_deref(),
            content: &comment.content,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentRow {
    pub id: serde_json::Value,
    pub tool_id: SubjectId,
    pub client_id: ClientIdentity,
    #[serde(default)]
    pub author_name: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        // Ids are uuids or bigints depending on the table definition
        let id = match row.id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };

        Comment {
            id: CommentId::new(id),
            subject_id: row.tool_id,
            client_id: row.client_id,
            author_name: row.author_name,
            content: row.content,
            created_at: row.created_at,
            pending: false,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SubscriberRow<'a> {
    pub email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_aggregates_read_as_zero() {
        let row: VoteCountsRow =
            serde_json::from_str(r#"{"upvotes":null,"downvotes":2,"score":null}"#).unwrap();
        let counts = VoteCounts::from(row);
        assert_eq!(counts.upvotes, 0);
        assert_eq!(counts.downvotes, 2);
        assert_eq!(counts.score, -2);
    }

    #[test]
    fn test_numeric_comment_id() {
        let row: CommentRow = serde_json::from_str(
            r#"{"id":17,"tool_id":"t","client_id":"c","content":"hi","created_at":"2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();
        let comment = Comment::from(row);
        assert_eq!(comment.id.as_str(), "17");
        assert_eq!(comment.display_author(), "Anonymous");
    }

    #[test]
    fn test_vote_row_wire_format() {
        let row = VoteRow {
            tool_id: "t",
            client_id: "c",
            vote_type: VoteType::Downvote,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["vote_type"], "downvote");
    }
}
