//! CommentContent - validated body of a user comment

use crate::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

/// Trimmed, non-empty comment text with an upper length bound
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentContent(String);

impl CommentContent {
    /// Maximum comment length in characters (not bytes)
    pub const MAX_LENGTH: usize = 2000;

    pub fn new(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyComment);
        }

        let length = trimmed.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(DomainError::CommentTooLong {
                length,
                max_allowed: Self::MAX_LENGTH,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
