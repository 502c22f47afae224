//! Domain Errors - Business rule violations
//!
//! Contains ONLY business logic errors, не infrastructure errors

use thiserror::Error;

/// Domain-specific errors representing business rule violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Business validation: subject (tool) id cannot be blank
    #[error("Invalid subject id: '{0}'")]
    InvalidSubjectId(String),

    /// Business validation: client identity token cannot be blank
    #[error("Invalid client identity: '{0}'")]
    InvalidClientIdentity(String),

    /// Business validation: unknown vote type on the wire
    #[error("Invalid vote type: {0}")]
    InvalidVoteType(String),

    /// Business validation: unknown analytics action
    #[error("Invalid analytics action: {0}")]
    InvalidAnalyticsAction(String),

    /// Business validation: comment content cannot be empty
    #[error("Comment cannot be empty")]
    EmptyComment,

    /// Business rule: comment length limit
    #[error("Comment too long: {length} characters, maximum allowed: {max_allowed}")]
    CommentTooLong { length: usize, max_allowed: usize },
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Check if error is a business validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidSubjectId(_)
                | DomainError::InvalidClientIdentity(_)
                | DomainError::InvalidVoteType(_)
                | DomainError::InvalidAnalyticsAction(_)
                | DomainError::EmptyComment
        )
    }

    /// Check if error is a business rule violation
    pub fn is_business_rule_error(&self) -> bool {
        matches!(self, DomainError::CommentTooLong { .. })
    }

    /// Get error category for business logic
    pub fn category(&self) -> ErrorCategory {
        if self.is_validation_error() {
            ErrorCategory::Validation
        } else {
            ErrorCategory::BusinessRule
        }
    }
}

/// Categories of domain errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Input validation errors
    Validation,
    /// Business rule violations
    BusinessRule,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categorization() {
        let validation_error = DomainError::EmptyComment;
        assert!(validation_error.is_validation_error());
        assert_eq!(validation_error.category(), ErrorCategory::Validation);

        let business_rule_error = DomainError::CommentTooLong {
            length: 2001,
            max_allowed: 2000,
        };
        assert!(business_rule_error.is_business_rule_error());
        assert_eq!(business_rule_error.category(), ErrorCategory::BusinessRule);
    }

    #[test]
    fn test_error_messages() {
        let error = DomainError::CommentTooLong {
            length: 2500,
            max_allowed: 2000,
        };
        assert!(error.to_string().contains("2500"));
        assert!(error.to_string().contains("2000"));
    }
}
