//! Errors returned by remote gateway ports

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// Network unreachable, timeout, TLS failure
    #[error("transport failure: {0}")]
    Transport(String),

    /// Backend answered with a non-2xx status
    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the expected schema
    #[error("malformed response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Unique-constraint violation (PostgREST answers 409)
    pub fn is_conflict(&self) -> bool {
        matches!(self, GatewayError::Status { status: 409, .. })
    }

    /// Failures that may succeed if the user tries again later
    pub fn is_transient(&self) -> bool {
        match self {
            GatewayError::Transport(_) => true,
            GatewayError::Status { status, .. } => *status == 429 || *status >= 500,
            GatewayError::Decode(_) => false,
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
