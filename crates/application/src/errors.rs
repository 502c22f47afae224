//! Application Layer Errors
//!
//! Определяет все ошибки Application Layer с четкой категоризацией
//! и mapping на Domain Layer / port errors.

use crate::ports::{GatewayError, StorageError};
use domain::errors::DomainError;
use thiserror::Error;

/// Основные ошибки Application Layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain layer errors
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Validation errors
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// Local storage port errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Remote gateway errors
    #[error("Gateway error during {operation}: {source}")]
    Gateway {
        operation: String,
        #[source]
        source: GatewayError,
    },

    /// A mutation for this subject is still awaiting reconciliation
    #[error("Another {kind} for '{subject}' is still in flight")]
    MutationInFlight { kind: String, subject: String },

    /// The owning view was unmounted; results are discarded
    #[error("Component unmounted, {operation} ignored")]
    Unmounted { operation: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ApplicationError {
    /// Create validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Wrap a gateway failure with the operation that hit it
    pub fn gateway<S: Into<String>>(operation: S, source: GatewayError) -> Self {
        Self::Gateway {
            operation: operation.into(),
            source,
        }
    }

    pub fn in_flight<K: Into<String>, S: Into<String>>(kind: K, subject: S) -> Self {
        Self::MutationInFlight {
            kind: kind.into(),
            subject: subject.into(),
        }
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Check if error is retryable by a later, user-initiated action
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Gateway { source, .. } => source.is_transient(),
            Self::MutationInFlight { .. } => true,
            Self::Storage(StorageError::Unavailable(_)) => true,
            _ => false,
        }
    }

    /// Get error category for logs
    pub fn category(&self) -> &'static str {
        match self {
            Self::Domain(_) => "domain",
            Self::Validation { .. } => "validation",
            Self::Storage(_) => "storage",
            Self::Gateway { .. } => "gateway",
            Self::MutationInFlight { .. } => "in_flight",
            Self::Unmounted { .. } => "unmounted",
            Self::Configuration { .. } => "configuration",
        }
    }
}
