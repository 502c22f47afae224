//! ClientIdentity - anonymous per-browser token attributing writes

use crate::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque anonymous identity token
///
/// Generated once (UUID v4 text) and then only ever read back from storage.
/// The token is never parsed, so any non-blank stored value is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientIdentity(String);

impl ClientIdentity {
    /// Create a fresh random identity
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Restore an identity from its stored representation
    pub fn from_stored(token: &str) -> DomainResult<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(DomainError::InvalidClientIdentity(token.to_string()));
        }
        Ok(Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
