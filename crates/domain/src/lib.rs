//! Domain Layer - Tool Directory client business rules
//!
//! Содержит ТОЛЬКО чистую business logic без dependencies на:
//! - Infrastructure (REST backend, local storage, document head)
//! - Frameworks (CLI, UI)
//! - External systems (analytics sinks, manifest endpoints)
//!
//! - Entities: votes, comments, analytics events, favorites, manifests
//! - Value Objects: subject ids, attribution params, comment content
//! - Config: typed configuration model shared by all layers

pub mod config;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::{
    AnalyticsAction, AnalyticsEvent, ClientIdentity, Comment, CommentId, FavoriteSet,
    ManifestDescriptor, ManifestIcon, ToolProfile, VoteCounts, VoteState, VoteTransition,
    VoteType, VoteWrite,
};
pub use errors::{DomainError, DomainResult};
pub use value_objects::{AttributionParams, CommentContent, ManifestTheme, SubjectId};
