//! Domain Entities - Core business objects
//!
//! Entities содержат identity и business rules.
//! Независимы от infrastructure concerns.

pub mod analytics_event;
mod client_identity;
pub mod comment;
mod favorite_set;
pub mod manifest;
pub mod vote;

pub use analytics_event::{AnalyticsAction, AnalyticsEvent};
pub use client_identity::ClientIdentity;
pub use comment::{Comment, CommentId};
pub use favorite_set::FavoriteSet;
pub use manifest::{ManifestDescriptor, ManifestIcon, ToolProfile};
pub use vote::{VoteCounts, VoteState, VoteTransition, VoteType, VoteWrite};
