//! Application Services
//!
//! Client-side use cases: каждый сервис владеет своим состоянием и
//! общается с внешним миром только через ports.

pub mod analytics_dispatcher;
pub mod attribution;
pub mod comment_thread;
pub mod favorites;
pub mod identity_resolver;
pub mod manifest_swapper;
pub mod newsletter;
pub mod optimistic;
pub mod vote_updater;

pub use analytics_dispatcher::AnalyticsDispatcher;
pub use attribution::AttributionTracker;
pub use comment_thread::{CommentThread, PostOutcome};
pub use favorites::FavoritesStore;
pub use identity_resolver::IdentityResolver;
pub use manifest_swapper::{
    InstalledManifest, ManifestOrigin, ManifestScope, ManifestSwapper, NavigationEvent,
};
pub use newsletter::{NewsletterService, SubscribeOutcome};
pub use optimistic::{OptimisticCell, OptimisticError, Snapshot, SyncPhase, Ticket};
pub use vote_updater::{VoteOutcome, VoteUpdater};
