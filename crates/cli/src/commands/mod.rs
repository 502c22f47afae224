pub mod attribution;
pub mod comments;
pub mod config;
pub mod favorites;
pub mod identity;
pub mod manifest;
pub mod newsletter;
pub mod track;
pub mod votes;

pub use attribution::AttributionCommand;
pub use comments::{CommentCommand, CommentsCommand};
pub use config::ConfigCommand;
pub use favorites::FavoriteCommand;
pub use identity::IdentityCommand;
pub use manifest::ManifestCommand;
pub use newsletter::SubscribeCommand;
pub use track::TrackCommand;
pub use votes::{VoteCommand, VotesCommand};
