//! Domain Value Objects - Immutable domain concepts
//!
//! Value objects представляют business concepts без identity.
//! Immutable по определению.

pub mod attribution;
mod comment_content;
mod manifest_theme;
pub mod subject_id;

pub use attribution::AttributionParams;
pub use comment_content::CommentContent;
pub use manifest_theme::ManifestTheme;
pub use subject_id::SubjectId;
