//! Application Ports
//!
//! Определяет абстракции для Infrastructure layer по принципу Dependency Inversion.
//! Application layer зависит от этих abstractions, а Infrastructure layer их реализует.

pub mod analytics_sink;
pub mod comment_gateway;
pub mod document_head;
pub mod gateway_error;
pub mod key_value_store;
pub mod manifest_source;
pub mod newsletter_gateway;
pub mod user_notifier;
pub mod vote_gateway;

// Re-export all port traits
pub use analytics_sink::*;
pub use comment_gateway::*;
pub use document_head::*;
pub use gateway_error::*;
pub use key_value_store::*;
pub use manifest_source::*;
pub use newsletter_gateway::*;
pub use user_notifier::*;
pub use vote_gateway::*;
