//! # Application Layer
//!
//! Координирует client-side логику каталога поверх domain layer:
//! - Ports: абстракции для backend gateway, local storage, document head
//! - Services: optimistic votes/comments, identity, analytics, manifests
//! - Adapters: in-memory реализации ports (tests, offline CLI)
//!
//! ## Dependency Direction
//!
//! ```text
//! Application Layer → Domain Layer (entities, value objects)
//! Infrastructure → Application Layer (implements ports)
//! ```

pub mod adapters;
pub mod errors;
pub mod ports;
pub mod services;

pub use errors::ApplicationError;

/// Application layer result type
pub type ApplicationResult<T> = Result<T, ApplicationError>;
