//! # Infrastructure Layer
//!
//! Реализации application ports поверх внешнего мира:
//! - `http`: REST backend (votes, comments, analytics, newsletter) и manifest endpoint
//! - `storage`: JSON-файл как persistent key-value storage
//! - `config`: загрузка и валидация `DirectoryConfig`

pub mod config;
pub mod http;
pub mod storage;

pub use config::{ConfigLoader, ConfigSource, ConfigValidator};
pub use http::{HttpManifestSource, RestGateway};
pub use storage::FileKeyValueStore;
