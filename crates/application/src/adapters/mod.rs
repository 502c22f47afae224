//! In-process port implementations
//!
//! Используются в tests и как fallback, когда у клиента нет
//! настоящего persistent storage или DOM.

mod in_memory_document_head;
mod in_memory_store;
mod notifiers;

pub use in_memory_document_head::InMemoryDocumentHead;
pub use in_memory_store::InMemoryKeyValueStore;
pub use notifiers::{LogNotifier, RecordingNotifier};
