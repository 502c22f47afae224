//! Tooldir CLI Library
//!
//! Команды `tooldir` и wiring между config, REST gateway и
//! application services.

pub mod commands;
pub mod context;
pub mod notifier;
pub mod progress;

pub use context::AppContext;
pub use notifier::ConsoleNotifier;
