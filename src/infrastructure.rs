//! Infrastructure layer - persistence backends and logging setup
//!
//! The settings backend port with its file and in-memory implementations,
//! plus tracing initialization for the host application.

pub mod logging;
pub mod persistence;

// Re-export commonly used items for convenience
pub use persistence::{
    FileSettingsBackend, MemorySettingsBackend, PersistenceError, SettingsBackend,
};
