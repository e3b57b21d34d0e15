//! Cohort Prefs - persisted view preferences for the cohort reflection tracker
//!
//! Durable sidebar and admin-table view state for the desktop app. The
//! store loads one JSON record at startup, serves cloned snapshots to the
//! UI, commits every update back through a pluggable settings backend, and
//! broadcasts committed changes to subscribed views.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export the public surface for consumers
pub use application::events::{ChangeKind, PreferencesChanged};
pub use application::store::{PreferencesStore, STORAGE_KEY};
pub use domain::preferences::{
    AdminTable, Preferences, SortConfig, SortDirection, TablePrefs, defaults,
};
pub use infrastructure::persistence::{
    FileSettingsBackend, MemorySettingsBackend, PersistenceError, SettingsBackend,
};
