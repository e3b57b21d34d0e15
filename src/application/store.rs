//! The preferences store
//!
//! Owns the in-memory [`Preferences`] value as the single source of truth
//! for view state. The store loads one record from the settings backend at
//! startup, serves cloned snapshots, and commits every update back to
//! storage before the call returns. Storage failures never propagate to
//! callers: the in-memory value still updates and the session continues
//! with durability lost for that one change.

use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::{RwLock, broadcast};
use tracing::{info, warn};

use crate::application::events::{ChangeKind, ChangeNotifier, PreferencesChanged};
use crate::domain::columns;
use crate::domain::preferences::{
    AdminTable, Preferences, SortConfig, SortDirection, merge_over_defaults, shallow_merge,
};
use crate::infrastructure::persistence::SettingsBackend;

/// Storage key of the single persisted preferences record.
pub const STORAGE_KEY: &str = "view_config";

const EVENT_CAPACITY: usize = 32;

/// Shared handle to the view preferences.
///
/// Cloning is cheap; all clones observe the same value and feed the same
/// subscribers.
#[derive(Clone)]
pub struct PreferencesStore {
    backend: Arc<dyn SettingsBackend>,
    current: Arc<RwLock<Preferences>>,
    notifier: ChangeNotifier,
}

impl PreferencesStore {
    /// Load the store from `backend`.
    ///
    /// An absent record initializes and persists the documented defaults; a
    /// record that cannot be parsed falls back to defaults in memory only,
    /// with the failure logged. Never fails.
    pub async fn load(backend: Arc<dyn SettingsBackend>) -> Self {
        let initial = match backend.load(STORAGE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Value>(&raw).and_then(merge_over_defaults)
            {
                Ok(prefs) => {
                    info!("Loaded view preferences");
                    prefs
                }
                Err(err) => {
                    warn!("Stored view preferences are unreadable, using defaults: {err}");
                    Preferences::default()
                }
            },
            Ok(None) => {
                info!("No stored view preferences found, initializing defaults");
                let defaults = Preferences::default();
                persist(backend.as_ref(), &defaults).await;
                defaults
            }
            Err(err) => {
                warn!("Failed to read view preferences, using defaults: {err}");
                Preferences::default()
            }
        };

        Self {
            backend,
            current: Arc::new(RwLock::new(initial)),
            notifier: ChangeNotifier::new(EVENT_CAPACITY),
        }
    }

    /// Current value. Always succeeds.
    pub async fn snapshot(&self) -> Preferences {
        self.current.read().await.clone()
    }

    /// Subscribe to committed changes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PreferencesChanged> {
        self.notifier.subscribe()
    }

    /// Collapse or expand the sidebar.
    pub async fn set_sidebar_collapsed(&self, collapsed: bool) {
        self.commit(ChangeKind::Sidebar, |prefs| {
            prefs.sidebar.collapsed = collapsed;
        })
        .await;
    }

    /// Replace a table's sort column and direction.
    pub async fn set_table_sort(
        &self,
        table: AdminTable,
        key: impl Into<String>,
        direction: SortDirection,
    ) {
        let key = key.into();
        self.commit(ChangeKind::TableSort(table), move |prefs| {
            prefs.table_mut(table).sort_config = SortConfig { key, direction };
        })
        .await;
    }

    /// Header-click behavior: sorting by the current key flips the
    /// direction, a new key sorts ascending.
    pub async fn request_sort(&self, table: AdminTable, key: &str) {
        self.commit(ChangeKind::TableSort(table), |prefs| {
            let sort = &mut prefs.table_mut(table).sort_config;
            *sort = sort.toggled(key);
        })
        .await;
    }

    /// Replace a table's visible-column list.
    pub async fn set_visible_columns(&self, table: AdminTable, visible: Vec<String>) {
        self.commit(ChangeKind::VisibleColumns(table), move |prefs| {
            prefs.table_mut(table).visible_columns = visible;
        })
        .await;
    }

    /// Toggle one column off, or back on at its canonical slot.
    pub async fn toggle_column(&self, table: AdminTable, column: &str) {
        self.commit(ChangeKind::VisibleColumns(table), |prefs| {
            columns::toggle_column(
                table.canonical_columns(),
                &mut prefs.table_mut(table).visible_columns,
                column,
            );
        })
        .await;
    }

    /// Apply a typed in-place update and commit it.
    ///
    /// Every dedicated operation on this store is sugar over this one.
    pub async fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut Preferences),
    {
        self.commit(ChangeKind::Generic, updater).await;
    }

    /// Untyped escape hatch: compute a top-level patch from the current
    /// value and shallow-merge it in, with the same semantics as the
    /// load-time merge. Patches may introduce keys the model does not know;
    /// they are kept. A patch that breaks the typed model is dropped with a
    /// warning and the current value stands.
    pub async fn apply_patch<F>(&self, updater: F)
    where
        F: FnOnce(&Preferences) -> Map<String, Value>,
    {
        let snapshot = {
            let mut guard = self.current.write().await;
            let patch = updater(&guard);
            match shallow_merge(&guard, patch) {
                Ok(next) => {
                    *guard = next;
                    guard.clone()
                }
                Err(err) => {
                    warn!("Ignoring preferences patch that does not fit the model: {err}");
                    return;
                }
            }
        };

        persist(self.backend.as_ref(), &snapshot).await;
        self.notifier.notify(ChangeKind::Generic, snapshot);
    }

    /// Reset everything to the documented defaults.
    pub async fn reset_to_defaults(&self) {
        info!("Resetting view preferences to defaults");
        self.commit(ChangeKind::Reset, |prefs| {
            *prefs = Preferences::default();
        })
        .await;
    }

    async fn commit<F>(&self, kind: ChangeKind, updater: F)
    where
        F: FnOnce(&mut Preferences),
    {
        let snapshot = {
            let mut guard = self.current.write().await;
            updater(&mut guard);
            guard.clone()
        };

        persist(self.backend.as_ref(), &snapshot).await;
        self.notifier.notify(kind, snapshot);
    }
}

/// Write the full record back to storage, downgrading any failure to a log
/// line so the caller's update still completes.
async fn persist(backend: &dyn SettingsBackend, prefs: &Preferences) {
    let payload = match serde_json::to_string_pretty(prefs) {
        Ok(payload) => payload,
        Err(err) => {
            warn!("Failed to serialize view preferences: {err}");
            return;
        }
    };

    if let Err(err) = backend.save(STORAGE_KEY, &payload).await {
        warn!("Failed to persist view preferences, change is in-memory only: {err}");
    }
}
