//! Change notification for committed preference updates
//!
//! A broadcast channel fans committed changes out to interested views, so
//! consumers re-render from the delivered snapshot instead of polling the
//! store. Subscription is in-process only; two running instances of the app
//! do not see each other's changes.

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::preferences::{AdminTable, Preferences};

/// Which part of the preferences tree an update touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Sidebar collapsed state
    Sidebar,
    /// A table's sort column or direction
    TableSort(AdminTable),
    /// A table's visible-column list
    VisibleColumns(AdminTable),
    /// An untyped or multi-field update
    Generic,
    /// Everything reset to defaults
    Reset,
}

/// A committed preferences change, delivered to subscribers.
#[derive(Debug, Clone)]
pub struct PreferencesChanged {
    /// What was changed
    pub kind: ChangeKind,
    /// The full value after the change
    pub preferences: Preferences,
    /// When the change was committed
    pub timestamp: DateTime<Utc>,
}

/// Fan-out of committed changes to subscribers.
#[derive(Clone)]
pub struct ChangeNotifier {
    sender: broadcast::Sender<PreferencesChanged>,
}

impl ChangeNotifier {
    /// Notifier with room for `capacity` undelivered events per subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Register a new subscriber. Only changes committed after this call
    /// are delivered.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PreferencesChanged> {
        self.sender.subscribe()
    }

    /// Broadcast a committed change.
    pub fn notify(&self, kind: ChangeKind, preferences: Preferences) {
        let event = PreferencesChanged {
            kind,
            preferences,
            timestamp: Utc::now(),
        };
        // Err only means there is no live subscriber right now.
        if self.sender.send(event).is_err() {
            debug!("Preferences change had no subscribers");
        }
    }
}
