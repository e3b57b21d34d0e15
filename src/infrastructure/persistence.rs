//! Settings persistence port and backends
//!
//! The store talks to durable storage through the [`SettingsBackend`] port:
//! a synchronous-feeling key-value contract of read-record / write-record.
//! Production uses one JSON file per record under the per-user config
//! directory; tests use the in-memory backend, which can also simulate a
//! full or unavailable store.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;
use tracing::info;

/// Errors produced by a settings backend.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("settings record '{key}' could not be accessed: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("settings storage unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Key-value persistence port for serialized settings records.
///
/// `load` returns the record stored under a key, if any; `save` durably
/// replaces it. Callers own error recovery: no method here retries.
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    /// Read the record stored under `key`.
    async fn load(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Durably store `payload` under `key`.
    async fn save(&self, key: &str, payload: &str) -> Result<(), PersistenceError>;
}

/// File-backed settings storage: one `<key>.json` file per record.
pub struct FileSettingsBackend {
    root: PathBuf,
}

impl FileSettingsBackend {
    /// Backend rooted at an explicit directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Backend rooted at the per-user configuration directory.
    pub fn in_user_config_dir() -> Result<Self> {
        let root = dirs::config_dir()
            .context("Failed to get user config directory")?
            .join("cohort-prefs");
        Ok(Self::new(root))
    }

    /// Directory holding the record files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

#[async_trait]
impl SettingsBackend for FileSettingsBackend {
    async fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(self.record_path(key)).await {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(PersistenceError::Io {
                key: key.to_string(),
                source: err,
            }),
        }
    }

    async fn save(&self, key: &str, payload: &str) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|err| PersistenceError::Io {
                key: key.to_string(),
                source: err,
            })?;

        let path = self.record_path(key);
        fs::write(&path, payload)
            .await
            .map_err(|err| PersistenceError::Io {
                key: key.to_string(),
                source: err,
            })?;

        info!("Saved settings record to: {:?}", path);
        Ok(())
    }
}

/// In-memory settings storage for tests and ephemeral sessions.
///
/// `fail_saves` flips the backend into a quota-exceeded mode where every
/// write is rejected while reads keep working.
#[derive(Default)]
pub struct MemorySettingsBackend {
    records: Mutex<HashMap<String, String>>,
    failing: AtomicBool,
}

impl MemorySettingsBackend {
    /// Empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-seeded with a single record.
    #[must_use]
    pub fn with_record(key: &str, payload: &str) -> Self {
        let backend = Self::new();
        backend
            .records
            .lock()
            .expect("settings lock poisoned")
            .insert(key.to_string(), payload.to_string());
        backend
    }

    /// Make every subsequent `save` fail (or succeed again).
    pub fn fail_saves(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl SettingsBackend for MemorySettingsBackend {
    async fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self
            .records
            .lock()
            .expect("settings lock poisoned")
            .get(key)
            .cloned())
    }

    async fn save(&self, key: &str, payload: &str) -> Result<(), PersistenceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable {
                reason: "storage quota exceeded".to_string(),
            });
        }
        self.records
            .lock()
            .expect("settings lock poisoned")
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_backend_round_trips_a_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let backend = FileSettingsBackend::new(dir.path().join("settings"));

        assert!(backend.load("view_config").await.expect("load").is_none());

        backend
            .save("view_config", r#"{"sidebar":{"collapsed":true}}"#)
            .await
            .expect("save");

        let loaded = backend.load("view_config").await.expect("load");
        assert_eq!(
            loaded.as_deref(),
            Some(r#"{"sidebar":{"collapsed":true}}"#)
        );
    }

    #[tokio::test]
    async fn memory_backend_rejects_saves_in_failing_mode() {
        let backend = MemorySettingsBackend::with_record("view_config", "{}");
        backend.fail_saves(true);

        let err = backend
            .save("view_config", "{\"sidebar\":{}}")
            .await
            .expect_err("save must fail");
        assert!(matches!(err, PersistenceError::Unavailable { .. }));

        // Reads keep working and still see the old record.
        let loaded = backend.load("view_config").await.expect("load");
        assert_eq!(loaded.as_deref(), Some("{}"));
    }
}
