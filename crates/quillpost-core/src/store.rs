//! Persistence for update-check history and the auto-check preference.
//!
//! The medium is abstracted behind [`KeyValueStore`] so the coordinator can be
//! exercised against [`MemoryStore`] while the application uses
//! [`JsonFileStore`].

use std::collections::BTreeMap;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

pub const LAST_UPDATE_CHECK_KEY: &str = "last-update-check";
pub const AUTO_CHECK_UPDATES_KEY: &str = "auto-check-updates";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode stored values: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("storage is unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    fn io(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// String key-value storage that survives restarts.
///
/// Implementations must make each `set` all-or-nothing.
pub trait KeyValueStore: Send + Sync {
    /// # Errors
    /// Returns an error when the medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// # Errors
    /// Returns an error when the medium cannot be written; the previous value
    /// stays in place.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A JSON object on disk, rewritten through a temp file and an atomic rename.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file starts empty; an unreadable
    /// one is logged and replaced on the next write.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|error| {
                log::warn!(
                    "Ignoring unreadable update state in {}: {error}",
                    path.display()
                );
                BTreeMap::new()
            }),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(error) => return Err(StoreError::io("read", &path, error)),
        };

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let dir = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir).map_err(|e| StoreError::io("create", dir, e))?;

        let content = serde_json::to_vec_pretty(values).map_err(StoreError::Encode)?;
        let mut temp =
            tempfile::NamedTempFile::new_in(dir).map_err(|e| StoreError::io("create", dir, e))?;
        temp.write_all(&content)
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| StoreError::io("write", temp.path(), e))?;
        temp.persist(&self.path)
            .map_err(|e| StoreError::io("replace", &self.path, e.error))?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = values.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next)?;
        *values = next;
        Ok(())
    }
}

/// Typed view over the two keys the update check owns.
#[derive(Clone)]
pub struct UpdateCheckStore {
    backend: Arc<dyn KeyValueStore>,
}

impl UpdateCheckStore {
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// # Errors
    /// Returns an error when the backing store cannot be read.
    pub fn last_checked_at(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        let Some(raw) = self.backend.get(LAST_UPDATE_CHECK_KEY)? else {
            return Ok(None);
        };

        match DateTime::parse_from_rfc3339(raw.trim()) {
            Ok(parsed) => Ok(Some(parsed.with_timezone(&Utc))),
            Err(error) => {
                log::warn!("Ignoring unreadable {LAST_UPDATE_CHECK_KEY} value {raw:?}: {error}");
                Ok(None)
            }
        }
    }

    /// # Errors
    /// Returns an error when the backing store cannot be written.
    pub fn set_last_checked_at(&self, checked_at: DateTime<Utc>) -> Result<(), StoreError> {
        self.backend.set(
            LAST_UPDATE_CHECK_KEY,
            &checked_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        )
    }

    /// Defaults to `true` when the preference was never stored.
    ///
    /// # Errors
    /// Returns an error when the backing store cannot be read.
    pub fn auto_check_enabled(&self) -> Result<bool, StoreError> {
        Ok(self
            .backend
            .get(AUTO_CHECK_UPDATES_KEY)?
            .is_none_or(|raw| raw == "true"))
    }

    /// # Errors
    /// Returns an error when the backing store cannot be written.
    pub fn set_auto_check_enabled(&self, enabled: bool) -> Result<(), StoreError> {
        self.backend
            .set(AUTO_CHECK_UPDATES_KEY, if enabled { "true" } else { "false" })
    }
}

impl std::fmt::Debug for UpdateCheckStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateCheckStore").finish_non_exhaustive()
    }
}
