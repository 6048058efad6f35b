//! In-memory settings store for tests and ephemeral sessions.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use super::{SettingsError, SettingsStore};

/// Settings kept in a shared `HashMap`.
///
/// Clones share the same map. A poisoned lock surfaces as
/// [`SettingsError::Poisoned`] instead of a panic.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySettings {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `entries`.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = entries.into_iter().map(|(k, v)| (k.to_owned(), v.to_owned())).collect();
        Self { inner: Arc::new(Mutex::new(map)) }
    }

    /// Number of stored keys. Zero if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.lock().map_or(0, |map| map.len())
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, SettingsError> {
        self.inner.lock().map_err(|_| SettingsError::Poisoned)
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.lock()?.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SettingsError> {
        self.lock()?.remove(key);
        Ok(())
    }
}
