//! Redb-backed settings store.
//!
//! Settings survive restarts. Every write runs in its own transaction.

use std::{path::Path, sync::Arc};

use redb::{Database, TableDefinition};

use super::{SettingsError, SettingsStore};

/// Table: settings
/// Key: hierarchical settings key (`"UI/RoomsDock/m.favourite"`)
/// Value: setting value
const SETTINGS: TableDefinition<&str, &str> = TableDefinition::new("settings");

/// Durable settings backed by Redb.
///
/// Thread-safe through Redb's internal locking. Clone is cheap (Arc).
#[derive(Clone)]
pub struct RedbSettings {
    db: Arc<Database>,
}

impl RedbSettings {
    /// Open or create a settings database at the given path.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Io` if the database cannot be opened or
    /// created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let db = Database::create(path.as_ref()).map_err(|e| SettingsError::Io(e.to_string()))?;

        let txn = db.begin_write().map_err(|e| SettingsError::Io(e.to_string()))?;
        {
            let _ = txn.open_table(SETTINGS).map_err(|e| SettingsError::Io(e.to_string()))?;
        }
        txn.commit().map_err(|e| SettingsError::Io(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl SettingsStore for RedbSettings {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        let txn = self.db.begin_read().map_err(|e| SettingsError::Io(e.to_string()))?;
        let table = txn.open_table(SETTINGS).map_err(|e| SettingsError::Io(e.to_string()))?;

        let value = table.get(key).map_err(|e| SettingsError::Io(e.to_string()))?;
        Ok(value.map(|guard| guard.value().to_owned()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        let txn = self.db.begin_write().map_err(|e| SettingsError::Io(e.to_string()))?;
        {
            let mut table =
                txn.open_table(SETTINGS).map_err(|e| SettingsError::Io(e.to_string()))?;
            table.insert(key, value).map_err(|e| SettingsError::Io(e.to_string()))?;
        }
        txn.commit().map_err(|e| SettingsError::Io(e.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), SettingsError> {
        let txn = self.db.begin_write().map_err(|e| SettingsError::Io(e.to_string()))?;
        {
            let mut table =
                txn.open_table(SETTINGS).map_err(|e| SettingsError::Io(e.to_string()))?;
            table.remove(key).map_err(|e| SettingsError::Io(e.to_string()))?;
        }
        txn.commit().map_err(|e| SettingsError::Io(e.to_string()))
    }
}
