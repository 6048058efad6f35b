//! Persistent key/value settings for dock UI state.
//!
//! The dock stores per-group expand/collapse state as plain string values
//! under hierarchical keys (`"UI/RoomsDock/<group key>"`). The trait is
//! synchronous and implementations share state through `Arc`, so clones read
//! and write the same underlying store.

mod error;
mod memory;
mod redb;

pub use error::SettingsError;
pub use memory::MemorySettings;

pub use self::redb::RedbSettings;

/// Key/value store for UI settings.
pub trait SettingsStore: Clone + Send + Sync + 'static {
    /// Value stored under `key`. `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError>;

    /// Store `value` under `key`, overwriting any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), SettingsError>;
}
