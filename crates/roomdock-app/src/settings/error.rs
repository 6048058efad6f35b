//! Settings error types.

use thiserror::Error;

/// Errors from a settings store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// Underlying storage failed (file system, database)
    #[error("I/O error: {0}")]
    Io(String),

    /// A writer panicked while holding the store lock
    #[error("settings lock poisoned")]
    Poisoned,
}
