//! Dock configuration.

use roomdock_core::{SortMode, group::FAVOURITE_TAG};

/// Default settings group for persisted dock state.
pub const DEFAULT_SETTINGS_GROUP: &str = "UI/RoomsDock";

/// Default permalink prefix.
pub const DEFAULT_PERMALINK_BASE: &str = "https://matrix.to/#/";

/// Dock configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockConfig {
    /// Prefix of every settings key the dock writes.
    pub settings_group: String,
    /// Group expanded when no state was persisted for it.
    pub default_expanded_group: String,
    /// Prefix of copied room links.
    pub permalink_base: String,
    /// Initial sort mode.
    pub sort_mode: SortMode,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            settings_group: DEFAULT_SETTINGS_GROUP.to_owned(),
            default_expanded_group: FAVOURITE_TAG.to_owned(),
            permalink_base: DEFAULT_PERMALINK_BASE.to_owned(),
            sort_mode: SortMode::default(),
        }
    }
}
