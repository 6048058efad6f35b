//! Incremental change notifications.
//!
//! Every index mutation returns the list of [`IndexChange`]s it performed, in
//! order, so a tree view can apply them one by one. Positions in a change
//! refer to the index state right after that change was applied.

use crate::{GroupKey, RoomId};

/// A single structural change of the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexChange {
    /// A group entry was created.
    GroupInserted {
        /// Position of the new group.
        group: usize,
        /// Key of the new group.
        key: GroupKey,
    },

    /// A group entry was removed.
    GroupRemoved {
        /// Position the group occupied.
        group: usize,
        /// Key of the removed group.
        key: GroupKey,
    },

    /// A room row was inserted into a group.
    RoomInserted {
        /// Group position.
        group: usize,
        /// Row of the room inside the group.
        row: usize,
        /// Inserted room.
        room_id: RoomId,
    },

    /// A room row was removed from a group.
    RoomRemoved {
        /// Group position.
        group: usize,
        /// Row the room occupied.
        row: usize,
        /// Removed room.
        room_id: RoomId,
    },

    /// Room data changed without moving the row.
    RoomChanged {
        /// Group position.
        group: usize,
        /// Row of the room.
        row: usize,
        /// Changed room.
        room_id: RoomId,
    },

    /// Everything may have moved; views must re-read the whole index.
    LayoutChanged,
}

impl IndexChange {
    /// Whether the change adds or removes room rows.
    pub fn alters_rows(&self) -> bool {
        matches!(self, Self::RoomInserted { .. } | Self::RoomRemoved { .. })
    }
}
