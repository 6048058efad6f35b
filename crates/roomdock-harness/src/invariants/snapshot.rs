//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture the index (and optionally the dock around it) at a
//! point in time so invariants run against one consistent view.

use std::collections::{BTreeMap, BTreeSet};

use roomdock_app::{RoomListDock, SettingsStore};
use roomdock_core::{GroupKey, OrderPolicy, Position, RoomGroupIndex, RoomId, RoomInfo};

/// Snapshot of an index and its ordering policy.
#[derive(Debug, Clone)]
pub struct IndexSnapshot<'a> {
    /// Policy the index claims to be sorted by.
    pub policy: &'a dyn OrderPolicy,
    /// Groups with their rows, in display order.
    pub groups: Vec<(GroupKey, Vec<RoomId>)>,
    /// Room data by id.
    pub rooms: BTreeMap<RoomId, RoomInfo>,
    /// Reverse map as reported by the index.
    pub memberships: BTreeMap<RoomId, BTreeSet<GroupKey>>,
    /// Dock state. `None` for a bare index.
    pub dock: Option<DockSnapshot>,
}

/// Dock state around the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockSnapshot {
    /// Title shown by the dock.
    pub title: String,
    /// Current node. `None` if nothing is selected.
    pub current: Option<Position>,
}

impl<'a> IndexSnapshot<'a> {
    /// Capture a bare index.
    pub fn from_index(index: &'a RoomGroupIndex) -> Self {
        let groups = index.groups().map(|(key, rooms)| (key.clone(), rooms.to_vec())).collect();
        let rooms = index.rooms().map(|room| (room.id.clone(), room.clone())).collect();
        let memberships = index
            .rooms()
            .filter_map(|room| {
                index.groups_of(&room.id).map(|groups| (room.id.clone(), groups.clone()))
            })
            .collect();
        Self { policy: index.policy(), groups, rooms, memberships, dock: None }
    }

    /// Capture a dock and its index.
    pub fn from_dock<K: SettingsStore>(dock: &'a RoomListDock<K>) -> Self {
        let mut snapshot = Self::from_index(dock.index());
        snapshot.dock = Some(DockSnapshot { title: dock.title(), current: dock.current() });
        snapshot
    }

    /// Rows of the group at `group`.
    pub fn rows(&self, group: usize) -> Option<&[RoomId]> {
        self.groups.get(group).map(|(_, rooms)| rooms.as_slice())
    }
}
