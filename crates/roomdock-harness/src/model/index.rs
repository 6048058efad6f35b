//! Reference model of the room index.
//!
//! Stores nothing but each room's data and group set, and derives the
//! ordered outline from scratch on every query by sorting. Slow and
//! obviously correct.

use std::collections::{BTreeMap, BTreeSet};

use roomdock_core::{GroupKey, Position, RoomId, RoomInfo, SortMode};
use tracing::trace;

use super::{Operation, OperationResult, model_group, model_room_id, sort_mode};

/// Reference implementation of the index.
#[derive(Debug, Clone, Default)]
pub struct ModelIndex {
    /// Active sort mode.
    mode: SortMode,
    /// Data and groups of every room.
    rooms: BTreeMap<RoomId, (RoomInfo, BTreeSet<GroupKey>)>,
    /// System groups ever created. They outlive their rooms.
    system_groups: BTreeSet<GroupKey>,
}

impl ModelIndex {
    /// Create an empty model ordered by tag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an operation.
    pub fn apply(&mut self, op: &Operation) -> OperationResult {
        trace!(?op, "model apply");
        match op {
            Operation::Upsert { room_id, spec } => {
                let info = spec.room_info(*room_id);
                let groups: BTreeSet<GroupKey> = spec.group_keys().into_iter().collect();
                if groups.is_empty() {
                    return self.remove(&info.id);
                }
                let unchanged = self.rooms.get(&info.id) == Some(&(info.clone(), groups.clone()));
                self.system_groups.extend(groups.iter().filter(|key| key.is_system()).cloned());
                self.rooms.insert(info.id.clone(), (info, groups));
                OperationResult::Applied { changed: !unchanged }
            },
            Operation::Remove { room_id } => self.remove(&model_room_id(*room_id)),
            Operation::Reorder { by_name } => {
                self.mode = sort_mode(*by_name);
                OperationResult::Applied { changed: true }
            },
            Operation::Locate { group, room_id } => {
                let group = group.map(model_group);
                OperationResult::Located(self.locate(group.as_ref(), &model_room_id(*room_id)))
            },
        }
    }

    /// Groups with their rows, in display order.
    pub fn outline(&self) -> Vec<(GroupKey, Vec<RoomId>)> {
        let policy = self.mode.policy();

        let mut keys: Vec<&GroupKey> = self
            .rooms
            .values()
            .flat_map(|(_, groups)| groups)
            .chain(&self.system_groups)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        keys.sort_by(|a, b| policy.compare_groups(a, b));

        keys.into_iter()
            .map(|key| {
                let mut rooms: Vec<&RoomInfo> = self
                    .rooms
                    .values()
                    .filter(|(_, groups)| groups.contains(key))
                    .map(|(info, _)| info)
                    .collect();
                rooms.sort_by(|a, b| policy.compare_rooms(key, a, b));
                (key.clone(), rooms.into_iter().map(|info| info.id.clone()).collect())
            })
            .collect()
    }

    /// Position of a room, searching `group` first.
    pub fn locate(&self, group: Option<&GroupKey>, room_id: &RoomId) -> Option<Position> {
        let outline = self.outline();
        let find = |index: usize, rooms: &[RoomId]| {
            rooms.iter().position(|id| id == room_id).map(|row| Position::Room { group: index, row })
        };

        if let Some(key) = group
            && let Some(index) = outline.iter().position(|(k, _)| k == key)
            && let Some(position) = find(index, &outline[index].1)
        {
            return Some(position);
        }
        outline.iter().enumerate().find_map(|(index, (_, rooms))| find(index, rooms))
    }

    /// Number of distinct rooms.
    pub fn total_rooms(&self) -> usize {
        self.rooms.len()
    }

    fn remove(&mut self, room_id: &RoomId) -> OperationResult {
        OperationResult::Applied { changed: self.rooms.remove(room_id).is_some() }
    }
}
