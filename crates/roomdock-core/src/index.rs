//! Two-level room index.
//!
//! [`RoomGroupIndex`] keeps an ordered list of groups, each holding an
//! ordered list of rooms, plus the reverse map from room to groups. Both
//! directions are updated together on every mutation.
//!
//! # Invariants
//!
//! - A room id appears in a group's row list iff that group is in the room's
//!   membership set.
//! - Groups are sorted by the active policy, and so are the rows of every
//!   group.
//! - A user group is never empty. System groups may be.
//! - Every room with a membership entry has a [`RoomInfo`] and vice versa.

use std::{
    cmp::Ordering,
    collections::{BTreeSet, HashMap},
    fmt,
    sync::Arc,
};

use tracing::debug;

use crate::{GroupKey, IndexChange, IndexError, OrderPolicy, RoomId, RoomInfo, SortMode};

/// Address of a node in the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// A group header.
    Group(usize),
    /// A room row inside a group.
    Room {
        /// Group position.
        group: usize,
        /// Row inside the group.
        row: usize,
    },
}

impl Position {
    /// Group part of the position.
    pub fn group(self) -> usize {
        match self {
            Self::Group(group) | Self::Room { group, .. } => group,
        }
    }

    /// Whether the position addresses a room row.
    pub fn is_room(self) -> bool {
        matches!(self, Self::Room { .. })
    }
}

#[derive(Debug, Clone)]
struct GroupEntry {
    key: GroupKey,
    rooms: Vec<RoomId>,
}

/// Ordered group → rooms hierarchy over a changing room set.
#[derive(Debug, Clone)]
pub struct RoomGroupIndex {
    /// Active ordering policy.
    policy: Arc<dyn OrderPolicy>,
    /// Groups in display order.
    groups: Vec<GroupEntry>,
    /// Latest snapshot of every indexed room.
    rooms: HashMap<RoomId, RoomInfo>,
    /// Reverse map: groups each room currently belongs to.
    memberships: HashMap<RoomId, BTreeSet<GroupKey>>,
}

impl Default for RoomGroupIndex {
    fn default() -> Self {
        Self::new(SortMode::default().policy())
    }
}

impl RoomGroupIndex {
    /// Create an empty index ordered by `policy`.
    pub fn new(policy: Arc<dyn OrderPolicy>) -> Self {
        Self { policy, groups: Vec::new(), rooms: HashMap::new(), memberships: HashMap::new() }
    }

    /// Insert or update a room so that it belongs to exactly `groups`.
    ///
    /// Missing groups are created at their sorted position. Groups the room
    /// was in but which are not named any more lose it, and are pruned if
    /// that leaves a user group empty. Changed room data re-sorts the room
    /// within the groups it stays in. Repeating a call with identical data
    /// and groups changes nothing. An empty `groups` removes the room.
    pub fn add_room(
        &mut self,
        room: RoomInfo,
        groups: impl IntoIterator<Item = GroupKey>,
    ) -> Vec<IndexChange> {
        let groups: BTreeSet<GroupKey> = groups.into_iter().collect();
        if groups.is_empty() {
            return self.remove_room(&room.id);
        }

        let room_id = room.id.clone();
        let old_groups = self.memberships.get(&room_id).cloned().unwrap_or_default();
        let info_changed = self.rooms.get(&room_id) != Some(&room);
        if !info_changed && old_groups == groups {
            debug!(%room_id, "room unchanged");
            return Vec::new();
        }

        debug!(%room_id, groups = groups.len(), "indexing room");
        let mut changes = Vec::new();

        for key in old_groups.difference(&groups) {
            self.detach(&room_id, key, &mut changes);
        }

        // Rows of kept groups are taken out before the data changes so the
        // reinsertion below sees a sorted list.
        let mut kept = Vec::new();
        if info_changed {
            for key in old_groups.intersection(&groups) {
                if let Some(group) = self.group_position(key)
                    && let Some(row) = self.row_of(group, &room_id)
                {
                    self.groups[group].rooms.remove(row);
                    kept.push((key.clone(), row));
                }
            }
        }

        self.rooms.insert(room_id.clone(), room);

        for (key, old_row) in kept {
            let Some(group) = self.group_position(&key) else { continue };
            let row = self.insertion_row(group, &room_id);
            self.groups[group].rooms.insert(row, room_id.clone());
            if row == old_row {
                changes.push(IndexChange::RoomChanged { group, row, room_id: room_id.clone() });
            } else {
                changes.push(IndexChange::RoomRemoved {
                    group,
                    row: old_row,
                    room_id: room_id.clone(),
                });
                changes.push(IndexChange::RoomInserted { group, row, room_id: room_id.clone() });
            }
        }

        for key in groups.difference(&old_groups) {
            self.attach(&room_id, key, &mut changes);
        }

        self.memberships.insert(room_id, groups);
        changes
    }

    /// Remove a room from every group it belongs to.
    ///
    /// Emptied user groups are pruned; emptied system groups stay. Unknown
    /// rooms are ignored.
    pub fn remove_room(&mut self, room_id: &RoomId) -> Vec<IndexChange> {
        let Some(groups) = self.memberships.remove(room_id) else {
            debug!(%room_id, "remove of unindexed room ignored");
            return Vec::new();
        };

        debug!(%room_id, groups = groups.len(), "removing room");
        let mut changes = Vec::new();
        for key in &groups {
            self.detach(room_id, key, &mut changes);
        }
        self.rooms.remove(room_id);
        changes
    }

    /// Re-sort every group and room under `policy`.
    pub fn reorder(&mut self, policy: Arc<dyn OrderPolicy>) -> Vec<IndexChange> {
        debug!(from = self.policy.name(), to = policy.name(), "reordering index");
        self.policy = policy;

        let policy = &self.policy;
        let rooms = &self.rooms;
        self.groups.sort_by(|a, b| policy.compare_groups(&a.key, &b.key));
        for entry in &mut self.groups {
            let key = &entry.key;
            entry.rooms.sort_by(|a, b| compare_ids(policy.as_ref(), key, rooms, a, b));
        }

        vec![IndexChange::LayoutChanged]
    }

    /// Position of a room.
    ///
    /// `group` is searched first when given and present; otherwise, or if the
    /// room is not in it, every group is scanned in display order. `None` if
    /// the room is not indexed.
    pub fn locate(&self, group: Option<&GroupKey>, room_id: &RoomId) -> Option<Position> {
        if let Some(key) = group
            && let Some(group) = self.group_position(key)
            && let Some(row) = self.row_of(group, room_id)
        {
            return Some(Position::Room { group, row });
        }

        if !self.memberships.contains_key(room_id) {
            return None;
        }

        self.groups.iter().enumerate().find_map(|(group, entry)| {
            entry.rooms.iter().position(|id| id == room_id).map(|row| Position::Room { group, row })
        })
    }

    /// Group at a position. For a room row, the group containing it.
    pub fn group_at(&self, position: Position) -> Result<&GroupKey, IndexError> {
        let entry = self.entry(position.group())?;
        if let Position::Room { group, row } = position
            && row >= entry.rooms.len()
        {
            return Err(IndexError::RowOutOfRange { group, row, len: entry.rooms.len() });
        }
        Ok(&entry.key)
    }

    /// Room at a position. Group positions are rejected.
    pub fn room_at(&self, position: Position) -> Result<&RoomInfo, IndexError> {
        let Position::Room { group, row } = position else {
            return Err(IndexError::NotARoom(position));
        };
        let entry = self.entry(group)?;
        let out_of_range = IndexError::RowOutOfRange { group, row, len: entry.rooms.len() };
        entry.rooms.get(row).and_then(|id| self.rooms.get(id)).ok_or(out_of_range)
    }

    /// Latest data of a room. `None` if not indexed.
    pub fn room(&self, room_id: &RoomId) -> Option<&RoomInfo> {
        self.rooms.get(room_id)
    }

    /// Every indexed room, in no particular order.
    pub fn rooms(&self) -> impl Iterator<Item = &RoomInfo> {
        self.rooms.values()
    }

    /// Groups a room belongs to. `None` if not indexed.
    pub fn groups_of(&self, room_id: &RoomId) -> Option<&BTreeSet<GroupKey>> {
        self.memberships.get(room_id)
    }

    /// Position of a group. `None` if it does not exist.
    pub fn group_position(&self, key: &GroupKey) -> Option<usize> {
        let policy = &self.policy;
        self.groups.binary_search_by(|entry| policy.compare_groups(&entry.key, key)).ok()
    }

    /// Room ids of the group at `group`, in display order.
    pub fn rooms_in(&self, group: usize) -> Option<&[RoomId]> {
        self.groups.get(group).map(|entry| entry.rooms.as_slice())
    }

    /// Groups with their rooms, in display order.
    pub fn groups(&self) -> impl Iterator<Item = (&GroupKey, &[RoomId])> {
        self.groups.iter().map(|entry| (&entry.key, entry.rooms.as_slice()))
    }

    /// Number of groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of distinct rooms, regardless of how many groups each is in.
    pub fn total_rooms(&self) -> usize {
        self.rooms.len()
    }

    /// Whether no room is indexed.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Active ordering policy.
    pub fn policy(&self) -> &dyn OrderPolicy {
        self.policy.as_ref()
    }

    fn entry(&self, group: usize) -> Result<&GroupEntry, IndexError> {
        self.groups.get(group).ok_or(IndexError::GroupOutOfRange { group, len: self.groups.len() })
    }

    fn row_of(&self, group: usize, room_id: &RoomId) -> Option<usize> {
        self.groups.get(group)?.rooms.iter().position(|id| id == room_id)
    }

    /// Row at which `room_id` belongs in `group`. The room must not be in the
    /// group yet.
    fn insertion_row(&self, group: usize, room_id: &RoomId) -> usize {
        let entry = &self.groups[group];
        entry.rooms.partition_point(|other| {
            compare_ids(self.policy.as_ref(), &entry.key, &self.rooms, other, room_id)
                == Ordering::Less
        })
    }

    fn attach(&mut self, room_id: &RoomId, key: &GroupKey, changes: &mut Vec<IndexChange>) {
        let group = match self.group_position(key) {
            Some(group) => group,
            None => {
                let policy = &self.policy;
                let group = self
                    .groups
                    .partition_point(|entry| policy.compare_groups(&entry.key, key) == Ordering::Less);
                self.groups.insert(group, GroupEntry { key: key.clone(), rooms: Vec::new() });
                changes.push(IndexChange::GroupInserted { group, key: key.clone() });
                group
            },
        };

        let row = self.insertion_row(group, room_id);
        self.groups[group].rooms.insert(row, room_id.clone());
        changes.push(IndexChange::RoomInserted { group, row, room_id: room_id.clone() });
    }

    fn detach(&mut self, room_id: &RoomId, key: &GroupKey, changes: &mut Vec<IndexChange>) {
        let Some(group) = self.group_position(key) else { return };
        let Some(row) = self.row_of(group, room_id) else { return };

        let entry = &mut self.groups[group];
        entry.rooms.remove(row);
        changes.push(IndexChange::RoomRemoved { group, row, room_id: room_id.clone() });

        if entry.rooms.is_empty() && !key.is_system() {
            self.groups.remove(group);
            changes.push(IndexChange::GroupRemoved { group, key: key.clone() });
        }
    }
}

/// Policy comparison of two indexed rooms by id.
fn compare_ids(
    policy: &dyn OrderPolicy,
    group: &GroupKey,
    rooms: &HashMap<RoomId, RoomInfo>,
    a: &RoomId,
    b: &RoomId,
) -> Ordering {
    match (rooms.get(a), rooms.get(b)) {
        (Some(x), Some(y)) => policy.compare_rooms(group, x, y),
        _ => a.cmp(b),
    }
}

/// Outline of the index: one line per group, rooms indented below.
impl fmt::Display for RoomGroupIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.groups {
            writeln!(f, "{}", entry.key)?;
            for room_id in &entry.rooms {
                let name = self.rooms.get(room_id).map_or("?", |info| info.display_name.as_str());
                writeln!(f, "  {name} ({room_id})")?;
            }
        }
        Ok(())
    }
}
