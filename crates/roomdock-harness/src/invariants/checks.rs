//! Standard invariant checks.
//!
//! These invariants capture structural properties of the index and the dock
//! that must hold after every mutation.

use std::collections::{BTreeMap, BTreeSet};

use roomdock_core::{GroupKey, Position, RoomId};

use super::{Invariant, InvariantResult, IndexSnapshot};

/// Forward rows and reverse map describe the same membership.
///
/// A room appears in a group's rows iff that group is in the room's
/// membership set. A mismatch means a mutation updated one direction only.
pub struct MembershipConsistency;

impl Invariant for MembershipConsistency {
    fn name(&self) -> &'static str {
        "membership_consistency"
    }

    fn check(&self, state: &IndexSnapshot<'_>) -> InvariantResult {
        let mut forward: BTreeMap<&RoomId, BTreeSet<&GroupKey>> = BTreeMap::new();
        for (key, rooms) in &state.groups {
            for room in rooms {
                forward.entry(room).or_default().insert(key);
            }
        }

        for (room, groups) in &state.memberships {
            let rows = forward.remove(room).unwrap_or_default();
            if !rows.iter().copied().eq(groups.iter()) {
                return Err(self.violation(format!(
                    "room {room}: rows in {rows:?} but membership {groups:?}"
                )));
            }
        }

        if let Some((room, groups)) = forward.into_iter().next() {
            return Err(self.violation(format!("ghost room {room} in {groups:?}")));
        }
        Ok(())
    }
}

/// Every member room has data, and every room with data is a member.
pub struct RoomDataPresent;

impl Invariant for RoomDataPresent {
    fn name(&self) -> &'static str {
        "room_data_present"
    }

    fn check(&self, state: &IndexSnapshot<'_>) -> InvariantResult {
        let with_data: BTreeSet<&RoomId> = state.rooms.keys().collect();
        let members: BTreeSet<&RoomId> = state.memberships.keys().collect();
        if with_data != members {
            let diff: Vec<_> = with_data.symmetric_difference(&members).collect();
            return Err(self.violation(format!("data and membership disagree on {diff:?}")));
        }
        Ok(())
    }
}

/// Groups are strictly ordered by the policy.
pub struct GroupsSorted;

impl Invariant for GroupsSorted {
    fn name(&self) -> &'static str {
        "groups_sorted"
    }

    fn check(&self, state: &IndexSnapshot<'_>) -> InvariantResult {
        for pair in state.groups.windows(2) {
            let (a, b) = (&pair[0].0, &pair[1].0);
            if !state.policy.compare_groups(a, b).is_lt() {
                return Err(self.violation(format!(
                    "{a} not before {b} under {}",
                    state.policy.name()
                )));
            }
        }
        Ok(())
    }
}

/// Rows of every group are strictly ordered by the policy.
pub struct RoomsSorted;

impl Invariant for RoomsSorted {
    fn name(&self) -> &'static str {
        "rooms_sorted"
    }

    fn check(&self, state: &IndexSnapshot<'_>) -> InvariantResult {
        for (key, rooms) in &state.groups {
            for pair in rooms.windows(2) {
                let (Some(a), Some(b)) = (state.rooms.get(&pair[0]), state.rooms.get(&pair[1]))
                else {
                    // Missing data is reported by RoomDataPresent.
                    continue;
                };
                if !state.policy.compare_rooms(key, a, b).is_lt() {
                    return Err(self.violation(format!(
                        "group {key}: {} not before {} under {}",
                        a.id,
                        b.id,
                        state.policy.name()
                    )));
                }
            }
        }
        Ok(())
    }
}

/// User groups disappear with their last room.
pub struct NoEmptyUserGroups;

impl Invariant for NoEmptyUserGroups {
    fn name(&self) -> &'static str {
        "no_empty_user_groups"
    }

    fn check(&self, state: &IndexSnapshot<'_>) -> InvariantResult {
        match state.groups.iter().find(|(key, rooms)| rooms.is_empty() && !key.is_system()) {
            Some((key, _)) => Err(self.violation(format!("user group {key} is empty"))),
            None => Ok(()),
        }
    }
}

/// No group appears twice, and no room appears twice within a group.
pub struct NoDuplicates;

impl Invariant for NoDuplicates {
    fn name(&self) -> &'static str {
        "no_duplicates"
    }

    fn check(&self, state: &IndexSnapshot<'_>) -> InvariantResult {
        let mut keys = BTreeSet::new();
        for (key, rooms) in &state.groups {
            if !keys.insert(key) {
                return Err(self.violation(format!("group {key} listed twice")));
            }
            let mut seen = BTreeSet::new();
            if let Some(room) = rooms.iter().find(|room| !seen.insert(*room)) {
                return Err(self.violation(format!("room {room} listed twice in {key}")));
            }
        }
        Ok(())
    }
}

/// The dock's current node exists.
pub struct CurrentInBounds;

impl Invariant for CurrentInBounds {
    fn name(&self) -> &'static str {
        "current_in_bounds"
    }

    fn check(&self, state: &IndexSnapshot<'_>) -> InvariantResult {
        let Some(current) = state.dock.as_ref().and_then(|dock| dock.current) else {
            return Ok(());
        };
        let valid = match current {
            Position::Group(group) => group < state.groups.len(),
            Position::Room { group, row } => state.rows(group).is_some_and(|rows| row < rows.len()),
        };
        if valid {
            Ok(())
        } else {
            Err(self.violation(format!("current {current:?} outside the list")))
        }
    }
}

/// The dock title counts distinct rooms.
pub struct TitleMatchesRooms;

impl Invariant for TitleMatchesRooms {
    fn name(&self) -> &'static str {
        "title_matches_rooms"
    }

    fn check(&self, state: &IndexSnapshot<'_>) -> InvariantResult {
        let Some(dock) = &state.dock else { return Ok(()) };
        let expected = format!("Rooms ({})", state.rooms.len());
        if dock.title == expected {
            Ok(())
        } else {
            Err(self.violation(format!("title {:?}, expected {expected:?}", dock.title)))
        }
    }
}
