//! Property-based tests for RoomGroupIndex.
//!
//! Arbitrary add/remove sequences must leave the forward and reverse maps in
//! agreement, keep every group sorted, and never lose or duplicate a room
//! across a reorder.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use roomdock_core::{
    GroupKey, OrderPolicy, Position, RoomGroupIndex, RoomId, RoomInfo, SortMode,
    group::{FAVOURITE_TAG, LOW_PRIORITY_TAG},
};

const GROUP_NAMES: &[&str] = &[FAVOURITE_TAG, LOW_PRIORITY_TAG, "u.work", "u.home", "u.play"];
const ROOM_NAMES: &[&str] = &["alpha", "Bravo", "charlie", "Delta", "alpha"];

#[derive(Debug, Clone)]
enum Op {
    Add { room: u8, name: u8, groups: BTreeSet<u8>, weight: Option<u8> },
    Remove { room: u8 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u8..8, 0u8..5, prop::collection::btree_set(0u8..5, 0..4), prop::option::of(0u8..4))
            .prop_map(|(room, name, groups, weight)| Op::Add { room, name, groups, weight }),
        1 => (0u8..8).prop_map(|room| Op::Remove { room }),
    ]
}

fn room_id(room: u8) -> RoomId {
    RoomId::new(format!("!r{room}:x"))
}

fn build(room: u8, name: u8, groups: &BTreeSet<u8>, weight: Option<u8>) -> (RoomInfo, Vec<GroupKey>) {
    let mut info = RoomInfo::new(room_id(room), ROOM_NAMES[name as usize]);
    let keys: Vec<GroupKey> = groups.iter().map(|g| GroupKey::from(GROUP_NAMES[*g as usize])).collect();
    for key in &keys {
        match weight {
            Some(w) => info = info.with_weighted_tag(key.as_str(), f64::from(w) / 4.0),
            None => info = info.with_tag(key.as_str()),
        }
    }
    (info, keys)
}

/// Apply ops to the index and to a plain membership map.
fn apply(ops: &[Op]) -> (RoomGroupIndex, BTreeMap<RoomId, BTreeSet<GroupKey>>) {
    let mut index = RoomGroupIndex::default();
    let mut expected = BTreeMap::new();
    for op in ops {
        match op {
            Op::Add { room, name, groups, weight } => {
                let (info, keys) = build(*room, *name, groups, *weight);
                let _ = index.add_room(info, keys.clone());
                if keys.is_empty() {
                    expected.remove(&room_id(*room));
                } else {
                    expected.insert(room_id(*room), keys.into_iter().collect());
                }
            },
            Op::Remove { room } => {
                let _ = index.remove_room(&room_id(*room));
                expected.remove(&room_id(*room));
            },
        }
    }
    (index, expected)
}

/// Membership as seen through the forward (group → rooms) direction.
fn forward_membership(index: &RoomGroupIndex) -> BTreeMap<RoomId, BTreeSet<GroupKey>> {
    let mut membership: BTreeMap<RoomId, BTreeSet<GroupKey>> = BTreeMap::new();
    for (key, rooms) in index.groups() {
        for room in rooms {
            membership.entry(room.clone()).or_default().insert(key.clone());
        }
    }
    membership
}

fn assert_sorted(index: &RoomGroupIndex) -> Result<(), TestCaseError> {
    let policy: &dyn OrderPolicy = index.policy();
    let keys: Vec<&GroupKey> = index.groups().map(|(key, _)| key).collect();
    for pair in keys.windows(2) {
        prop_assert!(policy.compare_groups(pair[0], pair[1]).is_lt());
    }
    for (key, rooms) in index.groups() {
        for pair in rooms.windows(2) {
            let (Some(a), Some(b)) = (index.room(&pair[0]), index.room(&pair[1])) else {
                return Err(TestCaseError::fail("row without room data"));
            };
            prop_assert!(policy.compare_rooms(key, a, b).is_lt());
        }
    }
    Ok(())
}

proptest! {
    /// Property: every room belongs exactly to the groups it was last assigned
    #[test]
    fn prop_no_ghost_memberships(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let (index, expected) = apply(&ops);

        prop_assert_eq!(forward_membership(&index), expected.clone());
        for (room, groups) in &expected {
            prop_assert_eq!(index.groups_of(room), Some(groups));
        }
        prop_assert_eq!(index.total_rooms(), expected.len());
    }

    /// Property: user groups are never empty
    #[test]
    fn prop_empty_groups_are_system_groups(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let (index, _) = apply(&ops);
        for (key, rooms) in index.groups() {
            prop_assert!(!rooms.is_empty() || key.is_system(), "empty user group {}", key);
        }
    }

    /// Property: groups and rows stay sorted under either policy
    #[test]
    fn prop_sorted_under_both_policies(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let (mut index, _) = apply(&ops);
        assert_sorted(&index)?;

        let _ = index.reorder(SortMode::ByName.policy());
        assert_sorted(&index)?;
    }

    /// Property: reorder neither loses nor duplicates rooms and keeps identity
    #[test]
    fn prop_reorder_preserves_rooms(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let (mut index, expected) = apply(&ops);

        let before: Vec<(GroupKey, RoomId)> = expected
            .iter()
            .flat_map(|(room, groups)| groups.iter().map(move |g| (g.clone(), room.clone())))
            .collect();

        let _ = index.reorder(SortMode::ByName.policy());
        prop_assert_eq!(forward_membership(&index), expected);

        for (group, room) in &before {
            let pos = index.locate(Some(group), room);
            prop_assert!(matches!(pos, Some(Position::Room { .. })), "expected a Room position");
            let Some(pos) = pos else { continue };
            prop_assert_eq!(index.group_at(pos), Ok(group));
            prop_assert_eq!(index.room_at(pos).map(|info| &info.id), Ok(room));
        }
    }

    /// Property: repeating an add leaves the index unchanged
    #[test]
    fn prop_add_is_idempotent(
        ops in prop::collection::vec(op_strategy(), 0..30),
        room in 0u8..8,
        name in 0u8..5,
        groups in prop::collection::btree_set(0u8..5, 1..4),
    ) {
        let (mut index, _) = apply(&ops);
        let (info, keys) = build(room, name, &groups, None);

        let _ = index.add_room(info.clone(), keys.clone());
        let once = index.to_string();
        let changes = index.add_room(info, keys);

        prop_assert!(changes.is_empty());
        prop_assert_eq!(index.to_string(), once);
    }

    /// Property: removed rooms are never located again
    #[test]
    fn prop_removed_rooms_not_found(ops in prop::collection::vec(op_strategy(), 0..60), room in 0u8..8) {
        let (mut index, _) = apply(&ops);
        let _ = index.remove_room(&room_id(room));

        prop_assert_eq!(index.locate(None, &room_id(room)), None);
        for (key, _) in index.groups() {
            prop_assert_eq!(index.locate(Some(key), &room_id(room)), None);
        }
    }
}
