//! Scenario tests for RoomGroupIndex.
//!
//! Walks through the add/remove/reorder/locate lifecycle the room list goes
//! through, checking both positions and the emitted changes.

use roomdock_core::{
    GroupKey, IndexChange, JoinState, Position, RoomGroupIndex, RoomId, RoomInfo, SortMode,
    group::{FAVOURITE_TAG, INVITE_GROUP, LEFT_GROUP},
    grouping::groups_for,
};

fn key(k: &str) -> GroupKey {
    GroupKey::from(k)
}

fn id(i: &str) -> RoomId {
    RoomId::from(i)
}

/// Index grouped the way the room list groups rooms.
fn add(index: &mut RoomGroupIndex, room: RoomInfo) -> Vec<IndexChange> {
    let groups = groups_for(&room);
    index.add_room(room, groups)
}

#[test]
fn favourites_and_user_groups() {
    let mut index = RoomGroupIndex::default();

    let _ = index.add_room(RoomInfo::new("!a:x", "A"), [key(FAVOURITE_TAG)]);
    let _ = index.add_room(RoomInfo::new("!b:x", "B"), [key(FAVOURITE_TAG), key("work")]);

    let found = index.locate(None, &id("!b:x"));
    let group = found.map(|pos| index.group_at(pos).map(GroupKey::as_str));
    assert!(matches!(group, Some(Ok(FAVOURITE_TAG | "work"))));

    let _ = index.remove_room(&id("!b:x"));
    assert_eq!(index.locate(None, &id("!b:x")), None);
    assert_eq!(index.group_position(&key("work")), None);

    let favourites = index.group_position(&key(FAVOURITE_TAG));
    assert_eq!(favourites, Some(0));
    assert_eq!(index.rooms_in(0), Some(&[id("!a:x")][..]));
}

#[test]
fn outline_follows_group_priority() {
    let mut index = RoomGroupIndex::default();
    let _ = add(&mut index, RoomInfo::new("!a:x", "Alpha").with_tag(FAVOURITE_TAG));
    let _ = add(&mut index, RoomInfo::new("!b:x", "Bravo").with_tag(FAVOURITE_TAG).with_tag("u.work"));
    let _ = add(&mut index, RoomInfo::new("!c:x", "charlie").with_join_state(JoinState::Invite));

    insta::assert_snapshot!(index.to_string().trim_end(), @r"
    im.quotient.invite
      charlie (!c:x)
    m.favourite
      Alpha (!a:x)
      Bravo (!b:x)
    u.work
      Bravo (!b:x)
    ");
}

#[test]
fn join_state_change_moves_room_between_system_groups() {
    let mut index = RoomGroupIndex::default();
    let invite = RoomInfo::new("!a:x", "A").with_join_state(JoinState::Invite);
    let _ = add(&mut index, invite.clone());

    let left = invite.with_join_state(JoinState::Leave);
    let changes = add(&mut index, left);

    // Invite group is a system group and survives empty.
    assert_eq!(changes, vec![
        IndexChange::RoomRemoved { group: 0, row: 0, room_id: id("!a:x") },
        IndexChange::GroupInserted { group: 1, key: key(LEFT_GROUP) },
        IndexChange::RoomInserted { group: 1, row: 0, room_id: id("!a:x") },
    ]);
    assert_eq!(index.group_position(&key(INVITE_GROUP)), Some(0));
    assert_eq!(index.rooms_in(0).map(<[RoomId]>::len), Some(0));
    assert_eq!(index.locate(None, &id("!a:x")), Some(Position::Room { group: 1, row: 0 }));
}

#[test]
fn reorder_keeps_rooms_and_identity() {
    let mut index = RoomGroupIndex::default();
    let _ = add(&mut index, RoomInfo::new("!z:x", "Zulu").with_weighted_tag(FAVOURITE_TAG, 0.1));
    let _ = add(&mut index, RoomInfo::new("!a:x", "Alpha").with_weighted_tag(FAVOURITE_TAG, 0.9));

    let favourites = key(FAVOURITE_TAG);
    assert_eq!(
        index.locate(Some(&favourites), &id("!z:x")),
        Some(Position::Room { group: 0, row: 0 })
    );

    let changes = index.reorder(SortMode::ByName.policy());
    assert_eq!(changes, vec![IndexChange::LayoutChanged]);

    let pos = index.locate(Some(&favourites), &id("!z:x"));
    assert_eq!(pos, Some(Position::Room { group: 0, row: 1 }));
    let room = pos.map(|p| index.room_at(p).map(|r| r.id.clone()));
    assert_eq!(room, Some(Ok(id("!z:x"))));
    assert_eq!(index.total_rooms(), 2);
}

#[test]
fn remembered_selection_of_removed_room_is_not_found() {
    let mut index = RoomGroupIndex::default();
    let _ = add(&mut index, RoomInfo::new("!a:x", "A").with_tag("u.work"));
    let remembered = (key("u.work"), id("!a:x"));
    assert!(index.locate(Some(&remembered.0), &remembered.1).is_some());

    let _ = index.remove_room(&id("!a:x"));
    let _ = index.reorder(SortMode::ByTag.policy());

    assert_eq!(index.locate(Some(&remembered.0), &remembered.1), None);
}

#[test]
fn total_rooms_counts_distinct_rooms() {
    let mut index = RoomGroupIndex::default();
    let _ = add(&mut index, RoomInfo::new("!a:x", "A").with_tag("u.one").with_tag("u.two").direct());
    let _ = add(&mut index, RoomInfo::new("!b:x", "B"));

    assert_eq!(index.total_rooms(), 2);
    assert_eq!(index.group_count(), 4);
    let rows: usize = index.groups().map(|(_, rooms)| rooms.len()).sum();
    assert_eq!(rows, 4);
}

#[test]
fn repeated_add_with_nan_weight_is_quiet() {
    let mut index = RoomGroupIndex::default();
    let room = RoomInfo::new("!a:x", "A").with_weighted_tag("u.work", f64::NAN);

    assert!(!add(&mut index, room.clone()).is_empty());
    assert!(add(&mut index, room).is_empty());
}
