//! Property-based tests for the dock state machine.
//!
//! Arbitrary mixes of upstream room events and user clicks must keep the
//! title in step with the set of rooms and never leave the selection
//! pointing outside the list.

use std::collections::BTreeSet;

use proptest::prelude::*;
use roomdock_app::{DockAction, DockConfig, DockEvent, MemorySettings, RoomListDock};
use roomdock_core::{ConnectionId, JoinState, Position, RoomId, RoomInfo, SortMode};

const TAGS: &[&str] = &["m.favourite", "m.lowpriority", "u.work", "u.home"];

#[derive(Debug, Clone)]
enum Step {
    Upsert { room: u8, connection: u8, state: u8, tags: BTreeSet<u8>, direct: bool },
    Remove { room: u8 },
    DropConnection { connection: u8 },
    Click { group: u8, row: Option<u8> },
    Sort { by_name: bool },
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => (0u8..8, 0u8..2, 0u8..4, prop::collection::btree_set(0u8..4, 0..3), any::<bool>())
            .prop_map(|(room, connection, state, tags, direct)| {
                Step::Upsert { room, connection, state, tags, direct }
            }),
        1 => (0u8..8).prop_map(|room| Step::Remove { room }),
        1 => (0u8..2).prop_map(|connection| Step::DropConnection { connection }),
        2 => (0u8..6, prop::option::of(0u8..4)).prop_map(|(group, row)| Step::Click { group, row }),
        1 => any::<bool>().prop_map(|by_name| Step::Sort { by_name }),
    ]
}

fn room_id(room: u8) -> RoomId {
    RoomId::new(format!("!r{room}:x"))
}

fn join_state(state: u8) -> JoinState {
    match state {
        0 => JoinState::Invite,
        1 => JoinState::Leave,
        2 => JoinState::Upgraded,
        _ => JoinState::Join,
    }
}

fn event(step: &Step) -> DockEvent {
    match step {
        Step::Upsert { room, connection, state, tags, direct } => {
            let mut info = RoomInfo::new(room_id(*room), format!("room {room}"))
                .with_connection(ConnectionId(u32::from(*connection)))
                .with_join_state(join_state(*state));
            for tag in tags {
                info = info.with_tag(TAGS[*tag as usize]);
            }
            if *direct {
                info = info.direct();
            }
            DockEvent::RoomChanged(info)
        },
        Step::Remove { room } => DockEvent::RoomRemoved { room_id: room_id(*room) },
        Step::DropConnection { connection } => {
            DockEvent::ConnectionRemoved { connection: ConnectionId(u32::from(*connection)) }
        },
        Step::Click { group, row } => DockEvent::Clicked(match row {
            Some(row) => Position::Room { group: *group as usize, row: *row as usize },
            None => Position::Group(*group as usize),
        }),
        Step::Sort { by_name } => {
            DockEvent::SortModeChanged(if *by_name { SortMode::ByName } else { SortMode::ByTag })
        },
    }
}

proptest! {
    /// Property: the title always counts the distinct rooms in the list
    #[test]
    fn prop_title_counts_distinct_rooms(steps in prop::collection::vec(step_strategy(), 0..60)) {
        let mut dock = RoomListDock::new(MemorySettings::new(), DockConfig::default());
        let mut live: BTreeSet<(u8, u8)> = BTreeSet::new();

        for step in &steps {
            match step {
                Step::Upsert { room, connection, .. } => {
                    live.retain(|(r, _)| r != room);
                    live.insert((*room, *connection));
                },
                Step::Remove { room } => live.retain(|(r, _)| r != room),
                Step::DropConnection { connection } => live.retain(|(_, c)| c != connection),
                Step::Click { .. } | Step::Sort { .. } => {},
            }

            let actions = dock.handle(event(step));
            let expected = format!("Rooms ({})", live.len());
            for action in &actions {
                if let DockAction::SetTitle(title) = action {
                    prop_assert_eq!(title, &expected);
                }
            }
            prop_assert_eq!(dock.title(), expected);
        }
    }

    /// Property: the current position always addresses a node of the list
    #[test]
    fn prop_current_stays_valid(steps in prop::collection::vec(step_strategy(), 0..60)) {
        let mut dock = RoomListDock::new(MemorySettings::new(), DockConfig::default());

        for step in &steps {
            let selected = dock.current_room().map(|room| room.id.clone());
            let actions = dock.handle(event(step));

            if let Some(position) = dock.current() {
                prop_assert!(dock.index().group_at(position).is_ok());
                if position.is_room() {
                    prop_assert!(dock.index().room_at(position).is_ok());
                }
            }
            for action in &actions {
                if let DockAction::SetCurrent(position) = action {
                    prop_assert_eq!(Some(*position), dock.current());
                }
            }

            // A remembered room is kept across mutations as long as it exists.
            if let Some(room_id) = selected
                && !matches!(step, Step::Click { .. })
                && dock.index().room(&room_id).is_some()
            {
                prop_assert_eq!(dock.current_room().map(|room| &room.id), Some(&room_id));
            }
        }
    }
}
