//! Fuzz target for the dock state machine
//!
//! # Strategy
//!
//! - Room upserts and removals across two connections
//! - Clicks, presses and context menus on arbitrary (often invalid) positions
//! - Menu commands and prompt answers in any order
//! - Sort mode switches
//!
//! # Invariants
//!
//! - The dock never panics
//! - The current position always addresses a node of the list
//! - The title always counts the distinct rooms

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use roomdock_app::{
    DockConfig, DockEvent, MemorySettings, MenuCommand, MouseButton, RoomListDock, Runtime,
};
use roomdock_core::{ConnectionId, JoinState, Position, SortMode};
use roomdock_harness::{IndexSnapshot, InvariantRegistry, RoomSpec, SimSession, model_room_id};

#[derive(Debug, Clone, Arbitrary)]
enum FuzzEvent {
    Upsert { room: u8, connection: bool, state: u8, spec: RoomSpec },
    Remove { room: u8 },
    DropConnection { connection: bool },
    Click { group: u8, row: Option<u8> },
    MiddlePress { group: u8, row: u8 },
    ContextMenu { group: u8, row: Option<u8> },
    Menu(u8),
    Tags(String),
    Forget(bool),
    Sort(bool),
    Expand { group: u8, expanded: bool },
}

fn position(group: u8, row: Option<u8>) -> Position {
    match row {
        Some(row) => Position::Room { group: group as usize, row: row as usize },
        None => Position::Group(group as usize),
    }
}

fn menu_command(choice: u8) -> MenuCommand {
    match choice % 8 {
        0 => MenuCommand::MarkAsRead,
        1 => MenuCommand::AddTags,
        2 => MenuCommand::RoomSettings,
        3 => MenuCommand::CopyPermalink,
        4 => MenuCommand::Join,
        5 => MenuCommand::Leave,
        6 => MenuCommand::Forget,
        _ => MenuCommand::DeleteTag,
    }
}

fn to_event(event: FuzzEvent) -> DockEvent {
    match event {
        FuzzEvent::Upsert { room, connection, state, spec } => {
            let join_state = match state % 4 {
                0 => JoinState::Invite,
                1 => JoinState::Leave,
                2 => JoinState::Upgraded,
                _ => JoinState::Join,
            };
            let info = spec
                .room_info(room % 16)
                .with_connection(ConnectionId(u32::from(connection)))
                .with_join_state(join_state);
            DockEvent::RoomChanged(info)
        },
        FuzzEvent::Remove { room } => DockEvent::RoomRemoved { room_id: model_room_id(room % 16) },
        FuzzEvent::DropConnection { connection } => {
            DockEvent::ConnectionRemoved { connection: ConnectionId(u32::from(connection)) }
        },
        FuzzEvent::Click { group, row } => DockEvent::Clicked(position(group, row)),
        FuzzEvent::MiddlePress { group, row } => {
            DockEvent::Pressed { position: position(group, Some(row)), button: MouseButton::Middle }
        },
        FuzzEvent::ContextMenu { group, row } => {
            DockEvent::ContextMenuRequested(Some(position(group, row)))
        },
        FuzzEvent::Menu(choice) => DockEvent::MenuTriggered(menu_command(choice)),
        FuzzEvent::Tags(text) => DockEvent::TagsEntered(text),
        FuzzEvent::Forget(confirmed) => DockEvent::ForgetConfirmed(confirmed),
        FuzzEvent::Sort(by_name) => {
            DockEvent::SortModeChanged(if by_name { SortMode::ByName } else { SortMode::ByTag })
        },
        FuzzEvent::Expand { group, expanded: true } => DockEvent::Expanded(group as usize),
        FuzzEvent::Expand { group, expanded: false } => DockEvent::Collapsed(group as usize),
    }
}

fuzz_target!(|events: Vec<FuzzEvent>| {
    let registry = InvariantRegistry::standard();
    let dock = RoomListDock::new(MemorySettings::new(), DockConfig::default());
    let mut runtime = Runtime::new(SimSession::new(), dock);

    for event in events.into_iter().take(256) {
        let _ = runtime.handle(to_event(event));
        registry.assert_all(&IndexSnapshot::from_dock(runtime.dock()), "in fuzz run");
    }
});
