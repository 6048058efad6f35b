//! Dock side-effects and intents.
//!
//! This module defines the [`DockAction`] enum, which represents instructions
//! produced by the [`crate::RoomListDock`] state machine: presentation updates
//! for the view and [`SessionCommand`]s for the upstream session.

use roomdock_core::{ConnectionId, IndexChange, Position, RoomId, Tags};

use crate::{GroupMenu, RoomMenu};

/// Fire-and-forget commands for the upstream session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Join a room.
    JoinRoom {
        /// Connection to join from.
        connection: ConnectionId,
        /// Room to join.
        room_id: RoomId,
    },

    /// Leave a room or reject an invitation.
    LeaveRoom {
        /// Room to leave.
        room_id: RoomId,
    },

    /// Forget a room.
    ForgetRoom {
        /// Connection the room belongs to.
        connection: ConnectionId,
        /// Room to forget.
        room_id: RoomId,
    },

    /// Replace the tags of a room.
    SetTags {
        /// Target room.
        room_id: RoomId,
        /// Full new tag set.
        tags: Tags,
    },

    /// Mark every message of a room as read.
    MarkAllRead {
        /// Target room.
        room_id: RoomId,
    },
}

/// Actions produced by the dock state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum DockAction {
    /// Structural index change for the tree view.
    Index(IndexChange),

    /// Update the dock title.
    SetTitle(String),

    /// Make the position current and scroll to it.
    SetCurrent(Position),

    /// Clear the current position.
    ClearCurrent,

    /// Expand or collapse a group.
    SetExpanded {
        /// Group position.
        group: usize,
        /// Whether the group is expanded.
        expanded: bool,
    },

    /// A room was selected by the user.
    RoomSelected(RoomId),

    /// Show the room context menu.
    ShowRoomMenu(RoomMenu),

    /// Show the group context menu.
    ShowGroupMenu(GroupMenu),

    /// Ask the user for tags to add to a room.
    PromptTags {
        /// Room the tags are for.
        room_id: RoomId,
    },

    /// Ask the user to confirm forgetting a room.
    ConfirmForget {
        /// Room to forget.
        room_id: RoomId,
        /// Display name for the prompt.
        room_name: String,
    },

    /// Open the room settings dialog.
    OpenRoomSettings {
        /// Room to configure.
        room_id: RoomId,
    },

    /// Put text on the clipboard.
    CopyToClipboard(String),

    /// Command for the upstream session.
    Session(SessionCommand),
}
