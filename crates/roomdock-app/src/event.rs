//! Dock input events.
//!
//! This module defines [`DockEvent`], the full set of inputs that drive the
//! [`crate::RoomListDock`] state machine.
//!
//! Events originate from two distinct sources:
//! - Upstream session notifications (connections and rooms coming and going).
//! - User interactions with the room tree (clicks, menus, dialogs).

use roomdock_core::{ConnectionId, Position, RoomId, RoomInfo, SortMode};

/// Mouse button of a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Middle button (marks the room as read).
    Middle,
    /// Secondary button.
    Right,
}

/// Entries of the room and group context menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    /// Mark every message of the room as read.
    MarkAsRead,
    /// Prompt for tags to add to the room.
    AddTags,
    /// Open the room settings dialog.
    RoomSettings,
    /// Copy a matrix.to link to the room.
    CopyPermalink,
    /// Join the room.
    Join,
    /// Leave the room or reject the invitation.
    Leave,
    /// Forget the room (after confirmation).
    Forget,
    /// Remove the group's tag from every room in it.
    DeleteTag,
}

/// Events processed by the dock state machine.
#[derive(Debug, Clone)]
pub enum DockEvent {
    /// A connection was attached along with its current rooms.
    ConnectionAdded {
        /// Connection identifier.
        connection: ConnectionId,
        /// Rooms known to the connection.
        rooms: Vec<RoomInfo>,
    },

    /// A connection was detached; all of its rooms go away.
    ConnectionRemoved {
        /// Connection identifier.
        connection: ConnectionId,
    },

    /// A room appeared.
    RoomAdded(RoomInfo),

    /// Room state changed (name, join state, tags, counters).
    RoomChanged(RoomInfo),

    /// A room disappeared.
    RoomRemoved {
        /// Removed room.
        room_id: RoomId,
    },

    /// Row activated (keyboard or double click).
    Activated(Position),

    /// Row clicked.
    Clicked(Position),

    /// Mouse button pressed on a row.
    Pressed {
        /// Pressed row.
        position: Position,
        /// Pressed button.
        button: MouseButton,
    },

    /// Group at the given position was expanded.
    Expanded(usize),

    /// Group at the given position was collapsed.
    Collapsed(usize),

    /// Context menu requested. `None` if requested outside any row.
    ContextMenuRequested(Option<Position>),

    /// Context menu entry triggered.
    MenuTriggered(MenuCommand),

    /// Text entered in the add-tags prompt, one tag per line.
    TagsEntered(String),

    /// Answer to the forget confirmation.
    ForgetConfirmed(bool),

    /// Sort mode switched.
    SortModeChanged(SortMode),
}
