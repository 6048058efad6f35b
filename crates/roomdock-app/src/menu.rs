//! Context menu state.
//!
//! Menus are computed from the targeted node when requested and handed to
//! the view as plain data; the view only has to draw them.

use roomdock_core::{GroupKey, JoinState, RoomId, RoomInfo};

use crate::MenuCommand;

/// Label of the leave entry for joined or left rooms.
pub const LEAVE_LABEL: &str = "Leave room";

/// Label of the leave entry for invitations.
pub const REJECT_INVITATION_LABEL: &str = "Reject invitation";

/// State of the room context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMenu {
    /// Room the menu targets.
    pub room_id: RoomId,
    /// "Mark room as read" is enabled.
    pub mark_as_read_enabled: bool,
    /// "Add tags..." is enabled.
    pub add_tags_enabled: bool,
    /// "Join room" is enabled.
    pub join_enabled: bool,
    /// Label of the leave entry.
    pub leave_label: &'static str,
    /// Leave entry is enabled.
    pub leave_enabled: bool,
    /// "Forget room" is shown.
    pub forget_visible: bool,
}

impl RoomMenu {
    /// Menu state for a room.
    pub fn for_room(room: &RoomInfo) -> Self {
        let joined = room.join_state == JoinState::Join;
        let invited = room.join_state == JoinState::Invite;
        Self {
            room_id: room.id.clone(),
            mark_as_read_enabled: joined,
            add_tags_enabled: joined,
            join_enabled: !joined,
            leave_label: if invited { REJECT_INVITATION_LABEL } else { LEAVE_LABEL },
            leave_enabled: room.join_state != JoinState::Leave,
            forget_visible: !invited,
        }
    }

    /// Whether `command` can be triggered from this menu.
    pub fn allows(&self, command: MenuCommand) -> bool {
        match command {
            MenuCommand::MarkAsRead => self.mark_as_read_enabled,
            MenuCommand::AddTags => self.add_tags_enabled,
            MenuCommand::RoomSettings | MenuCommand::CopyPermalink => true,
            MenuCommand::Join => self.join_enabled,
            MenuCommand::Leave => self.leave_enabled,
            MenuCommand::Forget => self.forget_visible,
            MenuCommand::DeleteTag => false,
        }
    }
}

/// State of the group context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMenu {
    /// Group the menu targets.
    pub group: GroupKey,
    /// "Remove tag" is enabled. System groups cannot be removed.
    pub delete_tag_enabled: bool,
}

impl GroupMenu {
    /// Menu state for a group.
    pub fn for_group(group: &GroupKey) -> Self {
        Self { group: group.clone(), delete_tag_enabled: !group.is_system() }
    }
}
