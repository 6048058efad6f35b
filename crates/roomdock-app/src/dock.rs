//! Room list dock state machine.
//!
//! This module defines [`RoomListDock`], which owns the [`RoomGroupIndex`]
//! behind the room list panel and everything around it that is not drawing:
//! which node is current, what the context menus allow, persisted expand
//! state of groups, and the dialogs waiting for an answer.
//!
//! This is a pure state machine: it consumes [`DockEvent`] inputs and
//! produces [`DockAction`] instructions for the view and the session.
//!
//! # Selection across mutations
//!
//! Positions shift whenever groups or rows are inserted or removed. Before
//! every index mutation the current node is remembered by identity (group
//! key and room id), and afterwards it is located again. The view is told
//! about the new position only if it moved, and the selection is cleared if
//! the node vanished.

use roomdock_core::{
    ConnectionId, GroupKey, IndexChange, Position, RoomGroupIndex, RoomId, RoomInfo, SortMode,
    grouping::{caption_to_tag, groups_for},
};
use tracing::{debug, error, info, warn};

use crate::{
    DockAction, DockConfig, DockEvent, GroupMenu, MenuCommand, MouseButton, RoomMenu,
    SelectionCache, SessionCommand, SettingsStore,
};

/// Settings value of an expanded group.
pub const EXPAND: &str = "expand";

/// Settings value of a collapsed group.
pub const COLLAPSE: &str = "collapse";

/// Room list dock state machine.
///
/// Pure state machine that processes events and produces actions. The only
/// side effect it performs itself is reading and writing expand state
/// through the [`SettingsStore`].
#[derive(Debug, Clone)]
pub struct RoomListDock<K: SettingsStore> {
    /// Grouped rooms.
    index: RoomGroupIndex,
    /// Persisted UI state.
    settings: K,
    /// Static configuration.
    config: DockConfig,
    /// Active sort mode.
    sort_mode: SortMode,
    /// Current node. `None` if nothing is selected.
    current: Option<Position>,
    /// Current node by identity while the index mutates.
    selection: SelectionCache,
    /// Room the add-tags prompt was opened for.
    pending_tags: Option<RoomId>,
    /// Room the forget confirmation was opened for.
    pending_forget: Option<RoomId>,
}

impl<K: SettingsStore> RoomListDock<K> {
    /// Create an empty dock.
    pub fn new(settings: K, config: DockConfig) -> Self {
        let sort_mode = config.sort_mode;
        Self {
            index: RoomGroupIndex::new(sort_mode.policy()),
            settings,
            config,
            sort_mode,
            current: None,
            selection: SelectionCache::new(),
            pending_tags: None,
            pending_forget: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: DockEvent) -> Vec<DockAction> {
        match event {
            DockEvent::ConnectionAdded { connection, rooms } => {
                info!(%connection, rooms = rooms.len(), "connection added");
                self.mutate(|index| {
                    rooms.into_iter().flat_map(|room| regroup(index, room)).collect()
                })
            },
            DockEvent::ConnectionRemoved { connection } => {
                let mut doomed: Vec<RoomId> = self
                    .index
                    .rooms()
                    .filter(|room| room.connection == connection)
                    .map(|room| room.id.clone())
                    .collect();
                doomed.sort();
                info!(%connection, rooms = doomed.len(), "connection removed");
                self.mutate(|index| doomed.iter().flat_map(|id| index.remove_room(id)).collect())
            },
            DockEvent::RoomAdded(room) | DockEvent::RoomChanged(room) => {
                self.mutate(|index| regroup(index, room))
            },
            DockEvent::RoomRemoved { room_id } => self.mutate(|index| index.remove_room(&room_id)),
            DockEvent::Activated(position) | DockEvent::Clicked(position) => self.select(position),
            DockEvent::Pressed { position, button } => self.press(position, button),
            DockEvent::Expanded(group) => self.store_expanded(group, true),
            DockEvent::Collapsed(group) => self.store_expanded(group, false),
            DockEvent::ContextMenuRequested(position) => self.context_menu(position),
            DockEvent::MenuTriggered(command) => self.trigger(command),
            DockEvent::TagsEntered(text) => self.add_tags(&text),
            DockEvent::ForgetConfirmed(confirmed) => self.forget(confirmed),
            DockEvent::SortModeChanged(mode) => {
                if mode == self.sort_mode {
                    return vec![];
                }
                self.sort_mode = mode;
                self.mutate(|index| index.reorder(mode.policy()))
            },
        }
    }

    /// Make `room_id` the current room.
    ///
    /// The current group is searched first, then the whole index. Does
    /// nothing if the room is already current or is not indexed.
    pub fn set_selected_room(&mut self, room_id: &RoomId) -> Vec<DockAction> {
        if self.current_room().is_some_and(|room| &room.id == room_id) {
            return vec![];
        }

        let group = self.current.and_then(|pos| self.index.group_at(pos).ok());
        match self.index.locate(group, room_id) {
            Some(position) => {
                self.current = Some(position);
                vec![DockAction::SetCurrent(position)]
            },
            None => {
                debug!(%room_id, "selected room not in the list");
                vec![]
            },
        }
    }

    /// Dock title, `"Rooms (N)"` with N distinct rooms.
    pub fn title(&self) -> String {
        format!("Rooms ({})", self.index.total_rooms())
    }

    /// Grouped rooms.
    pub fn index(&self) -> &RoomGroupIndex {
        &self.index
    }

    /// Current node. `None` if nothing is selected.
    pub fn current(&self) -> Option<Position> {
        self.current
    }

    /// Room at the current node. `None` if nothing or a group is current.
    pub fn current_room(&self) -> Option<&RoomInfo> {
        self.current.and_then(|pos| self.index.room_at(pos).ok())
    }

    /// Active sort mode.
    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    /// Settings store.
    pub fn settings(&self) -> &K {
        &self.settings
    }

    /// Whether a group starts expanded when inserted into the view.
    ///
    /// Reads the persisted state of `key`. System groups without state fall
    /// back to the pre-rename key, migrating its value on the way.
    pub fn is_expanded(&self, key: &GroupKey) -> bool {
        if key.is_legacy() {
            error!(%key, "group key uses the deprecated prefix");
        }

        let settings_key = self.settings_key(key.as_str());
        let mut state = self.read_setting(&settings_key);
        if state.is_none()
            && key.is_system()
            && let Some(legacy) = key.legacy_key()
        {
            state = self.migrate_setting(&self.settings_key(&legacy), &settings_key);
        }

        match state {
            Some(value) => value == EXPAND,
            None => key.as_str() == self.config.default_expanded_group,
        }
    }

    /// Run an index mutation, forwarding its changes and keeping the
    /// selection on the same node.
    fn mutate(
        &mut self,
        op: impl FnOnce(&mut RoomGroupIndex) -> Vec<IndexChange>,
    ) -> Vec<DockAction> {
        self.save_selection();
        let changes = op(&mut self.index);

        let mut actions = Vec::with_capacity(changes.len() + 2);
        let mut rows_changed = false;
        for change in changes {
            rows_changed |= change.alters_rows();
            let inserted = match &change {
                IndexChange::GroupInserted { group, key } => Some((*group, self.is_expanded(key))),
                _ => None,
            };
            actions.push(DockAction::Index(change));
            if let Some((group, expanded)) = inserted {
                actions.push(DockAction::SetExpanded { group, expanded });
            }
        }

        if rows_changed {
            actions.push(DockAction::SetTitle(self.title()));
        }
        actions.extend(self.restore_selection());
        actions
    }

    fn save_selection(&mut self) {
        let Some(position) = self.current else {
            self.selection.clear();
            return;
        };
        let group = self.index.group_at(position).ok().cloned();
        let room = self.index.room_at(position).ok().map(|room| room.id.clone());
        self.selection.save(group, room);
    }

    fn restore_selection(&mut self) -> Option<DockAction> {
        let saved = self.selection.take()?;
        let position = match (&saved.room, &saved.group) {
            (Some(room_id), group) => self.index.locate(group.as_ref(), room_id),
            (None, Some(group)) => self.index.group_position(group).map(Position::Group),
            (None, None) => None,
        };

        if position == self.current {
            return None;
        }
        self.current = position;
        Some(position.map_or(DockAction::ClearCurrent, DockAction::SetCurrent))
    }

    fn select(&mut self, position: Position) -> Vec<DockAction> {
        if let Err(err) = self.index.group_at(position) {
            debug!(?position, %err, "selection outside the list ignored");
            return vec![];
        }
        self.current = Some(position);
        match self.index.room_at(position) {
            Ok(room) => vec![DockAction::RoomSelected(room.id.clone())],
            Err(_) => vec![],
        }
    }

    fn press(&self, position: Position, button: MouseButton) -> Vec<DockAction> {
        if button != MouseButton::Middle {
            return vec![];
        }
        match self.index.room_at(position) {
            Ok(room) => {
                vec![DockAction::Session(SessionCommand::MarkAllRead { room_id: room.id.clone() })]
            },
            Err(_) => vec![],
        }
    }

    fn store_expanded(&self, group: usize, expanded: bool) -> Vec<DockAction> {
        let Ok(key) = self.index.group_at(Position::Group(group)) else {
            debug!(group, "expand state of unknown group ignored");
            return vec![];
        };
        let value = if expanded { EXPAND } else { COLLAPSE };
        if let Err(err) = self.settings.set(&self.settings_key(key.as_str()), value) {
            warn!(%key, %err, "failed to store expand state");
        }
        vec![]
    }

    fn context_menu(&mut self, position: Option<Position>) -> Vec<DockAction> {
        let Some(position) = position else { return vec![] };
        let Ok(key) = self.index.group_at(position) else { return vec![] };

        let action = match self.index.room_at(position) {
            Ok(room) => DockAction::ShowRoomMenu(RoomMenu::for_room(room)),
            Err(_) => DockAction::ShowGroupMenu(GroupMenu::for_group(key)),
        };
        self.current = Some(position);
        vec![action]
    }

    fn trigger(&mut self, command: MenuCommand) -> Vec<DockAction> {
        if command == MenuCommand::DeleteTag {
            return self.delete_tag();
        }

        let Some(room) = self.current_room() else {
            debug!(?command, "room command without a current room");
            return vec![];
        };
        if !RoomMenu::for_room(room).allows(command) {
            debug!(?command, room_id = %room.id, "menu command not allowed");
            return vec![];
        }

        let room_id = room.id.clone();
        match command {
            MenuCommand::MarkAsRead => {
                vec![DockAction::Session(SessionCommand::MarkAllRead { room_id })]
            },
            MenuCommand::AddTags => {
                self.pending_tags = Some(room_id.clone());
                vec![DockAction::PromptTags { room_id }]
            },
            MenuCommand::RoomSettings => vec![DockAction::OpenRoomSettings { room_id }],
            MenuCommand::CopyPermalink => {
                let target = room.canonical_alias.as_deref().unwrap_or(room_id.as_str());
                vec![DockAction::CopyToClipboard(format!("{}{target}", self.config.permalink_base))]
            },
            MenuCommand::Join => {
                let connection = room.connection;
                vec![DockAction::Session(SessionCommand::JoinRoom { connection, room_id })]
            },
            MenuCommand::Leave => vec![DockAction::Session(SessionCommand::LeaveRoom { room_id })],
            MenuCommand::Forget => {
                let room_name = room.display_name.clone();
                self.pending_forget = Some(room_id.clone());
                vec![DockAction::ConfirmForget { room_id, room_name }]
            },
            MenuCommand::DeleteTag => vec![],
        }
    }

    fn delete_tag(&self) -> Vec<DockAction> {
        let Some(position) = self.current.filter(|pos| !pos.is_room()) else {
            debug!("delete tag without a current group");
            return vec![];
        };
        let Ok(key) = self.index.group_at(position) else { return vec![] };
        if key.is_system() {
            debug!(%key, "system groups cannot be deleted");
            return vec![];
        }

        let rooms = self.index.rooms_in(position.group()).unwrap_or_default();
        rooms
            .iter()
            .filter_map(|room_id| self.index.room(room_id))
            .filter(|room| room.tags.contains_key(key.as_str()))
            .map(|room| {
                let mut tags = room.tags.clone();
                tags.remove(key.as_str());
                DockAction::Session(SessionCommand::SetTags { room_id: room.id.clone(), tags })
            })
            .collect()
    }

    fn add_tags(&mut self, text: &str) -> Vec<DockAction> {
        let Some(room_id) = self.pending_tags.take() else {
            debug!("tags entered without a prompt");
            return vec![];
        };
        let Some(room) = self.index.room(&room_id) else {
            debug!(%room_id, "tagged room vanished");
            return vec![];
        };

        let mut tags = room.tags.clone();
        for tag in text.split('\n').filter_map(caption_to_tag) {
            tags.entry(tag).or_default();
        }
        if tags == room.tags {
            return vec![];
        }
        vec![DockAction::Session(SessionCommand::SetTags { room_id, tags })]
    }

    fn forget(&mut self, confirmed: bool) -> Vec<DockAction> {
        let Some(room_id) = self.pending_forget.take() else { return vec![] };
        if !confirmed {
            return vec![];
        }
        let Some(connection) = self.connection_of(&room_id) else {
            debug!(%room_id, "forgotten room vanished");
            return vec![];
        };
        vec![DockAction::Session(SessionCommand::ForgetRoom { connection, room_id })]
    }

    fn connection_of(&self, room_id: &RoomId) -> Option<ConnectionId> {
        self.index.room(room_id).map(|room| room.connection)
    }

    fn settings_key(&self, key: &str) -> String {
        format!("{}/{key}", self.config.settings_group)
    }

    fn read_setting(&self, key: &str) -> Option<String> {
        self.settings.get(key).unwrap_or_else(|err| {
            warn!(key, %err, "failed to read setting");
            None
        })
    }

    /// Move a value from `from` to `to`, returning it.
    fn migrate_setting(&self, from: &str, to: &str) -> Option<String> {
        let value = self.read_setting(from)?;
        info!(from, to, "migrating group setting");
        if let Err(err) = self.settings.set(to, &value) {
            warn!(to, %err, "failed to store migrated setting");
            return Some(value);
        }
        if let Err(err) = self.settings.remove(from) {
            warn!(from, %err, "failed to remove migrated setting");
        }
        Some(value)
    }
}

/// Insert or update a room under the groups its state puts it in.
fn regroup(index: &mut RoomGroupIndex, room: RoomInfo) -> Vec<IndexChange> {
    let groups = groups_for(&room);
    index.add_room(room, groups)
}
