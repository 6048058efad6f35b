//! Runtime wiring the dock to a session.
//!
//! The Runtime feeds events to the [`RoomListDock`], executes the
//! [`SessionCommand`]s it produces against a [`Session`], and hands every
//! other action back to the caller for presentation.

use roomdock_core::RoomId;
use tracing::trace;

use crate::{DockAction, DockEvent, RoomListDock, Session, SessionCommand, SettingsStore};

/// Runtime that orchestrates a dock and its session.
///
/// # Type Parameters
///
/// - `S`: Upstream session
/// - `K`: Settings store of the dock
pub struct Runtime<S, K>
where
    S: Session,
    K: SettingsStore,
{
    session: S,
    dock: RoomListDock<K>,
}

impl<S, K> Runtime<S, K>
where
    S: Session,
    K: SettingsStore,
{
    /// Create a runtime around an existing dock.
    pub fn new(session: S, dock: RoomListDock<K>) -> Self {
        Self { session, dock }
    }

    /// Process an event, executing session commands.
    ///
    /// Returns the presentation actions, in order.
    ///
    /// # Errors
    ///
    /// Returns the first session error. Actions after the failing command
    /// are dropped.
    pub fn handle(&mut self, event: DockEvent) -> Result<Vec<DockAction>, S::Error> {
        let actions = self.dock.handle(event);
        self.process_actions(actions)
    }

    /// Select a room programmatically. See [`RoomListDock::set_selected_room`].
    pub fn set_selected_room(
        &mut self,
        room_id: &RoomId,
    ) -> Result<Vec<DockAction>, S::Error> {
        let actions = self.dock.set_selected_room(room_id);
        self.process_actions(actions)
    }

    /// The dock.
    pub fn dock(&self) -> &RoomListDock<K> {
        &self.dock
    }

    /// The session.
    pub fn session(&self) -> &S {
        &self.session
    }

    /// Split into session and dock.
    pub fn into_parts(self) -> (S, RoomListDock<K>) {
        (self.session, self.dock)
    }

    fn process_actions(&mut self, actions: Vec<DockAction>) -> Result<Vec<DockAction>, S::Error> {
        let mut presented = Vec::with_capacity(actions.len());
        for action in actions {
            match action {
                DockAction::Session(command) => self.execute(command)?,
                other => presented.push(other),
            }
        }
        Ok(presented)
    }

    fn execute(&mut self, command: SessionCommand) -> Result<(), S::Error> {
        trace!(?command, "executing session command");
        match command {
            SessionCommand::JoinRoom { connection, room_id } => {
                self.session.join_room(connection, &room_id)
            },
            SessionCommand::LeaveRoom { room_id } => self.session.leave_room(&room_id),
            SessionCommand::ForgetRoom { connection, room_id } => {
                self.session.forget_room(connection, &room_id)
            },
            SessionCommand::SetTags { room_id, tags } => self.session.set_tags(&room_id, tags),
            SessionCommand::MarkAllRead { room_id } => self.session.mark_all_read(&room_id),
        }
    }
}
