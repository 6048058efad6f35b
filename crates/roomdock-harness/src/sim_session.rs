//! Recording session for simulation.
//!
//! [`SimSession`] accepts every command and keeps a log of them, so tests can
//! assert on exactly what the dock asked the session to do.

use std::convert::Infallible;

use roomdock_app::{Session, SessionCommand};
use roomdock_core::{ConnectionId, RoomId, Tags};

/// Session that records commands instead of executing them.
#[derive(Debug, Clone, Default)]
pub struct SimSession {
    commands: Vec<SessionCommand>,
}

impl SimSession {
    /// Create a session with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands received so far, oldest first.
    pub fn commands(&self) -> &[SessionCommand] {
        &self.commands
    }

    /// Drain the log.
    pub fn take_commands(&mut self) -> Vec<SessionCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Session for SimSession {
    type Error = Infallible;

    fn join_room(&mut self, connection: ConnectionId, room_id: &RoomId) -> Result<(), Infallible> {
        self.commands.push(SessionCommand::JoinRoom { connection, room_id: room_id.clone() });
        Ok(())
    }

    fn leave_room(&mut self, room_id: &RoomId) -> Result<(), Infallible> {
        self.commands.push(SessionCommand::LeaveRoom { room_id: room_id.clone() });
        Ok(())
    }

    fn forget_room(&mut self, connection: ConnectionId, room_id: &RoomId) -> Result<(), Infallible> {
        self.commands.push(SessionCommand::ForgetRoom { connection, room_id: room_id.clone() });
        Ok(())
    }

    fn set_tags(&mut self, room_id: &RoomId, tags: Tags) -> Result<(), Infallible> {
        self.commands.push(SessionCommand::SetTags { room_id: room_id.clone(), tags });
        Ok(())
    }

    fn mark_all_read(&mut self, room_id: &RoomId) -> Result<(), Infallible> {
        self.commands.push(SessionCommand::MarkAllRead { room_id: room_id.clone() });
        Ok(())
    }
}
