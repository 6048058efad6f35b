//! Session trait for room commands.
//!
//! The [`Session`] trait decouples the dock from the SDK connection that
//! actually talks to the homeserver. Commands are fire-and-forget: their
//! effects come back later as ordinary room events.

use roomdock_core::{ConnectionId, RoomId, Tags};

/// Upstream session the dock sends room commands to.
///
/// # Implementations
///
/// - **SDK**: forwards each call to the owning connection
/// - **Simulation**: records calls for assertions
pub trait Session {
    /// Session-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Join a room through `connection`.
    fn join_room(&mut self, connection: ConnectionId, room_id: &RoomId) -> Result<(), Self::Error>;

    /// Leave a room or reject an invitation.
    fn leave_room(&mut self, room_id: &RoomId) -> Result<(), Self::Error>;

    /// Forget a room on `connection`.
    fn forget_room(
        &mut self,
        connection: ConnectionId,
        room_id: &RoomId,
    ) -> Result<(), Self::Error>;

    /// Replace the full tag set of a room.
    fn set_tags(&mut self, room_id: &RoomId, tags: Tags) -> Result<(), Self::Error>;

    /// Mark every message of a room as read.
    fn mark_all_read(&mut self, room_id: &RoomId) -> Result<(), Self::Error>;
}
