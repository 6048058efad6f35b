//! Model-based testing for the room index.
//!
//! [`ModelIndex`] is a naive reference implementation; [`Operation`]s are
//! applied to it and to the real index, and their outlines compared.

mod index;
mod operation;

pub use index::ModelIndex;
pub use operation::{
    MODEL_GROUPS, MODEL_NAMES, ModelRoomId, Operation, OperationResult, RoomSpec, model_group,
    model_room_id, sort_mode,
};
