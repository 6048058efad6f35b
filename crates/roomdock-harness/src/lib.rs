//! Test harness for the room index and dock.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference implementation of the index.
//! Operations are applied to both the model and the real index, and their
//! outlines and lookup results are compared.
//!
//! # Invariant Testing
//!
//! The `invariants` module checks structural properties against snapshots of
//! the index or the dock. Use [`InvariantRegistry::standard()`] for the full
//! set.
//!
//! # Simulation
//!
//! [`SimSession`] records the commands a dock sends upstream.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod invariants;
pub mod model;
pub mod sim_session;

pub use invariants::{
    CurrentInBounds, DockSnapshot, GroupsSorted, IndexSnapshot, Invariant, InvariantRegistry,
    InvariantResult, MembershipConsistency, NoDuplicates, NoEmptyUserGroups, RoomDataPresent,
    RoomsSorted, TitleMatchesRooms, Violation,
};
pub use model::{
    MODEL_GROUPS, MODEL_NAMES, ModelIndex, ModelRoomId, Operation, OperationResult, RoomSpec,
    model_group, model_room_id, sort_mode,
};
pub use sim_session::SimSession;
