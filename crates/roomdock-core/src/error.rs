//! Index errors.
//!
//! Only positional accessors return errors. Lookups by id return `Option`
//! and mutations on unknown rooms are no-ops.

use thiserror::Error;

use crate::Position;

/// Errors from positional index access.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// Group position past the last group
    #[error("group {group} out of range ({len} groups)")]
    GroupOutOfRange {
        /// Requested group position
        group: usize,
        /// Number of groups
        len: usize,
    },

    /// Row past the last room of a group
    #[error("row {row} out of range in group {group} ({len} rooms)")]
    RowOutOfRange {
        /// Group position
        group: usize,
        /// Requested row
        row: usize,
        /// Number of rooms in the group
        len: usize,
    },

    /// Position addresses a group where a room was expected
    #[error("position {0:?} is not a room")]
    NotARoom(Position),
}
