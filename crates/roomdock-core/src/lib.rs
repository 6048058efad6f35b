//! Room grouping index for the room list.
//!
//! Maintains an ordered two-level hierarchy (group → rooms) over a changing
//! set of rooms, with position lookups used to drive a tree view and to
//! restore a remembered selection after the hierarchy changes.
//!
//! # Components
//!
//! - [`RoomGroupIndex`]: the index itself
//! - [`OrderPolicy`]: total order over groups and rooms ([`OrderByTag`],
//!   [`OrderByName`])
//! - [`IndexChange`]: incremental change notifications for views
//! - [`grouping`]: derives group membership from room state

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod change;
mod error;
pub mod group;
pub mod grouping;
mod index;
mod order;
mod room;

pub use change::IndexChange;
pub use error::IndexError;
pub use group::GroupKey;
pub use index::{Position, RoomGroupIndex};
pub use order::{OrderByName, OrderByTag, OrderPolicy, SortMode};
pub use room::{ConnectionId, JoinState, RoomId, RoomInfo, TagInfo, Tags};
