//! Room list dock for a multi-account chat client
//!
//! Pure state machine around the room grouping index, plus the seams it
//! needs to talk to the outside world: a session for room commands and a
//! settings store for persisted UI state.
//!
//! # Components
//!
//! - [`RoomListDock`]: dock state machine (events in, actions out)
//! - [`RoomMenu`], [`GroupMenu`]: context menu state
//! - [`SettingsStore`]: persisted UI state ([`MemorySettings`], [`RedbSettings`])
//! - [`Session`]: trait for upstream room commands
//! - [`Runtime`]: executes session commands produced by the dock

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod config;
mod dock;
mod event;
mod menu;
mod runtime;
mod selection;
mod session;
pub mod settings;

pub use action::{DockAction, SessionCommand};
pub use config::{DEFAULT_PERMALINK_BASE, DEFAULT_SETTINGS_GROUP, DockConfig};
pub use dock::{COLLAPSE, EXPAND, RoomListDock};
pub use event::{DockEvent, MenuCommand, MouseButton};
pub use menu::{GroupMenu, LEAVE_LABEL, REJECT_INVITATION_LABEL, RoomMenu};
pub use runtime::Runtime;
pub use selection::{SavedSelection, SelectionCache};
pub use session::Session;
pub use settings::{MemorySettings, RedbSettings, SettingsError, SettingsStore};
