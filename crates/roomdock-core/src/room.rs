//! Room state as seen by the room list.
//!
//! [`RoomInfo`] is a read-only snapshot of what the upstream session reports
//! about a room: identity, display data, join state and tags. The index never
//! mutates it; the session sends a fresh snapshot whenever something changes.

use std::{collections::BTreeMap, fmt};

/// Stable room identifier (e.g. `!abc:example.org`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoomId(String);

impl RoomId {
    /// Wrap a raw room identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RoomId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifies the account connection a room belongs to.
///
/// A single room list can host several logged-in accounts at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ConnectionId(pub u32);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn#{}", self.0)
    }
}

/// Local user's relationship to a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JoinState {
    /// Joined.
    #[default]
    Join,
    /// Invited but not yet joined.
    Invite,
    /// Left or kicked.
    Leave,
    /// Room was replaced by a newer version.
    Upgraded,
}

impl JoinState {
    /// Wire name of the join state.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Invite => "invite",
            Self::Leave => "leave",
            Self::Upgraded => "upgraded",
        }
    }
}

/// Per-tag data attached to a room.
///
/// Weights compare by bit pattern, so a NaN weight equals itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagInfo {
    /// Ordering weight within the tag, conventionally in `[0, 1]`.
    /// `None` sorts after every weighted room.
    pub order: Option<f64>,
}

impl TagInfo {
    /// Tag with an explicit ordering weight.
    pub fn with_order(order: f64) -> Self {
        Self { order: Some(order) }
    }
}

impl PartialEq for TagInfo {
    fn eq(&self, other: &Self) -> bool {
        match (self.order, other.order) {
            (Some(a), Some(b)) => a.total_cmp(&b).is_eq(),
            (None, None) => true,
            _ => false,
        }
    }
}

/// Tags of a room keyed by tag name.
pub type Tags = BTreeMap<String, TagInfo>;

/// Snapshot of a room's observable state.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomInfo {
    /// Stable room identifier.
    pub id: RoomId,
    /// Connection the room was reported by.
    pub connection: ConnectionId,
    /// Human readable name.
    pub display_name: String,
    /// Canonical alias (e.g. `#rust:example.org`). `None` if unset.
    pub canonical_alias: Option<String>,
    /// Local user's join state.
    pub join_state: JoinState,
    /// Tags with ordering weights.
    pub tags: Tags,
    /// Room has unread messages.
    pub unread: bool,
    /// Number of unread highlights (mentions).
    pub highlight_count: u32,
    /// Room is a direct chat.
    pub is_direct: bool,
}

impl RoomInfo {
    /// Joined, untagged room on the default connection.
    pub fn new(id: impl Into<RoomId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            connection: ConnectionId::default(),
            display_name: display_name.into(),
            canonical_alias: None,
            join_state: JoinState::Join,
            tags: Tags::new(),
            unread: false,
            highlight_count: 0,
            is_direct: false,
        }
    }

    /// Set the connection.
    pub fn with_connection(mut self, connection: ConnectionId) -> Self {
        self.connection = connection;
        self
    }

    /// Set the join state.
    pub fn with_join_state(mut self, join_state: JoinState) -> Self {
        self.join_state = join_state;
        self
    }

    /// Add a tag without an ordering weight.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into(), TagInfo::default());
        self
    }

    /// Add a tag with an ordering weight.
    pub fn with_weighted_tag(mut self, tag: impl Into<String>, order: f64) -> Self {
        self.tags.insert(tag.into(), TagInfo::with_order(order));
        self
    }

    /// Set the canonical alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.canonical_alias = Some(alias.into());
        self
    }

    /// Mark as a direct chat.
    pub fn direct(mut self) -> Self {
        self.is_direct = true;
        self
    }

    /// Ordering weight of `tag` on this room. `None` if untagged or unweighted.
    pub fn tag_order(&self, tag: &str) -> Option<f64> {
        self.tags.get(tag).and_then(|info| info.order)
    }
}
