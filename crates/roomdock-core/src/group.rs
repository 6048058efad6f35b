//! Group keys.
//!
//! A group is a named bucket of rooms, usually a tag. System groups are
//! either client-reserved (`im.quotient.*`) or Matrix-reserved (`m.*`) and
//! cannot be deleted by the user; everything else is a user group.

use std::{borrow::Borrow, fmt};

/// Namespace of client-reserved groups.
pub const SYSTEM_PREFIX: &str = "im.quotient.";

/// Namespace the client used before `SYSTEM_PREFIX`. Settings may still
/// reference it.
pub const LEGACY_PREFIX: &str = "org.qmatrixclient.";

/// Namespace of Matrix-reserved tags.
pub const MATRIX_PREFIX: &str = "m.";

/// Namespace of user-defined tags.
pub const USER_TAG_PREFIX: &str = "u.";

/// Favourite rooms.
pub const FAVOURITE_TAG: &str = "m.favourite";

/// Low priority rooms.
pub const LOW_PRIORITY_TAG: &str = "m.lowpriority";

/// Server notice rooms.
pub const SERVER_NOTICE_TAG: &str = "m.server_notice";

/// Pending invitations.
pub const INVITE_GROUP: &str = "im.quotient.invite";

/// Direct chats.
pub const DIRECT_GROUP: &str = "im.quotient.direct";

/// Joined rooms without any tag.
pub const UNTAGGED_GROUP: &str = "im.quotient.none";

/// Left or upgraded rooms.
pub const LEFT_GROUP: &str = "im.quotient.left";

/// Key identifying a group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey(String);

impl GroupKey {
    /// Wrap a raw group key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Raw key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the group is protected from deletion.
    pub fn is_system(&self) -> bool {
        self.0.starts_with(SYSTEM_PREFIX) || self.0.starts_with(MATRIX_PREFIX)
    }

    /// Whether the key uses the deprecated namespace.
    pub fn is_legacy(&self) -> bool {
        self.0.starts_with(LEGACY_PREFIX)
    }

    /// Legacy spelling of a client-reserved key.
    ///
    /// `None` for keys outside [`SYSTEM_PREFIX`].
    pub fn legacy_key(&self) -> Option<String> {
        self.0.strip_prefix(SYSTEM_PREFIX).map(|rest| format!("{LEGACY_PREFIX}{rest}"))
    }

    /// Human readable caption.
    pub fn caption(&self) -> String {
        crate::grouping::tag_to_caption(&self.0)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for GroupKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl Borrow<str> for GroupKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}
