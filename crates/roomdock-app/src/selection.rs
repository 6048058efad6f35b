//! Selection save/restore across index mutations.

use roomdock_core::{GroupKey, RoomId};

/// Selection remembered by identity rather than position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SavedSelection {
    /// Group that was current (or contained the current room).
    pub group: Option<GroupKey>,
    /// Room that was current. `None` if a group header was current.
    pub room: Option<RoomId>,
}

/// Holds at most one saved selection, cleared when taken.
#[derive(Debug, Clone, Default)]
pub struct SelectionCache {
    saved: Option<SavedSelection>,
}

impl SelectionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a selection, replacing any previous one.
    pub fn save(&mut self, group: Option<GroupKey>, room: Option<RoomId>) {
        self.saved = Some(SavedSelection { group, room });
    }

    /// Take the saved selection, leaving the cache empty.
    pub fn take(&mut self) -> Option<SavedSelection> {
        self.saved.take()
    }

    /// Drop the saved selection.
    pub fn clear(&mut self) {
        self.saved = None;
    }

    /// Whether nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.saved.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_clears() {
        let mut cache = SelectionCache::new();
        cache.save(Some(GroupKey::from("u.work")), Some(RoomId::from("!a:x")));
        assert!(!cache.is_empty());

        let saved = cache.take();
        assert_eq!(saved.and_then(|s| s.room), Some(RoomId::from("!a:x")));
        assert!(cache.is_empty());
        assert_eq!(cache.take(), None);
    }
}
