//! Ordering policies.
//!
//! A policy is a total order over groups and, per group, a total order over
//! rooms. Both orders end in a comparison of raw keys/ids so that no two
//! distinct entries ever compare equal.

use std::{cmp::Ordering, fmt, sync::Arc};

use crate::{
    GroupKey, RoomInfo,
    group::{
        DIRECT_GROUP, FAVOURITE_TAG, INVITE_GROUP, LEFT_GROUP, LOW_PRIORITY_TAG,
        SERVER_NOTICE_TAG, UNTAGGED_GROUP,
    },
};

/// Display priority of well-known groups, highest first.
const GROUP_PRIORITY: &[&str] = &[
    INVITE_GROUP,
    FAVOURITE_TAG,
    DIRECT_GROUP,
    UNTAGGED_GROUP,
    SERVER_NOTICE_TAG,
    LOW_PRIORITY_TAG,
    LEFT_GROUP,
];

/// Total order over groups and over rooms within a group.
pub trait OrderPolicy: fmt::Debug + Send + Sync {
    /// Policy name for logging.
    fn name(&self) -> &'static str;

    /// Order of two groups.
    fn compare_groups(&self, a: &GroupKey, b: &GroupKey) -> Ordering;

    /// Order of two rooms inside `group`.
    fn compare_rooms(&self, group: &GroupKey, a: &RoomInfo, b: &RoomInfo) -> Ordering;
}

/// Selectable sort modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Tag weight first, then name. See [`OrderByTag`].
    #[default]
    ByTag,
    /// Name only. See [`OrderByName`].
    ByName,
}

impl SortMode {
    /// Policy implementing this mode.
    pub fn policy(self) -> Arc<dyn OrderPolicy> {
        match self {
            Self::ByTag => Arc::new(OrderByTag),
            Self::ByName => Arc::new(OrderByName),
        }
    }
}

/// Rooms ordered by their weight in the group's tag, then by name.
///
/// Weighted rooms come before unweighted ones. Groups use the fixed system
/// priority followed by user groups sorted by caption.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderByTag;

impl OrderPolicy for OrderByTag {
    fn name(&self) -> &'static str {
        "by-tag"
    }

    fn compare_groups(&self, a: &GroupKey, b: &GroupKey) -> Ordering {
        compare_groups_by_priority(a, b)
    }

    fn compare_rooms(&self, group: &GroupKey, a: &RoomInfo, b: &RoomInfo) -> Ordering {
        let by_weight = match (a.tag_order(group.as_str()), b.tag_order(group.as_str())) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_weight.then_with(|| compare_rooms_by_name(a, b))
    }
}

/// Rooms ordered alphabetically by display name.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderByName;

impl OrderPolicy for OrderByName {
    fn name(&self) -> &'static str {
        "by-name"
    }

    fn compare_groups(&self, a: &GroupKey, b: &GroupKey) -> Ordering {
        compare_groups_by_priority(a, b)
    }

    fn compare_rooms(&self, _group: &GroupKey, a: &RoomInfo, b: &RoomInfo) -> Ordering {
        compare_rooms_by_name(a, b)
    }
}

/// Rank of a group: well-known groups by position in [`GROUP_PRIORITY`],
/// other system groups right after them, user groups last.
fn group_rank(key: &GroupKey) -> usize {
    match GROUP_PRIORITY.iter().position(|known| *known == key.as_str()) {
        Some(rank) => rank,
        None if key.is_system() => GROUP_PRIORITY.len(),
        None => GROUP_PRIORITY.len() + 1,
    }
}

fn compare_groups_by_priority(a: &GroupKey, b: &GroupKey) -> Ordering {
    group_rank(a)
        .cmp(&group_rank(b))
        .then_with(|| a.caption().to_lowercase().cmp(&b.caption().to_lowercase()))
        .then_with(|| a.cmp(b))
}

fn compare_rooms_by_name(a: &RoomInfo, b: &RoomInfo) -> Ordering {
    a.display_name
        .to_lowercase()
        .cmp(&b.display_name.to_lowercase())
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_groups(policy: &dyn OrderPolicy, keys: &[&str]) -> Vec<String> {
        let mut groups: Vec<GroupKey> = keys.iter().map(|k| GroupKey::from(*k)).collect();
        groups.sort_by(|a, b| policy.compare_groups(a, b));
        groups.into_iter().map(|g| g.as_str().to_owned()).collect()
    }

    #[test]
    fn system_groups_before_user_groups() {
        let order = sorted_groups(&OrderByTag, &[
            "u.zebra",
            LEFT_GROUP,
            "u.Alpha",
            FAVOURITE_TAG,
            "m.custom",
            INVITE_GROUP,
            LOW_PRIORITY_TAG,
        ]);
        assert_eq!(order, vec![
            INVITE_GROUP,
            FAVOURITE_TAG,
            LOW_PRIORITY_TAG,
            LEFT_GROUP,
            "m.custom",
            "u.Alpha",
            "u.zebra",
        ]);
    }

    #[test]
    fn weighted_rooms_first() {
        let group = GroupKey::from(FAVOURITE_TAG);
        let weighted = RoomInfo::new("!b:x", "Zulu").with_weighted_tag(FAVOURITE_TAG, 0.5);
        let heavier = RoomInfo::new("!c:x", "Yankee").with_weighted_tag(FAVOURITE_TAG, 0.9);
        let plain = RoomInfo::new("!a:x", "Alpha").with_tag(FAVOURITE_TAG);

        assert_eq!(OrderByTag.compare_rooms(&group, &weighted, &plain), Ordering::Less);
        assert_eq!(OrderByTag.compare_rooms(&group, &weighted, &heavier), Ordering::Less);
        assert_eq!(OrderByName.compare_rooms(&group, &weighted, &plain), Ordering::Greater);
    }

    #[test]
    fn equal_names_fall_back_to_id() {
        let group = GroupKey::from(UNTAGGED_GROUP);
        let a = RoomInfo::new("!a:x", "Same");
        let b = RoomInfo::new("!b:x", "same");
        assert_eq!(OrderByTag.compare_rooms(&group, &a, &b), Ordering::Less);
        assert_eq!(OrderByTag.compare_rooms(&group, &b, &a), Ordering::Greater);
        assert_eq!(OrderByTag.compare_rooms(&group, &a, &a), Ordering::Equal);
    }
}
