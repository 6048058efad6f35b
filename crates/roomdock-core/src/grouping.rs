//! Deriving group membership from room state.
//!
//! The index itself stores whatever groups it is given. This module holds
//! the tag-based rule set the room list uses to decide which groups a room
//! appears in, and the mapping between tag names and display captions.

use std::collections::BTreeSet;

use crate::{
    GroupKey, JoinState, RoomInfo,
    group::{
        DIRECT_GROUP, FAVOURITE_TAG, INVITE_GROUP, LEFT_GROUP, LOW_PRIORITY_TAG, MATRIX_PREFIX,
        SERVER_NOTICE_TAG, UNTAGGED_GROUP, USER_TAG_PREFIX,
    },
};

/// Captions of reserved Matrix tags. The only captions that map back to a
/// tag on input.
const TAG_CAPTIONS: &[(&str, &str)] = &[
    (FAVOURITE_TAG, "Favourites"),
    (LOW_PRIORITY_TAG, "Low priority"),
    (SERVER_NOTICE_TAG, "Server notices"),
];

/// Captions of client-side groups. Display only; never written as tags.
const GROUP_CAPTIONS: &[(&str, &str)] = &[
    (INVITE_GROUP, "Invited"),
    (DIRECT_GROUP, "People"),
    (UNTAGGED_GROUP, "Ungrouped rooms"),
    (LEFT_GROUP, "Left"),
];

/// Groups a room belongs to, derived from its join state and tags.
///
/// - Invites go to [`INVITE_GROUP`] only.
/// - Left and upgraded rooms go to [`LEFT_GROUP`] only.
/// - Joined rooms go to every tag they carry, plus [`DIRECT_GROUP`] for
///   direct chats. A joined room with neither lands in [`UNTAGGED_GROUP`].
pub fn groups_for(room: &RoomInfo) -> BTreeSet<GroupKey> {
    match room.join_state {
        JoinState::Invite => BTreeSet::from([GroupKey::from(INVITE_GROUP)]),
        JoinState::Leave | JoinState::Upgraded => BTreeSet::from([GroupKey::from(LEFT_GROUP)]),
        JoinState::Join => {
            let mut groups: BTreeSet<GroupKey> =
                room.tags.keys().map(|tag| GroupKey::from(tag.as_str())).collect();
            if room.is_direct {
                groups.insert(GroupKey::from(DIRECT_GROUP));
            }
            if groups.is_empty() {
                groups.insert(GroupKey::from(UNTAGGED_GROUP));
            }
            groups
        },
    }
}

/// Convert user-entered text to a tag name.
///
/// Captions of reserved Matrix tags map back to the tag, namespaced input is
/// kept as is, and anything else becomes a `u.` user tag. Captions of
/// client-side groups are plain text here. `None` for blank input.
pub fn caption_to_tag(caption: &str) -> Option<String> {
    let caption = caption.trim();
    if caption.is_empty() {
        return None;
    }
    if let Some((tag, _)) = TAG_CAPTIONS.iter().find(|(_, known)| *known == caption) {
        return Some((*tag).to_owned());
    }
    if caption.starts_with(MATRIX_PREFIX) || caption.starts_with(USER_TAG_PREFIX) {
        return Some(caption.to_owned());
    }
    Some(format!("{USER_TAG_PREFIX}{caption}"))
}

/// Display caption for a tag or group key.
pub fn tag_to_caption(tag: &str) -> String {
    if let Some((_, caption)) =
        TAG_CAPTIONS.iter().chain(GROUP_CAPTIONS).find(|(known, _)| *known == tag)
    {
        return (*caption).to_owned();
    }
    tag.strip_prefix(USER_TAG_PREFIX).unwrap_or(tag).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(groups: &BTreeSet<GroupKey>) -> Vec<&str> {
        groups.iter().map(GroupKey::as_str).collect()
    }

    #[test]
    fn invites_ignore_tags() {
        let room = RoomInfo::new("!a:x", "A").with_tag("u.work").with_join_state(JoinState::Invite);
        assert_eq!(keys(&groups_for(&room)), vec![INVITE_GROUP]);
    }

    #[test]
    fn left_and_upgraded_rooms_share_a_group() {
        let left = RoomInfo::new("!a:x", "A").with_join_state(JoinState::Leave);
        let upgraded = RoomInfo::new("!b:x", "B").with_join_state(JoinState::Upgraded);
        assert_eq!(groups_for(&left), groups_for(&upgraded));
        assert_eq!(keys(&groups_for(&left)), vec![LEFT_GROUP]);
    }

    #[test]
    fn untagged_joined_room() {
        let room = RoomInfo::new("!a:x", "A");
        assert_eq!(keys(&groups_for(&room)), vec![UNTAGGED_GROUP]);
    }

    #[test]
    fn direct_chat_with_tag() {
        let room = RoomInfo::new("!a:x", "A").with_tag(FAVOURITE_TAG).direct();
        assert_eq!(keys(&groups_for(&room)), vec![DIRECT_GROUP, FAVOURITE_TAG]);
    }

    #[test]
    fn captions_round_trip() {
        assert_eq!(caption_to_tag("work").as_deref(), Some("u.work"));
        assert_eq!(caption_to_tag("  u.work ").as_deref(), Some("u.work"));
        assert_eq!(caption_to_tag("Favourites").as_deref(), Some(FAVOURITE_TAG));
        assert_eq!(caption_to_tag("m.custom").as_deref(), Some("m.custom"));
        assert_eq!(caption_to_tag("   "), None);

        assert_eq!(tag_to_caption("u.work"), "work");
        assert_eq!(tag_to_caption(LOW_PRIORITY_TAG), "Low priority");
        assert_eq!(tag_to_caption("org.example.custom"), "org.example.custom");
    }

    #[test]
    fn group_captions_become_user_tags() {
        assert_eq!(caption_to_tag("Left").as_deref(), Some("u.Left"));
        assert_eq!(caption_to_tag("People").as_deref(), Some("u.People"));
        assert_eq!(caption_to_tag("Invited").as_deref(), Some("u.Invited"));
        assert_eq!(caption_to_tag("Ungrouped rooms").as_deref(), Some("u.Ungrouped rooms"));

        assert_eq!(tag_to_caption(LEFT_GROUP), "Left");
        assert_eq!(tag_to_caption(DIRECT_GROUP), "People");
    }

    #[test]
    fn entered_group_caption_keeps_joined_room_joined() {
        let tag = caption_to_tag("Left").unwrap_or_default();
        let room = RoomInfo::new("!a:x", "A").with_tag(tag);
        assert_eq!(keys(&groups_for(&room)), vec!["u.Left"]);
    }
}
