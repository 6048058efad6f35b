//! Operations for model-based testing.
//!
//! Operations represent every mutation and lookup of the index. They are
//! generated by proptest or libFuzzer and applied to both the model and the
//! real [`RoomGroupIndex`].

use arbitrary::Arbitrary;
use roomdock_core::{
    GroupKey, Position, RoomGroupIndex, RoomId, RoomInfo, SortMode,
    group::{DIRECT_GROUP, FAVOURITE_TAG, LOW_PRIORITY_TAG, UNTAGGED_GROUP},
};

/// Room identifier (uses u8 to keep test space manageable).
pub type ModelRoomId = u8;

/// Groups operations draw from: system groups and user tags.
pub const MODEL_GROUPS: &[&str] =
    &[FAVOURITE_TAG, LOW_PRIORITY_TAG, DIRECT_GROUP, UNTAGGED_GROUP, "u.work", "u.home", "u.play"];

/// Display names operations draw from. Duplicates and case variants exercise
/// tie-breaking.
pub const MODEL_NAMES: &[&str] = &["alpha", "Alpha", "bravo", "Charlie", "alpha"];

/// Real room id of a model room.
pub fn model_room_id(room_id: ModelRoomId) -> RoomId {
    RoomId::new(format!("!r{room_id}:model"))
}

/// Group key of a model group slot.
pub fn model_group(slot: u8) -> GroupKey {
    GroupKey::from(MODEL_GROUPS[slot as usize % MODEL_GROUPS.len()])
}

/// Operations that can be applied to the index.
#[derive(Debug, Clone, Arbitrary)]
pub enum Operation {
    /// Insert or update a room.
    Upsert {
        /// Target room.
        room_id: ModelRoomId,
        /// New room data and groups.
        spec: RoomSpec,
    },

    /// Remove a room.
    Remove {
        /// Target room.
        room_id: ModelRoomId,
    },

    /// Switch the ordering policy.
    Reorder {
        /// Order by name instead of tag weight.
        by_name: bool,
    },

    /// Look a room up, optionally starting from a group.
    Locate {
        /// Group slot to search first.
        group: Option<u8>,
        /// Room to find.
        room_id: ModelRoomId,
    },
}

/// Compact room description.
#[derive(Debug, Clone, Arbitrary)]
pub struct RoomSpec {
    /// Index into [`MODEL_NAMES`].
    pub name: u8,
    /// Bitmask over [`MODEL_GROUPS`]. Zero removes the room.
    pub groups: u8,
    /// Tag weight in quarters. `None` leaves tags unweighted.
    pub weight: Option<u8>,
}

impl RoomSpec {
    /// Groups selected by the bitmask.
    pub fn group_keys(&self) -> Vec<GroupKey> {
        (0..MODEL_GROUPS.len() as u8)
            .filter(|slot| self.groups & (1 << slot) != 0)
            .map(model_group)
            .collect()
    }

    /// Room data, with one tag per selected group.
    pub fn room_info(&self, room_id: ModelRoomId) -> RoomInfo {
        let name = MODEL_NAMES[self.name as usize % MODEL_NAMES.len()];
        let mut info = RoomInfo::new(model_room_id(room_id), name);
        for key in self.group_keys() {
            info = match self.weight {
                Some(weight) => info.with_weighted_tag(key.as_str(), f64::from(weight % 5) / 4.0),
                None => info.with_tag(key.as_str()),
            };
        }
        info
    }
}

/// Observable result of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    /// Mutation applied. `changed` is false for no-ops.
    Applied {
        /// Whether anything changed.
        changed: bool,
    },
    /// Lookup result.
    Located(Option<Position>),
}

impl Operation {
    /// Apply to a real index.
    pub fn apply(&self, index: &mut RoomGroupIndex) -> OperationResult {
        match self {
            Self::Upsert { room_id, spec } => {
                let changes = index.add_room(spec.room_info(*room_id), spec.group_keys());
                OperationResult::Applied { changed: !changes.is_empty() }
            },
            Self::Remove { room_id } => {
                let changes = index.remove_room(&model_room_id(*room_id));
                OperationResult::Applied { changed: !changes.is_empty() }
            },
            Self::Reorder { by_name } => {
                let changes = index.reorder(sort_mode(*by_name).policy());
                OperationResult::Applied { changed: !changes.is_empty() }
            },
            Self::Locate { group, room_id } => {
                let group = group.map(model_group);
                OperationResult::Located(index.locate(group.as_ref(), &model_room_id(*room_id)))
            },
        }
    }
}

/// Sort mode selected by a reorder flag.
pub fn sort_mode(by_name: bool) -> SortMode {
    if by_name { SortMode::ByName } else { SortMode::ByTag }
}
