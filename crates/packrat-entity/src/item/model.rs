//! The item entity.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use packrat_core::AppResult;
use packrat_core::types::ItemId;

use super::reserved::{PLACEABLE, ReservedKey, ReservedTags, truncate_to_millis};

/// A tracked inventory item: an opaque identifier plus a tag mapping.
///
/// The tag mapping is owned exclusively by the entity — construction
/// consumes the source map, so no two items alias the same tags. Reserved
/// keys live in typed fields ([`ReservedTags`]); everything else stays in
/// the open user map.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    reserved: ReservedTags,
    tags: HashMap<String, String>,
}

impl Item {
    /// Build an in-memory item from an ID and a wire tag map.
    ///
    /// Does not contact the service. Fails when a reserved tag value is
    /// malformed (bad timestamp, empty parent ID).
    pub fn new(id: ItemId, tags: HashMap<String, String>) -> AppResult<Self> {
        let (reserved, tags) = ReservedTags::split(tags)?;
        Ok(Self { id, reserved, tags })
    }

    /// Build an item with no tags at all.
    pub fn empty(id: ItemId) -> Self {
        Self {
            id,
            reserved: ReservedTags::default(),
            tags: HashMap::new(),
        }
    }

    /// The item's identifier.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Human-readable label, if any.
    pub fn description(&self) -> Option<&str> {
        self.reserved.description.as_deref()
    }

    /// The containing item, if any. Compare case-insensitively via
    /// [`ItemId::matches`].
    pub fn parent(&self) -> Option<&ItemId> {
        self.reserved.parent.as_ref()
    }

    /// When the item was checked out, if it currently is.
    pub fn checked_out_at(&self) -> Option<DateTime<Utc>> {
        self.reserved.checked_out_at
    }

    /// The most recent checkout, retained after check-in.
    pub fn last_checked_out(&self) -> Option<DateTime<Utc>> {
        self.reserved.last_checked_out
    }

    /// Whether the item is currently checked out.
    pub fn is_checked_out(&self) -> bool {
        self.reserved.checked_out_at.is_some()
    }

    /// Whether the item can serve as a storage-container target.
    pub fn is_placeable(&self) -> bool {
        self.tags.get(PLACEABLE).is_some_and(|v| !v.is_empty())
    }

    /// A single tag value in wire form, reserved keys included.
    pub fn tag(&self, key: &str) -> Option<String> {
        match ReservedKey::from_key(key) {
            Some(reserved_key) => self.reserved.get(reserved_key),
            None => self.tags.get(key).cloned(),
        }
    }

    /// The tags with no system meaning.
    pub fn user_tags(&self) -> &HashMap<String, String> {
        &self.tags
    }

    /// Set a tag by wire key. Reserved keys are routed into their typed
    /// fields, so a reserved timestamp key only accepts RFC 3339 input.
    pub fn set_tag(&mut self, key: &str, value: &str) -> AppResult<()> {
        match ReservedKey::from_key(key) {
            Some(reserved_key) => self.reserved.set(reserved_key, value),
            None => {
                self.tags.insert(key.to_string(), value.to_string());
                Ok(())
            }
        }
    }

    /// Remove a tag by wire key. Removing an absent key is a no-op.
    pub fn remove_tag(&mut self, key: &str) {
        match ReservedKey::from_key(key) {
            Some(reserved_key) => self.reserved.clear(reserved_key),
            None => {
                self.tags.remove(key);
            }
        }
    }

    /// Mark the item as checked out at `now`, recording the same stamp in
    /// the checkout history. There is no double-checkout guard: checking
    /// out an already-checked-out item overwrites both timestamps.
    ///
    /// The stamp is truncated to millisecond precision so it survives a
    /// store/load cycle unchanged.
    pub fn check_out(&mut self, now: DateTime<Utc>) {
        let now = truncate_to_millis(now);
        self.reserved.checked_out_at = Some(now);
        self.reserved.last_checked_out = Some(now);
    }

    /// Mark the item as checked in. The checkout history is kept; checking
    /// in an already-checked-in item is a harmless no-op.
    pub fn check_in(&mut self) {
        self.reserved.checked_out_at = None;
    }

    /// Set the human-readable label.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.reserved.description = Some(description.into());
    }

    /// Place the item inside another item.
    pub fn set_parent(&mut self, parent: ItemId) {
        self.reserved.parent = Some(parent);
    }

    /// Make the item root-level again.
    pub fn remove_parent(&mut self) {
        self.reserved.parent = None;
    }

    /// The full tag map in wire form: user tags plus reserved fields.
    pub fn to_tag_map(&self) -> HashMap<String, String> {
        let mut tags = self.tags.clone();
        self.reserved.merge_into(&mut tags);
        tags
    }
}

/// Wire payload of the upsert endpoint: `{ "id": ..., "tags": {...} }`.
#[derive(Serialize, Deserialize)]
struct ItemPayload {
    id: ItemId,
    tags: HashMap<String, String>,
}

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ItemPayload {
            id: self.id.clone(),
            tags: self.to_tag_map(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let payload = ItemPayload::deserialize(deserializer)?;
        Item::new(payload.id, payload.tags).map_err(serde::de::Error::custom)
    }
}
