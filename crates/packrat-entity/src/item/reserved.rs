//! Reserved tag keys and their typed representation.
//!
//! The inventory service stores everything as string tags, but a fixed set
//! of keys carries system meaning. Those keys are lifted out of the user
//! tag map into [`ReservedTags`] at the serialization boundary, so the
//! domain logic works with typed fields instead of string-literal lookups.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};

use packrat_core::error::AppError;
use packrat_core::types::ItemId;

/// Tag key marking an item as a valid storage-container target.
///
/// Not lifted into [`ReservedTags`]: only its presence matters, and any
/// non-empty value counts.
pub const PLACEABLE: &str = "placeable";

/// The enumerated set of tag keys with system meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedKey {
    /// `_description` — human-readable label.
    Description,
    /// `_parent` — ID of the containing item; absent means root-level.
    Parent,
    /// `_checked_out_at` — set while the item is checked out.
    CheckedOutAt,
    /// `last_checked_out` — most recent checkout, retained after check-in.
    LastCheckedOut,
}

impl ReservedKey {
    /// All reserved keys, in wire-map merge order.
    pub const ALL: [ReservedKey; 4] = [
        ReservedKey::Description,
        ReservedKey::Parent,
        ReservedKey::CheckedOutAt,
        ReservedKey::LastCheckedOut,
    ];

    /// The wire tag key for this reserved key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Description => "_description",
            Self::Parent => "_parent",
            Self::CheckedOutAt => "_checked_out_at",
            Self::LastCheckedOut => "last_checked_out",
        }
    }

    /// The reserved key for a wire tag key, if any.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "_description" => Some(Self::Description),
            "_parent" => Some(Self::Parent),
            "_checked_out_at" => Some(Self::CheckedOutAt),
            "last_checked_out" => Some(Self::LastCheckedOut),
            _ => None,
        }
    }
}

/// Typed view of the reserved tags of one item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservedTags {
    /// Human-readable label.
    pub description: Option<String>,
    /// The containing item.
    pub parent: Option<ItemId>,
    /// Set while the item is checked out.
    pub checked_out_at: Option<DateTime<Utc>>,
    /// Most recent checkout, kept as history after check-in.
    pub last_checked_out: Option<DateTime<Utc>>,
}

impl ReservedTags {
    /// Split a wire tag map into the typed reserved view and the remaining
    /// user tags.
    ///
    /// A malformed reserved value (unparseable timestamp, empty parent ID)
    /// is a validation error rather than a silent misread: dropping a bad
    /// `_checked_out_at` would make a checked-out item appear checked in.
    pub fn split(
        tags: HashMap<String, String>,
    ) -> Result<(Self, HashMap<String, String>), AppError> {
        let mut reserved = Self::default();
        let mut user = HashMap::new();
        for (key, value) in tags {
            match ReservedKey::from_key(&key) {
                Some(reserved_key) => reserved.set(reserved_key, &value)?,
                None => {
                    user.insert(key, value);
                }
            }
        }
        Ok((reserved, user))
    }

    /// Set one reserved field from its wire string form.
    pub fn set(&mut self, key: ReservedKey, value: &str) -> Result<(), AppError> {
        match key {
            ReservedKey::Description => self.description = Some(value.to_string()),
            ReservedKey::Parent => self.parent = Some(ItemId::parse(value)?),
            ReservedKey::CheckedOutAt => self.checked_out_at = Some(parse_timestamp(key, value)?),
            ReservedKey::LastCheckedOut => {
                self.last_checked_out = Some(parse_timestamp(key, value)?)
            }
        }
        Ok(())
    }

    /// Clear one reserved field. Clearing an absent field is a no-op.
    pub fn clear(&mut self, key: ReservedKey) {
        match key {
            ReservedKey::Description => self.description = None,
            ReservedKey::Parent => self.parent = None,
            ReservedKey::CheckedOutAt => self.checked_out_at = None,
            ReservedKey::LastCheckedOut => self.last_checked_out = None,
        }
    }

    /// The wire string form of one reserved field, if present.
    pub fn get(&self, key: ReservedKey) -> Option<String> {
        match key {
            ReservedKey::Description => self.description.clone(),
            ReservedKey::Parent => self.parent.as_ref().map(|p| p.as_str().to_string()),
            ReservedKey::CheckedOutAt => self.checked_out_at.map(format_timestamp),
            ReservedKey::LastCheckedOut => self.last_checked_out.map(format_timestamp),
        }
    }

    /// Merge the present reserved fields back into a wire tag map.
    pub fn merge_into(&self, tags: &mut HashMap<String, String>) {
        for key in ReservedKey::ALL {
            if let Some(value) = self.get(key) {
                tags.insert(key.as_str().to_string(), value);
            }
        }
    }
}

/// Format a timestamp the way the service stores them: RFC 3339 UTC with
/// millisecond precision and a `Z` suffix.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Truncate a timestamp to the millisecond precision the wire format
/// carries, so an in-memory stamp survives a store/load cycle unchanged.
pub fn truncate_to_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(ts.timestamp_millis()).unwrap_or(ts)
}

fn parse_timestamp(key: ReservedKey, value: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            AppError::validation(format!("invalid timestamp in `{}`: {e}", key.as_str()))
        })
}
