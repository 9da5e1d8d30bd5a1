//! Newtype wrapper for item identifiers.
//!
//! Item IDs are opaque strings assigned by the inventory service. The
//! original casing is preserved for display and persistence, but hierarchy
//! matching treats IDs case-insensitively, so all comparisons go through
//! [`ItemId::normalized`] or [`ItemId::matches`].

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AppError;

/// An opaque item identifier.
///
/// Never empty; immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(raw).map_err(D::Error::custom)
    }
}

impl ItemId {
    /// Create an identifier from a string, rejecting empty input.
    pub fn parse(id: impl Into<String>) -> Result<Self, AppError> {
        let id = id.into();
        if id.is_empty() {
            return Err(AppError::validation("item ID must not be empty"));
        }
        Ok(Self(id))
    }

    /// The identifier as originally cased.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The lowercase form used as a hierarchy comparison key.
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }

    /// Case-insensitive identifier comparison.
    pub fn matches(&self, other: &ItemId) -> bool {
        self.normalized() == other.normalized()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> String {
        id.0
    }
}
