//! # packrat-entity
//!
//! The Packrat item domain model: an opaque identifier plus an open tag
//! mapping, with the reserved-tag subset lifted into typed fields.

pub mod item;

pub use item::model::Item;
pub use item::reserved::{PLACEABLE, ReservedKey, ReservedTags};
