//! The fetch-all snapshot and the derived queries computed over it.
//!
//! The service has no filter endpoints, so every hierarchy query fetches
//! the full item set and derives the answer client-side. [`Inventory`] is
//! that snapshot: pure data, no transport access, O(N) queries.

use std::collections::HashMap;

use packrat_core::types::ItemId;
use packrat_entity::Item;

/// A point-in-time snapshot of every item, keyed by normalized ID.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: HashMap<String, Item>,
}

impl Inventory {
    /// Build a snapshot from a set of items.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|item| (item.id().normalized(), item))
                .collect(),
        }
    }

    /// Case-insensitive lookup by ID.
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.get(&id.normalized())
    }

    /// Number of items in the snapshot.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Direct children of the item with the given ID: every item whose
    /// parent matches it case-insensitively, sorted ascending by
    /// description.
    ///
    /// An absent description sorts as the empty string so the order stays
    /// total; ties break on normalized ID to keep it stable.
    pub fn contents_of(&self, id: &ItemId) -> Vec<&Item> {
        let key = id.normalized();
        let mut children: Vec<&Item> = self
            .items
            .values()
            .filter(|item| item.parent().is_some_and(|p| p.normalized() == key))
            .collect();
        children.sort_by(|a, b| {
            sort_key(a)
                .cmp(&sort_key(b))
                .then_with(|| a.id().normalized().cmp(&b.id().normalized()))
        });
        children
    }

    /// All valid storage-container targets, in stable ID order so random
    /// selection is reproducible under a seeded RNG.
    pub fn placeable(&self) -> Vec<&Item> {
        let mut candidates: Vec<&Item> =
            self.items.values().filter(|i| i.is_placeable()).collect();
        candidates.sort_by_key(|item| item.id().normalized());
        candidates
    }
}

impl FromIterator<Item> for Inventory {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

fn sort_key(item: &Item) -> String {
    item.description().unwrap_or("").to_lowercase()
}
