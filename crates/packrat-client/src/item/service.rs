//! The item service: persistence orchestration over the transport.
//!
//! Every mutating call applies the change to the in-memory item first,
//! then persists. The persist outcome is the returned `Result`; callers
//! that want fire-and-forget behavior can spawn the future instead of
//! awaiting it, without the failure ever being discarded silently. The last save to complete wins on overlapping mutations of
//! the same remote ID.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rand::seq::IndexedRandom;
use serde::Deserialize;
use tracing::debug;

use packrat_core::AppResult;
use packrat_core::config::api::ApiConfig;
use packrat_core::error::AppError;
use packrat_core::types::ItemId;
use packrat_entity::Item;

use crate::transport::http::HttpTransport;
use crate::transport::{Method, RequestBody, Transport};

use super::inventory::Inventory;

/// Wire shape of a single item's tag set: `{ "tags": {...} }`.
#[derive(Deserialize)]
struct TagsEnvelope {
    tags: HashMap<String, String>,
}

/// Client-side item operations: load/save/delete, checkout workflows, tag
/// edits, and the derived hierarchy queries.
#[derive(Clone)]
pub struct ItemService {
    transport: Arc<dyn Transport>,
}

impl ItemService {
    /// Create a service over an existing transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Create a service with an HTTP transport built from API settings.
    pub fn from_config(config: &ApiConfig) -> AppResult<Self> {
        Ok(Self::new(Arc::new(HttpTransport::from_config(config)?)))
    }

    /// Fetch a single item by ID.
    ///
    /// Fails with a not-found error when the service reports no such ID,
    /// and a transport error on network or parse failure.
    pub async fn load(&self, id: &ItemId) -> AppResult<Item> {
        let response = self
            .transport
            .request(Method::GET, &format!("/items/{id}"), None)
            .await?;
        let envelope: TagsEnvelope = decode(response)?;
        Item::new(id.clone(), envelope.tags)
    }

    /// Fetch every item in one call.
    ///
    /// This is the substrate for all derived hierarchy queries; there is
    /// no server-side filtering.
    pub async fn fetch_all(&self) -> AppResult<Inventory> {
        let response = self
            .transport
            .request(Method::GET, "/items/", None)
            .await?;
        let entries: HashMap<String, TagsEnvelope> = decode(response)?;

        let mut items = Vec::with_capacity(entries.len());
        for (raw_id, envelope) in entries {
            items.push(Item::new(ItemId::parse(raw_id)?, envelope.tags)?);
        }
        Ok(Inventory::from_items(items))
    }

    /// Idempotent upsert of the full item.
    pub async fn save(&self, item: &Item) -> AppResult<()> {
        let body = serde_json::to_value(item)?;
        self.transport
            .request(Method::POST, "/items/", Some(RequestBody::Json(body)))
            .await?;
        Ok(())
    }

    /// Remove the remote record. The in-memory item is left untouched.
    pub async fn delete(&self, id: &ItemId) -> AppResult<()> {
        self.transport
            .request(Method::DELETE, &format!("/items/{id}"), None)
            .await?;
        Ok(())
    }

    /// Check the item out, stamping the current time, then persist.
    pub async fn check_out(&self, item: &mut Item) -> AppResult<()> {
        item.check_out(Utc::now());
        self.save(item).await
    }

    /// Check the item in, then persist.
    pub async fn check_in(&self, item: &mut Item) -> AppResult<()> {
        item.check_in();
        self.save(item).await
    }

    /// Set one tag through the field-level endpoint, then resynchronize
    /// the local item from the updated-item response.
    pub async fn update_tag(&self, item: &mut Item, key: &str, value: &str) -> AppResult<()> {
        item.set_tag(key, value)?;
        let response = self
            .transport
            .request(
                Method::PUT,
                &format!("/items/{}/tags/{key}", item.id()),
                Some(RequestBody::Text(value.to_string())),
            )
            .await?;
        resync(item, response)
    }

    /// Delete one tag through the field-level endpoint, then
    /// resynchronize. Deleting an absent key is a no-op server-side too.
    pub async fn delete_tag(&self, item: &mut Item, key: &str) -> AppResult<()> {
        item.remove_tag(key);
        let response = self
            .transport
            .request(
                Method::DELETE,
                &format!("/items/{}/tags/{key}", item.id()),
                None,
            )
            .await?;
        resync(item, response)
    }

    /// Set the description, then persist.
    pub async fn set_description(&self, item: &mut Item, description: &str) -> AppResult<()> {
        item.set_description(description);
        self.save(item).await
    }

    /// Place the item inside another item, then persist.
    pub async fn set_parent(&self, item: &mut Item, parent: ItemId) -> AppResult<()> {
        item.set_parent(parent);
        self.save(item).await
    }

    /// Make the item root-level again, then persist.
    pub async fn remove_parent(&self, item: &mut Item) -> AppResult<()> {
        item.remove_parent();
        self.save(item).await
    }

    /// Server-authoritative checkout: the service stamps the timestamps
    /// and returns the updated item.
    pub async fn check_out_remote(&self, id: &ItemId) -> AppResult<Item> {
        let response = self
            .transport
            .request(Method::POST, &format!("/items/{id}/check_out"), None)
            .await?;
        decode(response)
    }

    /// Server-authoritative check-in; returns the updated item.
    pub async fn check_in_remote(&self, id: &ItemId) -> AppResult<Item> {
        let response = self
            .transport
            .request(Method::POST, &format!("/items/{id}/check_in"), None)
            .await?;
        decode(response)
    }

    /// Direct children of the item, sorted ascending by description.
    /// Fetches the full item set; O(N) in total item count.
    pub async fn contents(&self, item: &Item) -> AppResult<Vec<Item>> {
        let inventory = self.fetch_all().await?;
        Ok(inventory
            .contents_of(item.id())
            .into_iter()
            .cloned()
            .collect())
    }

    /// Place the item inside a uniformly random placeable item and
    /// persist. Fails with a validation error when no placeable item
    /// exists; an undefined parent is never assigned.
    pub async fn roll_storage(&self, item: &mut Item) -> AppResult<ItemId> {
        let inventory = self.fetch_all().await?;
        let candidates = inventory.placeable();
        let target = candidates
            .choose(&mut rand::rng())
            .ok_or_else(|| AppError::validation("no placeable items to roll storage into"))?;

        let target_id = target.id().clone();
        debug!(item = %item.id(), target = %target_id, "rolled storage");
        item.set_parent(target_id.clone());
        self.save(item).await?;
        Ok(target_id)
    }
}

/// Decode a JSON response into an expected shape. A shape mismatch is a
/// transport-level failure: the service answered with something the
/// contract does not allow.
fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> AppResult<T> {
    serde_json::from_value(value).map_err(|e| {
        AppError::with_source(
            packrat_core::error::ErrorKind::Transport,
            format!("unexpected response shape: {e}"),
            e,
        )
    })
}

/// Replace the local item with the updated-item JSON returned by the
/// field-level endpoints. A `null` response (implementation-defined)
/// leaves the local state as the source of truth.
fn resync(item: &mut Item, response: serde_json::Value) -> AppResult<()> {
    if response.is_null() {
        return Ok(());
    }
    *item = decode(response)?;
    Ok(())
}
