//! In-memory stand-in for the inventory service.
//!
//! Implements [`Transport`] over a plain map, speaking the same REST
//! surface the HTTP transport would reach, so the item service can be
//! exercised without a network.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use packrat_client::{Method, RequestBody, Transport};
use packrat_core::{AppError, AppResult};

/// Mock inventory backend: item ID → tag map.
#[derive(Default)]
pub struct MockBackend {
    store: Mutex<HashMap<String, HashMap<String, String>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an item directly into the backing store.
    pub fn insert(&self, id: &str, tags: &[(&str, &str)]) {
        self.store.lock().expect("lock").insert(
            id.to_string(),
            tags.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
    }

    /// The stored tag map for an item, if present.
    pub fn tags_of(&self, id: &str) -> Option<HashMap<String, String>> {
        self.store.lock().expect("lock").get(id).cloned()
    }
}

#[async_trait]
impl Transport for MockBackend {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> AppResult<Value> {
        let mut store = self.store.lock().expect("lock");
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

        let response = match segments.as_slice() {
            ["items"] if method == Method::GET => {
                let entries: serde_json::Map<String, Value> = store
                    .iter()
                    .map(|(id, tags)| (id.clone(), json!({ "tags": tags })))
                    .collect();
                Value::Object(entries)
            }
            ["items"] if method == Method::POST => {
                let Some(RequestBody::Json(payload)) = body else {
                    return Err(AppError::transport("upsert requires a JSON body"));
                };
                let id = payload["id"]
                    .as_str()
                    .ok_or_else(|| AppError::transport("upsert body missing id"))?
                    .to_string();
                let tags: HashMap<String, String> = serde_json::from_value(payload["tags"].clone())
                    .map_err(|e| AppError::transport(format!("bad upsert tags: {e}")))?;
                store.insert(id, tags);
                Value::Null
            }
            ["items", id] if method == Method::GET => {
                let tags = store
                    .get(*id)
                    .ok_or_else(|| AppError::not_found(format!("no item `{id}`")))?;
                json!({ "tags": tags })
            }
            ["items", id] if method == Method::DELETE => {
                store.remove(*id);
                Value::Null
            }
            ["items", id, "check_out"] if method == Method::POST => {
                let tags = store
                    .get_mut(*id)
                    .ok_or_else(|| AppError::not_found(format!("no item `{id}`")))?;
                let stamp = "2026-08-26T12:00:00.000Z".to_string();
                tags.insert("_checked_out_at".to_string(), stamp.clone());
                tags.insert("last_checked_out".to_string(), stamp);
                json!({ "id": id, "tags": tags })
            }
            ["items", id, "check_in"] if method == Method::POST => {
                let tags = store
                    .get_mut(*id)
                    .ok_or_else(|| AppError::not_found(format!("no item `{id}`")))?;
                tags.remove("_checked_out_at");
                json!({ "id": id, "tags": tags })
            }
            ["items", id, "tags", key] if method == Method::PUT => {
                let Some(RequestBody::Text(value)) = body else {
                    return Err(AppError::transport("tag PUT requires a raw body"));
                };
                let tags = store
                    .get_mut(*id)
                    .ok_or_else(|| AppError::not_found(format!("no item `{id}`")))?;
                tags.insert(key.to_string(), value);
                json!({ "id": id, "tags": tags })
            }
            ["items", id, "tags", key] if method == Method::DELETE => {
                let tags = store
                    .get_mut(*id)
                    .ok_or_else(|| AppError::not_found(format!("no item `{id}`")))?;
                tags.remove(*key);
                json!({ "id": id, "tags": tags })
            }
            _ => {
                return Err(AppError::transport(format!(
                    "unhandled route: {method} {path}"
                )));
            }
        };

        Ok(response)
    }
}
