//! Item service tests against the in-memory mock backend.

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use common::MockBackend;

use packrat_client::ItemService;
use packrat_core::error::ErrorKind;
use packrat_core::types::ItemId;
use packrat_entity::Item;

fn service() -> (ItemService, Arc<MockBackend>) {
    let backend = Arc::new(MockBackend::new());
    (ItemService::new(backend.clone()), backend)
}

fn id(s: &str) -> ItemId {
    ItemId::parse(s).expect("should parse")
}

fn tag_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn test_save_then_load_roundtrip() {
    let (service, _) = service();
    let item = Item::new(
        id("box-1"),
        tag_map(&[
            ("_description", "a red toolbox"),
            ("_parent", "Shelf-3"),
            ("color", "red"),
        ]),
    )
    .expect("should build");

    service.save(&item).await.expect("save");
    let loaded = service.load(&id("box-1")).await.expect("load");

    assert_eq!(loaded.to_tag_map(), item.to_tag_map());
    assert_eq!(loaded, item);
}

#[tokio::test]
async fn test_load_missing_is_not_found() {
    let (service, _) = service();
    let err = service.load(&id("ghost")).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_check_out_then_check_in_persists_transitions() {
    let (service, backend) = service();
    let mut item = Item::empty(id("drill"));
    service.save(&item).await.expect("save");

    service.check_out(&mut item).await.expect("check out");
    let stored = backend.tags_of("drill").expect("stored");
    let stamp = stored.get("_checked_out_at").expect("stamp").clone();
    assert_eq!(stored.get("last_checked_out"), Some(&stamp));

    service.check_in(&mut item).await.expect("check in");
    let stored = backend.tags_of("drill").expect("stored");
    assert!(!stored.contains_key("_checked_out_at"));
    assert_eq!(stored.get("last_checked_out"), Some(&stamp));
    assert!(!item.is_checked_out());
}

#[tokio::test]
async fn test_update_tag_persists_and_resyncs() {
    let (service, backend) = service();
    backend.insert("box-1", &[("_description", "a box")]);
    let mut item = service.load(&id("box-1")).await.expect("load");

    service
        .update_tag(&mut item, "color", "red")
        .await
        .expect("update tag");

    assert_eq!(item.tag("color").as_deref(), Some("red"));
    let stored = backend.tags_of("box-1").expect("stored");
    assert_eq!(stored.get("color").map(String::as_str), Some("red"));
    assert_eq!(stored.get("_description").map(String::as_str), Some("a box"));
}

#[tokio::test]
async fn test_delete_absent_tag_is_noop() {
    let (service, backend) = service();
    backend.insert("box-1", &[("color", "red")]);
    let mut item = service.load(&id("box-1")).await.expect("load");
    let before = item.to_tag_map();

    service
        .delete_tag(&mut item, "no-such-tag")
        .await
        .expect("delete tag");

    assert_eq!(item.to_tag_map(), before);
    assert_eq!(backend.tags_of("box-1").expect("stored"), before);
}

#[tokio::test]
async fn test_delete_removes_remote_record_only() {
    let (service, _) = service();
    let item = Item::new(id("box-1"), tag_map(&[("color", "red")])).expect("should build");
    service.save(&item).await.expect("save");

    service.delete(item.id()).await.expect("delete");

    let err = service.load(&id("box-1")).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    // Local state is untouched by a remote delete.
    assert_eq!(item.tag("color").as_deref(), Some("red"));
}

#[tokio::test]
async fn test_contents_matches_case_and_sorts_by_description() {
    let (service, backend) = service();
    backend.insert("A", &[]);
    backend.insert("b1", &[("_parent", "a"), ("_description", "Zed")]);
    backend.insert("b2", &[("_parent", "A"), ("_description", "Apple")]);
    backend.insert("b3", &[("_parent", "a"), ("_description", "Mango")]);
    backend.insert("elsewhere", &[("_description", "Aardvark")]);

    let container = service.load(&id("A")).await.expect("load");
    let contents = service.contents(&container).await.expect("contents");

    let descriptions: Vec<_> = contents
        .iter()
        .map(|i| i.description().unwrap_or("").to_string())
        .collect();
    assert_eq!(descriptions, vec!["Apple", "Mango", "Zed"]);
}

#[tokio::test]
async fn test_roll_storage_single_candidate_is_deterministic() {
    let (service, backend) = service();
    backend.insert("the-bin", &[("placeable", "1")]);
    backend.insert("loose-item", &[]);

    let mut item = service.load(&id("loose-item")).await.expect("load");
    let target = service.roll_storage(&mut item).await.expect("roll");

    assert_eq!(target.as_str(), "the-bin");
    assert!(item.parent().expect("parent").matches(&target));
    let stored = backend.tags_of("loose-item").expect("stored");
    assert_eq!(stored.get("_parent").map(String::as_str), Some("the-bin"));
}

#[tokio::test]
async fn test_roll_storage_with_no_candidates_fails() {
    let (service, backend) = service();
    backend.insert("loose-item", &[]);

    let mut item = service.load(&id("loose-item")).await.expect("load");
    let err = service.roll_storage(&mut item).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(item.parent().is_none());
    let stored = backend.tags_of("loose-item").expect("stored");
    assert!(!stored.contains_key("_parent"));
}

#[tokio::test]
async fn test_fetch_all_is_keyed_case_insensitively() {
    let (service, backend) = service();
    backend.insert("Shelf-A", &[]);
    backend.insert("box-1", &[("_parent", "shelf-a")]);

    let inventory = service.fetch_all().await.expect("fetch all");
    assert_eq!(inventory.len(), 2);
    assert!(inventory.get(&id("SHELF-A")).is_some());
}

#[tokio::test]
async fn test_check_out_remote_returns_updated_item() {
    let (service, backend) = service();
    backend.insert("drill", &[]);

    let item = service.check_out_remote(&id("drill")).await.expect("check out");
    assert!(item.is_checked_out());
    assert_eq!(item.checked_out_at(), item.last_checked_out());

    let item = service.check_in_remote(&id("drill")).await.expect("check in");
    assert!(!item.is_checked_out());
    assert!(item.last_checked_out().is_some());
}
