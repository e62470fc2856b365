//! Tests for create, update, delete, list, and load.

use regex::Regex;
use std::sync::Arc;
use vitrine_core::{Item, ItemDraft, ItemFilter, ItemId, ItemPatch, NewItem};
use vitrine_error::{StoreErrorKind, ValidationErrorKind, VitrineErrorKind};
use vitrine_interface::ItemStore;
use vitrine_reconciler::{Reconciler, ReconcilerConfig};
use vitrine_storage::InMemoryItemStore;

fn reconciler() -> (Arc<InMemoryItemStore>, Reconciler<InMemoryItemStore>) {
    let store = Arc::new(InMemoryItemStore::new());
    let reconciler = Reconciler::new(store.clone(), "stavrin", ReconcilerConfig::default());
    (store, reconciler)
}

fn draft(title: &str) -> ItemDraft {
    ItemDraft::builder().title(title).build().unwrap()
}

#[tokio::test]
async fn test_empty_title_makes_no_remote_call() {
    let (store, reconciler) = reconciler();

    let err = reconciler.create(draft("  ")).await.unwrap_err();

    match err.kind() {
        VitrineErrorKind::Validation(e) => {
            assert_eq!(e.kind, ValidationErrorKind::MissingField("title".to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(store.is_empty().await);
    assert!(reconciler.is_empty().await);
}

#[tokio::test]
async fn test_create_derives_slug_and_appends() {
    let (_store, reconciler) = reconciler();

    let first = reconciler.create(draft("Hello World!")).await.unwrap();
    let second = reconciler.create(draft("Second")).await.unwrap();

    let pattern = Regex::new(r"^hello-world-\d+$").unwrap();
    assert!(pattern.is_match(&first.slug), "slug was {}", first.slug);
    assert_eq!(first.order_index, 0);
    assert_eq!(second.order_index, 1);
    assert_eq!(reconciler.items().await, vec![first, second]);
}

#[tokio::test]
async fn test_identical_titles_get_distinct_slugs() {
    let (_store, reconciler) = reconciler();

    let mut slugs = Vec::new();
    for _ in 0..5 {
        slugs.push(reconciler.create(draft("Same")).await.unwrap().slug);
    }

    let mut unique = slugs.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), slugs.len());
}

#[tokio::test]
async fn test_update_mirrors_patch_and_keeps_explicit_slug() {
    let (store, reconciler) = reconciler();
    let item = reconciler.create(draft("Original")).await.unwrap();

    let patch = ItemPatch::default()
        .with_title("Renamed")
        .with_slug("my-custom-slug");
    reconciler.update(&item.id, patch).await.unwrap();

    let local = &reconciler.items().await[0];
    assert_eq!(local.title, "Renamed");
    assert_eq!(local.slug, "my-custom-slug");
    assert_eq!(local.order_index, item.order_index);

    let stored = store.get(&item.id).await.unwrap();
    assert_eq!(stored.slug, "my-custom-slug");
    assert_eq!(&stored, local);
}

#[tokio::test]
async fn test_update_with_blank_title_is_rejected() {
    let (store, reconciler) = reconciler();
    let item = reconciler.create(draft("Keep")).await.unwrap();

    assert!(
        reconciler
            .update(&item.id, ItemPatch::default().with_title(""))
            .await
            .is_err()
    );
    assert_eq!(store.update_count(), 0);
}

#[tokio::test]
async fn test_update_unknown_id_makes_no_remote_call() {
    let (store, reconciler) = reconciler();

    let err = reconciler
        .update(&ItemId::new("ghost"), ItemPatch::default().with_visible(false))
        .await
        .unwrap_err();

    match err.kind() {
        VitrineErrorKind::Store(e) => assert!(matches!(e.kind, StoreErrorKind::NotFound(_))),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.update_count(), 0);
}

#[tokio::test]
async fn test_delete_keeps_relative_order_of_others() {
    let (store, reconciler) = reconciler();
    let a = reconciler.create(draft("A")).await.unwrap();
    let b = reconciler.create(draft("B")).await.unwrap();
    let c = reconciler.create(draft("C")).await.unwrap();

    reconciler.delete(&b.id).await.unwrap();

    let ids: Vec<ItemId> = reconciler.items().await.into_iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![a.id, c.id]);
    assert!(store.get(&b.id).await.is_none());
}

#[tokio::test]
async fn test_list_respects_visibility() {
    let (_store, reconciler) = reconciler();
    reconciler.create(draft("Shown")).await.unwrap();
    let hidden = reconciler
        .create(ItemDraft::builder().title("Hidden").visible(false).build().unwrap())
        .await
        .unwrap();

    let public = reconciler.list(true).await.unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].title, "Shown");

    let admin = reconciler.list(false).await.unwrap();
    assert_eq!(admin.len(), 2);
    assert_eq!(admin[1].id, hidden.id);
}

#[tokio::test]
async fn test_load_sorts_existing_rows() {
    let store = Arc::new(InMemoryItemStore::new());
    for (title, order_index) in [("Third", 9), ("First", 1), ("Second", 4)] {
        store
            .create(&NewItem::from_draft("stavrin", draft(title), order_index, order_index))
            .await
            .unwrap();
    }
    store
        .create(&NewItem::from_draft("elsewhere", draft("Other"), 0, 0))
        .await
        .unwrap();

    let reconciler = Reconciler::new(store.clone(), "stavrin", ReconcilerConfig::default());
    let loaded = reconciler.load().await.unwrap();

    let titles: Vec<String> = loaded.iter().map(|i| i.title.clone()).collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
    assert_eq!(reconciler.items().await, loaded);

    // Reorder renumbers the gapped indices
    reconciler.reorder(0, 1).await.unwrap();
    let stored: Vec<Item> = store.list(&ItemFilter::admin("stavrin")).await.unwrap();
    let stored_indices: Vec<i64> = stored.iter().map(|i| i.order_index).collect();
    assert_eq!(stored_indices, vec![0, 1, 2]);
}
