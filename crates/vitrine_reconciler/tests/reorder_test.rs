//! Tests for optimistic reordering and queued persistence.

use std::sync::Arc;
use vitrine_core::{ItemDraft, ItemFilter, ItemId};
use vitrine_error::{ValidationErrorKind, VitrineErrorKind};
use vitrine_interface::ItemStore;
use vitrine_reconciler::{Reconciler, ReconcilerConfig, SyncState};
use vitrine_storage::InMemoryItemStore;

async fn seeded(
    titles: &[&str],
    config: ReconcilerConfig,
) -> (Arc<InMemoryItemStore>, Reconciler<InMemoryItemStore>) {
    let store = Arc::new(InMemoryItemStore::new());
    let reconciler = Reconciler::new(store.clone(), "stavrin", config);
    for title in titles {
        reconciler
            .create(ItemDraft::builder().title(*title).build().unwrap())
            .await
            .unwrap();
    }
    (store, reconciler)
}

async fn titles(reconciler: &Reconciler<InMemoryItemStore>) -> Vec<String> {
    reconciler
        .items()
        .await
        .into_iter()
        .map(|item| item.title)
        .collect()
}

async fn stored_titles(store: &InMemoryItemStore) -> Vec<String> {
    store
        .list(&ItemFilter::admin("stavrin"))
        .await
        .unwrap()
        .into_iter()
        .map(|item| item.title)
        .collect()
}

#[tokio::test]
async fn test_move_first_to_last_persists_three_positions() {
    let (store, reconciler) = seeded(&["A", "B", "C"], ReconcilerConfig::default()).await;

    let outcome = reconciler.reorder(0, 2).await.unwrap();

    assert_eq!(titles(&reconciler).await, vec!["B", "C", "A"]);
    let indices: Vec<i64> = reconciler
        .items()
        .await
        .iter()
        .map(|item| item.order_index)
        .collect();
    assert_eq!(indices, vec![0, 1, 2]);

    assert!(outcome.is_complete());
    assert!(outcome.warning().is_none());
    assert_eq!(outcome.persisted.len(), 3);
    assert_eq!(outcome.from, 0);
    assert_eq!(outcome.to, 2);
    assert_eq!(store.update_count(), 3);

    assert_eq!(stored_titles(&store).await, vec!["B", "C", "A"]);
}

#[tokio::test]
async fn test_only_changed_positions_are_written() {
    let (store, reconciler) = seeded(&["A", "B", "C", "D"], ReconcilerConfig::default()).await;

    let outcome = reconciler.reorder(1, 2).await.unwrap();

    assert_eq!(titles(&reconciler).await, vec!["A", "C", "B", "D"]);
    assert_eq!(outcome.persisted.len(), 2);
    assert_eq!(store.update_count(), 2);
}

#[tokio::test]
async fn test_persist_unchanged_writes_every_position() {
    let config = ReconcilerConfig::default().with_persist_unchanged(true);
    let (store, reconciler) = seeded(&["A", "B", "C", "D"], config).await;

    reconciler.reorder(1, 2).await.unwrap();

    assert_eq!(store.update_count(), 4);
}

#[tokio::test]
async fn test_same_position_is_a_no_op() {
    let (store, reconciler) = seeded(&["A", "B", "C"], ReconcilerConfig::default()).await;

    let outcome = reconciler.reorder(1, 1).await.unwrap();

    assert!(outcome.persisted.is_empty());
    assert!(outcome.is_complete());
    assert_eq!(store.update_count(), 0);
    assert_eq!(titles(&reconciler).await, vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_out_of_range_is_rejected_without_writes() {
    let (store, reconciler) = seeded(&["A", "B"], ReconcilerConfig::default()).await;

    let err = reconciler.reorder(0, 2).await.unwrap_err();

    match err.kind() {
        VitrineErrorKind::Validation(e) => {
            assert_eq!(e.kind, ValidationErrorKind::IndexOutOfRange { index: 2, len: 2 });
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(titles(&reconciler).await, vec!["A", "B"]);
    assert_eq!(store.update_count(), 0);
}

#[tokio::test]
async fn test_reorder_is_a_permutation() {
    let (_store, reconciler) =
        seeded(&["A", "B", "C", "D", "E"], ReconcilerConfig::default()).await;

    for (from, to) in [(4, 0), (1, 3), (2, 2), (0, 4), (3, 1)] {
        reconciler.reorder(from, to).await.unwrap();

        let mut sorted = titles(&reconciler).await;
        assert_eq!(sorted.len(), 5);
        sorted.sort();
        assert_eq!(sorted, vec!["A", "B", "C", "D", "E"]);
    }
}

#[tokio::test]
async fn test_queued_reorders_converge_on_final_order() {
    let (store, reconciler) =
        seeded(&["A", "B", "C", "D", "E"], ReconcilerConfig::default()).await;

    let mut pending = Vec::new();
    for (from, to) in [(0, 4), (4, 0), (2, 3), (1, 4), (3, 0)] {
        pending.push(reconciler.begin_reorder(from, to).await.unwrap());
    }
    for reorder in pending {
        assert!(reorder.settled().await.unwrap().is_complete());
    }

    assert_eq!(stored_titles(&store).await, titles(&reconciler).await);
    assert!(
        reconciler
            .entries()
            .await
            .iter()
            .all(|entry| entry.state == SyncState::Settled)
    );
}

#[tokio::test]
async fn test_new_order_is_visible_before_persistence() {
    let (store, reconciler) = seeded(&["A", "B", "C"], ReconcilerConfig::default()).await;

    let pending = reconciler.begin_reorder(2, 0).await.unwrap();

    // Visible immediately
    assert_eq!(titles(&reconciler).await, vec!["C", "A", "B"]);
    assert_eq!(pending.writes().len(), 3);

    let outcome = pending.settled().await.unwrap();
    assert_eq!(outcome.moved, reconciler.items().await[0].id);
    assert_eq!(stored_titles(&store).await, vec!["C", "A", "B"]);
    assert!(!reconciler.is_stale().await);
}

#[tokio::test]
async fn test_repeated_position_write_is_idempotent() {
    let (store, reconciler) = seeded(&["A", "B"], ReconcilerConfig::default()).await;
    let id: ItemId = reconciler.items().await[0].id.clone();

    store.set_order_index(&id, 1).await.unwrap();
    let once = store.get(&id).await.unwrap();
    store.set_order_index(&id, 1).await.unwrap();
    let twice = store.get(&id).await.unwrap();

    assert_eq!(once, twice);
}

#[tokio::test]
async fn test_shutdown_drains_queue() {
    let (store, reconciler) = seeded(&["A", "B", "C"], ReconcilerConfig::default()).await;

    let pending = reconciler.begin_reorder(0, 2).await.unwrap();
    drop(pending);
    reconciler.shutdown().await;

    assert_eq!(stored_titles(&store).await, vec!["B", "C", "A"]);
}
