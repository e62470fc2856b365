//! Tests for drafts, insert records, and patches.

use regex::Regex;
use vitrine_core::{Item, ItemDraft, ItemId, ItemPatch, Media, NewItem};
use vitrine_error::{ValidationErrorKind, VitrineErrorKind};

#[test]
fn test_empty_title_is_rejected() {
    let draft = ItemDraft::builder().title("   ").build().unwrap();
    let err = draft.validate().unwrap_err();

    match err.kind() {
        VitrineErrorKind::Validation(e) => {
            assert_eq!(e.kind, ValidationErrorKind::MissingField("title".to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_derived_slug_matches_pattern() {
    let draft = ItemDraft::builder().title("Hello World!").build().unwrap();
    let record = NewItem::from_draft("stavrin", draft, 0, 1_718_000_000_123);

    let pattern = Regex::new(r"^hello-world-\d+$").unwrap();
    assert!(pattern.is_match(&record.slug), "slug was {}", record.slug);
}

#[test]
fn test_identical_titles_at_different_times_get_distinct_slugs() {
    let draft = ItemDraft::builder().title("Same").build().unwrap();
    let first = NewItem::from_draft("stavrin", draft.clone(), 0, 1000);
    let second = NewItem::from_draft("stavrin", draft, 1, 1001);

    assert_ne!(first.slug, second.slug);
}

#[test]
fn test_explicit_slug_is_kept_verbatim() {
    let draft = ItemDraft::builder()
        .title("Hello World")
        .slug("tip-the-balance")
        .build()
        .unwrap();
    let record = NewItem::from_draft("stavrin", draft, 0, 1000);

    assert_eq!(record.slug, "tip-the-balance");
}

#[test]
fn test_blank_explicit_slug_is_derived() {
    let draft = ItemDraft::builder()
        .title("Hello")
        .slug("  ")
        .build()
        .unwrap();
    let record = NewItem::from_draft("stavrin", draft, 0, 1000);

    assert_eq!(record.slug, "hello-1000");
}

#[test]
fn test_new_item_wire_shape() {
    let draft = ItemDraft::builder()
        .title("Song")
        .media(vec![Media::audio("https://cdn.example/a.mp3")])
        .tags(vec!["audio".to_string()])
        .build()
        .unwrap();
    let record = NewItem::from_draft("stavrin", draft, 4, 1000);
    let value = serde_json::to_value(&record).unwrap();

    assert_eq!(value["order_idx"], serde_json::json!(4));
    assert_eq!(value["visible"], serde_json::json!(true));
    assert!(value.get("content").is_none());
    assert_eq!(value["media"][0]["type"], serde_json::json!("audio"));
}

fn sample_item() -> Item {
    let draft = ItemDraft::builder().title("Song").build().unwrap();
    NewItem::from_draft("stavrin", draft, 2, 1000).into_item(ItemId::new("abc"))
}

#[test]
fn test_patch_leaves_slug_alone() {
    let mut item = sample_item();
    let original_slug = item.slug.clone();

    ItemPatch::default().with_title("Renamed").apply_to(&mut item);

    assert_eq!(item.title, "Renamed");
    assert_eq!(item.slug, original_slug);
    assert_eq!(item.order_index, 2);
}

#[test]
fn test_patch_with_explicit_slug_has_no_suffix() {
    let mut item = sample_item();

    ItemPatch::default().with_slug("fresh-name").apply_to(&mut item);

    assert_eq!(item.slug, "fresh-name");
}

#[test]
fn test_reposition_is_idempotent() {
    let mut once = sample_item();
    let mut twice = sample_item();
    let patch = ItemPatch::reposition(9);

    patch.apply_to(&mut once);
    patch.apply_to(&mut twice);
    patch.apply_to(&mut twice);

    assert_eq!(once, twice);
    assert_eq!(once.order_index, 9);
}

#[test]
fn test_patch_validation_and_emptiness() {
    assert!(ItemPatch::default().is_empty());
    assert!(!ItemPatch::reposition(0).is_empty());
    assert!(ItemPatch::default().with_title("").validate().is_err());
    assert!(ItemPatch::default().with_excerpt("").validate().is_ok());
}
