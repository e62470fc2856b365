//! Display-ready projection of an item for the public gallery.

use crate::{ContentBlock, Item, ItemId, classify};
use serde::Serialize;

/// Image shown when an item has no image media.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.png";

/// What a gallery tile and its expanded view need.
///
/// # Examples
///
/// ```
/// use vitrine_core::{Item, ItemId, Media, PLACEHOLDER_IMAGE, Tile};
///
/// let item = Item {
///     id: ItemId::new("1"),
///     site_slug: "stavrin".to_string(),
///     title: "Night Swim".to_string(),
///     slug: "night-swim".to_string(),
///     excerpt: "Cold water".to_string(),
///     content: None,
///     legacy_body: None,
///     media: vec![Media::audio("https://cdn.example/swim.mp3")],
///     visible: true,
///     order_index: 0,
///     tags: vec![],
///     start_date: None,
///     premium: false,
/// };
///
/// let tile = Tile::from(&item);
/// assert_eq!(tile.image_url, PLACEHOLDER_IMAGE);
/// assert_eq!(tile.audio_url.as_deref(), Some("https://cdn.example/swim.mp3"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    /// Item identifier
    pub id: ItemId,
    /// Display title
    pub title: String,
    /// URL-safe name
    pub slug: String,
    /// Short blurb
    pub excerpt: String,
    /// First image, or the placeholder
    pub image_url: String,
    /// First audio clip, if any
    pub audio_url: Option<String>,
    /// Body (content, else excerpt) split into embeddable blocks
    pub body: Vec<ContentBlock>,
    /// Free-form tags
    pub tags: Vec<String>,
}

impl From<&Item> for Tile {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            slug: item.slug.clone(),
            excerpt: item.excerpt.clone(),
            image_url: item.image_url().unwrap_or(PLACEHOLDER_IMAGE).to_string(),
            audio_url: item.audio_url().map(str::to_string),
            body: classify(item.body()),
            tags: item.tags.clone(),
        }
    }
}
