//! The published item record.

use crate::{Media, MediaKind};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque identifier assigned by the item store.
///
/// Hosted tables may hand out numeric or UUID keys; both deserialize into the
/// same string form.
///
/// # Examples
///
/// ```
/// use vitrine_core::ItemId;
///
/// let id: ItemId = serde_json::from_str("42").unwrap();
/// assert_eq!(id.as_str(), "42");
/// let id: ItemId = serde_json::from_str("\"a1b2\"").unwrap();
/// assert_eq!(id.to_string(), "a1b2");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, derive_more::Display, derive_more::From,
)]
#[serde(transparent)]
#[display("{}", _0)]
pub struct ItemId(String);

impl ItemId {
    /// Wrap a store-assigned identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        })
    }
}

/// A content entry in one site's listing.
///
/// Field names on the wire follow the hosted `items` table (`site_slug`,
/// `order_idx`). The table carries both a `body` column, written by older
/// admin forms, and a `content` column; both are read and [`Item::body`]
/// merges them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Store-assigned identifier, immutable after creation
    pub id: ItemId,
    /// Partition (site) this item belongs to
    pub site_slug: String,
    /// Display title
    pub title: String,
    /// URL-safe name, unique within the site
    pub slug: String,
    /// Short blurb shown on the tile
    #[serde(default, deserialize_with = "null_as_default")]
    pub excerpt: String,
    /// Long-form text shown when the tile is opened
    #[serde(default)]
    pub content: Option<String>,
    /// Legacy `body` column, read but never written
    #[serde(rename = "body", default, skip_serializing)]
    pub legacy_body: Option<String>,
    /// Attached media, looked up by kind
    #[serde(default, deserialize_with = "null_as_default")]
    pub media: Vec<Media>,
    /// Whether the public listing shows this item
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Display position within the site
    #[serde(rename = "order_idx", default, deserialize_with = "null_as_default")]
    pub order_index: i64,
    /// Free-form tags
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Optional date the item refers to
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Reserved for paid content
    #[serde(default, deserialize_with = "null_as_default")]
    pub premium: bool,
}

fn default_visible() -> bool {
    true
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Item {
    /// First media entry of the given kind.
    pub fn media_url(&self, kind: MediaKind) -> Option<&str> {
        self.media
            .iter()
            .find(|media| media.kind == kind)
            .map(|media| media.url.as_str())
    }

    /// URL of the first image, if any.
    pub fn image_url(&self) -> Option<&str> {
        self.media_url(MediaKind::Image)
    }

    /// URL of the first audio clip, if any.
    pub fn audio_url(&self) -> Option<&str> {
        self.media_url(MediaKind::Audio)
    }

    /// Text to show in the expanded view: the first non-empty of `content`,
    /// the legacy `body` column, and the excerpt.
    pub fn body(&self) -> &str {
        [self.content.as_deref(), self.legacy_body.as_deref()]
            .into_iter()
            .flatten()
            .find(|text| !text.is_empty())
            .unwrap_or(self.excerpt.as_str())
    }
}
