//! Admin drafts and the insert records built from them.

use crate::{Item, ItemId, Media, unique_slug};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use vitrine_error::{ValidationError, ValidationErrorKind, VitrineResult};

/// Fields an admin fills in before an item exists.
///
/// # Examples
///
/// ```
/// use vitrine_core::ItemDraft;
///
/// let draft = ItemDraft::builder()
///     .title("Tip the Balance")
///     .excerpt("A short story")
///     .build()
///     .unwrap();
///
/// assert!(draft.visible);
/// assert!(draft.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into), default)]
pub struct ItemDraft {
    /// Display title (required)
    pub title: String,
    /// Short blurb
    pub excerpt: String,
    /// Long-form text
    #[builder(setter(into, strip_option))]
    pub content: Option<String>,
    /// Explicit slug; derived from the title when absent or blank
    #[builder(setter(into, strip_option))]
    pub slug: Option<String>,
    /// Media collected from uploads
    pub media: Vec<Media>,
    /// Whether the public listing shows the item
    pub visible: bool,
    /// Free-form tags
    pub tags: Vec<String>,
    /// Optional date the item refers to
    #[builder(setter(into, strip_option))]
    pub start_date: Option<NaiveDate>,
    /// Reserved for paid content
    pub premium: bool,
}

impl Default for ItemDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            excerpt: String::new(),
            content: None,
            slug: None,
            media: Vec::new(),
            visible: true,
            tags: Vec::new(),
            start_date: None,
            premium: false,
        }
    }
}

impl ItemDraft {
    /// Creates a new builder for `ItemDraft`.
    pub fn builder() -> ItemDraftBuilder {
        ItemDraftBuilder::default()
    }

    /// Reject drafts that must not reach the store.
    pub fn validate(&self) -> VitrineResult<()> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::MissingField(
                "title".to_string(),
            ))
            .into());
        }
        Ok(())
    }
}

/// Split a comma-separated tag list, trimming entries and dropping empties.
///
/// # Examples
///
/// ```
/// use vitrine_core::parse_tags;
///
/// assert_eq!(parse_tags(" poem, ,audio,"), vec!["poem", "audio"]);
/// assert!(parse_tags("").is_empty());
/// ```
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Record sent to the store's create operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    /// Partition (site) the item belongs to
    pub site_slug: String,
    /// Display title
    pub title: String,
    /// URL-safe name
    pub slug: String,
    /// Short blurb
    pub excerpt: String,
    /// Long-form text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Attached media
    pub media: Vec<Media>,
    /// Whether the public listing shows the item
    pub visible: bool,
    /// Append position in the site's sequence
    #[serde(rename = "order_idx")]
    pub order_index: i64,
    /// Free-form tags
    pub tags: Vec<String>,
    /// Optional date the item refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Reserved for paid content
    pub premium: bool,
}

impl NewItem {
    /// Build the insert record for a validated draft.
    ///
    /// A blank slug is derived from the title and suffixed with the creation
    /// timestamp; an explicit slug is kept verbatim.
    ///
    /// # Examples
    ///
    /// ```
    /// use vitrine_core::{ItemDraft, NewItem};
    ///
    /// let draft = ItemDraft::builder().title("Hello World!").build().unwrap();
    /// let record = NewItem::from_draft("stavrin", draft, 3, 1_700_000_000_000);
    /// assert_eq!(record.slug, "hello-world-1700000000000");
    /// assert_eq!(record.order_index, 3);
    /// ```
    pub fn from_draft(
        site_slug: &str,
        draft: ItemDraft,
        order_index: i64,
        created_at_ms: i64,
    ) -> Self {
        let slug = match draft.slug.as_deref().map(str::trim) {
            Some(explicit) if !explicit.is_empty() => explicit.to_string(),
            _ => unique_slug(&draft.title, created_at_ms),
        };

        Self {
            site_slug: site_slug.to_string(),
            title: draft.title.trim().to_string(),
            slug,
            excerpt: draft.excerpt,
            content: draft.content,
            media: draft.media,
            visible: draft.visible,
            order_index,
            tags: draft.tags,
            start_date: draft.start_date,
            premium: draft.premium,
        }
    }

    /// Attach the store-assigned id.
    pub fn into_item(self, id: ItemId) -> Item {
        Item {
            id,
            site_slug: self.site_slug,
            title: self.title,
            slug: self.slug,
            excerpt: self.excerpt,
            content: self.content,
            legacy_body: None,
            media: self.media,
            visible: self.visible,
            order_index: self.order_index,
            tags: self.tags,
            start_date: self.start_date,
            premium: self.premium,
        }
    }
}
