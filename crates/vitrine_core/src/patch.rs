//! Partial updates.

use crate::{Item, Media};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use vitrine_error::{ValidationError, ValidationErrorKind, VitrineResult};

/// Partial field patch; `None` fields are left untouched.
///
/// The slug is never regenerated on update, so existing links keep working.
///
/// # Examples
///
/// ```
/// use vitrine_core::ItemPatch;
///
/// let patch = ItemPatch::default().with_title("Renamed").with_visible(false);
/// let json = serde_json::to_value(&patch).unwrap();
/// assert_eq!(json, serde_json::json!({"title": "Renamed", "visible": false}));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, derive_setters::Setters)]
#[setters(strip_option, into, prefix = "with_")]
pub struct ItemPatch {
    /// New title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New slug, stored verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// New excerpt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// New long-form text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Replacement media list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<Media>>,
    /// New visibility
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    /// New display position
    #[serde(rename = "order_idx", default, skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i64>,
    /// Replacement tag list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// New reference date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// New premium flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium: Option<bool>,
}

impl ItemPatch {
    /// Patch that only overwrites the display position.
    ///
    /// Applying it any number of times leaves the same state as applying it once.
    pub fn reposition(order_index: i64) -> Self {
        Self {
            order_index: Some(order_index),
            ..Self::default()
        }
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Reject patches that would blank a required field.
    pub fn validate(&self) -> VitrineResult<()> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(ValidationError::new(ValidationErrorKind::MissingField(
                    "title".to_string(),
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Mirror the patch onto an in-memory copy.
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(title) = &self.title {
            item.title = title.clone();
        }
        if let Some(slug) = &self.slug {
            item.slug = slug.clone();
        }
        if let Some(excerpt) = &self.excerpt {
            item.excerpt = excerpt.clone();
        }
        if let Some(content) = &self.content {
            item.content = Some(content.clone());
        }
        if let Some(media) = &self.media {
            item.media = media.clone();
        }
        if let Some(visible) = self.visible {
            item.visible = visible;
        }
        if let Some(order_index) = self.order_index {
            item.order_index = order_index;
        }
        if let Some(tags) = &self.tags {
            item.tags = tags.clone();
        }
        if let Some(start_date) = self.start_date {
            item.start_date = Some(start_date);
        }
        if let Some(premium) = self.premium {
            item.premium = premium;
        }
    }
}
