//! Admin form input.

use chrono::NaiveDate;
use vitrine_core::{ItemDraft, Media, parse_tags};

/// A file picked in the admin form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Original file name
    pub filename: String,
    /// MIME type (e.g., "image/png")
    pub content_type: String,
    /// File contents
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Create an upload.
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// Everything the admin create form collects.
///
/// # Example
///
/// ```
/// use vitrine::{ItemForm, Upload};
///
/// let form = ItemForm::new("Sunset")
///     .with_tags("travel, photo,")
///     .with_image(Upload::new("sunset.jpg", "image/jpeg", vec![0u8; 4]));
/// assert_eq!(form.draft().tags, vec!["travel", "photo"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default, derive_setters::Setters)]
#[setters(strip_option, into, prefix = "with_")]
pub struct ItemForm {
    /// Required title
    pub title: String,
    /// Explicit slug; blank derives one from the title
    pub slug: Option<String>,
    /// Short summary
    pub excerpt: String,
    /// Long-form body
    pub content: Option<String>,
    /// Comma-separated tags
    pub tags: String,
    /// Optional start date
    pub start_date: Option<NaiveDate>,
    /// Manual media URL, used when no image file is given
    pub link_url: Option<String>,
    /// Image file to upload
    pub image: Option<Upload>,
    /// Audio file to upload
    pub audio: Option<Upload>,
    /// Members-only flag
    pub premium: bool,
    /// Hide from the public listing
    pub hidden: bool,
}

impl ItemForm {
    /// Form with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Draft for the text fields, without media.
    pub fn draft(&self) -> ItemDraft {
        ItemDraft {
            title: self.title.clone(),
            excerpt: self.excerpt.clone(),
            content: self.content.clone(),
            slug: self.slug.clone(),
            media: Vec::new(),
            visible: !self.hidden,
            tags: parse_tags(&self.tags),
            start_date: self.start_date,
            premium: self.premium,
        }
    }

    /// Media list given the public URLs of the uploaded files.
    pub(crate) fn media(&self, image_url: Option<String>, audio_url: Option<String>) -> Vec<Media> {
        let mut media = Vec::new();
        match (image_url, self.link_url.as_deref().map(str::trim)) {
            (Some(url), _) => media.push(Media::image(url)),
            (None, Some(link)) if !link.is_empty() => media.push(Media::link(link)),
            _ => {}
        }
        if let Some(url) = audio_url {
            media.push(Media::audio(url));
        }
        media
    }
}
