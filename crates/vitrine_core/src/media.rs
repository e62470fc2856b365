//! Media attachments.

use serde::{Deserialize, Serialize};

/// Kind of attached media.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Uploaded or linked image
    #[display("image")]
    Image,
    /// Uploaded audio clip
    #[display("audio")]
    Audio,
    /// Arbitrary external link
    #[display("link")]
    Link,
}

impl MediaKind {
    /// Convert to string representation for storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Audio => "audio",
            MediaKind::Link => "link",
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaKind::Image),
            "audio" => Ok(MediaKind::Audio),
            "link" => Ok(MediaKind::Link),
            _ => Err(format!("Unknown media kind: {}", s)),
        }
    }
}

/// One media entry, serialized as `{ "type": ..., "url": ... }`.
///
/// # Examples
///
/// ```
/// use vitrine_core::{Media, MediaKind};
///
/// let media = Media::audio("https://cdn.example/song.mp3");
/// assert_eq!(media.kind, MediaKind::Audio);
/// let json = serde_json::to_string(&media).unwrap();
/// assert_eq!(json, r#"{"type":"audio","url":"https://cdn.example/song.mp3"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Media {
    /// What the URL points at
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Public URL of the media
    pub url: String,
}

impl Media {
    /// Image entry.
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Image,
            url: url.into(),
        }
    }

    /// Audio entry.
    pub fn audio(url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Audio,
            url: url.into(),
        }
    }

    /// External link entry.
    pub fn link(url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Link,
            url: url.into(),
        }
    }
}
