//! Recognition of embeddable media inside free text.
//!
//! Each line is classified on its own, with no state carried between lines,
//! so a body can be re-scanned from any line.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static YOUTUBE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://(?:www\.|m\.)?(?:youtube\.com/(?:watch\?(?:[^#\s]*&)?v=|embed/|shorts/)|youtu\.be/)([A-Za-z0-9_-]{11})(?:[?&#]\S*)?$",
    )
    .expect("Valid video link regex")
});

static IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://\S+\.(?:png|jpe?g|gif|webp|svg)(?:[?#]\S*)?$")
        .expect("Valid image link regex")
});

/// One classified line of an item body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    /// Line is a video link; `id` is the 11-character video id
    Video {
        /// Video id
        id: String,
    },
    /// Line is a direct image link
    Image {
        /// Image URL
        url: String,
    },
    /// Anything else, kept verbatim
    Text {
        /// Original line
        line: String,
    },
}

/// Classify a single line.
///
/// Only a line consisting of nothing but the link (surrounding whitespace
/// allowed) is treated as embeddable.
///
/// # Examples
///
/// ```
/// use vitrine_core::{ContentBlock, classify_line};
///
/// assert_eq!(
///     classify_line("https://youtu.be/dQw4w9WgXcQ"),
///     ContentBlock::Video { id: "dQw4w9WgXcQ".to_string() }
/// );
/// assert_eq!(
///     classify_line("see https://youtu.be/dQw4w9WgXcQ"),
///     ContentBlock::Text { line: "see https://youtu.be/dQw4w9WgXcQ".to_string() }
/// );
/// ```
pub fn classify_line(line: &str) -> ContentBlock {
    let candidate = line.trim();

    if let Some(id) = YOUTUBE
        .captures(candidate)
        .and_then(|captures| captures.get(1))
    {
        return ContentBlock::Video {
            id: id.as_str().to_string(),
        };
    }

    if IMAGE.is_match(candidate) {
        return ContentBlock::Image {
            url: candidate.to_string(),
        };
    }

    ContentBlock::Text {
        line: line.to_string(),
    }
}

/// Classify every line of a text block.
pub fn classify(text: &str) -> Vec<ContentBlock> {
    text.lines().map(classify_line).collect()
}
