//! Slug and object-name derivation.

use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Valid whitespace regex"));

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]").expect("Valid slug charset regex"));

/// Lowercase the title, turn whitespace runs into `-`, and drop everything
/// outside `[A-Za-z0-9_-]`.
///
/// # Examples
///
/// ```
/// use vitrine_core::slugify;
///
/// assert_eq!(slugify("Hello World!"), "hello-world");
/// assert_eq!(slugify("  Tip   the\tBalance "), "tip-the-balance");
/// ```
pub fn slugify(title: &str) -> String {
    let lower = title.trim().to_lowercase();
    let hyphenated = WHITESPACE.replace_all(&lower, "-");
    DISALLOWED.replace_all(&hyphenated, "").into_owned()
}

/// Slug for a newly created item: `slugify(title)` plus `-<created_at_ms>`.
///
/// Titles with no usable characters fall back to `item`.
///
/// # Examples
///
/// ```
/// use vitrine_core::unique_slug;
///
/// assert_eq!(unique_slug("Hello World!", 17), "hello-world-17");
/// assert_eq!(unique_slug("???", 17), "item-17");
/// ```
pub fn unique_slug(title: &str, created_at_ms: i64) -> String {
    let base = slugify(title);
    let base = if base.is_empty() { "item" } else { base.as_str() };
    format!("{}-{}", base, created_at_ms)
}

/// Object store name for an uploaded file: `<created_at_ms>-<filename>`.
///
/// Path separators in the filename are replaced so the object never lands in
/// a nested prefix.
///
/// # Examples
///
/// ```
/// use vitrine_core::object_name;
///
/// assert_eq!(object_name(5, "cover.png"), "5-cover.png");
/// assert_eq!(object_name(5, "../etc/passwd"), "5-..-etc-passwd");
/// assert_eq!(object_name(5, "  "), "5-upload");
/// ```
pub fn object_name(created_at_ms: i64, filename: &str) -> String {
    let cleaned = filename.trim().replace(['/', '\\'], "-");
    let cleaned = if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    };
    format!("{}-{}", created_at_ms, cleaned)
}
