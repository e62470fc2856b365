//! Core data types for the Vitrine content publishing library.
//!
//! This crate provides the item model shared by the stores, the reconciler,
//! and the public gallery, plus the pure helpers that shape items for storage
//! (slugs, object names, tags) and for display (tiles, embedded media).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod draft;
mod embed;
mod filter;
mod item;
mod media;
mod patch;
mod slug;
mod tile;

pub use draft::{ItemDraft, ItemDraftBuilder, NewItem, parse_tags};
pub use embed::{ContentBlock, classify, classify_line};
pub use filter::{ItemFilter, SortOrder};
pub use item::{Item, ItemId};
pub use media::{Media, MediaKind};
pub use patch::ItemPatch;
pub use slug::{object_name, slugify, unique_slug};
pub use tile::{PLACEHOLDER_IMAGE, Tile};
