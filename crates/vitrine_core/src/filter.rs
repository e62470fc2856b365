//! List filters.

use crate::Item;
use serde::{Deserialize, Serialize};

/// Direction of the `order_index` sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Lowest index first
    #[default]
    Ascending,
    /// Highest index first
    Descending,
}

impl SortOrder {
    /// Stable sort by `order_index`; ties keep their current relative order.
    pub fn sort(&self, items: &mut [Item]) {
        match self {
            SortOrder::Ascending => items.sort_by_key(|item| item.order_index),
            SortOrder::Descending => {
                items.sort_by(|a, b| b.order_index.cmp(&a.order_index));
            }
        }
    }
}

/// Which items a list call returns and in what order.
///
/// # Examples
///
/// ```
/// use vitrine_core::{ItemFilter, SortOrder};
///
/// let public = ItemFilter::public("stavrin");
/// assert!(public.visible_only);
/// assert_eq!(public.order, SortOrder::Ascending);
/// assert!(!ItemFilter::admin("stavrin").visible_only);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemFilter {
    /// Partition to list
    pub site_slug: String,
    /// Only items with `visible = true`
    pub visible_only: bool,
    /// Sort direction on `order_index`
    pub order: SortOrder,
}

impl ItemFilter {
    /// Filter used by the public listing.
    pub fn public(site_slug: impl Into<String>) -> Self {
        Self {
            site_slug: site_slug.into(),
            visible_only: true,
            order: SortOrder::Ascending,
        }
    }

    /// Filter used by the admin listing.
    pub fn admin(site_slug: impl Into<String>) -> Self {
        Self {
            site_slug: site_slug.into(),
            visible_only: false,
            order: SortOrder::Ascending,
        }
    }

    /// Whether an item passes the filter.
    pub fn matches(&self, item: &Item) -> bool {
        item.site_slug == self.site_slug && (!self.visible_only || item.visible)
    }
}
