//! Catalog product types.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Product category.
///
/// The catalog is organized into a fixed, closed set of categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Panels,
    Inverters,
    Batteries,
    Kits,
}

impl Category {
    /// All categories, in navigation order.
    pub const ALL: [Self; 4] = [Self::Panels, Self::Inverters, Self::Batteries, Self::Kits];

    /// URL-safe identifier (used in `?category=` filters).
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Panels => "panels",
            Self::Inverters => "inverters",
            Self::Batteries => "batteries",
            Self::Kits => "kits",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Panels => "Solar Panels",
            Self::Inverters => "Inverters",
            Self::Batteries => "Batteries",
            Self::Kits => "Complete Kits",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Error returned when parsing an unknown category slug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.slug() == s)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// A product in the catalog.
///
/// Products are immutable once loaded. They are serializable so that cart
/// entries can carry a full copy of the product inside the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique catalog identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Marketing description.
    pub description: String,
    /// Unit price (always positive).
    pub price: Price,
    /// Product category.
    pub category: Category,
    /// Image URL.
    pub image: String,
    /// Efficiency label, e.g. "21.5%" or "95% Round-trip".
    pub efficiency: String,
    /// Warranty label, e.g. "25 Years".
    pub warranty: String,
    /// Average customer rating, 0.0 to 5.0.
    pub rating: f32,
}

impl Product {
    /// Case-insensitive match of `query` against the name or description.
    ///
    /// A blank query matches every product.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        needle.is_empty()
            || self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}
