use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Category keys offered by the storefront's category strip.
pub const KNOWN_CATEGORIES: [&str; 8] = [
    "araba",
    "beyazEsya",
    "telefon",
    "oyunBilgisayari",
    "televizyon",
    "tablet",
    "hoverboard",
    "karavan",
];

/// Category selected when a listing first appears. It also acts as the
/// "show all" key unless configured otherwise.
pub const DEFAULT_CATEGORY: &str = "araba";

/// Category key as stored on a catalog record. Matching is exact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        KNOWN_CATEGORIES.contains(&self.0.as_str())
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Anything listed under a category.
pub trait Categorized {
    fn category(&self) -> &Category;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Selecting the show-all key yields [`CategoryFilter::All`].
    #[must_use]
    pub fn from_selection(selected: &str, show_all: &str) -> Self {
        if selected == show_all {
            Self::All
        } else {
            Self::Only(Category::new(selected))
        }
    }

    #[must_use]
    pub fn matches<E: Categorized + ?Sized>(&self, item: &E) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => item.category() == category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, CategoryFilter, DEFAULT_CATEGORY};

    #[test]
    fn default_category_selects_everything() {
        assert_eq!(
            CategoryFilter::from_selection(DEFAULT_CATEGORY, DEFAULT_CATEGORY),
            CategoryFilter::All
        );
        assert_eq!(
            CategoryFilter::from_selection("telefon", DEFAULT_CATEGORY),
            CategoryFilter::Only(Category::new("telefon"))
        );
    }

    #[test]
    fn category_keys_are_case_sensitive() {
        assert!(Category::new("beyazEsya").is_known());
        assert!(!Category::new("beyazesya").is_known());
    }
}
