//! Pure category selection over an already-fetched list.

use std::collections::BTreeSet;

use cekilis_model::{Categorized, Category, CategoryFilter};

/// Items matching `filter`, in input order.
pub fn filter<'a, E: Categorized>(items: &'a [E], filter: &CategoryFilter) -> Vec<&'a E> {
    items.iter().filter(|item| filter.matches(*item)).collect()
}

/// `filter` for a raw selection key; `show_all` disables filtering.
pub fn filter_by_selection<'a, E: Categorized>(
    items: &'a [E],
    selected: &str,
    show_all: &str,
) -> Vec<&'a E> {
    filter(items, &CategoryFilter::from_selection(selected, show_all))
}

/// Sorted distinct categories present in `items`.
pub fn categories<E: Categorized>(items: &[E]) -> Vec<Category> {
    items
        .iter()
        .map(|item| item.category().clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
