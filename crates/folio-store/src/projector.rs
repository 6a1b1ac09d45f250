//! Metadata projections.
//!
//! Everything here is pure and works on already-loaded metadata: no I/O,
//! no caching. Re-filtering a few dozen records per call is cheaper than
//! keeping per-filter caches coherent.

use std::collections::HashSet;

use folio_core::{Facet, Listing, date::parse_publish_date};
use serde::Deserialize;

/// Filter value that disables a facet filter.
pub const ALL: &str = "All";

/// Catalog filter criteria. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Filter {
    /// Case-insensitive substring of title or description.
    pub search: Option<String>,

    /// Exact category.
    pub category: Option<String>,

    /// Exact focus area.
    #[serde(alias = "focus")]
    pub focus_area: Option<String>,

    /// Exact difficulty.
    pub difficulty: Option<String>,

    /// Drop the featured document from the result.
    pub exclude_featured: bool,
}

impl Filter {
    fn matches<M: Listing>(&self, item: &M, search: Option<&str>) -> bool {
        if let Some(needle) = search {
            let hit = item.title().to_lowercase().contains(needle)
                || item.description().to_lowercase().contains(needle);
            if !hit {
                return false;
            }
        }

        facet_matches(item, Facet::Category, self.category.as_deref())
            && facet_matches(item, Facet::FocusArea, self.focus_area.as_deref())
            && facet_matches(item, Facet::Difficulty, self.difficulty.as_deref())
    }
}

fn facet_matches<M: Listing>(item: &M, facet: Facet, wanted: Option<&str>) -> bool {
    match wanted.map(str::trim) {
        None | Some("") | Some(ALL) => true,
        Some(wanted) => item.facet_values(facet).contains(&wanted),
    }
}

/// Sort newest first.
///
/// The sort is stable: equal dates keep their input order. Dates that do
/// not parse sort after every parseable date, again in input order.
pub fn sort_by_date<M: Listing>(items: Vec<M>) -> Vec<M> {
    let mut keyed: Vec<_> = items
        .into_iter()
        .map(|item| (parse_publish_date(item.date()), item))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| b.cmp(a));
    keyed.into_iter().map(|(_, item)| item).collect()
}

/// The first `n` items; the whole slice when it is shorter.
pub fn recent<M>(items: &[M], n: usize) -> &[M] {
    &items[..n.min(items.len())]
}

/// First item flagged as featured.
pub fn featured<M: Listing>(items: &[M]) -> Option<&M> {
    items.iter().find(|item| item.is_featured())
}

/// Distinct non-empty values of a facet, in first-seen order.
pub fn facets<M: Listing>(items: &[M], facet: Facet) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .flat_map(|item| item.facet_values(facet))
        .map(str::trim)
        .filter(|value| !value.is_empty() && seen.insert(*value))
        .map(str::to_string)
        .collect()
}

/// Apply a [`Filter`], preserving input order.
pub fn filter<M: Listing + Clone>(items: &[M], filter: &Filter) -> Vec<M> {
    let excluded = if filter.exclude_featured {
        featured(items).map(|item| item.slug().to_string())
    } else {
        None
    };
    let search = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    items
        .iter()
        .filter(|item| excluded.as_deref() != Some(item.slug()))
        .filter(|item| filter.matches(*item, search.as_deref()))
        .cloned()
        .collect()
}
