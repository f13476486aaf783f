//! Read-only catalog access

use std::collections::{BTreeSet, HashMap};

use super::filter::CatalogFilter;
use super::paint::CatalogPaint;

/// Default cap on keyword search results.
pub const SEARCH_RESULT_LIMIT: usize = 100;

/// Read-only view of a paint catalog.
///
/// Queries borrow from the accessor for their whole lifetime, so an
/// implementation must present one consistent snapshot per borrow.
/// Only [`all_paints`](Self::all_paints) is required; the other methods
/// have linear-scan defaults.
pub trait CatalogAccessor {
    /// Every paint, in catalog order.
    fn all_paints(&self) -> &[CatalogPaint];

    /// Distinct brand names, sorted.
    fn brands(&self) -> Vec<String> {
        self.all_paints()
            .iter()
            .map(|p| p.brand.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn find_by_stable_id(&self, stable_id: &str) -> Option<&CatalogPaint> {
        self.all_paints().iter().find(|p| p.stable_id == stable_id)
    }

    /// Keyword search in catalog order.
    ///
    /// The query is split on whitespace; a paint matches when every keyword
    /// is a case-insensitive substring of its
    /// [`searchable_text`](CatalogPaint::searchable_text). A blank query
    /// matches everything.
    fn search(&self, query: &str) -> Vec<&CatalogPaint> {
        let keywords: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        self.all_paints()
            .iter()
            .filter(|paint| {
                if keywords.is_empty() {
                    return true;
                }
                let text = paint.searchable_text().to_lowercase();
                keywords.iter().all(|k| text.contains(k.as_str()))
            })
            .collect()
    }

    /// Keyword search restricted by brand, type and color family.
    fn search_filtered(&self, query: &str, filter: &CatalogFilter) -> Vec<&CatalogPaint> {
        let mut found = self.search(query);
        found.retain(|p| filter.matches(p));
        found
    }

    fn len(&self) -> usize {
        self.all_paints().len()
    }

    fn is_empty(&self) -> bool {
        self.all_paints().is_empty()
    }
}

impl CatalogAccessor for [CatalogPaint] {
    fn all_paints(&self) -> &[CatalogPaint] {
        self
    }
}

impl CatalogAccessor for Vec<CatalogPaint> {
    fn all_paints(&self) -> &[CatalogPaint] {
        self
    }
}

/// Immutable catalog with a stable-id index.
///
/// Duplicate stable ids are resolved at construction: the first entry
/// wins and later ones are dropped.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    paints: Vec<CatalogPaint>,
    index: HashMap<String, usize>,
}

impl CatalogSnapshot {
    pub fn new(paints: Vec<CatalogPaint>) -> Self {
        Self::with_duplicates(paints).0
    }

    /// Build a snapshot and report the stable ids that were dropped as
    /// duplicates.
    pub fn with_duplicates(paints: Vec<CatalogPaint>) -> (Self, Vec<String>) {
        let mut kept = Vec::with_capacity(paints.len());
        let mut index = HashMap::with_capacity(paints.len());
        let mut duplicates = Vec::new();
        for paint in paints {
            if index.contains_key(&paint.stable_id) {
                duplicates.push(paint.stable_id);
                continue;
            }
            index.insert(paint.stable_id.clone(), kept.len());
            kept.push(paint);
        }
        (
            Self {
                paints: kept,
                index,
            },
            duplicates,
        )
    }

    pub fn into_paints(self) -> Vec<CatalogPaint> {
        self.paints
    }
}

impl CatalogAccessor for CatalogSnapshot {
    fn all_paints(&self) -> &[CatalogPaint] {
        &self.paints
    }

    fn find_by_stable_id(&self, stable_id: &str) -> Option<&CatalogPaint> {
        self.index.get(stable_id).map(|&i| &self.paints[i])
    }
}

impl FromIterator<CatalogPaint> for CatalogSnapshot {
    fn from_iter<I: IntoIterator<Item = CatalogPaint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
