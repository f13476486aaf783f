//! Attribute filters for catalog listings

use std::collections::BTreeSet;

use super::paint::{CatalogPaint, PaintType};
use crate::color::ColorFamily;

/// Narrows keyword search results by brand, type and color family.
///
/// Every unset criterion matches everything. Brand comparison ignores
/// ASCII case; several families match any of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    pub brand: Option<String>,
    pub paint_type: Option<PaintType>,
    pub families: BTreeSet<ColorFamily>,
}

impl CatalogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn paint_type(mut self, paint_type: PaintType) -> Self {
        self.paint_type = Some(paint_type);
        self
    }

    pub fn families<I: IntoIterator<Item = ColorFamily>>(mut self, families: I) -> Self {
        self.families = families.into_iter().collect();
        self
    }

    pub fn matches(&self, paint: &CatalogPaint) -> bool {
        self.brand
            .as_deref()
            .map_or(true, |b| paint.brand.eq_ignore_ascii_case(b))
            && self.paint_type.map_or(true, |t| paint.paint_type == t)
            && (self.families.is_empty() || self.families.contains(&paint.color_family()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<CatalogPaint> {
        vec![
            CatalogPaint::new("a", "Mephiston Red", "Citadel", "#9A1115")
                .unwrap()
                .with_type(PaintType::Base),
            CatalogPaint::new("b", "Wild Rider Red", "Citadel", "#EA2F28")
                .unwrap()
                .with_type(PaintType::Layer),
            CatalogPaint::new("c", "Flat Blue", "Vallejo", "#214B8C")
                .unwrap()
                .with_type(PaintType::Layer),
        ]
    }

    fn ids(filter: &CatalogFilter) -> Vec<String> {
        catalog()
            .into_iter()
            .filter(|p| filter.matches(p))
            .map(|p| p.stable_id)
            .collect()
    }

    #[test]
    fn test_empty_filter_matches_all() {
        assert_eq!(ids(&CatalogFilter::new()), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_criteria_combine() {
        assert_eq!(ids(&CatalogFilter::new().brand("citadel")), vec!["a", "b"]);
        assert_eq!(ids(&CatalogFilter::new().paint_type(PaintType::Layer)), vec!["b", "c"]);
        assert_eq!(
            ids(&CatalogFilter::new()
                .paint_type(PaintType::Layer)
                .families([ColorFamily::Red])),
            vec!["b"]
        );
        assert_eq!(
            ids(&CatalogFilter::new().families([ColorFamily::Red, ColorFamily::Blue])),
            vec!["a", "b", "c"]
        );
        assert!(ids(&CatalogFilter::new().brand("Vallejo").families([ColorFamily::Red])).is_empty());
    }
}
