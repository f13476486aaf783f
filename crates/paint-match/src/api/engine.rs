//! PaintMatcher facade, the two query operations the application calls.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::error::MatchError;
use crate::cancel::CancelToken;
use crate::catalog::{CatalogAccessor, ColorSample, TypeEquivalence};
use crate::distance::{DeltaEAlgorithm, MatchQuality};
use crate::matching::{
    find_matches, find_recipes, MatchFilters, PaintMatch, PaintMixRecipe, RecipeSearchOptions,
    ReferencePaint, DEFAULT_PERCENTAGE_STEP, DEFAULT_SHORTLIST_SIZE, MAX_RECIPE_COMPONENTS,
    USABLE_PERCENTAGE,
};

/// Parameters of [`PaintMatcher::find_similar_paints`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarQuery {
    /// Brands to search; `None` or empty means all brands
    pub target_brands: Option<BTreeSet<String>>,
    pub algorithm: DeltaEAlgorithm,
    pub require_same_type: bool,
    pub require_same_finish: bool,
    pub limit: usize,
    /// Worst tier still returned; `None` keeps every tier
    pub min_quality: Option<MatchQuality>,
}

impl Default for SimilarQuery {
    fn default() -> Self {
        Self {
            target_brands: None,
            algorithm: DeltaEAlgorithm::Ciede2000,
            require_same_type: true,
            require_same_finish: false,
            limit: 50,
            min_quality: None,
        }
    }
}

/// Parameters of [`PaintMatcher::find_mixing_recipes`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeQuery {
    /// Brands the components may come from; `None` or empty means all
    pub source_brands: Option<BTreeSet<String>>,
    pub algorithm: DeltaEAlgorithm,
    pub require_same_type: bool,
    pub max_components: usize,
    pub min_percentage: f64,
    pub max_results: usize,
}

impl Default for RecipeQuery {
    fn default() -> Self {
        Self {
            source_brands: None,
            algorithm: DeltaEAlgorithm::Ciede2000,
            require_same_type: true,
            max_components: MAX_RECIPE_COMPONENTS,
            min_percentage: USABLE_PERCENTAGE,
            max_results: 6,
        }
    }
}

/// Query facade over a borrowed catalog snapshot.
///
/// The matcher holds search policy (type equivalence, percentage step,
/// shortlist size) but no results: every call is independent and the
/// catalog is only read.
///
/// # Example
///
/// ```
/// use paint_match::{CancelToken, CatalogPaint, CatalogSnapshot, PaintMatcher, RecipeQuery, SimilarQuery};
///
/// let catalog = CatalogSnapshot::new(vec![
///     CatalogPaint::new("red", "Red", "Acme", "#FF0000").unwrap(),
///     CatalogPaint::new("white", "White", "Acme", "#FFFFFF").unwrap(),
/// ]);
/// let matcher = PaintMatcher::new(&catalog);
///
/// let pink = matcher.reference_by_hex("#FF8080").unwrap();
/// let matches = matcher.find_similar_paints(&pink, &SimilarQuery::default());
/// assert_eq!(matches.len(), 2);
///
/// let query = RecipeQuery { max_components: 2, ..RecipeQuery::default() };
/// let recipes = matcher
///     .find_mixing_recipes(&pink, &query, &CancelToken::new())
///     .unwrap();
/// assert_eq!(recipes[0].resulting_hex, "#FF8080");
/// ```
pub struct PaintMatcher<'a, C: CatalogAccessor + ?Sized> {
    catalog: &'a C,
    type_equivalence: TypeEquivalence,
    step: f64,
    shortlist_size: usize,
}

impl<'a, C: CatalogAccessor + ?Sized> PaintMatcher<'a, C> {
    /// Matcher with Base/Layer equivalence, a 5% grid and a shortlist of 12.
    pub fn new(catalog: &'a C) -> Self {
        Self {
            catalog,
            type_equivalence: TypeEquivalence::default(),
            step: DEFAULT_PERCENTAGE_STEP,
            shortlist_size: DEFAULT_SHORTLIST_SIZE,
        }
    }

    #[inline]
    pub fn type_equivalence(mut self, equivalence: TypeEquivalence) -> Self {
        self.type_equivalence = equivalence;
        self
    }

    /// Percentage grid increment for recipe search.
    #[inline]
    pub fn step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    #[inline]
    pub fn shortlist_size(mut self, size: usize) -> Self {
        self.shortlist_size = size;
        self
    }

    /// Reference for a catalog paint, keeping its id, type and finish.
    pub fn reference_by_id(&self, stable_id: &str) -> Result<ReferencePaint, MatchError> {
        self.catalog
            .find_by_stable_id(stable_id)
            .map(ReferencePaint::from)
            .ok_or_else(|| MatchError::PaintNotFound(stable_id.to_string()))
    }

    /// Reference for a custom `#RRGGBB` color.
    pub fn reference_by_hex(&self, hex: &str) -> Result<ReferencePaint, MatchError> {
        Ok(ReferencePaint::custom(ColorSample::from_hex(hex)?))
    }

    /// Closest catalog paints to `source`, closest first.
    pub fn find_similar_paints(&self, source: &ReferencePaint, query: &SimilarQuery) -> Vec<PaintMatch> {
        let filters = MatchFilters {
            brands: query.target_brands.clone(),
            require_same_type: query.require_same_type,
            require_same_finish: query.require_same_finish,
            type_equivalence: self.type_equivalence.clone(),
        };
        let mut matches = find_matches(source, self.catalog, &filters, query.algorithm, query.limit);
        // Ranked by distance, so the tier floor cuts a suffix
        if let Some(floor) = query.min_quality {
            matches.retain(|m| m.quality.meets(floor));
        }
        matches
    }

    /// Blends of catalog paints approximating `target`, best first.
    ///
    /// CPU-heavy; run it off any interactive thread. `cancel` is checked
    /// once per paint combination.
    pub fn find_mixing_recipes(
        &self,
        target: &ReferencePaint,
        query: &RecipeQuery,
        cancel: &CancelToken,
    ) -> Result<Vec<PaintMixRecipe>, MatchError> {
        let filters = MatchFilters {
            brands: query.source_brands.clone(),
            require_same_type: query.require_same_type,
            require_same_finish: false,
            type_equivalence: self.type_equivalence.clone(),
        };
        let options = RecipeSearchOptions {
            algorithm: query.algorithm,
            max_components: query.max_components,
            min_percentage: query.min_percentage,
            max_results: query.max_results,
            step: self.step,
            shortlist_size: self.shortlist_size,
        };
        Ok(find_recipes(target, self.catalog, &filters, &options, cancel)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::catalog::{CatalogPaint, CatalogSnapshot, PaintType};

    fn catalog() -> CatalogSnapshot {
        CatalogSnapshot::new(vec![
            CatalogPaint::new("acme:red", "Red", "Acme", "#FF0000")
                .unwrap()
                .with_type(PaintType::Base),
            CatalogPaint::new("acme:white", "White", "Acme", "#FFFFFF")
                .unwrap()
                .with_type(PaintType::Layer),
            CatalogPaint::new("other:pink", "Pink", "Other", "#FF8181")
                .unwrap()
                .with_type(PaintType::Base),
            CatalogPaint::new("other:wash", "Pink Wash", "Other", "#FF8080")
                .unwrap()
                .with_type(PaintType::Wash),
        ])
    }

    #[test]
    fn test_reference_lookup() {
        let catalog = catalog();
        let matcher = PaintMatcher::new(&catalog);
        assert_eq!(
            matcher.reference_by_id("acme:red").unwrap().stable_id.as_deref(),
            Some("acme:red")
        );
        assert_eq!(
            matcher.reference_by_id("missing"),
            Err(MatchError::PaintNotFound("missing".into()))
        );
        assert!(matches!(
            matcher.reference_by_hex("#12345"),
            Err(MatchError::Color(_))
        ));
    }

    #[test]
    fn test_similar_respects_brand_and_type() {
        let catalog = catalog();
        let matcher = PaintMatcher::new(&catalog);
        let source = matcher.reference_by_id("other:pink").unwrap();

        let all = matcher.find_similar_paints(
            &source,
            &SimilarQuery {
                require_same_type: false,
                ..SimilarQuery::default()
            },
        );
        assert_eq!(all[0].paint.stable_id, "other:wash");

        // Wash is excluded by type, pink itself by identity
        let typed = matcher.find_similar_paints(&source, &SimilarQuery::default());
        assert!(typed.iter().all(|m| m.paint.stable_id.starts_with("acme:")));

        let brands = matcher.find_similar_paints(
            &source,
            &SimilarQuery {
                target_brands: Some(BTreeSet::from(["Other".to_string()])),
                require_same_type: false,
                ..SimilarQuery::default()
            },
        );
        assert_eq!(brands.len(), 1);
    }

    #[test]
    fn test_similar_min_quality_drops_weaker_tiers() {
        let catalog = CatalogSnapshot::new(vec![
            CatalogPaint::new("exact", "Exact", "Acme", "#808080").unwrap(),
            CatalogPaint::new("close", "Close", "Acme", "#888888").unwrap(),
            CatalogPaint::new("far", "Far", "Acme", "#000000").unwrap(),
        ]);
        let matcher = PaintMatcher::new(&catalog);
        let source = matcher.reference_by_hex("#808080").unwrap();
        let ids = |min_quality| -> Vec<String> {
            matcher
                .find_similar_paints(
                    &source,
                    &SimilarQuery {
                        min_quality,
                        ..SimilarQuery::default()
                    },
                )
                .into_iter()
                .map(|m| m.paint.stable_id)
                .collect()
        };
        assert_eq!(ids(None), vec!["exact", "close", "far"]);
        assert_eq!(ids(Some(MatchQuality::Good)), vec!["exact", "close"]);
        assert_eq!(ids(Some(MatchQuality::Excellent)), vec!["exact"]);
    }

    #[test]
    fn test_recipe_query_options_validated() {
        let catalog = catalog();
        let matcher = PaintMatcher::new(&catalog);
        let target = matcher.reference_by_hex("#FF8080").unwrap();
        let err = matcher
            .find_mixing_recipes(
                &target,
                &RecipeQuery {
                    max_components: 5,
                    ..RecipeQuery::default()
                },
                &CancelToken::new(),
            )
            .unwrap_err();
        assert!(matches!(err, MatchError::InvalidOptions(_)));
    }

    #[test]
    fn test_recipe_brand_filter() {
        let catalog = catalog();
        let matcher = PaintMatcher::new(&catalog);
        let target = matcher.reference_by_hex("#FF8080").unwrap();
        let recipes = matcher
            .find_mixing_recipes(
                &target,
                &RecipeQuery {
                    source_brands: Some(BTreeSet::from(["Acme".to_string()])),
                    ..RecipeQuery::default()
                },
                &CancelToken::new(),
            )
            .unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].resulting_hex, "#FF8080");
    }

    #[test]
    fn test_cancelled_query() {
        let catalog = catalog();
        let matcher = PaintMatcher::new(&catalog);
        let target = matcher.reference_by_hex("#FF8080").unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();
        assert_eq!(
            matcher.find_mixing_recipes(&target, &RecipeQuery::default(), &cancel),
            Err(MatchError::Cancelled)
        );
    }
}
