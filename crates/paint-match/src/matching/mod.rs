//! Similar-paint ranking and mixing-recipe search
//!
//! Both searches start from a [`ReferencePaint`] and a catalog slice
//! narrowed by [`MatchFilters`]. They hold no state between calls.

mod recipe;
mod similar;

use std::collections::BTreeSet;

use crate::catalog::{CatalogAccessor, CatalogPaint, ColorSample, PaintFinish, PaintType, TypeEquivalence};

pub use recipe::{
    find_recipes, MixComponent, PaintMixRecipe, RecipeSearchOptions, SearchError,
    DEFAULT_PERCENTAGE_STEP, DEFAULT_SHORTLIST_SIZE, MAX_RECIPE_COMPONENTS, MIN_RECIPE_COMPONENTS,
    USABLE_PERCENTAGE,
};
pub use similar::{find_matches, PaintMatch};

/// The source or target color of a query.
///
/// Built from a catalog paint (keeps its id, type and finish so
/// self-matches can be excluded and type filters applied) or from a
/// bare [`ColorSample`] for custom colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferencePaint {
    pub sample: ColorSample,
    pub stable_id: Option<String>,
    pub paint_type: Option<PaintType>,
    pub finish: Option<PaintFinish>,
}

impl ReferencePaint {
    /// A color with no catalog identity. Type and finish filters do not
    /// apply to it.
    pub fn custom(sample: ColorSample) -> Self {
        Self {
            sample,
            stable_id: None,
            paint_type: None,
            finish: None,
        }
    }

    pub fn with_type(mut self, paint_type: PaintType) -> Self {
        self.paint_type = Some(paint_type);
        self
    }

    pub fn with_finish(mut self, finish: PaintFinish) -> Self {
        self.finish = Some(finish);
        self
    }
}

impl From<&CatalogPaint> for ReferencePaint {
    fn from(paint: &CatalogPaint) -> Self {
        Self {
            sample: paint.sample(),
            stable_id: Some(paint.stable_id.clone()),
            paint_type: Some(paint.paint_type),
            finish: Some(paint.finish),
        }
    }
}

/// Candidate filters shared by both searches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchFilters {
    /// Allowed brands. `None` or an empty set allows every brand.
    pub brands: Option<BTreeSet<String>>,
    /// Candidate type must be compatible with the reference type
    pub require_same_type: bool,
    /// Candidate finish must equal the reference finish
    pub require_same_finish: bool,
    pub type_equivalence: TypeEquivalence,
}

impl MatchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.brands = Some(brands.into_iter().map(Into::into).collect());
        self
    }

    pub fn require_same_type(mut self, value: bool) -> Self {
        self.require_same_type = value;
        self
    }

    pub fn require_same_finish(mut self, value: bool) -> Self {
        self.require_same_finish = value;
        self
    }

    pub fn type_equivalence(mut self, equivalence: TypeEquivalence) -> Self {
        self.type_equivalence = equivalence;
        self
    }

    /// Whether `paint` passes the filters relative to `reference`.
    ///
    /// Type and finish checks are skipped when the reference has no
    /// classification or it is `Unknown`.
    pub fn admits(&self, reference: &ReferencePaint, paint: &CatalogPaint) -> bool {
        if let Some(brands) = self.brands.as_ref().filter(|b| !b.is_empty()) {
            if !brands.contains(&paint.brand) {
                return false;
            }
        }
        if self.require_same_type {
            if let Some(t) = reference.paint_type.filter(|t| *t != PaintType::Unknown) {
                if !self.type_equivalence.compatible(t, paint.paint_type) {
                    return false;
                }
            }
        }
        if self.require_same_finish {
            if let Some(f) = reference.finish.filter(|f| *f != PaintFinish::Unknown) {
                if f != paint.finish {
                    return false;
                }
            }
        }
        true
    }

    /// Catalog entries passing the filters, excluding the reference paint
    /// itself, in catalog order.
    pub fn candidates<'c, C>(&self, reference: &ReferencePaint, catalog: &'c C) -> Vec<&'c CatalogPaint>
    where
        C: CatalogAccessor + ?Sized,
    {
        catalog
            .all_paints()
            .iter()
            .filter(|p| reference.stable_id.as_deref() != Some(p.stable_id.as_str()))
            .filter(|p| self.admits(reference, p))
            .collect()
    }
}
