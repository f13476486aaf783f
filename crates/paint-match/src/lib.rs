//! paint-match: perceptual paint matching and mixing-recipe search
//!
//! This library finds cross-brand equivalents of a paint and searches for
//! blends of catalog paints that approximate a target color.
//!
//! # Quick Start
//!
//! The [`PaintMatcher`] facade is the primary entry point:
//!
//! ```
//! use paint_match::{CatalogPaint, CatalogSnapshot, PaintMatcher, PaintType, SimilarQuery};
//!
//! let catalog = CatalogSnapshot::new(vec![
//!     CatalogPaint::new("citadel:abaddon", "Abaddon Black", "Citadel", "#231F20")
//!         .unwrap()
//!         .with_type(PaintType::Base),
//!     CatalogPaint::new("vallejo:black", "Black", "Vallejo", "#1B1B1B")
//!         .unwrap()
//!         .with_type(PaintType::Layer),
//! ]);
//!
//! let matcher = PaintMatcher::new(&catalog);
//! let source = matcher.reference_by_id("citadel:abaddon").unwrap();
//! let matches = matcher.find_similar_paints(&source, &SimilarQuery::default());
//!
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].paint.brand, "Vallejo");
//! ```
//!
//! # Color Science
//!
//! ## Two Color Spaces, Two Purposes
//!
//! | Space | Used for | Why |
//! |-------|----------|-----|
//! | sRGB (8-bit) | Catalog data, hex I/O, blending | What manufacturers publish and screens show |
//! | CIE Lab (D65) | Every distance | Euclidean-ish distance tracks perceived difference |
//!
//! Catalog paints carry their Lab coordinates precomputed at load time;
//! queries never convert catalog colors on the fly.
//!
//! ## Distance: CIEDE2000 by Default
//!
//! Plain Euclidean Lab distance (CIE76) overstates differences between
//! saturated colors and understates them in the blue region. CIEDE2000
//! corrects both and is used for every user-facing query. CIE76 stays
//! available through [`DeltaEAlgorithm::Euclidean`] as a cheap pre-filter.
//!
//! For achromatic inputs the CIEDE2000 hue angle is undefined; the hue
//! term then contributes zero so no NaN escapes.
//!
//! ## Confidence and Quality
//!
//! [`confidence`] maps ΔE to `1 / (1 + (ΔE / 5)²)`. [`MatchQuality`] tiers
//! use fixed thresholds: Excellent below 2, Good below 5, Fair below 10.
//!
//! ## Blending Is an Approximation
//!
//! [`blend`] averages sRGB channels by percentage. Real pigments mix
//! subtractively; this model is close enough to rank candidate recipes
//! but will not predict the exact result of a physical mix.
//!
//! ## Recipe Search Is Bounded
//!
//! [`find_recipes`] combines only a shortlist of the paints closest to
//! the target (plus the lightest and darkest) on a discrete percentage
//! grid. Results are good, not globally optimal.

pub mod api;
pub mod cancel;
pub mod catalog;
pub mod color;
pub mod distance;
pub mod matching;
pub mod mix;


pub use api::{MatchError, PaintMatcher, RecipeQuery, SimilarQuery};
pub use cancel::CancelToken;
pub use catalog::{
    CatalogAccessor, CatalogFilter, CatalogPaint, CatalogSnapshot, ColorSample, PaintFinish, PaintType,
    TypeEquivalence,
};
pub use color::{
    hex_to_rgb, lab_to_rgb, rgb_to_hex, rgb_to_lab, ColorFamily, ColorFormatError, Lab,
    Rgb8,
};
pub use distance::{confidence, distance, DeltaEAlgorithm, MatchQuality};
pub use matching::{
    find_matches, find_recipes, MatchFilters, MixComponent, PaintMatch, PaintMixRecipe,
    RecipeSearchOptions, ReferencePaint, SearchError,
};
pub use mix::{blend, RecipeError};
