//! Mixing-recipe search
//!
//! Finds pairs and triplets of catalog paints whose blend approximates a
//! target color. This is a bounded approximation, not an exhaustive
//! search:
//!
//! 1. Candidates sharing an RGB value collapse to the one with the lowest
//!    stable id, then are narrowed to a shortlist: the `shortlist_size`
//!    paints closest to the target plus the lightest and darkest
//!    candidates, so tinting and shading partners stay reachable.
//! 2. Every 2..=`max_components` combination of the shortlist is tried
//!    against a discrete percentage grid (multiples of `step`, plus
//!    `min_percentage` itself). No component ever goes below
//!    `min_percentage`.
//! 3. Each combination keeps its lowest-distance split. Combinations are
//!    independent and evaluated in parallel with rayon.
//! 4. Results are deduplicated, ranked by distance and truncated.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::similar::by_distance_then_id;
use super::{MatchFilters, ReferencePaint};
use crate::cancel::CancelToken;
use crate::catalog::{CatalogAccessor, CatalogPaint};
use crate::color::{Lab, Rgb8};
use crate::distance::{confidence, DeltaEAlgorithm, MatchQuality};
use crate::mix::{blend, validate_percentages, RecipeError, PERCENTAGE_TOLERANCE};

/// Components below this share are flagged impractical to measure by hand.
pub const USABLE_PERCENTAGE: f64 = 5.0;
pub const DEFAULT_PERCENTAGE_STEP: f64 = 5.0;
pub const DEFAULT_SHORTLIST_SIZE: usize = 12;
pub const MIN_RECIPE_COMPONENTS: usize = 2;
pub const MAX_RECIPE_COMPONENTS: usize = 3;

/// Failure of a recipe search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("invalid recipe search options: {0}")]
    InvalidOptions(String),
    #[error("recipe search was cancelled")]
    Cancelled,
}

/// Tuning for [`find_recipes`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeSearchOptions {
    pub algorithm: DeltaEAlgorithm,
    /// 2 or 3
    pub max_components: usize,
    /// Floor for every component's share, in percent
    pub min_percentage: f64,
    pub max_results: usize,
    /// Grid increment for percentage splits
    pub step: f64,
    pub shortlist_size: usize,
}

impl Default for RecipeSearchOptions {
    fn default() -> Self {
        Self {
            algorithm: DeltaEAlgorithm::Ciede2000,
            max_components: MAX_RECIPE_COMPONENTS,
            min_percentage: USABLE_PERCENTAGE,
            max_results: 6,
            step: DEFAULT_PERCENTAGE_STEP,
            shortlist_size: DEFAULT_SHORTLIST_SIZE,
        }
    }
}

impl RecipeSearchOptions {
    pub fn algorithm(mut self, algorithm: DeltaEAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn max_components(mut self, max_components: usize) -> Self {
        self.max_components = max_components;
        self
    }

    pub fn min_percentage(mut self, min_percentage: f64) -> Self {
        self.min_percentage = min_percentage;
        self
    }

    pub fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn shortlist_size(mut self, shortlist_size: usize) -> Self {
        self.shortlist_size = shortlist_size;
        self
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        let invalid = |msg: String| Err(SearchError::InvalidOptions(msg));
        if !(MIN_RECIPE_COMPONENTS..=MAX_RECIPE_COMPONENTS).contains(&self.max_components) {
            return invalid(format!(
                "max_components must be between {MIN_RECIPE_COMPONENTS} and {MAX_RECIPE_COMPONENTS}, got {}",
                self.max_components
            ));
        }
        if !(self.min_percentage > 0.0 && self.min_percentage <= 50.0) {
            return invalid(format!(
                "min_percentage must be in (0, 50], got {}",
                self.min_percentage
            ));
        }
        if !(self.step > 0.0 && self.step <= 50.0) {
            return invalid(format!("step must be in (0, 50], got {}", self.step));
        }
        if self.shortlist_size < MIN_RECIPE_COMPONENTS {
            return invalid(format!(
                "shortlist_size must be at least {MIN_RECIPE_COMPONENTS}, got {}",
                self.shortlist_size
            ));
        }
        Ok(())
    }
}

/// One paint in a recipe with its share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixComponent {
    pub stable_id: String,
    pub name: String,
    pub brand: String,
    pub hex: String,
    /// Share of the mix, `0 < percentage <= 100`
    pub percentage: f64,
}

impl MixComponent {
    pub fn from_paint(paint: &CatalogPaint, percentage: f64) -> Self {
        Self {
            stable_id: paint.stable_id.clone(),
            name: paint.name.clone(),
            brand: paint.brand.clone(),
            hex: paint.hex.clone(),
            percentage,
        }
    }
}

/// A blend of 2..=3 catalog paints approximating a target color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintMixRecipe {
    pub components: Vec<MixComponent>,
    /// ΔE between the blend and the target
    pub distance: f64,
    pub confidence: f64,
    pub quality: MatchQuality,
    /// False when any component is below [`USABLE_PERCENTAGE`]
    pub is_practical: bool,
    pub resulting_hex: String,
    pub resulting_lab: Lab,
    pub algorithm: DeltaEAlgorithm,
}

impl PaintMixRecipe {
    /// Check the component invariants: 2..=3 entries, each share positive,
    /// shares summing to 100.
    pub fn validate_components(&self) -> Result<(), RecipeError> {
        let shares: Vec<f64> = self.components.iter().map(|c| c.percentage).collect();
        validate_percentages(&shares, MAX_RECIPE_COMPONENTS)
    }

    /// Stable ids of the components joined with `+`, used as a ranking
    /// tiebreak and a readable key.
    pub fn key(&self) -> String {
        self.components
            .iter()
            .map(|c| c.stable_id.as_str())
            .collect::<Vec<_>>()
            .join("+")
    }
}

/// Best split found for one combination.
struct Candidate {
    paints: Vec<usize>,
    shares: Vec<f64>,
    rgb: Rgb8,
    lab: Lab,
    distance: f64,
}

/// Search for blends of catalog paints approximating `target`.
///
/// Returns up to `options.max_results` recipes ranked by ascending
/// distance (descending confidence). Mediocre results are still returned;
/// the list is empty only when fewer than two distinct colors survive the
/// filters or `max_results` is zero.
///
/// # Errors
///
/// [`SearchError::InvalidOptions`] for out-of-range options and
/// [`SearchError::Cancelled`] when `cancel` fires before the search ends.
pub fn find_recipes<C>(
    target: &ReferencePaint,
    catalog: &C,
    filters: &MatchFilters,
    options: &RecipeSearchOptions,
    cancel: &CancelToken,
) -> Result<Vec<PaintMixRecipe>, SearchError>
where
    C: CatalogAccessor + ?Sized,
{
    options.validate()?;
    let started = Instant::now();

    let candidates = distinct_colors(&filters.candidates(target, catalog));
    if candidates.len() < MIN_RECIPE_COMPONENTS || options.max_results == 0 {
        tracing::debug!(
            target_hex = %target.sample.hex,
            candidates = candidates.len(),
            "recipe search skipped, not enough candidates"
        );
        return Ok(Vec::new());
    }

    let delta_e = options.algorithm.distance_fn();
    let target_lab = target.sample.lab;
    let shortlist = shortlist(&candidates, target_lab, delta_e, options.shortlist_size);

    let grid = percentage_grid(options.min_percentage, options.step);
    let mut combos: Vec<Vec<usize>> = Vec::new();
    let mut splits_by_size: Vec<Vec<Vec<f64>>> = vec![Vec::new(); options.max_components + 1];
    for k in MIN_RECIPE_COMPONENTS..=options.max_components.min(shortlist.len()) {
        combinations(shortlist.len(), k, &mut combos);
        splits_by_size[k] = splits(&grid, k, options.min_percentage);
    }

    let evaluated: Option<Vec<Option<Candidate>>> = combos
        .par_iter()
        .map(|combo| {
            if cancel.is_cancelled() {
                return None;
            }
            let paints: Vec<&CatalogPaint> = combo.iter().map(|&i| shortlist[i]).collect();
            Some(best_split(
                combo,
                &paints,
                &splits_by_size[combo.len()],
                target_lab,
                delta_e,
            ))
        })
        .collect();
    let evaluated = match evaluated {
        Some(found) if !cancel.is_cancelled() => found,
        _ => {
            tracing::debug!(target_hex = %target.sample.hex, "recipe search cancelled");
            return Err(SearchError::Cancelled);
        }
    };

    let mut recipes: Vec<PaintMixRecipe> = evaluated
        .into_iter()
        .flatten()
        .map(|c| to_recipe(c, &shortlist, options.algorithm))
        .collect();
    recipes.sort_by(|a, b| by_distance_then_id(a.distance, &a.key(), b.distance, &b.key()));

    let mut seen = HashSet::new();
    recipes.retain(|r| seen.insert(signature(r)));
    recipes.truncate(options.max_results);

    tracing::debug!(
        target_hex = %target.sample.hex,
        algorithm = %options.algorithm,
        candidates = candidates.len(),
        shortlist = shortlist.len(),
        combinations = combos.len(),
        returned = recipes.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "recipe search"
    );
    Ok(recipes)
}

/// One paint per RGB value, the lowest stable id winning, in first-seen
/// order. Two components of the same color are really one paint.
fn distinct_colors<'c>(candidates: &[&'c CatalogPaint]) -> Vec<&'c CatalogPaint> {
    let mut slot_by_color: HashMap<u32, usize> = HashMap::with_capacity(candidates.len());
    let mut out: Vec<&CatalogPaint> = Vec::with_capacity(candidates.len());
    for &paint in candidates {
        match slot_by_color.get(&paint.rgb().to_packed()) {
            Some(&slot) => {
                if paint.stable_id < out[slot].stable_id {
                    out[slot] = paint;
                }
            }
            None => {
                slot_by_color.insert(paint.rgb().to_packed(), out.len());
                out.push(paint);
            }
        }
    }
    out
}

/// Closest `size` candidates plus the lightest and darkest ones.
fn shortlist<'c>(
    candidates: &[&'c CatalogPaint],
    target: Lab,
    delta_e: fn(Lab, Lab) -> f64,
    size: usize,
) -> Vec<&'c CatalogPaint> {
    let mut ranked: Vec<(f64, &CatalogPaint)> = candidates
        .iter()
        .map(|p| (delta_e(target, p.lab()), *p))
        .collect();
    ranked.sort_by(|a, b| by_distance_then_id(a.0, &a.1.stable_id, b.0, &b.1.stable_id));

    let mut picked: Vec<&CatalogPaint> = ranked.iter().take(size).map(|(_, p)| *p).collect();

    let lightest = candidates.iter().copied().max_by(|a, b| {
        a.lab_l
            .total_cmp(&b.lab_l)
            .then_with(|| b.stable_id.cmp(&a.stable_id))
    });
    let darkest = candidates.iter().copied().min_by(|a, b| {
        a.lab_l
            .total_cmp(&b.lab_l)
            .then_with(|| a.stable_id.cmp(&b.stable_id))
    });
    for extreme in [lightest, darkest].into_iter().flatten() {
        if !picked.iter().any(|p| p.stable_id == extreme.stable_id) {
            picked.push(extreme);
        }
    }
    picked
}

/// Allowed component shares: `min` itself and every multiple of `step`
/// from `min` up to 100.
fn percentage_grid(min: f64, step: f64) -> Vec<f64> {
    let mut grid = vec![min];
    let mut k = 1u32;
    loop {
        let value = step * k as f64;
        if value > 100.0 + PERCENTAGE_TOLERANCE {
            break;
        }
        if value > min + PERCENTAGE_TOLERANCE {
            grid.push(value);
        }
        k += 1;
    }
    grid
}

/// All share vectors of length `k` summing to 100. Every share but one
/// comes from the grid; the remaining one is whatever is left and must
/// also reach `min`. The remainder may sit in any position.
fn splits(grid: &[f64], k: usize, min: f64) -> Vec<Vec<f64>> {
    fn walk(grid: &[f64], k: usize, min: f64, prefix: &mut Vec<f64>, used: f64, out: &mut Vec<Vec<f64>>) {
        if prefix.len() == k - 1 {
            let rest = 100.0 - used;
            if rest >= min - PERCENTAGE_TOLERANCE {
                let mut split = prefix.clone();
                split.push(rest);
                out.push(split);
            }
            return;
        }
        // Leave room for the remaining components at their minimum
        let remaining_after = (k - 1 - prefix.len()) as f64 * min;
        for &share in grid {
            if used + share + remaining_after > 100.0 + PERCENTAGE_TOLERANCE {
                break;
            }
            prefix.push(share);
            walk(grid, k, min, prefix, used + share, out);
            prefix.pop();
        }
    }

    let mut base = Vec::new();
    walk(grid, k, min, &mut Vec::with_capacity(k), 0.0, &mut base);

    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(base.len());
    for split in base {
        for perm in permutations(&split) {
            let key: Vec<u64> = perm.iter().map(|s| (s * 1e6).round() as u64).collect();
            if seen.insert(key) {
                out.push(perm);
            }
        }
    }
    out
}

fn permutations(items: &[f64]) -> Vec<Vec<f64>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head);
            out.push(tail);
        }
    }
    out
}

/// Append every `k`-subset of `0..n` (lexicographic) to `out`.
fn combinations(n: usize, k: usize, out: &mut Vec<Vec<usize>>) {
    if k == 0 || k > n {
        return;
    }
    let mut idx: Vec<usize> = (0..k).collect();
    loop {
        out.push(idx.clone());
        let Some(i) = (0..k).rev().find(|&i| idx[i] != i + n - k) else {
            return;
        };
        idx[i] += 1;
        for j in i + 1..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
}

fn best_split(
    combo: &[usize],
    paints: &[&CatalogPaint],
    splits: &[Vec<f64>],
    target: Lab,
    delta_e: fn(Lab, Lab) -> f64,
) -> Option<Candidate> {
    let mut parts = [(Rgb8::new(0, 0, 0), 0.0); MAX_RECIPE_COMPONENTS];
    let mut best: Option<Candidate> = None;
    for split in splits {
        for (slot, (paint, &share)) in parts.iter_mut().zip(paints.iter().zip(split)) {
            *slot = (paint.rgb(), share);
        }
        let Ok(rgb) = blend(&parts[..paints.len()]) else {
            continue;
        };
        let lab = Lab::from(rgb);
        let distance = delta_e(target, lab);
        if best.as_ref().map_or(true, |b| distance < b.distance) {
            best = Some(Candidate {
                paints: combo.to_vec(),
                shares: split.clone(),
                rgb,
                lab,
                distance,
            });
        }
    }
    best
}

fn to_recipe(candidate: Candidate, shortlist: &[&CatalogPaint], algorithm: DeltaEAlgorithm) -> PaintMixRecipe {
    let components: Vec<MixComponent> = candidate
        .paints
        .iter()
        .zip(&candidate.shares)
        .map(|(&i, &share)| MixComponent::from_paint(shortlist[i], share))
        .collect();
    let is_practical = components
        .iter()
        .all(|c| c.percentage >= USABLE_PERCENTAGE - PERCENTAGE_TOLERANCE);
    PaintMixRecipe {
        components,
        distance: candidate.distance,
        confidence: confidence(candidate.distance),
        quality: MatchQuality::from_distance(candidate.distance),
        is_practical,
        resulting_hex: candidate.rgb.to_hex(),
        resulting_lab: candidate.lab,
        algorithm,
    }
}

/// Component colors and shares, order-independent. Two recipes with the
/// same signature mix indistinguishable paints in the same amounts.
fn signature(recipe: &PaintMixRecipe) -> Vec<(String, u64)> {
    let mut sig: Vec<(String, u64)> = recipe
        .components
        .iter()
        .map(|c| (c.hex.clone(), (c.percentage * 1e6).round() as u64))
        .collect();
    sig.sort();
    sig
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ColorSample, PaintType};
    use pretty_assertions::assert_eq;

    fn paint(id: &str, hex: &str) -> CatalogPaint {
        CatalogPaint::new(id, id, "Test", hex).unwrap()
    }

    fn search(target: &str, catalog: &[CatalogPaint], options: &RecipeSearchOptions) -> Vec<PaintMixRecipe> {
        let target = ReferencePaint::custom(ColorSample::from_hex(target).unwrap());
        find_recipes(&target, catalog, &MatchFilters::new(), options, &CancelToken::new()).unwrap()
    }

    #[test]
    fn test_grid_with_min_below_step() {
        assert_eq!(percentage_grid(2.0, 25.0), vec![2.0, 25.0, 50.0, 75.0, 100.0]);
        assert_eq!(percentage_grid(25.0, 25.0), vec![25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn test_splits_sum_to_100_and_respect_min() {
        let grid = percentage_grid(5.0, 5.0);
        let pairs = splits(&grid, 2, 5.0);
        assert_eq!(pairs.len(), 19);
        let triples = splits(&grid, 3, 5.0);
        assert_eq!(triples.len(), 171);
        for split in pairs.iter().chain(&triples) {
            let total: f64 = split.iter().sum();
            assert!((total - 100.0).abs() < 1e-9, "{split:?}");
            assert!(split.iter().all(|&s| s >= 5.0 - 1e-9), "{split:?}");
        }
    }

    #[test]
    fn test_splits_place_min_share_anywhere() {
        let grid = percentage_grid(2.0, 5.0);
        let pairs = splits(&grid, 2, 2.0);
        assert!(pairs.contains(&vec![2.0, 98.0]));
        assert!(pairs.contains(&vec![98.0, 2.0]));
        assert!(pairs.iter().all(|p| p.iter().all(|&s| s >= 2.0)));
    }

    #[test]
    fn test_combinations() {
        let mut out = Vec::new();
        combinations(4, 2, &mut out);
        assert_eq!(out, vec![vec![0, 1], vec![0, 2], vec![0, 3], vec![1, 2], vec![1, 3], vec![2, 3]]);
        out.clear();
        combinations(14, 3, &mut out);
        assert_eq!(out.len(), 364);
        out.clear();
        combinations(1, 2, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_options_validation() {
        assert!(RecipeSearchOptions::default().validate().is_ok());
        for bad in [
            RecipeSearchOptions::default().max_components(1),
            RecipeSearchOptions::default().max_components(4),
            RecipeSearchOptions::default().min_percentage(0.0),
            RecipeSearchOptions::default().min_percentage(60.0),
            RecipeSearchOptions::default().min_percentage(f64::NAN),
            RecipeSearchOptions::default().step(0.0),
            RecipeSearchOptions::default().shortlist_size(1),
        ] {
            assert!(
                matches!(bad.validate(), Err(SearchError::InvalidOptions(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_exact_two_paint_blend_found() {
        let catalog = vec![paint("red", "#FF0000"), paint("white", "#FFFFFF")];
        let recipes = search("#FF8080", &catalog, &RecipeSearchOptions::default().max_components(2));
        let best = &recipes[0];
        assert_eq!(best.resulting_hex, "#FF8080");
        assert_eq!(best.distance, 0.0);
        assert!(best.is_practical);
        for c in &best.components {
            assert_eq!(c.percentage, 50.0);
        }
        best.validate_components().unwrap();
    }

    #[test]
    fn test_ranked_and_truncated() {
        let catalog = vec![
            paint("red", "#FF0000"),
            paint("white", "#FFFFFF"),
            paint("black", "#000000"),
            paint("blue", "#0000FF"),
            paint("yellow", "#FFFF00"),
        ];
        let options = RecipeSearchOptions::default().max_results(4);
        let recipes = search("#A05050", &catalog, &options);
        assert_eq!(recipes.len(), 4);
        for pair in recipes.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
            assert!(pair[0].confidence >= pair[1].confidence);
        }
        for recipe in &recipes {
            recipe.validate_components().unwrap();
            assert!((2..=3).contains(&recipe.components.len()));
        }
    }

    #[test]
    fn test_min_percentage_is_a_floor() {
        // Target needs only a touch of black; the grid may not go below min
        let catalog = vec![paint("white", "#FFFFFF"), paint("black", "#000000")];
        let options = RecipeSearchOptions::default().max_components(2).min_percentage(5.0);
        let recipes = search("#FCFCFC", &catalog, &options);
        let best = &recipes[0];
        assert!(best.components.iter().all(|c| c.percentage >= 5.0));
        assert!(best.is_practical);
        assert!(best.distance > 0.0, "mediocre matches are still returned");
    }

    #[test]
    fn test_small_components_flagged_impractical() {
        let catalog = vec![paint("white", "#FFFFFF"), paint("black", "#000000")];
        let options = RecipeSearchOptions::default().max_components(2).min_percentage(2.0);
        let recipes = search("#F9F9F9", &catalog, &options);
        let best = &recipes[0];
        let black = best.components.iter().find(|c| c.stable_id == "black").unwrap();
        assert_eq!(black.percentage, 2.0);
        assert!(!best.is_practical);
    }

    #[test]
    fn test_duplicate_color_entries_collapse() {
        let catalog = vec![
            paint("red", "#FF0000"),
            paint("red-again", "#FF0000"),
            paint("white", "#FFFFFF"),
        ];
        let recipes = search("#FF8080", &catalog, &RecipeSearchOptions::default().max_components(2));
        let exact: Vec<_> = recipes.iter().filter(|r| r.distance == 0.0).collect();
        assert_eq!(exact.len(), 1, "{recipes:#?}");
    }

    #[test]
    fn test_same_color_paints_never_mix_together() {
        let catalog = vec![
            paint("red-again", "#FF0000"),
            paint("red", "#FF0000"),
            paint("white", "#FFFFFF"),
        ];
        let recipes = search("#FF8080", &catalog, &RecipeSearchOptions::default());

        let exact: Vec<_> = recipes.iter().filter(|r| r.distance == 0.0).collect();
        assert_eq!(exact.len(), 1, "{recipes:#?}");
        let mut ids: Vec<&str> = exact[0].components.iter().map(|c| c.stable_id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["red", "white"]);
        for recipe in &recipes {
            let mut hexes: Vec<&str> = recipe.components.iter().map(|c| c.hex.as_str()).collect();
            hexes.sort();
            hexes.dedup();
            assert_eq!(hexes.len(), recipe.components.len(), "{recipe:#?}");
            assert!(recipe.components.iter().all(|c| c.stable_id != "red-again"));
        }
    }

    #[test]
    fn test_one_distinct_color_is_empty() {
        let catalog = vec![paint("white", "#FFFFFF"), paint("white-again", "#FFFFFF")];
        assert!(search("#EEEEEE", &catalog, &RecipeSearchOptions::default()).is_empty());
    }

    #[test]
    fn test_too_few_candidates_is_empty() {
        let catalog = vec![paint("red", "#FF0000")];
        assert!(search("#FF8080", &catalog, &RecipeSearchOptions::default()).is_empty());
        assert!(search("#FF8080", &[], &RecipeSearchOptions::default()).is_empty());

        let catalog = vec![paint("red", "#FF0000"), paint("white", "#FFFFFF")];
        assert!(search("#FF8080", &catalog, &RecipeSearchOptions::default().max_results(0)).is_empty());
    }

    #[test]
    fn test_target_paint_excluded_from_components() {
        let catalog = vec![
            paint("pink", "#FF8080"),
            paint("red", "#FF0000"),
            paint("white", "#FFFFFF"),
        ];
        let target = ReferencePaint::from(&catalog[0]);
        let recipes = find_recipes(
            &target,
            &catalog,
            &MatchFilters::new(),
            &RecipeSearchOptions::default(),
            &CancelToken::new(),
        )
        .unwrap();
        assert!(recipes
            .iter()
            .all(|r| r.components.iter().all(|c| c.stable_id != "pink")));
    }

    #[test]
    fn test_type_filter_applies_to_components() {
        let catalog = vec![
            paint("red", "#FF0000").with_type(PaintType::Base),
            paint("white", "#FFFFFF").with_type(PaintType::Layer),
            paint("wash", "#FFFFFF").with_type(PaintType::Wash),
        ];
        let target = ReferencePaint::custom(ColorSample::from_hex("#FF8080").unwrap()).with_type(PaintType::Base);
        let filters = MatchFilters::new().require_same_type(true);
        let recipes = find_recipes(&target, &catalog, &filters, &RecipeSearchOptions::default(), &CancelToken::new()).unwrap();
        assert!(!recipes.is_empty());
        assert!(recipes
            .iter()
            .all(|r| r.components.iter().all(|c| c.stable_id != "wash")));
    }

    #[test]
    fn test_cancelled_search_returns_error() {
        let catalog = vec![paint("red", "#FF0000"), paint("white", "#FFFFFF")];
        let target = ReferencePaint::custom(ColorSample::from_hex("#FF8080").unwrap());
        let cancel = CancelToken::new();
        cancel.cancel();
        let result = find_recipes(&target, &catalog, &MatchFilters::new(), &RecipeSearchOptions::default(), &cancel);
        assert_eq!(result, Err(SearchError::Cancelled));
    }

    #[test]
    fn test_cancel_from_another_thread_stops_search() {
        let catalog: Vec<CatalogPaint> = (0..200u32)
            .map(|i| {
                let hex = format!("#{:02X}{:02X}{:02X}", (i * 37) % 256, (i * 91) % 256, (i * 53) % 256);
                paint(&format!("p{i:03}"), &hex)
            })
            .collect();
        let target = ReferencePaint::custom(ColorSample::from_hex("#6B4F3A").unwrap());
        // Tens of thousands of three-paint combinations keep the pool busy
        // well past the cancel.
        let options = RecipeSearchOptions::default().shortlist_size(80);

        let cancel = CancelToken::new();
        let canceller = {
            let token = cancel.clone();
            std::thread::spawn(move || {
                std::thread::sleep(std::time::Duration::from_millis(20));
                token.cancel();
            })
        };

        let result = find_recipes(&target, &catalog, &MatchFilters::new(), &options, &cancel);
        canceller.join().unwrap();

        assert!(cancel.is_cancelled());
        assert_eq!(result, Err(SearchError::Cancelled));
    }

    #[test]
    fn test_shortlist_keeps_extremes() {
        let mut catalog: Vec<CatalogPaint> = (0..20)
            .map(|i| paint(&format!("red{i:02}"), &format!("#{:02X}0000", 200 + i)))
            .collect();
        catalog.push(paint("white", "#FFFFFF"));
        catalog.push(paint("black", "#000000"));
        let refs: Vec<&CatalogPaint> = catalog.iter().collect();
        let target = Lab::from(Rgb8::new(210, 0, 0));
        let picked = shortlist(&refs, target, crate::distance::ciede2000, 5);
        let ids: Vec<_> = picked.iter().map(|p| p.stable_id.as_str()).collect();
        assert_eq!(ids.len(), 7);
        assert!(ids.contains(&"white") && ids.contains(&"black"));
        assert_eq!(ids[0], "red10");
    }
}
