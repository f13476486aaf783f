//! Nearest catalog paints to a reference color

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{MatchFilters, ReferencePaint};
use crate::catalog::{CatalogAccessor, CatalogPaint};
use crate::distance::{confidence, DeltaEAlgorithm, MatchQuality};

/// One ranked match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintMatch {
    pub paint: CatalogPaint,
    /// Raw ΔE, `>= 0`
    pub distance: f64,
    pub confidence: f64,
    pub quality: MatchQuality,
    pub algorithm: DeltaEAlgorithm,
}

/// Rank catalog paints by perceptual distance to `source`.
///
/// Every candidate passing `filters` is scored, the source paint itself
/// excluded. Results are sorted by ascending distance, ties broken by
/// `stable_id`, and truncated to `limit`. An empty catalog or a fully
/// filtered one yields an empty list.
pub fn find_matches<C>(
    source: &ReferencePaint,
    catalog: &C,
    filters: &MatchFilters,
    algorithm: DeltaEAlgorithm,
    limit: usize,
) -> Vec<PaintMatch>
where
    C: CatalogAccessor + ?Sized,
{
    let candidates = filters.candidates(source, catalog);
    let candidate_count = candidates.len();
    let delta_e = algorithm.distance_fn();
    let target = source.sample.lab;

    let mut scored: Vec<(f64, &CatalogPaint)> = candidates
        .into_iter()
        .map(|paint| (delta_e(target, paint.lab()), paint))
        .collect();
    scored.sort_by(|a, b| by_distance_then_id(a.0, &a.1.stable_id, b.0, &b.1.stable_id));
    scored.truncate(limit);

    tracing::debug!(
        source = %source.sample.hex,
        %algorithm,
        candidates = candidate_count,
        returned = scored.len(),
        "similar paint search"
    );

    scored
        .into_iter()
        .map(|(distance, paint)| PaintMatch {
            paint: paint.clone(),
            distance,
            confidence: confidence(distance),
            quality: MatchQuality::from_distance(distance),
            algorithm,
        })
        .collect()
}

/// Total order on (distance, id) pairs used for deterministic ranking.
pub(crate) fn by_distance_then_id(da: f64, ia: &str, db: f64, ib: &str) -> Ordering {
    da.total_cmp(&db).then_with(|| ia.cmp(ib))
}
