//! Query orchestration between the HTTP/CLI surface and the engine.
//!
//! Every call takes its own catalog snapshot; nothing from one query is
//! kept for the next.

use paint_match::catalog::SEARCH_RESULT_LIMIT;
use paint_match::{
    CancelToken, CatalogAccessor, CatalogFilter, CatalogPaint, CatalogSnapshot, PaintMatch, PaintMatcher,
    PaintMixRecipe, RecipeQuery, SimilarQuery,
};
use std::sync::Arc;
use std::time::Instant;

use super::catalog_loader::{load_catalog, CatalogLoadResult};
use super::catalog_repository::CatalogRepository;
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::{AppConfig, PaintRef, SourceColor};

/// Result of a similar-paint query
#[derive(Debug, Clone)]
pub struct SimilarOutcome {
    pub source: SourceColor,
    pub matches: Vec<PaintMatch>,
}

/// Result of a recipe query
#[derive(Debug, Clone)]
pub struct RecipeOutcome {
    pub target: SourceColor,
    pub recipes: Vec<PaintMixRecipe>,
}

/// Cancels the token when the owning future is dropped
struct CancelOnDrop(CancelToken);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

pub struct MatchService {
    catalog: Arc<dyn CatalogRepository>,
    config: Arc<AppConfig>,
}

impl MatchService {
    pub fn new(catalog: Arc<dyn CatalogRepository>, config: Arc<AppConfig>) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn matcher<'a>(config: &AppConfig, catalog: &'a CatalogSnapshot) -> PaintMatcher<'a, CatalogSnapshot> {
        PaintMatcher::new(catalog)
            .type_equivalence(config.type_equivalence())
            .step(config.recipes.step)
            .shortlist_size(config.recipes.shortlist_size)
    }

    pub async fn brands(&self) -> Vec<String> {
        self.catalog.snapshot().await.brands()
    }

    pub async fn paint_count(&self) -> usize {
        self.catalog.count().await
    }

    pub async fn paint(&self, stable_id: &str) -> Result<CatalogPaint, ApiError> {
        self.catalog
            .snapshot()
            .await
            .find_by_stable_id(stable_id)
            .cloned()
            .ok_or_else(|| ApiError::PaintNotFound(stable_id.to_string()))
    }

    /// Keyword search narrowed by brand, type and color family.
    /// `limit` is capped at [`SEARCH_RESULT_LIMIT`].
    pub async fn search(&self, query: &str, filter: &CatalogFilter, limit: Option<usize>) -> Vec<CatalogPaint> {
        let limit = limit.unwrap_or(SEARCH_RESULT_LIMIT).min(SEARCH_RESULT_LIMIT);
        let snapshot = self.catalog.snapshot().await;
        snapshot
            .search_filtered(query, filter)
            .into_iter()
            .take(limit)
            .cloned()
            .collect()
    }

    pub async fn find_similar(&self, source: &PaintRef, query: &SimilarQuery) -> Result<SimilarOutcome, ApiError> {
        let snapshot = self.catalog.snapshot().await;
        let matcher = Self::matcher(&self.config, &snapshot);
        let reference = source.resolve(&matcher)?;
        let matches = matcher.find_similar_paints(&reference, query);
        tracing::info!(
            source = %reference.sample.hex,
            algorithm = %query.algorithm,
            matches = matches.len(),
            "Similar paints found"
        );
        Ok(SimilarOutcome {
            source: SourceColor::describe(&reference, &*snapshot),
            matches,
        })
    }

    /// Run the recipe search on the blocking pool.
    ///
    /// If the returned future is dropped before completion (client
    /// disconnect), the search is cancelled at its next check.
    pub async fn find_recipes(&self, target: &PaintRef, query: &RecipeQuery) -> Result<RecipeOutcome, ApiError> {
        let snapshot = self.catalog.snapshot().await;
        let config = self.config.clone();
        let target = target.clone();
        let query = query.clone();
        let cancel = CancelToken::new();
        let _guard = CancelOnDrop(cancel.clone());
        let started = Instant::now();

        let outcome = tokio::task::spawn_blocking(move || {
            let matcher = Self::matcher(&config, &snapshot);
            let reference = target.resolve(&matcher)?;
            let recipes = matcher.find_mixing_recipes(&reference, &query, &cancel)?;
            Ok::<_, paint_match::MatchError>(RecipeOutcome {
                target: SourceColor::describe(&reference, &*snapshot),
                recipes,
            })
        })
        .await??;

        tracing::info!(
            target = %outcome.target.hex,
            recipes = outcome.recipes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Mixing recipes found"
        );
        Ok(outcome)
    }

    /// Reload the catalog from its assets and swap it in.
    ///
    /// A load that produced no paints at all keeps the current catalog.
    pub async fn reload(&self, loader: &AssetLoader) -> CatalogLoadResult {
        let result = load_catalog(loader);
        if result.has_any_paints() {
            self.catalog
                .replace(CatalogSnapshot::new(result.paints.clone()))
                .await;
        } else {
            tracing::warn!(
                errors = result.errors.len(),
                "Catalog reload produced no paints, keeping current catalog"
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::InMemoryCatalog;
    use paint_match::{ColorFamily, PaintType};

    fn service() -> MatchService {
        let catalog = CatalogSnapshot::new(vec![
            CatalogPaint::new("acme:red", "Red", "Acme", "#FF0000")
                .unwrap()
                .with_type(PaintType::Base),
            CatalogPaint::new("acme:white", "White", "Acme", "#FFFFFF")
                .unwrap()
                .with_type(PaintType::Layer),
            CatalogPaint::new("other:pink", "Pink", "Other", "#FF8080")
                .unwrap()
                .with_type(PaintType::Base),
        ]);
        MatchService::new(
            Arc::new(InMemoryCatalog::new(catalog)),
            Arc::new(AppConfig::default()),
        )
    }

    #[tokio::test]
    async fn test_search_with_filters_and_limit() {
        let service = service();
        let all = CatalogFilter::new();
        assert_eq!(service.search("", &all, None).await.len(), 3);
        assert_eq!(service.search("", &CatalogFilter::new().brand("acme"), None).await.len(), 2);
        assert_eq!(service.search("", &all, Some(1)).await.len(), 1);
        assert_eq!(service.search("red acme", &all, None).await[0].stable_id, "acme:red");

        let bases = service
            .search("", &CatalogFilter::new().paint_type(PaintType::Base), None)
            .await;
        assert_eq!(bases.len(), 2);
        let whites = service
            .search("", &CatalogFilter::new().families([ColorFamily::White]), None)
            .await;
        assert_eq!(whites.len(), 1);
        assert_eq!(whites[0].stable_id, "acme:white");
    }

    #[tokio::test]
    async fn test_paint_lookup() {
        let service = service();
        assert_eq!(service.paint("acme:red").await.unwrap().name, "Red");
        assert!(matches!(
            service.paint("missing").await,
            Err(ApiError::PaintNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_find_similar_describes_source() {
        let service = service();
        let outcome = service
            .find_similar(&PaintRef::catalog("other:pink"), &SimilarQuery::default())
            .await
            .unwrap();
        assert_eq!(outcome.source.brand.as_deref(), Some("Other"));
        assert!(outcome.matches.iter().all(|m| m.paint.stable_id != "other:pink"));
    }

    #[tokio::test]
    async fn test_find_recipes_on_blocking_pool() {
        let service = service();
        let query = RecipeQuery {
            source_brands: Some(["Acme".to_string()].into()),
            ..RecipeQuery::default()
        };
        let outcome = service
            .find_recipes(&PaintRef::custom("#FF8080"), &query)
            .await
            .unwrap();
        assert_eq!(outcome.target.hex, "#FF8080");
        assert_eq!(outcome.recipes[0].resulting_hex, "#FF8080");
    }

    #[tokio::test]
    async fn test_find_recipes_bad_color() {
        let service = service();
        let err = service
            .find_recipes(&PaintRef::custom("FF8080"), &RecipeQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidColor(_)));
    }

    #[tokio::test]
    async fn test_reload_from_embedded_assets() {
        let service = service();
        let result = service.reload(&AssetLoader::new(None, None)).await;
        assert!(result.is_full_success());
        assert_eq!(service.paint_count().await, result.paints.len());
        assert!(service.paint("acme:red").await.is_err());
    }
}
