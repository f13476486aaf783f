use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
};
use paint_match::{CatalogFilter, CatalogPaint, ColorFamily, PaintType};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::services::MatchService;

/// Distinct brand names
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BrandsResponse {
    /// Sorted alphabetically
    pub brands: Vec<String>,
}

/// Keyword search parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Whitespace-separated keywords, all must match
    #[serde(default)]
    pub q: String,
    /// Restrict to one brand (case-insensitive)
    pub brand: Option<String>,
    /// Restrict to one paint type, e.g. `Base` or `Wash`
    #[serde(rename = "type")]
    pub paint_type: Option<String>,
    /// Comma-separated color families, e.g. `red,pink`
    pub family: Option<String>,
    /// Maximum results (at most 100)
    pub limit: Option<usize>,
}

impl SearchParams {
    /// Attribute filter for these parameters. Unknown type or family
    /// names are rejected.
    pub fn filter(&self) -> Result<CatalogFilter, ApiError> {
        let mut filter = CatalogFilter::new();
        if let Some(brand) = self.brand.as_deref().filter(|b| !b.trim().is_empty()) {
            filter = filter.brand(brand.trim());
        }
        if let Some(name) = self.paint_type.as_deref().filter(|t| !t.trim().is_empty()) {
            let paint_type = PaintType::from_name(name);
            if paint_type == PaintType::Unknown && !name.trim().eq_ignore_ascii_case("unknown") {
                return Err(ApiError::InvalidRequest(format!("unknown paint type '{name}'")));
            }
            filter = filter.paint_type(paint_type);
        }
        if let Some(families) = self.family.as_deref() {
            let families = families
                .split(',')
                .filter(|f| !f.trim().is_empty())
                .map(str::parse::<ColorFamily>)
                .collect::<Result<Vec<_>, _>>()
                .map_err(ApiError::InvalidRequest)?;
            filter = filter.families(families);
        }
        Ok(filter)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub count: usize,
    #[schema(value_type = Vec<Object>)]
    pub paints: Vec<CatalogPaint>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReloadResponse {
    /// Paints in the catalog after the reload
    pub paints: usize,
    /// Problems found while loading (bad files, bad paints, duplicate ids)
    pub errors: Vec<String>,
}

/// List catalog brands
#[utoipa::path(
    get,
    path = "/api/brands",
    responses(
        (status = 200, description = "Sorted distinct brands", body = BrandsResponse),
    ),
    tag = "Catalog"
)]
pub async fn handle_brands(State(service): State<Arc<MatchService>>) -> impl IntoResponse {
    Json(BrandsResponse {
        brands: service.brands().await,
    })
}

/// Keyword search over name, brand, line, code, type and finish
#[utoipa::path(
    get,
    path = "/api/paints/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching paints in catalog order", body = SearchResponse),
        (status = 400, description = "Unknown paint type or color family"),
    ),
    tag = "Catalog"
)]
pub async fn handle_search(
    State(service): State<Arc<MatchService>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let filter = params.filter()?;
    let paints = service.search(&params.q, &filter, params.limit).await;
    tracing::debug!(
        query = %params.q,
        brand = ?params.brand,
        paint_type = ?params.paint_type,
        family = ?params.family,
        results = paints.len(),
        "Catalog search"
    );
    Ok(Json(SearchResponse {
        count: paints.len(),
        paints,
    }))
}

/// Fetch one catalog paint
#[utoipa::path(
    get,
    path = "/api/paints/{stable_id}",
    params(
        ("stable_id" = String, Path, description = "Stable paint id, e.g. 'citadel:base:mephiston-red'"),
    ),
    responses(
        (status = 200, description = "The paint"),
        (status = 404, description = "No paint with this id"),
    ),
    tag = "Catalog"
)]
pub async fn handle_paint(
    State(service): State<Arc<MatchService>>,
    Path(stable_id): Path<String>,
) -> Result<Json<CatalogPaint>, ApiError> {
    Ok(Json(service.paint(&stable_id).await?))
}

/// Reload the catalog from its source
///
/// The current catalog is kept when the reload yields no paints.
#[utoipa::path(
    post,
    path = "/api/catalog/reload",
    responses(
        (status = 200, description = "Catalog reloaded", body = ReloadResponse),
    ),
    tag = "Catalog"
)]
pub async fn handle_reload(
    State(service): State<Arc<MatchService>>,
    State(loader): State<Arc<AssetLoader>>,
) -> impl IntoResponse {
    let result = service.reload(&loader).await;
    Json(ReloadResponse {
        paints: service.paint_count().await,
        errors: result.errors,
    })
}
