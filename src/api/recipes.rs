use axum::{extract::State, response::Json, Json as JsonExtractor};
use paint_match::{DeltaEAlgorithm, PaintMixRecipe, RecipeQuery};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{AppConfig, PaintRef, SourceColor};
use crate::services::MatchService;

/// Request body for mixing-recipe search
///
/// Omitted fields take their value from the server configuration.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RecipeRequest {
    pub target: PaintRef,
    /// Brands the components may come from; omitted or empty means all
    #[serde(default)]
    pub source_brands: Option<Vec<String>>,
    /// `ciede2000` or `euclidean`
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub algorithm: Option<DeltaEAlgorithm>,
    #[serde(default)]
    pub require_same_type: Option<bool>,
    /// 2 or 3
    #[serde(default)]
    pub max_components: Option<usize>,
    /// Smallest share any component may have, in percent
    #[serde(default)]
    pub min_percentage: Option<f64>,
    #[serde(default)]
    pub max_results: Option<usize>,
}

impl RecipeRequest {
    pub fn to_query(&self, config: &AppConfig) -> RecipeQuery {
        let defaults = config.recipe_query();
        RecipeQuery {
            source_brands: self
                .source_brands
                .as_ref()
                .map(|brands| brands.iter().cloned().collect()),
            algorithm: self.algorithm.unwrap_or(defaults.algorithm),
            require_same_type: self.require_same_type.unwrap_or(defaults.require_same_type),
            max_components: self.max_components.unwrap_or(defaults.max_components),
            min_percentage: self.min_percentage.unwrap_or(defaults.min_percentage),
            max_results: self.max_results.unwrap_or(defaults.max_results),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecipeResponse {
    pub target: SourceColor,
    /// Best first
    #[schema(value_type = Vec<Object>)]
    pub recipes: Vec<PaintMixRecipe>,
}

/// Search for blends of catalog paints approximating a target color
///
/// The search runs off the request thread and stops early if the client
/// disconnects.
#[utoipa::path(
    post,
    path = "/api/match/recipes",
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Ranked recipes (possibly empty)", body = RecipeResponse),
        (status = 400, description = "Invalid hex color or options out of range"),
        (status = 404, description = "Target paint not found"),
    ),
    tag = "Matching"
)]
pub async fn handle_recipes(
    State(service): State<Arc<MatchService>>,
    JsonExtractor(request): JsonExtractor<RecipeRequest>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let query = request.to_query(service.config());
    let outcome = service.find_recipes(&request.target, &query).await?;
    Ok(Json(RecipeResponse {
        target: outcome.target,
        recipes: outcome.recipes,
    }))
}
