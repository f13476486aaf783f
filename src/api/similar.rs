use axum::{extract::State, response::Json, Json as JsonExtractor};
use paint_match::{DeltaEAlgorithm, MatchQuality, PaintMatch, SimilarQuery};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{AppConfig, PaintRef, SourceColor};
use crate::services::MatchService;

/// Request body for similar-paint search
///
/// Omitted fields take their value from the server configuration.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SimilarRequest {
    pub source: PaintRef,
    /// Brands to search; omitted or empty means all
    #[serde(default)]
    pub target_brands: Option<Vec<String>>,
    /// `ciede2000` or `euclidean`
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub algorithm: Option<DeltaEAlgorithm>,
    #[serde(default)]
    pub require_same_type: Option<bool>,
    #[serde(default)]
    pub require_same_finish: Option<bool>,
    #[serde(default)]
    pub limit: Option<usize>,
    /// Worst tier to return: `excellent`, `good`, `fair` or `poor`
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub min_quality: Option<MatchQuality>,
}

impl SimilarRequest {
    pub fn to_query(&self, config: &AppConfig) -> SimilarQuery {
        let defaults = config.similar_query();
        SimilarQuery {
            target_brands: self
                .target_brands
                .as_ref()
                .map(|brands| brands.iter().cloned().collect()),
            algorithm: self.algorithm.unwrap_or(defaults.algorithm),
            require_same_type: self.require_same_type.unwrap_or(defaults.require_same_type),
            require_same_finish: self
                .require_same_finish
                .unwrap_or(defaults.require_same_finish),
            limit: self.limit.unwrap_or(defaults.limit),
            min_quality: self.min_quality.or(defaults.min_quality),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SimilarResponse {
    pub source: SourceColor,
    /// Closest first
    #[schema(value_type = Vec<Object>)]
    pub matches: Vec<PaintMatch>,
}

/// Find the closest catalog paints to a paint or custom color
#[utoipa::path(
    post,
    path = "/api/match/similar",
    request_body = SimilarRequest,
    responses(
        (status = 200, description = "Ranked matches (possibly empty)", body = SimilarResponse),
        (status = 400, description = "Invalid hex color"),
        (status = 404, description = "Source paint not found"),
    ),
    tag = "Matching"
)]
pub async fn handle_similar(
    State(service): State<Arc<MatchService>>,
    JsonExtractor(request): JsonExtractor<SimilarRequest>,
) -> Result<Json<SimilarResponse>, ApiError> {
    let query = request.to_query(service.config());
    let outcome = service.find_similar(&request.source, &query).await?;
    Ok(Json(SimilarResponse {
        source: outcome.source,
        matches: outcome.matches,
    }))
}
