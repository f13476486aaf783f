use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use paint_match::MatchError;
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Paint not found: {0}")]
    PaintNotFound(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Search cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<MatchError> for ApiError {
    fn from(e: MatchError) -> Self {
        match e {
            MatchError::Color(e) => ApiError::InvalidColor(e.to_string()),
            MatchError::PaintNotFound(id) => ApiError::PaintNotFound(id),
            MatchError::InvalidOptions(msg) => ApiError::InvalidRequest(msg),
            MatchError::Recipe(e) => ApiError::Internal(e.to_string()),
            MatchError::Cancelled => ApiError::Cancelled,
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("search task failed: {e}"))
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{file}: paint '{name}' has invalid hex: {source}")]
    InvalidPaint {
        file: String,
        name: String,
        #[source]
        source: paint_match::ColorFormatError,
    },

    #[error("Duplicate stable id: {0}")]
    DuplicateId(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::PaintNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidColor(_) | ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paint_match::ColorFormatError;

    #[test]
    fn test_api_error_paint_not_found() {
        let error = ApiError::PaintNotFound("citadel:base:mephiston-red".to_string());
        assert_eq!(
            error.to_string(),
            "Paint not found: citadel:base:mephiston-red"
        );
    }

    #[test]
    fn test_api_error_invalid_request() {
        let error = ApiError::InvalidRequest("max_components must be 2 or 3".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid request: max_components must be 2 or 3"
        );
    }

    #[test]
    fn test_api_error_from_match_error() {
        let error: ApiError = MatchError::Color(ColorFormatError::MissingHash).into();
        assert!(matches!(error, ApiError::InvalidColor(_)));

        let error: ApiError = MatchError::PaintNotFound("x".into()).into();
        assert!(matches!(error, ApiError::PaintNotFound(id) if id == "x"));

        let error: ApiError = MatchError::InvalidOptions("bad".into()).into();
        assert!(matches!(error, ApiError::InvalidRequest(_)));

        let error: ApiError = MatchError::Cancelled.into();
        assert!(matches!(error, ApiError::Cancelled));
    }

    #[test]
    fn test_catalog_error_duplicate() {
        let error = CatalogError::DuplicateId("acme:red".to_string());
        assert_eq!(error.to_string(), "Duplicate stable id: acme:red");
    }

    #[test]
    fn test_api_error_into_response_status_codes() {
        let response = ApiError::PaintNotFound("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::InvalidColor("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::InvalidRequest("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::Cancelled.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = ApiError::Internal("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
