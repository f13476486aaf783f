//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

use brushmatch::assets::AssetLoader;
use brushmatch::server::{build_router, create_app_state, AppState};
use brushmatch::services::{CatalogRepository, InMemoryCatalog};

/// Test application with router and direct access to the catalog
pub struct TestApp {
    router: axum::Router,
    pub catalog: Arc<InMemoryCatalog>,
}

impl TestApp {
    /// Create a new test application using embedded assets
    pub fn new() -> Self {
        Self::from_loader(AssetLoader::new(None, None))
    }

    /// Create a test application serving the catalog files in `dir`
    pub fn with_catalog_dir(dir: impl Into<PathBuf>) -> Self {
        Self::from_loader(AssetLoader::new(Some(dir.into()), None))
    }

    /// Create a test application with an external catalog and config file
    pub fn with_catalog_and_config(dir: impl Into<PathBuf>, config: impl Into<PathBuf>) -> Self {
        Self::from_loader(AssetLoader::new(Some(dir.into()), Some(config.into())))
    }

    fn from_loader(loader: AssetLoader) -> Self {
        let state = create_app_state(Arc::new(loader)).expect("Failed to create app state");
        let catalog = state.catalog.clone();
        let router = build_router(state);
        Self { router, catalog }
    }

    /// Create a test app and return the state for custom router configuration
    pub fn create_state() -> AppState {
        create_app_state(Arc::new(AssetLoader::new(None, None)))
            .expect("Failed to create app state")
    }

    /// Number of paints currently served
    pub async fn paint_count(&self) -> usize {
        self.catalog.count().await
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Make a POST request with a serializable body
    pub async fn post<T: serde::Serialize>(&self, path: &str, body: &T) -> TestResponse {
        self.post_json(path, &serde_json::to_string(body).unwrap())
            .await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}
