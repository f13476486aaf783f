pub mod catalog_loader;
pub mod catalog_repository;
pub mod match_service;

pub use catalog_loader::{load_catalog, CatalogLoadResult};
pub use catalog_repository::{CatalogRepository, InMemoryCatalog};
pub use match_service::{MatchService, RecipeOutcome, SimilarOutcome};
