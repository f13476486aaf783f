pub mod catalog;
pub mod recipes;
pub mod similar;

pub use catalog::{
    handle_brands, handle_paint, handle_reload, handle_search, BrandsResponse, ReloadResponse,
    SearchParams, SearchResponse,
};
pub use catalog::{__path_handle_brands, __path_handle_paint, __path_handle_reload, __path_handle_search};
pub use recipes::{handle_recipes, RecipeRequest, RecipeResponse, __path_handle_recipes};
pub use similar::{handle_similar, SimilarRequest, SimilarResponse, __path_handle_similar};
