//! Public API for the paint-match crate.
//!
//! This module provides the query facade: [`PaintMatcher`] with its
//! [`SimilarQuery`] / [`RecipeQuery`] parameter sets and the
//! [`MatchError`] unified error type.

mod engine;
mod error;

pub use engine::{PaintMatcher, RecipeQuery, SimilarQuery};
pub use error::MatchError;
