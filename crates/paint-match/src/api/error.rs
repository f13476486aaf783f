//! Unified error type for the paint-match public API.

use thiserror::Error;

use crate::color::ColorFormatError;
use crate::matching::SearchError;
use crate::mix::RecipeError;

/// Unified error type for the paint-match public API.
///
/// Wraps the module-level errors for convenient `?` propagation in
/// application code. Empty result lists are never errors.
///
/// # Example
///
/// ```
/// use paint_match::{CatalogSnapshot, MatchError, PaintMatcher};
///
/// fn lookup(catalog: &CatalogSnapshot) -> Result<(), MatchError> {
///     let matcher = PaintMatcher::new(catalog);
///     let _custom = matcher.reference_by_hex("#3A5F0B")?;
///     Ok(())
/// }
/// assert!(lookup(&CatalogSnapshot::default()).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    /// Malformed hex color
    #[error("invalid color: {0}")]
    Color(#[from] ColorFormatError),
    /// Invalid blend or recipe component list
    #[error("invalid recipe: {0}")]
    Recipe(#[from] RecipeError),
    /// No catalog paint with this stable id
    #[error("paint not found: {0}")]
    PaintNotFound(String),
    /// Query options out of range
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    /// The query's cancel token fired
    #[error("query cancelled")]
    Cancelled,
}

impl From<SearchError> for MatchError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::InvalidOptions(msg) => MatchError::InvalidOptions(msg),
            SearchError::Cancelled => MatchError::Cancelled,
        }
    }
}
