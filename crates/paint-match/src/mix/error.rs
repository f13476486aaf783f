//! Error type for blends and recipe component lists

use thiserror::Error;

/// Error returned when a blend or recipe component list is invalid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecipeError {
    /// Nothing to blend
    #[error("blend requires at least one component")]
    Empty,
    /// A recipe needs at least two paints
    #[error("a mixing recipe needs at least 2 components, got {0}")]
    TooFewComponents(usize),
    /// A recipe exceeds the supported component count
    #[error("a mixing recipe supports at most {max} components, got {got}")]
    TooManyComponents {
        /// Supported maximum
        max: usize,
        /// Components supplied
        got: usize,
    },
    /// A component percentage is zero, negative or not a number
    #[error("component percentage must be positive, got {0}")]
    NonPositivePercentage(f64),
    /// Percentages do not add up to 100
    #[error("component percentages must sum to 100, got {0}")]
    BadTotal(f64),
}
