//! Error type for color parsing

use thiserror::Error;

/// Error returned when a hex color string is malformed.
///
/// The accepted format is strict: exactly seven characters, a leading `#`,
/// then six hexadecimal digits (`#RRGGBB`, case-insensitive). The engine
/// never substitutes a default color for malformed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorFormatError {
    /// String is not exactly 7 characters long
    #[error("invalid hex color length: expected 7 characters (#RRGGBB), got {0}")]
    InvalidLength(usize),
    /// First character is not '#'
    #[error("hex color must start with '#'")]
    MissingHash,
    /// One of the six digits is not a hexadecimal character
    #[error("invalid hex digit in color {0:?}")]
    InvalidDigit(String),
}
