//! Color types and conversion utilities
//!
//! This module provides type-safe color handling with a compile-time
//! distinction between 8-bit sRGB (what catalogs and UIs exchange) and
//! CIE L\*a\*b\* (what perceptual distance is computed in).
//!
//! # Color Spaces
//!
//! - **Rgb8**: gamma-encoded sRGB, one byte per channel. Use for I/O and blending.
//! - **Lab**: CIE 1976 L\*a\*b\* relative to the D65 white point. Use for distances.
//!
//! # Example
//!
//! ```
//! use paint_match::{Lab, Rgb8};
//!
//! let rgb: Rgb8 = "#FF8080".parse().unwrap();
//! let lab = Lab::from(rgb);
//! let back = Rgb8::from(lab);
//! assert_eq!(back, rgb);
//! ```

mod error;
mod family;
mod lab;
mod rgb;

pub use error::ColorFormatError;
pub use family::ColorFamily;
pub use lab::{lab_to_rgb, rgb_to_lab, Lab};
pub use rgb::{hex_to_rgb, rgb_to_hex, Rgb8};
