//! Paint catalog records and read-only access
//!
//! The engine never owns or mutates a catalog. Callers hand it an
//! implementation of [`CatalogAccessor`], usually a [`CatalogSnapshot`]
//! built once per catalog load and shared between queries.

mod filter;
mod paint;
mod snapshot;

pub use filter::CatalogFilter;
pub use paint::{CatalogPaint, ColorSample, PaintFinish, PaintType, TypeEquivalence};
pub use snapshot::{CatalogAccessor, CatalogSnapshot, SEARCH_RESULT_LIMIT};
