pub mod config;
pub mod paint_ref;

pub use config::{AppConfig, MatchDefaults, RecipeDefaults};
pub use paint_ref::{PaintRef, SourceColor};
