//! Brushmatch - cross-brand paint matching
//!
//! HTTP server and CLI around the `paint-match` engine.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
