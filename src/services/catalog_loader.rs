//! Catalog file parsing
//!
//! Each catalog document holds one brand (or one range of a brand):
//!
//! ```json
//! { "brand": "Citadel",
//!   "paints": [ { "name": "Mephiston Red", "line": "Base", "hex": "#9A1115",
//!                 "type": "Base", "finish": "Matte" } ] }
//! ```
//!
//! Loading never aborts on a bad file or paint: the problem is recorded
//! in [`CatalogLoadResult::errors`] and the rest is kept.

use paint_match::{CatalogPaint, CatalogSnapshot, PaintFinish, PaintType};
use serde::Deserialize;

use crate::assets::AssetLoader;
use crate::error::CatalogError;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    brand: String,
    #[serde(default)]
    paints: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    #[serde(default)]
    stable_id: Option<String>,
    name: String,
    #[serde(default)]
    line: Option<String>,
    #[serde(default)]
    line_variant: Option<String>,
    #[serde(default)]
    code: Option<String>,
    hex: String,
    #[serde(rename = "type", default)]
    paint_type: PaintType,
    #[serde(default)]
    finish: PaintFinish,
    #[serde(default)]
    tags: Vec<String>,
}

/// Paints loaded from every readable document plus one message per
/// problem encountered.
#[derive(Debug, Default)]
pub struct CatalogLoadResult {
    pub paints: Vec<CatalogPaint>,
    pub errors: Vec<String>,
}

impl CatalogLoadResult {
    pub fn has_any_paints(&self) -> bool {
        !self.paints.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_full_success(&self) -> bool {
        self.has_any_paints() && !self.has_errors()
    }

    pub fn is_complete_failure(&self) -> bool {
        !self.has_any_paints() && self.has_errors()
    }

    pub fn into_snapshot(self) -> CatalogSnapshot {
        CatalogSnapshot::new(self.paints)
    }
}

/// Lowercase ASCII alphanumerics with every other run collapsed to `-`.
pub fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Default id: `<file-stem>:<slug(line)>:<slug(name)>`, the line
/// segment omitted when the paint has none.
pub fn default_stable_id(stem: &str, line: Option<&str>, name: &str) -> String {
    match line.map(slug).filter(|l| !l.is_empty()) {
        Some(line) => format!("{stem}:{line}:{}", slug(name)),
        None => format!("{stem}:{}", slug(name)),
    }
}

/// Parse one catalog document.
///
/// A document that is not valid JSON fails as a whole; a paint with a
/// bad hex is skipped and reported alongside the paints that parsed.
pub fn parse_document(
    file: &str,
    stem: &str,
    bytes: &[u8],
) -> Result<(Vec<CatalogPaint>, Vec<CatalogError>), CatalogError> {
    let document: CatalogFile = serde_json::from_slice(bytes).map_err(|source| CatalogError::Parse {
        file: file.to_string(),
        source,
    })?;

    let mut paints = Vec::with_capacity(document.paints.len());
    let mut errors = Vec::new();
    for entry in document.paints {
        let stable_id = entry
            .stable_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| default_stable_id(stem, entry.line.as_deref(), &entry.name));

        match CatalogPaint::new(stable_id, &entry.name, &document.brand, &entry.hex) {
            Ok(paint) => {
                let mut paint = paint
                    .with_type(entry.paint_type)
                    .with_finish(entry.finish)
                    .with_tags(entry.tags);
                if let Some(line) = entry.line {
                    paint = paint.with_line(line);
                }
                if let Some(variant) = entry.line_variant {
                    paint = paint.with_line_variant(variant);
                }
                if let Some(code) = entry.code {
                    paint = paint.with_code(code);
                }
                paints.push(paint);
            }
            Err(source) => errors.push(CatalogError::InvalidPaint {
                file: file.to_string(),
                name: entry.name,
                source,
            }),
        }
    }
    Ok((paints, errors))
}

/// Load every catalog document the asset loader provides.
pub fn load_catalog(loader: &AssetLoader) -> CatalogLoadResult {
    let documents = loader.read_catalog();
    let mut result = CatalogLoadResult::default();

    if documents.is_empty() {
        tracing::warn!(source = %loader.catalog_source(), "No catalog files found");
        result.errors.push("No paint catalog files found".to_string());
        return result;
    }

    let file_count = documents.len();
    for document in documents {
        let bytes = match document.content {
            Ok(ref bytes) => bytes,
            Err(ref e) => {
                tracing::error!(file = %document.name, %e, "Failed to read catalog file");
                result.errors.push(format!("Failed to read file: {}", document.name));
                continue;
            }
        };
        match parse_document(&document.name, document.stem(), bytes) {
            Ok((paints, errors)) => {
                tracing::debug!(
                    file = %document.name,
                    paints = paints.len(),
                    skipped = errors.len(),
                    "Loaded catalog file"
                );
                result.paints.extend(paints);
                for e in errors {
                    tracing::warn!(%e, "Skipped catalog paint");
                    result.errors.push(e.to_string());
                }
            }
            Err(e) => {
                tracing::error!(%e, "Failed to parse catalog file");
                result.errors.push(e.to_string());
            }
        }
    }

    let (snapshot, dropped) = CatalogSnapshot::with_duplicates(std::mem::take(&mut result.paints));
    result.paints = snapshot.into_paints();
    for id in dropped {
        let e = CatalogError::DuplicateId(id);
        tracing::warn!(%e, "Dropped duplicate catalog paint");
        result.errors.push(e.to_string());
    }

    if result.is_complete_failure() {
        tracing::error!(files = file_count, "Failed to load any paints");
    } else if result.has_errors() {
        tracing::warn!(
            paints = result.paints.len(),
            errors = result.errors.len(),
            "Loaded catalog with errors"
        );
    } else {
        tracing::info!(
            paints = result.paints.len(),
            files = file_count,
            "Loaded paint catalog"
        );
    }

    result
}
