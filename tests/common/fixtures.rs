//! Test fixtures and constants.

use std::fs;
use std::path::Path;

/// Stable ids present in the embedded sample catalog
pub mod paints {
    /// Citadel Base, #9A1115
    pub const MEPHISTON_RED: &str = "citadel:base:mephiston-red";

    /// Citadel Layer, #FFFFFF
    pub const WHITE_SCAR: &str = "citadel:layer:white-scar";

    /// Vallejo Model Color (Layer), #A11A1B
    pub const VALLEJO_FLAT_RED: &str = "vallejo-model-color:model-color:flat-red";

    /// Citadel Shade
    pub const NULN_OIL: &str = "citadel:shade:nuln-oil";
}

/// A small catalog with exact primaries, written as `acme.json`
pub const ACME_CATALOG: &str = r##"{
  "brand": "Acme",
  "paints": [
    { "stable_id": "acme:red", "name": "Red", "hex": "#FF0000", "type": "Base", "finish": "Matte" },
    { "stable_id": "acme:white", "name": "White", "hex": "#FFFFFF", "type": "Layer", "finish": "Matte" },
    { "stable_id": "acme:black", "name": "Black", "hex": "#000000", "type": "Base", "finish": "Matte" },
    { "stable_id": "acme:blue", "name": "Blue", "hex": "#0000FF", "type": "Base", "finish": "Gloss" },
    { "stable_id": "acme:pink-wash", "name": "Pink Wash", "hex": "#FF8080", "type": "Wash", "finish": "Matte" }
  ]
}"##;

/// A second brand whose red nearly matches Acme red
pub const OTHER_CATALOG: &str = r##"{
  "brand": "Other",
  "paints": [
    { "name": "Scarlet", "line": "Core", "hex": "#FE0101", "type": "Layer", "finish": "Matte" },
    { "name": "Snow", "line": "Core", "hex": "#FAFAFA", "type": "Base", "finish": "Matte" }
  ]
}"##;

/// Write a catalog file into `dir`
pub fn write_catalog(dir: &Path, file_name: &str, content: &str) {
    fs::write(dir.join(file_name), content).expect("Failed to write catalog file");
}

/// Temporary directory holding the Acme and Other catalogs
pub fn acme_catalog_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_catalog(dir.path(), "acme.json", ACME_CATALOG);
    write_catalog(dir.path(), "other.json", OTHER_CATALOG);
    dir
}
