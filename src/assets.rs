//! Asset loading with embedded fallbacks
//!
//! This module provides a unified interface for loading assets (paint catalogs, config)
//! with the following behavior:
//!
//! - If an env var is NOT set: use embedded assets only (no filesystem access)
//! - If an env var IS set and path is empty/missing: seed with embedded assets, then use filesystem
//! - If an env var IS set and path has catalog files: use filesystem only
//!
//! Catalog files are always returned in sorted file-name order so that
//! duplicate resolution (first wins) is reproducible.

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded sample catalog (one JSON file per brand or range)
#[derive(RustEmbed)]
#[folder = "catalog/"]
#[include = "*.json"]
struct EmbeddedCatalog;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// Asset category for selective operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    Catalog,
    Config,
}

/// Report of seeding operations
#[derive(Debug, Default)]
pub struct SeedReport {
    pub catalog_seeded: Vec<String>,
    pub config_seeded: bool,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.catalog_seeded.is_empty() && !self.config_seeded
    }
}

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// One catalog document as read from its source
pub struct CatalogDocument {
    /// File name, e.g. `citadel.json`
    pub name: String,
    pub content: io::Result<Cow<'static, [u8]>>,
}

impl CatalogDocument {
    /// File name without the `.json` extension
    pub fn stem(&self) -> &str {
        self.name.strip_suffix(".json").unwrap_or(&self.name)
    }
}

/// Where the catalog is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Embedded,
    Directory(PathBuf),
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Embedded => f.write_str("embedded"),
            CatalogSource::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}

/// Asset loader with optional filesystem override
pub struct AssetLoader {
    /// External catalog directory (from CATALOG_DIR env var)
    catalog_dir: Option<PathBuf>,
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// Paths should be `Some` only if the corresponding env var was set.
    /// If `None`, embedded assets are used exclusively.
    pub fn new(catalog_dir: Option<PathBuf>, config_file: Option<PathBuf>) -> Self {
        Self {
            catalog_dir,
            config_file,
        }
    }

    /// Build a loader from `CATALOG_DIR` and `CONFIG_FILE`
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("CATALOG_DIR").ok().map(PathBuf::from),
            std::env::var("CONFIG_FILE").ok().map(PathBuf::from),
        )
    }

    /// Sorted `*.json` file names in an external directory
    fn json_files(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .map(|entries| {
                entries
                    .flatten()
                    .filter(|e| e.path().is_file())
                    .filter_map(|e| e.file_name().to_str().map(str::to_string))
                    .filter(|name| name.ends_with(".json"))
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    /// The catalog source actually in effect
    ///
    /// A configured directory without any JSON files falls back to the
    /// embedded catalog.
    pub fn catalog_source(&self) -> CatalogSource {
        match self.catalog_dir {
            Some(ref dir) if !Self::json_files(dir).is_empty() => {
                CatalogSource::Directory(dir.clone())
            }
            _ => CatalogSource::Embedded,
        }
    }

    /// Read every catalog document in sorted file-name order
    ///
    /// Read failures are returned per document so one unreadable file
    /// does not hide the others.
    pub fn read_catalog(&self) -> Vec<CatalogDocument> {
        match self.catalog_source() {
            CatalogSource::Directory(dir) => Self::json_files(&dir)
                .into_iter()
                .map(|name| {
                    let path = dir.join(&name);
                    tracing::trace!(path = %path.display(), "Loading catalog from filesystem");
                    CatalogDocument {
                        content: fs::read(&path).map(Cow::Owned),
                        name,
                    }
                })
                .collect(),
            CatalogSource::Embedded => Self::list_embedded(AssetCategory::Catalog)
                .into_iter()
                .map(|name| {
                    tracing::trace!(file = %name, "Loading catalog from embedded assets");
                    let content = EmbeddedCatalog::get(&name).map(|f| f.data).ok_or_else(|| {
                        io::Error::new(
                            io::ErrorKind::NotFound,
                            format!("Catalog file not found: {name}"),
                        )
                    });
                    CatalogDocument { name, content }
                })
                .collect(),
        }
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
        }

        EmbeddedConfig::get("config.yaml")
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
            })
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Check if a directory exists and is empty (ignoring .gitkeep)
    fn is_empty_dir(path: &Path) -> bool {
        if !path.exists() || !path.is_dir() {
            return false;
        }
        path.read_dir()
            .map(|mut entries| {
                entries.all(|e| {
                    e.map(|entry| entry.file_name() == ".gitkeep")
                        .unwrap_or(false)
                })
            })
            .unwrap_or(false)
    }

    /// Write embedded catalog files into `dir`
    fn write_catalog(dir: &Path, force: bool, report: &mut InitReport) -> io::Result<()> {
        fs::create_dir_all(dir)?;
        for file in EmbeddedCatalog::iter() {
            let path = dir.join(file.as_ref());
            if !force && path.exists() {
                report.skipped.push(path.display().to_string());
                continue;
            }
            if let Some(data) = EmbeddedCatalog::get(&file) {
                fs::write(&path, &*data.data)?;
                report.written.push(path.display().to_string());
            }
        }
        Ok(())
    }

    /// Seed empty/missing locations with embedded assets
    ///
    /// Only operates on paths that were configured (env var was set).
    /// Creates directories if they don't exist.
    pub fn seed_if_configured(&self) -> io::Result<SeedReport> {
        let mut report = SeedReport::default();

        if let Some(ref dir) = self.catalog_dir {
            let should_seed = !dir.exists() || Self::is_empty_dir(dir);
            if should_seed {
                let mut written = InitReport::default();
                Self::write_catalog(dir, false, &mut written)?;
                report.catalog_seeded = written.written;
                if !report.catalog_seeded.is_empty() {
                    tracing::info!(
                        dir = %dir.display(),
                        count = report.catalog_seeded.len(),
                        "Seeded catalog directory with embedded assets"
                    );
                }
            }
        }

        if let Some(ref path) = self.config_file {
            if !path.exists() {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                if let Some(data) = EmbeddedConfig::get("config.yaml") {
                    fs::write(path, &*data.data)?;
                    report.config_seeded = true;
                    tracing::info!(path = %path.display(), "Seeded config file with embedded default");
                }
            }
        }

        Ok(report)
    }

    /// Extract embedded assets to filesystem (init command)
    ///
    /// Uses the configured paths (or defaults if not set).
    pub fn init(&self, categories: &[AssetCategory], force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();

        for category in categories {
            match category {
                AssetCategory::Catalog => {
                    let dir = self
                        .catalog_dir
                        .clone()
                        .unwrap_or_else(|| PathBuf::from("./catalog"));
                    Self::write_catalog(&dir, force, &mut report)?;
                }
                AssetCategory::Config => {
                    let path = self
                        .config_file
                        .clone()
                        .unwrap_or_else(|| PathBuf::from("./config.yaml"));

                    if !force && path.exists() {
                        report.skipped.push(path.display().to_string());
                        continue;
                    }
                    if let Some(parent) = path.parent() {
                        fs::create_dir_all(parent)?;
                    }
                    if let Some(data) = EmbeddedConfig::get("config.yaml") {
                        fs::write(&path, &*data.data)?;
                        report.written.push(path.display().to_string());
                    }
                }
            }
        }

        Ok(report)
    }

    /// List embedded assets by category, sorted
    pub fn list_embedded(category: AssetCategory) -> Vec<String> {
        match category {
            AssetCategory::Catalog => {
                let mut files: Vec<String> =
                    EmbeddedCatalog::iter().map(|s| s.to_string()).collect();
                files.sort();
                files
            }
            AssetCategory::Config => vec!["config.yaml".to_string()],
        }
    }
}
