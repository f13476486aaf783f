use crate::assets::AssetLoader;
use paint_match::{DeltaEAlgorithm, MatchQuality, PaintType, RecipeQuery, SimilarQuery, TypeEquivalence};
use serde::Deserialize;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Defaults for similar-paint queries
    #[serde(default)]
    pub matching: MatchDefaults,

    /// Defaults and search policy for mixing recipes
    #[serde(default)]
    pub recipes: RecipeDefaults,

    /// Groups of interchangeable paint types
    #[serde(default = "default_type_equivalences")]
    pub type_equivalences: Vec<Vec<PaintType>>,
}

fn default_type_equivalences() -> Vec<Vec<PaintType>> {
    TypeEquivalence::default().groups().to_vec()
}

/// Defaults for `POST /api/match/similar` and the `similar` command
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MatchDefaults {
    pub algorithm: DeltaEAlgorithm,
    pub limit: usize,
    pub require_same_type: bool,
    pub require_same_finish: bool,
    /// Worst quality tier returned; unset returns every tier
    pub min_quality: Option<MatchQuality>,
}

impl Default for MatchDefaults {
    fn default() -> Self {
        let query = SimilarQuery::default();
        Self {
            algorithm: query.algorithm,
            limit: query.limit,
            require_same_type: query.require_same_type,
            require_same_finish: query.require_same_finish,
            min_quality: query.min_quality,
        }
    }
}

/// Defaults for `POST /api/match/recipes` and the `mix` command
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RecipeDefaults {
    pub algorithm: DeltaEAlgorithm,
    pub require_same_type: bool,
    pub max_components: usize,
    pub min_percentage: f64,
    pub max_results: usize,
    /// Percentage grid increment
    pub step: f64,
    /// Closest candidates considered per search (plus lightest and darkest)
    pub shortlist_size: usize,
}

impl Default for RecipeDefaults {
    fn default() -> Self {
        let query = RecipeQuery::default();
        Self {
            algorithm: query.algorithm,
            require_same_type: query.require_same_type,
            max_components: query.max_components,
            min_percentage: query.min_percentage,
            max_results: query.max_results,
            step: paint_match::matching::DEFAULT_PERCENTAGE_STEP,
            shortlist_size: paint_match::matching::DEFAULT_SHORTLIST_SIZE,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            matching: MatchDefaults::default(),
            recipes: RecipeDefaults::default(),
            type_equivalences: default_type_equivalences(),
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => {
                    tracing::info!(
                        type_groups = config.type_equivalences.len(),
                        step = config.recipes.step,
                        shortlist = config.recipes.shortlist_size,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse a YAML document
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as unit, not as an empty map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn type_equivalence(&self) -> TypeEquivalence {
        TypeEquivalence::new(self.type_equivalences.clone())
    }

    /// Similar query with every field taken from the configured defaults
    pub fn similar_query(&self) -> SimilarQuery {
        SimilarQuery {
            target_brands: None,
            algorithm: self.matching.algorithm,
            require_same_type: self.matching.require_same_type,
            require_same_finish: self.matching.require_same_finish,
            limit: self.matching.limit,
            min_quality: self.matching.min_quality,
        }
    }

    /// Recipe query with every field taken from the configured defaults
    pub fn recipe_query(&self) -> RecipeQuery {
        RecipeQuery {
            source_brands: None,
            algorithm: self.recipes.algorithm,
            require_same_type: self.recipes.require_same_type,
            max_components: self.recipes.max_components,
            min_percentage: self.recipes.min_percentage,
            max_results: self.recipes.max_results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
matching:
  algorithm: euclidean
  limit: 10
  require_same_type: false
  min_quality: fair
recipes:
  max_components: 2
  min_percentage: 10
  step: 10
  shortlist_size: 8
type_equivalences:
  - [Base, Layer]
  - [Shade, Wash]
"#;
        let config = AppConfig::parse(yaml).unwrap();
        assert_eq!(config.matching.algorithm, DeltaEAlgorithm::Euclidean);
        assert_eq!(config.matching.limit, 10);
        assert!(!config.matching.require_same_type);
        assert!(!config.matching.require_same_finish);
        assert_eq!(config.matching.min_quality, Some(MatchQuality::Fair));
        assert_eq!(config.similar_query().min_quality, Some(MatchQuality::Fair));
        assert_eq!(config.recipes.max_components, 2);
        assert_eq!(config.recipes.min_percentage, 10.0);
        assert_eq!(config.recipes.step, 10.0);
        assert_eq!(config.recipes.shortlist_size, 8);
        assert_eq!(config.recipes.max_results, 6);
        assert!(config
            .type_equivalence()
            .compatible(PaintType::Wash, PaintType::Shade));
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config
            .type_equivalence()
            .compatible(PaintType::Base, PaintType::Layer));
    }

    #[test]
    fn test_missing_type_equivalences_default_to_base_layer() {
        let config = AppConfig::parse("matching:\n  limit: 5\n").unwrap();
        assert_eq!(
            config.type_equivalences,
            vec![vec![PaintType::Base, PaintType::Layer]]
        );
    }

    #[test]
    fn test_explicit_empty_equivalences_are_strict() {
        let config = AppConfig::parse("type_equivalences: []\n").unwrap();
        assert!(!config
            .type_equivalence()
            .compatible(PaintType::Base, PaintType::Layer));
    }

    #[test]
    fn test_queries_follow_config() {
        let config = AppConfig::parse("recipes:\n  max_results: 3\n").unwrap();
        assert_eq!(config.recipe_query().max_results, 3);
        assert_eq!(config.similar_query(), SimilarQuery::default());
    }

    #[test]
    fn test_embedded_config_parses() {
        let loader = AssetLoader::new(None, None);
        let content = loader.read_config_string().unwrap();
        assert!(AppConfig::parse(&content).is_ok());
    }
}
