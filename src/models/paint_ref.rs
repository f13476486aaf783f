use paint_match::{CatalogAccessor, MatchError, PaintMatcher, ReferencePaint};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The color a query starts from
///
/// Either a catalog paint by stable id or a custom `#RRGGBB` color.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum PaintRef {
    /// A paint from the catalog
    Catalog { stable_id: String },
    /// A custom color sample
    Custom { hex: String },
}

impl PaintRef {
    pub fn catalog(stable_id: impl Into<String>) -> Self {
        PaintRef::Catalog {
            stable_id: stable_id.into(),
        }
    }

    pub fn custom(hex: impl Into<String>) -> Self {
        PaintRef::Custom { hex: hex.into() }
    }

    /// Parse a CLI argument: a `#`-prefixed value is a hex color,
    /// anything else a stable id.
    pub fn parse_arg(arg: &str) -> Self {
        if arg.starts_with('#') {
            Self::custom(arg)
        } else {
            Self::catalog(arg)
        }
    }

    pub fn resolve<C>(&self, matcher: &PaintMatcher<'_, C>) -> Result<ReferencePaint, MatchError>
    where
        C: CatalogAccessor + ?Sized,
    {
        match self {
            PaintRef::Catalog { stable_id } => matcher.reference_by_id(stable_id),
            PaintRef::Custom { hex } => matcher.reference_by_hex(hex),
        }
    }
}

/// The resolved source or target color echoed back in responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SourceColor {
    /// Uppercase `#RRGGBB`
    pub hex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stable_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// CIE Lab `[L, a, b]`
    pub lab: [f64; 3],
}

impl SourceColor {
    pub fn describe<C>(reference: &ReferencePaint, catalog: &C) -> Self
    where
        C: CatalogAccessor + ?Sized,
    {
        let paint = reference
            .stable_id
            .as_deref()
            .and_then(|id| catalog.find_by_stable_id(id));
        let lab = reference.sample.lab;
        Self {
            hex: reference.sample.hex.clone(),
            stable_id: reference.stable_id.clone(),
            name: paint.map(|p| p.name.clone()),
            brand: paint.map(|p| p.brand.clone()),
            lab: [lab.l, lab.a, lab.b],
        }
    }
}
