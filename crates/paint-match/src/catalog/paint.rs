//! Catalog paint record and classification enums

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{lab_to_rgb, ColorFamily, ColorFormatError, Lab, Rgb8};

/// Paint classification.
///
/// Unrecognised names parse as [`PaintType::Unknown`] rather than failing,
/// so a catalog with a new product category still loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum PaintType {
    Base,
    Layer,
    Shade,
    Wash,
    Contrast,
    Speed,
    Dry,
    Glaze,
    Highlight,
    Ink,
    Air,
    Metallic,
    Primer,
    Spray,
    Technical,
    #[default]
    Unknown,
}

impl PaintType {
    pub const ALL: [PaintType; 16] = [
        Self::Base,
        Self::Layer,
        Self::Shade,
        Self::Wash,
        Self::Contrast,
        Self::Speed,
        Self::Dry,
        Self::Glaze,
        Self::Highlight,
        Self::Ink,
        Self::Air,
        Self::Metallic,
        Self::Primer,
        Self::Spray,
        Self::Technical,
        Self::Unknown,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Base => "Base",
            Self::Layer => "Layer",
            Self::Shade => "Shade",
            Self::Wash => "Wash",
            Self::Contrast => "Contrast",
            Self::Speed => "Speed",
            Self::Dry => "Dry",
            Self::Glaze => "Glaze",
            Self::Highlight => "Highlight",
            Self::Ink => "Ink",
            Self::Air => "Air",
            Self::Metallic => "Metallic",
            Self::Primer => "Primer",
            Self::Spray => "Spray",
            Self::Technical => "Technical",
            Self::Unknown => "Unknown",
        }
    }

    /// Case-insensitive lookup, `Unknown` for anything unrecognised.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
            .unwrap_or_default()
    }
}

impl From<String> for PaintType {
    fn from(value: String) -> Self {
        Self::from_name(&value)
    }
}

impl FromStr for PaintType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for PaintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Surface finish. Unrecognised names parse as [`PaintFinish::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum PaintFinish {
    Matte,
    Satin,
    Gloss,
    Metallic,
    Transparent,
    #[default]
    Unknown,
}

impl PaintFinish {
    pub const ALL: [PaintFinish; 6] = [
        Self::Matte,
        Self::Satin,
        Self::Gloss,
        Self::Metallic,
        Self::Transparent,
        Self::Unknown,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Matte => "Matte",
            Self::Satin => "Satin",
            Self::Gloss => "Gloss",
            Self::Metallic => "Metallic",
            Self::Transparent => "Transparent",
            Self::Unknown => "Unknown",
        }
    }

    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(name))
            .unwrap_or_default()
    }
}

impl From<String> for PaintFinish {
    fn from(value: String) -> Self {
        Self::from_name(&value)
    }
}

impl FromStr for PaintFinish {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for PaintFinish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Groups of paint types that serve the same practical role and are
/// treated as the same type by `require_same_type` filters.
///
/// The default declares Base and Layer interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeEquivalence {
    groups: Vec<Vec<PaintType>>,
}

impl TypeEquivalence {
    /// Only identical types are compatible.
    pub fn strict() -> Self {
        Self { groups: Vec::new() }
    }

    pub fn new(groups: Vec<Vec<PaintType>>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[Vec<PaintType>] {
        &self.groups
    }

    /// Whether two types are the same or share a group.
    pub fn compatible(&self, a: PaintType, b: PaintType) -> bool {
        a == b
            || self
                .groups
                .iter()
                .any(|group| group.contains(&a) && group.contains(&b))
    }
}

impl Default for TypeEquivalence {
    fn default() -> Self {
        Self {
            groups: vec![vec![PaintType::Base, PaintType::Layer]],
        }
    }
}

/// One paint from a manufacturer catalog.
///
/// RGB and Lab are derived from `hex` once, when the record is built, so
/// matching never converts catalog colors on the fly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPaint {
    /// Globally unique, stable across catalog reloads
    pub stable_id: String,
    pub name: String,
    pub brand: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Uppercase `#RRGGBB`
    pub hex: String,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub lab_l: f64,
    pub lab_a: f64,
    pub lab_b: f64,
    #[serde(rename = "type", default)]
    pub paint_type: PaintType,
    #[serde(default)]
    pub finish: PaintFinish,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl CatalogPaint {
    /// Build a paint from its hex color, deriving RGB and Lab.
    ///
    /// Type and finish start as `Unknown`; use the `with_*` methods to
    /// fill in the remaining fields.
    pub fn new(
        stable_id: impl Into<String>,
        name: impl Into<String>,
        brand: impl Into<String>,
        hex: &str,
    ) -> Result<Self, ColorFormatError> {
        let rgb: Rgb8 = hex.parse()?;
        let lab = Lab::from(rgb);
        Ok(Self {
            stable_id: stable_id.into(),
            name: name.into(),
            brand: brand.into(),
            line: None,
            line_variant: None,
            code: None,
            hex: rgb.to_hex(),
            red: rgb.r,
            green: rgb.g,
            blue: rgb.b,
            lab_l: lab.l,
            lab_a: lab.a,
            lab_b: lab.b,
            paint_type: PaintType::Unknown,
            finish: PaintFinish::Unknown,
            tags: BTreeSet::new(),
        })
    }

    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.line = Some(line.into());
        self
    }

    pub fn with_line_variant(mut self, variant: impl Into<String>) -> Self {
        self.line_variant = Some(variant.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_type(mut self, paint_type: PaintType) -> Self {
        self.paint_type = paint_type;
        self
    }

    pub fn with_finish(mut self, finish: PaintFinish) -> Self {
        self.finish = finish;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Override the stored Lab coordinates (e.g. measured values from a
    /// spectrophotometer). RGB and hex are left untouched.
    pub fn with_lab(mut self, lab: Lab) -> Self {
        self.lab_l = lab.l;
        self.lab_a = lab.a;
        self.lab_b = lab.b;
        self
    }

    #[inline]
    pub fn lab(&self) -> Lab {
        Lab::new(self.lab_l, self.lab_a, self.lab_b)
    }

    #[inline]
    pub fn rgb(&self) -> Rgb8 {
        Rgb8::new(self.red, self.green, self.blue)
    }

    pub fn color_family(&self) -> ColorFamily {
        ColorFamily::of(self.lab())
    }

    /// The paint's color as a query sample.
    pub fn sample(&self) -> ColorSample {
        ColorSample {
            lab: self.lab(),
            rgb: self.rgb(),
            hex: self.hex.clone(),
        }
    }

    /// Text used by keyword search: name, brand, line, code, type, finish.
    pub fn searchable_text(&self) -> String {
        let mut text = format!("{} {}", self.name, self.brand);
        for part in [&self.line, &self.code].into_iter().flatten() {
            text.push(' ');
            text.push_str(part);
        }
        text.push(' ');
        text.push_str(self.paint_type.as_str());
        text.push(' ');
        text.push_str(self.finish.as_str());
        text
    }
}

/// A color used as the anchor of one query.
///
/// Carries the Lab coordinates plus the sRGB value they came from. Has no
/// identity; callers build one per query for custom or mixed colors that
/// are not catalog entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSample {
    pub lab: Lab,
    pub rgb: Rgb8,
    pub hex: String,
}

impl ColorSample {
    /// Parse a strict `#RRGGBB` string.
    pub fn from_hex(hex: &str) -> Result<Self, ColorFormatError> {
        Ok(Self::from_rgb(hex.parse()?))
    }

    pub fn from_rgb(rgb: Rgb8) -> Self {
        Self {
            lab: Lab::from(rgb),
            rgb,
            hex: rgb.to_hex(),
        }
    }

    /// Sample at exact Lab coordinates; `rgb` and `hex` are the clamped
    /// nearest sRGB color.
    pub fn from_lab(lab: Lab) -> Self {
        let rgb = lab_to_rgb(lab);
        Self {
            lab,
            rgb,
            hex: rgb.to_hex(),
        }
    }
}
