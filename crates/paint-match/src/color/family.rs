//! Coarse color families for browsing
//!
//! A family is derived from Lab lightness, chroma and hue angle. The bands
//! are tuned for paint swatches, not for any colorimetric standard.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::lab::Lab;

/// Chroma below which a color counts as black, grey or white
const ACHROMATIC_CHROMA: f64 = 8.0;
/// Lightness at or above which an achromatic color is white
const WHITE_LIGHTNESS: f64 = 85.0;
/// Lightness at or below which an achromatic color is black
const BLACK_LIGHTNESS: f64 = 25.0;
/// Chromatic colors this dark still read as black
const DEEP_BLACK_LIGHTNESS: f64 = 15.0;

/// Named hue family used to filter catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFamily {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Brown,
    #[serde(alias = "gray")]
    Grey,
    Black,
    White,
}

impl ColorFamily {
    pub const ALL: [ColorFamily; 11] = [
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Blue,
        Self::Purple,
        Self::Pink,
        Self::Brown,
        Self::Grey,
        Self::Black,
        Self::White,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Pink => "pink",
            Self::Brown => "brown",
            Self::Grey => "grey",
            Self::Black => "black",
            Self::White => "white",
        }
    }

    /// Classify a Lab color.
    ///
    /// ```
    /// use paint_match::{ColorFamily, Lab, Rgb8};
    ///
    /// let lab = Lab::from(Rgb8::new(0x9A, 0x11, 0x15));
    /// assert_eq!(ColorFamily::of(lab), ColorFamily::Red);
    /// ```
    pub fn of(lab: Lab) -> Self {
        let chroma = lab.chroma();
        if chroma < ACHROMATIC_CHROMA {
            return if lab.l >= WHITE_LIGHTNESS {
                Self::White
            } else if lab.l <= BLACK_LIGHTNESS {
                Self::Black
            } else {
                Self::Grey
            };
        }
        if lab.l < DEEP_BLACK_LIGHTNESS {
            return Self::Black;
        }

        match lab.hue_degrees() {
            h if !(20.0..345.0).contains(&h) => {
                if lab.l >= 55.0 {
                    Self::Pink
                } else {
                    Self::Red
                }
            }
            h if h < 50.0 => {
                if lab.l >= 70.0 && chroma < 45.0 {
                    Self::Pink
                } else {
                    Self::Red
                }
            }
            // Dark oranges and dark yellows are browns
            h if h < 80.0 => {
                if lab.l < 50.0 {
                    Self::Brown
                } else {
                    Self::Orange
                }
            }
            h if h < 115.0 => {
                if lab.l < 45.0 {
                    Self::Brown
                } else {
                    Self::Yellow
                }
            }
            h if h < 185.0 => Self::Green,
            h if h < 310.0 => Self::Blue,
            _ => Self::Purple,
        }
    }
}

impl fmt::Display for ColorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if name == "gray" {
            return Ok(Self::Grey);
        }
        Self::ALL
            .into_iter()
            .find(|family| family.as_str() == name)
            .ok_or_else(|| format!("unknown color family '{s}'"))
    }
}
