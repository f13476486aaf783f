//! Perceptual color difference (ΔE)
//!
//! Two formulas are provided:
//!
//! - [`DeltaEAlgorithm::Euclidean`]: CIE76, plain Euclidean distance in Lab.
//!   Cheap and coarse; useful as a pre-filter.
//! - [`DeltaEAlgorithm::Ciede2000`]: CIEDE2000 (CIE 142-2001), weighting
//!   lightness, chroma and hue non-uniformly. Used for every user-facing
//!   query by default.
//!
//! CIEDE2000 is not a true metric. Callers must only rely on
//! `distance(a, b) ≈ distance(b, a)` within 1e-6, not bit-exact symmetry.

mod confidence;

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Lab;

pub use confidence::{
    confidence, MatchQuality, CONFIDENCE_SCALE, EXCELLENT_THRESHOLD, FAIR_THRESHOLD,
    GOOD_THRESHOLD,
};

/// `25^7`, used by the chroma compensation terms of CIEDE2000
const POW25_7: f64 = 6_103_515_625.0;

/// Distance formula selector.
///
/// A closed set resolved to a plain function pointer with
/// [`DeltaEAlgorithm::distance_fn`] before any hot loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaEAlgorithm {
    /// CIE76 Euclidean distance in Lab
    #[serde(alias = "cie76")]
    Euclidean,
    /// CIEDE2000
    #[default]
    #[serde(alias = "delta_e_2000", alias = "de2000")]
    Ciede2000,
}

impl DeltaEAlgorithm {
    /// Stable lowercase name, matching the serde representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::Ciede2000 => "ciede2000",
        }
    }

    /// The distance function for this algorithm.
    #[inline]
    pub fn distance_fn(self) -> fn(Lab, Lab) -> f64 {
        match self {
            Self::Euclidean => euclidean,
            Self::Ciede2000 => ciede2000,
        }
    }
}

impl fmt::Display for DeltaEAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeltaEAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "euclidean" | "cie76" => Ok(Self::Euclidean),
            "ciede2000" | "delta_e_2000" | "de2000" => Ok(Self::Ciede2000),
            other => Err(format!(
                "unknown distance algorithm '{other}', expected 'euclidean' or 'ciede2000'"
            )),
        }
    }
}

/// Perceptual distance between two Lab colors. Always `>= 0`.
#[inline]
pub fn distance(a: Lab, b: Lab, algorithm: DeltaEAlgorithm) -> f64 {
    (algorithm.distance_fn())(a, b)
}

/// CIE76: Euclidean distance in Lab.
#[inline]
pub fn euclidean(a: Lab, b: Lab) -> f64 {
    let dl = a.l - b.l;
    let da = a.a - b.a;
    let db = a.b - b.b;
    (dl * dl + da * da + db * db).sqrt()
}

/// CIEDE2000 color difference with unit parametric factors (kL = kC = kH = 1).
///
/// When either adjusted chroma is zero the hue is undefined; the hue
/// difference then contributes nothing and the mean hue is the plain sum of
/// the two angles, as prescribed by Sharma et al. (2005).
pub fn ciede2000(lab1: Lab, lab2: Lab) -> f64 {
    let c1_ab = lab1.a.hypot(lab1.b);
    let c2_ab = lab2.a.hypot(lab2.b);
    let c_ab_mean_pow7 = ((c1_ab + c2_ab) / 2.0).powi(7);
    let g = 0.5 * (1.0 - (c_ab_mean_pow7 / (c_ab_mean_pow7 + POW25_7)).sqrt());

    let a1_prime = lab1.a * (1.0 + g);
    let a2_prime = lab2.a * (1.0 + g);
    let c1_prime = a1_prime.hypot(lab1.b);
    let c2_prime = a2_prime.hypot(lab2.b);
    let h1_prime = hue_angle(a1_prime, lab1.b);
    let h2_prime = hue_angle(a2_prime, lab2.b);

    let chroma_product = c1_prime * c2_prime;

    let delta_l_prime = lab2.l - lab1.l;
    let delta_c_prime = c2_prime - c1_prime;
    let delta_h_prime = if chroma_product == 0.0 {
        0.0
    } else {
        let dh = h2_prime - h1_prime;
        if dh > 180.0 {
            dh - 360.0
        } else if dh < -180.0 {
            dh + 360.0
        } else {
            dh
        }
    };
    let delta_big_h_prime =
        2.0 * chroma_product.sqrt() * (delta_h_prime.to_radians() / 2.0).sin();

    let l_prime_mean = (lab1.l + lab2.l) / 2.0;
    let c_prime_mean = (c1_prime + c2_prime) / 2.0;
    let h_prime_mean = if chroma_product == 0.0 {
        h1_prime + h2_prime
    } else if (h1_prime - h2_prime).abs() <= 180.0 {
        (h1_prime + h2_prime) / 2.0
    } else if h1_prime + h2_prime < 360.0 {
        (h1_prime + h2_prime + 360.0) / 2.0
    } else {
        (h1_prime + h2_prime - 360.0) / 2.0
    };

    let h_rad = h_prime_mean.to_radians();
    let t = 1.0 - 0.17 * (h_rad - PI / 6.0).cos()
        + 0.24 * (2.0 * h_rad).cos()
        + 0.32 * (3.0 * h_rad + PI / 30.0).cos()
        - 0.20 * (4.0 * h_rad - 63.0_f64.to_radians()).cos();

    let l_dev_sq = (l_prime_mean - 50.0).powi(2);
    let sl = 1.0 + (0.015 * l_dev_sq) / (20.0 + l_dev_sq).sqrt();
    let sc = 1.0 + 0.045 * c_prime_mean;
    let sh = 1.0 + 0.015 * c_prime_mean * t;

    let delta_theta = 30.0 * (-((h_prime_mean - 275.0) / 25.0).powi(2)).exp();
    let c_prime_mean_pow7 = c_prime_mean.powi(7);
    let rc = 2.0 * (c_prime_mean_pow7 / (c_prime_mean_pow7 + POW25_7)).sqrt();
    let rt = -(2.0 * delta_theta).to_radians().sin() * rc;

    let term_l = delta_l_prime / sl;
    let term_c = delta_c_prime / sc;
    let term_h = delta_big_h_prime / sh;

    // Rounding can push the sum a hair below zero for identical inputs
    (term_l * term_l + term_c * term_c + term_h * term_h + rt * term_c * term_h)
        .max(0.0)
        .sqrt()
}

/// Hue angle in degrees (0..360); 0 for the achromatic axis.
#[inline]
fn hue_angle(a: f64, b: f64) -> f64 {
    Lab::new(0.0, a, b).hue_degrees()
}
