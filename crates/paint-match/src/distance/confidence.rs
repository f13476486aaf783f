//! Distance to confidence mapping and quality tiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Distance at which confidence falls to 0.5.
pub const CONFIDENCE_SCALE: f64 = 5.0;

/// Upper bound (exclusive) of [`MatchQuality::Excellent`].
pub const EXCELLENT_THRESHOLD: f64 = 2.0;
/// Upper bound (exclusive) of [`MatchQuality::Good`].
pub const GOOD_THRESHOLD: f64 = 5.0;
/// Upper bound (exclusive) of [`MatchQuality::Fair`].
pub const FAIR_THRESHOLD: f64 = 10.0;

/// Map a ΔE distance to a confidence in `0.0..=1.0`.
///
/// `1 / (1 + (d / 5)²)`: 1.0 at zero, 0.5 at ΔE 5, 0.2 at ΔE 10 and
/// approaching zero beyond. Strictly decreasing for `d >= 0`. Negative
/// input is treated as zero, non-finite input yields 0.0.
///
/// ```
/// use paint_match::confidence;
///
/// assert_eq!(confidence(0.0), 1.0);
/// assert!((confidence(10.0) - 0.2).abs() < 1e-12);
/// ```
#[inline]
pub fn confidence(distance: f64) -> f64 {
    if !distance.is_finite() {
        return 0.0;
    }
    let x = distance.max(0.0) / CONFIDENCE_SCALE;
    1.0 / (1.0 + x * x)
}

/// Named quality tier for a distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchQuality {
    /// ΔE below 2: hard to tell apart side by side
    Excellent,
    /// ΔE below 5
    Good,
    /// ΔE below 10
    Fair,
    /// Everything else
    Poor,
}

impl MatchQuality {
    /// Tier for a distance. NaN is `Poor`.
    pub fn from_distance(distance: f64) -> Self {
        if distance < EXCELLENT_THRESHOLD {
            Self::Excellent
        } else if distance < GOOD_THRESHOLD {
            Self::Good
        } else if distance < FAIR_THRESHOLD {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    /// Whether this tier is `floor` or better.
    #[inline]
    pub fn meets(self, floor: MatchQuality) -> bool {
        self <= floor
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }

    /// Short human-readable label.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent color match",
            Self::Good => "Good match",
            Self::Fair => "Fair match",
            Self::Poor => "Poor match",
        }
    }
}

impl fmt::Display for MatchQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "excellent" => Ok(Self::Excellent),
            "good" => Ok(Self::Good),
            "fair" => Ok(Self::Fair),
            "poor" => Ok(Self::Poor),
            other => Err(format!(
                "unknown match quality '{other}', expected excellent, good, fair or poor"
            )),
        }
    }
}
