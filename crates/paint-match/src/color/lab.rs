//! CIE L\*a\*b\* color space
//!
//! Lab is the space perceptual distance is measured in. Conversion from
//! sRGB goes through gamma decoding, linear RGB and CIE XYZ relative to the
//! D65 reference white (IEC 61966-2-1 primaries, Lindbloom matrices).
//!
//! # References
//!
//! Bruce Lindbloom, "RGB/XYZ Matrices" and "XYZ to Lab"
//! <http://www.brucelindbloom.com/>

use serde::{Deserialize, Serialize};

use super::rgb::{channel_to_u8, Rgb8};

/// D65 reference white, 2° observer, Y normalised to 1.0
const WHITE_X: f64 = 0.950_47;
const WHITE_Y: f64 = 1.0;
const WHITE_Z: f64 = 1.088_83;

/// CIE epsilon (216/24389) and kappa (24389/27), exact rational forms
const EPSILON: f64 = 216.0 / 24389.0;
const KAPPA: f64 = 24389.0 / 27.0;

/// A color in CIE L\*a\*b\* space (D65).
///
/// # Components
///
/// - `l`: Lightness, 0.0 (black) to 100.0 (diffuse white)
/// - `a`: Green-red axis, roughly -128..127 for sRGB colors
/// - `b`: Blue-yellow axis, roughly -128..127 for sRGB colors
///
/// Values are not clamped; [`lab_to_rgb`] clamps when returning to sRGB.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Lab {
    /// Lightness
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl Lab {
    /// Create a new Lab color.
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Chroma `sqrt(a² + b²)`.
    #[inline]
    pub fn chroma(self) -> f64 {
        self.a.hypot(self.b)
    }

    /// Hue angle in degrees, 0.0..360.0. Achromatic colors report 0.0.
    #[inline]
    pub fn hue_degrees(self) -> f64 {
        if self.a == 0.0 && self.b == 0.0 {
            return 0.0;
        }
        let h = self.b.atan2(self.a).to_degrees();
        if h < 0.0 {
            h + 360.0
        } else {
            h
        }
    }
}

/// sRGB transfer function, decode (0..=1 encoded to 0..=1 linear)
#[inline]
fn decode_gamma(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB transfer function, encode (0..=1 linear to 0..=1 encoded)
#[inline]
fn encode_gamma(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}

#[inline]
fn lab_f_inv(f: f64) -> f64 {
    let f3 = f * f * f;
    if f3 > EPSILON {
        f3
    } else {
        (116.0 * f - 16.0) / KAPPA
    }
}

/// Convert 8-bit sRGB channels to Lab.
///
/// Pure and deterministic; every byte triple is valid input.
///
/// ```
/// use paint_match::rgb_to_lab;
///
/// let white = rgb_to_lab(255, 255, 255);
/// assert!((white.l - 100.0).abs() < 1e-3);
/// assert!(white.a.abs() < 1e-2 && white.b.abs() < 1e-2);
/// ```
pub fn rgb_to_lab(r: u8, g: u8, b: u8) -> Lab {
    let r = decode_gamma(r as f64 / 255.0);
    let g = decode_gamma(g as f64 / 255.0);
    let b = decode_gamma(b as f64 / 255.0);

    let x = 0.412_456_4 * r + 0.357_576_1 * g + 0.180_437_5 * b;
    let y = 0.212_672_9 * r + 0.715_152_2 * g + 0.072_175_0 * b;
    let z = 0.019_333_9 * r + 0.119_192_0 * g + 0.950_304_1 * b;

    let fx = lab_f(x / WHITE_X);
    let fy = lab_f(y / WHITE_Y);
    let fz = lab_f(z / WHITE_Z);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// Convert Lab back to 8-bit sRGB.
///
/// Out-of-gamut results are clamped per channel to 0..=255 and rounded
/// half-up to the nearest byte.
pub fn lab_to_rgb(lab: Lab) -> Rgb8 {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = fy + lab.a / 500.0;
    let fz = fy - lab.b / 200.0;

    let yr = if lab.l > KAPPA * EPSILON {
        fy * fy * fy
    } else {
        lab.l / KAPPA
    };
    let x = lab_f_inv(fx) * WHITE_X;
    let y = yr * WHITE_Y;
    let z = lab_f_inv(fz) * WHITE_Z;

    let r = 3.240_454_2 * x - 1.537_138_5 * y - 0.498_531_4 * z;
    let g = -0.969_266_0 * x + 1.876_010_8 * y + 0.041_556_0 * z;
    let b = 0.055_643_4 * x - 0.204_025_9 * y + 1.057_225_2 * z;

    let to_byte = |linear: f64| channel_to_u8(encode_gamma(linear.clamp(0.0, 1.0)) * 255.0);
    Rgb8::new(to_byte(r), to_byte(g), to_byte(b))
}

impl From<Rgb8> for Lab {
    fn from(rgb: Rgb8) -> Self {
        rgb_to_lab(rgb.r, rgb.g, rgb.b)
    }
}

impl From<Lab> for Rgb8 {
    fn from(lab: Lab) -> Self {
        lab_to_rgb(lab)
    }
}
