//! Mixture color model
//!
//! Paint blends are approximated by a percentage-weighted average of the
//! gamma-encoded sRGB channels. This is a pragmatic stand-in for
//! subtractive pigment mixing and is not physically exact: it does not
//! model spectral reflectance, tinting strength or opacity.
//!
//! Blending happens in RGB rather than Lab because Lab averages of
//! pigments drift in hue in ways real mixtures do not.

mod error;

pub use error::RecipeError;

use crate::color::Rgb8;

/// Tolerance used when checking that percentages sum to 100.
pub const PERCENTAGE_TOLERANCE: f64 = 1e-6;

/// Blend colors by percentage.
///
/// Percentages are normalised by their sum, so `[(a, 1.0), (b, 1.0)]` and
/// `[(a, 50.0), (b, 50.0)]` give the same result. Channels are rounded
/// half-up and clamped to 0..=255. A lone component returns its color
/// unchanged.
///
/// # Errors
///
/// [`RecipeError::Empty`] for an empty slice,
/// [`RecipeError::NonPositivePercentage`] when any weight is `<= 0` or NaN.
///
/// ```
/// use paint_match::{blend, Rgb8};
///
/// let red = Rgb8::new(255, 0, 0);
/// let white = Rgb8::new(255, 255, 255);
/// assert_eq!(blend(&[(red, 50.0), (white, 50.0)]).unwrap().to_hex(), "#FF8080");
/// assert_eq!(blend(&[(red, 100.0)]).unwrap(), red);
/// ```
pub fn blend(components: &[(Rgb8, f64)]) -> Result<Rgb8, RecipeError> {
    let (first, _) = components.first().ok_or(RecipeError::Empty)?;
    if let Some(&(_, bad)) = components.iter().find(|(_, p)| !(*p > 0.0)) {
        return Err(RecipeError::NonPositivePercentage(bad));
    }
    if components.len() == 1 {
        return Ok(*first);
    }

    let mut total = 0.0;
    let mut sum = [0.0f64; 3];
    for &(color, pct) in components {
        total += pct;
        for (acc, channel) in sum.iter_mut().zip(color.to_bytes()) {
            *acc += channel as f64 * pct;
        }
    }
    if !total.is_finite() {
        return Err(RecipeError::BadTotal(total));
    }

    Ok(Rgb8::from_f64_channels(
        sum[0] / total,
        sum[1] / total,
        sum[2] / total,
    ))
}

/// Check a recipe's percentage list: between 2 and `max_components`
/// entries, each `> 0`, summing to 100 within [`PERCENTAGE_TOLERANCE`].
pub fn validate_percentages(percentages: &[f64], max_components: usize) -> Result<(), RecipeError> {
    if percentages.len() < 2 {
        return Err(RecipeError::TooFewComponents(percentages.len()));
    }
    if percentages.len() > max_components {
        return Err(RecipeError::TooManyComponents {
            max: max_components,
            got: percentages.len(),
        });
    }
    if let Some(&bad) = percentages.iter().find(|p| !(**p > 0.0)) {
        return Err(RecipeError::NonPositivePercentage(bad));
    }
    let total: f64 = percentages.iter().sum();
    if (total - 100.0).abs() > PERCENTAGE_TOLERANCE {
        return Err(RecipeError::BadTotal(total));
    }
    Ok(())
}
