//! 8-bit sRGB color type
//!
//! sRGB is the encoding used by paint catalogs, hex strings and screens.
//! Channels are gamma-encoded bytes; no arithmetic other than weighted
//! averaging (see [`crate::mix`]) is performed on them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ColorFormatError;

/// A color in 8-bit sRGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb8 {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb8 {
    /// Create a color from channel bytes.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xRRGGBB` integer. Bits above 24 are ignored.
    ///
    /// ```
    /// use paint_match::Rgb8;
    /// assert_eq!(Rgb8::from_packed(0xFF8000), Rgb8::new(255, 128, 0));
    /// ```
    #[inline]
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: (packed & 0xFF) as u8,
        }
    }

    /// Pack into a `0xRRGGBB` integer.
    #[inline]
    pub const fn to_packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Channels as a `[r, g, b]` array.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Format as an uppercase `#RRGGBB` string.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Build a color from floating point channels in 0..=255.
    ///
    /// Values are clamped to the byte range and rounded half-up.
    #[inline]
    pub fn from_f64_channels(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: channel_to_u8(r),
            g: channel_to_u8(g),
            b: channel_to_u8(b),
        }
    }
}

/// Clamp to 0..=255 and round half-up. NaN maps to 0.
#[inline]
pub(crate) fn channel_to_u8(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 255.0) + 0.5).floor().min(255.0) as u8
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb8 {
    type Err = ColorFormatError;

    /// Parse a strict `#RRGGBB` string (case-insensitive digits).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != 7 {
            return Err(ColorFormatError::InvalidLength(len));
        }
        let digits = s.strip_prefix('#').ok_or(ColorFormatError::MissingHash)?;
        // from_str_radix tolerates a leading '+', so check digits explicitly
        if !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorFormatError::InvalidDigit(s.to_string()));
        }
        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ColorFormatError::InvalidDigit(s.to_string()))
        };
        Ok(Self::new(parse(0..2)?, parse(2..4)?, parse(4..6)?))
    }
}

/// Parse a `#RRGGBB` string.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb8, ColorFormatError> {
    hex.parse()
}

/// Format a color as `#RRGGBB`.
pub fn rgb_to_hex(rgb: Rgb8) -> String {
    rgb.to_hex()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_hex() {
        assert_eq!(hex_to_rgb("#FF0000").unwrap(), Rgb8::new(255, 0, 0));
        assert_eq!(hex_to_rgb("#00ff7f").unwrap(), Rgb8::new(0, 255, 127));
        assert_eq!(hex_to_rgb("#AbCdEf").unwrap(), Rgb8::new(0xAB, 0xCD, 0xEF));
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!(hex_to_rgb("#FFF"), Err(ColorFormatError::InvalidLength(4)));
        assert_eq!(hex_to_rgb(""), Err(ColorFormatError::InvalidLength(0)));
        assert_eq!(
            hex_to_rgb("#FF00001"),
            Err(ColorFormatError::InvalidLength(8))
        );
        // No trimming: surrounding whitespace changes the length
        assert!(hex_to_rgb(" #FF0000").is_err());
    }

    #[test]
    fn test_parse_rejects_missing_hash() {
        assert_eq!(hex_to_rgb("FF00001"), Err(ColorFormatError::MissingHash));
    }

    #[test]
    fn test_parse_rejects_bad_digits() {
        assert!(matches!(
            hex_to_rgb("#GG0000"),
            Err(ColorFormatError::InvalidDigit(_))
        ));
        assert!(matches!(
            hex_to_rgb("#+F0000"),
            Err(ColorFormatError::InvalidDigit(_))
        ));
    }

    #[test]
    fn test_parse_rejects_multibyte() {
        // 7 bytes, 4 characters
        assert_eq!(hex_to_rgb("#ÿÿÿ"), Err(ColorFormatError::InvalidLength(4)));
        // 7 characters, 13 bytes
        assert_eq!(
            hex_to_rgb("#ÿÿÿÿÿÿ"),
            Err(ColorFormatError::InvalidDigit("#ÿÿÿÿÿÿ".to_string()))
        );
        let message = hex_to_rgb("#ÿÿÿÿÿÿÿÿ").unwrap_err().to_string();
        assert!(message.ends_with("got 9"), "{message}");
    }

    #[test]
    fn test_hex_formatting_is_uppercase() {
        assert_eq!(rgb_to_hex(Rgb8::new(255, 128, 0)), "#FF8000");
        assert_eq!(Rgb8::new(1, 2, 3).to_string(), "#010203");
    }

    #[test]
    fn test_packed_conversion() {
        let c = Rgb8::new(0x12, 0x34, 0x56);
        assert_eq!(c.to_packed(), 0x123456);
        assert_eq!(Rgb8::from_packed(0xFF123456), c);
    }

    #[test]
    fn test_channel_rounding_half_up_and_clamp() {
        assert_eq!(channel_to_u8(127.5), 128);
        assert_eq!(channel_to_u8(127.49), 127);
        assert_eq!(channel_to_u8(-3.0), 0);
        assert_eq!(channel_to_u8(300.0), 255);
        assert_eq!(channel_to_u8(f64::NAN), 0);
    }
}
