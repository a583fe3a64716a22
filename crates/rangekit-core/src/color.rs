//! sRGB colors.
//!
//! A [`Color`] serializes as a `#rrggbbaa` string, so configuration files can
//! spell colors the way CSS does.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Straight-alpha RGBA, every channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Why a hex string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("invalid hex characters")]
    InvalidHex,
    #[error("invalid hex string length (expected 6 or 8)")]
    InvalidLength,
}

const fn opaque(r: f32, g: f32, b: f32) -> Color {
    Color { r, g, b, a: 1.0 }
}

impl Color {
    pub const BLACK: Self = opaque(0.0, 0.0, 0.0);
    pub const WHITE: Self = opaque(1.0, 1.0, 1.0);
    /// Used for every part of a disabled slider.
    pub const GRAY: Self = opaque(0.6, 0.6, 0.6);

    /// Channels outside `0.0..=1.0` are clamped.
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        let unit = |c: f32| c.clamp(0.0, 1.0);
        Self {
            r: unit(r),
            g: unit(g),
            b: unit(b),
            a: unit(a),
        }
    }

    #[must_use]
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Parse `rrggbb` or `rrggbbaa`, with or without a leading `#`.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex).as_bytes();
        if !digits.iter().all(u8::is_ascii_hexdigit) {
            return Err(ColorParseError::InvalidHex);
        }
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorParseError::InvalidLength);
        }

        let nibble = |d: u8| char::from(d).to_digit(16).unwrap_or(0) as u8;
        let mut channels = [1.0_f32; 4];
        for (slot, pair) in channels.iter_mut().zip(digits.chunks(2)) {
            *slot = f32::from((nibble(pair[0]) << 4) | nibble(pair[1])) / 255.0;
        }
        let [r, g, b, a] = channels;
        Ok(Self { r, g, b, a })
    }

    /// `#rrggbb`, alpha dropped.
    #[must_use]
    pub fn to_hex(&self) -> String {
        let [r, g, b, _] = self.bytes();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// `#rrggbbaa`
    #[must_use]
    pub fn to_hex_with_alpha(&self) -> String {
        let [r, g, b, a] = self.bytes();
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }

    fn bytes(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a].map(|c| (c * 255.0).round() as u8)
    }

    /// WCAG 2.1 relative luminance, ignoring alpha.
    #[must_use]
    pub fn relative_luminance(&self) -> f32 {
        fn linear(c: f32) -> f32 {
            if c <= 0.040_45 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    /// WCAG contrast ratio, from 1 (identical) to 21 (black on white).
    #[must_use]
    pub fn contrast_ratio(&self, other: &Self) -> f32 {
        let (a, b) = (self.relative_luminance(), other.relative_luminance());
        (a.max(b) + 0.05) / (a.min(b) + 0.05)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_with_alpha())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}
