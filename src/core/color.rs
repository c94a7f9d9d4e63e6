//! Hex color decoding into normalized RGBA components.

use thiserror::Error;

/// Error for color strings that are not 3 or 6 hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color format: {0:?} (expected #rgb or #rrggbb)")]
pub struct ColorError(pub String);

/// A color with each channel normalized to `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red channel.
    pub red: f64,
    /// Green channel.
    pub green: f64,
    /// Blue channel.
    pub blue: f64,
    /// Alpha channel. Always `1.0` for decoded hex colors.
    pub alpha: f64,
}

impl Rgba {
    /// Decode `#rgb`, `#rrggbb`, `rgb` or `rrggbb`.
    ///
    /// Eight-digit colors carry alpha, which iTerm presets ignore, so they
    /// are rejected rather than silently truncated.
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError(input.to_string()));
        }

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(ColorError(input.to_string())),
        };

        let value =
            u32::from_str_radix(&expanded, 16).map_err(|_| ColorError(input.to_string()))?;

        Ok(Self {
            red: f64::from((value >> 16) & 0xff) / 255.0,
            green: f64::from((value >> 8) & 0xff) / 255.0,
            blue: f64::from(value & 0xff) / 255.0,
            alpha: 1.0,
        })
    }
}
