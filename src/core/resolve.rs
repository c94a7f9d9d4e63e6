//! Mapping VS Code `colors` entries onto iTerm color slots.

use std::io;

use serde_json::{Map, Value};

use super::color::{ColorError, Rgba};
use super::convert::ConvertError;
use super::palette::{Palette, PaletteEntry, ThemeType};

/// Asks the user whether a theme is dark or light.
///
/// Consulted only when the theme file does not declare a usable `type`.
pub trait ThemeTypePrompt {
    /// Return the chosen type, or `None` if the user backed out.
    fn choose_theme_type(&mut self, theme_label: &str) -> io::Result<Option<ThemeType>>;
}

/// Non-interactive prompt that always gives the same answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedThemeType(pub Option<ThemeType>);

impl ThemeTypePrompt for FixedThemeType {
    fn choose_theme_type(&mut self, _theme_label: &str) -> io::Result<Option<ThemeType>> {
        Ok(self.0)
    }
}

/// Decide the theme type: the declared `type` if recognised, else ask.
pub fn determine_theme_type(
    declared: Option<&str>,
    theme_label: &str,
    prompt: &mut dyn ThemeTypePrompt,
) -> Result<ThemeType, ConvertError> {
    if let Some(declared) = declared.filter(|d| !d.trim().is_empty()) {
        if let Some(theme_type) = ThemeType::from_declared(declared) {
            return Ok(theme_type);
        }
        tracing::warn!(
            theme = theme_label,
            declared,
            "Unrecognised theme type, asking instead"
        );
    }

    prompt
        .choose_theme_type(theme_label)
        .map_err(ConvertError::Prompt)?
        .ok_or_else(|| ConvertError::ThemeTypeUndetermined {
            theme: theme_label.to_string(),
        })
}

/// Where a slot's color came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorSource {
    /// Taken from the theme under this key.
    Theme(&'static str),
    /// Taken from the fallback palette.
    Fallback,
}

/// A slot with its chosen hex value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotValue {
    /// Slot name, e.g. `"Background Color"`.
    pub slot: &'static str,
    /// Hex color as found in the theme or palette.
    pub hex: String,
    /// Origin of `hex`.
    pub source: ColorSource,
}

/// A slot with its decoded color.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColor {
    /// Slot name.
    pub slot: &'static str,
    /// Normalized color.
    pub rgba: Rgba,
    /// Origin of the color.
    pub source: ColorSource,
}

/// Resolves every slot of a [`Palette`] against a theme's colors.
#[derive(Debug, Clone, Copy)]
pub struct ThemeResolver<'a> {
    palette: &'a Palette,
}

impl<'a> ThemeResolver<'a> {
    /// Create a resolver over `palette`.
    pub fn new(palette: &'a Palette) -> Self {
        Self { palette }
    }

    /// Pick a hex value for every slot, in palette order. Never fails.
    pub fn resolve_slots(&self, colors: &Map<String, Value>, theme_type: ThemeType) -> Vec<SlotValue> {
        self.palette
            .entries()
            .iter()
            .map(|entry| resolve_slot(entry, colors, theme_type))
            .collect()
    }

    /// Resolve and decode every slot.
    ///
    /// A missing key falls back quietly; a present but malformed value is an
    /// error.
    pub fn resolve(
        &self,
        colors: &Map<String, Value>,
        theme_type: ThemeType,
    ) -> Result<Vec<ResolvedColor>, ColorError> {
        self.resolve_slots(colors, theme_type)
            .into_iter()
            .map(|value| {
                Ok(ResolvedColor {
                    slot: value.slot,
                    rgba: Rgba::from_hex(&value.hex)?,
                    source: value.source,
                })
            })
            .collect()
    }
}

fn resolve_slot(entry: &PaletteEntry, colors: &Map<String, Value>, theme_type: ThemeType) -> SlotValue {
    let found = entry
        .slot
        .candidate_keys
        .iter()
        .find_map(|key| colors.get(*key).and_then(Value::as_str).map(|v| (*key, v)));

    if let Some((key, hex)) = found {
        return SlotValue {
            slot: entry.slot.name,
            hex: hex.to_string(),
            source: ColorSource::Theme(key),
        };
    }

    let fallback = entry.fallback(theme_type);
    tracing::info!(
        "Color '{}' is missing for this {} theme, using default fallback color",
        entry.slot.name,
        theme_type
    );
    tracing::debug!(
        slot = entry.slot.name,
        theme_type = theme_type.as_str(),
        fallback,
        "Using fallback color"
    );

    SlotValue {
        slot: entry.slot.name,
        hex: fallback.to_string(),
        source: ColorSource::Fallback,
    }
}
