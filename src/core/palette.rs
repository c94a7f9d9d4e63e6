//! iTerm color slots and the fallback palettes used when a theme omits one.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use super::color::{ColorError, Rgba};

/// Whether a theme is meant for a dark or a light background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeType {
    /// Light text on a dark background.
    Dark,
    /// Dark text on a light background.
    Light,
}

impl ThemeType {
    /// Interpret the `type` field of a VS Code theme file.
    ///
    /// Accepts the plain values plus the high-contrast and `uiTheme` spellings
    /// that show up in the wild. Returns `None` for anything else.
    pub fn from_declared(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" | "hc" | "hcdark" | "hc-black" | "vs-dark" => Some(Self::Dark),
            "light" | "hclight" | "hc-light" | "vs" => Some(Self::Light),
            _ => None,
        }
    }

    /// Lowercase name, as used in theme files and config.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl fmt::Display for ThemeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a theme type name.
#[derive(Debug, Clone, Error)]
#[error("unknown theme type {0:?} (expected \"dark\" or \"light\")")]
pub struct InvalidThemeType(pub String);

impl FromStr for ThemeType {
    type Err = InvalidThemeType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(InvalidThemeType(s.to_string())),
        }
    }
}

/// One iTerm color entry and the VS Code keys that can fill it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSlot {
    /// Key written into the `.itermcolors` file, e.g. `"Ansi 0 Color"`.
    pub name: &'static str,
    /// VS Code `colors` keys, highest priority first. May be empty.
    pub candidate_keys: &'static [&'static str],
}

const fn slot(name: &'static str, candidate_keys: &'static [&'static str]) -> ColorSlot {
    ColorSlot {
        name,
        candidate_keys,
    }
}

/// Every slot written to a preset, in output order.
pub const COLOR_SLOTS: [ColorSlot; 24] = [
    slot("Ansi 0 Color", &["terminal.ansiBlack"]),
    slot("Ansi 1 Color", &["terminal.ansiRed"]),
    slot("Ansi 2 Color", &["terminal.ansiGreen"]),
    slot("Ansi 3 Color", &["terminal.ansiYellow"]),
    slot("Ansi 4 Color", &["terminal.ansiBlue"]),
    slot("Ansi 5 Color", &["terminal.ansiMagenta"]),
    slot("Ansi 6 Color", &["terminal.ansiCyan"]),
    slot("Ansi 7 Color", &["terminal.ansiWhite"]),
    slot("Ansi 8 Color", &["terminal.ansiBrightBlack"]),
    slot("Ansi 9 Color", &["terminal.ansiBrightRed"]),
    slot("Ansi 10 Color", &["terminal.ansiBrightGreen"]),
    slot("Ansi 11 Color", &["terminal.ansiBrightYellow"]),
    slot("Ansi 12 Color", &["terminal.ansiBrightBlue"]),
    slot("Ansi 13 Color", &["terminal.ansiBrightMagenta"]),
    slot("Ansi 14 Color", &["terminal.ansiBrightCyan"]),
    slot("Ansi 15 Color", &["terminal.ansiBrightWhite"]),
    slot(
        "Background Color",
        &["terminal.background", "editor.background"],
    ),
    slot(
        "Foreground Color",
        &["terminal.foreground", "editor.foreground"],
    ),
    slot(
        "Cursor Color",
        &["terminalCursor.foreground", "editorCursor.foreground"],
    ),
    slot(
        "Cursor Text Color",
        &["terminalCursor.foreground", "editorCursor.foreground"],
    ),
    slot(
        "Selection Color",
        &[
            "terminal.selectionBackground",
            "terminal.foreground",
            "editor.foreground",
        ],
    ),
    slot(
        "Selected Text Color",
        &["terminal.background", "editor.background"],
    ),
    slot("Link Color", &["textLink.foreground"]),
    slot("Bold Color", &[]),
];

// Dracula-derived defaults, one per slot in `COLOR_SLOTS` order.
const DARK_DEFAULTS: [&str; 24] = [
    "#21222c", "#ff5555", "#50fa7b", "#f1fa8c", "#bd93f9", "#ff79c6", "#8be9fd", "#f8f8f2",
    "#6272a4", "#ff6e6e", "#69ff94", "#ffffa5", "#d6acff", "#ff92df", "#a4ffff", "#ffffff",
    "#282a36", "#f8f8f2", "#f8f8f2", "#282a36", "#44475a", "#ffffff", "#8be9fd", "#ffffff",
];

const LIGHT_DEFAULTS: [&str; 24] = [
    "#21222c", "#e64747", "#50fa7b", "#e7c547", "#7aa2f7", "#ad8ee6", "#449dab", "#787c99",
    "#444b6a", "#ff7a85", "#b9f27c", "#ff9e64", "#7da6ff", "#bb9af7", "#0db9d7", "#acb0d0",
    "#fafafa", "#444b6a", "#444b6a", "#fafafa", "#b4d8fd", "#fafafa", "#005fb8", "#444b6a",
];

/// Errors from building a palette.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum PaletteError {
    /// An override named a slot that does not exist.
    #[error("unknown color slot {0:?} in fallback overrides")]
    UnknownSlot(String),
    /// An override value is not a hex color.
    #[error("fallback override for {slot:?}: {source}")]
    InvalidColor {
        /// Slot name as written in the overrides.
        slot: String,
        /// Underlying error.
        #[source]
        source: ColorError,
    },
}

/// User-supplied fallback colors, keyed by theme type and slot name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FallbackOverrides {
    /// Overrides for dark themes.
    #[serde(default)]
    pub dark: BTreeMap<String, String>,
    /// Overrides for light themes.
    #[serde(default)]
    pub light: BTreeMap<String, String>,
}

impl FallbackOverrides {
    /// True when no override is set.
    pub fn is_empty(&self) -> bool {
        self.dark.is_empty() && self.light.is_empty()
    }
}

/// A slot with its dark and light fallback colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Slot definition.
    pub slot: ColorSlot,
    /// Fallback hex color for dark themes.
    pub dark: String,
    /// Fallback hex color for light themes.
    pub light: String,
}

impl PaletteEntry {
    /// Fallback hex color for the given theme type.
    pub fn fallback(&self, theme_type: ThemeType) -> &str {
        match theme_type {
            ThemeType::Dark => &self.dark,
            ThemeType::Light => &self.light,
        }
    }
}

/// Slot table plus fallback colors.
///
/// Built once at startup and passed by reference to the resolver. Every slot
/// always has a fallback for both theme types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Palette {
    /// The built-in slot table and fallbacks.
    pub fn builtin() -> Self {
        let entries = COLOR_SLOTS
            .iter()
            .zip(DARK_DEFAULTS.iter().zip(LIGHT_DEFAULTS.iter()))
            .map(|(slot, (dark, light))| PaletteEntry {
                slot: *slot,
                dark: (*dark).to_string(),
                light: (*light).to_string(),
            })
            .collect();
        Self { entries }
    }

    /// Built-in palette with user overrides merged in.
    pub fn with_overrides(overrides: &FallbackOverrides) -> Result<Self, PaletteError> {
        let mut palette = Self::builtin();
        for (theme_type, table) in [
            (ThemeType::Dark, &overrides.dark),
            (ThemeType::Light, &overrides.light),
        ] {
            for (name, hex) in table {
                let entry = palette
                    .entries
                    .iter_mut()
                    .find(|e| e.slot.name.eq_ignore_ascii_case(name))
                    .ok_or_else(|| PaletteError::UnknownSlot(name.clone()))?;
                Rgba::from_hex(hex).map_err(|source| PaletteError::InvalidColor {
                    slot: name.clone(),
                    source,
                })?;
                match theme_type {
                    ThemeType::Dark => entry.dark = hex.clone(),
                    ThemeType::Light => entry.light = hex.clone(),
                }
            }
        }
        Ok(palette)
    }

    /// Entries in output order.
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Look up an entry by slot name.
    pub fn get(&self, name: &str) -> Option<&PaletteEntry> {
        self.entries.iter().find(|e| e.slot.name == name)
    }
}
