//! Common re-exports for convenient importing.
//!
//! # Example
//!
//! ```rust,ignore
//! use echo_vsc::prelude::*;
//! ```

pub use crate::core::{
    convert_theme, generate_theme, ConvertError, ConvertOptions, ExtensionScanner,
    FixedThemeType, Palette, ScanError, ScanReport, Theme, ThemeType, ThemeTypePrompt,
};
