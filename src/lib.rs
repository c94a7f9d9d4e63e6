//! echo-vsc - Convert VS Code color themes into iTerm2 presets.
//!
//! Installed VS Code extensions are scanned for contributed color themes,
//! one theme is chosen, and its terminal colors are written out as an
//! `.itermcolors` property list. Colors the theme leaves out are filled in
//! from a built-in dark or light palette.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use echo_vsc::prelude::*;
//!
//! let report = ExtensionScanner::new().scan(std::path::Path::new("/home/me/.vscode/extensions"))?;
//! let theme = &report.themes[0];
//! let plist = convert_theme(theme, &Palette::builtin(), &mut FixedThemeType(Some(ThemeType::Dark)))?;
//! ```

#![deny(missing_docs)]

pub mod config;
pub mod core;
pub mod logging;
pub mod prelude;
pub mod ui;
