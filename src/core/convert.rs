//! Theme file to iTerm preset conversion.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::color::ColorError;
use super::palette::Palette;
use super::plist::render_plist;
use super::resolve::{determine_theme_type, ThemeResolver, ThemeTypePrompt};
use super::sanitize::sanitize_json;
use super::scan::Theme;

/// Default extension of written presets.
pub const DEFAULT_FILE_EXTENSION: &str = "itermcolors";

/// Errors from converting a single theme.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// The theme file could not be read.
    #[error("error reading theme file {}: {source}", .path.display())]
    Read {
        /// Theme file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The theme file is not JSON, even after removing comments.
    #[error("error parsing theme JSON {}: {source}", .path.display())]
    Parse {
        /// Theme file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// The theme has no `colors` object.
    #[error("invalid theme format in {}: colors not found or not a map", .path.display())]
    ThemeFormat {
        /// Theme file path.
        path: PathBuf,
    },
    /// No declared type and the user did not pick one.
    #[error("theme type selection cancelled for {theme:?}")]
    ThemeTypeUndetermined {
        /// Theme label.
        theme: String,
    },
    /// The theme type prompt itself failed.
    #[error("theme type prompt failed: {0}")]
    Prompt(#[source] io::Error),
    /// A color value in the theme is not a usable hex color.
    #[error(transparent)]
    Color(#[from] ColorError),
    /// Writing the preset failed.
    #[error("error writing {}: {source}", .path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

/// The parts of a VS Code theme file that matter for conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeDocument {
    /// The `colors` object.
    pub colors: Map<String, Value>,
    /// The raw `type` field, if it was a string.
    pub declared_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawThemeDocument {
    #[serde(default)]
    colors: Option<Value>,
    #[serde(rename = "type", default)]
    kind: Option<Value>,
}

impl ThemeDocument {
    /// Parse theme JSON that may contain comments and trailing commas.
    ///
    /// `path` is only used for error messages.
    pub fn parse(bytes: &[u8], path: &Path) -> Result<Self, ConvertError> {
        let clean = sanitize_json(bytes);
        let raw: RawThemeDocument =
            serde_json::from_slice(&clean).map_err(|source| ConvertError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let colors = match raw.colors {
            Some(Value::Object(colors)) => colors,
            _ => {
                return Err(ConvertError::ThemeFormat {
                    path: path.to_path_buf(),
                })
            }
        };
        let declared_type = match raw.kind {
            Some(Value::String(kind)) => Some(kind),
            _ => None,
        };

        Ok(Self {
            colors,
            declared_type,
        })
    }

    /// Read and parse a theme file.
    pub fn load(path: &Path) -> Result<Self, ConvertError> {
        let bytes = fs::read(path).map_err(|source| ConvertError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&bytes, path)
    }
}

/// Convert a theme file into `.itermcolors` XML.
pub fn convert_theme(
    theme: &Theme,
    palette: &Palette,
    prompt: &mut dyn ThemeTypePrompt,
) -> Result<String, ConvertError> {
    let document = ThemeDocument::load(&theme.path).map_err(|e| {
        tracing::error!(path = %theme.path.display(), error = %e, "Failed to read theme file");
        e
    })?;
    convert_document(&document, &theme.label, palette, prompt)
}

/// Convert an already parsed theme document.
pub fn convert_document(
    document: &ThemeDocument,
    label: &str,
    palette: &Palette,
    prompt: &mut dyn ThemeTypePrompt,
) -> Result<String, ConvertError> {
    let theme_type = determine_theme_type(document.declared_type.as_deref(), label, prompt)?;
    let colors = ThemeResolver::new(palette).resolve(&document.colors, theme_type)?;
    Ok(render_plist(&colors))
}

/// Where and how to write a converted preset.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Destination directory.
    pub directory: PathBuf,
    /// File extension, without the dot.
    pub file_extension: String,
    /// When false, nothing is written and only the target path is returned.
    pub write: bool,
}

impl ConvertOptions {
    /// Write `.itermcolors` files into `directory`.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            write: true,
        }
    }
}

/// File name for a preset: `<label>-<unix seconds>.<ext>`.
///
/// Path separators in the label are replaced so the file always lands
/// directly in the destination directory.
pub fn output_file_name(label: &str, timestamp: i64, file_extension: &str) -> String {
    let safe: String = label
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '-',
            c => c,
        })
        .collect();
    format!("{safe}-{timestamp}.{file_extension}")
}

/// Convert `theme` and write it into the destination directory.
///
/// Returns the path of the written (or, for a dry run, would-be) file.
pub fn generate_theme(
    theme: &Theme,
    options: &ConvertOptions,
    palette: &Palette,
    prompt: &mut dyn ThemeTypePrompt,
) -> Result<PathBuf, ConvertError> {
    let file_name = output_file_name(
        &theme.label,
        chrono::Utc::now().timestamp(),
        &options.file_extension,
    );
    let file_path = options.directory.join(file_name);

    let contents = convert_theme(theme, palette, prompt)?;

    if options.write {
        fs::write(&file_path, contents).map_err(|source| ConvertError::Write {
            path: file_path.clone(),
            source,
        })?;
        tracing::info!(path = %file_path.display(), "Wrote iTerm color preset");
    }

    Ok(file_path)
}
