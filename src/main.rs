//! echo-vsc - Turn an installed VS Code theme into an iTerm2 color preset.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use echo_vsc::config::Config;
use echo_vsc::core::{
    convert_theme, generate_theme, ConvertError, ConvertOptions, ExtensionScanner, FixedThemeType,
    FuzzyMatcher, Palette, Theme, ThemeType, ThemeTypePrompt,
};
use echo_vsc::logging;
use echo_vsc::ui::{pick, TerminalThemeTypePrompt};

/// Convert a VS Code color theme into an iTerm2 preset.
#[derive(Parser, Debug)]
#[command(name = "echo-vsc", version, about)]
struct Cli {
    /// VS Code extensions directory [default: ~/.vscode/extensions]
    #[arg(short = 'e', long = "extensions-dir", value_name = "DIR")]
    extensions_dir: Option<PathBuf>,

    /// Where to write the preset [default: Downloads]
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Convert this theme instead of opening the picker
    #[arg(short = 't', long = "theme", value_name = "LABEL")]
    theme: Option<String>,

    /// Theme type to use when the theme does not declare one
    #[arg(long = "type", value_name = "dark|light")]
    theme_type: Option<ThemeType>,

    /// List discovered themes and exit
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Print the preset to stdout instead of writing a file
    #[arg(long = "stdout", conflicts_with = "output_dir")]
    stdout: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: {}; using defaults", e);
        Config::default()
    });
    let palette =
        Palette::with_overrides(&config.fallback).context("Invalid fallback colors in config")?;

    let extensions_dir = cli
        .extensions_dir
        .or_else(|| config.extensions_dir())
        .context("Could not determine the VS Code extensions directory")?;

    let report = ExtensionScanner::new()
        .with_workers(config.workers())
        .with_idle_timeout(config.scan_idle_timeout())
        .scan(&extensions_dir)
        .context("Failed to get VS Code themes")?;

    if let Some(timeout) = &report.timeout {
        eprintln!("Warning: {}; showing partial results", timeout);
    }
    tracing::info!(
        themes = report.themes.len(),
        failures = report.failures.len(),
        "Scan finished"
    );

    let mut themes = report.themes;
    themes.sort_by(|a, b| {
        a.label
            .to_lowercase()
            .cmp(&b.label.to_lowercase())
            .then_with(|| a.path.cmp(&b.path))
    });

    if themes.is_empty() {
        println!("No themes found in {}", extensions_dir.display());
        return Ok(());
    }

    if cli.list {
        for theme in &themes {
            println!("{}\t{}\t{}", theme.label, theme.extension, theme.path.display());
        }
        return Ok(());
    }

    let Some(theme) = select_theme(cli.theme.as_deref(), themes)? else {
        println!("No theme selected, quitting echo-vsc!");
        return Ok(());
    };
    tracing::info!(theme = %theme.label, path = %theme.path.display(), "Selected theme");

    let mut prompt: Box<dyn ThemeTypePrompt> = match cli.theme_type {
        Some(theme_type) => Box::new(FixedThemeType(Some(theme_type))),
        None => Box::new(TerminalThemeTypePrompt),
    };

    if cli.stdout {
        match convert_theme(&theme, &palette, prompt.as_mut()) {
            Ok(plist) => print!("{plist}"),
            Err(ConvertError::ThemeTypeUndetermined { .. }) => {
                eprintln!("No theme type selected, quitting echo-vsc!");
            }
            Err(e) => return Err(e).context("Failed to convert theme"),
        }
        return Ok(());
    }

    let directory = cli
        .output_dir
        .or_else(|| config.output_dir())
        .context("Failed to get Downloads folder")?;
    let options = ConvertOptions {
        directory,
        file_extension: config.file_extension.clone(),
        write: true,
    };

    match generate_theme(&theme, &options, &palette, prompt.as_mut()) {
        Ok(path) => {
            println!("Theme generated @file://{}", path.display());
            Ok(())
        }
        Err(ConvertError::ThemeTypeUndetermined { .. }) => {
            println!("No theme type selected, quitting echo-vsc!");
            Ok(())
        }
        Err(e) => Err(e).context("Failed to generate iTerm theme"),
    }
}

/// Pick a theme by label, or interactively when no label is given.
fn select_theme(query: Option<&str>, mut themes: Vec<Theme>) -> Result<Option<Theme>> {
    match query {
        Some(query) => {
            let labels: Vec<&str> = themes.iter().map(|t| t.label.as_str()).collect();
            let index = FuzzyMatcher::new()
                .best_match(query, &labels)
                .with_context(|| format!("No theme matching {query:?}"))?;
            Ok(Some(themes.swap_remove(index)))
        }
        None => pick("VS Code Themes", themes).context("Theme picker failed"),
    }
}
