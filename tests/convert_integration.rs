//! Integration tests for theme conversion.

use std::fs;
use std::path::{Path, PathBuf};

use echo_vsc::core::{
    convert_theme, generate_theme, ConvertError, ConvertOptions, ExtensionScanner, FixedThemeType,
    Palette, Rgba, Theme, ThemeType,
};
use tempfile::TempDir;

fn theme_file(dir: &Path, name: &str, content: &str) -> Theme {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    Theme {
        label: "Test Theme".to_string(),
        path,
        extension: "test".to_string(),
    }
}

/// The `<dict>` body that follows `<key>{slot}</key>`.
fn entry<'a>(plist: &'a str, slot: &str) -> &'a str {
    let key = format!("<key>{slot}</key>");
    let start = plist.find(&key).unwrap() + key.len();
    let end = start + plist[start..].find("</dict>").unwrap();
    &plist[start..end]
}

fn component(entry: &str, name: &str) -> String {
    let key = format!("<key>{name} Component</key>");
    let start = entry.find(&key).unwrap() + key.len();
    let rest = &entry[start..];
    let open = rest.find("<real>").unwrap() + "<real>".len();
    let close = rest.find("</real>").unwrap();
    rest[open..close].to_string()
}

#[test]
fn convert_uses_theme_color_and_dark_fallbacks() {
    let dir = TempDir::new().unwrap();
    let theme = theme_file(
        dir.path(),
        "dracula.json",
        r##"{"colors":{"terminal.background":"#282a36"},"type":"dark"}"##,
    );

    let plist = convert_theme(&theme, &Palette::builtin(), &mut FixedThemeType(None)).unwrap();

    let background = entry(&plist, "Background Color");
    assert_eq!(component(background, "Red"), "0.156863");
    assert_eq!(component(background, "Green"), "0.164706");
    assert_eq!(component(background, "Blue"), "0.211765");
    assert_eq!(component(background, "Alpha"), "1.000000");
    assert!(background.contains("<string>sRGB</string>"));

    // Ansi 1 falls back to the dark default #ff5555.
    let red = entry(&plist, "Ansi 1 Color");
    assert_eq!(component(red, "Red"), "1.000000");
    assert_eq!(component(red, "Green"), "0.333333");
    assert_eq!(component(red, "Blue"), "0.333333");

    // Every slot that cannot read terminal.background uses the dark table.
    let palette = Palette::builtin();
    let mut fallbacks = 0;
    for palette_entry in palette.entries() {
        let expected_hex = if palette_entry
            .slot
            .candidate_keys
            .contains(&"terminal.background")
        {
            "#282a36"
        } else {
            fallbacks += 1;
            palette_entry.dark.as_str()
        };
        let expected = Rgba::from_hex(expected_hex).unwrap();
        let actual = entry(&plist, palette_entry.slot.name);
        assert_eq!(component(actual, "Red"), format!("{:.6}", expected.red), "{}", palette_entry.slot.name);
        assert_eq!(component(actual, "Green"), format!("{:.6}", expected.green), "{}", palette_entry.slot.name);
        assert_eq!(component(actual, "Blue"), format!("{:.6}", expected.blue), "{}", palette_entry.slot.name);
        assert_eq!(component(actual, "Alpha"), "1.000000");
    }
    // Background and Selected Text are the two slots fed by terminal.background.
    assert_eq!(fallbacks, 22);

    assert_eq!(plist.matches("<key>Color Space</key>").count(), 24);
}

#[test]
fn convert_handles_commented_theme_files() {
    let dir = TempDir::new().unwrap();
    let theme = theme_file(
        dir.path(),
        "commented.json",
        r##"{
            // Generated by a theme builder
            "name": "Commented",
            "type": "light",
            "colors": {
                /* terminal */
                "terminal.foreground": "#000", // short form
                "editor.background": "#ffffff",
            },
        }"##,
    );

    let plist = convert_theme(&theme, &Palette::builtin(), &mut FixedThemeType(None)).unwrap();

    let foreground = entry(&plist, "Foreground Color");
    assert_eq!(component(foreground, "Red"), "0.000000");
    let background = entry(&plist, "Background Color");
    assert_eq!(component(background, "Blue"), "1.000000");
}

#[test]
fn convert_without_type_uses_prompt() {
    let dir = TempDir::new().unwrap();
    let theme = theme_file(dir.path(), "untyped.json", r#"{"colors":{}}"#);

    let light = convert_theme(
        &theme,
        &Palette::builtin(),
        &mut FixedThemeType(Some(ThemeType::Light)),
    )
    .unwrap();
    assert_eq!(
        component(entry(&light, "Background Color"), "Red"),
        "0.980392"
    );

    let err = convert_theme(&theme, &Palette::builtin(), &mut FixedThemeType(None)).unwrap_err();
    assert!(matches!(err, ConvertError::ThemeTypeUndetermined { .. }));
}

#[test]
fn convert_rejects_theme_without_colors() {
    let dir = TempDir::new().unwrap();
    let theme = theme_file(dir.path(), "empty.json", r#"{"tokenColors":[]}"#);
    let err = convert_theme(
        &theme,
        &Palette::builtin(),
        &mut FixedThemeType(Some(ThemeType::Dark)),
    )
    .unwrap_err();
    assert!(matches!(err, ConvertError::ThemeFormat { .. }));
}

#[test]
fn convert_reports_missing_theme_file() {
    let dir = TempDir::new().unwrap();
    let theme = Theme {
        label: "Gone".to_string(),
        path: dir.path().join("gone.json"),
        extension: "test".to_string(),
    };
    let err = convert_theme(&theme, &Palette::builtin(), &mut FixedThemeType(None)).unwrap_err();
    assert!(matches!(err, ConvertError::Read { .. }));
    assert!(err.to_string().contains("gone.json"));
}

#[test]
fn generate_writes_timestamped_file() {
    let dir = TempDir::new().unwrap();
    let theme = theme_file(dir.path(), "theme.json", r#"{"type":"dark","colors":{}}"#);
    let out = TempDir::new().unwrap();

    let path = generate_theme(
        &theme,
        &ConvertOptions::new(out.path()),
        &Palette::builtin(),
        &mut FixedThemeType(None),
    )
    .unwrap();

    assert_eq!(path.parent(), Some(out.path()));
    let name = path.file_name().unwrap().to_str().unwrap();
    let stamp = name
        .strip_prefix("Test Theme-")
        .and_then(|rest| rest.strip_suffix(".itermcolors"))
        .unwrap();
    assert!(stamp.parse::<i64>().unwrap() > 1_600_000_000);

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("<?xml"));
    assert!(written.ends_with("</plist>\n"));
}

#[test]
fn generate_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let theme = theme_file(dir.path(), "theme.json", r#"{"type":"dark","colors":{}}"#);
    let out = TempDir::new().unwrap();
    let mut options = ConvertOptions::new(out.path());
    options.write = false;
    options.file_extension = "xml".to_string();

    let path = generate_theme(&theme, &options, &Palette::builtin(), &mut FixedThemeType(None))
        .unwrap();

    assert!(path.to_string_lossy().ends_with(".xml"));
    assert!(!path.exists());
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn generate_into_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let theme = theme_file(dir.path(), "theme.json", r#"{"type":"dark","colors":{}}"#);
    let missing: PathBuf = dir.path().join("no").join("such").join("dir");

    let err = generate_theme(
        &theme,
        &ConvertOptions::new(&missing),
        &Palette::builtin(),
        &mut FixedThemeType(None),
    )
    .unwrap_err();

    assert!(matches!(err, ConvertError::Write { .. }));
}

#[test]
fn scan_then_convert_end_to_end() {
    let root = TempDir::new().unwrap();
    let ext = root.path().join("nord");
    fs::create_dir_all(ext.join("themes")).unwrap();
    fs::write(
        ext.join("package.json"),
        r#"{"displayName":"Nord","contributes":{"themes":[{"label":"Nord","path":"./themes/nord.json"}]}}"#,
    )
    .unwrap();
    fs::write(
        ext.join("themes").join("nord.json"),
        r##"{"type":"dark","colors":{"terminal.ansiBlue":"#81a1c1",}}"##,
    )
    .unwrap();

    let report = ExtensionScanner::new().scan(root.path()).unwrap();
    assert_eq!(report.themes.len(), 1);

    let plist = convert_theme(
        &report.themes[0],
        &Palette::builtin(),
        &mut FixedThemeType(None),
    )
    .unwrap();
    let blue = entry(&plist, "Ansi 4 Color");
    assert_eq!(component(blue, "Red"), "0.505882");
    assert_eq!(component(blue, "Green"), "0.631373");
    assert_eq!(component(blue, "Blue"), "0.756863");
}
