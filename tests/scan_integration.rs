//! Integration tests for extension discovery.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use echo_vsc::core::{ExtensionError, ExtensionScanner, ScanError, ScanReport};
use echo_vsc::logging::build_subscriber;
use tempfile::{NamedTempFile, TempDir};

fn write_extension(root: &Path, name: &str, manifest: &str) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("package.json"), manifest).unwrap();
}

/// Run a scan with a warn-level subscriber, returning the report and the log text.
fn scan_with_logs(root: &Path) -> (ScanReport, String) {
    let log_file = NamedTempFile::new().unwrap();
    let subscriber = build_subscriber(0, None, Arc::new(log_file.reopen().unwrap()));
    let report = tracing::subscriber::with_default(subscriber, || {
        ExtensionScanner::new().scan(root).unwrap()
    });
    (report, fs::read_to_string(log_file.path()).unwrap())
}

#[test]
fn scan_skips_broken_extensions() {
    let root = TempDir::new().unwrap();
    write_extension(
        root.path(),
        "extA",
        r#"{"contributes":{"themes":[
            {"label":"X","path":"./x.json"},
            {"label":"Y","path":"./y.json"}
        ]}}"#,
    );
    fs::create_dir(root.path().join("extB")).unwrap();
    write_extension(root.path(), "extC", "not json");

    let (report, logs) = scan_with_logs(root.path());

    assert_eq!(report.themes.len(), 2);
    let mut labels: Vec<&str> = report.themes.iter().map(|t| t.label.as_str()).collect();
    labels.sort_unstable();
    assert_eq!(labels, vec!["X", "Y"]);
    assert!(report
        .themes
        .iter()
        .any(|t| t.path == root.path().join("extA").join("x.json")));
    assert!(report.themes.iter().all(|t| t.extension == "extA"));

    let warnings: Vec<&str> = logs.lines().filter(|l| l.contains("WARN")).collect();
    assert_eq!(warnings.len(), 2, "unexpected warnings: {logs}");
    assert!(warnings.iter().any(|l| l.contains("extension=extB")));
    assert!(warnings.iter().any(|l| l.contains("extension=extC")));

    let mut failed: Vec<&str> = report
        .failures
        .iter()
        .map(|f| f.extension.as_str())
        .collect();
    failed.sort_unstable();
    assert_eq!(failed, vec!["extB", "extC"]);
    assert!(report.failures.iter().any(|f| matches!(
        f.error,
        ExtensionError::ParseManifest { .. }
    )));
    assert!(report.failures.iter().any(|f| matches!(
        f.error,
        ExtensionError::ReadManifest { .. }
    )));
    assert!(report.timeout.is_none());
}

#[test]
fn scan_collects_every_contributed_theme() {
    let root = TempDir::new().unwrap();
    write_extension(
        root.path(),
        "dracula-theme.theme-dracula-2.25.1",
        r#"{
            "displayName": "Dracula Official",
            "contributes": {
                "themes": [
                    { "label": "Dracula", "uiTheme": "vs-dark", "path": "./theme/dracula.json" },
                    { "label": "Dracula Soft", "uiTheme": "vs-dark", "path": "./theme/dracula-soft.json" }
                ]
            }
        }"#,
    );
    write_extension(
        root.path(),
        "ms-python.python",
        r#"{ "name": "python", "contributes": { "commands": [] } }"#,
    );

    let report = ExtensionScanner::new()
        .with_workers(3)
        .with_idle_timeout(Duration::from_secs(5))
        .scan(root.path())
        .unwrap();

    let mut labels: Vec<&str> = report.themes.iter().map(|t| t.label.as_str()).collect();
    labels.sort_unstable();
    assert_eq!(labels, vec!["Dracula", "Dracula Soft"]);
    assert!(report
        .themes
        .iter()
        .all(|t| t.extension == "Dracula Official"));
    assert!(report.failures.is_empty());
}

#[test]
fn scan_of_missing_directory_fails() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("extensions");
    let err = ExtensionScanner::new().scan(&missing).unwrap_err();
    assert!(matches!(err, ScanError::ReadRoot { .. }));
    assert!(err.to_string().contains("extensions"));
}

#[test]
fn scan_of_directory_without_extensions_fails() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("extensions.json"), "[]").unwrap();
    let err = ExtensionScanner::new().scan(root.path()).unwrap_err();
    assert!(matches!(err, ScanError::NoExtensions { .. }));
}
