//! Discovery of color themes contributed by installed VS Code extensions.
//!
//! Each extension directory is handled by a small fixed pool of worker
//! threads. Workers claim jobs from a shared arena through an atomic cursor
//! and report back over a channel; the calling thread is the only consumer.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Default number of scan workers.
pub const DEFAULT_WORKERS: usize = 5;

/// Default time to wait for the next worker result before giving up.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Name of the manifest file inside an extension directory.
pub const MANIFEST_FILE: &str = "package.json";

/// A theme file contributed by an extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Theme {
    /// Label from the manifest, e.g. `"Dracula Soft"`.
    pub label: String,
    /// Absolute path of the theme JSON file.
    pub path: PathBuf,
    /// Extension display name, or its directory name.
    pub extension: String,
}

/// Errors that abort a scan.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScanError {
    /// The extensions directory could not be listed.
    #[error("cannot read extensions directory {}: {source}", .path.display())]
    ReadRoot {
        /// Directory that was scanned.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The extensions directory has no subdirectories.
    #[error("no extensions found in {}", .path.display())]
    NoExtensions {
        /// Directory that was scanned.
        path: PathBuf,
    },
}

/// Errors loading a single extension. These never abort a scan.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtensionError {
    /// `package.json` is missing or unreadable.
    #[error("error reading {}: {source}", .path.display())]
    ReadManifest {
        /// Manifest path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// `package.json` is not valid JSON of the expected shape.
    #[error("error parsing {}: {source}", .path.display())]
    ParseManifest {
        /// Manifest path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// The worker handling the extension exited before reporting.
    #[error("extension was not scanned: worker exited without reporting")]
    Unreported,
}

/// An extension that was skipped, and why.
#[derive(Debug)]
pub struct ExtensionFailure {
    /// Extension directory name.
    pub extension: String,
    /// What went wrong.
    pub error: ExtensionError,
}

/// No worker reported within the idle window.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("extension scan timed out after {idle:?} without progress ({pending} extensions pending)")]
pub struct ScanTimeout {
    /// Idle window that elapsed.
    pub idle: Duration,
    /// Extensions that never reported.
    pub pending: usize,
}

/// Outcome of a scan that got far enough to dispatch work.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Discovered themes, in no particular order.
    pub themes: Vec<Theme>,
    /// Extensions that were skipped.
    pub failures: Vec<ExtensionFailure>,
    /// Set when the scan stopped early; `themes` is then partial.
    pub timeout: Option<ScanTimeout>,
}

#[derive(Debug, Deserialize)]
struct ExtensionManifest {
    #[serde(rename = "displayName", default)]
    display_name: Option<String>,
    #[serde(default)]
    contributes: Contributes,
}

#[derive(Debug, Default, Deserialize)]
struct Contributes {
    #[serde(default)]
    themes: Vec<ThemeContribution>,
}

#[derive(Debug, Deserialize)]
struct ThemeContribution {
    #[serde(default)]
    label: String,
    #[serde(default)]
    path: String,
}

#[derive(Debug)]
struct ExtensionJob {
    name: String,
    dir: PathBuf,
}

struct JobResult {
    index: usize,
    outcome: Result<Vec<Theme>, ExtensionError>,
}

/// Concurrent scanner over an extensions directory.
#[derive(Debug, Clone)]
pub struct ExtensionScanner {
    workers: usize,
    idle_timeout: Duration,
}

impl Default for ExtensionScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtensionScanner {
    /// Scanner with the default pool size and idle timeout.
    pub fn new() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    /// Set the number of worker threads (at least one).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set how long to wait for the next result before stopping.
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Collect every theme declared by the immediate subdirectories of `root`.
    ///
    /// Unreadable or malformed manifests are logged and reported in
    /// [`ScanReport::failures`]. Only an unreadable or empty `root` is an error.
    pub fn scan(&self, root: &Path) -> Result<ScanReport, ScanError> {
        self.scan_with(root, load_extension)
    }

    fn scan_with<F>(&self, root: &Path, load: F) -> Result<ScanReport, ScanError>
    where
        F: Fn(&Path) -> Result<Vec<Theme>, ExtensionError> + Send + Sync + 'static,
    {
        let jobs: Arc<[ExtensionJob]> = list_extensions(root)?.into();
        if jobs.is_empty() {
            return Err(ScanError::NoExtensions {
                path: root.to_path_buf(),
            });
        }

        let (tx, rx) = mpsc::channel::<JobResult>();
        let cursor = Arc::new(AtomicUsize::new(0));
        let load = Arc::new(load);
        let pool_size = self.workers.min(jobs.len());

        let handles: Vec<JoinHandle<()>> = (0..pool_size)
            .map(|_| {
                let jobs = Arc::clone(&jobs);
                let cursor = Arc::clone(&cursor);
                let load = Arc::clone(&load);
                let tx = tx.clone();
                thread::spawn(move || worker_loop(&jobs, &cursor, load.as_ref(), tx))
            })
            .collect();
        drop(tx);

        let mut report = ScanReport::default();
        let mut reported = vec![false; jobs.len()];
        let mut received = 0;
        while received < jobs.len() {
            match rx.recv_timeout(self.idle_timeout) {
                Ok(JobResult { index, outcome }) => {
                    received += 1;
                    reported[index] = true;
                    let name = &jobs[index].name;
                    match outcome {
                        Ok(themes) => {
                            tracing::debug!(extension = %name, count = themes.len(), "Scanned extension");
                            report.themes.extend(themes);
                        }
                        Err(error) => {
                            tracing::warn!(extension = %name, error = %error, "Error processing extension");
                            report.failures.push(ExtensionFailure {
                                extension: name.clone(),
                                error,
                            });
                        }
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    let timeout = ScanTimeout {
                        idle: self.idle_timeout,
                        pending: jobs.len() - received,
                    };
                    tracing::warn!(error = %timeout, "Stopping extension scan early");
                    report.timeout = Some(timeout);
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::error!(
                        pending = jobs.len() - received,
                        "Scan workers exited without reporting"
                    );
                    for (job, _) in jobs.iter().zip(&reported).filter(|(_, done)| !**done) {
                        tracing::warn!(extension = %job.name, "Extension was not scanned");
                        report.failures.push(ExtensionFailure {
                            extension: job.name.clone(),
                            error: ExtensionError::Unreported,
                        });
                    }
                    break;
                }
            }
        }

        // Stalled workers are left detached; joining would block past the timeout.
        if report.timeout.is_none() {
            for handle in handles {
                let _ = handle.join();
            }
        }

        Ok(report)
    }
}

fn worker_loop<F>(jobs: &[ExtensionJob], cursor: &AtomicUsize, load: &F, tx: Sender<JobResult>)
where
    F: Fn(&Path) -> Result<Vec<Theme>, ExtensionError>,
{
    loop {
        let index = cursor.fetch_add(1, Ordering::Relaxed);
        let Some(job) = jobs.get(index) else {
            break;
        };
        let outcome = load(&job.dir);
        if tx.send(JobResult { index, outcome }).is_err() {
            // Consumer gave up.
            break;
        }
    }
}

fn list_extensions(root: &Path) -> Result<Vec<ExtensionJob>, ScanError> {
    let entries = fs::read_dir(root).map_err(|source| ScanError::ReadRoot {
        path: root.to_path_buf(),
        source,
    })?;

    let mut jobs: Vec<ExtensionJob> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(path = %root.display(), error = %e, "Skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.path().is_dir())
        .map(|entry| ExtensionJob {
            name: entry.file_name().to_string_lossy().into_owned(),
            dir: entry.path(),
        })
        .collect();
    jobs.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(jobs)
}

/// Read one extension's manifest and return the themes it contributes.
pub fn load_extension(dir: &Path) -> Result<Vec<Theme>, ExtensionError> {
    let manifest_path = dir.join(MANIFEST_FILE);
    let contents = fs::read(&manifest_path).map_err(|source| ExtensionError::ReadManifest {
        path: manifest_path.clone(),
        source,
    })?;
    let manifest: ExtensionManifest =
        serde_json::from_slice(&contents).map_err(|source| ExtensionError::ParseManifest {
            path: manifest_path.clone(),
            source,
        })?;

    let extension = manifest
        .display_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| {
            dir.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

    let themes = manifest
        .contributes
        .themes
        .into_iter()
        .filter_map(|contribution| {
            if contribution.path.is_empty() {
                tracing::warn!(
                    extension = %extension,
                    label = %contribution.label,
                    "Theme entry has no path, skipping"
                );
                return None;
            }
            let relative = contribution
                .path
                .strip_prefix("./")
                .unwrap_or(&contribution.path);
            let path = dir.join(relative);
            let label = if contribution.label.is_empty() {
                path.file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default()
            } else {
                contribution.label
            };
            Some(Theme {
                label,
                path,
                extension: extension.clone(),
            })
        })
        .collect();

    Ok(themes)
}
