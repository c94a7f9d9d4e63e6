//! Tracing subscriber setup.
//!
//! Logs go to stderr so stdout only carries program output. The filter is
//! read from `ECHO_VSC_LOG` when set, otherwise it follows `-v`.

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive string.
pub const LOG_ENV: &str = "ECHO_VSC_LOG";

/// Install the global subscriber. Later calls are no-ops.
pub fn init(verbosity: u8) {
    let env = std::env::var(LOG_ENV).ok();
    let _ = build_subscriber(verbosity, env.as_deref(), std::io::stderr).try_init();
}

/// Build a subscriber writing to `writer`.
pub fn build_subscriber<W>(
    verbosity: u8,
    env: Option<&str>,
    writer: W,
) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_target(false)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter(verbosity, env))
}

fn env_filter(verbosity: u8, env: Option<&str>) -> EnvFilter {
    if let Some(directives) = env.filter(|s| !s.trim().is_empty()) {
        match EnvFilter::try_new(directives) {
            Ok(filter) => return filter,
            Err(e) => eprintln!("Warning: ignoring invalid {LOG_ENV}: {e}"),
        }
    }
    EnvFilter::new(default_level(verbosity))
}

fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
