use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILE: &str = "para.log";

/// Filter directive for the crate's own events.
fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("para={}", level)
}

/// Initialize the logging system
///
/// Events go to stderr in compact form. `RUST_LOG` overrides the level.
///
/// # Arguments
/// * `verbose` - Enable verbose (DEBUG) logging
/// * `log_file` - Optional path to a log file, rotated daily and written as JSON
pub fn init(verbose: bool, log_file: Option<PathBuf>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer);

    if let Some(log_path) = log_file {
        let directory = log_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let _ = std::fs::create_dir_all(directory);

        let file_appender = tracing_appender::rolling::daily(
            directory,
            log_path
                .file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new(DEFAULT_LOG_FILE)),
        );

        let file_layer = fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .json();

        let _ = subscriber.with(file_layer).try_init();
    } else {
        let _ = subscriber.try_init();
    }
}
