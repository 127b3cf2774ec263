//! Logging utilities for the Beaux services.
//!
//! Every crate logs through `tracing`; binaries call one of the `init*`
//! functions once at startup. `RUST_LOG` directives are honoured on top of
//! the default level for the `beaux` targets.

use std::path::Path;

use tracing::{error, info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO.
///
/// ```
/// use beaux_common::logging;
///
/// logging::init();
/// logging::init_with_level(tracing::Level::DEBUG); // no-op, already set
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

fn env_filter(level: Level) -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match format!("beaux={}", level).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Initialize the tracing subscriber with a specific log level.
///
/// Uses `try_init`, so calling it twice (tests, embedded use) is harmless.
pub fn init_with_level(level: Level) {
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .with(env_filter(level))
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Stdout logging plus a daily-rotated file under `dir`.
///
/// Keep the returned guard alive for the lifetime of the process, dropping it
/// flushes and stops the background writer.
pub fn init_with_file(dir: impl AsRef<Path>, file_prefix: &str, level: Level) -> WorkerGuard {
    let appender = tracing_appender::rolling::daily(dir.as_ref(), file_prefix);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_line_number(true))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer),
        )
        .with(env_filter(level))
        .try_init();

    if result.is_ok() {
        info!(
            "Logging initialized at level: {} (file: {}/{})",
            level,
            dir.as_ref().display(),
            file_prefix
        );
    }
    guard
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}
