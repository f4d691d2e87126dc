//! Tracing configuration and log routing.
//!
//! The pipeline logs to stdout with a compact formatter and, when possible, to a file.
//! `NEWSVEC_LOG_FILE` overrides the file target; the default is `logs/newsvec.log`.
use std::sync::OnceLock;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "newsvec.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Configure tracing subscribers for stdout and optional file logging.
///
/// Respects `RUST_LOG` for filtering (defaults to `info`). The non‑blocking file
/// writer is kept alive through a process-lifetime guard.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(false).compact();

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer);

    match configure_file_writer() {
        Some(writer) => {
            let file_layer = fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false)
                .compact();
            registry.with(file_layer).init();
        }
        None => registry.init(),
    }
}

/// Build a non‑blocking writer for file logging, or `None` when the target
/// cannot be opened.
fn configure_file_writer() -> Option<NonBlocking> {
    let (non_blocking, guard) = if let Ok(path) = std::env::var("NEWSVEC_LOG_FILE") {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|err| eprintln!("Failed to open log file {path}: {err}"))
            .ok()?;
        tracing_appender::non_blocking(file)
    } else {
        std::fs::create_dir_all(LOG_DIR)
            .map_err(|err| eprintln!("Failed to create logs directory: {err}"))
            .ok()?;
        tracing_appender::non_blocking(tracing_appender::rolling::never(LOG_DIR, LOG_FILE))
    };

    let _ = LOG_GUARD.set(guard);
    Some(non_blocking)
}
