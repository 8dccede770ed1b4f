//! Logging initialization for podflow.
//!
//! TUI mode: logs to `<state>/logs/podflow-{datetime}-{session}.log`
//! CLI mode: logs to stderr

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::Config;

/// Result of logging initialization
pub struct LoggingHandle {
    /// Flushes buffered log lines when dropped; keep alive for the whole run.
    pub _guard: Option<WorkerGuard>,

    /// Path to the log file (only set in TUI mode with file logging enabled)
    pub log_file_path: Option<PathBuf>,
}

/// Filter directive: `--debug` wins over the configured level
fn log_level(config: &Config, debug_override: bool) -> String {
    if debug_override {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    }
}

/// File name for a wizard session started at `now`. The short session id
/// tells apart runs started within the same second.
fn log_file_name(now: chrono::DateTime<chrono::Utc>, session_id: Uuid) -> String {
    let simple = session_id.simple().to_string();
    format!(
        "podflow-{}-{}.log",
        now.format("%Y%m%dT%H%M%SZ"),
        &simple[..8]
    )
}

/// Whether the run should log to a file rather than stderr
fn logs_to_file(config: &Config, is_tui_mode: bool) -> bool {
    is_tui_mode && config.logging.to_file
}

fn create_logs_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create logs directory {}", dir.display()))
}

/// Initialize logging for one run.
///
/// The terminal UI owns stdout, so TUI runs write to a per-session log file
/// named after `session_id`. `RUST_LOG` takes precedence over both the config
/// and `--debug`.
pub fn init_logging(
    config: &Config,
    is_tui_mode: bool,
    debug_override: bool,
    session_id: Uuid,
) -> Result<LoggingHandle> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(config, debug_override)));

    let (writer, guard, log_file_path) = if logs_to_file(config, is_tui_mode) {
        let logs_dir = config.logs_path();
        create_logs_dir(&logs_dir)?;

        let log_filename = log_file_name(chrono::Utc::now(), session_id);
        let file_appender = tracing_appender::rolling::never(&logs_dir, &log_filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        (
            BoxMakeWriter::new(non_blocking),
            Some(guard),
            Some(logs_dir.join(log_filename)),
        )
    } else {
        (BoxMakeWriter::new(std::io::stderr), None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(log_file_path.is_none())
                .with_writer(writer),
        )
        .init();

    if let Some(path) = &log_file_path {
        tracing::info!(%session_id, log_file = %path.display(), "Session logging started");
    }

    Ok(LoggingHandle {
        _guard: guard,
        log_file_path,
    })
}
