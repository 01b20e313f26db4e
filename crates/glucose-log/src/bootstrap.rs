use std::path::{Path, PathBuf};
use std::sync::Mutex;

use glucose_core::settings::app_dir_in;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure `~/.glucose-log/` exists and return it.
pub fn ensure_app_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let app_dir = app_dir_in(&home);
    std::fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}

/// Create the parent directory of `data_file` when it is missing so the
/// first append can create the file itself.
pub fn ensure_parent_dir(data_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = data_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a Python-style level name onto a tracing filter directive.
pub fn level_directive(log_level: &str) -> &'static str {
    match log_level.to_uppercase().as_str() {
        "DEBUG" | "CRITICAL" => "debug",
        "INFO" => "info",
        "WARNING" | "WARN" => "warn",
        "ERROR" => "error",
        _ => "info",
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Logs go to stderr, or are appended to `log_file` when one is given.
pub fn setup_logging(log_level: &str, log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(level_directive(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            ensure_parent_dir(path)?;
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()?;
        }
        None => {
            let layer = fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()?;
        }
    }

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
