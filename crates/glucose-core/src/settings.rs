use clap::{CommandFactory, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::classifier::{RangeThresholds, DEFAULT_NORMAL_MAX, DEFAULT_NORMAL_MIN};
use crate::error::Result;

/// Name of the per-user directory under `$HOME`.
pub const APP_DIR_NAME: &str = ".glucose-log";

/// File name of the default record store inside [`APP_DIR_NAME`].
pub const DEFAULT_DATA_FILE_NAME: &str = "data.csv";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Personal blood-glucose log
#[derive(Parser, Debug, Clone)]
#[command(
    name = "glucose-log",
    about = "Record blood-glucose readings and review monthly summaries",
    version
)]
pub struct Settings {
    /// CSV file holding the readings
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// Lowest value (mg/dL) classified as Normal
    #[arg(long)]
    pub normal_min: Option<f64>,

    /// Highest value (mg/dL) classified as Normal
    #[arg(long)]
    pub normal_max: Option<f64>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Actions offered by the command-line shell.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Record a new reading stamped with the current local time
    Add {
        /// Blood sugar level in mg/dL
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Show every recorded reading
    List,
    /// Show statistics for one calendar month
    Summary {
        /// Year (YYYY)
        #[arg(long)]
        year: i32,
        /// Month (1-12)
        #[arg(long)]
        month: u32,
    },
    /// Show one summary row per month with data
    Months,
    /// Interactive menu
    Menu,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.glucose-log/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&home_dir())
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(APP_DIR_NAME).join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            debug!("Ignoring unreadable settings file {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Atomically write params to an explicit path.
    pub fn save_to(&self, path: &Path) -> std::result::Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &Path) -> std::result::Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Same as [`Settings::load_with_last_used`] but with an explicit argument
    /// list and config path.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            let _ = LastUsedParams::clear_at(config_path);
            return settings.apply_debug_flag();
        }

        let last = LastUsedParams::load_from(config_path);
        let (last_min, last_max) = (last.normal_min, last.normal_max);

        // CLI always wins over persisted values.
        if settings.data_file.is_none() {
            settings.data_file = last.data_file;
        }
        if settings.normal_min.is_none() {
            settings.normal_min = last.normal_min;
        }
        if settings.normal_max.is_none() {
            settings.normal_max = last.normal_max;
        }
        if !is_arg_explicitly_set(&matches, "log_level") {
            if let Some(v) = last.log_level {
                settings.log_level = v;
            }
        }

        let mut params = LastUsedParams::from(&settings);
        if let Err(e) = settings.thresholds() {
            // An invalid range must not outlive this run.
            warn!("Not persisting range thresholds: {}", e);
            params.normal_min = last_min;
            params.normal_max = last_max;
        }
        if let Err(e) = params.save_to(config_path) {
            warn!(
                "Could not persist settings to {}: {}",
                config_path.display(),
                e
            );
        }

        settings.apply_debug_flag()
    }

    /// Thresholds for the classifier, falling back to 70–139 mg/dL.
    pub fn thresholds(&self) -> Result<RangeThresholds> {
        RangeThresholds::new(
            self.normal_min.unwrap_or(DEFAULT_NORMAL_MIN),
            self.normal_max.unwrap_or(DEFAULT_NORMAL_MAX),
        )
    }

    /// The record file to use, defaulting to `~/.glucose-log/data.csv`.
    pub fn resolved_data_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| app_dir_in(&home_dir()).join(DEFAULT_DATA_FILE_NAME))
    }

    /// The subcommand to run; the interactive menu when none was given.
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::Menu)
    }

    fn apply_debug_flag(mut self) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            data_file: s.data_file.clone(),
            normal_min: s.normal_min,
            normal_max: s.normal_max,
            log_level: Some(s.log_level.clone()),
        }
    }
}

// ── Helpers ────────────────────────────────────────────────────────────────────

/// `~/.glucose-log` rooted at `home`.
pub fn app_dir_in(home: &Path) -> PathBuf {
    home.join(APP_DIR_NAME)
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
