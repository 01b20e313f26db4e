mod app;
mod bootstrap;
mod menu;
mod render;

use std::io;

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use glucose_core::settings::{Command, Settings};
use glucose_core::validation::{parse_reading_value, validate_period};

use crate::app::App;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_app_dir()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("glucose-log v{} starting", env!("CARGO_PKG_VERSION"));

    let data_file = settings.resolved_data_file();
    bootstrap::ensure_parent_dir(&data_file)?;
    tracing::info!("Record store: {}", data_file.display());

    let app = App::from_settings(&settings)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match settings.command_or_default() {
        Command::Add { value } => {
            let value = parse_reading_value(&value)?;
            // A failed save is reported by `add_reading` and is not fatal.
            app.add_reading(value, &now(), &mut out)?;
        }
        Command::List => app.show_all(&mut out)?,
        Command::Summary { year, month } => {
            validate_period(year, month, now().year())?;
            app.show_summary(year, month, &mut out)?;
        }
        Command::Months => app.show_months(&mut out)?,
        Command::Menu => {
            let stdin = io::stdin();
            menu::run_menu(&app, &mut stdin.lock(), &mut out, now)?;
        }
    }

    Ok(())
}

/// Current local wall-clock time, second precision.
fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
