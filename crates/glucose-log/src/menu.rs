//! Interactive text menu.
//!
//! Generic over the input and output streams so the loop can be driven from
//! tests. End of input leaves the menu quietly.

use std::io::{self, BufRead, Write};

use chrono::{Datelike, NaiveDateTime};
use glucose_core::validation::{parse_reading_value, validate_period};

use crate::app::App;

/// Run the menu until the user picks "Exit" or input ends.
///
/// `clock` supplies the timestamp for new readings and the current year for
/// period validation.
pub fn run_menu<R, W, F>(app: &App, input: &mut R, out: &mut W, clock: F) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    F: Fn() -> NaiveDateTime,
{
    loop {
        writeln!(out, "--- Blood Sugar Tracker Menu ---")?;
        writeln!(out, "1. Add New Reading")?;
        writeln!(out, "2. View All Readings")?;
        writeln!(out, "3. View Monthly Summary")?;
        writeln!(out, "4. Exit")?;

        let Some(choice) = prompt(input, out, "Enter your choice (1-4): ")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => {
                writeln!(out, "\n--- Add New Reading ---")?;
                let Some(value) = read_reading_value(input, out)? else {
                    return Ok(());
                };
                app.add_reading(value, &clock(), out)?;
            }
            "2" => app.show_all(out)?,
            "3" => {
                writeln!(out, "\n--- View Monthly Summary ---")?;
                let current_year = clock().year();
                let Some((year, month)) = read_period(input, out, current_year)? else {
                    return Ok(());
                };
                app.show_summary(year, month, out)?;
            }
            "4" => {
                writeln!(out, "Exiting Blood Sugar Tracker. Goodbye!")?;
                return Ok(());
            }
            _ => writeln!(out, "Invalid choice. Please enter 1, 2, 3, or 4.")?,
        }
    }
}

// ── Prompts ───────────────────────────────────────────────────────────────────

/// Print `message`, read one line and return it trimmed; `None` at EOF.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> io::Result<Option<String>> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn read_reading_value<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<f64>> {
    loop {
        let Some(raw) = prompt(input, out, "Enter your blood sugar level (mg/dL): ")? else {
            return Ok(None);
        };
        match parse_reading_value(&raw) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => writeln!(out, "{}", e)?,
        }
    }
}

fn read_period<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    current_year: i32,
) -> io::Result<Option<(i32, u32)>> {
    loop {
        let Some(year_raw) = prompt(input, out, "Enter year (YYYY): ")? else {
            return Ok(None);
        };
        let Some(month_raw) = prompt(input, out, "Enter month (1-12): ")? else {
            return Ok(None);
        };

        let (Ok(year), Ok(month)) = (year_raw.parse::<i32>(), month_raw.parse::<u32>()) else {
            writeln!(out, "Invalid input. Please enter numbers for year and month.")?;
            continue;
        };
        match validate_period(year, month, current_year) {
            Ok(()) => return Ok(Some((year, month))),
            Err(e) => writeln!(out, "{}. Please try again.", e)?,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
