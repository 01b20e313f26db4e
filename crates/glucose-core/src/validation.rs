//! Input checks applied by the command-line shell before it calls the store
//! or the aggregator.

use crate::error::{GlucoseError, Result};

/// Earliest year accepted for a monthly summary.
pub const MIN_SUMMARY_YEAR: i32 = 1900;

/// Accept only positive, finite glucose values.
pub fn validate_reading_value(value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(GlucoseError::InvalidReading(format!(
            "{} is not a number",
            value
        )));
    }
    if value <= 0.0 {
        return Err(GlucoseError::InvalidReading(
            "blood sugar level must be a positive number".to_string(),
        ));
    }
    Ok(value)
}

/// Parse user input such as `" 112.5 "` into a validated glucose value.
pub fn parse_reading_value(input: &str) -> Result<f64> {
    let value: f64 = input.trim().parse().map_err(|_| {
        GlucoseError::InvalidReading(format!("\"{}\" is not a numerical value", input.trim()))
    })?;
    validate_reading_value(value)
}

/// Check a (year, month) query. Years run from [`MIN_SUMMARY_YEAR`] up to
/// `current_year + 1`.
pub fn validate_period(year: i32, month: u32, current_year: i32) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(GlucoseError::InvalidPeriod(format!(
            "month {} is not between 1 and 12",
            month
        )));
    }
    if !(MIN_SUMMARY_YEAR..=current_year + 1).contains(&year) {
        return Err(GlucoseError::InvalidPeriod(format!(
            "year {} is not between {} and {}",
            year,
            MIN_SUMMARY_YEAR,
            current_year + 1
        )));
    }
    Ok(())
}
