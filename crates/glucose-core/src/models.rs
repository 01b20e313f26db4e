use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::GlucoseError;

/// `strftime` pattern used for every stored timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Clinical range a glucose value falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeLabel {
    Low,
    Normal,
    High,
}

impl RangeLabel {
    /// All labels in display order.
    pub const ALL: [RangeLabel; 3] = [RangeLabel::Low, RangeLabel::Normal, RangeLabel::High];

    /// The exact text written to the `State` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeLabel::Low => "Low",
            RangeLabel::Normal => "Normal",
            RangeLabel::High => "High",
        }
    }
}

impl fmt::Display for RangeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RangeLabel {
    type Err = GlucoseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Low" => Ok(RangeLabel::Low),
            "Normal" => Ok(RangeLabel::Normal),
            "High" => Ok(RangeLabel::High),
            other => Err(GlucoseError::InvalidReading(format!(
                "unknown range label \"{}\"",
                other
            ))),
        }
    }
}

/// One persisted glucose measurement.
///
/// `timestamp` and `range_label` hold the text exactly as it appears in the
/// record file. The label is whatever was computed at write time and is
/// never re-derived on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Local wall-clock time, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    /// Glucose concentration in mg/dL.
    pub value: f64,
    /// Stored range label (`Low`, `Normal` or `High`).
    pub range_label: String,
}

impl Reading {
    pub fn new(timestamp: impl Into<String>, value: f64, range_label: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            value,
            range_label: range_label.into(),
        }
    }

    /// Parse the stored timestamp, `None` if it is not in [`TIMESTAMP_FORMAT`].
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.timestamp).ok()
    }

    /// Parse the stored label, `None` if it is not a known [`RangeLabel`].
    pub fn parsed_label(&self) -> Option<RangeLabel> {
        self.range_label.parse().ok()
    }
}

/// Render a timestamp in the stored format.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp string.
pub fn parse_timestamp(s: &str) -> crate::error::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
        .map_err(|_| GlucoseError::TimestampParse(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, Timelike};

    #[test]
    fn test_range_label_round_trips_through_text() {
        for label in RangeLabel::ALL {
            assert_eq!(label.as_str().parse::<RangeLabel>().unwrap(), label);
            assert_eq!(label.to_string(), label.as_str());
        }
    }

    #[test]
    fn test_range_label_rejects_unknown_text() {
        assert!("normal".parse::<RangeLabel>().is_err());
        assert!("".parse::<RangeLabel>().is_err());
    }

    #[test]
    fn test_format_timestamp() {
        let ts = NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_opt(14, 30, 5)
            .unwrap();
        assert_eq!(format_timestamp(&ts), "2025-01-02 14:30:05");
    }

    #[test]
    fn test_parse_timestamp_valid() {
        let ts = parse_timestamp("2024-12-01 10:00:00").unwrap();
        assert_eq!(ts.year(), 2024);
        assert_eq!(ts.month(), 12);
        assert_eq!(ts.hour(), 10);
    }

    #[test]
    fn test_parse_timestamp_rejects_other_formats() {
        assert!(parse_timestamp("2024-12-01T10:00:00Z").is_err());
        assert!(parse_timestamp("01/12/2024").is_err());
        assert!(matches!(
            parse_timestamp("garbage"),
            Err(GlucoseError::TimestampParse(_))
        ));
    }

    #[test]
    fn test_reading_helpers() {
        let reading = Reading::new("2025-01-05 08:00:00", 90.0, "Normal");
        assert_eq!(reading.parsed_label(), Some(RangeLabel::Normal));
        assert_eq!(reading.parsed_timestamp().unwrap().day(), 5);

        let broken = Reading::new("not a time", 90.0, "Sideways");
        assert!(broken.parsed_timestamp().is_none());
        assert!(broken.parsed_label().is_none());
    }
}
