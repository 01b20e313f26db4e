//! Append-only CSV record store for glucose readings.
//!
//! Each call opens the file, does its work and closes it again; no handle is
//! kept between calls. Loading is tolerant: malformed rows are skipped and
//! reported in a [`LoadReport`] instead of aborting the load.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use glucose_core::error::{GlucoseError, Result};
use glucose_core::models::{format_timestamp, RangeLabel, Reading};
use thiserror::Error;
use tracing::{debug, warn};

// ── StoreSchema ───────────────────────────────────────────────────────────────

/// Column names written to (and expected in) the header row.
///
/// Columns are always, in order: timestamp, value, range label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSchema {
    pub timestamp_column: String,
    pub value_column: String,
    pub label_column: String,
}

impl StoreSchema {
    /// Number of fields in every data row.
    pub const FIELD_COUNT: usize = 3;

    pub fn new(
        timestamp_column: impl Into<String>,
        value_column: impl Into<String>,
        label_column: impl Into<String>,
    ) -> Self {
        Self {
            timestamp_column: timestamp_column.into(),
            value_column: value_column.into(),
            label_column: label_column.into(),
        }
    }

    pub fn columns(&self) -> [&str; 3] {
        [
            self.timestamp_column.as_str(),
            self.value_column.as_str(),
            self.label_column.as_str(),
        ]
    }

    fn matches(&self, header: &csv::StringRecord) -> bool {
        header.iter().eq(self.columns())
    }
}

impl Default for StoreSchema {
    fn default() -> Self {
        Self::new("Timestamp", "Blood Glucose (mg/dL)", "State")
    }
}

// ── Load reporting ────────────────────────────────────────────────────────────

/// Why a single data row was left out of a load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("expected {expected} fields, found {found}")]
    MissingFields { expected: usize, found: usize },

    #[error("value \"{0}\" is not a number")]
    InvalidValue(String),

    #[error("malformed record: {0}")]
    Malformed(String),
}

/// A non-fatal problem found while loading the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The header row differs from the schema; rows were loaded anyway.
    HeaderMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
    /// One data row was skipped.
    SkippedRow {
        /// 1-based line number in the file.
        line: u64,
        fields: Vec<String>,
        reason: SkipReason,
    },
    /// The file could not be read; the load returned no readings.
    StorageError(String),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::HeaderMismatch { expected, found } => write!(
                f,
                "CSV header mismatch. Expected {:?}, got {:?}. Data might be misaligned.",
                expected, found
            ),
            Diagnostic::SkippedRow {
                line,
                fields,
                reason,
            } => write!(
                f,
                "Skipping malformed row at line {} {:?}: {}",
                line, fields, reason
            ),
            Diagnostic::StorageError(msg) => {
                write!(f, "Error loading data: {}. Returning empty data set.", msg)
            }
        }
    }
}

/// Result of [`RecordStore::load_all`]: the readings that parsed, in file
/// order, plus everything that was skipped or suspicious.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub readings: Vec<Reading>,
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadReport {
    /// Number of data rows that were skipped.
    pub fn skipped_rows(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::SkippedRow { .. }))
            .count()
    }

    fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::SkippedRow { .. } => debug!("{}", diagnostic),
            _ => warn!("{}", diagnostic),
        }
        self.diagnostics.push(diagnostic);
    }
}

// ── RecordStore ───────────────────────────────────────────────────────────────

/// Flat-file store of [`Reading`]s bound to one CSV path.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
    schema: StoreSchema,
}

impl RecordStore {
    /// Store at `path` using the default three-column schema.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_schema(path, StoreSchema::default())
    }

    pub fn with_schema(path: impl Into<PathBuf>, schema: StoreSchema) -> Self {
        Self {
            path: path.into(),
            schema,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn schema(&self) -> &StoreSchema {
        &self.schema
    }

    /// Append one reading, writing the header first when the file is new or
    /// empty.
    ///
    /// Header and row are encoded up front and handed to a single
    /// `write_all` on a file opened in append mode, so a failed call leaves
    /// no partial row behind.
    pub fn append(
        &self,
        value: f64,
        range_label: RangeLabel,
        timestamp: &NaiveDateTime,
    ) -> Result<()> {
        if !value.is_finite() || value <= 0.0 {
            return Err(GlucoseError::InvalidReading(format!(
                "{} is not a positive number",
                value
            )));
        }

        let needs_header = is_missing_or_empty(&self.path);

        let mut writer = csv::Writer::from_writer(Vec::new());
        if needs_header {
            writer.write_record(self.schema.columns())?;
        }
        writer.write_record([
            format_timestamp(timestamp),
            format_value(value),
            range_label.as_str().to_string(),
        ])?;
        let bytes = writer
            .into_inner()
            .map_err(|e| GlucoseError::Io(e.into_error()))?;

        let write_err = |source: std::io::Error| GlucoseError::FileWrite {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(write_err)?;
        file.write_all(&bytes).map_err(write_err)?;
        file.flush().map_err(write_err)?;

        debug!(
            "Appended {} ({}) to {}{}",
            value,
            range_label,
            self.path.display(),
            if needs_header { " with header" } else { "" }
        );
        Ok(())
    }

    /// Load every reading in file order.
    ///
    /// A missing or empty file yields an empty report. Unreadable files also
    /// yield no readings, with a [`Diagnostic::StorageError`] explaining why.
    pub fn load_all(&self) -> LoadReport {
        if is_missing_or_empty(&self.path) {
            return LoadReport::default();
        }

        match self.read_report() {
            Ok(report) => {
                debug!(
                    "Loaded {} readings from {} ({} skipped)",
                    report.readings.len(),
                    self.path.display(),
                    report.skipped_rows()
                );
                report
            }
            Err(e) => {
                let mut report = LoadReport::default();
                report.push_diagnostic(Diagnostic::StorageError(e.to_string()));
                report
            }
        }
    }

    /// Parse one data row against the schema.
    pub fn parse_row(&self, record: &csv::StringRecord) -> std::result::Result<Reading, SkipReason> {
        if record.len() < StoreSchema::FIELD_COUNT {
            return Err(SkipReason::MissingFields {
                expected: StoreSchema::FIELD_COUNT,
                found: record.len(),
            });
        }

        let raw_value = &record[1];
        let value = raw_value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| SkipReason::InvalidValue(raw_value.to_string()))?;

        Ok(Reading::new(&record[0], value, &record[2]))
    }

    // ── Private ───────────────────────────────────────────────────────────────

    fn read_report(&self) -> Result<LoadReport> {
        let file = File::open(&self.path).map_err(|source| GlucoseError::FileRead {
            path: self.path.clone(),
            source,
        })?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let mut report = LoadReport::default();
        let mut records = reader.records();

        match records.next() {
            None => return Ok(report),
            Some(Ok(header)) => {
                if !self.schema.matches(&header) {
                    report.push_diagnostic(Diagnostic::HeaderMismatch {
                        expected: self.schema.columns().iter().map(|c| c.to_string()).collect(),
                        found: header.iter().map(str::to_string).collect(),
                    });
                }
            }
            Some(Err(e)) if e.is_io_error() => return Err(e.into()),
            Some(Err(e)) => report.push_diagnostic(malformed(&e)),
        }

        for result in records {
            match result {
                Ok(record) => match self.parse_row(&record) {
                    Ok(reading) => report.readings.push(reading),
                    Err(reason) => report.push_diagnostic(Diagnostic::SkippedRow {
                        line: record.position().map(|p| p.line()).unwrap_or(0),
                        fields: record.iter().map(str::to_string).collect(),
                        reason,
                    }),
                },
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => report.push_diagnostic(malformed(&e)),
            }
        }

        Ok(report)
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn is_missing_or_empty(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|meta| meta.len() == 0)
        .unwrap_or(true)
}

/// Shortest round-trip text that always carries a decimal point (`95.0`).
pub fn format_value(value: f64) -> String {
    format!("{:?}", value)
}

fn malformed(err: &csv::Error) -> Diagnostic {
    Diagnostic::SkippedRow {
        line: err.position().map(|p| p.line()).unwrap_or(0),
        fields: Vec::new(),
        reason: SkipReason::Malformed(err.to_string()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
