//! Monthly statistics over loaded readings.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use glucose_core::classifier::Classifier;
use glucose_core::models::{RangeLabel, Reading};
use serde::Serialize;

// ── MonthlySummary ────────────────────────────────────────────────────────────

/// Descriptive statistics for the readings of one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub total_readings: usize,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub low_count: usize,
    pub normal_count: usize,
    pub high_count: usize,
}

impl MonthlySummary {
    /// Build a summary from the values of one month. `None` for no values.
    fn from_values(year: i32, month: u32, values: &[f64], classifier: &Classifier) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut summary = Self {
            year,
            month,
            total_readings: values.len(),
            avg: values.iter().sum::<f64>() / values.len() as f64,
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            low_count: 0,
            normal_count: 0,
            high_count: 0,
        };
        for &value in values {
            match classifier.classify(value) {
                RangeLabel::Low => summary.low_count += 1,
                RangeLabel::Normal => summary.normal_count += 1,
                RangeLabel::High => summary.high_count += 1,
            }
        }
        Some(summary)
    }

    /// Key in the form `"2025-01"`.
    pub fn period_key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Human-readable month, e.g. `"January 2025"`.
    pub fn period_label(&self) -> String {
        period_label(self.year, self.month)
    }

    /// Count for a single range.
    pub fn count(&self, label: RangeLabel) -> usize {
        match label {
            RangeLabel::Low => self.low_count,
            RangeLabel::Normal => self.normal_count,
            RangeLabel::High => self.high_count,
        }
    }
}

/// `"January 2025"` for (2025, 1); falls back to `"2025-13"` for an
/// impossible month.
pub fn period_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{:04}-{:02}", year, month))
}

// ── MonthlyAggregator ─────────────────────────────────────────────────────────

/// Computes [`MonthlySummary`]s, classifying values with its own
/// [`Classifier`] rather than trusting the labels stored with each reading.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonthlyAggregator {
    classifier: Classifier,
}

impl MonthlyAggregator {
    pub fn new(classifier: Classifier) -> Self {
        Self { classifier }
    }

    /// Summarise the readings of `year`/`month`.
    ///
    /// Readings whose timestamp does not parse are ignored. Returns `None`
    /// when no reading falls into the month.
    pub fn summarize(&self, readings: &[Reading], year: i32, month: u32) -> Option<MonthlySummary> {
        let values: Vec<f64> = readings
            .iter()
            .filter(|r| {
                r.parsed_timestamp()
                    .is_some_and(|ts| ts.year() == year && ts.month() == month)
            })
            .map(|r| r.value)
            .collect();

        MonthlySummary::from_values(year, month, &values, &self.classifier)
    }

    /// One summary per month that has readings, oldest first.
    pub fn summarize_all(&self, readings: &[Reading]) -> Vec<MonthlySummary> {
        let mut by_month: BTreeMap<(i32, u32), Vec<f64>> = BTreeMap::new();

        for reading in readings {
            if let Some(ts) = reading.parsed_timestamp() {
                by_month
                    .entry((ts.year(), ts.month()))
                    .or_default()
                    .push(reading.value);
            }
        }

        by_month
            .into_iter()
            .filter_map(|((year, month), values)| {
                MonthlySummary::from_values(year, month, &values, &self.classifier)
            })
            .collect()
    }
}

/// Summarise one month with the default 70–139 mg/dL classifier.
pub fn summarize(readings: &[Reading], year: i32, month: u32) -> Option<MonthlySummary> {
    MonthlyAggregator::default().summarize(readings, year, month)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
