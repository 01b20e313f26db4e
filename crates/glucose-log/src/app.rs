//! Command handlers shared by the one-shot subcommands and the menu.
//!
//! Every handler loads a fresh snapshot from the store; nothing is cached
//! between calls.

use std::io::{self, Write};

use chrono::NaiveDateTime;
use glucose_core::classifier::Classifier;
use glucose_core::models::{format_timestamp, Reading};
use glucose_core::settings::Settings;
use glucose_data::advice::Advice;
use glucose_data::aggregator::{period_label, MonthlyAggregator};
use glucose_data::store::{format_value, RecordStore};
use tracing::{error, info};

use crate::render;

pub struct App {
    store: RecordStore,
    classifier: Classifier,
    aggregator: MonthlyAggregator,
}

impl App {
    pub fn new(store: RecordStore, classifier: Classifier) -> Self {
        Self {
            store,
            classifier,
            aggregator: MonthlyAggregator::new(classifier),
        }
    }

    /// Bind the store path and thresholds chosen on the command line.
    pub fn from_settings(settings: &Settings) -> glucose_core::Result<Self> {
        Ok(Self::new(
            RecordStore::new(settings.resolved_data_file()),
            Classifier::new(settings.thresholds()?),
        ))
    }

    /// Classify and persist one reading taken at `now`.
    ///
    /// Returns `Ok(false)` when the store could not be written; the failure
    /// is reported on `out` and the caller carries on.
    pub fn add_reading<W: Write>(
        &self,
        value: f64,
        now: &NaiveDateTime,
        out: &mut W,
    ) -> io::Result<bool> {
        let label = self.classifier.classify(value);
        writeln!(
            out,
            "Reading: {} mg/dL, State: {}, Time: {}",
            format_value(value),
            label,
            format_timestamp(now)
        )?;

        match self.store.append(value, label, now) {
            Ok(()) => {
                info!("Saved reading {} ({})", value, label);
                writeln!(out, "Reading successfully saved.")?;
                Ok(true)
            }
            Err(e) => {
                error!("Failed to save reading: {}", e);
                writeln!(out, "Error saving data: {}", e)?;
                Ok(false)
            }
        }
    }

    pub fn show_all<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let readings = self.load(out)?;
        if readings.is_empty() {
            writeln!(out, "\nNo blood sugar readings recorded yet.")?;
            return Ok(());
        }

        writeln!(out, "\n--- All Blood Sugar Readings ---")?;
        writeln!(out, "{}", render::render_readings(&readings, self.store.schema()))?;
        writeln!(out, "--------------------------------\n")
    }

    pub fn show_summary<W: Write>(&self, year: i32, month: u32, out: &mut W) -> io::Result<()> {
        let readings = self.load(out)?;
        let label = period_label(year, month);

        let Some(summary) = self.aggregator.summarize(&readings, year, month) else {
            return writeln!(out, "\nNo blood sugar readings found for {}.", label);
        };

        writeln!(out, "\n--- Summary for {} ---", label)?;
        writeln!(out, "{}", render::render_summary(&summary))?;
        if let Some(advice) = Advice::for_summary(&summary) {
            writeln!(out, "\n{}", advice)?;
        }
        writeln!(out, "------------------------------------------\n")
    }

    pub fn show_months<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let readings = self.load(out)?;
        let summaries = self.aggregator.summarize_all(&readings);
        if summaries.is_empty() {
            return writeln!(out, "\nNo blood sugar readings recorded yet.");
        }

        writeln!(out, "\n--- Monthly Overview ---")?;
        writeln!(out, "{}", render::render_months(&summaries))
    }

    /// Load all readings, printing any load diagnostics as warnings.
    fn load<W: Write>(&self, out: &mut W) -> io::Result<Vec<Reading>> {
        let report = self.store.load_all();
        for diagnostic in &report.diagnostics {
            writeln!(out, "Warning: {}", diagnostic)?;
        }
        Ok(report.readings)
    }
}
