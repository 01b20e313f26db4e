//! Plain-text grid tables for readings and monthly summaries.

use glucose_core::formatting::{
    format_level, format_mgdl, format_number, percentage, render_grid,
};
use glucose_core::models::Reading;
use glucose_data::aggregator::MonthlySummary;
use glucose_data::store::StoreSchema;

/// One row per reading under the store's column names.
pub fn render_readings(readings: &[Reading], schema: &StoreSchema) -> String {
    let rows: Vec<Vec<String>> = readings
        .iter()
        .map(|r| {
            vec![
                r.timestamp.clone(),
                format_level(r.value),
                r.range_label.clone(),
            ]
        })
        .collect();
    render_grid(Some(&schema.columns()), &rows)
}

/// Two-column statistics table for one month.
pub fn render_summary(summary: &MonthlySummary) -> String {
    let rows = vec![
        vec!["Average Blood Sugar".to_string(), format_mgdl(summary.avg)],
        vec!["Minimum Blood Sugar".to_string(), format_mgdl(summary.min)],
        vec!["Maximum Blood Sugar".to_string(), format_mgdl(summary.max)],
        vec![
            "Total Readings".to_string(),
            summary.total_readings.to_string(),
        ],
        vec![
            "Normal Readings".to_string(),
            summary.normal_count.to_string(),
        ],
        vec!["Low Readings".to_string(), summary.low_count.to_string()],
        vec!["High Readings".to_string(), summary.high_count.to_string()],
    ];
    render_grid(None, &rows)
}

/// One row per month: count, mean, extremes, range counts and time in range.
pub fn render_months(summaries: &[MonthlySummary]) -> String {
    let rows: Vec<Vec<String>> = summaries
        .iter()
        .map(|s| {
            let in_range = percentage(s.normal_count as f64, s.total_readings as f64, 1);
            vec![
                s.period_key(),
                s.total_readings.to_string(),
                format_level(s.avg),
                format_level(s.min),
                format_level(s.max),
                s.low_count.to_string(),
                s.normal_count.to_string(),
                s.high_count.to_string(),
                format!("{}%", format_number(in_range, 1)),
            ]
        })
        .collect();
    render_grid(
        Some(&[
            "Month", "Readings", "Avg", "Min", "Max", "Low", "Normal", "High", "In Range",
        ]),
        &rows,
    )
}
