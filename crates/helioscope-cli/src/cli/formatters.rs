// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Helioscope.

//! Output formatters for backtest results.

use comfy_table::{Attribute, Cell, Color, Table, presets::UTF8_FULL};

use helioscope_core::{AccuracyStats, Summary, SweepPoint};
use helioscope_types::BatteryConfig;

/// Formatter for pretty ASCII tables
#[derive(Debug)]
pub struct TableFormatter;

impl TableFormatter {
    /// Format one run's summary: period, day counts, accuracy breakdown and
    /// a sample of the incorrect decisions.
    pub fn format_summary(
        summary: &Summary,
        battery: &BatteryConfig,
        max_mismatches: usize,
    ) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Threshold: {:.2} kWh (battery {} × {})\n",
            battery.threshold_kwh(),
            battery.capacity_kwh,
            battery.safety_factor
        ));
        output.push_str(&format!(
            "Days: {} total, {} scorable, {} skipped (no forecast signal)\n",
            summary.total_days, summary.scorable_days, summary.skipped_days
        ));

        if summary.is_insufficient() {
            output.push_str("No days with valid forecast data.\n");
            return output;
        }

        if let (Some(start), Some(end)) = (summary.start_date, summary.end_date) {
            output.push_str(&format!("Period: {start} to {end}\n"));
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            Cell::new("Decision class").add_attribute(Attribute::Bold),
            Cell::new("Correct").add_attribute(Attribute::Bold),
            Cell::new("Days").add_attribute(Attribute::Bold),
            Cell::new("Accuracy").add_attribute(Attribute::Bold),
        ]);

        let mut add_row = |label: &str, stats: Option<&AccuracyStats>| {
            if let Some(stats) = stats {
                table.add_row(vec![
                    Cell::new(label),
                    Cell::new(stats.correct.to_string()),
                    Cell::new(stats.total.to_string()),
                    Cell::new(format!("{:.1}%", stats.accuracy * 100.0)),
                ]);
            }
        };
        add_row("Overall", summary.overall.as_ref());
        add_row("'Should charge' days", summary.charge.as_ref());
        add_row("'Should not charge' days", summary.no_charge.as_ref());

        output.push_str(&table.to_string());
        output.push('\n');

        if !summary.mismatches.is_empty() {
            output.push_str(&format!(
                "\nSample incorrect decisions ({} of {}):\n",
                summary.mismatches.len().min(max_mismatches),
                summary.mismatches.len()
            ));
            for record in summary.mismatches.iter().take(max_mismatches) {
                let estimated = record
                    .estimated_kwh
                    .map_or_else(|| "-".to_owned(), |v| format!("{v:.1}"));
                output.push_str(&format!(
                    "  {}: forecast={} kWh, actual={:.1} kWh, said '{}', should have been '{}'\n",
                    record.date, estimated, record.actual_kwh, record.predicted, record.oracle
                ));
            }
        }

        output
    }

    /// Format a safety-factor sweep as a ranked table, best accuracy first.
    pub fn format_sweep(points: &[SweepPoint]) -> String {
        let mut ranked: Vec<&SweepPoint> = points.iter().collect();
        ranked.sort_by(|a, b| {
            let accuracy = |p: &SweepPoint| p.summary.overall.map_or(-1.0, |s| s.accuracy);
            accuracy(b).total_cmp(&accuracy(a))
        });

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            Cell::new("Safety factor").add_attribute(Attribute::Bold),
            Cell::new("Threshold\n(kWh)").add_attribute(Attribute::Bold),
            Cell::new("Scorable\ndays").add_attribute(Attribute::Bold),
            Cell::new("Overall").add_attribute(Attribute::Bold),
            Cell::new("Charge").add_attribute(Attribute::Bold),
            Cell::new("No-charge").add_attribute(Attribute::Bold),
        ]);

        for (rank, point) in ranked.iter().enumerate() {
            let factor_cell = if rank == 0 && point.summary.overall.is_some() {
                Cell::new(format!("{:.2}", point.safety_factor))
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold)
            } else {
                Cell::new(format!("{:.2}", point.safety_factor))
            };

            table.add_row(vec![
                factor_cell,
                Cell::new(format!("{:.2}", point.threshold_kwh)),
                Cell::new(point.summary.scorable_days.to_string()),
                Cell::new(Self::accuracy_cell(summary_stat(point, Stat::Overall))),
                Cell::new(Self::accuracy_cell(summary_stat(point, Stat::Charge))),
                Cell::new(Self::accuracy_cell(summary_stat(point, Stat::NoCharge))),
            ]);
        }

        let mut output = table.to_string();
        output.push_str("\nRanked by overall accuracy\n");
        output
    }

    fn accuracy_cell(stats: Option<AccuracyStats>) -> String {
        match stats {
            Some(stats) => format!(
                "{:.1}% ({}/{})",
                stats.accuracy * 100.0,
                stats.correct,
                stats.total
            ),
            None => "-".to_owned(),
        }
    }
}

enum Stat {
    Overall,
    Charge,
    NoCharge,
}

fn summary_stat(point: &SweepPoint, stat: Stat) -> Option<AccuracyStats> {
    match stat {
        Stat::Overall => point.summary.overall,
        Stat::Charge => point.summary.charge,
        Stat::NoCharge => point.summary.no_charge,
    }
}
