// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Helioscope.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Integration tests for the full backtest pipeline
//!
//! This tests the full flow: series -> BacktestEvaluator -> EvaluationRecords -> Summary -> sweep

use chrono::NaiveDate;
use helioscope_core::{BacktestEvaluator, Decision, summarize, sweep_safety_factors};
use helioscope_types::{
    BacktestConfig, BatteryConfig, ProductionSeries, WeatherObservation, WeatherSeries,
};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// Two weeks of alternating sunny/overcast days, with two gaps in the
/// weather export and one day of partial (radiation-free) weather.
fn fixture() -> (ProductionSeries, WeatherSeries) {
    let mut production = ProductionSeries::new();
    let mut weather = WeatherSeries::new();

    for day in 1..=14 {
        let date = NaiveDate::from_ymd_opt(2025, 7, day).unwrap();
        let sunny = day % 2 == 0;
        let actual_kwh = if sunny { 20.0 + day as f64 / 10.0 } else { 6.0 };
        production.insert(date, actual_kwh);

        match day {
            // Weather export gaps
            5 | 11 => {}
            // Exported row with the radiation column empty
            7 => {
                weather.insert(
                    date,
                    WeatherObservation {
                        shortwave_radiation_mj: None,
                        cloud_cover_pct: Some(96.0),
                        sunshine_hours: Some(0.4),
                    },
                );
            }
            _ => {
                // ~70 MJ/m² clears the default 12.288 kWh threshold,
                // ~15 MJ/m² stays well under it.
                let radiation = if sunny { 70.0 } else { 15.0 };
                weather.insert(date, WeatherObservation::from_radiation(radiation));
            }
        }
    }

    (production, weather)
}

#[test]
fn test_full_pipeline() {
    let (production, weather) = fixture();
    let evaluator = BacktestEvaluator::new(&BacktestConfig::default()).unwrap();

    let records = evaluator.evaluate(&production, &weather);
    assert_eq!(records.len(), 14);

    // Days 5, 7 and 11 have no usable signal.
    let unknown: Vec<_> = records
        .iter()
        .filter(|r| r.predicted == Decision::Unknown)
        .map(|r| r.date)
        .collect();
    assert_eq!(
        unknown,
        vec![date("2025-07-05"), date("2025-07-07"), date("2025-07-11")]
    );

    let summary = summarize(&records);
    assert_eq!(summary.total_days, 14);
    assert_eq!(summary.scorable_days, 11);
    assert_eq!(summary.skipped_days, 3);

    // The proxy tracks the sunny/overcast split exactly here, so every
    // scorable day is correct in both classes.
    let overall = summary.overall.unwrap();
    assert_eq!(overall.correct, 11);
    assert!((overall.accuracy - 1.0).abs() < 1e-9);
    assert!(summary.charge.is_some());
    assert!(summary.no_charge.is_some());
    assert!(summary.mismatches.is_empty());

    // Day 5 is a skipped day, so the range still starts at day 1.
    assert_eq!(summary.start_date, Some(date("2025-07-01")));
    assert_eq!(summary.end_date, Some(date("2025-07-14")));
}

#[test]
fn test_summary_serializes() {
    let (production, weather) = fixture();
    let evaluator = BacktestEvaluator::new(&BacktestConfig::default()).unwrap();
    let summary = summarize(&evaluator.evaluate(&production, &weather));

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["total_days"], 14);
    assert_eq!(json["start_date"], "2025-07-01");
    // Decisions serialize as snake_case strings.
    let record = &json["mismatches"];
    assert!(record.is_array());
}

#[test]
fn test_sweep_over_fixture() {
    let (production, weather) = fixture();
    let points = sweep_safety_factors(
        &production,
        &weather,
        &BacktestConfig::default(),
        &[0.5, 0.8, 1.2],
    )
    .unwrap();

    assert_eq!(points.len(), 3);
    for point in &points {
        assert_eq!(point.summary.total_days, 14);
        assert_eq!(point.summary.scorable_days, 11);
    }
}

#[test]
fn test_invalid_configuration_fails_fast() {
    let config = BacktestConfig {
        battery: BatteryConfig {
            capacity_kwh: f64::NAN,
            safety_factor: 0.8,
        },
        ..Default::default()
    };
    assert!(BacktestEvaluator::new(&config).is_err());
}
