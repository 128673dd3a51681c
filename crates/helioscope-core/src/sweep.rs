// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Helioscope.

use serde::{Deserialize, Serialize};
use tracing::info;

use helioscope_types::{BacktestConfig, ProductionSeries, Result, WeatherSeries};

use crate::evaluator::BacktestEvaluator;
use crate::report::{Summary, summarize};

/// Result of one backtest run within a sweep
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepPoint {
    pub safety_factor: f64,
    pub threshold_kwh: f64,
    pub summary: Summary,
}

/// Run the same backtest across candidate safety factors.
///
/// Each run gets a fresh evaluator and touches no shared state, so runs are
/// independent of each other (and safe to execute in parallel if a caller
/// ever needs to). Invalid factors abort the whole sweep up front - a sweep
/// over partly invalid configuration would not be comparable.
pub fn sweep_safety_factors(
    production: &ProductionSeries,
    weather: &WeatherSeries,
    base: &BacktestConfig,
    factors: &[f64],
) -> Result<Vec<SweepPoint>> {
    let mut points = Vec::with_capacity(factors.len());
    for &safety_factor in factors {
        let mut config = *base;
        config.battery.safety_factor = safety_factor;
        let evaluator = BacktestEvaluator::new(&config)?;
        let records = evaluator.evaluate(production, weather);
        let summary = summarize(&records);
        info!(
            safety_factor,
            threshold_kwh = config.battery.threshold_kwh(),
            scorable_days = summary.scorable_days,
            "sweep run complete"
        );
        points.push(SweepPoint {
            safety_factor,
            threshold_kwh: config.battery.threshold_kwh(),
            summary,
        });
    }
    Ok(points)
}
