// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Helioscope.

//! Subcommand orchestration: load series, run the core, format results.

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, Utc};
use serde_json::json;
use tracing::{info, warn};

use helioscope_core::{BacktestEvaluator, summarize, sweep_safety_factors};
use helioscope_types::BacktestConfig;

use crate::cli::args::{FetchWeatherArgs, RunArgs, SweepArgs};
use crate::cli::config::load_config;
use crate::cli::formatters::TableFormatter;
use crate::cli::loaders::{load_production_csv, load_weather_json};
use crate::fetch::OpenMeteoClient;

pub fn run(args: &RunArgs) -> Result<()> {
    let mut config = resolve_config(args.config.as_deref())?;
    if let Some(capacity) = args.battery_capacity {
        config.battery.capacity_kwh = capacity;
    }
    if let Some(factor) = args.safety_factor {
        config.battery.safety_factor = factor;
    }
    if let Some(pv_capacity) = args.pv_capacity {
        config.estimator.pv_capacity_kwp = pv_capacity;
    }

    let evaluator = BacktestEvaluator::new(&config)?;
    let (production, weather) = load_series(args)?;

    let records = evaluator.evaluate(&production, &weather);
    let summary = summarize(&records);

    if args.output == "json" {
        let payload = json!({
            "summary": summary,
            "records": records,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!(
            "{}",
            TableFormatter::format_summary(&summary, &config.battery, args.mismatches)
        );
    }
    Ok(())
}

pub fn sweep(args: &SweepArgs) -> Result<()> {
    let mut config = resolve_config(args.config.as_deref())?;
    if let Some(capacity) = args.battery_capacity {
        config.battery.capacity_kwh = capacity;
    }
    if let Some(pv_capacity) = args.pv_capacity {
        config.estimator.pv_capacity_kwp = pv_capacity;
    }

    let factors = parse_factors(&args.factors)?;

    let production = load_production_csv(&args.production)?;
    let weather = load_weather_json(&args.weather)?;
    if production.is_empty() {
        warn!("production series is empty, nothing to sweep");
    }

    let points = sweep_safety_factors(&production, &weather, &config, &factors)?;

    if args.output == "json" {
        println!("{}", serde_json::to_string_pretty(&points)?);
    } else {
        println!("{}", TableFormatter::format_sweep(&points));
    }
    Ok(())
}

pub async fn fetch_weather(args: &FetchWeatherArgs) -> Result<()> {
    let start: NaiveDate = args
        .start
        .parse()
        .with_context(|| format!("invalid --start date: {}", args.start))?;
    let end: NaiveDate = match &args.end {
        Some(end) => end
            .parse()
            .with_context(|| format!("invalid --end date: {end}"))?,
        None => Utc::now().date_naive(),
    };
    if end < start {
        bail!("--end {end} is before --start {start}");
    }

    let client = OpenMeteoClient::new()?;
    let archive = client
        .fetch_daily(args.latitude, args.longitude, start, end)
        .await?;

    let out = args
        .out
        .clone()
        .unwrap_or_else(|| format!("weather_{start}_{end}.json").into());
    std::fs::write(&out, serde_json::to_string_pretty(&archive)?)
        .with_context(|| format!("Failed to write {}", out.display()))?;

    let days = archive["daily"]["time"].as_array().map_or(0, Vec::len);
    info!("💾 Saved {} days of weather to {}", days, out.display());
    Ok(())
}

fn resolve_config(path: Option<&std::path::Path>) -> Result<BacktestConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(BacktestConfig::default()),
    }
}

fn load_series(
    args: &RunArgs,
) -> Result<(helioscope_types::ProductionSeries, helioscope_types::WeatherSeries)> {
    let production = load_production_csv(&args.production)?;
    if production.is_empty() {
        warn!(
            "no production rows loaded from {}",
            args.production.display()
        );
    }
    let weather = load_weather_json(&args.weather)?;
    info!(
        "loaded {} production days and {} weather days",
        production.len(),
        weather.len()
    );
    Ok((production, weather))
}

fn parse_factors(raw: &str) -> Result<Vec<f64>> {
    let factors = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .with_context(|| format!("invalid safety factor: {s:?}"))
        })
        .collect::<Result<Vec<f64>>>()?;
    if factors.is_empty() {
        bail!("--factors must list at least one safety factor");
    }
    Ok(factors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_factors() {
        assert_eq!(parse_factors("0.6,0.8, 1.0").unwrap(), vec![0.6, 0.8, 1.0]);
    }

    #[test]
    fn test_parse_factors_rejects_garbage() {
        assert!(parse_factors("0.6,fast").is_err());
        assert!(parse_factors("").is_err());
    }
}
