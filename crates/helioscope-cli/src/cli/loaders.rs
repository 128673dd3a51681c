// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Helioscope.

//! Data loaders for the two historical series the backtest consumes.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

use helioscope_types::{ProductionSeries, WeatherObservation, WeatherSeries};

/// Column names seen across inverter-cloud export variants
const DATE_COLUMNS: [&str; 3] = ["Date", "date", "Time"];
const PRODUCTION_COLUMNS: [&str; 3] = ["Daily Production (kWh)", "production", "Energy(kWh)"];

/// Load daily production from an inverter-cloud CSV export.
///
/// Rows with unparsable dates or values are skipped with a warning; a
/// duplicated date keeps the last occurrence. Only the file shape itself
/// (missing file, unrecognizable header) is an error.
pub fn load_production_csv(path: &Path) -> Result<ProductionSeries> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open production CSV: {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read CSV header: {}", path.display()))?
        .clone();

    let date_idx = find_column(&headers, &DATE_COLUMNS);
    let production_idx = find_column(&headers, &PRODUCTION_COLUMNS);
    let (Some(date_idx), Some(production_idx)) = (date_idx, production_idx) else {
        bail!(
            "unrecognized CSV header in {}: expected a date column ({}) and a production column ({})",
            path.display(),
            DATE_COLUMNS.join(", "),
            PRODUCTION_COLUMNS.join(", ")
        );
    };

    let mut series = ProductionSeries::new();
    for (row, record) in reader.records().enumerate() {
        let record = record
            .with_context(|| format!("Failed to read CSV row {} in {}", row + 1, path.display()))?;

        let date_field = record.get(date_idx).unwrap_or_default().trim();
        let production_field = record.get(production_idx).unwrap_or_default().trim();

        let Ok(date) = date_field.parse::<NaiveDate>() else {
            warn!("skipping CSV row {}: unparsable date {date_field:?}", row + 1);
            continue;
        };
        let Ok(value) = production_field.parse::<f64>() else {
            warn!(
                "skipping CSV row {}: unparsable production {production_field:?}",
                row + 1
            );
            continue;
        };

        series.insert(date, value);
    }

    Ok(series)
}

fn find_column(headers: &csv::StringRecord, candidates: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|header| candidates.contains(&header.trim()))
}

/// Open-Meteo archive response, reduced to the daily block the backtest
/// reads. Parallel arrays indexed by `time`; absent variables deserialize
/// as empty arrays, absent values as `None`.
#[derive(Debug, Deserialize)]
struct OpenMeteoArchive {
    #[serde(default)]
    daily: DailyBlock,
}

#[derive(Debug, Default, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    shortwave_radiation_sum: Vec<serde_json::Value>,
    #[serde(default)]
    cloud_cover_mean: Vec<serde_json::Value>,
    #[serde(default)]
    sunshine_duration: Vec<serde_json::Value>,
}

/// Load daily weather observations from an Open-Meteo archive JSON.
///
/// Sunshine duration arrives in seconds and is converted to hours here, so
/// the core only ever sees hours. Null values stay `None`.
pub fn load_weather_json(path: &Path) -> Result<WeatherSeries> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read weather file: {}", path.display()))?;

    let archive: OpenMeteoArchive = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse weather JSON: {}", path.display()))?;

    let daily = archive.daily;
    let mut series = WeatherSeries::with_capacity(daily.time.len());
    for (i, date_field) in daily.time.iter().enumerate() {
        let Ok(date) = date_field.parse::<NaiveDate>() else {
            warn!("skipping weather entry {i}: unparsable date {date_field:?}");
            continue;
        };

        // Nulls and malformed (non-numeric) entries both degrade to None.
        let value_at = |values: &[serde_json::Value]| values.get(i).and_then(serde_json::Value::as_f64);
        series.insert(
            date,
            WeatherObservation {
                shortwave_radiation_mj: value_at(&daily.shortwave_radiation_sum),
                cloud_cover_pct: value_at(&daily.cloud_cover_mean),
                sunshine_hours: value_at(&daily.sunshine_duration).map(|seconds| seconds / 3600.0),
            },
        );
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_production_csv_solis_headers() {
        let file = write_temp(
            "Date,Daily Production (kWh),Grid Feed-in (kWh)\n\
             2025-07-01,10.5,2.0\n\
             2025-07-02,18.2,6.1\n",
        );
        let series = load_production_csv(file.path()).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[&date("2025-07-01")], 10.5);
        assert_eq!(series[&date("2025-07-02")], 18.2);
    }

    #[test]
    fn test_production_csv_alternate_headers() {
        let file = write_temp("Time,Energy(kWh)\n2025-07-01,7.25\n");
        let series = load_production_csv(file.path()).unwrap();
        assert_eq!(series[&date("2025-07-01")], 7.25);
    }

    #[test]
    fn test_production_csv_skips_malformed_rows() {
        let file = write_temp(
            "date,production\n\
             2025-07-01,10.0\n\
             not-a-date,5.0\n\
             2025-07-03,n/a\n\
             2025-07-04,4.5\n",
        );
        let series = load_production_csv(file.path()).unwrap();
        assert_eq!(series.len(), 2);
        assert!(!series.contains_key(&date("2025-07-03")));
    }

    #[test]
    fn test_production_csv_duplicate_date_last_wins() {
        let file = write_temp(
            "date,production\n\
             2025-07-01,10.0\n\
             2025-07-01,12.5\n",
        );
        let series = load_production_csv(file.path()).unwrap();
        assert_eq!(series[&date("2025-07-01")], 12.5);
    }

    #[test]
    fn test_production_csv_unrecognized_header_fails() {
        let file = write_temp("foo,bar\n1,2\n");
        assert!(load_production_csv(file.path()).is_err());
    }

    #[test]
    fn test_weather_json_roundtrip() {
        let file = write_temp(
            r#"{
                "latitude": 50.78,
                "daily_units": {"shortwave_radiation_sum": "MJ/m²"},
                "daily": {
                    "time": ["2025-07-01", "2025-07-02"],
                    "shortwave_radiation_sum": [22.4, null],
                    "cloud_cover_mean": [31.0, 97.5],
                    "sunshine_duration": [41400.0, null]
                }
            }"#,
        );
        let series = load_weather_json(file.path()).unwrap();
        assert_eq!(series.len(), 2);

        let sunny = &series[&date("2025-07-01")];
        assert_eq!(sunny.shortwave_radiation_mj, Some(22.4));
        assert_eq!(sunny.cloud_cover_pct, Some(31.0));
        assert!((sunny.sunshine_hours.unwrap() - 11.5).abs() < 1e-9);

        // Nulls degrade to None, never to a substituted default.
        let overcast = &series[&date("2025-07-02")];
        assert_eq!(overcast.shortwave_radiation_mj, None);
        assert_eq!(overcast.sunshine_hours, None);
    }

    #[test]
    fn test_weather_json_missing_daily_block() {
        let file = write_temp(r#"{"latitude": 50.78}"#);
        let series = load_weather_json(file.path()).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_weather_json_malformed_numeric_degrades() {
        let file = write_temp(
            r#"{
                "daily": {
                    "time": ["2025-07-01"],
                    "shortwave_radiation_sum": ["n/a"],
                    "cloud_cover_mean": [42.0]
                }
            }"#,
        );
        let series = load_weather_json(file.path()).unwrap();
        let observation = &series[&date("2025-07-01")];
        assert_eq!(observation.shortwave_radiation_mj, None);
        assert_eq!(observation.cloud_cover_pct, Some(42.0));
    }

    #[test]
    fn test_weather_json_short_arrays() {
        // A truncated export must not panic; missing tail values are None.
        let file = write_temp(
            r#"{
                "daily": {
                    "time": ["2025-07-01", "2025-07-02"],
                    "shortwave_radiation_sum": [22.4]
                }
            }"#,
        );
        let series = load_weather_json(file.path()).unwrap();
        assert_eq!(series[&date("2025-07-02")].shortwave_radiation_mj, None);
    }
}
