// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Helioscope.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily production in kWh, keyed by calendar date.
///
/// `BTreeMap` keeps iteration in chronological order; loaders deduplicate
/// dates before the series reaches the core.
pub type ProductionSeries = BTreeMap<NaiveDate, f64>;

/// Raw daily weather observations, keyed by calendar date. The weather
/// series may be sparser than production but never adds dates of its own.
pub type WeatherSeries = HashMap<NaiveDate, WeatherObservation>;

/// One day of raw weather signals from an Open-Meteo archive export.
///
/// Every field is optional: partially exported real-world data is the norm,
/// and a malformed or missing value degrades to `None` rather than failing
/// the run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct WeatherObservation {
    /// Shortwave radiation sum (MJ/m² per day) - the estimator's input
    pub shortwave_radiation_mj: Option<f64>,
    /// Mean cloud cover (%) - diagnostic only
    pub cloud_cover_pct: Option<f64>,
    /// Sunshine duration (hours) - diagnostic only
    pub sunshine_hours: Option<f64>,
}

impl WeatherObservation {
    pub fn from_radiation(shortwave_radiation_mj: f64) -> Self {
        Self {
            shortwave_radiation_mj: Some(shortwave_radiation_mj),
            ..Default::default()
        }
    }
}
