// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Helioscope.

use helioscope_types::{EstimatorConfig, Result, WeatherObservation};

/// Coarse proxy for a real solar forecast provider.
///
/// Converts a day's shortwave radiation sum into an estimated PV yield via a
/// fixed linear chain: MJ/m² → kWh/m², scaled by rated system capacity and an
/// aggregate efficiency factor. Good enough to reconstruct what a
/// forecast-driven rule would have seen; not a production forecast.
#[derive(Debug, Clone, Copy)]
pub struct ForecastEstimator {
    config: EstimatorConfig,
}

impl ForecastEstimator {
    /// Fails fast on non-positive or non-finite coefficients.
    pub fn new(config: EstimatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimate the day's PV yield (kWh) from a raw weather observation.
    ///
    /// A missing observation or missing radiation field returns `None`,
    /// never a substituted default, which would silently fabricate a
    /// decision downstream.
    pub fn estimate(&self, weather: Option<&WeatherObservation>) -> Option<f64> {
        let radiation_mj = weather?.shortwave_radiation_mj?;
        let kwh_per_m2 = radiation_mj * self.config.mj_to_kwh;
        Some(kwh_per_m2 * self.config.pv_capacity_kwp * self.config.system_factor)
    }
}
