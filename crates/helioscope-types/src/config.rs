// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Helioscope.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ensure_positive_finite};

// ============= Battery Configuration =============

/// Battery parameters that define the charge/no-charge threshold
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BatteryConfig {
    /// Usable battery capacity (kWh)
    #[serde(default = "default_battery_capacity_kwh")]
    pub capacity_kwh: f64,
    /// Fraction of capacity the day's production must cover to skip grid charging
    #[serde(default = "default_safety_factor")]
    pub safety_factor: f64,
}

fn default_battery_capacity_kwh() -> f64 {
    15.36
}
fn default_safety_factor() -> f64 {
    0.8
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            capacity_kwh: 15.36,
            safety_factor: 0.8,
        }
    }
}

impl BatteryConfig {
    /// Energy level (kWh) below which the policy decides to charge
    pub fn threshold_kwh(&self) -> f64 {
        self.capacity_kwh * self.safety_factor
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive_finite("battery_capacity_kwh", self.capacity_kwh)?;
        ensure_positive_finite("safety_factor", self.safety_factor)?;
        Ok(())
    }
}

// ============= Estimator Configuration =============

/// Coefficients of the radiation-to-yield proxy estimator.
///
/// The proxy stands in for a real forecast provider; its coefficients are
/// configuration, not derived physics. Backtest accuracy is sensitive to
/// them, so every one is overridable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EstimatorConfig {
    /// Rated PV system capacity (kWp)
    #[serde(default = "default_pv_capacity_kwp")]
    pub pv_capacity_kwp: f64,
    /// Unit conversion from MJ/m²/day to kWh/m²/day
    #[serde(default = "default_mj_to_kwh")]
    pub mj_to_kwh: f64,
    /// Aggregate factor covering panel efficiency and system losses
    #[serde(default = "default_system_factor")]
    pub system_factor: f64,
}

fn default_pv_capacity_kwp() -> f64 {
    7.04
}
fn default_mj_to_kwh() -> f64 {
    0.2778
}
fn default_system_factor() -> f64 {
    0.15
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            pv_capacity_kwp: 7.04,
            mj_to_kwh: 0.2778,
            system_factor: 0.15,
        }
    }
}

impl EstimatorConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_positive_finite("pv_capacity_kwp", self.pv_capacity_kwp)?;
        ensure_positive_finite("mj_to_kwh", self.mj_to_kwh)?;
        ensure_positive_finite("system_factor", self.system_factor)?;
        Ok(())
    }
}

// ============= Backtest Configuration =============

/// Complete configuration for one backtest run
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct BacktestConfig {
    #[serde(default)]
    pub battery: BatteryConfig,
    #[serde(default)]
    pub estimator: EstimatorConfig,
}

impl BacktestConfig {
    pub fn validate(&self) -> Result<()> {
        self.battery.validate()?;
        self.estimator.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold() {
        let battery = BatteryConfig::default();
        assert!((battery.threshold_kwh() - 12.288).abs() < 1e-9);
    }

    #[test]
    fn test_default_config_validates() {
        assert!(BacktestConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_battery_rejected() {
        let config = BacktestConfig {
            battery: BatteryConfig {
                capacity_kwh: 0.0,
                safety_factor: 0.8,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_estimator_rejected() {
        let config = BacktestConfig {
            estimator: EstimatorConfig {
                system_factor: f64::NAN,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
