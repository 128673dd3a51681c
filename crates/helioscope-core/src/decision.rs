// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Helioscope.

use std::fmt;

use serde::{Deserialize, Serialize};

use helioscope_types::{BatteryConfig, Result, error::ensure_positive_finite};

/// Outcome of the charging policy for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Expected yield will not fill the battery - charge from the grid overnight
    Charge,
    /// Expected yield covers the battery - leave the grid alone
    NoCharge,
    /// No usable forecast signal for this day
    Unknown,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Decision::Charge => "charge",
            Decision::NoCharge => "no_charge",
            Decision::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// The charging policy: a single strictly-less-than comparison against a
/// fixed energy threshold.
///
/// Both the predicted and the oracle decision must go through this exact
/// function, so that accuracy measures forecast error only, never policy
/// divergence.
#[derive(Debug, Clone, Copy)]
pub struct DecisionModel {
    threshold_kwh: f64,
}

impl DecisionModel {
    /// Create a model with an explicit threshold. Fails fast on a
    /// non-positive or non-finite threshold, which would invalidate every
    /// decision downstream.
    pub fn new(threshold_kwh: f64) -> Result<Self> {
        ensure_positive_finite("threshold_kwh", threshold_kwh)?;
        Ok(Self { threshold_kwh })
    }

    /// Derive the threshold from battery parameters (capacity × safety factor)
    pub fn from_battery(battery: &BatteryConfig) -> Result<Self> {
        battery.validate()?;
        Self::new(battery.threshold_kwh())
    }

    pub fn threshold_kwh(&self) -> f64 {
        self.threshold_kwh
    }

    /// Apply the policy to an energy value in kWh.
    ///
    /// `None` maps to `Unknown`; a value exactly at the threshold is
    /// `NoCharge` (strict inequality). Pure and total.
    pub fn decide(&self, value_kwh: Option<f64>) -> Decision {
        match value_kwh {
            None => Decision::Unknown,
            Some(v) if v < self.threshold_kwh => Decision::Charge,
            Some(_) => Decision::NoCharge,
        }
    }
}
