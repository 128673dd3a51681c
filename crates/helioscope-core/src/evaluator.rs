// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Helioscope.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use helioscope_types::{BacktestConfig, ProductionSeries, Result, WeatherSeries};

use crate::decision::{Decision, DecisionModel};
use crate::estimator::ForecastEstimator;

/// One scored day of the backtest.
///
/// Both decisions and the correctness flag are computed once at construction
/// from `estimated_kwh`/`actual_kwh` and the shared threshold; the record is
/// immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationRecord {
    pub date: NaiveDate,
    /// Ground-truth production (kWh)
    pub actual_kwh: f64,
    /// Proxy-forecast yield (kWh); absent when the day had no usable weather signal
    pub estimated_kwh: Option<f64>,
    /// What the rule would have chosen in real time
    pub predicted: Decision,
    /// What perfect hindsight would have chosen
    pub oracle: Decision,
    /// `None` when the predicted decision is unknown (excluded from scoring)
    pub is_correct: Option<bool>,
}

impl EvaluationRecord {
    fn new(date: NaiveDate, actual_kwh: f64, estimated_kwh: Option<f64>, model: &DecisionModel) -> Self {
        let predicted = model.decide(estimated_kwh);
        let oracle = model.decide(Some(actual_kwh));
        let is_correct = match predicted {
            Decision::Unknown => None,
            Decision::Charge | Decision::NoCharge => Some(predicted == oracle),
        };
        Self {
            date,
            actual_kwh,
            estimated_kwh,
            predicted,
            oracle,
            is_correct,
        }
    }

    /// A record is scorable when the rule actually produced a decision
    pub fn is_scorable(&self) -> bool {
        self.predicted != Decision::Unknown
    }
}

/// Joins the production and weather series into one evaluation record per
/// production date.
///
/// Pure transformation: the evaluator holds only immutable configuration, so
/// repeated runs over identical inputs yield identical output and separate
/// evaluators can run in parallel without interference.
#[derive(Debug, Clone, Copy)]
pub struct BacktestEvaluator {
    model: DecisionModel,
    estimator: ForecastEstimator,
}

impl BacktestEvaluator {
    /// Validates the whole shared configuration up front; an invalid
    /// threshold or estimator coefficient aborts here rather than skewing
    /// every record.
    pub fn new(config: &BacktestConfig) -> Result<Self> {
        Ok(Self {
            model: DecisionModel::from_battery(&config.battery)?,
            estimator: ForecastEstimator::new(config.estimator)?,
        })
    }

    pub fn decision_model(&self) -> &DecisionModel {
        &self.model
    }

    /// Evaluate every production date against the weather series.
    ///
    /// Production keys are the authoritative date set - weather can be
    /// sparser but never adds dates. Days without a usable weather signal
    /// get an `Unknown` prediction instead of failing the run. Output is
    /// ordered by date ascending.
    pub fn evaluate(
        &self,
        production: &ProductionSeries,
        weather: &WeatherSeries,
    ) -> Vec<EvaluationRecord> {
        production
            .iter()
            .map(|(&date, &actual_kwh)| {
                let observation = weather.get(&date);
                let estimated_kwh = self.estimator.estimate(observation);
                if estimated_kwh.is_none() {
                    debug!("no usable weather signal for {date}, decision unknown");
                }
                EvaluationRecord::new(date, actual_kwh, estimated_kwh, &self.model)
            })
            .collect()
    }
}
