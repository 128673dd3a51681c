// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Helioscope.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decision::Decision;
use crate::evaluator::EvaluationRecord;

/// Correct/total counts for one slice of the scorable set
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AccuracyStats {
    pub correct: usize,
    pub total: usize,
    pub accuracy: f64,
}

impl AccuracyStats {
    /// Returns `None` for an empty slice - a class with zero members is
    /// omitted, not reported as 0% or NaN.
    fn from_records<'a>(records: impl Iterator<Item = &'a EvaluationRecord>) -> Option<Self> {
        let mut correct = 0;
        let mut total = 0;
        for record in records {
            total += 1;
            if record.is_correct == Some(true) {
                correct += 1;
            }
        }
        if total == 0 {
            return None;
        }
        Some(Self {
            correct,
            total,
            accuracy: correct as f64 / total as f64,
        })
    }
}

/// Aggregate accuracy of one backtest run.
///
/// `overall` is `None` when no day was scorable ("insufficient data");
/// skipped days are counted explicitly so dropped days can never silently
/// inflate the accuracy figure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    /// Every production date, scorable or not
    pub total_days: usize,
    pub scorable_days: usize,
    /// Days excluded from scoring because the predicted decision was unknown
    pub skipped_days: usize,
    /// First/last date of the scorable set
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub overall: Option<AccuracyStats>,
    /// Accuracy on days the oracle said charge
    pub charge: Option<AccuracyStats>,
    /// Accuracy on days the oracle said no_charge
    pub no_charge: Option<AccuracyStats>,
    /// Every record where the rule disagreed with hindsight, in date order;
    /// consumers truncate for display
    pub mismatches: Vec<EvaluationRecord>,
}

impl Summary {
    /// True when no day carried a usable forecast signal
    pub fn is_insufficient(&self) -> bool {
        self.overall.is_none()
    }
}

/// Aggregate an ordered record sequence into accuracy statistics.
pub fn summarize(records: &[EvaluationRecord]) -> Summary {
    let scorable: Vec<&EvaluationRecord> = records.iter().filter(|r| r.is_scorable()).collect();

    let overall = AccuracyStats::from_records(scorable.iter().copied());
    let charge = AccuracyStats::from_records(
        scorable.iter().copied().filter(|r| r.oracle == Decision::Charge),
    );
    let no_charge = AccuracyStats::from_records(
        scorable.iter().copied().filter(|r| r.oracle == Decision::NoCharge),
    );

    let mismatches = scorable
        .iter()
        .filter(|r| r.is_correct == Some(false))
        .map(|r| (*r).clone())
        .collect();

    Summary {
        total_days: records.len(),
        scorable_days: scorable.len(),
        skipped_days: records.len() - scorable.len(),
        start_date: scorable.iter().map(|r| r.date).min(),
        end_date: scorable.iter().map(|r| r.date).max(),
        overall,
        charge,
        no_charge,
        mismatches,
    }
}
