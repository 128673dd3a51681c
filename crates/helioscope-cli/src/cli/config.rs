// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Helioscope.

//! TOML configuration file support for battery and estimator parameters.

use std::path::Path;

use anyhow::{Context, Result};

use helioscope_types::BacktestConfig;

/// Load a `BacktestConfig` from a TOML file. Missing sections and fields
/// fall back to their defaults, so a file can override a single parameter:
///
/// ```toml
/// [battery]
/// capacity_kwh = 15.36
/// safety_factor = 0.8
///
/// [estimator]
/// pv_capacity_kwp = 7.04
/// ```
pub fn load_config(path: &Path) -> Result<BacktestConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: BacktestConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}
