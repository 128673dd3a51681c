// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Helioscope.

//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "helioscope")]
#[command(author, version, about = "Helioscope solar charging backtest CLI")]
#[command(
    long_about = "Backtests the overnight charge/no-charge heuristic against historical\n\
    PV production and weather data.\n\
    \nProduction comes from an inverter-cloud CSV export, weather from an\n\
    Open-Meteo archive JSON (fetchable with the fetch-weather subcommand).\n\
    \nExamples:\n  \
    helioscope run --production solis.csv --weather weather.json\n  \
    helioscope sweep --production solis.csv --weather weather.json --factors 0.6,0.8,1.0\n  \
    helioscope fetch-weather --start 2025-07-01 --end 2025-09-30"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a single backtest and report decision accuracy
    #[command(
        long_about = "Run one backtest: join the production and weather series by date,\n\
        reconstruct the rule's decision for each day, and score it against\n\
        perfect hindsight.\n\
        \nExamples:\n  \
        helioscope run --production solis.csv --weather weather.json\n  \
        helioscope run --production solis.csv --weather weather.json --safety-factor 0.9\n  \
        helioscope run --production solis.csv --weather weather.json --output json"
    )]
    Run(RunArgs),

    /// Sweep candidate safety factors and rank them by accuracy
    #[command(
        long_about = "Run the same backtest once per candidate safety factor and rank the\n\
        results by overall accuracy. Each run is independent.\n\
        \nExamples:\n  \
        helioscope sweep --production solis.csv --weather weather.json\n  \
        helioscope sweep --production solis.csv --weather weather.json --factors 0.5,0.8,1.1"
    )]
    Sweep(SweepArgs),

    /// Fetch historical weather from the Open-Meteo archive API
    #[command(
        long_about = "Download daily historical weather (radiation, cloud cover, sunshine\n\
        duration and friends) from archive-api.open-meteo.com and save the raw\n\
        JSON where the run/sweep subcommands can load it.\n\
        \nExamples:\n  \
        helioscope fetch-weather --start 2025-07-01\n  \
        helioscope fetch-weather --latitude 50.1 --longitude 14.4 --start 2025-07-01 --end 2025-09-30"
    )]
    FetchWeather(FetchWeatherArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Path to the production CSV export
    #[arg(
        long,
        value_name = "PATH",
        help = "Inverter-cloud CSV with per-day production",
        long_help = "CSV export with one row per day. Recognized columns:\n  \
          date: Date, date or Time\n  \
          production: Daily Production (kWh), production or Energy(kWh)\n\
          \nRows with unparsable values are skipped with a warning."
    )]
    pub production: PathBuf,

    /// Path to the Open-Meteo archive JSON
    #[arg(
        long,
        value_name = "PATH",
        help = "Open-Meteo daily archive JSON (see fetch-weather)"
    )]
    pub weather: PathBuf,

    /// Optional TOML file with battery/estimator parameters
    #[arg(
        long,
        value_name = "PATH",
        help = "TOML config file; CLI flags override its values"
    )]
    pub config: Option<PathBuf>,

    /// Usable battery capacity (kWh)
    #[arg(long, value_name = "KWH", help = "Override battery capacity")]
    pub battery_capacity: Option<f64>,

    /// Fraction of capacity the day's yield must cover
    #[arg(long, value_name = "FACTOR", help = "Override safety factor")]
    pub safety_factor: Option<f64>,

    /// Rated PV system capacity (kWp)
    #[arg(long, value_name = "KWP", help = "Override PV capacity")]
    pub pv_capacity: Option<f64>,

    /// Output format: table or json
    #[arg(long, default_value = "table",
          value_parser = ["table", "json"],
          help = "How to display results")]
    pub output: String,

    /// How many incorrect decisions to list in the table output
    #[arg(
        long,
        default_value_t = 5,
        help = "Sample size for the incorrect-decision listing"
    )]
    pub mismatches: usize,
}

#[derive(Parser)]
pub struct SweepArgs {
    /// Path to the production CSV export
    #[arg(long, value_name = "PATH", help = "Inverter-cloud CSV with per-day production")]
    pub production: PathBuf,

    /// Path to the Open-Meteo archive JSON
    #[arg(long, value_name = "PATH", help = "Open-Meteo daily archive JSON")]
    pub weather: PathBuf,

    /// Optional TOML file with battery/estimator parameters
    #[arg(long, value_name = "PATH", help = "TOML config file; CLI flags override its values")]
    pub config: Option<PathBuf>,

    /// Comma-separated safety factors to sweep
    #[arg(
        long,
        default_value = "0.6,0.7,0.8,0.9,1.0",
        help = "Candidate safety factors (comma-separated)"
    )]
    pub factors: String,

    /// Usable battery capacity (kWh)
    #[arg(long, value_name = "KWH", help = "Override battery capacity")]
    pub battery_capacity: Option<f64>,

    /// Rated PV system capacity (kWp)
    #[arg(long, value_name = "KWP", help = "Override PV capacity")]
    pub pv_capacity: Option<f64>,

    /// Output format: table or json
    #[arg(long, default_value = "table",
          value_parser = ["table", "json"],
          help = "How to display results")]
    pub output: String,
}

#[derive(Parser)]
pub struct FetchWeatherArgs {
    /// Site latitude (decimal degrees)
    #[arg(long, default_value_t = 50.78516, help = "Site latitude")]
    pub latitude: f64,

    /// Site longitude (decimal degrees)
    #[arg(long, default_value_t = 3.91139, help = "Site longitude")]
    pub longitude: f64,

    /// First day to fetch
    #[arg(long, value_name = "YYYY-MM-DD", help = "Start date (inclusive)")]
    pub start: String,

    /// Last day to fetch (defaults to today)
    #[arg(long, value_name = "YYYY-MM-DD", help = "End date (inclusive, default today)")]
    pub end: Option<String>,

    /// Output path for the raw JSON
    #[arg(
        long,
        value_name = "PATH",
        help = "Where to save the archive (default weather_<start>_<end>.json)"
    )]
    pub out: Option<PathBuf>,
}
