// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Helioscope.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::FmtSubscriber;

use helioscope_cli::cli::{Cli, Commands, commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with env filter support
    // Respects RUST_LOG environment variable
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();
    match &cli.command {
        Commands::Run(args) => commands::run(args),
        Commands::Sweep(args) => commands::sweep(args),
        Commands::FetchWeather(args) => commands::fetch_weather(args).await,
    }
}
