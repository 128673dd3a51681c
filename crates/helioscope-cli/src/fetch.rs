// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Helioscope.

//! Open-Meteo historical archive client.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

const DEFAULT_BASE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Daily variables requested from the archive. The backtest only reads
/// radiation, cloud cover and sunshine duration; the rest ride along so a
/// saved archive stays useful for manual inspection.
const DAILY_VARIABLES: [&str; 11] = [
    "weather_code",
    "temperature_2m_max",
    "temperature_2m_min",
    "sunrise",
    "sunset",
    "daylight_duration",
    "sunshine_duration",
    "precipitation_sum",
    "rain_sum",
    "cloud_cover_mean",
    "shortwave_radiation_sum",
];

/// Client for the free Open-Meteo historical weather API
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    base_url: String,
    client: Client,
}

impl OpenMeteoClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at a different endpoint (tests use a local mock)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Fetch the daily archive for a location and inclusive date range,
    /// returned as the raw JSON document the weather loader understands.
    pub async fn fetch_daily(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Value> {
        info!("🌦️ Fetching weather archive {start} to {end} for {latitude:.4},{longitude:.4}");
        debug!("   URL: {}", self.base_url);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("start_date", start.to_string()),
                ("end_date", end.to_string()),
                ("daily", DAILY_VARIABLES.join(",")),
                ("timezone", "Europe/Brussels".to_owned()),
            ])
            .send()
            .await
            .context("Open-Meteo request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Open-Meteo returned {status}: {body}");
        }

        response
            .json::<Value>()
            .await
            .context("Failed to parse Open-Meteo response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_fetch_daily_builds_archive_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("latitude".into(), "50.78516".into()),
                Matcher::UrlEncoded("start_date".into(), "2025-07-01".into()),
                Matcher::UrlEncoded("end_date".into(), "2025-07-03".into()),
                Matcher::UrlEncoded("daily".into(), DAILY_VARIABLES.join(",")),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"daily": {"time": ["2025-07-01"], "shortwave_radiation_sum": [21.5]}}"#)
            .create_async()
            .await;

        let client = OpenMeteoClient::with_base_url(server.url()).unwrap();
        let archive = client
            .fetch_daily(50.78516, 3.91139, date("2025-07-01"), date("2025-07-03"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(archive["daily"]["shortwave_radiation_sum"][0], 21.5);
    }

    #[tokio::test]
    async fn test_fetch_daily_propagates_http_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"reason": "Invalid date range"}"#)
            .create_async()
            .await;

        let client = OpenMeteoClient::with_base_url(server.url()).unwrap();
        let result = client
            .fetch_daily(50.0, 3.9, date("2025-07-03"), date("2025-07-01"))
            .await;

        let message = result.unwrap_err().to_string();
        assert!(message.contains("400"));
    }
}
