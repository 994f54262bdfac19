//! Open-Meteo forecast API client
//!
//! This module fetches hourly temperatures from the Open-Meteo API and turns
//! them into the rows shown in the forecast table.

use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::ForecastRow;

/// Base URL for the Open-Meteo API
pub const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Index of the first hourly entry shown in the table
pub const FORECAST_WINDOW_START: usize = 13;

/// Number of hourly entries shown in the table
pub const FORECAST_WINDOW_LEN: usize = 12;

/// Errors that can occur when fetching weather data
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing expected field in response
    #[error("Missing expected field in response: {0}")]
    MissingField(String),

    /// Invalid time format in response
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),
}

/// Client for fetching forecasts from the Open-Meteo API
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherClient {
    /// Create a new WeatherClient with default settings
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Create a new WeatherClient with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: OPEN_METEO_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different forecast endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The forecast endpoint requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the forecast rows for the given coordinates
    ///
    /// Requests hourly 2 m temperatures in the timezone Open-Meteo detects for
    /// the location, then keeps the fixed table window.
    ///
    /// # Arguments
    /// * `lat` - Latitude coordinate
    /// * `lon` - Longitude coordinate
    ///
    /// # Returns
    /// * `Ok(Vec<ForecastRow>)` - Up to 12 rows, fewer if the series is short
    /// * `Err(WeatherError)` - If the request or parsing fails
    pub async fn fetch_forecast(&self, lat: f64, lon: f64) -> Result<Vec<ForecastRow>, WeatherError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("hourly", "temperature_2m".to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;
        let text = response.text().await?;
        let api_response: ForecastResponse = serde_json::from_str(&text)?;

        forecast_rows(&api_response.hourly)
    }
}

/// Hourly series as returned by Open-Meteo
///
/// `time` and `temperature_2m` are index-aligned. Open-Meteo reports missing
/// values as `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct HourlyTemperatures {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
}

/// Build the table rows from an hourly series
///
/// Skips the first [`FORECAST_WINDOW_START`] entries and keeps the next
/// [`FORECAST_WINDOW_LEN`]. The window does not move with the current time.
/// A short series yields fewer rows rather than an error.
pub fn forecast_rows(hourly: &HourlyTemperatures) -> Result<Vec<ForecastRow>, WeatherError> {
    hourly
        .time
        .iter()
        .enumerate()
        .skip(FORECAST_WINDOW_START)
        .take(FORECAST_WINDOW_LEN)
        .map(|(i, time)| {
            let temperature = hourly
                .temperature_2m
                .get(i)
                .copied()
                .flatten()
                .ok_or_else(|| WeatherError::MissingField(format!("temperature_2m[{}]", i)))?;

            Ok(ForecastRow {
                time: format_hour(time)?,
                temperature,
            })
        })
        .collect()
}

/// Format an ISO 8601 local timestamp (e.g. "2024-07-15T13:00") as "1:00 PM"
pub fn format_hour(datetime_str: &str) -> Result<String, WeatherError> {
    let datetime = parse_datetime(datetime_str)?;
    Ok(datetime.format("%-I:%M %p").to_string())
}

/// Parse an Open-Meteo timestamp, with or without seconds
fn parse_datetime(datetime_str: &str) -> Result<NaiveDateTime, WeatherError> {
    NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| WeatherError::InvalidTimeFormat(datetime_str.to_string()))
}

/// Open-Meteo API response structure
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: HourlyTemperatures,
}
