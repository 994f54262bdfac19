//! Command-line interface parsing for Weatherdash
//!
//! This module handles parsing of CLI arguments using clap and turns them
//! into a validated [`StartupConfig`].

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use reqwest::Url;
use thiserror::Error;

use crate::data::geocoding::GEOCODING_BASE_URL;
use crate::data::weather::OPEN_METEO_BASE_URL;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// A provider URL could not be parsed
    #[error("Invalid {name} URL '{value}': {reason}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// A zero timeout would fail every request
    #[error("Invalid timeout: must be at least 1 second")]
    InvalidTimeout,
}

/// Weatherdash - Hourly temperature forecasts in your terminal
#[derive(Parser, Debug)]
#[command(name = "weatherdash")]
#[command(about = "Hourly temperature forecasts for a short list of cities")]
#[command(version)]
pub struct Cli {
    /// Forecast API endpoint
    #[arg(long, value_name = "URL", env = "WEATHERDASH_WEATHER_URL", default_value = OPEN_METEO_BASE_URL)]
    pub weather_url: String,

    /// Geocoding API endpoint
    #[arg(long, value_name = "URL", env = "WEATHERDASH_GEOCODING_URL", default_value = GEOCODING_BASE_URL)]
    pub geocoding_url: String,

    /// Request timeout in seconds (no timeout when omitted)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Log file path (defaults to the platform data directory)
    #[arg(long, value_name = "PATH", env = "WEATHERDASH_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(long)]
    pub debug: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Forecast API endpoint
    pub weather_url: String,
    /// Geocoding API endpoint
    pub geocoding_url: String,
    /// Per-request timeout, if any
    pub timeout: Option<Duration>,
    /// Explicit log file path
    pub log_file: Option<PathBuf>,
    /// Whether debug logging is enabled
    pub debug: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            weather_url: OPEN_METEO_BASE_URL.to_string(),
            geocoding_url: GEOCODING_BASE_URL.to_string(),
            timeout: None,
            log_file: None,
            debug: false,
        }
    }
}

/// Checks that `value` is an absolute http(s) URL
///
/// # Returns
/// * `Ok(String)` with the URL unchanged
/// * `Err(CliError::InvalidUrl)` otherwise
pub fn parse_url_arg(name: &'static str, value: &str) -> Result<String, CliError> {
    let invalid = |reason: String| CliError::InvalidUrl {
        name,
        value: value.to_string(),
        reason,
    };

    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(value.to_string()),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with validated settings
    /// * `Err(CliError)` if a URL or the timeout is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let timeout = match cli.timeout {
            Some(0) => return Err(CliError::InvalidTimeout),
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        Ok(StartupConfig {
            weather_url: parse_url_arg("weather", &cli.weather_url)?,
            geocoding_url: parse_url_arg("geocoding", &cli.geocoding_url)?,
            timeout,
            log_file: cli.log_file.clone(),
            debug: cli.debug,
        })
    }

    /// Builds the shared HTTP client honouring the configured timeout
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}
