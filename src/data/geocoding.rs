//! Open-Meteo geocoding API client
//!
//! Resolves a free-text city name to a single best-match place with
//! coordinates.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::City;

/// Base URL for the Open-Meteo geocoding API
pub const GEOCODING_BASE_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Errors that can occur when looking up a city
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Best match returned by the geocoding API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeoMatch {
    /// Resolved place name; may differ from what the user typed
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoMatch {
    /// Convert the match into a dashboard city
    pub fn into_city(self) -> City {
        City::new(self.name, self.latitude, self.longitude)
    }
}

/// Client for the Open-Meteo geocoding API
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
}

impl Default for GeocodingClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodingClient {
    /// Create a new GeocodingClient with default settings
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Create a new GeocodingClient with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: GEOCODING_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different search endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The search endpoint requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up the single best match for `name`
    ///
    /// # Returns
    /// * `Ok(Some(GeoMatch))` - The first result
    /// * `Ok(None)` - The API returned no results
    /// * `Err(GeocodingError)` - If the request or parsing fails
    pub async fn search(&self, name: &str) -> Result<Option<GeoMatch>, GeocodingError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("name", name), ("count", "1")])
            .send()
            .await?;
        let text = response.text().await?;

        parse_search_response(&text)
    }
}

/// Extract the first result from a search response body
///
/// Open-Meteo omits `results` entirely when nothing matches, and answers bad
/// requests with an `{"error": true, ...}` object. Both count as no match.
fn parse_search_response(body: &str) -> Result<Option<GeoMatch>, GeocodingError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.results.and_then(|results| results.into_iter().next()))
}

/// Open-Meteo geocoding response structure
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<GeoMatch>>,
}
