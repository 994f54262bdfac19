//! Core data models for Weatherdash
//!
//! This module contains the data types shared by the dashboard controller,
//! the provider clients and the terminal UI.

pub mod city;
pub mod geocoding;
pub mod weather;

pub use city::{default_cities, find_city};
pub use geocoding::{GeoMatch, GeocodingClient, GeocodingError};
pub use weather::{WeatherClient, WeatherError};

use serde::{Deserialize, Serialize};

/// A city the dashboard can show a forecast for
///
/// `name` is the uniqueness key within the city list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// Display name, as seeded or as resolved by geocoding
    pub name: String,
    /// Latitude coordinate
    pub lat: f64,
    /// Longitude coordinate
    pub lon: f64,
}

impl City {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }
}

/// One row of the forecast table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    /// Local time on a 12-hour clock, e.g. "1:00 PM"
    pub time: String,
    /// Temperature exactly as reported by the provider
    pub temperature: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_creation() {
        let city = City::new("Austin", 30.2672, -97.7431);

        assert_eq!(city.name, "Austin");
        assert!((city.lat - 30.2672).abs() < 0.0001);
        assert!((city.lon - (-97.7431)).abs() < 0.0001);
    }

    #[test]
    fn test_city_equality_uses_all_fields() {
        let a = City::new("Paris", 48.85341, 2.3488);
        let b = City::new("Paris", 33.66094, -95.55551);

        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_forecast_row_serialization() {
        let row = ForecastRow {
            time: "1:00 PM".to_string(),
            temperature: 24.5,
        };

        let json = serde_json::to_string(&row).expect("Failed to serialize ForecastRow");
        assert!(json.contains("\"time\":\"1:00 PM\""));
        assert!(json.contains("\"temperature\":24.5"));
    }
}
