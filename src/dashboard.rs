//! Dashboard controller
//!
//! Owns the city list, the selection, the forecast rows and the error line.
//! The controller never performs I/O: operations that need a provider return
//! a request describing the call, and the caller feeds the outcome back
//! through the matching `apply_*` method.

use tracing::{debug, info, warn};

use crate::data::{default_cities, find_city, City, ForecastRow, GeoMatch, GeocodingError, WeatherError};
use crate::fetch::FetchMessage;

/// Error shown when a forecast fetch fails for any reason
pub const WEATHER_ERROR_MESSAGE: &str = "Failed to load weather data.";

/// Error shown when the geocoding request itself fails
pub const CITY_LOOKUP_ERROR_MESSAGE: &str = "Error fetching city data.";

/// Error shown when geocoding returns no match for `query`
pub fn city_not_found_message(query: &str) -> String {
    format!("Could not find weather for \"{}\"", query)
}

/// A forecast fetch tagged with the city it was issued for
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub city: City,
}

impl ForecastRequest {
    pub fn lat(&self) -> f64 {
        self.city.lat
    }

    pub fn lon(&self) -> f64 {
        self.city.lon
    }
}

/// All dashboard state
///
/// The city list is never empty and `selected` always indexes into it.
#[derive(Debug, Clone)]
pub struct Dashboard {
    cities: Vec<City>,
    selected: usize,
    input: String,
    rows: Vec<ForecastRow>,
    error: Option<String>,
    loading: bool,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    /// Creates a dashboard seeded with the default cities, first one selected
    pub fn new() -> Self {
        Self {
            cities: default_cities(),
            selected: 0,
            input: String::new(),
            rows: Vec::new(),
            error: None,
            loading: false,
        }
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_city(&self) -> &City {
        &self.cities[self.selected]
    }

    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a forecast for the selected city is still outstanding
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push_input(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_input(&mut self) {
        self.input.pop();
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Issues a forecast request for the current selection
    ///
    /// Used for the initial load and for manual refreshes.
    pub fn reload(&mut self) -> ForecastRequest {
        self.loading = true;
        let city = self.selected_city().clone();
        info!(city = %city.name, "Requesting forecast");
        ForecastRequest { city }
    }

    /// Selects the city at `index` and returns the forecast request for it
    ///
    /// Returns `None` when the index is out of range or the city is already
    /// selected; neither changes any state.
    pub fn select_city(&mut self, index: usize) -> Option<ForecastRequest> {
        if index >= self.cities.len() || index == self.selected {
            return None;
        }
        self.selected = index;
        Some(self.reload())
    }

    /// Applies the outcome of a forecast fetch
    ///
    /// Results for a city that is no longer selected are dropped. On success
    /// the rows are replaced and the error cleared; on failure the previous
    /// rows stay and the fixed weather error is shown.
    ///
    /// Returns whether the result was applied.
    pub fn apply_forecast(
        &mut self,
        request: &ForecastRequest,
        result: Result<Vec<ForecastRow>, WeatherError>,
    ) -> bool {
        if request.city.name != self.selected_city().name {
            debug!(
                city = %request.city.name,
                selected = %self.selected_city().name,
                "Discarding forecast for a city that is no longer selected"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(rows) => {
                info!(city = %request.city.name, rows = rows.len(), "Forecast loaded");
                self.rows = rows;
                self.error = None;
            }
            Err(e) => {
                warn!(city = %request.city.name, error = %e, "Forecast fetch failed");
                self.error = Some(WEATHER_ERROR_MESSAGE.to_string());
            }
        }
        true
    }

    /// Returns the pending input as a lookup query
    ///
    /// Blank input is not submitted. The text is returned as typed, without
    /// trimming, so error messages echo exactly what the user entered.
    pub fn submit_input(&self) -> Option<String> {
        if self.input.trim().is_empty() {
            return None;
        }
        Some(self.input.clone())
    }

    /// Applies the outcome of a city lookup for `query`
    ///
    /// A match whose resolved name is new is appended and selected, and the
    /// forecast request for it is returned. A match whose resolved name is
    /// already listed changes nothing.
    pub fn apply_city_lookup(
        &mut self,
        query: &str,
        result: Result<Option<GeoMatch>, GeocodingError>,
    ) -> Option<ForecastRequest> {
        match result {
            Ok(Some(found)) => {
                if find_city(&self.cities, &found.name).is_some() {
                    debug!(query, resolved = %found.name, "City already listed");
                    return None;
                }
                info!(query, resolved = %found.name, "Adding city");
                self.cities.push(found.into_city());
                self.select_city(self.cities.len() - 1)
            }
            Ok(None) => {
                info!(query, "No geocoding match");
                self.error = Some(city_not_found_message(query));
                None
            }
            Err(e) => {
                warn!(query, error = %e, "City lookup failed");
                self.error = Some(CITY_LOOKUP_ERROR_MESSAGE.to_string());
                None
            }
        }
    }

    /// Routes a fetch result to the matching `apply_*` method
    ///
    /// Returns a follow-up forecast request when the message added a city.
    pub fn handle_message(&mut self, message: FetchMessage) -> Option<ForecastRequest> {
        match message {
            FetchMessage::ForecastLoaded { request, result } => {
                self.apply_forecast(&request, result);
                None
            }
            FetchMessage::CityLookedUp { query, result } => self.apply_city_lookup(&query, result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(labels: &[(&str, f64)]) -> Vec<ForecastRow> {
        labels
            .iter()
            .map(|(time, temperature)| ForecastRow {
                time: time.to_string(),
                temperature: *temperature,
            })
            .collect()
    }

    fn weather_failure() -> WeatherError {
        WeatherError::MissingField("hourly".to_string())
    }

    fn lookup_failure() -> GeocodingError {
        serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into()
    }

    fn geo(name: &str, latitude: f64, longitude: f64) -> GeoMatch {
        GeoMatch {
            name: name.to_string(),
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_initial_state() {
        let dashboard = Dashboard::new();

        assert_eq!(dashboard.selected_index(), 0);
        assert_eq!(dashboard.selected_city().name, "Austin");
        assert_eq!(dashboard.cities().len(), 3);
        assert!(dashboard.error().is_none());
        assert!(dashboard.rows().is_empty());
        assert!(dashboard.input().is_empty());
        assert!(!dashboard.is_loading());
    }

    #[test]
    fn test_reload_requests_selected_city() {
        let mut dashboard = Dashboard::new();

        let request = dashboard.reload();

        assert_eq!(request.city.name, "Austin");
        assert!((request.lat() - 30.2672).abs() < 0.0001);
        assert!((request.lon() - (-97.7431)).abs() < 0.0001);
        assert!(dashboard.is_loading());
    }

    #[test]
    fn test_select_city_returns_request() {
        let mut dashboard = Dashboard::new();

        let request = dashboard.select_city(2).expect("Expected a forecast request");

        assert_eq!(request.city.name, "Houston");
        assert_eq!(dashboard.selected_city().name, "Houston");
        assert!(dashboard.is_loading());
    }

    #[test]
    fn test_select_city_out_of_range() {
        let mut dashboard = Dashboard::new();

        assert!(dashboard.select_city(3).is_none());
        assert_eq!(dashboard.selected_index(), 0);
        assert!(!dashboard.is_loading());
    }

    #[test]
    fn test_select_already_selected_city_does_not_refetch() {
        let mut dashboard = Dashboard::new();
        dashboard.select_city(1);

        assert!(dashboard.select_city(1).is_none());
        assert_eq!(dashboard.selected_index(), 1);
    }

    #[test]
    fn test_successful_forecast_replaces_rows() {
        let mut dashboard = Dashboard::new();
        let request = dashboard.reload();

        let applied = dashboard.apply_forecast(&request, Ok(rows(&[("1:00 PM", 31.2), ("2:00 PM", 32.0)])));

        assert!(applied);
        assert_eq!(dashboard.rows().len(), 2);
        assert_eq!(dashboard.rows()[0].time, "1:00 PM");
        assert!(!dashboard.is_loading());

        let request = dashboard.reload();
        dashboard.apply_forecast(&request, Ok(rows(&[("1:00 PM", 29.0)])));
        assert_eq!(dashboard.rows(), rows(&[("1:00 PM", 29.0)]).as_slice());
    }

    #[test]
    fn test_failed_forecast_keeps_previous_rows() {
        let mut dashboard = Dashboard::new();
        let request = dashboard.reload();
        dashboard.apply_forecast(&request, Ok(rows(&[("1:00 PM", 31.2)])));

        let request = dashboard.reload();
        let applied = dashboard.apply_forecast(&request, Err(weather_failure()));

        assert!(applied);
        assert_eq!(dashboard.rows(), rows(&[("1:00 PM", 31.2)]).as_slice());
        assert_eq!(dashboard.error(), Some("Failed to load weather data."));
        assert!(!dashboard.is_loading());
    }

    #[test]
    fn test_successful_forecast_clears_error() {
        let mut dashboard = Dashboard::new();
        let request = dashboard.reload();
        dashboard.apply_forecast(&request, Err(weather_failure()));
        assert!(dashboard.error().is_some());

        let request = dashboard.select_city(1).unwrap();
        dashboard.apply_forecast(&request, Ok(Vec::new()));

        assert!(dashboard.error().is_none());
    }

    #[test]
    fn test_successful_forecast_clears_lookup_error() {
        let mut dashboard = Dashboard::new();
        dashboard.apply_city_lookup("Atlantis", Ok(None));

        let request = dashboard.select_city(2).unwrap();
        dashboard.apply_forecast(&request, Ok(rows(&[("1:00 PM", 30.0)])));

        assert!(dashboard.error().is_none());
    }

    #[test]
    fn test_stale_forecast_is_discarded() {
        let mut dashboard = Dashboard::new();
        let austin = dashboard.reload();
        let dallas = dashboard.select_city(1).unwrap();

        dashboard.apply_forecast(&dallas, Ok(rows(&[("1:00 PM", 33.0)])));
        let applied = dashboard.apply_forecast(&austin, Ok(rows(&[("1:00 PM", 1.0)])));

        assert!(!applied);
        assert_eq!(dashboard.rows(), rows(&[("1:00 PM", 33.0)]).as_slice());
    }

    #[test]
    fn test_stale_forecast_failure_does_not_set_error() {
        let mut dashboard = Dashboard::new();
        let austin = dashboard.reload();
        dashboard.select_city(1);

        dashboard.apply_forecast(&austin, Err(weather_failure()));

        assert!(dashboard.error().is_none());
        assert!(dashboard.is_loading());
    }

    #[test]
    fn test_submit_input() {
        let mut dashboard = Dashboard::new();
        assert!(dashboard.submit_input().is_none());

        dashboard.set_input("   ");
        assert!(dashboard.submit_input().is_none());

        dashboard.set_input("");
        for c in "El Paso ".chars() {
            dashboard.push_input(c);
        }
        assert_eq!(dashboard.submit_input().as_deref(), Some("El Paso "));

        dashboard.pop_input();
        assert_eq!(dashboard.input(), "El Paso");
    }

    #[test]
    fn test_add_new_city_appends_and_selects() {
        let mut dashboard = Dashboard::new();

        let request = dashboard
            .apply_city_lookup("san antonio", Ok(Some(geo("San Antonio", 29.42412, -98.49363))))
            .expect("Expected a forecast request for the new city");

        assert_eq!(dashboard.cities().len(), 4);
        assert_eq!(dashboard.cities()[3], City::new("San Antonio", 29.42412, -98.49363));
        assert_eq!(dashboard.selected_index(), 3);
        assert_eq!(request.city.name, "San Antonio");
        assert!(dashboard.is_loading());
    }

    #[test]
    fn test_add_existing_resolved_name_is_noop() {
        let mut dashboard = Dashboard::new();
        dashboard.select_city(1);

        let request = dashboard.apply_city_lookup("houston tx", Ok(Some(geo("Houston", 29.76328, -95.36327))));

        assert!(request.is_none());
        assert_eq!(dashboard.cities().len(), 3);
        assert_eq!(dashboard.selected_city().name, "Dallas");
        assert!((dashboard.cities()[2].lat - 29.7604).abs() < 0.0001);
    }

    #[test]
    fn test_add_existing_name_keeps_error() {
        let mut dashboard = Dashboard::new();
        dashboard.apply_city_lookup("xyz", Ok(None));

        dashboard.apply_city_lookup("austin", Ok(Some(geo("Austin", 30.26715, -97.74306))));

        assert_eq!(dashboard.error(), Some("Could not find weather for \"xyz\""));
    }

    #[test]
    fn test_dedup_uses_resolved_name_not_input() {
        let mut dashboard = Dashboard::new();

        // Input matches an existing city but resolves to a different place
        let request = dashboard.apply_city_lookup("Austin", Ok(Some(geo("Austintown", 41.10172, -80.76452))));

        assert!(request.is_some());
        assert_eq!(dashboard.cities().len(), 4);
        assert_eq!(dashboard.selected_city().name, "Austintown");
    }

    #[test]
    fn test_add_city_without_match_sets_error() {
        let mut dashboard = Dashboard::new();

        let request = dashboard.apply_city_lookup("Qwertyville", Ok(None));

        assert!(request.is_none());
        assert_eq!(dashboard.error(), Some("Could not find weather for \"Qwertyville\""));
        assert_eq!(dashboard.cities().len(), 3);
        assert_eq!(dashboard.selected_index(), 0);
    }

    #[test]
    fn test_add_city_lookup_failure_sets_error() {
        let mut dashboard = Dashboard::new();
        let request = dashboard.reload();
        dashboard.apply_forecast(&request, Ok(rows(&[("1:00 PM", 30.0)])));

        let follow_up = dashboard.apply_city_lookup("Denver", Err(lookup_failure()));

        assert!(follow_up.is_none());
        assert_eq!(dashboard.error(), Some("Error fetching city data."));
        assert_eq!(dashboard.cities().len(), 3);
        assert_eq!(dashboard.selected_index(), 0);
        assert_eq!(dashboard.rows().len(), 1);
    }

    #[test]
    fn test_handle_message_routes_forecast() {
        let mut dashboard = Dashboard::new();
        let request = dashboard.reload();

        let follow_up = dashboard.handle_message(FetchMessage::ForecastLoaded {
            request,
            result: Ok(rows(&[("1:00 PM", 30.0)])),
        });

        assert!(follow_up.is_none());
        assert_eq!(dashboard.rows().len(), 1);
    }

    #[test]
    fn test_handle_message_routes_city_lookup() {
        let mut dashboard = Dashboard::new();

        let follow_up = dashboard.handle_message(FetchMessage::CityLookedUp {
            query: "El Paso".to_string(),
            result: Ok(Some(geo("El Paso", 31.75872, -106.48693))),
        });

        assert_eq!(follow_up.map(|r| r.city.name), Some("El Paso".to_string()));
    }

    #[test]
    fn test_city_not_found_message_echoes_raw_input() {
        assert_eq!(city_not_found_message(" lon don "), "Could not find weather for \" lon don \"");
    }
}
