//! Background provider calls
//!
//! Runs forecast and geocoding requests as tokio tasks and hands their
//! results back to the UI loop over a channel, so input handling never waits
//! on the network.

use tokio::sync::mpsc;
use tracing::debug;

use crate::dashboard::ForecastRequest;
use crate::data::{ForecastRow, GeoMatch, GeocodingClient, GeocodingError, WeatherClient, WeatherError};

/// Messages sent from fetch tasks to the main loop
#[derive(Debug)]
pub enum FetchMessage {
    /// A forecast request finished
    ForecastLoaded {
        request: ForecastRequest,
        result: Result<Vec<ForecastRow>, WeatherError>,
    },
    /// A city lookup finished
    CityLookedUp {
        query: String,
        result: Result<Option<GeoMatch>, GeocodingError>,
    },
}

/// Handle for issuing provider calls and receiving their results
pub struct FetchHandle {
    /// Channel for receiving fetch results
    pub receiver: mpsc::UnboundedReceiver<FetchMessage>,
    sender: mpsc::UnboundedSender<FetchMessage>,
    weather_client: WeatherClient,
    geocoding_client: GeocodingClient,
}

impl FetchHandle {
    /// Creates a new FetchHandle using the given provider clients
    pub fn new(weather_client: WeatherClient, geocoding_client: GeocodingClient) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            receiver,
            sender,
            weather_client,
            geocoding_client,
        }
    }

    /// Spawns a forecast fetch for `request`
    ///
    /// Must be called from within a tokio runtime. Earlier fetches are not
    /// cancelled; their results still arrive and are filtered by the dashboard.
    pub fn load_forecast(&self, request: ForecastRequest) {
        let client = self.weather_client.clone();
        let tx = self.sender.clone();

        tokio::spawn(async move {
            debug!(city = %request.city.name, "Fetching forecast");
            let result = client.fetch_forecast(request.lat(), request.lon()).await;
            // The receiver only goes away on shutdown
            let _ = tx.send(FetchMessage::ForecastLoaded { request, result });
        });
    }

    /// Spawns a geocoding lookup for `query`
    pub fn lookup_city(&self, query: String) {
        let client = self.geocoding_client.clone();
        let tx = self.sender.clone();

        tokio::spawn(async move {
            debug!(query = %query, "Looking up city");
            let result = client.search(&query).await;
            let _ = tx.send(FetchMessage::CityLookedUp { query, result });
        });
    }

    /// Waits for the next fetch result
    pub async fn recv(&mut self) -> Option<FetchMessage> {
        self.receiver.recv().await
    }
}

/// Checks for a finished fetch without blocking
///
/// # Returns
/// * `Some(FetchMessage)` if a result was available
/// * `None` if nothing has finished yet
pub fn try_recv(handle: &mut FetchHandle) -> Option<FetchMessage> {
    handle.receiver.try_recv().ok()
}
