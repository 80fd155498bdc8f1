pub mod errors;
pub mod models;

use std::time::Duration;
use log::info;
use reqwest::Client;
use crate::manager_owm::errors::OWMError;
use crate::manager_owm::models::{ForecastEntry, FullForecast, Location};


/// Struct for fetching weather forecasts from OpenWeatherMap
pub struct OWM {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OWM {
    /// Returns an OWM struct ready for fetching forecasts
    ///
    /// # Arguments
    ///
    /// * 'base_url' - api root, i.e. https://api.openweathermap.org/data/2.5
    /// * 'api_key' - OpenWeatherMap app id
    pub fn new(base_url: &str, api_key: &str) -> Result<OWM, OWMError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Retrieves the 5 day / 3 hour forecast for the given location.
    /// Entries are returned as delivered, no filtering on time is done here.
    ///
    /// # Arguments
    ///
    /// * 'location' - city name or coordinates to get a forecast for
    pub async fn forecast(&self, location: &Location) -> Result<Vec<ForecastEntry>, OWMError> {
        let url = format!("{}/forecast", self.base_url);

        let mut query: Vec<(&str, String)> = vec![
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
        ];
        match location {
            Location::City(name) => query.push(("q", name.clone())),
            Location::Coordinates { lat, lon } => {
                query.push(("lat", format!("{:0.4}", lat)));
                query.push(("lon", format!("{:0.4}", lon)));
            }
        }

        info!("fetching forecast for {}", location);

        let req = self.client
            .get(url)
            .query(&query)
            .send().await?;

        let status = req.status();
        if !status.is_success() {
            return Err(OWMError::Service(format!("Error while fetching forecast from OpenWeatherMap: {}", status)));
        }

        let json = req.text().await?;
        let forecast: FullForecast = serde_json::from_str(&json)?;

        Ok(forecast.list)
    }
}
