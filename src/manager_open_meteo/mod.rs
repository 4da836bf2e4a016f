pub mod errors;

use std::time::Duration;
use log::{debug, info};
use ureq::Agent;
use crate::config::OpenMeteoParameters;
use crate::manager_open_meteo::errors::OpenMeteoError;
use crate::models::open_meteo_forecast::ForecastResponse;

/// Struct for fetching hourly weather forecasts from Open-Meteo
pub struct OpenMeteo {
    agent: Agent,
    base_url: String,
    hourly: Vec<String>,
    timezone: String,
}

impl OpenMeteo {
    /// Returns an OpenMeteo struct ready for fetching forecasts
    ///
    /// # Arguments
    ///
    /// * 'params' - endpoint, requested hourly variables, timezone and request timeout
    pub fn new(params: &OpenMeteoParameters) -> OpenMeteo {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(params.timeout_secs)))
            .build();

        let agent = config.into();

        Self {
            agent,
            base_url: params.base_url.clone(),
            hourly: params.hourly.clone(),
            timezone: params.timezone.clone(),
        }
    }

    /// Retrieves the hourly forecast for the given point.
    ///
    /// Any non-2xx status is reported as a network error, and the body is only decoded
    /// once it has been read in full, which also releases the connection.
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude for the point to get forecasts for
    /// * 'long' - longitude for the point to get forecasts for
    pub fn get_forecast(&self, lat: f64, long: f64) -> Result<ForecastResponse, OpenMeteoError> {
        let url = self.forecast_url(lat, long);
        debug!("requesting forecast: {}", url);

        let json = self.agent
            .get(&url)
            .call()?
            .body_mut()
            .read_to_string()?;

        let forecast: ForecastResponse = serde_json::from_str(&json)?;

        let hours = forecast.hourly.as_ref()
            .and_then(|h| h.get("time"))
            .map_or(0, |t| t.len());
        info!("received forecast for lat {}, long {} with {} hours", lat, long, hours);

        Ok(forecast)
    }

    /// Builds the forecast request url
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude for the point
    /// * 'long' - longitude for the point
    fn forecast_url(&self, lat: f64, long: f64) -> String {
        format!("{}?latitude={}&longitude={}&hourly={}&timezone={}",
                self.base_url, lat, long, self.hourly.join(","), self.timezone)
    }
}
