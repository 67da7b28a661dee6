use std::time::Duration;
use log::info;
use ureq::Agent;
use crate::errors::MarineError;
use crate::models::marine_forecast::MarineForecast;

const MARINE_API_URL: &str = "https://marine-api.open-meteo.com/v1/marine";

/// Struct for managing wave forecasts from the Open-Meteo Marine API.
/// Free, no authentication, hourly resolution up to 16 days.
pub struct Marine {
    agent: Agent,
    lat: f64,
    long: f64,
    timezone: String,
}

impl Marine {
    /// Returns a Marine struct ready for fetching wave forecasts
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude of the spot
    /// * 'long' - longitude of the spot
    /// * 'timezone' - timezone identifier passed through to the API
    pub fn new(lat: f64, long: f64, timezone: &str) -> Marine {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .build();

        let agent = config.into();

        Marine { agent, lat, long, timezone: timezone.to_string() }
    }

    /// Retrieves the wave forecast, significant height and dominant period
    /// per hour in the local timezone of the spot
    ///
    /// # Arguments
    ///
    /// * 'forecast_days' - number of days to request, clamped to 1-16
    pub fn get_forecast(&self, forecast_days: i64) -> Result<MarineForecast, MarineError> {
        let days = forecast_days.clamp(1, 16);

        let json = self.agent
            .get(MARINE_API_URL)
            .query("latitude", &format!("{:0.4}", self.lat))
            .query("longitude", &format!("{:0.4}", self.long))
            .query("hourly", "wave_height,wave_period")
            .query("timezone", &self.timezone)
            .query("forecast_days", &days.to_string())
            .call()?
            .body_mut()
            .read_to_string()?;

        let forecast: MarineForecast = serde_json::from_str(&json)?;

        if forecast.hourly.time.is_empty() {
            return Err(MarineError("response contains no hourly data".to_string()));
        }

        let known = forecast.hourly.wave_height.iter().filter(|h| h.is_some()).count();
        info!(
            "marine forecast: {} hourly slots, {} with wave height",
            forecast.hourly.time.len(), known
        );

        Ok(forecast)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::marine_forecast::MarineForecast;

    #[test]
    fn parses_the_api_document() {
        let json = r#"{
            "latitude": 46.25,
            "longitude": -1.5,
            "hourly_units": { "wave_height": "m", "wave_period": "s" },
            "hourly": {
                "time": ["2026-02-19T00:00", "2026-02-19T01:00"],
                "wave_height": [0.62, null],
                "wave_period": [8.4, 8.6]
            }
        }"#;

        let forecast: MarineForecast = serde_json::from_str(json).unwrap();
        assert_eq!(forecast.hourly.time.len(), 2);
        assert_eq!(forecast.hourly.wave_height[0], Some(0.62));
        assert_eq!(forecast.hourly.wave_height[1], None);
        assert_eq!(forecast.hourly.wave_period[1], Some(8.6));
    }
}
