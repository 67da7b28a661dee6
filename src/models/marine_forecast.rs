use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MarineHourly {
    /// Naive local timestamps, ISO "2026-02-19T07:00" as returned by the API.
    pub time: Vec<String>,
    #[serde(default)]
    pub wave_height: Vec<Option<f64>>,
    #[serde(default)]
    pub wave_period: Vec<Option<f64>>,
}

/// Response of the Open-Meteo Marine API, reduced to the fields used here.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MarineForecast {
    pub hourly: MarineHourly,
}
