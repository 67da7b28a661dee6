use chrono::NaiveDate;
use serde::Serialize;
use crate::scoring::Verdict;

/// Aggregated fishing outlook for one calendar day.
///
/// Derived once per run from the scored hourly records sharing the date,
/// immutable after creation. Statistics are computed over known samples
/// only; a variable with no known samples yields None.
#[derive(Serialize, Clone, Debug)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub daily_score: f64,
    pub verdict: Verdict,
    pub best_window: String,
    pub limiting_factor: String,
    pub avg_wind_kts: Option<f64>,
    pub max_gust_kts: Option<f64>,
    pub wind_dir: Option<String>,
    pub wind_dir_arrow: String,
    pub wind_dir_fr: String,
    pub avg_wave_m: Option<f64>,
    pub avg_wave_period_s: Option<f64>,
    pub max_rain_mmh: Option<f64>,
    pub avg_temp_c: Option<f64>,
}

/// One 3-hour slot of a near-term day, same derived statistics as a
/// DailySummary but scoped to the rows of the slot.
#[derive(Serialize, Clone, Debug)]
pub struct WindowSummary {
    pub date: NaiveDate,
    pub slot: String,
    pub score: f64,
    pub verdict: Verdict,
    pub avg_wind_kts: Option<f64>,
    pub max_gust_kts: Option<f64>,
    pub wind_dir: Option<String>,
    pub wind_dir_arrow: String,
    pub avg_wave_m: Option<f64>,
    pub avg_period_s: Option<f64>,
    pub max_rain_mmh: Option<f64>,
}
