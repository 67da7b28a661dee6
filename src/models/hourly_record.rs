use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;

/// One normalized forecast timestep for the spot.
///
/// Timestamps are local to the spot with an explicit UTC offset. Missing
/// physical quantities are None, never a sentinel number; the scoring layer
/// turns None into a neutral score rather than a zero.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct HourlyRecord {
    pub date_time: DateTime<FixedOffset>,
    pub wind_kts: Option<f64>,
    pub gust_kts: Option<f64>,
    pub wind_dir: Option<String>,
    pub wave_height_m: Option<f64>,
    pub wave_period_s: Option<f64>,
    pub temp_c: Option<f64>,
    pub rain_mmh: Option<f64>,
}

impl HourlyRecord {
    pub fn date(&self) -> NaiveDate {
        self.date_time.date_naive()
    }

    pub fn hour(&self) -> u32 {
        use chrono::Timelike;
        self.date_time.hour()
    }
}

/// An HourlyRecord together with its composite fishing score (0-100, one
/// decimal) and the verdict derived from the configured thresholds.
#[derive(Serialize, Clone, Debug)]
pub struct ScoredHourlyRecord {
    pub record: HourlyRecord,
    pub score: f64,
    pub verdict: crate::scoring::Verdict,
}

impl ScoredHourlyRecord {
    pub fn date(&self) -> NaiveDate {
        self.record.date()
    }

    pub fn hour(&self) -> u32 {
        self.record.hour()
    }
}
