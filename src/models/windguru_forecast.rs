use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One data line of the Windguru widget table, timestamps still naive local.
/// A `-` or a 9999-style sentinel in the source table becomes None.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WindguruRow {
    pub date_time: NaiveDateTime,
    pub wspd: Option<f64>,
    pub gust: Option<f64>,
    pub wdirn: Option<String>,
    pub htsgw: Option<f64>,
    pub perpw: Option<f64>,
    pub tmp: Option<f64>,
    pub apcp1: Option<f64>,
}

/// Parsed result of one micro.windguru.cz widget response.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WindguruForecast {
    pub init_date: NaiveDate,
    /// UTC offset of the table timestamps in whole hours, from the
    /// `(UTC+1)` marker in the header.
    pub tz_offset: i32,
    pub columns: Vec<String>,
    pub rows: Vec<WindguruRow>,
}
