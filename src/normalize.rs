use std::collections::HashMap;
use chrono::{FixedOffset, NaiveDateTime, TimeDelta};
use log::{info, warn};
use crate::config::FishingParameters;
use crate::models::hourly_record::HourlyRecord;
use crate::models::marine_forecast::MarineForecast;
use crate::models::windguru_forecast::WindguruForecast;

/// Builds the normalized hourly table from the raw feeds.
///
/// Windguru is the primary feed. Wave height and period come from its
/// HTSGW/PERPW columns when the model carries them, otherwise from the
/// marine feed matched on the naive local timestamp. Rows are restricted
/// to the fishing hours and the forecast horizon, sorted ascending and
/// deduplicated so timestamps are strictly increasing, first row kept.
///
/// # Arguments
///
/// * 'forecast' - parsed Windguru forecast
/// * 'marine' - parsed marine wave forecast, if available
/// * 'fishing' - fishing window parameters from the configuration
pub fn normalize(
    forecast: &WindguruForecast,
    marine: Option<&MarineForecast>,
    fishing: &FishingParameters,
) -> Vec<HourlyRecord> {
    let offset = FixedOffset::east_opt(forecast.tz_offset * 3600)
        .unwrap_or_else(|| FixedOffset::east_opt(0).unwrap());

    let waves = marine.map(marine_by_time).unwrap_or_default();

    let mut records: Vec<HourlyRecord> = Vec::with_capacity(forecast.rows.len());
    for row in &forecast.rows {
        let Some(date_time) = row.date_time.and_local_timezone(offset).single() else {
            warn!("dropping row with unmappable timestamp {}", row.date_time);
            continue;
        };

        let (marine_height, marine_period) = waves
            .get(&row.date_time)
            .copied()
            .unwrap_or((None, None));

        records.push(HourlyRecord {
            date_time,
            wind_kts: row.wspd,
            gust_kts: row.gust,
            wind_dir: row.wdirn.clone(),
            wave_height_m: row.htsgw.or(marine_height),
            wave_period_s: row.perpw.or(marine_period),
            temp_c: row.tmp,
            rain_mmh: row.apcp1,
        });
    }

    records.sort_by_key(|r| r.date_time);
    records.dedup_by_key(|r| r.date_time);

    // Fishing hours filter, then the forecast horizon from the first row
    records.retain(|r| (fishing.hours_start..=fishing.hours_end).contains(&r.hour()));
    if let Some(first) = records.first() {
        let cutoff = first.date_time + TimeDelta::days(fishing.forecast_days);
        records.retain(|r| r.date_time <= cutoff);
    }

    let days = records
        .iter()
        .map(|r| r.date())
        .collect::<std::collections::BTreeSet<_>>()
        .len();
    info!("normalized {} hourly records over {} days", records.len(), days);

    let missing_waves = records.iter().filter(|r| r.wave_height_m.is_none()).count();
    if missing_waves > 0 {
        warn!("{} records without wave height, wave scores will be neutral", missing_waves);
    }

    records
}

/// Indexes the marine hourly arrays by naive local timestamp
fn marine_by_time(marine: &MarineForecast) -> HashMap<NaiveDateTime, (Option<f64>, Option<f64>)> {
    let hourly = &marine.hourly;
    let mut by_time = HashMap::with_capacity(hourly.time.len());

    for (i, time) in hourly.time.iter().enumerate() {
        match NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M") {
            Ok(dt) => {
                let height = hourly.wave_height.get(i).copied().flatten();
                let period = hourly.wave_period.get(i).copied().flatten();
                by_time.insert(dt, (height, period));
            }
            Err(e) => warn!("skipping marine timestamp '{}': {}", time, e),
        }
    }

    by_time
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::models::marine_forecast::MarineHourly;
    use crate::models::windguru_forecast::WindguruRow;

    fn fishing() -> FishingParameters {
        FishingParameters {
            hours_start: 6,
            hours_end: 21,
            timezone: "+01:00".to_string(),
            forecast_days: 10,
            windows_days: 3,
        }
    }

    fn row(day: u32, hour: u32, htsgw: Option<f64>, perpw: Option<f64>) -> WindguruRow {
        WindguruRow {
            date_time: NaiveDate::from_ymd_opt(2026, 2, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            wspd: Some(12.0),
            gust: Some(18.0),
            wdirn: Some("WNW".to_string()),
            htsgw,
            perpw,
            tmp: Some(11.0),
            apcp1: None,
        }
    }

    fn forecast(rows: Vec<WindguruRow>) -> WindguruForecast {
        WindguruForecast {
            init_date: NaiveDate::from_ymd_opt(2026, 2, 19).unwrap(),
            tz_offset: 1,
            columns: vec!["WSPD".into(), "GUST".into(), "WDIRN".into(), "TMP".into(), "APCP1".into()],
            rows,
        }
    }

    fn marine(time: &str, height: f64, period: f64) -> MarineForecast {
        MarineForecast {
            hourly: MarineHourly {
                time: vec![time.to_string()],
                wave_height: vec![Some(height)],
                wave_period: vec![Some(period)],
            },
        }
    }

    #[test]
    fn fishing_hours_filter_and_offset() {
        let rows = vec![row(19, 5, None, None), row(19, 6, None, None), row(19, 22, None, None)];
        let records = normalize(&forecast(rows), None, &fishing());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].hour(), 6);
        assert_eq!(records[0].date_time.offset().local_minus_utc(), 3600);
        assert_eq!(records[0].wind_kts, Some(12.0));
    }

    #[test]
    fn marine_fills_only_missing_wave_values() {
        let rows = vec![row(19, 8, Some(0.9), None), row(19, 9, None, None)];
        let marine = MarineForecast {
            hourly: MarineHourly {
                time: vec!["2026-02-19T08:00".to_string(), "2026-02-19T09:00".to_string()],
                wave_height: vec![Some(0.5), Some(0.6)],
                wave_period: vec![Some(9.0), Some(10.0)],
            },
        };

        let records = normalize(&forecast(rows), Some(&marine), &fishing());

        // windguru height wins where present, marine completes the gaps
        assert_eq!(records[0].wave_height_m, Some(0.9));
        assert_eq!(records[0].wave_period_s, Some(9.0));
        assert_eq!(records[1].wave_height_m, Some(0.6));
        assert_eq!(records[1].wave_period_s, Some(10.0));
    }

    #[test]
    fn missing_marine_match_leaves_unknowns() {
        let rows = vec![row(19, 8, None, None)];
        let records = normalize(&forecast(rows), Some(&marine("2026-02-19T11:00", 0.5, 9.0)), &fishing());

        assert_eq!(records[0].wave_height_m, None);
        assert_eq!(records[0].wave_period_s, None);
    }

    #[test]
    fn duplicates_dropped_and_order_ascending() {
        let rows = vec![
            row(19, 9, None, None),
            row(19, 8, Some(0.7), None),
            row(19, 8, Some(1.6), None),
        ];
        let records = normalize(&forecast(rows), None, &fishing());

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].hour(), 8);
        // first occurrence after the sort is kept
        assert_eq!(records[0].wave_height_m, Some(0.7));
        assert!(records[0].date_time < records[1].date_time);
    }

    #[test]
    fn horizon_cutoff_from_first_record() {
        let mut rows: Vec<WindguruRow> = Vec::new();
        for day in 1..=14 {
            rows.push(row(day, 12, None, None));
        }
        let mut params = fishing();
        params.forecast_days = 3;

        let records = normalize(&forecast(rows), None, &params);

        // first row Feb 1 12h, cutoff Feb 4 12h inclusive
        assert_eq!(records.len(), 4);
        assert_eq!(records.last().unwrap().date(), NaiveDate::from_ymd_opt(2026, 2, 4).unwrap());
    }
}
