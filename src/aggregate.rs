use std::collections::BTreeMap;
use chrono::{NaiveDate, TimeDelta};
use crate::compass::{dominant_direction, wind_dir_arrow, wind_dir_fr};
use crate::config::ScoringParameters;
use crate::models::hourly_record::{HourlyRecord, ScoredHourlyRecord};
use crate::models::summary::{DailySummary, WindowSummary};
use crate::scoring::{
    get_verdict, round1, round2, score_gust, score_hour, score_rain, score_wave_height,
    score_wave_period, score_wind,
};

/// Scores every hourly record and attaches its per-hour verdict
///
/// The input is borrowed and left untouched; hour order is preserved.
///
/// # Arguments
///
/// * 'records' - normalized hourly records in ascending time order
/// * 'scoring' - weights and verdict thresholds from the configuration
pub fn score_records(records: &[HourlyRecord], scoring: &ScoringParameters) -> Vec<ScoredHourlyRecord> {
    records
        .iter()
        .map(|r| {
            let score = score_hour(r, &scoring.weights);
            ScoredHourlyRecord {
                record: r.clone(),
                score,
                verdict: get_verdict(score, &scoring.verdicts),
            }
        })
        .collect()
}

/// Builds one summary per calendar day, ordered ascending by date
///
/// # Arguments
///
/// * 'scored' - scored hourly records in ascending time order
/// * 'scoring' - weights and verdict thresholds from the configuration
pub fn daily_summaries(scored: &[ScoredHourlyRecord], scoring: &ScoringParameters) -> Vec<DailySummary> {
    group_by_date(scored)
        .into_iter()
        .map(|(date, rows)| aggregate_day(date, &rows, scoring))
        .collect()
}

/// Returns today's scored rows in input order, for the hourly outlook table
///
/// # Arguments
///
/// * 'scored' - scored hourly records
/// * 'today' - the current local date
pub fn today_hourly(scored: &[ScoredHourlyRecord], today: NaiveDate) -> Vec<ScoredHourlyRecord> {
    scored.iter().filter(|r| r.date() == today).cloned().collect()
}

/// Buckets the next days into 3-hour slots anchored at the start of the
/// fishing window.
///
/// Covers the days today+1 ..= today+n_days; a day without records is
/// skipped entirely, no empty slots are synthesized. Slot membership is
/// floor((hour - hours_start) / 3) so rows before the anchor still land
/// in a well-defined slot.
///
/// # Arguments
///
/// * 'scored' - scored hourly records in ascending time order
/// * 'today' - the current local date
/// * 'hours_start' - first hour of the fishing window
/// * 'n_days' - number of days starting tomorrow
/// * 'scoring' - weights and verdict thresholds from the configuration
pub fn compute_windows(
    scored: &[ScoredHourlyRecord],
    today: NaiveDate,
    hours_start: u32,
    n_days: u32,
    scoring: &ScoringParameters,
) -> Vec<WindowSummary> {
    let mut windows: Vec<WindowSummary> = Vec::new();

    for i in 1..=n_days as i64 {
        let day = today + TimeDelta::days(i);

        let mut slots: BTreeMap<i64, Vec<&ScoredHourlyRecord>> = BTreeMap::new();
        for row in scored.iter().filter(|r| r.date() == day) {
            let slot = (row.hour() as i64 - hours_start as i64).div_euclid(3);
            slots.entry(slot).or_default().push(row);
        }

        for rows in slots.values() {
            let first_hour = rows[0].hour();
            let last_hour = rows[rows.len() - 1].hour();
            let score = round1(mean(rows.iter().map(|r| r.score)));
            let dominant = dominant_direction(rows.iter().map(|r| r.record.wind_dir.as_deref()));

            windows.push(WindowSummary {
                date: day,
                slot: format!("{:02}h–{:02}h", first_hour, last_hour),
                score,
                verdict: get_verdict(score, &scoring.verdicts),
                avg_wind_kts: mean_known(rows.iter().map(|r| r.record.wind_kts)).map(round1),
                max_gust_kts: max_known(rows.iter().map(|r| r.record.gust_kts)).map(round1),
                wind_dir_arrow: wind_dir_arrow(dominant.as_deref()),
                wind_dir: dominant,
                avg_wave_m: mean_known(rows.iter().map(|r| r.record.wave_height_m)).map(round2),
                avg_period_s: mean_known(rows.iter().map(|r| r.record.wave_period_s)).map(round1),
                max_rain_mmh: max_known(rows.iter().map(|r| r.record.rain_mmh)).map(round1),
            });
        }
    }

    windows
}

/// Aggregates one day's rows into a DailySummary
///
/// # Arguments
///
/// * 'date' - the calendar day
/// * 'rows' - the day's scored rows in ascending hour order
/// * 'scoring' - weights and verdict thresholds from the configuration
fn aggregate_day(date: NaiveDate, rows: &[&ScoredHourlyRecord], scoring: &ScoringParameters) -> DailySummary {
    let daily_score = round1(mean(rows.iter().map(|r| r.score)));
    let dominant = dominant_direction(rows.iter().map(|r| r.record.wind_dir.as_deref()));

    DailySummary {
        date,
        daily_score,
        verdict: get_verdict(daily_score, &scoring.verdicts),
        best_window: best_window(rows),
        limiting_factor: limiting_factor(rows).to_string(),
        avg_wind_kts: mean_known(rows.iter().map(|r| r.record.wind_kts)).map(round1),
        max_gust_kts: max_known(rows.iter().map(|r| r.record.gust_kts)).map(round1),
        wind_dir_arrow: wind_dir_arrow(dominant.as_deref()),
        wind_dir_fr: wind_dir_fr(dominant.as_deref()),
        wind_dir: dominant,
        avg_wave_m: mean_known(rows.iter().map(|r| r.record.wave_height_m)).map(round2),
        avg_wave_period_s: mean_known(rows.iter().map(|r| r.record.wave_period_s)).map(round1),
        max_rain_mmh: max_known(rows.iter().map(|r| r.record.rain_mmh)).map(round1),
        avg_temp_c: mean_known(rows.iter().map(|r| r.record.temp_c)).map(round1),
    }
}

/// Finds the contiguous window of up to 3 rows with the best mean score.
///
/// The scan uses a strict comparison so the earliest maximum wins. A day
/// with fewer than two rows has no meaningful window and yields "–".
///
/// # Arguments
///
/// * 'rows' - the day's scored rows in ascending hour order
fn best_window(rows: &[&ScoredHourlyRecord]) -> String {
    if rows.len() < 2 {
        return "–".to_string();
    }

    let mut best_score = -1.0;
    let mut best_label = "–".to_string();

    for i in 0..rows.len() - 1 {
        let window = &rows[i..(i + 3).min(rows.len())];
        let avg = mean(window.iter().map(|r| r.score));
        if avg > best_score {
            best_score = avg;
            let start = window[0].hour();
            let end = window[window.len() - 1].hour();
            best_label = format!("{:02}h–{:02}h", start, end);
        }
    }

    best_label
}

/// Names the variable most responsible for the day's reduced score.
///
/// Each candidate is rescored from the day's mean raw value, not from the
/// mean of hourly scores, which can mask single-hour extremes; that is
/// accepted behavior. A variable with no known samples counts as 100 so it
/// is never picked, consistent with the neutral policy for missing data.
/// Temperature is not a candidate. Ties keep the first candidate in order.
///
/// # Arguments
///
/// * 'rows' - the day's scored rows
fn limiting_factor(rows: &[&ScoredHourlyRecord]) -> &'static str {
    let factors: [(&'static str, f64); 5] = [
        ("vent fort", rescore(mean_known(rows.iter().map(|r| r.record.wind_kts)), score_wind)),
        ("rafales", rescore(mean_known(rows.iter().map(|r| r.record.gust_kts)), score_gust)),
        ("vagues", rescore(mean_known(rows.iter().map(|r| r.record.wave_height_m)), score_wave_height)),
        ("houle courte", rescore(mean_known(rows.iter().map(|r| r.record.wave_period_s)), score_wave_period)),
        ("pluie", rescore(mean_known(rows.iter().map(|r| r.record.rain_mmh)), score_rain)),
    ];

    let mut worst = factors[0];
    for factor in &factors[1..] {
        if factor.1 < worst.1 {
            worst = *factor;
        }
    }

    worst.0
}

/// Scores a daily mean value, 100 when the whole day is unknown
fn rescore(mean_value: Option<f64>, scorer: fn(Option<f64>) -> f64) -> f64 {
    match mean_value {
        Some(v) => scorer(Some(v)),
        None => 100.0,
    }
}

/// Groups scored rows by date, preserving input order within each day
fn group_by_date(scored: &[ScoredHourlyRecord]) -> BTreeMap<NaiveDate, Vec<&ScoredHourlyRecord>> {
    let mut groups: BTreeMap<NaiveDate, Vec<&ScoredHourlyRecord>> = BTreeMap::new();
    for row in scored {
        groups.entry(row.date()).or_default().push(row);
    }

    groups
}

fn mean<I: Iterator<Item = f64>>(values: I) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }

    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Mean over the known samples, None when every sample is unknown
fn mean_known<I: Iterator<Item = Option<f64>>>(values: I) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values.flatten() {
        sum += v;
        count += 1;
    }

    if count == 0 { None } else { Some(sum / count as f64) }
}

/// Max over the known samples, None when every sample is unknown
fn max_known<I: Iterator<Item = Option<f64>>>(values: I) -> Option<f64> {
    values.flatten().fold(None, |acc: Option<f64>, v| {
        Some(acc.map_or(v, |a| a.max(v)))
    })
}
