use std::fs;
use std::path::Path;
use chrono::{NaiveDate, TimeDelta};
use glob::glob;
use log::{info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use crate::errors::BackupError;

/// Saves a raw feed payload to the cache so a run can be replayed offline
///
/// The file lands at '{raw_dir}{run_date}_{name}.json'; raw_dir is
/// expected to end with a separator.
///
/// # Arguments
///
/// * 'raw_dir' - the directory holding cached payloads
/// * 'name' - feed name, e.g. "windguru"
/// * 'run_date' - date of the pipeline run
/// * 'payload' - the payload to save
pub fn save_raw<T: Serialize>(
    raw_dir: &str,
    name: &str,
    run_date: NaiveDate,
    payload: &T,
) -> Result<(), BackupError> {
    fs::create_dir_all(raw_dir)?;

    let file_path = format!("{}{}_{}.json", raw_dir, run_date.format("%Y-%m-%d"), name);
    let json = serde_json::to_string_pretty(payload)?;
    fs::write(&file_path, json)?;
    info!("raw {} payload cached: {}", name, file_path);

    Ok(())
}

/// Loads a cached raw feed payload, None when there is no cache file for
/// the given date
///
/// # Arguments
///
/// * 'raw_dir' - the directory holding cached payloads
/// * 'name' - feed name, e.g. "windguru"
/// * 'run_date' - date of the pipeline run
pub fn load_raw<T: DeserializeOwned>(
    raw_dir: &str,
    name: &str,
    run_date: NaiveDate,
) -> Result<Option<T>, BackupError> {
    let file_path = format!("{}{}_{}.json", raw_dir, run_date.format("%Y-%m-%d"), name);

    if Path::new(&file_path).exists() {
        let json = fs::read_to_string(&file_path)?;
        let payload: T = serde_json::from_str(&json)?;
        info!("raw {} payload loaded from cache: {}", name, file_path);

        Ok(Some(payload))
    } else {
        Ok(None)
    }
}

/// Removes cache files older than keep_days, going by the date encoded in
/// the file name
///
/// # Arguments
///
/// * 'raw_dir' - the directory holding cached payloads
/// * 'today' - the current local date
/// * 'keep_days' - age limit in days
pub fn prune(raw_dir: &str, today: NaiveDate, keep_days: i64) -> Result<(), BackupError> {
    let pattern = format!("{}*.json", raw_dir);

    for entry in glob(&pattern)? {
        match entry {
            Ok(path) => {
                if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
                    if file_name.len() < 10 {
                        continue;
                    }
                    let Ok(date) = NaiveDate::parse_from_str(&file_name[0..10], "%Y-%m-%d") else {
                        continue;
                    };
                    if today - date > TimeDelta::days(keep_days) {
                        fs::remove_file(&path)?;
                        info!("pruned stale cache file {}", path.display());
                    }
                }
            }
            Err(e) => warn!("{:?}", e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::models::windguru_forecast::{WindguruForecast, WindguruRow};

    fn payload() -> WindguruForecast {
        WindguruForecast {
            init_date: NaiveDate::from_ymd_opt(2026, 2, 19).unwrap(),
            tz_offset: 1,
            columns: vec!["WSPD".to_string()],
            rows: vec![WindguruRow {
                date_time: NaiveDate::from_ymd_opt(2026, 2, 19).unwrap().and_hms_opt(7, 0, 0).unwrap(),
                wspd: Some(12.0),
                gust: None,
                wdirn: Some("W".to_string()),
                htsgw: None,
                perpw: None,
                tmp: Some(11.0),
                apcp1: None,
            }],
        }
    }

    #[test]
    fn cache_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let raw_dir = format!("{}/", dir.path().display());
        let date = NaiveDate::from_ymd_opt(2026, 2, 19).unwrap();

        save_raw(&raw_dir, "windguru", date, &payload()).unwrap();
        let loaded: Option<WindguruForecast> = load_raw(&raw_dir, "windguru", date).unwrap();

        let loaded = loaded.unwrap();
        assert_eq!(loaded.tz_offset, 1);
        assert_eq!(loaded.rows, payload().rows);
    }

    #[test]
    fn missing_cache_is_none_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let raw_dir = format!("{}/", dir.path().display());
        let date = NaiveDate::from_ymd_opt(2026, 2, 19).unwrap();

        let loaded: Option<WindguruForecast> = load_raw(&raw_dir, "windguru", date).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn prune_removes_only_stale_files() {
        let dir = tempfile::tempdir().unwrap();
        let raw_dir = format!("{}/", dir.path().display());
        let today = NaiveDate::from_ymd_opt(2026, 2, 19).unwrap();
        let old = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();

        save_raw(&raw_dir, "windguru", today, &payload()).unwrap();
        save_raw(&raw_dir, "windguru", old, &payload()).unwrap();

        prune(&raw_dir, today, 7).unwrap();

        let fresh: Option<WindguruForecast> = load_raw(&raw_dir, "windguru", today).unwrap();
        let stale: Option<WindguruForecast> = load_raw(&raw_dir, "windguru", old).unwrap();
        assert!(fresh.is_some());
        assert!(stale.is_none());
    }
}
