use std::time::Duration;
use chrono::{Datelike, NaiveDate};
use log::info;
use ureq::Agent;
use crate::config::SpotParameters;
use crate::errors::WindguruError;
use crate::models::windguru_forecast::{WindguruForecast, WindguruRow};

const WIDGET_URL: &str = "http://micro.windguru.cz/";

/// The widget endpoint rejects non-browser clients
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Struct for managing forecasts published by the Windguru micro widget
pub struct Windguru {
    agent: Agent,
    spot_id: u32,
    model: String,
    variables: Vec<String>,
}

impl Windguru {
    /// Returns a Windguru struct ready for fetching forecasts for one spot
    ///
    /// # Arguments
    ///
    /// * 'spot' - spot parameters from the configuration
    pub fn new(spot: &SpotParameters) -> Windguru {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .build();

        let agent = config.into();

        Windguru {
            agent,
            spot_id: spot.id,
            model: spot.model.clone(),
            variables: spot.variables.clone(),
        }
    }

    /// Retrieves and parses the forecast table for the spot.
    ///
    /// The endpoint returns a plain-text table wrapped in a pre tag, not
    /// JSON, so the response is scanned line by line.
    pub fn get_forecast(&self) -> Result<WindguruForecast, WindguruError> {
        let variables = self.variables.join(",");

        let html = self.agent
            .get(WIDGET_URL)
            .query("s", &self.spot_id.to_string())
            .query("m", &self.model)
            .query("v", &variables)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Referer", "https://www.windguru.cz/")
            .call()?
            .body_mut()
            .read_to_string()?;

        let forecast = parse_widget(&html)?;
        info!(
            "windguru spot {} model {}: {} rows, columns {:?}",
            self.spot_id, self.model, forecast.rows.len(), forecast.columns
        );

        Ok(forecast)
    }
}

/// Parses the micro widget response into a WindguruForecast
///
/// # Arguments
///
/// * 'html' - the raw widget response
pub fn parse_widget(html: &str) -> Result<WindguruForecast, WindguruError> {
    let pre = extract_pre(html)?;

    let init_date = parse_init_date(pre)?;
    let tz_offset = parse_tz_offset(pre);
    let columns = parse_columns(pre)?;
    let rows = parse_rows(pre, &columns, init_date)?;

    Ok(WindguruForecast { init_date, tz_offset, columns, rows })
}

/// Returns the content of the pre tag holding the forecast table
fn extract_pre(html: &str) -> Result<&str, WindguruError> {
    let start = html.find("<pre>").ok_or(WindguruError("no pre tag in response".to_string()))?;
    let rest = &html[start + 5..];
    let end = rest.find("</pre>").ok_or(WindguruError("unterminated pre tag in response".to_string()))?;

    Ok(&rest[..end])
}

/// Extracts the model init date from a marker like "init: 2026-02-19 06 UTC"
fn parse_init_date(pre: &str) -> Result<NaiveDate, WindguruError> {
    let pos = pre.find("init:").ok_or(WindguruError("no model init date in response".to_string()))?;
    let tail = pre[pos + 5..].trim_start();
    let date_str: String = tail.chars().take(10).collect();

    NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|e| WindguruError(format!("malformed init date '{}': {}", date_str, e)))
}

/// Extracts the UTC offset from a marker like "(UTC+1)", default 1
fn parse_tz_offset(pre: &str) -> i32 {
    let Some(pos) = pre.find("(UTC") else { return 1 };
    let tail = &pre[pos + 4..];
    let Some(end) = tail.find(')') else { return 1 };

    tail[..end].parse::<i32>().unwrap_or(1)
}

/// Extracts the column names from the header line, "Date" excluded
fn parse_columns(pre: &str) -> Result<Vec<String>, WindguruError> {
    for line in pre.lines() {
        if line.contains("Date") && line.contains("WSPD") {
            let columns = line
                .split_whitespace()
                .filter(|c| *c != "Date")
                .map(|c| c.to_string())
                .collect::<Vec<String>>();
            return Ok(columns);
        }
    }

    Err(WindguruError("no column header in response".to_string()))
}

/// Parses the data lines, e.g. " Thu 19. 07h      34      43     WNW      11       -"
///
/// Month and year are not part of the table; they start from the model
/// init date and roll over whenever the day number decreases.
fn parse_rows(pre: &str, columns: &[String], init_date: NaiveDate) -> Result<Vec<WindguruRow>, WindguruError> {
    let mut rows: Vec<WindguruRow> = Vec::new();
    let mut year = init_date.year();
    let mut month = init_date.month();
    let mut last_day: u32 = 0;

    for line in pre.lines() {
        let Some((day, hour, values)) = split_data_line(line) else { continue };

        if last_day > 0 && day < last_day {
            month += 1;
            if month > 12 {
                month = 1;
                year += 1;
            }
        }
        last_day = day;

        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            log::warn!("skipping invalid date {}/{}/{}", day, month, year);
            continue;
        };
        let Some(date_time) = date.and_hms_opt(hour, 0, 0) else { continue };

        let mut row = WindguruRow {
            date_time,
            wspd: None,
            gust: None,
            wdirn: None,
            htsgw: None,
            perpw: None,
            tmp: None,
            apcp1: None,
        };

        for (column, value) in columns.iter().zip(values.iter()) {
            match column.as_str() {
                "WSPD" => row.wspd = numeric(value),
                "GUST" => row.gust = numeric(value),
                "WDIRN" => row.wdirn = textual(value),
                "HTSGW" => row.htsgw = numeric(value),
                "PERPW" => row.perpw = numeric(value),
                "TMP" => row.tmp = numeric(value),
                "APCP1" => row.apcp1 = numeric(value),
                _ => (),
            }
        }

        rows.push(row);
    }

    if rows.is_empty() {
        Err(WindguruError("no data rows in response".to_string()))
    } else {
        Ok(rows)
    }
}

/// Splits a data line into day number, hour and value tokens.
/// Returns None for lines that are not data lines.
fn split_data_line(line: &str) -> Option<(u32, u32, Vec<String>)> {
    let mut tokens = line.split_whitespace();

    let weekday = tokens.next()?;
    if weekday.len() != 3 || !weekday.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let day = tokens.next()?.strip_suffix('.')?.parse::<u32>().ok()?;
    let hour = tokens.next()?.strip_suffix('h')?.parse::<u32>().ok()?;
    let values = tokens.map(|t| t.to_string()).collect::<Vec<String>>();

    Some((day, hour, values))
}

/// Parses a numeric cell, "-" and 9999-style sentinels become None
fn numeric(value: &str) -> Option<f64> {
    if value == "-" {
        return None;
    }

    value.parse::<f64>().ok().filter(|v| v.abs() < 9999.0)
}

/// Parses a textual cell such as a wind direction, "-" becomes None
fn textual(value: &str) -> Option<String> {
    if value == "-" { None } else { Some(value.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDGET: &str = "<html><body><pre>Windguru forecast\n\
        \n\
        France - La Couarde,  lat: 46.19, lon: -1.42, alt: 1, SST: 11 C\n\
        \n\
        GFS 13 km (init: 2026-02-19 06 UTC)\n\
        \n\
                Date    WSPD    GUST   WDIRN   HTSGW   PERPW     TMP   APCP1\n\
             (UTC+1)   knots   knots    dir.       m       s       C   mm/1h\n\
        \n\
         Thu 19. 07h      34      43     WNW     1.2       8      11       -\n\
         Thu 19. 08h      34      43       W       -       -      11       0\n\
         Fri 20. 07h      12      18      NW     0.8       9      12     0.4\n\
        </pre></body></html>";

    #[test]
    fn parses_header_and_rows() {
        let forecast = parse_widget(WIDGET).unwrap();

        assert_eq!(forecast.init_date, NaiveDate::from_ymd_opt(2026, 2, 19).unwrap());
        assert_eq!(forecast.tz_offset, 1);
        assert_eq!(
            forecast.columns,
            vec!["WSPD", "GUST", "WDIRN", "HTSGW", "PERPW", "TMP", "APCP1"]
        );
        assert_eq!(forecast.rows.len(), 3);

        let first = &forecast.rows[0];
        assert_eq!(first.date_time.to_string(), "2026-02-19 07:00:00");
        assert_eq!(first.wspd, Some(34.0));
        assert_eq!(first.gust, Some(43.0));
        assert_eq!(first.wdirn.as_deref(), Some("WNW"));
        assert_eq!(first.htsgw, Some(1.2));
        assert_eq!(first.perpw, Some(8.0));
        assert_eq!(first.apcp1, None);
    }

    #[test]
    fn dash_cells_become_unknown() {
        let forecast = parse_widget(WIDGET).unwrap();
        let second = &forecast.rows[1];
        assert_eq!(second.htsgw, None);
        assert_eq!(second.perpw, None);
        assert_eq!(second.apcp1, Some(0.0));
    }

    #[test]
    fn sentinel_values_become_unknown() {
        assert_eq!(numeric("9999"), None);
        assert_eq!(numeric("-9999"), None);
        assert_eq!(numeric("0"), Some(0.0));
        assert_eq!(numeric("NW"), None);
    }

    #[test]
    fn month_rollover_when_day_number_decreases() {
        let widget = "<pre>GFS 13 km (init: 2026-02-27 06 UTC)\n\
                Date    WSPD    GUST   WDIRN     TMP   APCP1\n\
             (UTC+1)   knots   knots    dir.       C   mm/1h\n\
         Sat 28. 07h      10      15       W      11       0\n\
         Sun 01. 07h      12      18      NW      12       0\n\
        </pre>";
        let forecast = parse_widget(widget).unwrap();

        assert_eq!(forecast.rows[0].date_time.date(), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
        assert_eq!(forecast.rows[1].date_time.date(), NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    }

    #[test]
    fn missing_wave_columns_leave_unknowns() {
        let widget = "<pre>GFS 13 km (init: 2026-02-19 06 UTC)\n\
                Date    WSPD    GUST   WDIRN     TMP   APCP1\n\
             (UTC+1)   knots   knots    dir.       C   mm/1h\n\
         Thu 19. 07h      10      15       W      11       0\n\
        </pre>";
        let forecast = parse_widget(widget).unwrap();
        assert_eq!(forecast.rows[0].htsgw, None);
        assert_eq!(forecast.rows[0].perpw, None);
    }

    #[test]
    fn response_without_pre_is_an_error() {
        assert!(parse_widget("<html>maintenance</html>").is_err());
    }

    #[test]
    fn negative_utc_offset() {
        let widget = "<pre>GFS 13 km (init: 2026-02-19 06 UTC)\n\
                Date    WSPD    GUST   WDIRN     TMP   APCP1\n\
             (UTC-4)   knots   knots    dir.       C   mm/1h\n\
         Thu 19. 07h      10      15       W      11       0\n\
        </pre>";
        assert_eq!(parse_widget(widget).unwrap().tz_offset, -4);
    }
}
