use anyhow::{anyhow, bail, Result};
use chrono::{Local, NaiveDate};
use log::{error, info, warn};
use crate::aggregate::{compute_windows, daily_summaries, score_records, today_hourly};
use crate::config::Config;
use crate::initialization::Mgr;
use crate::models::marine_forecast::MarineForecast;
use crate::models::windguru_forecast::WindguruForecast;
use crate::normalize::normalize;

mod aggregate;
mod backup;
mod compass;
mod config;
mod errors;
mod initialization;
mod manager_mail;
mod manager_marine;
mod manager_windguru;
mod models;
mod normalize;
mod report;
mod scoring;

fn main() {
    let (config, mgr) = match initialization::init() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&config, &mgr) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Runs the daily pipeline: acquire feeds, normalize, score, aggregate,
/// report, mail, prune the cache
///
/// # Arguments
///
/// * 'config' - the full configuration
/// * 'mgr' - the external collaborator managers
fn run(config: &Config, mgr: &Mgr) -> Result<()> {
    let today = Local::now().date_naive();
    info!("=== Kayak Fishing Forecast — {} ===", today);
    info!(
        "spot: {} (id {}, model {})",
        config.spot.name, config.spot.id, config.spot.model
    );

    let (windguru, marine) = acquire_feeds(config, mgr, today)?;

    let records = normalize(&windguru, marine.as_ref(), &config.fishing);
    if records.is_empty() {
        bail!("no data left after normalization");
    }

    let scored = score_records(&records, &config.scoring);
    let summaries = daily_summaries(&scored, &config.scoring);
    if summaries.is_empty() {
        bail!("no daily summaries produced");
    }

    if let Some(summary) = summaries.iter().find(|s| s.date == today) {
        info!("today's score: {}/100 — {}", summary.daily_score, summary.verdict);
    }

    let todays = today_hourly(&scored, today);
    let windows = compute_windows(
        &scored,
        today,
        config.fishing.hours_start,
        config.fishing.windows_days,
        &config.scoring,
    );

    let subject = report::build_subject(&config.spot.name, today, &summaries);
    let body = report::build_report(&config.spot.name, today, &summaries, &todays, &windows);

    if config.general.send_mail {
        mgr.mail.send_mail(subject, body)?;
    } else {
        info!("mail sending disabled, report follows\n{}", body);
    }

    backup::prune(&config.files.raw_dir, today, config.files.keep_days)?;

    info!("pipeline finished");
    Ok(())
}

/// Returns the raw feeds, either freshly fetched and cached or replayed
/// from the cache in offline mode.
///
/// An unavailable marine feed is not fatal; wave values the Windguru model
/// does not carry then stay unknown and score neutral.
///
/// # Arguments
///
/// * 'config' - the full configuration
/// * 'mgr' - the external collaborator managers
/// * 'today' - the current local date
fn acquire_feeds(
    config: &Config,
    mgr: &Mgr,
    today: NaiveDate,
) -> Result<(WindguruForecast, Option<MarineForecast>)> {
    let raw_dir = &config.files.raw_dir;

    if config.general.offline {
        info!("offline mode, replaying cached feeds");
        let windguru: WindguruForecast = backup::load_raw(raw_dir, "windguru", today)?
            .ok_or(anyhow!("no cached windguru payload for {}", today))?;
        let marine: Option<MarineForecast> = backup::load_raw(raw_dir, "marine", today)?;

        return Ok((windguru, marine));
    }

    let windguru = mgr.windguru.get_forecast()?;
    backup::save_raw(raw_dir, "windguru", today, &windguru)?;

    let marine = match mgr.marine.get_forecast(config.fishing.forecast_days) {
        Ok(m) => {
            backup::save_raw(raw_dir, "marine", today, &m)?;
            Some(m)
        }
        Err(e) => {
            warn!("marine feed unavailable: {}", e);
            None
        }
    };

    Ok((windguru, marine))
}
