use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

#[derive(Deserialize, Clone)]
pub struct SpotParameters {
    pub name: String,
    pub id: u32,
    pub model: String,
    pub variables: Vec<String>,
    pub lat: f64,
    pub long: f64,
}

/// Weight coefficients for the composite score. Conceptually they sum to
/// 1.0 but that is not enforced; each key defaults individually.
#[derive(Deserialize, Clone, Debug)]
pub struct Weights {
    #[serde(default = "default_wind_weight")]
    pub wind: f64,
    #[serde(default = "default_gust_weight")]
    pub gust: f64,
    #[serde(default = "default_wave_height_weight")]
    pub wave_height: f64,
    #[serde(default = "default_wave_period_weight")]
    pub wave_period: f64,
    #[serde(default = "default_rain_weight")]
    pub rain: f64,
    #[serde(default = "default_temperature_weight")]
    pub temperature: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Weights {
            wind: default_wind_weight(),
            gust: default_gust_weight(),
            wave_height: default_wave_height_weight(),
            wave_period: default_wave_period_weight(),
            rain: default_rain_weight(),
            temperature: default_temperature_weight(),
        }
    }
}

fn default_wind_weight() -> f64 { 0.25 }
fn default_gust_weight() -> f64 { 0.20 }
fn default_wave_height_weight() -> f64 { 0.15 }
fn default_wave_period_weight() -> f64 { 0.20 }
fn default_rain_weight() -> f64 { 0.10 }
fn default_temperature_weight() -> f64 { 0.10 }

/// Verdict cut points, descending: excellent, favorable, moyen
#[derive(Deserialize, Clone, Debug)]
pub struct VerdictThresholds {
    #[serde(default = "default_excellent")]
    pub excellent: f64,
    #[serde(default = "default_favorable")]
    pub favorable: f64,
    #[serde(default = "default_moyen")]
    pub moyen: f64,
}

impl Default for VerdictThresholds {
    fn default() -> Self {
        VerdictThresholds {
            excellent: default_excellent(),
            favorable: default_favorable(),
            moyen: default_moyen(),
        }
    }
}

fn default_excellent() -> f64 { 70.0 }
fn default_favorable() -> f64 { 50.0 }
fn default_moyen() -> f64 { 30.0 }

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ScoringParameters {
    #[serde(default)]
    pub weights: Weights,
    #[serde(default)]
    pub verdicts: VerdictThresholds,
}

#[derive(Deserialize, Clone)]
pub struct FishingParameters {
    pub hours_start: u32,
    pub hours_end: u32,
    /// Fixed UTC offset of the spot, e.g. "+01:00", forwarded to the
    /// marine API as-is
    pub timezone: String,
    pub forecast_days: i64,
    /// Days covered by the 3-hour window table, starting tomorrow
    pub windows_days: u32,
}

#[derive(Deserialize, Clone)]
pub struct MailParameters {
    pub smtp_user: String,
    pub smtp_password: String,
    pub smtp_endpoint: String,
    pub from: String,
    pub to: String,
}

#[derive(Deserialize, Clone)]
pub struct Files {
    pub raw_dir: String,
    /// Raw cache files older than this many days are pruned
    pub keep_days: i64,
}

#[derive(Deserialize, Clone)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
    /// Replay the cached raw feeds instead of calling the APIs
    #[serde(default)]
    pub offline: bool,
    /// Set to false to render the report without sending it
    #[serde(default = "default_send_mail")]
    pub send_mail: bool,
}

fn default_send_mail() -> bool { true }

#[derive(Deserialize, Clone)]
pub struct Config {
    pub spot: SpotParameters,
    #[serde(default)]
    pub scoring: ScoringParameters,
    pub fishing: FishingParameters,
    pub mail: MailParameters,
    pub files: Files,
    pub general: General,
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&toml)?;

    Ok(config)
}
