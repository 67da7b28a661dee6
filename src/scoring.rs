use std::fmt;
use std::fmt::Formatter;
use serde::Serialize;
use crate::config::{VerdictThresholds, Weights};
use crate::models::hourly_record::HourlyRecord;

/// Score returned for an unknown wind, gust, wave height or wave period
pub const NEUTRAL_WIND_WAVE: f64 = 50.0;

/// Score returned for an unknown temperature
pub const NEUTRAL_TEMP: f64 = 70.0;

/// Score returned for an unknown rain rate
pub const NEUTRAL_RAIN: f64 = 80.0;

/// Wave steepness (height over period) above which the sea is considered
/// short and cresting chop, regardless of the individual scores
pub const MAX_STEEPNESS: f64 = 0.18;

/// Score cap applied when an hour is flagged as blocking
pub const BLOCKING_CAP: f64 = 20.0;

// Per-variable control point curves, (input, score) pairs sorted by input.
// Tuning a curve means editing these tables, not the interpolation code.

/// Mean wind in knots. Ideal below 15 kts, hard floor at 35 kts.
pub const WIND_CURVE: &[(f64, f64)] = &[
    (0.0, 100.0),
    (10.0, 100.0),
    (15.0, 90.0),
    (20.0, 60.0),
    (25.0, 25.0),
    (30.0, 5.0),
    (35.0, 0.0),
];

/// Gusts in knots. Ideal below 12 kts, hard floor at 30 kts.
pub const GUST_CURVE: &[(f64, f64)] = &[
    (0.0, 100.0),
    (12.0, 100.0),
    (17.0, 85.0),
    (20.0, 55.0),
    (25.0, 15.0),
    (30.0, 0.0),
];

/// Significant wave height in meters. The curve is deliberately soft above
/// one meter since the period completes the picture through the steepness
/// rule in the blocking malus. Absolute limit at 2.0 m.
pub const WAVE_HEIGHT_CURVE: &[(f64, f64)] = &[
    (0.0, 100.0),
    (0.5, 100.0),
    (0.8, 75.0),
    (1.2, 40.0),
    (1.5, 10.0),
    (2.0, 0.0),
];

/// Dominant wave period in seconds. Inverted direction compared to the
/// other curves: long period means gentle swell, short period means
/// choppy, dangerous sea.
pub const WAVE_PERIOD_CURVE: &[(f64, f64)] = &[
    (3.0, 0.0),
    (6.0, 20.0),
    (8.0, 55.0),
    (10.0, 80.0),
    (12.0, 100.0),
    (20.0, 100.0),
];

/// Rain rate in mm/h. Ideal at 0, hard floor at 10 mm/h.
pub const RAIN_CURVE: &[(f64, f64)] = &[
    (0.0, 100.0),
    (1.0, 85.0),
    (3.0, 50.0),
    (6.0, 15.0),
    (10.0, 0.0),
];

/// Air temperature in °C. Ideal zone 15-25 °C.
pub const TEMP_CURVE: &[(f64, f64)] = &[
    (-5.0, 0.0),
    (5.0, 30.0),
    (10.0, 60.0),
    (15.0, 90.0),
    (20.0, 100.0),
    (25.0, 100.0),
    (30.0, 70.0),
    (35.0, 40.0),
];

/// Qualitative daily/hourly verdict, ordered from best to worst
#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Verdict {
    Excellent,
    Favorable,
    Moyen,
    Deconseille,
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Verdict::Excellent => write!(f, "Excellent"),
            Verdict::Favorable => write!(f, "Favorable"),
            Verdict::Moyen => write!(f, "Moyen"),
            Verdict::Deconseille => write!(f, "Déconseillé"),
        }
    }
}

/// Returns the verdict for a score given the configured thresholds
///
/// # Arguments
///
/// * 'score' - score between 0 and 100
/// * 'thresholds' - verdict cut points from the configuration
pub fn get_verdict(score: f64, thresholds: &VerdictThresholds) -> Verdict {
    if score >= thresholds.excellent {
        Verdict::Excellent
    } else if score >= thresholds.favorable {
        Verdict::Favorable
    } else if score >= thresholds.moyen {
        Verdict::Moyen
    } else {
        Verdict::Deconseille
    }
}

/// Piecewise linear interpolation over (x, score) control points with
/// clamped extrapolation: inputs at or outside the first/last breakpoint
/// return that breakpoint's score.
///
/// # Arguments
///
/// * 'value' - the input value
/// * 'breakpoints' - control points sorted by ascending x
fn piecewise_linear(value: f64, breakpoints: &[(f64, f64)]) -> f64 {
    let (first_x, first_y) = breakpoints[0];
    let (last_x, last_y) = breakpoints[breakpoints.len() - 1];

    if value <= first_x {
        return first_y;
    }
    if value >= last_x {
        return last_y;
    }

    for w in breakpoints.windows(2) {
        let (x0, y0) = w[0];
        let (x1, y1) = w[1];
        if x0 <= value && value <= x1 {
            let t = (value - x0) / (x1 - x0);
            return y0 + t * (y1 - y0);
        }
    }

    last_y
}

/// Scores a value against a curve, falling back to a neutral score when the
/// value is unknown. Missing data is deliberately not punished.
///
/// # Arguments
///
/// * 'value' - the input value, None when unknown
/// * 'curve' - control points for the variable
/// * 'neutral' - score to return for an unknown value
fn score_or_neutral(value: Option<f64>, curve: &[(f64, f64)], neutral: f64) -> f64 {
    value.map_or(neutral, |v| piecewise_linear(v, curve))
}

pub fn score_wind(wind_kts: Option<f64>) -> f64 {
    score_or_neutral(wind_kts, WIND_CURVE, NEUTRAL_WIND_WAVE)
}

pub fn score_gust(gust_kts: Option<f64>) -> f64 {
    score_or_neutral(gust_kts, GUST_CURVE, NEUTRAL_WIND_WAVE)
}

pub fn score_wave_height(wave_m: Option<f64>) -> f64 {
    score_or_neutral(wave_m, WAVE_HEIGHT_CURVE, NEUTRAL_WIND_WAVE)
}

pub fn score_wave_period(period_s: Option<f64>) -> f64 {
    score_or_neutral(period_s, WAVE_PERIOD_CURVE, NEUTRAL_WIND_WAVE)
}

pub fn score_rain(rain_mmh: Option<f64>) -> f64 {
    score_or_neutral(rain_mmh, RAIN_CURVE, NEUTRAL_RAIN)
}

pub fn score_temp(temp_c: Option<f64>) -> f64 {
    score_or_neutral(temp_c, TEMP_CURVE, NEUTRAL_TEMP)
}

/// Returns true when conditions are outright unsafe for a kayak, in which
/// case the composite score is capped at BLOCKING_CAP.
///
/// Blocking rules (any true blocks the hour):
/// * mean wind above 25 kts (force 6 Beaufort)
/// * gusts above 30 kts
/// * waves above 2.0 m, whatever the period
/// * steepness H/T above 0.18, e.g. 1 m / 5 s = 0.20 is short cresting
///   chop and blocks, while 1.5 m / 14 s = 0.107 is long manageable swell
/// * period unknown and height above 1.4 m, the conservative fallback
///
/// An unknown height skips all wave rules; the steepness rule needs both
/// height and a strictly positive period.
///
/// # Arguments
///
/// * 'wind_kts' - mean wind in knots
/// * 'gust_kts' - gusts in knots
/// * 'wave_m' - significant wave height in meters
/// * 'period_s' - dominant wave period in seconds
pub fn is_blocking(
    wind_kts: Option<f64>,
    gust_kts: Option<f64>,
    wave_m: Option<f64>,
    period_s: Option<f64>,
) -> bool {
    if wind_kts.is_some_and(|w| w > 25.0) {
        return true;
    }
    if gust_kts.is_some_and(|g| g > 30.0) {
        return true;
    }
    if let Some(height) = wave_m {
        if height > 2.0 {
            return true;
        }
        match period_s {
            Some(period) if period > 0.0 => {
                if height / period > MAX_STEEPNESS {
                    return true;
                }
            }
            _ => {
                if height > 1.4 {
                    return true;
                }
            }
        }
    }

    false
}

/// Computes the composite score for one hourly record
///
/// The six variable scores are combined with the configured weights, the
/// result is capped at BLOCKING_CAP when the hour is blocking and rounded
/// to one decimal.
///
/// # Arguments
///
/// * 'record' - the hourly record to score
/// * 'weights' - weight coefficients from the configuration
pub fn score_hour(record: &HourlyRecord, weights: &Weights) -> f64 {
    let mut total = score_wind(record.wind_kts) * weights.wind
        + score_gust(record.gust_kts) * weights.gust
        + score_wave_height(record.wave_height_m) * weights.wave_height
        + score_wave_period(record.wave_period_s) * weights.wave_period
        + score_rain(record.rain_mmh) * weights.rain
        + score_temp(record.temp_c) * weights.temperature;

    if is_blocking(
        record.wind_kts,
        record.gust_kts,
        record.wave_height_m,
        record.wave_period_s,
    ) {
        total = total.min(BLOCKING_CAP);
    }

    round1(total)
}

/// Rounds to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rounds to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
