use std::fmt::Write;
use chrono::NaiveDate;
use crate::models::hourly_record::ScoredHourlyRecord;
use crate::models::summary::{DailySummary, WindowSummary};
use crate::scoring::Verdict;

/// Builds the mail subject from today's summary, e.g.
/// "✅ Pêche Kayak — La Couarde — 19/02 — Score: 72/100 — Favorable".
/// Falls back to a date-only subject when today has no summary.
///
/// # Arguments
///
/// * 'spot_name' - display name of the spot
/// * 'today' - the current local date
/// * 'summaries' - the daily summaries of the run
pub fn build_subject(spot_name: &str, today: NaiveDate, summaries: &[DailySummary]) -> String {
    match summaries.iter().find(|s| s.date == today) {
        Some(summary) => {
            let emoji = match summary.verdict {
                Verdict::Excellent => "🎣",
                Verdict::Favorable => "✅",
                Verdict::Moyen => "⚠️",
                Verdict::Deconseille => "❌",
            };
            format!(
                "{} Pêche Kayak — {} — {} — Score: {}/100 — {}",
                emoji,
                spot_name,
                today.format("%d/%m"),
                summary.daily_score.round() as i64,
                summary.verdict
            )
        }
        None => format!("📊 Pêche Kayak — {} — {}", spot_name, today.format("%d/%m/%Y")),
    }
}

/// Renders the plain text report body
///
/// # Arguments
///
/// * 'spot_name' - display name of the spot
/// * 'today' - the current local date
/// * 'summaries' - daily summaries, ascending by date
/// * 'today_rows' - today's scored hourly rows
/// * 'windows' - 3-hour window summaries for the coming days
pub fn build_report(
    spot_name: &str,
    today: NaiveDate,
    summaries: &[DailySummary],
    today_rows: &[ScoredHourlyRecord],
    windows: &[WindowSummary],
) -> String {
    let mut out = String::new();

    let title = format!("Rapport Pêche Kayak — {} — {}", spot_name, today.format("%d/%m/%Y"));
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{:=<width$}", "", width = title.chars().count());
    let _ = writeln!(out);

    if let Some(summary) = summaries.iter().find(|s| s.date == today) {
        let _ = writeln!(out, "Aujourd'hui : {}/100 — {}", summary.daily_score, summary.verdict);
        let _ = writeln!(out, "Meilleur créneau : {}", summary.best_window);
        let _ = writeln!(out, "Facteur limitant : {}", summary.limiting_factor);
        let _ = writeln!(
            out,
            "Vent {} kts {} ({}), rafales max {} kts, vagues {} m / {} s",
            fmt1(summary.avg_wind_kts),
            summary.wind_dir_arrow,
            summary.wind_dir_fr,
            fmt1(summary.max_gust_kts),
            fmt2(summary.avg_wave_m),
            fmt1(summary.avg_wave_period_s),
        );
        let _ = writeln!(out);
    }

    if !today_rows.is_empty() {
        let _ = writeln!(out, "Heure par heure aujourd'hui");
        let _ = writeln!(out, "{:<6}{:>7}  {:<12}{:>6}{:>7}{:>7}{:>7}{:>7}{:>7}",
                         "Heure", "Score", "Verdict", "Vent", "Raf.", "Vag.", "Pér.", "Pluie", "Temp");
        for row in today_rows {
            let _ = writeln!(
                out,
                "{:<6}{:>7.1}  {:<12}{:>6}{:>7}{:>7}{:>7}{:>7}{:>7}",
                format!("{:02}h", row.hour()),
                row.score,
                row.verdict.to_string(),
                fmt1(row.record.wind_kts),
                fmt1(row.record.gust_kts),
                fmt2(row.record.wave_height_m),
                fmt1(row.record.wave_period_s),
                fmt1(row.record.rain_mmh),
                fmt1(row.record.temp_c),
            );
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "Prévisions par jour");
    let _ = writeln!(out, "{:<12}{:>7}  {:<12}{:<10}{:<14}{:>6} {:<2}{:>6}{:>7}{:>7}",
                     "Date", "Score", "Verdict", "Créneau", "Limitant", "Vent", "", "Raf.", "Vag.", "Pér.");
    for s in summaries {
        let _ = writeln!(
            out,
            "{:<12}{:>7.1}  {:<12}{:<10}{:<14}{:>6} {:<2}{:>6}{:>7}{:>7}",
            s.date.format("%d/%m").to_string(),
            s.daily_score,
            s.verdict.to_string(),
            s.best_window,
            s.limiting_factor,
            fmt1(s.avg_wind_kts),
            s.wind_dir_arrow,
            fmt1(s.max_gust_kts),
            fmt2(s.avg_wave_m),
            fmt1(s.avg_wave_period_s),
        );
    }

    if !windows.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Créneaux de 3h à venir");
        let mut current_date: Option<NaiveDate> = None;
        for w in windows {
            if current_date != Some(w.date) {
                let _ = writeln!(out, "{}", w.date.format("%d/%m"));
                current_date = Some(w.date);
            }
            let _ = writeln!(
                out,
                "  {:<10}{:>7.1}  {:<12}vent {} kts {}, vagues {} m",
                w.slot,
                w.score,
                w.verdict.to_string(),
                fmt1(w.avg_wind_kts),
                w.wind_dir_arrow,
                fmt2(w.avg_wave_m),
            );
        }
    }

    out
}

fn fmt1(value: Option<f64>) -> String {
    value.map_or("–".to_string(), |v| format!("{:.1}", v))
}

fn fmt2(value: Option<f64>) -> String {
    value.map_or("–".to_string(), |v| format!("{:.2}", v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(date: NaiveDate, score: f64, verdict: Verdict) -> DailySummary {
        DailySummary {
            date,
            daily_score: score,
            verdict,
            best_window: "08h–10h".to_string(),
            limiting_factor: "vagues".to_string(),
            avg_wind_kts: Some(11.2),
            max_gust_kts: Some(18.0),
            wind_dir: Some("W".to_string()),
            wind_dir_arrow: "→".to_string(),
            wind_dir_fr: "Ouest".to_string(),
            avg_wave_m: Some(0.74),
            avg_wave_period_s: Some(8.9),
            max_rain_mmh: None,
            avg_temp_c: Some(12.3),
        }
    }

    #[test]
    fn subject_carries_score_and_verdict() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 19).unwrap();
        let subject = build_subject("La Couarde", today, &[summary(today, 72.4, Verdict::Excellent)]);

        assert!(subject.contains("La Couarde"));
        assert!(subject.contains("19/02"));
        assert!(subject.contains("Score: 72/100"));
        assert!(subject.contains("Excellent"));
        assert!(subject.starts_with("🎣"));
    }

    #[test]
    fn subject_falls_back_without_today_summary() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 19).unwrap();
        let tomorrow = today.succ_opt().unwrap();
        let subject = build_subject("La Couarde", today, &[summary(tomorrow, 50.0, Verdict::Favorable)]);

        assert!(subject.starts_with("📊"));
        assert!(subject.contains("19/02/2026"));
        assert!(!subject.contains("Score:"));
    }

    #[test]
    fn report_lists_each_day_and_window() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 19).unwrap();
        let tomorrow = today.succ_opt().unwrap();
        let summaries = vec![
            summary(today, 72.4, Verdict::Excellent),
            summary(tomorrow, 28.0, Verdict::Deconseille),
        ];
        let windows = vec![WindowSummary {
            date: tomorrow,
            slot: "06h–08h".to_string(),
            score: 30.5,
            verdict: Verdict::Moyen,
            avg_wind_kts: Some(21.0),
            max_gust_kts: Some(28.0),
            wind_dir: Some("NW".to_string()),
            wind_dir_arrow: "↘".to_string(),
            avg_wave_m: Some(1.1),
            avg_period_s: Some(6.0),
            max_rain_mmh: Some(0.2),
        }];

        let report = build_report("La Couarde", today, &summaries, &[], &windows);

        assert!(report.contains("Aujourd'hui : 72.4/100 — Excellent"));
        assert!(report.contains("Facteur limitant : vagues"));
        assert!(report.contains("Déconseillé"));
        assert!(report.contains("06h–08h"));
        assert!(report.contains("20/02"));
    }

    #[test]
    fn unknown_statistics_render_as_dashes() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 19).unwrap();
        let mut s = summary(today, 50.0, Verdict::Favorable);
        s.avg_wave_m = None;
        s.avg_wave_period_s = None;

        let report = build_report("La Couarde", today, &[s], &[], &[]);
        assert!(report.contains("vagues – m / – s"));
    }
}
