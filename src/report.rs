use crate::error::Result;
use crate::models::{DerivedSummary, GeocodingResult, Snapshot};
use serde::Serialize;
use std::fmt::Write;

#[derive(Serialize)]
struct JsonReport<'a> {
    snapshot: &'a Snapshot,
    summary: &'a DerivedSummary,
}

pub fn render_json(snapshot: &Snapshot, summary: &DerivedSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport { snapshot, summary })?)
}

/// Plain-text report for `skypulse show`.
pub fn render_text(snapshot: &Snapshot, summary: &DerivedSummary) -> String {
    let weather = &snapshot.weather;
    let air = &snapshot.air_quality;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} ({})",
        snapshot.location.display_name(),
        snapshot.location.coordinates
    );
    let _ = writeln!(
        out,
        "{} {}  {:.1}°C  wind {:.0} km/h  UV {:.1}",
        weather.condition().symbol(),
        weather.current.description,
        weather.current.temperature_c,
        weather.current.wind_speed_kmh,
        weather.current_uv()
    );
    let aqi = match (air.aqi(), air.band()) {
        (Some(value), Some(band)) => format!("US AQI {:.0} ({})", value, band),
        _ => "US AQI no data".to_string(),
    };
    let pm2_5 = air
        .current
        .pm2_5
        .map(|v| format!("{:.1} µg/m³", v))
        .unwrap_or_else(|| "no data".to_string());
    let _ = writeln!(out, "Air: {}  PM2.5 {}", aqi, pm2_5);
    let _ = writeln!(out);

    let _ = writeln!(out, "Environmental score: {}/100", summary.score);
    let _ = writeln!(
        out,
        "Go outside? {} - {}: {} ({})",
        summary.decision.verdict,
        summary.decision.title,
        summary.decision.reason,
        summary.decision.time_anchor
    );
    let _ = writeln!(
        out,
        "Alert [{}]: {} - {}",
        summary.alert.severity().as_str(),
        summary.alert.title(),
        summary.alert.message()
    );
    if let Some(ref improvement) = summary.improvement {
        let _ = writeln!(out, "Air outlook: {}", improvement);
    }
    let _ = writeln!(out);

    for advice in &summary.advice {
        let _ = writeln!(
            out,
            "  {} {:<8} {:<8} {}",
            advice.verdict.symbol(),
            advice.activity.as_str(),
            advice.verdict.as_str(),
            advice.note
        );
    }

    if !weather.daily.is_empty() {
        let _ = writeln!(out);
        for i in 0..weather.daily.len() {
            let fmt_temp = |t: Option<f64>| {
                t.map(|v| format!("{:.1}°C", v))
                    .unwrap_or_else(|| "--".to_string())
            };
            let _ = writeln!(
                out,
                "  {}  {:>8} / {:<8} {}",
                weather.daily.date[i].format("%a %b %d"),
                fmt_temp(weather.daily.temp_max_c[i]),
                fmt_temp(weather.daily.temp_min_c[i]),
                weather.daily.weather_code[i]
                    .map(crate::models::describe_wmo_code)
                    .unwrap_or("Unknown")
            );
        }
    }

    out
}

pub fn render_search_results(query: &str, results: &[GeocodingResult]) -> String {
    if results.is_empty() {
        return format!("No places found for '{}'\n", query);
    }

    let mut out = String::new();
    for (i, r) in results.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {}{}  ({})",
            i + 1,
            r.name,
            if r.country.is_empty() {
                String::new()
            } else {
                format!(", {}", r.country)
            },
            r.coordinates()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::derive_summary;
    use crate::models::air_quality::test_air::{flat, uncovered};
    use crate::models::weather::test_weather::{at, weather};
    use crate::models::{Coordinates, DisplayMode, Location};

    fn sample() -> (Snapshot, DerivedSummary) {
        let snapshot = Snapshot::new(
            Location {
                name: "Cape Town".into(),
                country: "South Africa".into(),
                coordinates: Coordinates::new(-33.92, 18.42),
            },
            weather(19.0, 2, 35.0, 3.0),
            flat(30.0),
        );
        let summary = derive_summary(
            Some(&snapshot.weather),
            Some(&snapshot.air_quality),
            DisplayMode::Vivid,
            at("2024-06-01T10:00"),
        );
        (snapshot, summary)
    }

    #[test]
    fn text_report_covers_summary() {
        let (snapshot, summary) = sample();
        let text = render_text(&snapshot, &summary);
        assert!(text.starts_with("Cape Town, South Africa (-33.9200, 18.4200)"));
        assert!(text.contains("High Wind Advisory"));
        assert!(text.contains("LIMITED"));
        assert!(text.contains("Cycling"));
    }

    #[test]
    fn text_report_without_aqi_coverage() {
        let (mut snapshot, _) = sample();
        snapshot.air_quality = uncovered();
        let summary = derive_summary(
            Some(&snapshot.weather),
            Some(&snapshot.air_quality),
            DisplayMode::Vivid,
            at("2024-06-01T10:00"),
        );
        let text = render_text(&snapshot, &summary);
        assert!(text.contains("Air: US AQI no data  PM2.5 no data"));
        assert!(text.contains("Environmental score: "));
    }

    #[test]
    fn json_report_has_both_halves() {
        let (snapshot, summary) = sample();
        let json = render_json(&snapshot, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["snapshot"]["location"]["name"], "Cape Town");
        assert_eq!(value["summary"]["decision"]["verdict"], "Limited");
        assert!(value["summary"]["score"].is_u64());
    }

    #[test]
    fn search_listing() {
        let results = vec![GeocodingResult {
            name: "Perth".into(),
            latitude: -31.95,
            longitude: 115.86,
            country: "Australia".into(),
        }];
        assert_eq!(
            render_search_results("Perth", &results),
            "1. Perth, Australia  (-31.9500, 115.8600)\n"
        );
        assert_eq!(
            render_search_results("Nowhere", &[]),
            "No places found for 'Nowhere'\n"
        );
    }
}
