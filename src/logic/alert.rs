use crate::models::{AirQualityRecord, AtmosphericAlert, WeatherRecord};
use chrono::{NaiveDateTime, Timelike};

const HAZARDOUS_AQI: f64 = 150.0;
const CRITICAL_UV: f64 = 6.0;
const HIGH_WIND_KMH: f64 = 30.0;
const EXTREME_HEAT_C: f64 = 35.0;

const UNHEALTHY_AQI: f64 = 100.0;

pub const NO_IMPROVEMENT: &str = "No improvement forecast in 24h";

/// Single banner for the dashboard. Checks run in priority order and the
/// first hit wins: hazardous air, UV, wind, heat.
pub fn compute_atmospheric_alert(
    weather: Option<&WeatherRecord>,
    aqi: Option<&AirQualityRecord>,
) -> AtmosphericAlert {
    let Some(weather) = weather else {
        return AtmosphericAlert::Stable;
    };

    if let Some(aqi) = aqi.and_then(|a| a.aqi()).filter(|v| *v > HAZARDOUS_AQI) {
        return AtmosphericAlert::HazardousAir { aqi };
    }

    let uv = weather.current_uv();
    if uv > CRITICAL_UV {
        return AtmosphericAlert::CriticalUv { uv };
    }

    let wind = weather.current.wind_speed_kmh;
    if wind > HIGH_WIND_KMH {
        return AtmosphericAlert::HighWind { speed_kmh: wind };
    }

    let temp = weather.current.temperature_c;
    if temp > EXTREME_HEAT_C {
        return AtmosphericAlert::ExtremeHeat { temp_c: temp };
    }

    AtmosphericAlert::Stable
}

/// When the air is unhealthy (AQI > 100), when it is expected to drop
/// back under 100.
///
/// The scan starts at the hourly slot for `now`. If the series does not
/// cover `now` the hour-of-day is used as the index instead.
pub fn compute_improvement_estimate(
    aqi: Option<&AirQualityRecord>,
    now: NaiveDateTime,
) -> Option<String> {
    let aqi = aqi?;
    if aqi.aqi()? <= UNHEALTHY_AQI {
        return None;
    }

    let hourly = &aqi.hourly;
    let start = hourly
        .index_at(now)
        .unwrap_or_else(|| now.hour() as usize);

    let improved = hourly
        .us_aqi
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, value)| value.is_some_and(|v| v < UNHEALTHY_AQI));

    let estimate = match improved {
        Some((idx, _)) => match hourly.time.get(idx) {
            Some(t) => format!("Expected to improve by {}", t.format("%-I %p")),
            None => format!("Expected to improve in {} hours", idx.saturating_sub(start)),
        },
        None => NO_IMPROVEMENT.to_string(),
    };

    Some(estimate)
}
