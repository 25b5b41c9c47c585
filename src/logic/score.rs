use crate::models::{AirQualityRecord, WeatherRecord};

const COMFORT_TEMP_C: f64 = 21.0;

/// Environmental comfort score, 0-100.
///
/// Starts at 100 and loses points for each factor past its comfort limit:
/// - 0.5 per AQI point above 50
/// - 4 per UV index point above 5
/// - 1.5 per km/h of wind above 20
/// - 2 per °C beyond 5°C either side of 21°C
///
/// No weather means no score. Missing air quality, or a record without a
/// current AQI, costs nothing.
pub fn compute_environmental_score(
    weather: Option<&WeatherRecord>,
    aqi: Option<&AirQualityRecord>,
) -> u8 {
    let Some(weather) = weather else {
        return 0;
    };

    let aqi_value = aqi.and_then(|a| a.aqi()).unwrap_or(0.0);
    let uv = weather.current_uv();
    let wind = weather.current.wind_speed_kmh;
    let temp = weather.current.temperature_c;

    let mut score = 100.0;
    score -= 0.5 * (aqi_value - 50.0).max(0.0);
    score -= 4.0 * (uv - 5.0).max(0.0);
    score -= 1.5 * (wind - 20.0).max(0.0);
    score -= 2.0 * ((temp - COMFORT_TEMP_C).abs() - 5.0).max(0.0);

    score.clamp(0.0, 100.0).round() as u8
}
