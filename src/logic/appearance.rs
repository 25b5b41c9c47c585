use crate::models::{AirQualityRecord, DisplayMode, ThemeClass, WeatherRecord};

/// Picks the dashboard palette. Calm mode ignores the data entirely.
pub fn compute_theme(
    weather: Option<&WeatherRecord>,
    aqi: Option<&AirQualityRecord>,
    mode: DisplayMode,
) -> ThemeClass {
    if mode == DisplayMode::Calm {
        return ThemeClass::NeutralLight;
    }

    let aqi = aqi.and_then(|a| a.aqi()).unwrap_or(0.0);
    if aqi > 150.0 {
        return ThemeClass::HazardRed;
    }
    if aqi > 100.0 {
        return ThemeClass::WarningAmber;
    }

    match weather.map(|w| w.current.weather_code) {
        Some(51..=67 | 80..=82 | 95..=99) => ThemeClass::Rain,
        Some(71..=77 | 85 | 86) => ThemeClass::Snow,
        Some(0..=3) => ThemeClass::Clear,
        _ => ThemeClass::NeutralDark,
    }
}
