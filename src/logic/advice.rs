use crate::models::{Activity, ActivityAdvice, AdviceVerdict, AirQualityRecord, WeatherRecord};

const WINDY_KMH: f64 = 25.0;
const POOR_AIR_AQI: f64 = 100.0;
const RUNNING_MIN_C: f64 = 5.0;
const RUNNING_MAX_C: f64 = 28.0;

/// Go/caution/avoid verdicts for running, cycling and driving, always in
/// that order. Empty without weather.
pub fn compute_activity_advice(
    weather: Option<&WeatherRecord>,
    aqi: Option<&AirQualityRecord>,
) -> Vec<ActivityAdvice> {
    let Some(weather) = weather else {
        return Vec::new();
    };

    let rain = weather.is_raining();
    let fog = weather.is_foggy();
    let windy = weather.current.wind_speed_kmh > WINDY_KMH;
    let poor_air = aqi
        .and_then(|a| a.aqi())
        .is_some_and(|v| v > POOR_AIR_AQI);
    let temp = weather.current.temperature_c;
    let running_temp = (RUNNING_MIN_C..=RUNNING_MAX_C).contains(&temp);

    vec![
        running(rain, windy, poor_air, running_temp),
        cycling(rain, windy, poor_air),
        driving(rain, fog),
    ]
}

fn running(rain: bool, windy: bool, poor_air: bool, comfortable: bool) -> ActivityAdvice {
    let (verdict, note) = if poor_air {
        (AdviceVerdict::Avoid, "Poor air quality")
    } else if rain {
        (AdviceVerdict::Avoid, "Wet and slippery")
    } else if !comfortable {
        (AdviceVerdict::Caution, "Uncomfortable temperature")
    } else if windy {
        (AdviceVerdict::Caution, "Gusty conditions")
    } else {
        (AdviceVerdict::Go, "Great running weather")
    };
    ActivityAdvice::new(Activity::Running, verdict, note)
}

fn cycling(rain: bool, windy: bool, poor_air: bool) -> ActivityAdvice {
    let (verdict, note) = if rain {
        (AdviceVerdict::Avoid, "Rain on the roads")
    } else if windy {
        (AdviceVerdict::Caution, "Strong crosswinds")
    } else if poor_air {
        (AdviceVerdict::Caution, "Poor air quality")
    } else {
        (AdviceVerdict::Go, "Clear roads ahead")
    };
    ActivityAdvice::new(Activity::Cycling, verdict, note)
}

fn driving(rain: bool, fog: bool) -> ActivityAdvice {
    let (verdict, note) = if fog {
        (AdviceVerdict::Caution, "Low visibility")
    } else if rain {
        (AdviceVerdict::Caution, "Wet roads")
    } else {
        (AdviceVerdict::Go, "Normal driving conditions")
    };
    ActivityAdvice::new(Activity::Driving, verdict, note)
}
