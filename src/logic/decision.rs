use crate::models::{AirQualityRecord, Decision, Verdict, WeatherRecord};

/// Go/no-go call. First matching guard wins; NO-tier conditions are all
/// checked before any LIMITED-tier one.
pub fn compute_decision(
    weather: Option<&WeatherRecord>,
    aqi: Option<&AirQualityRecord>,
) -> Decision {
    let Some(weather) = weather else {
        return Decision::new(
            Verdict::Wait,
            "Waiting for data",
            "Weather data has not loaded yet",
            "Shortly",
        );
    };

    let aqi = aqi.and_then(|a| a.aqi()).unwrap_or(0.0);
    let code = weather.current.weather_code;
    let temp = weather.current.temperature_c;
    let uv = weather.current_uv();
    let wind = weather.current.wind_speed_kmh;

    if aqi > 150.0 {
        return Decision::new(
            Verdict::No,
            "Stay inside",
            "Hazardous air quality",
            "Until the air clears",
        );
    }
    if code >= 95 {
        return Decision::new(
            Verdict::No,
            "Stay inside",
            "Thunderstorm activity in the area",
            "Until the storm passes",
        );
    }
    if temp > 40.0 {
        return Decision::new(
            Verdict::No,
            "Stay inside",
            "Dangerous heat",
            "Until evening",
        );
    }

    if aqi > 100.0 {
        return Decision::new(
            Verdict::Limited,
            "Keep it short",
            "Air quality is unhealthy for sensitive groups",
            "Next few hours",
        );
    }
    if uv > 7.0 {
        return Decision::new(
            Verdict::Limited,
            "Keep it short",
            "Very high UV exposure",
            "Avoid 11 AM - 3 PM",
        );
    }
    if wind > 30.0 {
        return Decision::new(
            Verdict::Limited,
            "Go with care",
            "Strong winds",
            "Next few hours",
        );
    }
    if (51..=67).contains(&code) {
        return Decision::new(
            Verdict::Limited,
            "Bring an umbrella",
            "Rain or drizzle expected",
            "Next few hours",
        );
    }

    Decision::new(
        Verdict::Yes,
        "Head outside",
        "Conditions look good",
        "Right now",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::air_quality::test_air::flat;
    use crate::models::weather::test_weather::weather;

    #[test]
    fn waits_without_weather() {
        let d = compute_decision(None, Some(&flat(10.0)));
        assert_eq!(d.verdict, Verdict::Wait);
    }

    #[test]
    fn hazardous_air_precedes_storm() {
        let w = weather(20.0, 96, 5.0, 2.0);
        let d = compute_decision(Some(&w), Some(&flat(200.0)));
        assert_eq!(d.verdict, Verdict::No);
        assert!(d.reason.contains("air"));
    }

    #[test]
    fn storm_and_heat_are_no() {
        let d = compute_decision(Some(&weather(20.0, 95, 5.0, 2.0)), Some(&flat(20.0)));
        assert_eq!(d.verdict, Verdict::No);
        assert!(d.reason.contains("Thunderstorm"));

        let d = compute_decision(Some(&weather(41.0, 0, 5.0, 2.0)), Some(&flat(20.0)));
        assert_eq!(d.verdict, Verdict::No);
        assert!(d.reason.contains("heat"));
    }

    #[test]
    fn storm_beats_limited_air() {
        let d = compute_decision(Some(&weather(20.0, 99, 5.0, 2.0)), Some(&flat(120.0)));
        assert_eq!(d.verdict, Verdict::No);
    }

    #[test]
    fn sensitive_air_is_limited() {
        let w = weather(20.0, 0, 5.0, 3.0);
        let d = compute_decision(Some(&w), Some(&flat(120.0)));
        assert_eq!(d.verdict, Verdict::Limited);
        assert!(d.reason.contains("sensitive groups"));
    }

    #[test]
    fn limited_cascade_order() {
        let air = flat(30.0);
        let d = compute_decision(Some(&weather(20.0, 61, 40.0, 8.0)), Some(&air));
        assert!(d.reason.contains("UV"));

        let d = compute_decision(Some(&weather(20.0, 61, 40.0, 7.0)), Some(&air));
        assert!(d.reason.contains("winds"));

        let d = compute_decision(Some(&weather(20.0, 61, 30.0, 7.0)), Some(&air));
        assert!(d.reason.contains("Rain"));
        assert_eq!(d.verdict, Verdict::Limited);
    }

    #[test]
    fn rain_band_is_51_to_67() {
        let air = flat(30.0);
        for code in [51, 67] {
            let d = compute_decision(Some(&weather(20.0, code, 5.0, 2.0)), Some(&air));
            assert_eq!(d.verdict, Verdict::Limited);
        }
        for code in [50, 71, 80] {
            let d = compute_decision(Some(&weather(20.0, code, 5.0, 2.0)), Some(&air));
            assert_eq!(d.verdict, Verdict::Yes);
        }
    }

    #[test]
    fn clear_day_is_yes() {
        let w = weather(20.0, 0, 5.0, 2.0);
        let d = compute_decision(Some(&w), Some(&flat(30.0)));
        assert_eq!(d.verdict, Verdict::Yes);
    }

    #[test]
    fn missing_air_quality_skips_air_checks() {
        let w = weather(20.0, 0, 5.0, 2.0);
        assert_eq!(compute_decision(Some(&w), None).verdict, Verdict::Yes);
    }
}
