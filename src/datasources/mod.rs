pub mod air_quality;
pub mod geocoding;
pub mod nominatim;
pub mod openmeteo;

pub use air_quality::AirQualityClient;
pub use geocoding::GeocodingClient;
pub use nominatim::ReverseGeocoder;
pub use openmeteo::ForecastClient;

use crate::config::EndpointsConfig;
use crate::error::{Result, SkyPulseError};
use chrono::NaiveDateTime;
use std::time::Duration;

const OPEN_METEO_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// reqwest client carrying the configured timeout and user agent.
fn http_client(endpoints: &EndpointsConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(endpoints.timeout_secs))
        .user_agent(endpoints.user_agent.clone())
        .build()?;
    Ok(client)
}

fn trim_base(url: &str) -> &str {
    url.trim_end_matches('/')
}

/// Open-Meteo returns local times without an offset ("2024-06-01T14:00").
fn parse_local_times(source: &str, raw: &[String]) -> Result<Vec<NaiveDateTime>> {
    raw.iter()
        .map(|s| {
            NaiveDateTime::parse_from_str(s, OPEN_METEO_TIME_FORMAT).map_err(|e| {
                SkyPulseError::InvalidData(format!("{}: bad timestamp '{}': {}", source, s, e))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_open_meteo_times() {
        let raw = vec!["2024-06-01T00:00".to_string(), "2024-06-01T01:00".to_string()];
        let times = parse_local_times("test", &raw).unwrap();
        assert_eq!(times.len(), 2);
        assert_eq!(times[1].format("%H:%M").to_string(), "01:00");
    }

    #[test]
    fn rejects_malformed_times() {
        let raw = vec!["yesterday".to_string()];
        let err = parse_local_times("test", &raw).unwrap_err();
        assert!(matches!(err, SkyPulseError::InvalidData(_)));
    }

    #[test]
    fn trims_trailing_slash() {
        assert_eq!(trim_base("http://localhost:1234/"), "http://localhost:1234");
        assert_eq!(trim_base("https://api.open-meteo.com/v1"), "https://api.open-meteo.com/v1");
    }
}
