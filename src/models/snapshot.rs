use super::air_quality::AirQualityRecord;
use super::location::Location;
use super::weather::WeatherRecord;
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::Serialize;

/// Latest weather + air-quality pair for one location. Replaced wholesale
/// on every successful fetch; never merged.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub location: Location,
    pub weather: WeatherRecord,
    pub air_quality: AirQualityRecord,
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(location: Location, weather: WeatherRecord, air_quality: AirQualityRecord) -> Self {
        Self {
            location,
            weather,
            air_quality,
            fetched_at: Utc::now(),
        }
    }

    /// Wall-clock time at the location. Open-Meteo reports its series in
    /// location-local time, so the observation timestamp is the anchor;
    /// the host clock is used when the response carried none.
    pub fn observed_at(&self) -> NaiveDateTime {
        self.weather
            .current
            .time
            .unwrap_or_else(|| Local::now().naive_local())
    }
}
