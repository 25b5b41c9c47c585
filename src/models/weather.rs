use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Normalized forecast snapshot from Open-Meteo.
///
/// Every array inside `hourly` shares one length and index alignment, and
/// the same holds for `daily`. The forecast client refuses responses that
/// break this, so consumers may index all series with the same position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub current: CurrentConditions,
    pub hourly: HourlySeries,
    pub daily: DailySeries,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub time: Option<NaiveDateTime>,
    pub temperature_c: f64,
    pub weather_code: u8,
    pub wind_speed_kmh: f64,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<NaiveDateTime>,
    pub temperature_c: Vec<Option<f64>>,
    pub humidity_percent: Vec<Option<f64>>,
    pub wind_speed_kmh: Vec<Option<f64>>,
    pub uv_index: Vec<Option<f64>>,
}

impl HourlySeries {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_aligned(&self) -> bool {
        let n = self.time.len();
        self.temperature_c.len() == n
            && self.humidity_percent.len() == n
            && self.wind_speed_kmh.len() == n
            && self.uv_index.len() == n
    }

    /// Index of the first slot at or after the hour containing `at`.
    pub fn index_at(&self, at: NaiveDateTime) -> Option<usize> {
        hour_index(&self.time, at)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailySeries {
    pub date: Vec<NaiveDate>,
    pub weather_code: Vec<Option<u8>>,
    pub temp_max_c: Vec<Option<f64>>,
    pub temp_min_c: Vec<Option<f64>>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_empty()
    }

    pub fn is_aligned(&self) -> bool {
        let n = self.date.len();
        self.weather_code.len() == n && self.temp_max_c.len() == n && self.temp_min_c.len() == n
    }
}

impl WeatherRecord {
    /// Hourly slot matching the current observation, or 0 when unknown.
    pub fn current_index(&self) -> usize {
        self.current
            .time
            .and_then(|t| self.hourly.index_at(t))
            .unwrap_or(0)
    }

    pub fn current_uv(&self) -> f64 {
        self.hourly
            .uv_index
            .get(self.current_index())
            .copied()
            .flatten()
            .unwrap_or(0.0)
    }

    pub fn current_humidity(&self) -> Option<f64> {
        self.hourly
            .humidity_percent
            .get(self.current_index())
            .copied()
            .flatten()
    }

    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_wmo_code(self.current.weather_code)
    }

    pub fn is_raining(&self) -> bool {
        self.current.weather_code > 50
    }

    pub fn is_foggy(&self) -> bool {
        self.current.weather_code > 40 && self.current.weather_code < 50
    }
}

/// Shared by the weather and air-quality hourly series.
pub(crate) fn hour_index(times: &[NaiveDateTime], at: NaiveDateTime) -> Option<usize> {
    let hour = at
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))?;
    let first = *times.first()?;
    if hour < first {
        return None;
    }
    times.iter().position(|t| *t >= hour)
}

/// Weather categories derived from WMO present-weather codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WeatherCondition {
    #[default]
    Clear,
    Clouds,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
    Unknown,
}

impl WeatherCondition {
    pub fn from_wmo_code(code: u8) -> Self {
        match code {
            0 => WeatherCondition::Clear,
            1..=3 => WeatherCondition::Clouds,
            45 | 48 => WeatherCondition::Fog,
            51..=57 => WeatherCondition::Drizzle,
            61..=67 | 80..=82 => WeatherCondition::Rain,
            71..=77 | 85 | 86 => WeatherCondition::Snow,
            95..=99 => WeatherCondition::Thunderstorm,
            _ => WeatherCondition::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Clouds => "Cloudy",
            WeatherCondition::Fog => "Fog",
            WeatherCondition::Drizzle => "Drizzle",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::Thunderstorm => "Thunderstorm",
            WeatherCondition::Unknown => "Unknown",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "☀",
            WeatherCondition::Clouds => "☁",
            WeatherCondition::Fog => "🌫",
            WeatherCondition::Drizzle => "🌦",
            WeatherCondition::Rain => "🌧",
            WeatherCondition::Snow => "❄",
            WeatherCondition::Thunderstorm => "⛈",
            WeatherCondition::Unknown => "?",
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn describe_wmo_code(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1..=3 => "Mainly clear, partly cloudy, and overcast",
        45 | 48 => "Fog and depositing rime fog",
        51 | 53 | 55 => "Drizzle: Light, moderate, and dense intensity",
        56 | 57 => "Freezing Drizzle: Light and dense intensity",
        61 | 63 | 65 => "Rain: Slight, moderate and heavy intensity",
        66 | 67 => "Freezing Rain: Light and heavy intensity",
        71 | 73 | 75 => "Snow fall: Slight, moderate, and heavy intensity",
        77 => "Snow grains",
        80..=82 => "Rain showers: Slight, moderate, and violent",
        85 | 86 => "Snow showers slight and heavy",
        95 => "Thunderstorm: Slight or moderate",
        96 | 99 => "Thunderstorm with slight and heavy hail",
        _ => "Unknown",
    }
}

#[cfg(test)]
pub(crate) mod test_weather {
    use super::*;

    pub fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    /// 24 hourly slots starting at midnight with flat values.
    pub fn weather(temp_c: f64, code: u8, wind_kmh: f64, uv: f64) -> WeatherRecord {
        let start = at("2024-06-01T00:00");
        let time: Vec<NaiveDateTime> = (0..24)
            .map(|h| start + chrono::Duration::hours(h))
            .collect();
        WeatherRecord {
            current: CurrentConditions {
                time: Some(at("2024-06-01T10:00")),
                temperature_c: temp_c,
                weather_code: code,
                wind_speed_kmh: wind_kmh,
                description: describe_wmo_code(code).to_string(),
            },
            hourly: HourlySeries {
                temperature_c: vec![Some(temp_c); 24],
                humidity_percent: vec![Some(55.0); 24],
                wind_speed_kmh: vec![Some(wind_kmh); 24],
                uv_index: vec![Some(uv); 24],
                time,
            },
            daily: DailySeries::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_weather::{at, weather};
    use super::*;

    #[test]
    fn condition_from_wmo_code() {
        assert_eq!(WeatherCondition::from_wmo_code(0), WeatherCondition::Clear);
        assert_eq!(WeatherCondition::from_wmo_code(2), WeatherCondition::Clouds);
        assert_eq!(WeatherCondition::from_wmo_code(48), WeatherCondition::Fog);
        assert_eq!(WeatherCondition::from_wmo_code(63), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_wmo_code(81), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_wmo_code(86), WeatherCondition::Snow);
        assert_eq!(
            WeatherCondition::from_wmo_code(96),
            WeatherCondition::Thunderstorm
        );
        assert_eq!(WeatherCondition::from_wmo_code(42), WeatherCondition::Unknown);
    }

    #[test]
    fn describes_known_and_unknown_codes() {
        assert_eq!(describe_wmo_code(0), "Clear sky");
        assert!(describe_wmo_code(99).contains("hail"));
        assert_eq!(describe_wmo_code(100), "Unknown");
    }

    #[test]
    fn hour_index_truncates_to_hour() {
        let record = weather(20.0, 0, 5.0, 2.0);
        assert_eq!(record.hourly.index_at(at("2024-06-01T10:45")), Some(10));
        assert_eq!(record.hourly.index_at(at("2024-06-01T00:00")), Some(0));
    }

    #[test]
    fn hour_index_outside_series_is_none() {
        let record = weather(20.0, 0, 5.0, 2.0);
        assert_eq!(record.hourly.index_at(at("2024-05-31T23:00")), None);
        assert_eq!(record.hourly.index_at(at("2024-06-02T03:00")), None);
    }

    #[test]
    fn current_uv_reads_current_hour() {
        let mut record = weather(20.0, 0, 5.0, 2.0);
        record.hourly.uv_index[10] = Some(8.5);
        assert_eq!(record.current_index(), 10);
        assert_eq!(record.current_uv(), 8.5);

        record.hourly.uv_index[10] = None;
        assert_eq!(record.current_uv(), 0.0);
    }

    #[test]
    fn alignment_checks() {
        let mut record = weather(20.0, 0, 5.0, 2.0);
        assert!(record.hourly.is_aligned());
        record.hourly.uv_index.pop();
        assert!(!record.hourly.is_aligned());
    }

    #[test]
    fn rain_and_fog_predicates() {
        assert!(weather(10.0, 61, 5.0, 0.0).is_raining());
        assert!(!weather(10.0, 50, 5.0, 0.0).is_raining());
        assert!(weather(10.0, 45, 5.0, 0.0).is_foggy());
        assert!(!weather(10.0, 40, 5.0, 0.0).is_foggy());
    }
}
