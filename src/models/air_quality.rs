use super::weather::hour_index;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQualityRecord {
    pub current: CurrentAirQuality,
    pub hourly: AqiSeries,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CurrentAirQuality {
    /// `None` where the provider has no coverage.
    pub us_aqi: Option<f64>,
    pub pm2_5: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AqiSeries {
    pub time: Vec<NaiveDateTime>,
    pub us_aqi: Vec<Option<f64>>,
}

impl AqiSeries {
    pub fn is_aligned(&self) -> bool {
        self.time.len() == self.us_aqi.len()
    }

    pub fn index_at(&self, at: NaiveDateTime) -> Option<usize> {
        hour_index(&self.time, at)
    }
}

impl AirQualityRecord {
    pub fn aqi(&self) -> Option<f64> {
        self.current.us_aqi
    }

    pub fn band(&self) -> Option<AqiBand> {
        self.current.us_aqi.map(AqiBand::from_aqi)
    }
}

/// US EPA AQI categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AqiBand {
    Good,
    Moderate,
    SensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiBand {
    pub fn from_aqi(aqi: f64) -> Self {
        if aqi <= 50.0 {
            AqiBand::Good
        } else if aqi <= 100.0 {
            AqiBand::Moderate
        } else if aqi <= 150.0 {
            AqiBand::SensitiveGroups
        } else if aqi <= 200.0 {
            AqiBand::Unhealthy
        } else if aqi <= 300.0 {
            AqiBand::VeryUnhealthy
        } else {
            AqiBand::Hazardous
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AqiBand::Good => "Good",
            AqiBand::Moderate => "Moderate",
            AqiBand::SensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiBand::Unhealthy => "Unhealthy",
            AqiBand::VeryUnhealthy => "Very Unhealthy",
            AqiBand::Hazardous => "Hazardous",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            AqiBand::Good => Color::Green,
            AqiBand::Moderate => Color::Yellow,
            AqiBand::SensitiveGroups => Color::LightRed,
            AqiBand::Unhealthy => Color::Red,
            AqiBand::VeryUnhealthy => Color::Magenta,
            AqiBand::Hazardous => Color::LightMagenta,
        }
    }
}

impl std::fmt::Display for AqiBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
pub(crate) mod test_air {
    use super::*;
    use crate::models::weather::test_weather::at;

    /// 24 hourly AQI values starting at midnight.
    pub fn air(current: f64, hourly: Vec<Option<f64>>) -> AirQualityRecord {
        let start = at("2024-06-01T00:00");
        let time = (0..hourly.len() as i64)
            .map(|h| start + chrono::Duration::hours(h))
            .collect();
        AirQualityRecord {
            current: CurrentAirQuality {
                us_aqi: Some(current),
                pm2_5: Some(current / 4.0),
            },
            hourly: AqiSeries {
                time,
                us_aqi: hourly,
            },
        }
    }

    pub fn flat(current: f64) -> AirQualityRecord {
        air(current, vec![Some(current); 24])
    }

    /// A location outside the provider's coverage: every value null.
    pub fn uncovered() -> AirQualityRecord {
        let mut record = air(0.0, vec![None; 24]);
        record.current = CurrentAirQuality {
            us_aqi: None,
            pm2_5: None,
        };
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries() {
        assert_eq!(AqiBand::from_aqi(0.0), AqiBand::Good);
        assert_eq!(AqiBand::from_aqi(50.0), AqiBand::Good);
        assert_eq!(AqiBand::from_aqi(51.0), AqiBand::Moderate);
        assert_eq!(AqiBand::from_aqi(120.0), AqiBand::SensitiveGroups);
        assert_eq!(AqiBand::from_aqi(180.0), AqiBand::Unhealthy);
        assert_eq!(AqiBand::from_aqi(250.0), AqiBand::VeryUnhealthy);
        assert_eq!(AqiBand::from_aqi(420.0), AqiBand::Hazardous);
    }

    #[test]
    fn band_display() {
        assert_eq!(AqiBand::Good.to_string(), "Good");
        assert!(AqiBand::SensitiveGroups.as_str().contains("Sensitive"));
    }

    #[test]
    fn uncovered_record_has_no_band() {
        let record = test_air::uncovered();
        assert_eq!(record.aqi(), None);
        assert_eq!(record.band(), None);
        assert_eq!(test_air::flat(72.0).band(), Some(AqiBand::Moderate));
    }

    #[test]
    fn bands_are_ordered_by_severity() {
        assert!(AqiBand::Good < AqiBand::Moderate);
        assert!(AqiBand::Unhealthy < AqiBand::Hazardous);
    }
}
