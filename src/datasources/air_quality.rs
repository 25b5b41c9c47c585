use super::{http_client, parse_local_times, trim_base};
use crate::config::EndpointsConfig;
use crate::error::{Result, SkyPulseError};
use crate::models::air_quality::{AirQualityRecord, AqiSeries, CurrentAirQuality};
use serde::Deserialize;

pub struct AirQualityClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct OmAirQualityResponse {
    current: OmCurrentAir,
    hourly: OmHourlyAir,
}

#[derive(Debug, Deserialize)]
struct OmCurrentAir {
    us_aqi: Option<f64>,
    #[serde(default)]
    pm2_5: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OmHourlyAir {
    time: Vec<String>,
    us_aqi: Vec<Option<f64>>,
}

impl AirQualityClient {
    pub fn new(endpoints: &EndpointsConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(endpoints)?,
            base_url: trim_base(&endpoints.air_quality_url).to_string(),
        })
    }

    /// Fetch current US AQI, PM2.5 and the hourly AQI forecast
    pub async fn get_air_quality(&self, latitude: f64, longitude: f64) -> Result<AirQualityRecord> {
        let url = format!("{}/air-quality", self.base_url);
        let lat = latitude.to_string();
        let lon = longitude.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", lat.as_str()),
                ("longitude", lon.as_str()),
                ("current", "us_aqi,pm2_5"),
                ("hourly", "us_aqi"),
                ("timezone", "auto"),
            ])
            .send()
            .await
            .map_err(|e| SkyPulseError::DataSourceUnavailable(format!("Air quality: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SkyPulseError::DataSourceUnavailable(format!(
                "Air quality API returned {}: {}",
                status, body
            )));
        }

        let om_response: OmAirQualityResponse = response.json().await.map_err(|e| {
            SkyPulseError::DataSourceUnavailable(format!(
                "Failed to parse air quality response: {}",
                e
            ))
        })?;

        let hourly = AqiSeries {
            time: parse_local_times("Air quality hourly", &om_response.hourly.time)?,
            us_aqi: om_response.hourly.us_aqi,
        };

        if !hourly.is_aligned() {
            return Err(SkyPulseError::InvalidData(
                "Air quality hourly arrays differ in length".into(),
            ));
        }

        let current = CurrentAirQuality {
            us_aqi: om_response.current.us_aqi,
            pm2_5: om_response.current.pm2_5,
        };
        match current.us_aqi {
            Some(aqi) => tracing::debug!("AQI {:.0} at {:.4},{:.4}", aqi, latitude, longitude),
            None => tracing::debug!("No AQI coverage at {:.4},{:.4}", latitude, longitude),
        }

        Ok(AirQualityRecord { current, hourly })
    }

    /// Test connection to the air quality API
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/air-quality", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("latitude", "0"), ("longitude", "0"), ("current", "us_aqi")])
            .send()
            .await
            .map_err(|e| SkyPulseError::DataSourceUnavailable(format!("Air quality: {}", e)))?;

        Ok(response.status().is_success())
    }
}
