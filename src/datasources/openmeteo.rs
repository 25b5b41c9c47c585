use super::{http_client, parse_local_times, trim_base};
use crate::config::EndpointsConfig;
use crate::error::{Result, SkyPulseError};
use crate::models::weather::{
    describe_wmo_code, CurrentConditions, DailySeries, HourlySeries, WeatherRecord,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

const HOURLY_FIELDS: &str = "temperature_2m,relativehumidity_2m,windspeed_10m,uv_index";
const DAILY_FIELDS: &str = "weathercode,temperature_2m_max,temperature_2m_min";

pub struct ForecastClient {
    client: reqwest::Client,
    base_url: String,
}

// Open-Meteo forecast response structures
#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current_weather: OmCurrentWeather,
    hourly: OmHourly,
    daily: OmDaily,
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: f64,
    #[serde(default)]
    windspeed: f64,
    weathercode: u8,
    #[serde(default)]
    time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmHourly {
    time: Vec<String>,
    temperature_2m: Vec<Option<f64>>,
    relativehumidity_2m: Vec<Option<f64>>,
    windspeed_10m: Vec<Option<f64>>,
    uv_index: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<String>,
    weathercode: Vec<Option<u8>>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
}

impl ForecastClient {
    pub fn new(endpoints: &EndpointsConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(endpoints)?,
            base_url: trim_base(&endpoints.forecast_url).to_string(),
        })
    }

    /// Fetch current conditions plus hourly and daily series
    pub async fn get_weather_data(&self, latitude: f64, longitude: f64) -> Result<WeatherRecord> {
        let url = format!("{}/forecast", self.base_url);
        let lat = latitude.to_string();
        let lon = longitude.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", lat.as_str()),
                ("longitude", lon.as_str()),
                ("current_weather", "true"),
                ("hourly", HOURLY_FIELDS),
                ("daily", DAILY_FIELDS),
                ("timezone", "auto"),
            ])
            .send()
            .await
            .map_err(|e| SkyPulseError::DataSourceUnavailable(format!("Open-Meteo: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SkyPulseError::DataSourceUnavailable(format!(
                "Open-Meteo returned {}: {}",
                status, body
            )));
        }

        let om_response: OmForecastResponse = response.json().await.map_err(|e| {
            SkyPulseError::DataSourceUnavailable(format!(
                "Failed to parse Open-Meteo response: {}",
                e
            ))
        })?;

        let record = convert_response(om_response)?;
        tracing::debug!(
            "Forecast for {:.4},{:.4}: {} hourly, {} daily slots",
            latitude,
            longitude,
            record.hourly.len(),
            record.daily.len()
        );
        Ok(record)
    }

    /// Test connection to the forecast API
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/forecast", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", "0"),
                ("longitude", "0"),
                ("current_weather", "true"),
            ])
            .send()
            .await
            .map_err(|e| SkyPulseError::DataSourceUnavailable(format!("Open-Meteo: {}", e)))?;

        Ok(response.status().is_success())
    }
}

fn convert_response(response: OmForecastResponse) -> Result<WeatherRecord> {
    let current_time = match response.current_weather.time.as_deref() {
        Some(s) => NaiveDateTime::parse_from_str(s, super::OPEN_METEO_TIME_FORMAT).ok(),
        None => None,
    };

    let hourly = HourlySeries {
        time: parse_local_times("Open-Meteo hourly", &response.hourly.time)?,
        temperature_c: response.hourly.temperature_2m,
        humidity_percent: response.hourly.relativehumidity_2m,
        wind_speed_kmh: response.hourly.windspeed_10m,
        uv_index: response.hourly.uv_index,
    };

    if !hourly.is_aligned() {
        return Err(SkyPulseError::InvalidData(
            "Open-Meteo hourly arrays differ in length".into(),
        ));
    }

    let date = response
        .daily
        .time
        .iter()
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
                SkyPulseError::InvalidData(format!("Open-Meteo daily: bad date '{}': {}", s, e))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let daily = DailySeries {
        date,
        weather_code: response.daily.weathercode,
        temp_max_c: response.daily.temperature_2m_max,
        temp_min_c: response.daily.temperature_2m_min,
    };

    if !daily.is_aligned() {
        return Err(SkyPulseError::InvalidData(
            "Open-Meteo daily arrays differ in length".into(),
        ));
    }

    let code = response.current_weather.weathercode;
    Ok(WeatherRecord {
        current: CurrentConditions {
            time: current_time,
            temperature_c: response.current_weather.temperature,
            weather_code: code,
            wind_speed_kmh: response.current_weather.windspeed,
            description: describe_wmo_code(code).to_string(),
        },
        hourly,
        daily,
    })
}
