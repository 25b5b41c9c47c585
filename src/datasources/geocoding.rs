use super::{http_client, trim_base};
use crate::config::EndpointsConfig;
use crate::error::{Result, SkyPulseError};
use crate::models::GeocodingResult;
use serde::Deserialize;

pub struct GeocodingClient {
    client: reqwest::Client,
    base_url: String,
    count: u8,
}

#[derive(Debug, Deserialize)]
struct OmSearchResponse {
    // Absent entirely when nothing matches
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

impl GeocodingClient {
    pub fn new(endpoints: &EndpointsConfig, count: u8) -> Result<Self> {
        Ok(Self {
            client: http_client(endpoints)?,
            base_url: trim_base(&endpoints.geocoding_url).to_string(),
            count: count.max(1),
        })
    }

    /// Forward search by place name. An empty list means no match.
    pub async fn search_city(&self, name: &str) -> Result<Vec<GeocodingResult>> {
        let url = format!("{}/search", self.base_url);
        let count = self.count.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("name", name),
                ("count", count.as_str()),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| SkyPulseError::DataSourceUnavailable(format!("Geocoding: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SkyPulseError::DataSourceUnavailable(format!(
                "Geocoding API returned {}: {}",
                status, body
            )));
        }

        let search: OmSearchResponse = response.json().await.map_err(|e| {
            SkyPulseError::DataSourceUnavailable(format!(
                "Failed to parse geocoding response: {}",
                e
            ))
        })?;

        tracing::debug!("Geocoding '{}' -> {} candidates", name, search.results.len());
        Ok(search.results)
    }

    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("name", "London"), ("count", "1")])
            .send()
            .await
            .map_err(|e| SkyPulseError::DataSourceUnavailable(format!("Geocoding: {}", e)))?;

        Ok(response.status().is_success())
    }
}
