use super::{http_client, trim_base};
use crate::config::EndpointsConfig;
use crate::error::{Result, SkyPulseError};
use crate::models::PlaceName;
use serde::Deserialize;

/// Reverse geocoding against a Nominatim instance. Nominatim's usage policy
/// requires an identifying User-Agent, which `http_client` sets.
pub struct ReverseGeocoder {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    hamlet: Option<String>,
    country: Option<String>,
}

impl NominatimAddress {
    fn into_place(self) -> PlaceName {
        let name = self
            .city
            .or(self.town)
            .or(self.village)
            .or(self.hamlet)
            .unwrap_or_else(|| "Unknown Location".to_string());
        PlaceName {
            name,
            country: self.country.unwrap_or_default(),
        }
    }
}

impl ReverseGeocoder {
    pub fn new(endpoints: &EndpointsConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(endpoints)?,
            base_url: trim_base(&endpoints.reverse_geocoding_url).to_string(),
        })
    }

    /// Nearest named place. Never fails; any error yields `PlaceName::unknown()`.
    pub async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> PlaceName {
        match self.lookup(latitude, longitude).await {
            Ok(place) => place,
            Err(e) => {
                tracing::warn!("Reverse geocoding failed: {}", e);
                PlaceName::unknown()
            }
        }
    }

    async fn lookup(&self, latitude: f64, longitude: f64) -> Result<PlaceName> {
        let url = format!("{}/reverse", self.base_url);
        let lat = latitude.to_string();
        let lon = longitude.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[("lat", lat.as_str()), ("lon", lon.as_str()), ("format", "json")])
            .send()
            .await
            .map_err(|e| SkyPulseError::DataSourceUnavailable(format!("Nominatim: {}", e)))?;

        if !response.status().is_success() {
            return Err(SkyPulseError::DataSourceUnavailable(format!(
                "Nominatim returned {}",
                response.status()
            )));
        }

        let body: NominatimResponse = response.json().await.map_err(|e| {
            SkyPulseError::DataSourceUnavailable(format!("Failed to parse Nominatim response: {}", e))
        })?;

        let address = body
            .address
            .ok_or_else(|| SkyPulseError::InvalidData("Nominatim response has no address".into()))?;

        Ok(address.into_place())
    }

    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/reverse", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("lat", "51.5"), ("lon", "-0.12"), ("format", "json")])
            .send()
            .await
            .map_err(|e| SkyPulseError::DataSourceUnavailable(format!("Nominatim: {}", e)))?;

        Ok(response.status().is_success())
    }
}
