use crate::config::{Config, FallbackConfig};
use crate::datasources::{AirQualityClient, ForecastClient, GeocodingClient, ReverseGeocoder};
use crate::error::{Result, SkyPulseError};
use crate::models::{Coordinates, GeocodingResult, Location, Snapshot};
use std::sync::Arc;

/// Produces complete snapshots from the four upstream services.
///
/// Cheap to clone; each fetch task gets its own handle.
#[derive(Clone)]
pub struct SnapshotLoader {
    forecast: Arc<ForecastClient>,
    air_quality: Arc<AirQualityClient>,
    geocoding: Arc<GeocodingClient>,
    reverse: Arc<ReverseGeocoder>,
    fallback: FallbackConfig,
}

impl SnapshotLoader {
    pub fn new(config: &Config) -> Result<Self> {
        let endpoints = &config.endpoints;
        tracing::info!(
            "Weather endpoints: forecast={} air={} geocoding={} reverse={}",
            endpoints.forecast_url,
            endpoints.air_quality_url,
            endpoints.geocoding_url,
            endpoints.reverse_geocoding_url
        );

        Ok(Self {
            forecast: Arc::new(ForecastClient::new(endpoints)?),
            air_quality: Arc::new(AirQualityClient::new(endpoints)?),
            geocoding: Arc::new(GeocodingClient::new(
                endpoints,
                config.display.search_results,
            )?),
            reverse: Arc::new(ReverseGeocoder::new(endpoints)?),
            fallback: config.fallback.clone(),
        })
    }

    /// Load weather, air quality and place name for a coordinate pair.
    ///
    /// If forecast or air quality fails, the configured fallback city is
    /// loaded instead. When that fails too, the original error is returned.
    pub async fn load_by_coordinates(&self, coords: Coordinates) -> Result<Snapshot> {
        let err = match self.fetch_at(coords).await {
            Ok(snapshot) => return Ok(snapshot),
            Err(e) => e,
        };

        tracing::warn!(
            "Failed to load weather at {}: {}. Falling back to {}",
            coords,
            err,
            self.fallback.name
        );

        match self.fetch_for(self.fallback.location()).await {
            Ok(snapshot) => Ok(snapshot),
            Err(fallback_err) => {
                tracing::warn!("Fallback city failed as well: {}", fallback_err);
                Err(err)
            }
        }
    }

    /// Resolve a city by name and load its first match. No fallback.
    pub async fn load_by_city(&self, name: &str) -> Result<Snapshot> {
        let results = self.search(name).await?;
        let first = results
            .first()
            .ok_or_else(|| SkyPulseError::NotFound(name.to_string()))?;

        tracing::info!(
            "Resolved '{}' to {}, {} ({})",
            name,
            first.name,
            first.country,
            first.coordinates()
        );

        self.fetch_for(Location::from(first)).await
    }

    pub async fn search(&self, name: &str) -> Result<Vec<GeocodingResult>> {
        self.geocoding.search_city(name).await
    }

    pub async fn check_connections(&self) -> ConnectionStatus {
        let (forecast, air_quality, geocoding, reverse_geocoding) = tokio::join!(
            self.forecast.test_connection(),
            self.air_quality.test_connection(),
            self.geocoding.test_connection(),
            self.reverse.test_connection(),
        );

        ConnectionStatus {
            forecast: forecast.unwrap_or(false),
            air_quality: air_quality.unwrap_or(false),
            geocoding: geocoding.unwrap_or(false),
            reverse_geocoding: reverse_geocoding.unwrap_or(false),
        }
    }

    async fn fetch_at(&self, coords: Coordinates) -> Result<Snapshot> {
        let (weather, air_quality, place) = tokio::join!(
            self.forecast
                .get_weather_data(coords.latitude, coords.longitude),
            self.air_quality
                .get_air_quality(coords.latitude, coords.longitude),
            self.reverse.reverse_geocode(coords.latitude, coords.longitude),
        );

        let location = Location {
            name: place.name,
            country: place.country,
            coordinates: coords,
        };

        Ok(Snapshot::new(location, weather?, air_quality?))
    }

    async fn fetch_for(&self, location: Location) -> Result<Snapshot> {
        let coords = location.coordinates;
        let (weather, air_quality) = tokio::try_join!(
            self.forecast
                .get_weather_data(coords.latitude, coords.longitude),
            self.air_quality
                .get_air_quality(coords.latitude, coords.longitude),
        )?;

        Ok(Snapshot::new(location, weather, air_quality))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConnectionStatus {
    pub forecast: bool,
    pub air_quality: bool,
    pub geocoding: bool,
    pub reverse_geocoding: bool,
}

impl ConnectionStatus {
    pub fn all_connected(&self) -> bool {
        self.forecast && self.air_quality && self.geocoding && self.reverse_geocoding
    }

    pub fn any_connected(&self) -> bool {
        self.forecast || self.air_quality || self.geocoding || self.reverse_geocoding
    }

    pub fn core_connected(&self) -> bool {
        // A dashboard needs both of these; place names are cosmetic
        self.forecast && self.air_quality
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EndpointsConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn forecast_body(temp: f64) -> serde_json::Value {
        json!({
            "current_weather": { "temperature": temp, "windspeed": 8.0, "weathercode": 1, "time": "2024-06-01T10:00" },
            "hourly": {
                "time": ["2024-06-01T10:00", "2024-06-01T11:00"],
                "temperature_2m": [temp, temp],
                "relativehumidity_2m": [50, 50],
                "windspeed_10m": [8.0, 8.0],
                "uv_index": [3.0, 3.0]
            },
            "daily": {
                "time": ["2024-06-01"],
                "weathercode": [1],
                "temperature_2m_max": [temp],
                "temperature_2m_min": [temp]
            }
        })
    }

    fn air_body() -> serde_json::Value {
        json!({
            "current": { "us_aqi": 35, "pm2_5": 6.1 },
            "hourly": { "time": ["2024-06-01T10:00", "2024-06-01T11:00"], "us_aqi": [35, 30] }
        })
    }

    fn config_for(server: &MockServer) -> Config {
        Config {
            endpoints: EndpointsConfig::all_at(&server.uri()),
            fallback: FallbackConfig {
                name: "Fallbackton".into(),
                country: "Testland".into(),
                latitude: 51.5,
                longitude: -0.5,
            },
            ..Config::default()
        }
    }

    async fn mount_air(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/air-quality"))
            .respond_with(ResponseTemplate::new(200).set_body_json(air_body()))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn loads_coordinates_with_place_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(22.0)))
            .mount(&server)
            .await;
        mount_air(&server).await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "address": { "town": "Ambleside", "country": "United Kingdom" }
            })))
            .mount(&server)
            .await;

        let loader = SnapshotLoader::new(&config_for(&server)).unwrap();
        let snapshot = loader
            .load_by_coordinates(Coordinates::new(54.43, -2.96))
            .await
            .unwrap();

        assert_eq!(snapshot.location.name, "Ambleside");
        assert_eq!(snapshot.location.coordinates, Coordinates::new(54.43, -2.96));
        assert_eq!(snapshot.weather.current.temperature_c, 22.0);
        assert_eq!(snapshot.air_quality.aqi(), Some(35.0));
    }

    async fn mount_uncovered_air(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/air-quality"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "current": { "us_aqi": null, "pm2_5": null },
                "hourly": { "time": ["2024-06-01T10:00", "2024-06-01T11:00"], "us_aqi": [null, null] }
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn coordinates_without_aqi_coverage_keep_the_location() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(27.0)))
            .mount(&server)
            .await;
        mount_uncovered_air(&server).await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "address": { "village": "Willis Island", "country": "Australia" }
            })))
            .mount(&server)
            .await;

        let loader = SnapshotLoader::new(&config_for(&server)).unwrap();
        let snapshot = loader
            .load_by_coordinates(Coordinates::new(-16.29, 149.96))
            .await
            .unwrap();

        assert_eq!(snapshot.location.name, "Willis Island");
        assert_eq!(snapshot.weather.current.temperature_c, 27.0);
        assert_eq!(snapshot.air_quality.aqi(), None);
    }

    #[tokio::test]
    async fn city_without_aqi_coverage_loads() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    { "name": "Reef", "latitude": -18.3, "longitude": 147.7, "country": "Australia" }
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(26.0)))
            .mount(&server)
            .await;
        mount_uncovered_air(&server).await;

        let loader = SnapshotLoader::new(&config_for(&server)).unwrap();
        let snapshot = loader.load_by_city("Reef").await.unwrap();

        assert_eq!(snapshot.location.name, "Reef");
        assert_eq!(snapshot.air_quality.aqi(), None);
        assert_eq!(snapshot.air_quality.current.pm2_5, None);
    }

    #[tokio::test]
    async fn reverse_geocode_failure_does_not_fail_load() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(15.0)))
            .mount(&server)
            .await;
        mount_air(&server).await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let loader = SnapshotLoader::new(&config_for(&server)).unwrap();
        let snapshot = loader
            .load_by_coordinates(Coordinates::new(10.0, 10.0))
            .await
            .unwrap();
        assert_eq!(snapshot.location.name, "Unknown");
    }

    #[tokio::test]
    async fn forecast_failure_falls_back_to_configured_city() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("latitude", "10"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("latitude", "51.5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(12.0)))
            .mount(&server)
            .await;
        mount_air(&server).await;

        let loader = SnapshotLoader::new(&config_for(&server)).unwrap();
        let snapshot = loader
            .load_by_coordinates(Coordinates::new(10.0, 10.0))
            .await
            .unwrap();

        assert_eq!(snapshot.location.name, "Fallbackton");
        assert_eq!(snapshot.location.country, "Testland");
        assert_eq!(snapshot.weather.current.temperature_c, 12.0);
    }

    #[tokio::test]
    async fn fallback_failure_returns_original_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("latitude", "10"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("latitude", "51.5"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        mount_air(&server).await;

        let loader = SnapshotLoader::new(&config_for(&server)).unwrap();
        let err = loader
            .load_by_coordinates(Coordinates::new(10.0, 10.0))
            .await
            .unwrap_err();

        match err {
            SkyPulseError::DataSourceUnavailable(msg) => assert!(msg.contains("502")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn city_load_uses_first_candidate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    { "name": "Springfield", "latitude": 39.8, "longitude": -89.6, "country": "United States" },
                    { "name": "Springfield", "latitude": 37.2, "longitude": -93.3, "country": "United States" }
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("latitude", "39.8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(25.0)))
            .mount(&server)
            .await;
        mount_air(&server).await;

        let loader = SnapshotLoader::new(&config_for(&server)).unwrap();
        let snapshot = loader.load_by_city("Springfield").await.unwrap();

        assert_eq!(snapshot.location.name, "Springfield");
        assert_eq!(snapshot.location.coordinates.latitude, 39.8);
        assert_eq!(snapshot.weather.current.temperature_c, 25.0);
    }

    #[tokio::test]
    async fn unknown_city_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let loader = SnapshotLoader::new(&config_for(&server)).unwrap();
        let err = loader.load_by_city("Atlantis").await.unwrap_err();
        assert!(matches!(err, SkyPulseError::NotFound(_)));
        assert_eq!(err.banner(), "Location not found");
    }

    #[tokio::test]
    async fn city_load_does_not_fall_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{ "name": "Oslo", "latitude": 59.9, "longitude": 10.7, "country": "Norway" }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        mount_air(&server).await;

        let loader = SnapshotLoader::new(&config_for(&server)).unwrap();
        let err = loader.load_by_city("Oslo").await.unwrap_err();
        assert!(matches!(err, SkyPulseError::DataSourceUnavailable(_)));
    }

    #[tokio::test]
    async fn check_connections_reports_each_service() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let loader = SnapshotLoader::new(&config_for(&server)).unwrap();
        let status = loader.check_connections().await;

        assert!(status.forecast);
        assert!(status.geocoding);
        assert!(!status.air_quality);
        assert!(!status.reverse_geocoding);
        assert!(status.any_connected());
        assert!(!status.all_connected());
        assert!(!status.core_connected());
    }
}
