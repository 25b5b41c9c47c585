use crate::error::{Result, SkyPulseError};
use crate::models::{Coordinates, DisplayMode, Location};
use dialoguer::{Input, Select};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Coordinates used by "locate"; without them locate goes straight to the fallback city.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<HomeConfig>,
    #[serde(default)]
    pub fallback: FallbackConfig,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct HomeConfig {
    pub latitude: f64,
    pub longitude: f64,
}

impl HomeConfig {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// City loaded when a coordinate lookup fails.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FallbackConfig {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl FallbackConfig {
    pub fn location(&self) -> Location {
        Location {
            name: self.name.clone(),
            country: self.country.clone(),
            coordinates: Coordinates::new(self.latitude, self.longitude),
        }
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            name: "London".into(),
            country: "United Kingdom".into(),
            latitude: 51.5085,
            longitude: -0.1257,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointsConfig {
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    #[serde(default = "default_air_quality_url")]
    pub air_quality_url: String,
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    #[serde(default = "default_reverse_geocoding_url")]
    pub reverse_geocoding_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1".into()
}

fn default_air_quality_url() -> String {
    "https://air-quality-api.open-meteo.com/v1".into()
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".into()
}

fn default_reverse_geocoding_url() -> String {
    "https://nominatim.openstreetmap.org".into()
}

fn default_user_agent() -> String {
    format!("skypulse/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            forecast_url: default_forecast_url(),
            air_quality_url: default_air_quality_url(),
            geocoding_url: default_geocoding_url(),
            reverse_geocoding_url: default_reverse_geocoding_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EndpointsConfig {
    /// Every endpoint pointed at one base URL. Used by the mock-server tests.
    #[cfg(test)]
    pub fn all_at(base: &str) -> Self {
        Self {
            forecast_url: base.to_string(),
            air_quality_url: base.to_string(),
            geocoding_url: base.to_string(),
            reverse_geocoding_url: base.to_string(),
            user_agent: "skypulse-test".into(),
            timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub mode: DisplayMode,
    #[serde(default = "default_search_results")]
    pub search_results: u8,
    #[serde(default = "default_fact_interval_secs")]
    pub fact_interval_secs: u64,
}

fn default_search_results() -> u8 {
    5
}

fn default_fact_interval_secs() -> u64 {
    5
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::default(),
            search_results: default_search_results(),
            fact_interval_secs: default_fact_interval_secs(),
        }
    }
}

impl Config {
    /// Load config.yaml, or built-in defaults when none exists. Open-Meteo
    /// needs no credentials, so a missing file is not an error.
    pub fn load(config_override: Option<&PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p.clone(),
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            if config_override.is_some() {
                return Err(SkyPulseError::Config(format!(
                    "Config file not found at {:?}",
                    config_path
                )));
            }
            tracing::info!("No config file found, using defaults");
            return Ok(Self::default());
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| SkyPulseError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&config_str)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);

        serde_yaml::from_str(&content)
            .map_err(|e| SkyPulseError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("skypulse").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    /// Default path for writing new config files (~/.config/skypulse/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SkyPulseError::Config("Cannot determine config directory".into()))?
            .join("skypulse");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up SkyPulse!");
        println!();

        let defaults = Config::default();

        // --- Home location (optional) ---
        println!("Home location (leave latitude blank to skip)");
        let home_lat: String = Input::new()
            .with_prompt("  Latitude")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(input_error)?;

        let home = if home_lat.trim().is_empty() {
            None
        } else {
            let latitude: f64 = home_lat
                .trim()
                .parse()
                .map_err(|_| SkyPulseError::Config(format!("Invalid latitude '{}'", home_lat)))?;
            let longitude: f64 = Input::new()
                .with_prompt("  Longitude")
                .interact_text()
                .map_err(input_error)?;
            Some(HomeConfig {
                latitude,
                longitude,
            })
        };

        println!();

        // --- Fallback city ---
        println!("Fallback city (shown when your location cannot be loaded)");
        let fb_name: String = Input::new()
            .with_prompt("  Name")
            .default(defaults.fallback.name.clone())
            .interact_text()
            .map_err(input_error)?;

        let fb_country: String = Input::new()
            .with_prompt("  Country")
            .default(defaults.fallback.country.clone())
            .interact_text()
            .map_err(input_error)?;

        let fb_latitude: f64 = Input::new()
            .with_prompt("  Latitude")
            .default(defaults.fallback.latitude)
            .interact_text()
            .map_err(input_error)?;

        let fb_longitude: f64 = Input::new()
            .with_prompt("  Longitude")
            .default(defaults.fallback.longitude)
            .interact_text()
            .map_err(input_error)?;

        println!();

        // --- Display ---
        println!("Display");
        let modes = ["vivid", "calm"];
        let mode_idx = Select::new()
            .with_prompt("  Mode")
            .items(&modes)
            .default(0)
            .interact()
            .map_err(input_error)?;

        println!();

        let config = Config {
            home,
            fallback: FallbackConfig {
                name: fb_name,
                country: fb_country,
                latitude: fb_latitude,
                longitude: fb_longitude,
            },
            endpoints: EndpointsConfig::default(),
            display: DisplayConfig {
                mode: modes[mode_idx].parse().unwrap_or_default(),
                ..DisplayConfig::default()
            },
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| SkyPulseError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# SkyPulse Configuration\n# Generated by `skypulse init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let Ok(re) = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") else {
            return content.to_string();
        };

        let mut result = content.to_string();
        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn data_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("SKYPULSE_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| SkyPulseError::Config("Cannot determine data directory".into()))?
            .join("skypulse");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("skypulse.log"))
    }
}

fn input_error(e: dialoguer::Error) -> SkyPulseError {
    SkyPulseError::Config(format!("Input error: {}", e))
}
