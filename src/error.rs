use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkyPulseError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl SkyPulseError {
    /// Single-line message shown in the dashboard banner.
    pub fn banner(&self) -> &'static str {
        match self {
            SkyPulseError::NotFound(_) => "Location not found",
            _ => "Failed to connect to weather services. Please try again.",
        }
    }
}

pub type Result<T> = std::result::Result<T, SkyPulseError>;
