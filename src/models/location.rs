use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A forward-search candidate from the geocoding API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodingResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub country: String,
}

impl GeocodingResult {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Nearest named place for a pair of coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceName {
    pub name: String,
    pub country: String,
}

impl PlaceName {
    pub fn unknown() -> Self {
        Self {
            name: "Unknown".to_string(),
            country: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub coordinates: Coordinates,
}

impl Location {
    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

impl From<&GeocodingResult> for Location {
    fn from(result: &GeocodingResult) -> Self {
        Self {
            name: result.name.clone(),
            country: result.country.clone(),
            coordinates: result.coordinates(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_bounds() {
        assert!(Coordinates::new(51.5, -0.12).is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, 181.0).is_valid());
    }

    #[test]
    fn display_name_omits_empty_country() {
        let mut loc = Location {
            name: "Reykjavík".into(),
            country: "Iceland".into(),
            coordinates: Coordinates::new(64.1, -21.9),
        };
        assert_eq!(loc.display_name(), "Reykjavík, Iceland");
        loc.country.clear();
        assert_eq!(loc.display_name(), "Reykjavík");
    }

    #[test]
    fn unknown_place_placeholder() {
        let place = PlaceName::unknown();
        assert_eq!(place.name, "Unknown");
        assert!(place.country.is_empty());
    }
}
