//! Location model for geographic coordinates and metadata

use serde::{Deserialize, Serialize};

/// A picked point on the map, optionally named by a geocoder
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Location name (city, town, region, etc.)
    pub name: String,
    /// Country name as returned by the geocoder
    pub country: Option<String>,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, name: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
            country: None,
        }
    }

    /// Create location with country
    #[must_use]
    pub fn with_country(latitude: f64, longitude: f64, name: String, country: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
            country: Some(country),
        }
    }

    /// Location named only by its coordinates
    #[must_use]
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Self {
        let mut location = Self::new(latitude, longitude, String::new());
        location.name = location.format_coordinates();
        location
    }

    /// Check that the coordinates are on the globe
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Name shown to the user: "City, Country", or just the city when the
    /// country is unknown or identical to it.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.country.as_deref() {
            Some(country) if !country.is_empty() && country != self.name => {
                format!("{}, {}", self.name, country)
            }
            _ => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let paris = Location::with_country(48.8566, 2.3522, "Paris".into(), "France".into());
        assert_eq!(paris.display_name(), "Paris, France");

        let monaco = Location::with_country(43.7384, 7.4246, "Monaco".into(), "Monaco".into());
        assert_eq!(monaco.display_name(), "Monaco");

        let blank = Location::with_country(0.0, 0.0, "Null Island".into(), String::new());
        assert_eq!(blank.display_name(), "Null Island");
    }

    #[test]
    fn test_from_coordinates() {
        let location = Location::from_coordinates(46.818_234, 8.227_456);
        assert_eq!(location.name, "46.8182, 8.2275");
        assert_eq!(location.format_coordinates(), "46.8182, 8.2275");
        assert!(location.is_valid());
        assert!(!Location::from_coordinates(91.0, 0.0).is_valid());
    }
}
