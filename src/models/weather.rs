//! Weather sample model and display methods

use serde::{Deserialize, Serialize};

/// One day (or hour) of observed or forecast weather, as seen by the evaluator.
///
/// Required measurements default to `0.0` when a document omits them, so a
/// sample never carries a missing temperature, wind, humidity, precipitation
/// or UV value. Snow, cloud cover and solar radiation stay optional because
/// an absent value means something different from zero for some checks.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct WeatherSample {
    /// Temperature in Celsius
    pub temp: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: f64,
    /// Precipitation amount in mm
    pub precip: f64,
    /// UV index
    pub uv: f64,
    /// Snowfall in mm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snow: Option<f64>,
    /// Cloud cover percentage (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clouds: Option<f64>,
    /// Solar radiation in W/m²
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solar_radiation: Option<f64>,
}

impl WeatherSample {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.temp)
    }

    /// Format wind speed with unit
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{:.1} m/s", self.wind_speed)
    }

    /// Labelled readings in display order, one entry per line
    #[must_use]
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Temp: {}", self.format_temperature()),
            format!("Wind: {}", self.format_wind()),
            format!("Humidity: {}%", self.humidity),
            format!("Precipitation: {} mm", self.precip),
            format!("UV Index: {}", self.uv),
        ];
        if let Some(clouds) = self.clouds {
            lines.push(format!("Cloud Cover: {clouds}%"));
        }
        if let Some(snow) = self.snow {
            lines.push(format!("Snow: {snow} mm"));
        }
        if let Some(solar) = self.solar_radiation {
            lines.push(format!("Solar Radiation: {solar} W/m²"));
        }
        lines
    }
}
