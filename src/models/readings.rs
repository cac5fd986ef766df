//! Labelled daily readings for a single date, as shown in the data panel

use chrono::NaiveDate;
use serde::Serialize;

/// A reading shown for a picked date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    Temp,
    TempMax,
    TempMin,
    WindSpeed,
    Humidity,
    SolarRadiation,
}

impl Variable {
    /// All variables, in display order
    pub const ALL: [Variable; 6] = [
        Variable::Temp,
        Variable::TempMax,
        Variable::TempMin,
        Variable::WindSpeed,
        Variable::Humidity,
        Variable::SolarRadiation,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Variable::Temp => "Temperature (°C)",
            Variable::TempMax => "Max Temperature (°C)",
            Variable::TempMin => "Min Temperature (°C)",
            Variable::WindSpeed => "Wind Speed (m/s)",
            Variable::Humidity => "Relative Humidity (%)",
            Variable::SolarRadiation => "Solar Radiation (W/m²)",
        }
    }
}

/// Readings for one date; a variable the source did not report is `None`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailyReadings {
    pub date: Option<NaiveDate>,
    pub temp: Option<f64>,
    pub temp_max: Option<f64>,
    pub temp_min: Option<f64>,
    pub wind_speed: Option<f64>,
    pub humidity: Option<f64>,
    pub solar_radiation: Option<f64>,
}

impl DailyReadings {
    #[must_use]
    pub fn get(&self, variable: Variable) -> Option<f64> {
        match variable {
            Variable::Temp => self.temp,
            Variable::TempMax => self.temp_max,
            Variable::TempMin => self.temp_min,
            Variable::WindSpeed => self.wind_speed,
            Variable::Humidity => self.humidity,
            Variable::SolarRadiation => self.solar_radiation,
        }
    }

    pub fn set(&mut self, variable: Variable, value: Option<f64>) {
        let slot = match variable {
            Variable::Temp => &mut self.temp,
            Variable::TempMax => &mut self.temp_max,
            Variable::TempMin => &mut self.temp_min,
            Variable::WindSpeed => &mut self.wind_speed,
            Variable::Humidity => &mut self.humidity,
            Variable::SolarRadiation => &mut self.solar_radiation,
        };
        *slot = value;
    }

    /// Reported variables with their values, in display order
    #[must_use]
    pub fn present(&self) -> Vec<(Variable, f64)> {
        Variable::ALL
            .into_iter()
            .filter_map(|v| self.get(v).map(|value| (v, value)))
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.present().is_empty()
    }

    /// "Label: value" lines for reported variables
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.present()
            .into_iter()
            .map(|(variable, value)| format!("{}: {value}", variable.label()))
            .collect()
    }
}
