//! Daily forecast model and lookup helpers

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Location, WeatherSample};

/// One calendar day of a forecast window
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastDay {
    /// Calendar date this record is valid for
    pub date: NaiveDate,
    /// Day-level readings used for suitability checks
    pub sample: WeatherSample,
    /// Daily maximum temperature in Celsius
    #[serde(default)]
    pub max_temp: f64,
    /// Daily minimum temperature in Celsius
    #[serde(default)]
    pub min_temp: f64,
}

impl ForecastDay {
    /// Create a day whose extremes equal its mean temperature
    #[must_use]
    pub fn new(date: NaiveDate, sample: WeatherSample) -> Self {
        Self {
            date,
            max_temp: sample.temp,
            min_temp: sample.temp,
            sample,
        }
    }
}

/// Multi-day forecast, ordered by date
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Forecast {
    /// Where the forecast applies, when the source names it
    pub location: Option<Location>,
    /// Forecast days in chronological order
    pub days: Vec<ForecastDay>,
}

impl Forecast {
    /// Create new forecast; days are sorted chronologically
    #[must_use]
    pub fn new(location: Option<Location>, mut days: Vec<ForecastDay>) -> Self {
        days.sort_by_key(|d| d.date);
        Self { location, days }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Name used in messages, falling back to a neutral label
    #[must_use]
    pub fn location_name(&self) -> String {
        self.location
            .as_ref()
            .map_or_else(|| "the selected location".to_string(), Location::display_name)
    }

    /// Get the forecast for an exact date
    #[must_use]
    pub fn day(&self, date: NaiveDate) -> Option<&ForecastDay> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Get the forecast for a date, or the first available day when the
    /// date is not covered
    #[must_use]
    pub fn day_or_first(&self, date: NaiveDate) -> Option<&ForecastDay> {
        self.day(date).or_else(|| self.days.first())
    }

    /// Days strictly after `today` and at most seven days ahead
    #[must_use]
    pub fn next_week(&self, today: NaiveDate) -> Vec<&ForecastDay> {
        let end = today + Duration::days(7);
        self.days
            .iter()
            .filter(|d| d.date > today && d.date <= end)
            .collect()
    }
}
