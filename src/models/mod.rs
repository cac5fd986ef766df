//! Data models for the Weatherscope toolkit
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates and display names
//! - Weather: Normalized per-day weather samples
//! - Forecast: Ordered forecast windows and lookup utilities
//! - Readings: Labelled values for a single picked date

pub mod forecast;
pub mod location;
pub mod readings;
pub mod weather;

// Re-export all public types for convenient access
pub use forecast::{Forecast, ForecastDay};
pub use location::Location;
pub use readings::{DailyReadings, Variable};
pub use weather::WeatherSample;
