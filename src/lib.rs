//! `Weatherscope` - weather exploration for outdoor sports
//!
//! This library decides whether a day's weather suits a sport, searches a
//! forecast window for the best days, answers rule-based weather chat
//! queries and simulates hazard markers for a map overlay. It also picks a
//! date's readings from NASA POWER or Weatherbit and exports them as CSV.

pub mod chat;
pub mod config;
pub mod error;
pub mod export;
pub mod hazards;
pub mod logging;
pub mod models;
pub mod session;
pub mod sports;
pub mod weather;

// Re-export core types for public API
pub use chat::{ChatIntent, DateQuery, interpret};
pub use config::WeatherscopeConfig;
pub use error::WeatherscopeError;
pub use hazards::{HazardKind, HazardReport};
pub use models::{DailyReadings, Forecast, ForecastDay, Location, WeatherSample};
pub use session::SessionContext;
pub use sports::{
    BestDay, SportCatalog, SportDefinition, SuitabilityResult, evaluate, find_best_days,
};
pub use weather::{
    ReadingsSource, load_forecast, load_nasa_power, load_weatherbit, read_forecast,
    resolve_readings,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherscopeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
