//! Configuration management for Weatherscope
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::WeatherscopeError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherscopeConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Forecast search settings
    #[serde(default)]
    pub search: SearchConfig,
    /// Sport catalog source
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Hazard simulation settings
    #[serde(default)]
    pub hazards: HazardsConfig,
    /// Daily readings sources
    #[serde(default)]
    pub sources: SourcesConfig,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Forecast search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of suitable days reported by a best-day search
    #[serde(default = "default_max_best_days")]
    pub max_best_days: usize,
    /// Length of the forecast window in days; selected dates are clamped to it
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,
}

/// Sport catalog source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON catalog file replacing the built-in sports
    pub path: Option<PathBuf>,
}

/// Hazard simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardsConfig {
    /// Fewest simulated events per hazard kind
    #[serde(default = "default_min_events")]
    pub min_events: usize,
    /// Most simulated events per hazard kind
    #[serde(default = "default_max_events")]
    pub max_events: usize,
}

/// Daily readings sources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Last date served by the NASA POWER archive; later dates use Weatherbit
    #[serde(default = "default_nasa_power_until")]
    pub nasa_power_until: NaiveDate,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_max_best_days() -> usize {
    crate::sports::MAX_BEST_DAYS
}

fn default_forecast_days() -> u32 {
    16
}

fn default_min_events() -> usize {
    3
}

fn default_max_events() -> usize {
    7
}

fn default_nasa_power_until() -> NaiveDate {
    crate::weather::NASA_POWER_LAST_DATE
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_best_days: default_max_best_days(),
            forecast_days: default_forecast_days(),
        }
    }
}

impl Default for HazardsConfig {
    fn default() -> Self {
        Self {
            min_events: default_min_events(),
            max_events: default_max_events(),
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            nasa_power_until: default_nasa_power_until(),
        }
    }
}

impl WeatherscopeConfig {
    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. WEATHERSCOPE__LOGGING__LEVEL=debug
        builder = builder.add_source(
            Environment::with_prefix("WEATHERSCOPE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: WeatherscopeConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weatherscope").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.search.max_best_days == 0 {
            self.search.max_best_days = default_max_best_days();
        }
        if self.search.forecast_days == 0 {
            self.search.forecast_days = default_forecast_days();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.search.forecast_days > 16 {
            return Err(WeatherscopeError::config(
                "Forecast window cannot exceed 16 days",
            )
            .into());
        }

        if self.search.max_best_days > 16 {
            return Err(WeatherscopeError::config(
                "Best-day search cannot report more than 16 days",
            )
            .into());
        }

        if self.hazards.min_events > self.hazards.max_events {
            return Err(WeatherscopeError::config(format!(
                "Hazard min_events ({}) cannot exceed max_events ({})",
                self.hazards.min_events, self.hazards.max_events
            ))
            .into());
        }

        if self.hazards.max_events > 50 {
            return Err(WeatherscopeError::config(
                "Hazard max_events cannot exceed 50",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherscopeError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherscopeError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
