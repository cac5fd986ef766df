//! Sport definitions and the validated sport catalog
//!
//! A sport is described on disk by a [`SportRecord`]: a name, a table of
//! optional thresholds and a table of reason strings. Records are turned into
//! [`SportDefinition`]s only after every threshold has been checked to have a
//! finite limit and a matching reason, so evaluation never has to deal with a
//! missing explanation.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::CatalogError;

/// Sports shipped with the application, in display order
const BUILTIN_CATALOG: &str = include_str!("sports.json");

/// A named numeric bound a sport can set on a weather reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Threshold {
    MinTemp,
    MaxTemp,
    MaxWind,
    MaxHumidity,
    MaxPrecip,
    MaxUv,
    MinSnow,
    MaxClouds,
}

/// Kind of threshold breach, keyed the way reasons are keyed in catalog files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Violation {
    TooCold,
    TooHot,
    TooWindy,
    TooHumid,
    TooRainy,
    TooSunny,
    NotEnoughSnow,
    TooCloudy,
}

impl Threshold {
    /// All thresholds, in the order they are checked
    pub const ALL: [Threshold; 8] = [
        Threshold::MinTemp,
        Threshold::MaxTemp,
        Threshold::MaxWind,
        Threshold::MaxHumidity,
        Threshold::MaxPrecip,
        Threshold::MaxUv,
        Threshold::MinSnow,
        Threshold::MaxClouds,
    ];

    /// Key used for this threshold in catalog files
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Threshold::MinTemp => "minTemp",
            Threshold::MaxTemp => "maxTemp",
            Threshold::MaxWind => "maxWind",
            Threshold::MaxHumidity => "maxHumidity",
            Threshold::MaxPrecip => "maxPrecip",
            Threshold::MaxUv => "maxUV",
            Threshold::MinSnow => "minSnow",
            Threshold::MaxClouds => "maxClouds",
        }
    }

    /// The violation reported when this threshold is crossed
    #[must_use]
    pub fn violation(self) -> Violation {
        match self {
            Threshold::MinTemp => Violation::TooCold,
            Threshold::MaxTemp => Violation::TooHot,
            Threshold::MaxWind => Violation::TooWindy,
            Threshold::MaxHumidity => Violation::TooHumid,
            Threshold::MaxPrecip => Violation::TooRainy,
            Threshold::MaxUv => Violation::TooSunny,
            Threshold::MinSnow => Violation::NotEnoughSnow,
            Threshold::MaxClouds => Violation::TooCloudy,
        }
    }

    /// Unit suffix used when listing limits
    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            Threshold::MinTemp | Threshold::MaxTemp => "°C",
            Threshold::MaxWind => " m/s",
            Threshold::MaxHumidity | Threshold::MaxClouds => "%",
            Threshold::MaxPrecip | Threshold::MinSnow => " mm",
            Threshold::MaxUv => "",
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Violation {
    /// Key used for this violation in catalog files
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Violation::TooCold => "tooCold",
            Violation::TooHot => "tooHot",
            Violation::TooWindy => "tooWindy",
            Violation::TooHumid => "tooHumid",
            Violation::TooRainy => "tooRainy",
            Violation::TooSunny => "tooSunny",
            Violation::NotEnoughSnow => "notEnoughSnow",
            Violation::TooCloudy => "tooCloudy",
        }
    }
}

/// Threshold table of a catalog record; absent thresholds are not checked
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Conditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_temp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_temp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_wind: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_precip: Option<f64>,
    #[serde(rename = "maxUV", skip_serializing_if = "Option::is_none")]
    pub max_uv: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_snow: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_clouds: Option<f64>,
}

impl Conditions {
    #[must_use]
    pub fn get(&self, threshold: Threshold) -> Option<f64> {
        match threshold {
            Threshold::MinTemp => self.min_temp,
            Threshold::MaxTemp => self.max_temp,
            Threshold::MaxWind => self.max_wind,
            Threshold::MaxHumidity => self.max_humidity,
            Threshold::MaxPrecip => self.max_precip,
            Threshold::MaxUv => self.max_uv,
            Threshold::MinSnow => self.min_snow,
            Threshold::MaxClouds => self.max_clouds,
        }
    }

    fn set(&mut self, threshold: Threshold, limit: f64) {
        let slot = match threshold {
            Threshold::MinTemp => &mut self.min_temp,
            Threshold::MaxTemp => &mut self.max_temp,
            Threshold::MaxWind => &mut self.max_wind,
            Threshold::MaxHumidity => &mut self.max_humidity,
            Threshold::MaxPrecip => &mut self.max_precip,
            Threshold::MaxUv => &mut self.max_uv,
            Threshold::MinSnow => &mut self.min_snow,
            Threshold::MaxClouds => &mut self.max_clouds,
        };
        *slot = Some(limit);
    }
}

/// Reason table of a catalog record.
///
/// `tooWarm` is read as an alias of `tooHot`; a record carrying both is
/// rejected by the parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Reasons {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub too_cold: Option<String>,
    #[serde(alias = "tooWarm", skip_serializing_if = "Option::is_none")]
    pub too_hot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub too_windy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub too_humid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub too_rainy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub too_sunny: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_enough_snow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub too_cloudy: Option<String>,
}

impl Reasons {
    #[must_use]
    pub fn get(&self, violation: Violation) -> Option<&str> {
        match violation {
            Violation::TooCold => self.too_cold.as_deref(),
            Violation::TooHot => self.too_hot.as_deref(),
            Violation::TooWindy => self.too_windy.as_deref(),
            Violation::TooHumid => self.too_humid.as_deref(),
            Violation::TooRainy => self.too_rainy.as_deref(),
            Violation::TooSunny => self.too_sunny.as_deref(),
            Violation::NotEnoughSnow => self.not_enough_snow.as_deref(),
            Violation::TooCloudy => self.too_cloudy.as_deref(),
        }
    }

    fn set(&mut self, violation: Violation, reason: String) {
        let slot = match violation {
            Violation::TooCold => &mut self.too_cold,
            Violation::TooHot => &mut self.too_hot,
            Violation::TooWindy => &mut self.too_windy,
            Violation::TooHumid => &mut self.too_humid,
            Violation::TooRainy => &mut self.too_rainy,
            Violation::TooSunny => &mut self.too_sunny,
            Violation::NotEnoughSnow => &mut self.not_enough_snow,
            Violation::TooCloudy => &mut self.too_cloudy,
        };
        *slot = Some(reason);
    }
}

/// A sport as written in a catalog file, before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SportRecord {
    pub name: String,
    #[serde(default)]
    pub conditions: Conditions,
    #[serde(default)]
    pub reason: Reasons,
}

/// One threshold of a sport together with the reason shown when it is crossed
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub threshold: Threshold,
    pub limit: f64,
    pub reason: String,
}

/// A validated sport: every rule has a finite limit and an explanation.
///
/// Rules are kept in check order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "SportRecord")]
pub struct SportDefinition {
    name: String,
    rules: Vec<Rule>,
}

impl SportDefinition {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Thresholds this sport sets, in check order
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Limit set for a threshold, if the sport checks it
    #[must_use]
    pub fn limit(&self, threshold: Threshold) -> Option<f64> {
        self.rules
            .iter()
            .find(|r| r.threshold == threshold)
            .map(|r| r.limit)
    }
}

impl TryFrom<SportRecord> for SportDefinition {
    type Error = CatalogError;

    fn try_from(record: SportRecord) -> Result<Self, Self::Error> {
        let name = record.name.trim().to_string();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }

        let mut rules = Vec::new();
        for threshold in Threshold::ALL {
            let Some(limit) = record.conditions.get(threshold) else {
                continue;
            };
            if !limit.is_finite() {
                return Err(CatalogError::NonFiniteThreshold {
                    sport: name,
                    threshold,
                });
            }
            let violation = threshold.violation();
            let Some(reason) = record.reason.get(violation) else {
                return Err(CatalogError::MissingReason {
                    sport: name,
                    threshold,
                    reason: violation.key(),
                });
            };
            rules.push(Rule {
                threshold,
                limit,
                reason: reason.to_string(),
            });
        }

        if let (Some(min), Some(max)) = (record.conditions.min_temp, record.conditions.max_temp) {
            if min > max {
                return Err(CatalogError::InvertedTemperatureRange {
                    sport: name,
                    min,
                    max,
                });
            }
        }

        Ok(Self { name, rules })
    }
}

impl From<SportDefinition> for SportRecord {
    fn from(sport: SportDefinition) -> Self {
        let mut conditions = Conditions::default();
        let mut reason = Reasons::default();
        for rule in sport.rules {
            conditions.set(rule.threshold, rule.limit);
            reason.set(rule.threshold.violation(), rule.reason);
        }
        SportRecord {
            name: sport.name,
            conditions,
            reason,
        }
    }
}

/// Ordered, validated set of sports; order is display order only
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SportCatalog {
    sports: Vec<SportDefinition>,
}

impl SportCatalog {
    /// Build a catalog, rejecting empty catalogs and duplicate names
    pub fn new(sports: Vec<SportDefinition>) -> Result<Self, CatalogError> {
        if sports.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for sport in &sports {
            if !seen.insert(sport.name()) {
                return Err(CatalogError::DuplicateSport(sport.name().to_string()));
            }
        }

        Ok(Self { sports })
    }

    /// Validate raw records and build a catalog from them
    pub fn from_records(records: Vec<SportRecord>) -> Result<Self, CatalogError> {
        let sports = records
            .into_iter()
            .map(SportDefinition::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(sports)
    }

    /// Parse and validate a JSON catalog document
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let records: Vec<SportRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records)?)
    }

    /// The catalog shipped with the application
    pub fn builtin() -> crate::Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Load a catalog file from disk
    pub fn load(path: &Path) -> crate::Result<Self> {
        debug!("Loading sport catalog from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Look up a sport by its exact name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&SportDefinition> {
        self.sports.iter().find(|s| s.name() == name)
    }

    /// Look up a sport by its exact name, reporting the choices on failure
    pub fn get(&self, name: &str) -> crate::Result<&SportDefinition> {
        self.find(name).ok_or_else(|| {
            crate::WeatherscopeError::validation(format!(
                "Unknown sport '{name}'. Choose one of: {}",
                self.names().join(", ")
            ))
        })
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.sports.iter().map(SportDefinition::name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SportDefinition> {
        self.sports.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sports.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sports.is_empty()
    }
}
