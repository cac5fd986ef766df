//! Sports module
//!
//! This module decides whether a day's weather suits an outdoor sport:
//! - Sport catalog with validated thresholds and reason strings
//! - Suitability evaluation of a single weather sample
//! - Best-day search over a forecast window

pub mod best_days;
pub mod catalog;
pub mod error;
pub mod evaluator;

// Re-export commonly used types from submodules
pub use best_days::{BestDay, MAX_BEST_DAYS, find_best_days, find_best_days_limited};
pub use catalog::{
    Conditions, Reasons, Rule, SportCatalog, SportDefinition, SportRecord, Threshold, Violation,
};
pub use error::CatalogError;
pub use evaluator::{REASON_SEPARATOR, SuitabilityResult, evaluate};
