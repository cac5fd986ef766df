use thiserror::Error;

use super::catalog::Threshold;

/// Inconsistencies found while building a sport catalog
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("catalog contains no sports")]
    Empty,

    #[error("sport name must not be empty")]
    EmptyName,

    #[error("sport '{0}' is defined more than once")]
    DuplicateSport(String),

    #[error("sport '{sport}' sets {threshold} but has no '{reason}' reason")]
    MissingReason {
        sport: String,
        threshold: Threshold,
        reason: &'static str,
    },

    #[error("sport '{sport}' has a non-finite {threshold}")]
    NonFiniteThreshold { sport: String, threshold: Threshold },

    #[error("sport '{sport}' has minTemp {min} above maxTemp {max}")]
    InvertedTemperatureRange { sport: String, min: f64, max: f64 },
}
