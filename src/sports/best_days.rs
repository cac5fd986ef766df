//! Search a forecast window for days that suit a sport

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, instrument};

use super::catalog::SportDefinition;
use super::evaluator::{SuitabilityResult, evaluate};
use crate::models::ForecastDay;

/// How many qualifying days a search reports by default
pub const MAX_BEST_DAYS: usize = 7;

/// A forecast day that suits the sport
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestDay {
    pub date: NaiveDate,
    pub suitability: SuitabilityResult,
}

/// First [`MAX_BEST_DAYS`] suitable days, in forecast order
#[must_use]
pub fn find_best_days(sport: &SportDefinition, forecast: &[ForecastDay]) -> Vec<BestDay> {
    find_best_days_limited(sport, forecast, MAX_BEST_DAYS)
}

/// First `limit` suitable days, in forecast order.
///
/// Days are taken as they come; the result is not ranked.
#[must_use]
#[instrument(
    level = "debug",
    skip_all,
    fields(sport = %sport.name(), days = forecast.len(), limit = limit)
)]
pub fn find_best_days_limited(
    sport: &SportDefinition,
    forecast: &[ForecastDay],
    limit: usize,
) -> Vec<BestDay> {
    let best: Vec<BestDay> = forecast
        .iter()
        .map(|day| BestDay {
            date: day.date,
            suitability: evaluate(sport, &day.sample),
        })
        .filter(|day| day.suitability.suitable)
        .take(limit)
        .collect();

    debug!("Found {} suitable days", best.len());
    best
}
