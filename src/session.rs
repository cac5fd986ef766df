//! Selection state for one user session
//!
//! The picked location, requested date and chosen sport travel together in a
//! [`SessionContext`] that callers pass explicitly to the operations that
//! need them.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Forecast, ForecastDay, Location};
use crate::sports::{
    BestDay, SportCatalog, SportDefinition, SuitabilityResult, evaluate, find_best_days_limited,
};
use crate::{Result, WeatherscopeError};

/// Prompt shown when a search is requested before a sport and location are chosen
pub const MISSING_SELECTION_PROMPT: &str = "Please select a sport and location first!";

/// What the user has picked so far
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub location: Option<Location>,
    pub date: Option<NaiveDate>,
    pub sport: Option<String>,
}

impl SessionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    #[must_use]
    pub fn with_sport<S: Into<String>>(mut self, sport: S) -> Self {
        self.sport = Some(sport.into());
        self
    }

    /// The requested date clamped to `[today, today + window_days]`; today
    /// when no date was requested
    #[must_use]
    pub fn selected_date(&self, today: NaiveDate, window_days: u32) -> NaiveDate {
        let last = today + Duration::days(i64::from(window_days));
        match self.date {
            Some(date) if date < today => today,
            Some(date) if date > last => last,
            Some(date) => date,
            None => today,
        }
    }

    /// Resolve the chosen sport against the catalog
    pub fn resolve_sport<'c>(
        &self,
        catalog: &'c SportCatalog,
    ) -> Result<Option<&'c SportDefinition>> {
        self.sport
            .as_deref()
            .map(|name| catalog.get(name))
            .transpose()
    }

    /// Evaluate the selected day of a forecast for the chosen sport.
    ///
    /// Returns `None` when no sport is chosen or the forecast has no entry
    /// for the selected date.
    pub fn check_selected_day<'f>(
        &self,
        catalog: &SportCatalog,
        forecast: &'f Forecast,
        today: NaiveDate,
        window_days: u32,
    ) -> Result<Option<(&'f ForecastDay, SuitabilityResult)>> {
        let Some(sport) = self.resolve_sport(catalog)? else {
            return Ok(None);
        };
        let date = self.selected_date(today, window_days);
        debug!("Checking {} on {}", sport.name(), date);

        Ok(forecast
            .day(date)
            .map(|day| (day, evaluate(sport, &day.sample))))
    }

    /// Search the forecast for suitable days for the chosen sport.
    ///
    /// A missing sport or an empty forecast is reported as a validation error
    /// carrying [`MISSING_SELECTION_PROMPT`].
    pub fn find_best_days(
        &self,
        catalog: &SportCatalog,
        forecast: &Forecast,
        limit: usize,
    ) -> Result<Vec<BestDay>> {
        let sport = self.resolve_sport(catalog)?;
        match sport {
            Some(sport) if !forecast.is_empty() => {
                Ok(find_best_days_limited(sport, &forecast.days, limit))
            }
            _ => Err(WeatherscopeError::validation(MISSING_SELECTION_PROMPT)),
        }
    }
}
