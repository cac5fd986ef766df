use serde::Serialize;

use super::catalog::{Rule, SportDefinition, Threshold, Violation};
use crate::models::WeatherSample;

/// Separator placed between reasons when several thresholds are crossed
pub const REASON_SEPARATOR: &str = " AND ";

/// Verdict for one sport on one day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuitabilityResult {
    pub suitable: bool,
    pub message: String,
    /// Crossed thresholds, in check order
    pub violations: Vec<Violation>,
}

impl Rule {
    /// Whether the sample crosses this rule's limit. Values equal to the limit pass.
    #[must_use]
    pub fn is_violated_by(&self, weather: &WeatherSample) -> bool {
        let limit = self.limit;
        match self.threshold {
            Threshold::MinTemp => weather.temp < limit,
            Threshold::MaxTemp => weather.temp > limit,
            Threshold::MaxWind => weather.wind_speed > limit,
            Threshold::MaxHumidity => weather.humidity > limit,
            Threshold::MaxPrecip => weather.precip > limit,
            Threshold::MaxUv => weather.uv > limit,
            // no snow report means no snow to ski on
            Threshold::MinSnow => weather.snow.is_none_or(|snow| snow < limit),
            Threshold::MaxClouds => weather.clouds.is_some_and(|clouds| clouds > limit),
        }
    }
}

/// Score a day's weather against a sport's thresholds.
///
/// Every rule is checked; all crossed rules contribute their reason.
#[must_use]
pub fn evaluate(sport: &SportDefinition, weather: &WeatherSample) -> SuitabilityResult {
    let crossed: Vec<&Rule> = sport
        .rules()
        .iter()
        .filter(|rule| rule.is_violated_by(weather))
        .collect();

    if crossed.is_empty() {
        return SuitabilityResult {
            suitable: true,
            message: format!("Great weather for {}!", sport.name()),
            violations: Vec::new(),
        };
    }

    let message = crossed
        .iter()
        .map(|rule| rule.reason.as_str())
        .collect::<Vec<_>>()
        .join(REASON_SEPARATOR);

    SuitabilityResult {
        suitable: false,
        message,
        violations: crossed.iter().map(|rule| rule.threshold.violation()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sports::SportCatalog;
    use rstest::{fixture, rstest};

    #[fixture]
    fn catalog() -> SportCatalog {
        SportCatalog::builtin().unwrap()
    }

    fn sample(temp: f64, wind_speed: f64, humidity: f64, precip: f64, uv: f64) -> WeatherSample {
        WeatherSample {
            temp,
            wind_speed,
            humidity,
            precip,
            uv,
            ..Default::default()
        }
    }

    #[rstest]
    fn test_football_too_cold(catalog: SportCatalog) {
        let football = catalog.find("Football").unwrap();
        let result = evaluate(football, &sample(2.0, 3.0, 50.0, 0.0, 0.0));

        assert!(!result.suitable);
        assert_eq!(result.message, "Too cold for safe play.");
        assert_eq!(result.violations, vec![Violation::TooCold]);
    }

    #[rstest]
    fn test_tennis_all_within_limits(catalog: SportCatalog) {
        let tennis = catalog.find("Tennis").unwrap();
        let result = evaluate(tennis, &sample(20.0, 3.0, 40.0, 0.0, 5.0));

        assert!(result.suitable);
        assert_eq!(result.message, "Great weather for Tennis!");
        assert!(result.violations.is_empty());
    }

    #[rstest]
    fn test_skiing_without_snow_report(catalog: SportCatalog) {
        let skiing = catalog.find("Skiing").unwrap();
        let result = evaluate(skiing, &sample(-2.0, 4.0, 0.0, 0.0, 0.0));

        assert!(!result.suitable);
        assert!(result.message.contains("Not enough snow to ski safely."));
    }

    #[rstest]
    fn test_skiing_with_fresh_snow(catalog: SportCatalog) {
        let skiing = catalog.find("Skiing").unwrap();
        let weather = WeatherSample {
            snow: Some(10.0),
            ..sample(-2.0, 4.0, 0.0, 0.0, 0.0)
        };
        assert!(evaluate(skiing, &weather).suitable);
    }

    #[rstest]
    #[case::min_temp("Football", sample(5.0, 0.0, 0.0, 0.0, 0.0))]
    #[case::max_temp("Football", sample(35.0, 0.0, 0.0, 0.0, 0.0))]
    #[case::max_wind("Football", sample(20.0, 10.0, 0.0, 0.0, 0.0))]
    #[case::max_humidity("Football", sample(20.0, 0.0, 85.0, 0.0, 0.0))]
    #[case::max_precip("Football", sample(20.0, 0.0, 0.0, 5.0, 0.0))]
    #[case::max_uv("Tennis", sample(20.0, 0.0, 0.0, 0.0, 8.0))]
    fn test_boundary_values_pass(
        catalog: SportCatalog,
        #[case] sport: &str,
        #[case] weather: WeatherSample,
    ) {
        let result = evaluate(catalog.find(sport).unwrap(), &weather);
        assert!(result.suitable, "{sport}: {}", result.message);
    }

    #[rstest]
    fn test_snow_and_cloud_boundaries(catalog: SportCatalog) {
        let skiing = catalog.find("Skiing").unwrap();
        let weather = WeatherSample {
            snow: Some(9.9),
            ..sample(0.0, 0.0, 0.0, 0.0, 0.0)
        };
        assert!(!evaluate(skiing, &weather).suitable);

        let hiking = catalog.find("Hiking").unwrap();
        let mut weather = sample(15.0, 2.0, 50.0, 0.0, 3.0);
        weather.clouds = Some(95.0);
        assert!(evaluate(hiking, &weather).suitable);
        weather.clouds = Some(96.0);
        assert_eq!(
            evaluate(hiking, &weather).message,
            "Visibility may be poor for hiking."
        );
        weather.clouds = None;
        assert!(evaluate(hiking, &weather).suitable);
    }

    #[rstest]
    fn test_violations_accumulate_in_check_order(catalog: SportCatalog) {
        let hiking = catalog.find("Hiking").unwrap();
        let weather = WeatherSample {
            clouds: Some(100.0),
            ..sample(40.0, 12.0, 90.0, 6.0, 10.0)
        };
        let result = evaluate(hiking, &weather);

        assert_eq!(
            result.violations,
            vec![
                Violation::TooHot,
                Violation::TooWindy,
                Violation::TooHumid,
                Violation::TooRainy,
                Violation::TooSunny,
                Violation::TooCloudy,
            ]
        );
        assert_eq!(
            result.message,
            "Too hot, risk of heatstroke during hiking. AND \
             High winds make hiking dangerous in exposed areas. AND \
             High humidity makes hiking exhausting. AND \
             Trails unsafe or muddy due to rain. AND \
             UV index too high, risk of sunburn. AND \
             Visibility may be poor for hiking."
        );
    }

    #[rstest]
    fn test_temperature_and_wind_together(catalog: SportCatalog) {
        let cycling = catalog.find("Cycling").unwrap();
        let result = evaluate(cycling, &sample(1.0, 15.0, 0.0, 0.0, 0.0));
        assert_eq!(
            result.message,
            "Too cold for cycling. AND Strong winds make cycling unsafe."
        );
    }

    #[rstest]
    fn test_missing_precip_never_rains_out(catalog: SportCatalog) {
        let football = catalog.find("Football").unwrap();
        let weather: WeatherSample =
            serde_json::from_str(r#"{"temp": 20, "wind_speed": 3, "humidity": 50}"#).unwrap();
        assert!(!evaluate(football, &weather).violations.contains(&Violation::TooRainy));
    }

    #[rstest]
    fn test_evaluation_is_deterministic(catalog: SportCatalog) {
        let running = catalog.find("Running").unwrap();
        let weather = sample(31.0, 0.0, 90.0, 0.0, 0.0);
        assert_eq!(evaluate(running, &weather), evaluate(running, &weather));
    }
}
