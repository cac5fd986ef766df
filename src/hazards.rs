//! Simulated natural hazard markers for a map overlay

use chrono::NaiveDate;
use rand::RngExt;
use serde::Serialize;
use tracing::debug;

use crate::config::HazardsConfig;

/// Fill opacity of markers for dates that have not happened yet
pub const PREDICTED_OPACITY: f64 = 0.4;
/// Fill opacity of markers for today and the past
pub const OBSERVED_OPACITY: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardKind {
    Earthquake,
    Storm,
    Tornado,
}

impl HazardKind {
    pub const ALL: [HazardKind; 3] = [Self::Earthquake, Self::Storm, Self::Tornado];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Earthquake => "Earthquake",
            Self::Storm => "Storm",
            Self::Tornado => "Tornado",
        }
    }

    /// Marker colour
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Earthquake => "red",
            Self::Storm => "blue",
            Self::Tornado => "purple",
        }
    }
}

impl std::fmt::Display for HazardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HazardEvent {
    pub kind: HazardKind,
    pub latitude: f64,
    pub longitude: f64,
    /// Magnitude on a 1.0 - 4.0 scale, one decimal
    pub severity: f64,
    pub place: String,
    pub color: &'static str,
    pub opacity: f64,
    pub predicted: bool,
}

/// Events for one hazard kind on one date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HazardLayer {
    pub kind: HazardKind,
    /// Set when the events must come from an observation feed instead of
    /// the simulator
    pub needs_observed_feed: bool,
    pub events: Vec<HazardEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HazardReport {
    pub date: NaiveDate,
    pub predicted: bool,
    pub layers: Vec<HazardLayer>,
}

impl HazardReport {
    /// Total number of simulated events across all layers
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.layers.iter().map(|l| l.events.len()).sum()
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Simulate the events of one kind
pub fn simulate_events<R: RngExt + ?Sized>(
    rng: &mut R,
    kind: HazardKind,
    predicted: bool,
    config: &HazardsConfig,
) -> Vec<HazardEvent> {
    // an inverted range from a hand-built config is read as its reverse
    let low = config.min_events.min(config.max_events);
    let high = config.min_events.max(config.max_events);
    let count = rng.random_range(low..=high);
    let opacity = if predicted {
        PREDICTED_OPACITY
    } else {
        OBSERVED_OPACITY
    };

    (0..count)
        .map(|_| HazardEvent {
            kind,
            latitude: rng.random_range(-60.0..60.0),
            longitude: rng.random_range(-180.0..180.0),
            severity: round_one_decimal(rng.random_range(1.0..4.0)),
            place: format!("{} Event", kind.label()),
            color: kind.color(),
            opacity,
            predicted,
        })
        .collect()
}

/// Build the hazard overlay for `date`.
///
/// Storms and tornadoes are always simulated. Earthquakes are only simulated
/// for future dates; for today and the past their layer is left empty and
/// flagged as needing the observed feed.
pub fn simulate<R: RngExt + ?Sized>(
    rng: &mut R,
    date: NaiveDate,
    today: NaiveDate,
    config: &HazardsConfig,
) -> HazardReport {
    let predicted = date > today;

    let layers = HazardKind::ALL
        .into_iter()
        .map(|kind| {
            if kind == HazardKind::Earthquake && !predicted {
                HazardLayer {
                    kind,
                    needs_observed_feed: true,
                    events: Vec::new(),
                }
            } else {
                HazardLayer {
                    kind,
                    needs_observed_feed: false,
                    events: simulate_events(rng, kind, predicted, config),
                }
            }
        })
        .collect();

    let report = HazardReport {
        date,
        predicted,
        layers,
    };
    debug!(
        "Simulated {} hazard events for {} (predicted: {})",
        report.event_count(),
        date,
        predicted
    );
    report
}
