//! Animated KPI read-outs.

use super::animated_value::AnimatedValue;
use super::scheduler::FrameScheduler;
use crate::state::MetricsSnapshot;

/// Headline numbers shown in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kpi {
    Routes,
    Airports,
    Airlines,
    Countries,
    LongHaulShare,
    AverageDistance,
    DestinationsPerAirport,
    DomesticShare,
}

impl Kpi {
    pub fn label(&self) -> &'static str {
        match self {
            Kpi::Routes => "Active Routes",
            Kpi::Airports => "Airports Served",
            Kpi::Airlines => "Airlines Operating",
            Kpi::Countries => "Countries Connected",
            Kpi::LongHaulShare => "Long-Haul Share",
            Kpi::AverageDistance => "Average Route Distance",
            Kpi::DestinationsPerAirport => "Dest. / Airport",
            Kpi::DomesticShare => "Domestic Routes",
        }
    }

    pub fn all() -> &'static [Kpi] {
        &[
            Kpi::Routes,
            Kpi::Airports,
            Kpi::Airlines,
            Kpi::Countries,
            Kpi::LongHaulShare,
            Kpi::AverageDistance,
            Kpi::DestinationsPerAirport,
            Kpi::DomesticShare,
        ]
    }

    /// Reads this KPI from a snapshot.
    pub fn read(&self, snapshot: &MetricsSnapshot) -> f64 {
        match self {
            Kpi::Routes => snapshot.route_count as f64,
            Kpi::Airports => snapshot.airport_count as f64,
            Kpi::Airlines => snapshot.airline_count as f64,
            Kpi::Countries => snapshot.country_count as f64,
            Kpi::LongHaulShare => snapshot.long_haul_share,
            Kpi::AverageDistance => snapshot.average_distance_km,
            Kpi::DestinationsPerAirport => snapshot.average_destinations_per_airport,
            Kpi::DomesticShare => snapshot.domestic_share,
        }
    }

    /// Formats a (possibly mid-animation) value for display.
    pub fn format(&self, value: f64) -> String {
        match self {
            Kpi::Routes | Kpi::Airports | Kpi::Airlines | Kpi::Countries => format_thousands(value),
            Kpi::LongHaulShare | Kpi::DomesticShare => format!("{:.1} %", value),
            Kpi::AverageDistance => format!("{} km", format_thousands(value)),
            Kpi::DestinationsPerAirport => format!("{:.2}", value),
        }
    }
}

/// Rounds to an integer and groups digits by thousands ("36,708").
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// One animated value per KPI.
#[derive(Debug)]
pub struct KpiBoard {
    values: Vec<(Kpi, AnimatedValue)>,
}

impl KpiBoard {
    /// All KPIs start at zero.
    pub fn new(duration_ms: f64) -> Self {
        Self {
            values: Kpi::all()
                .iter()
                .map(|kpi| (*kpi, AnimatedValue::new(0.0, duration_ms)))
                .collect(),
        }
    }

    /// Points every KPI at the values of a new snapshot.
    pub fn retarget(&mut self, snapshot: &MetricsSnapshot, now_ms: f64, scheduler: &FrameScheduler) {
        for (kpi, value) in &mut self.values {
            value.set_target(kpi.read(snapshot), now_ms, scheduler);
        }
    }

    pub fn tick(&mut self, now_ms: f64) {
        for (_, value) in &mut self.values {
            value.tick(now_ms);
        }
    }

    pub fn value(&self, kpi: Kpi) -> f64 {
        self.values
            .iter()
            .find(|(k, _)| *k == kpi)
            .map_or(0.0, |(_, value)| value.value())
    }

    /// Current displayed value of every KPI, in [`Kpi::all`] order.
    pub fn readings(&self) -> Vec<(Kpi, f64)> {
        self.values.iter().map(|(kpi, value)| (*kpi, value.value())).collect()
    }

    pub fn is_animating(&self) -> bool {
        self.values.iter().any(|(_, value)| value.is_animating())
    }
}
