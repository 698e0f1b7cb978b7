//! Per-frame output handed to the renderer.

use glam::DVec2;

use crate::anim::Kpi;
use crate::geo::Viewport;

use super::metrics::MetricsSnapshot;

/// An airport marker in logical canvas units.
#[derive(Debug, Clone, PartialEq)]
pub struct AirportMarker {
    pub id: String,
    pub label: String,
    pub position: DVec2,
    /// Endpoint of at least one filtered route; inactive markers are dimmed.
    pub active: bool,
    /// The focused airport.
    pub selected: bool,
    /// Connected to the focused airport by a filtered route.
    pub highlighted: bool,
}

/// A route drawn as a straight segment between two projected airports.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSegment {
    pub origin: String,
    pub destination: String,
    pub from: DVec2,
    pub to: DVec2,
    pub highlighted: bool,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Default)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub airports: Vec<AirportMarker>,
    pub routes: Vec<RouteSegment>,
    pub metrics: MetricsSnapshot,
    pub kpis: Vec<(Kpi, f64)>,
    pub selection: Option<String>,
    /// Filtered routes left out because an endpoint could not be placed.
    pub unplaced_routes: usize,
}

impl RenderFrame {
    /// Nearest marker to `point` within `tolerance` (per-axis radius in
    /// logical units). Active markers win over dimmed ones at equal distance.
    pub fn pick_airport(&self, point: DVec2, tolerance: DVec2) -> Option<&AirportMarker> {
        if !(tolerance.x > 0.0 && tolerance.y > 0.0) {
            return None;
        }
        self.airports
            .iter()
            .map(|marker| ((marker.position - point) / tolerance, marker))
            .map(|(offset, marker)| (offset.length_squared(), marker))
            .filter(|(distance, _)| *distance <= 1.0)
            .min_by(|(da, a), (db, b)| da.total_cmp(db).then(b.active.cmp(&a.active)))
            .map(|(_, marker)| marker)
    }

    pub fn highlighted_routes(&self) -> impl Iterator<Item = &RouteSegment> {
        self.routes.iter().filter(|r| r.highlighted)
    }

    pub fn kpi(&self, kpi: Kpi) -> Option<f64> {
        self.kpis.iter().find(|(k, _)| *k == kpi).map(|(_, v)| *v)
    }
}
