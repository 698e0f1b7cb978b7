//! Application state management.
//!
//! [`AppState`] is the single owner of all session state. Input arrives as
//! [`AppEvent`]s applied one at a time by [`AppState::apply`]; derived data
//! (projected airports, filtered routes, metrics) lives in [`Memo`] caches
//! keyed on the dataset version and filter criteria, and is rebuilt by
//! [`AppState::refresh`] whenever a key changes.

mod filter;
mod frame;
mod memo;
mod metrics;
mod selection;
mod settings;

use std::collections::HashSet;

use glam::DVec2;

pub use filter::{
    available_airlines, available_continents, filter_airports, filter_routes, route_matches,
    FilterCriteria, FilteredSet, Selector,
};
pub use frame::{AirportMarker, RenderFrame, RouteSegment};
pub use memo::Memo;
pub use metrics::{
    average_destinations_per_airport, average_distance, domestic_share, long_haul_share,
    signature_routes, top_entities, top_hub, MetricsSnapshot, SIGNATURE_ROUTE_COUNT,
    TOP_ENTITY_COUNT,
};
pub use selection::Selection;
pub use settings::AtlasSettings;

use crate::anim::{FrameScheduler, KpiBoard};
use crate::data::Dataset;
use crate::error::AtlasError;
use crate::geo::{project_airports, ProjectedAirports, Viewport, ViewportController};

/// Discrete inputs accepted by the core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Pointer pressed on the map at a screen position.
    PointerDown { position: DVec2 },
    /// Pointer moved; `surface_size` is the map's on-screen size in pixels.
    PointerMove { position: DVec2, surface_size: DVec2 },
    PointerUp,
    /// Pointer left the map surface.
    PointerLeave,
    /// Multiplicative zoom (< 1 zooms in).
    Zoom(f64),
    ZoomIn,
    ZoomOut,
    SetFilter(FilterCriteria),
    ClickAirport(String),
    /// Full extent and no selection.
    Reset,
    LoadDataset(Box<Dataset>),
}

/// Memo key for everything derived from the filtered route set.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FilterKey {
    dataset_version: u64,
    criteria: FilterCriteria,
}

/// Root application state.
pub struct AppState {
    settings: AtlasSettings,
    dataset: Dataset,
    dataset_version: u64,
    criteria: FilterCriteria,
    viewport: ViewportController,
    selection: Selection,

    projection: Memo<u64, ProjectedAirports>,
    filtered: Memo<FilterKey, FilteredSet>,
    metrics: Memo<FilterKey, MetricsSnapshot>,

    kpis: KpiBoard,
    scheduler: FrameScheduler,

    /// Status message displayed in the top bar.
    pub status_message: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Dataset::default(), AtlasSettings::default())
    }
}

impl AppState {
    pub fn new(dataset: Dataset, settings: AtlasSettings) -> Self {
        let status_message = format!("Loaded {}", dataset.summary());
        Self {
            viewport: ViewportController::new(settings.viewport_bounds()),
            kpis: KpiBoard::new(settings.animation_duration_ms),
            settings,
            dataset,
            dataset_version: 0,
            criteria: FilterCriteria::default(),
            selection: Selection::default(),
            projection: Memo::new(),
            filtered: Memo::new(),
            metrics: Memo::new(),
            scheduler: FrameScheduler::new(),
            status_message,
        }
    }

    pub fn settings(&self) -> &AtlasSettings {
        &self.settings
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn dataset_version(&self) -> u64 {
        self.dataset_version
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport.viewport()
    }

    pub fn is_panning(&self) -> bool {
        self.viewport.is_panning()
    }

    /// True while any KPI animation still needs frames.
    pub fn needs_repaint(&self) -> bool {
        self.scheduler.has_pending()
    }

    /// Applies one input event. Rejected input leaves the state unchanged.
    pub fn apply(&mut self, event: AppEvent) -> Result<(), AtlasError> {
        match event {
            AppEvent::PointerDown { position } => self.viewport.pointer_down(position),
            AppEvent::PointerMove {
                position,
                surface_size,
            } => self.viewport.pointer_move(position, surface_size),
            AppEvent::PointerUp => self.viewport.pointer_up(),
            AppEvent::PointerLeave => self.viewport.pointer_leave(),
            AppEvent::Zoom(factor) => self.zoom(factor)?,
            AppEvent::ZoomIn => self.zoom(1.0 / self.settings.effective_zoom_step())?,
            AppEvent::ZoomOut => self.zoom(self.settings.effective_zoom_step())?,
            AppEvent::SetFilter(criteria) => {
                if criteria != self.criteria {
                    log::debug!("Filter changed to {:?}", criteria);
                    self.status_message = format!(
                        "Continent: {} · Airline: {}",
                        criteria.continent.label(),
                        criteria.airline.label()
                    );
                    self.criteria = criteria;
                }
            }
            AppEvent::ClickAirport(id) => {
                self.selection.click(&id);
                log::debug!("Selection: {:?}", self.selection);
                self.status_message = match self.selection.selected() {
                    Some(selected) => format!("Selected {}", selected),
                    None => "Selection cleared".to_string(),
                };
            }
            AppEvent::Reset => {
                self.viewport.reset();
                self.selection.clear();
                self.status_message = "View reset".to_string();
            }
            AppEvent::LoadDataset(dataset) => self.load_dataset(*dataset),
        }
        Ok(())
    }

    fn zoom(&mut self, factor: f64) -> Result<(), AtlasError> {
        self.viewport.zoom(factor).inspect_err(|e| {
            log::warn!("Ignoring zoom request: {}", e);
        })
    }

    fn load_dataset(&mut self, dataset: Dataset) {
        log::info!("Replacing dataset: {}", dataset.summary());
        self.status_message = format!("Loaded {}", dataset.summary());
        let selection_gone = self
            .selection
            .selected()
            .is_some_and(|id| dataset.airport(id).is_none());
        if selection_gone {
            self.selection.clear();
        }
        self.dataset = dataset;
        self.dataset_version += 1;
    }

    /// Rebuilds any stale derived data and advances KPI animations to `now_ms`.
    pub fn refresh(&mut self, now_ms: f64) {
        let dataset = &self.dataset;

        self.projection
            .get_or_compute(self.dataset_version, || project_airports(&dataset.airports));

        let key = FilterKey {
            dataset_version: self.dataset_version,
            criteria: self.criteria.clone(),
        };
        let criteria = &self.criteria;
        let filtered = self
            .filtered
            .get_or_compute(key.clone(), || FilteredSet::compute(dataset, criteria));

        let metrics_stale = !self.metrics.is_current(&key);
        let signature_count = self.settings.signature_route_count;
        let top_count = self.settings.top_entity_count;
        let snapshot = self.metrics.get_or_compute(key, || {
            MetricsSnapshot::compute(&filtered.routes, dataset, signature_count, top_count)
        });

        if metrics_stale {
            self.kpis.retarget(snapshot, now_ms, &self.scheduler);
        }
        self.kpis.tick(now_ms);
    }

    /// Filtered routes and airports as of the last refresh.
    pub fn filtered(&self) -> Option<&FilteredSet> {
        self.filtered.value()
    }

    /// Metrics as of the last refresh.
    pub fn metrics(&self) -> Option<&MetricsSnapshot> {
        self.metrics.value()
    }

    /// Number of times each derived cache has been rebuilt:
    /// (projection, filter, metrics).
    pub fn recomputations(&self) -> (usize, usize, usize) {
        (
            self.projection.computations(),
            self.filtered.computations(),
            self.metrics.computations(),
        )
    }

    /// Assembles the renderer's view of the current state.
    pub fn frame(&self) -> RenderFrame {
        let empty_projection = ProjectedAirports::default();
        let projection = self.projection.value().unwrap_or(&empty_projection);
        let empty_filtered = FilteredSet::default();
        let filtered = self.filtered.value().unwrap_or(&empty_filtered);

        let active: HashSet<&str> = filtered.airports.iter().map(String::as_str).collect();
        let mut connected: HashSet<&str> = HashSet::new();

        let mut routes = Vec::new();
        let mut unplaced_routes = 0;
        for route in filtered.routes.iter().take(self.settings.max_rendered_routes) {
            let highlighted = self.selection.highlights(route);
            if highlighted {
                connected.insert(route.origin.as_str());
                connected.insert(route.destination.as_str());
            }
            match (projection.position(&route.origin), projection.position(&route.destination)) {
                (Some(from), Some(to)) => routes.push(RouteSegment {
                    origin: route.origin.clone(),
                    destination: route.destination.clone(),
                    from,
                    to,
                    highlighted,
                }),
                _ => unplaced_routes += 1,
            }
        }

        let airports = projection
            .iter()
            .take(self.settings.max_rendered_airports)
            .map(|projected| {
                let id = projected.airport.id.as_str();
                AirportMarker {
                    id: id.to_string(),
                    label: projected.airport.display_city().to_string(),
                    position: projected.position,
                    active: active.contains(id),
                    selected: self.selection.is_selected(id),
                    highlighted: connected.contains(id),
                }
            })
            .collect();

        RenderFrame {
            viewport: self.viewport.viewport(),
            airports,
            routes,
            metrics: self.metrics.value().cloned().unwrap_or_default(),
            kpis: self.kpis.readings(),
            selection: self.selection.selected().map(str::to_string),
            unplaced_routes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::Kpi;

    fn demo_state() -> AppState {
        let mut state = AppState::new(Dataset::demo(), AtlasSettings::default());
        state.refresh(0.0);
        state
    }

    fn only(value: &str) -> Selector {
        Selector::Only(value.to_string())
    }

    #[test]
    fn test_initial_frame_shows_everything() {
        let state = demo_state();
        let frame = state.frame();

        assert_eq!(frame.viewport, Viewport::full_extent());
        assert_eq!(frame.routes.len(), 16);
        assert_eq!(frame.airports.len(), 14);
        assert!(frame.airports.iter().all(|a| a.active && !a.selected));
        assert!(frame.routes.iter().all(|r| !r.highlighted));
        assert_eq!(frame.unplaced_routes, 0);
        assert_eq!(frame.metrics.route_count, 16);
        assert_eq!(frame.metrics.signature_routes.len(), 4);
        assert_eq!(frame.metrics.signature_routes[0].origin, "JFK");
        assert_eq!(frame.selection, None);
    }

    #[test]
    fn test_filter_change_recomputes_once() {
        let mut state = demo_state();
        assert_eq!(state.recomputations(), (1, 1, 1));

        state.refresh(10.0);
        assert_eq!(state.recomputations(), (1, 1, 1));

        let criteria = FilterCriteria {
            airline: only("QF"),
            ..Default::default()
        };
        state.apply(AppEvent::SetFilter(criteria.clone())).unwrap();
        state.refresh(20.0);
        assert_eq!(state.recomputations(), (1, 2, 2));

        // Same criteria again: nothing to rebuild.
        state.apply(AppEvent::SetFilter(criteria)).unwrap();
        state.refresh(30.0);
        assert_eq!(state.recomputations(), (1, 2, 2));

        let frame = state.frame();
        assert_eq!(frame.routes.len(), 4);
        assert!(frame.airports.iter().any(|a| a.id == "SYD" && a.active));
        assert!(frame.airports.iter().any(|a| a.id == "JFK" && !a.active));
    }

    #[test]
    fn test_dataset_replacement_reprojects() {
        let mut state = demo_state();
        let json = r#"{"routes": [{"origin": "A", "destination": "B", "distance_km": 100}],
                       "airports": {"A": {"longitude": 0, "latitude": 0},
                                    "B": {"longitude": 10, "latitude": 10}}}"#;
        let dataset = Dataset::from_json_str(json).unwrap();
        state.apply(AppEvent::LoadDataset(Box::new(dataset))).unwrap();
        state.refresh(0.0);

        assert_eq!(state.dataset_version(), 1);
        assert_eq!(state.recomputations(), (2, 2, 2));
        let frame = state.frame();
        assert_eq!(frame.routes.len(), 1);
        assert_eq!(frame.airports.len(), 2);
    }

    #[test]
    fn test_dataset_replacement_drops_vanished_selection() {
        let json = r#"{"routes": [{"origin": "LHR", "destination": "B", "distance_km": 100}],
                       "airports": {"LHR": {"longitude": 0, "latitude": 51},
                                    "B": {"longitude": 10, "latitude": 10}}}"#;

        // Selected airport still present: kept.
        let mut state = demo_state();
        state.apply(AppEvent::ClickAirport("LHR".to_string())).unwrap();
        let dataset = Dataset::from_json_str(json).unwrap();
        state.apply(AppEvent::LoadDataset(Box::new(dataset))).unwrap();
        assert_eq!(state.selection().selected(), Some("LHR"));

        // Selected airport missing from the new table: cleared.
        let mut state = demo_state();
        state.apply(AppEvent::ClickAirport("SYD".to_string())).unwrap();
        let dataset = Dataset::from_json_str(json).unwrap();
        state.apply(AppEvent::LoadDataset(Box::new(dataset))).unwrap();
        assert_eq!(*state.selection(), Selection::Unselected);
        state.refresh(0.0);
        assert_eq!(state.frame().selection, None);
    }

    #[test]
    fn test_selection_highlights_without_changing_the_route_set() {
        let mut state = demo_state();
        state.apply(AppEvent::ClickAirport("LHR".to_string())).unwrap();
        state.refresh(0.0);

        let frame = state.frame();
        assert_eq!(frame.routes.len(), 16);
        let highlighted: Vec<_> = frame
            .highlighted_routes()
            .map(|r| (r.origin.as_str(), r.destination.as_str()))
            .collect();
        assert_eq!(highlighted, vec![("LHR", "PER"), ("LHR", "CDG"), ("JFK", "LHR")]);

        let lhr = frame.airports.iter().find(|a| a.id == "LHR").unwrap();
        assert!(lhr.selected);
        let per = frame.airports.iter().find(|a| a.id == "PER").unwrap();
        assert!(per.highlighted && !per.selected);
        assert_eq!(frame.selection.as_deref(), Some("LHR"));

        // Selecting again toggles off.
        state.apply(AppEvent::ClickAirport("LHR".to_string())).unwrap();
        assert_eq!(state.frame().highlighted_routes().count(), 0);
    }

    #[test]
    fn test_reset_clears_selection_and_viewport_but_keeps_filter() {
        let mut state = demo_state();
        let criteria = FilterCriteria {
            continent: only("Europe"),
            ..Default::default()
        };
        state.apply(AppEvent::SetFilter(criteria.clone())).unwrap();
        state.apply(AppEvent::ZoomIn).unwrap();
        state.apply(AppEvent::ClickAirport("CDG".to_string())).unwrap();

        state.apply(AppEvent::Reset).unwrap();
        assert_eq!(state.viewport(), Viewport::full_extent());
        assert_eq!(*state.selection(), Selection::Unselected);
        assert_eq!(*state.criteria(), criteria);
    }

    #[test]
    fn test_invalid_zoom_leaves_state_unchanged() {
        let mut state = demo_state();
        state.apply(AppEvent::ZoomIn).unwrap();
        let before = state.viewport();

        let result = state.apply(AppEvent::Zoom(f64::NAN));
        assert!(matches!(result, Err(AtlasError::InvalidZoomFactor(_))));
        assert_eq!(state.apply(AppEvent::Zoom(0.0)), Err(AtlasError::InvalidZoomFactor(0.0)));
        assert_eq!(state.viewport(), before);
    }

    #[test]
    fn test_zoom_buttons_use_settings_step() {
        let mut state = demo_state();
        state.apply(AppEvent::ZoomIn).unwrap();
        assert!((state.viewport().width() - 800.0).abs() < 1e-9);
        state.apply(AppEvent::ZoomOut).unwrap();
        assert!((state.viewport().width() - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_filter_change_mid_pan_keeps_pan() {
        let mut state = demo_state();
        let surface = DVec2::new(1000.0, 500.0);
        state
            .apply(AppEvent::PointerDown {
                position: DVec2::new(0.0, 0.0),
            })
            .unwrap();
        state
            .apply(AppEvent::SetFilter(FilterCriteria {
                airline: only("SQ"),
                ..Default::default()
            }))
            .unwrap();
        state.refresh(0.0);
        assert!(state.is_panning());
        assert_eq!(state.frame().routes.len(), 3);

        state
            .apply(AppEvent::PointerMove {
                position: DVec2::new(-10.0, 0.0),
                surface_size: surface,
            })
            .unwrap();
        assert!((state.viewport().origin.x - 10.0).abs() < 1e-9);

        state.apply(AppEvent::PointerLeave).unwrap();
        assert!(!state.is_panning());
    }

    #[test]
    fn test_kpis_animate_after_filter_change() {
        let mut state = demo_state();
        // Initial snapshot animates from zero.
        assert!(state.needs_repaint());
        state.refresh(1500.0);
        assert!(!state.needs_repaint());
        assert_eq!(state.frame().kpi(Kpi::Routes), Some(16.0));

        state
            .apply(AppEvent::SetFilter(FilterCriteria {
                airline: only("QF"),
                ..Default::default()
            }))
            .unwrap();
        state.refresh(2000.0);
        assert!(state.needs_repaint());

        state.refresh(2750.0);
        let midway = state.frame().kpi(Kpi::Routes).unwrap();
        assert!(midway > 4.0 && midway < 16.0);

        state.refresh(3500.0);
        assert_eq!(state.frame().kpi(Kpi::Routes), Some(4.0));
        assert!(!state.needs_repaint());
    }

    #[test]
    fn test_empty_dataset_degrades_to_zero() {
        let mut state = AppState::default();
        state.refresh(0.0);
        let frame = state.frame();
        assert!(frame.routes.is_empty());
        assert!(frame.airports.is_empty());
        assert_eq!(frame.metrics, MetricsSnapshot::default());
        assert!(!state.needs_repaint());
    }

    #[test]
    fn test_dangling_routes_are_counted_not_drawn() {
        let json = r#"{"routes": [{"origin": "A", "destination": "MISSING", "distance_km": 100},
                                  {"origin": "A", "destination": "B", "distance_km": 50}],
                       "airports": {"A": {"longitude": 0, "latitude": 0},
                                    "B": {"longitude": 10, "latitude": 10}}}"#;
        let mut state = AppState::new(Dataset::from_json_str(json).unwrap(), AtlasSettings::default());
        state.refresh(0.0);
        let frame = state.frame();
        assert_eq!(frame.routes.len(), 1);
        assert_eq!(frame.unplaced_routes, 1);
        assert_eq!(frame.metrics.route_count, 2);
    }

    #[test]
    fn test_render_caps_apply() {
        let settings = AtlasSettings {
            max_rendered_routes: 3,
            max_rendered_airports: 5,
            ..Default::default()
        };
        let mut state = AppState::new(Dataset::demo(), settings);
        state.refresh(0.0);
        let frame = state.frame();
        assert_eq!(frame.routes.len(), 3);
        assert_eq!(frame.airports.len(), 5);
        assert_eq!(frame.metrics.route_count, 16);
    }
}
