//! User-tunable settings for the map and dashboard.
//!
//! Settings are read from an optional JSON file. Unknown or missing fields
//! fall back to defaults, and an unreadable file falls back entirely.

use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::geo::ViewportBounds;

use super::metrics::{SIGNATURE_ROUTE_COUNT, TOP_ENTITY_COUNT};

/// Map, animation and dashboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasSettings {
    /// Smallest viewport size [width, height] in canvas units.
    pub min_viewport: [f64; 2],
    /// Largest viewport size [width, height] in canvas units.
    pub max_viewport: [f64; 2],
    /// Zoom-out factor of one button press; zoom-in uses its inverse.
    pub zoom_step: f64,
    /// Mouse wheel zoom factor is exp(-scroll * sensitivity).
    pub scroll_zoom_sensitivity: f64,
    /// Duration of KPI value transitions.
    pub animation_duration_ms: f64,
    pub signature_route_count: usize,
    pub top_entity_count: usize,
    pub max_rendered_routes: usize,
    pub max_rendered_airports: usize,
    /// Click distance (screen pixels) within which an airport is picked.
    pub airport_hit_radius_px: f64,
}

impl Default for AtlasSettings {
    fn default() -> Self {
        let bounds = ViewportBounds::default();
        Self {
            min_viewport: bounds.min.to_array(),
            max_viewport: bounds.max.to_array(),
            zoom_step: 1.25,
            scroll_zoom_sensitivity: 0.002,
            animation_duration_ms: 1500.0,
            signature_route_count: SIGNATURE_ROUTE_COUNT,
            top_entity_count: TOP_ENTITY_COUNT,
            max_rendered_routes: 2000,
            max_rendered_airports: 2000,
            airport_hit_radius_px: 8.0,
        }
    }
}

impl AtlasSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses settings from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads settings from `path`, logging and falling back to defaults on
    /// any failure.
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Failed to parse settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn viewport_bounds(&self) -> ViewportBounds {
        ViewportBounds::new(
            DVec2::from_array(self.min_viewport),
            DVec2::from_array(self.max_viewport),
        )
    }

    /// Zoom step, replaced by the default when unusable.
    pub fn effective_zoom_step(&self) -> f64 {
        if self.zoom_step.is_finite() && self.zoom_step > 1.0 {
            self.zoom_step
        } else {
            Self::default().zoom_step
        }
    }

    /// Zoom factor for a vertical scroll delta (positive scrolls zoom in).
    pub fn scroll_zoom_factor(&self, scroll_delta: f64) -> f64 {
        (-scroll_delta * self.scroll_zoom_sensitivity).exp()
    }
}
