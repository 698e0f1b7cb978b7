//! Centralized color constants for the UI.
//!
//! This module provides consistent colors across all UI panels.

use eframe::egui::Color32;

/// General UI colors for labels and values.
pub mod ui {
    use super::Color32;

    /// Muted gray for stat labels.
    pub const LABEL: Color32 = Color32::from_rgb(130, 130, 140);
    /// Slightly brighter for stat values.
    pub const VALUE: Color32 = Color32::from_rgb(210, 210, 220);
    /// Emphasized color for active states.
    pub const ACTIVE: Color32 = Color32::from_rgb(100, 180, 255);
    /// Warnings such as unplaced routes.
    pub const WARNING: Color32 = Color32::from_rgb(255, 180, 50);
}

/// Colors for the route map.
pub mod map {
    use super::Color32;

    pub const OCEAN: Color32 = Color32::from_rgb(14, 18, 32);
    pub const GRATICULE: Color32 = Color32::from_rgba_premultiplied(40, 48, 70, 160);
    /// Default route line.
    pub const ROUTE: Color32 = Color32::from_rgba_premultiplied(60, 120, 180, 150);
    /// Routes not connected to the selected airport.
    pub const ROUTE_MUTED: Color32 = Color32::from_rgba_premultiplied(30, 50, 80, 90);
    pub const ROUTE_HIGHLIGHT: Color32 = Color32::from_rgb(255, 190, 80);
    pub const ROUTE_GLOW: Color32 = Color32::from_rgba_premultiplied(90, 60, 20, 90);
    pub const AIRPORT: Color32 = Color32::from_rgb(120, 200, 255);
    /// Airports with no filtered route.
    pub const AIRPORT_DIM: Color32 = Color32::from_rgb(60, 70, 90);
    pub const AIRPORT_SELECTED: Color32 = Color32::from_rgb(255, 110, 90);
    pub const LABEL: Color32 = Color32::from_rgb(220, 220, 230);
}

/// Colors for dashboard charts.
pub mod chart {
    use super::Color32;

    pub const BAR: Color32 = Color32::from_rgb(70, 130, 200);
    pub const BAR_BACKGROUND: Color32 = Color32::from_rgb(35, 38, 52);
    pub const SHORT_HAUL: Color32 = Color32::from_rgb(100, 200, 140);
    pub const MEDIUM_HAUL: Color32 = Color32::from_rgb(240, 200, 90);
    pub const LONG_HAUL: Color32 = Color32::from_rgb(240, 110, 90);
    pub const OTHER: Color32 = Color32::from_rgb(140, 140, 160);
}
