//! Map rendering.
//!
//! Draws the graticule, route segments and airport markers of a
//! [`RenderFrame`] into an egui painter.

use eframe::egui::{Align2, FontId, Painter, Pos2, Rect, Stroke, Vec2};
use glam::DVec2;

use super::projection::graticule;
use super::viewport::Viewport;
use crate::state::{AirportMarker, RenderFrame, RouteSegment};
use crate::ui::colors::map as colors;

/// Graticule spacing in degrees.
const GRATICULE_STEP_DEG: f64 = 30.0;

/// Maps between the logical canvas and a screen rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapTransform {
    pub viewport: Viewport,
    pub rect: Rect,
}

impl MapTransform {
    pub fn new(viewport: Viewport, rect: Rect) -> Self {
        Self { viewport, rect }
    }

    fn screen_min(&self) -> DVec2 {
        DVec2::new(self.rect.min.x as f64, self.rect.min.y as f64)
    }

    /// Screen size in pixels.
    pub fn screen_size(&self) -> DVec2 {
        DVec2::new(self.rect.width() as f64, self.rect.height() as f64)
    }

    pub fn to_screen(&self, point: DVec2) -> Pos2 {
        let p = self
            .viewport
            .to_screen(point, self.screen_min(), self.screen_size());
        Pos2::new(p.x as f32, p.y as f32)
    }

    pub fn to_logical(&self, pos: Pos2) -> DVec2 {
        self.viewport.to_logical(
            DVec2::new(pos.x as f64, pos.y as f64),
            self.screen_min(),
            self.screen_size(),
        )
    }

    /// A screen-space radius expressed in logical units per axis.
    pub fn pixels_to_logical(&self, radius_px: f64) -> DVec2 {
        self.viewport.units_per_pixel(self.screen_size()) * radius_px
    }

    /// Zoom relative to the full extent (1.0 = whole world).
    pub fn zoom_level(&self) -> f64 {
        Viewport::full_extent().width() / self.viewport.width()
    }
}

/// Renders the whole map for one frame.
pub fn render_map(painter: &Painter, frame: &RenderFrame, transform: &MapTransform) {
    painter.rect_filled(transform.rect, 0.0, colors::OCEAN);

    render_graticule(painter, transform);

    // Dim routes first so highlighted ones draw on top
    for route in frame.routes.iter().filter(|r| !r.highlighted) {
        render_route(painter, route, transform, frame.selection.is_some());
    }
    for route in frame.highlighted_routes() {
        render_route(painter, route, transform, true);
    }

    let margin = transform.pixels_to_logical(12.0).max_element();
    for airport in &frame.airports {
        if transform.viewport.contains(airport.position, margin) {
            render_airport(painter, airport, transform);
        }
    }
}

fn render_graticule(painter: &Painter, transform: &MapTransform) {
    let stroke = Stroke::new(1.0, colors::GRATICULE);
    for line in graticule(GRATICULE_STEP_DEG) {
        let points: Vec<Pos2> = line.iter().map(|p| transform.to_screen(*p)).collect();
        for window in points.windows(2) {
            if let [a, b] = window {
                painter.line_segment([*a, *b], stroke);
            }
        }
    }
}

fn render_route(
    painter: &Painter,
    route: &RouteSegment,
    transform: &MapTransform,
    has_selection: bool,
) {
    let from = transform.to_screen(route.from);
    let to = transform.to_screen(route.to);

    if route.highlighted {
        // Wide translucent pass under the core line
        painter.line_segment([from, to], Stroke::new(6.0, colors::ROUTE_GLOW));
        painter.line_segment([from, to], Stroke::new(2.0, colors::ROUTE_HIGHLIGHT));
    } else if has_selection {
        painter.line_segment([from, to], Stroke::new(1.0, colors::ROUTE_MUTED));
    } else {
        painter.line_segment([from, to], Stroke::new(1.2, colors::ROUTE));
    }
}

fn render_airport(painter: &Painter, airport: &AirportMarker, transform: &MapTransform) {
    let pos = transform.to_screen(airport.position);

    if airport.selected {
        painter.circle_filled(pos, 6.0, colors::AIRPORT_SELECTED);
        painter.circle_stroke(pos, 9.0, Stroke::new(1.5, colors::AIRPORT_SELECTED));
        render_label(painter, pos, &airport.id, &airport.label);
    } else if airport.highlighted {
        painter.circle_filled(pos, 4.5, colors::ROUTE_HIGHLIGHT);
        render_label(painter, pos, &airport.id, &airport.label);
    } else if airport.active {
        painter.circle_filled(pos, 3.5, colors::AIRPORT);
        if transform.zoom_level() >= 4.0 {
            render_label(painter, pos, &airport.id, "");
        }
    } else {
        painter.circle_filled(pos, 2.5, colors::AIRPORT_DIM);
    }
}

fn render_label(painter: &Painter, pos: Pos2, id: &str, city: &str) {
    let text = if city.is_empty() || city == id {
        id.to_string()
    } else {
        format!("{} · {}", id, city)
    };
    painter.text(
        pos + Vec2::new(8.0, -6.0),
        Align2::LEFT_BOTTOM,
        text,
        FontId::proportional(11.0),
        colors::LABEL,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn transform(viewport: Viewport) -> MapTransform {
        MapTransform::new(
            viewport,
            Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(500.0, 250.0)),
        )
    }

    #[test]
    fn test_full_extent_maps_corners() {
        let t = transform(Viewport::full_extent());
        assert_eq!(t.to_screen(DVec2::ZERO), Pos2::new(100.0, 50.0));
        assert_eq!(t.to_screen(DVec2::new(1000.0, 500.0)), Pos2::new(600.0, 300.0));
        assert!(approx_eq!(f64, t.zoom_level(), 1.0, epsilon = 1e-12));
    }

    #[test]
    fn test_round_trip_through_zoomed_view() {
        let viewport = Viewport {
            origin: DVec2::new(200.0, 100.0),
            size: DVec2::new(250.0, 125.0),
        };
        let t = transform(viewport);
        let logical = t.to_logical(Pos2::new(350.0, 175.0));
        assert!(approx_eq!(f64, logical.x, 325.0, epsilon = 1e-6));
        assert!(approx_eq!(f64, logical.y, 162.5, epsilon = 1e-6));

        let back = t.to_screen(logical);
        assert!((back.x - 350.0).abs() < 1e-3);
        assert!((back.y - 175.0).abs() < 1e-3);
        assert!(approx_eq!(f64, t.zoom_level(), 4.0, epsilon = 1e-12));
    }

    #[test]
    fn test_pixel_radius_scales_with_zoom() {
        let full = transform(Viewport::full_extent());
        assert_eq!(full.pixels_to_logical(8.0), DVec2::new(16.0, 16.0));

        let zoomed = transform(Viewport {
            origin: DVec2::ZERO,
            size: DVec2::new(250.0, 125.0),
        });
        assert_eq!(zoomed.pixels_to_logical(8.0), DVec2::new(4.0, 4.0));
    }
}
