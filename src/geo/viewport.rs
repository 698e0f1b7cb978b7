//! Visible window over the logical canvas, with pan and zoom gestures.

use glam::DVec2;

use super::projection::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::error::AtlasError;

/// Visible rectangle in logical canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Top-left corner.
    pub origin: DVec2,
    /// Width and height.
    pub size: DVec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::full_extent()
    }
}

impl Viewport {
    /// The whole canvas.
    pub fn full_extent() -> Self {
        Self {
            origin: DVec2::ZERO,
            size: DVec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
        }
    }

    pub fn width(&self) -> f64 {
        self.size.x
    }

    pub fn height(&self) -> f64 {
        self.size.y
    }

    pub fn center(&self) -> DVec2 {
        self.origin + self.size / 2.0
    }

    /// Returns true if `point` lies inside the window, grown by `margin` on each side.
    pub fn contains(&self, point: DVec2, margin: f64) -> bool {
        let min = self.origin - DVec2::splat(margin);
        let max = self.origin + self.size + DVec2::splat(margin);
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Maps a logical point into a screen rectangle given by its top-left
    /// corner and size. Axes scale independently.
    pub fn to_screen(&self, point: DVec2, screen_min: DVec2, screen_size: DVec2) -> DVec2 {
        screen_min + (point - self.origin) * (screen_size / self.size)
    }

    /// Inverse of [`Viewport::to_screen`].
    pub fn to_logical(&self, screen: DVec2, screen_min: DVec2, screen_size: DVec2) -> DVec2 {
        self.origin + (screen - screen_min) * (self.size / screen_size)
    }

    /// Logical units per screen pixel along each axis.
    pub fn units_per_pixel(&self, screen_size: DVec2) -> DVec2 {
        self.size / screen_size
    }
}

/// Size limits for the viewport, applied per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportBounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Default for ViewportBounds {
    fn default() -> Self {
        Self {
            min: DVec2::new(CANVAS_WIDTH / 16.0, CANVAS_HEIGHT / 16.0),
            max: DVec2::new(CANVAS_WIDTH * 2.0, CANVAS_HEIGHT * 2.0),
        }
    }
}

impl ViewportBounds {
    /// Builds bounds, swapping and repairing inverted or degenerate limits.
    pub fn new(min: DVec2, max: DVec2) -> Self {
        let fallback = Self::default();
        let min = if min.x > 0.0 && min.y > 0.0 && min.is_finite() {
            min
        } else {
            log::warn!("Invalid minimum viewport size {:?}, using default", min);
            fallback.min
        };
        let max = if max.x > 0.0 && max.y > 0.0 && max.is_finite() {
            max
        } else {
            log::warn!("Invalid maximum viewport size {:?}, using default", max);
            fallback.max
        };
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn clamp(&self, size: DVec2) -> DVec2 {
        size.clamp(self.min, self.max)
    }
}

/// In-progress drag: the last pointer sample in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PanGesture {
    last: DVec2,
}

/// Owns the viewport and applies pan, zoom and reset transitions.
#[derive(Debug, Clone, Default)]
pub struct ViewportController {
    viewport: Viewport,
    bounds: ViewportBounds,
    pan: Option<PanGesture>,
}

impl ViewportController {
    pub fn new(bounds: ViewportBounds) -> Self {
        Self {
            viewport: Viewport::full_extent(),
            bounds,
            pan: None,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn bounds(&self) -> ViewportBounds {
        self.bounds
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    /// Starts a pan at `screen_pos`.
    pub fn pointer_down(&mut self, screen_pos: DVec2) {
        if !screen_pos.is_finite() {
            return;
        }
        self.pan = Some(PanGesture { last: screen_pos });
    }

    /// Moves the viewport opposite to the pointer delta. `surface_size` is the
    /// on-screen size of the map in pixels; it makes panning speed independent
    /// of resolution. Ignored when no pan is active.
    pub fn pointer_move(&mut self, screen_pos: DVec2, surface_size: DVec2) {
        let Some(pan) = self.pan.as_mut() else {
            return;
        };
        if !screen_pos.is_finite() || !(surface_size.x > 0.0 && surface_size.y > 0.0) {
            return;
        }

        let delta = screen_pos - pan.last;
        let scale = self.viewport.units_per_pixel(surface_size);
        self.viewport.origin -= delta * scale;
        pan.last = screen_pos;
    }

    /// Ends a pan (pointer released).
    pub fn pointer_up(&mut self) {
        self.pan = None;
    }

    /// Ends a pan because the pointer left the map surface.
    pub fn pointer_leave(&mut self) {
        if self.pan.take().is_some() {
            log::debug!("Pan cancelled: pointer left the map");
        }
    }

    /// Scales the viewport by `factor` (< 1 zooms in, > 1 zooms out) around
    /// its center. Width and height are clamped independently; the center
    /// stays fixed even when a clamp limits the change.
    pub fn zoom(&mut self, factor: f64) -> Result<(), AtlasError> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(AtlasError::InvalidZoomFactor(factor));
        }

        let old_size = self.viewport.size;
        let new_size = self.bounds.clamp(old_size * factor);
        self.viewport.origin += (old_size - new_size) / 2.0;
        self.viewport.size = new_size;
        Ok(())
    }

    /// Restores the full extent and ends any pan.
    pub fn reset(&mut self) {
        self.viewport = Viewport::full_extent();
        self.pan = None;
    }
}
