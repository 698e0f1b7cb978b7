//! Map geometry: projection onto the logical canvas, the pan/zoom viewport,
//! and drawing of routes and airports.
//!
//! All positions live in a fixed 1000 x 500 logical canvas. The viewport
//! selects the window of that canvas shown on screen.

mod projection;
mod renderer;
mod viewport;

pub use projection::{
    graticule, project, project_airports, project_clamped, project_coord, unproject,
    ProjectedAirport, ProjectedAirports, CANVAS_HEIGHT, CANVAS_WIDTH, MAX_LATITUDE,
};
pub use renderer::{render_map, MapTransform};
pub use viewport::{Viewport, ViewportBounds, ViewportController};
