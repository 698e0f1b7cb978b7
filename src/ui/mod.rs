//! UI modules for the Route Atlas application.
//!
//! The UI is split into distinct panels:
//! - Top bar: Title, dataset provenance, and status
//! - Left panel: Filters, view controls, and the selected airport
//! - Central canvas: Route map
//! - Right panel: Animated KPIs and charts
//!
//! Panels never mutate state directly. They read the current
//! [`RenderFrame`](crate::state::RenderFrame) and push
//! [`AppEvent`](crate::state::AppEvent)s for the app to apply.

mod canvas;
pub mod colors;
mod left_panel;
mod right_panel;
mod top_bar;

pub use canvas::render_canvas;
pub use left_panel::render_left_panel;
pub use right_panel::render_right_panel;
pub use top_bar::render_top_bar;
