//! Frame-driven animation of displayed values.
//!
//! A [`Clock`] supplies timestamps, a [`FrameScheduler`] tracks which
//! animations still need frames, and [`AnimatedValue`] interpolates a single
//! number toward its target. [`KpiBoard`] groups one animated value per KPI.

mod animated_value;
mod kpi;
mod scheduler;

pub use animated_value::{ease_out_cubic, AnimatedValue, DEFAULT_DURATION_MS};
pub use kpi::{format_thousands, Kpi, KpiBoard};
pub use scheduler::{Clock, FrameHandle, FrameScheduler, ManualClock, SystemClock};
