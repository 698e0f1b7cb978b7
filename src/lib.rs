#![warn(clippy::all)]

//! Route Atlas - an interactive flight route map and network dashboard.
//!
//! Airports are projected onto a fixed logical canvas, routes can be filtered
//! by continent and airline, and summary metrics animate toward their new
//! values whenever the filtered set changes. All state transitions go through
//! [`state::AppState::apply`], so the core can be driven without a window.

pub mod anim;
pub mod cli;
pub mod data;
pub mod error;
pub mod geo;
pub mod state;
pub mod ui;
